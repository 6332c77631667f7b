//! Route labels for spans and metrics.

use birthday_box_app::domain::categories::Category;
use uuid::Uuid;

/// Collapse the variable parts of a path so metric labels stay bounded.
///
/// Uuid segments become `{uuid}`; category names stay as they are, there
/// being only four.
pub(super) fn route_label(path: &str) -> String {
    let segments: Vec<&str> = path
        .trim_start_matches('/')
        .split('/')
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{uuid}"
            } else if segment.parse::<Category>().is_ok()
                || segment.chars().all(|c| c.is_ascii_lowercase() || c == '_')
            {
                segment
            } else {
                "{other}"
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuids_and_odd_segments_are_collapsed() {
        let uuid = Uuid::now_v7();

        assert_eq!(route_label("/"), "/");
        assert_eq!(route_label("/shop/products/Gifts"), "/shop/products/Gifts");
        assert_eq!(route_label(&format!("/orders/{uuid}")), "/orders/{uuid}");
        assert_eq!(route_label("/shop/steps/Nope-1"), "/shop/steps/{other}");
    }
}

//! Points Policy
//!
//! Every child gets a points budget determined solely by age: younger children
//! get a smaller box, teenagers a larger one.

use jiff::civil::Date;

/// Budget for children aged 0 through 11.
pub const YOUNG_CHILD_POINTS: u32 = 65;

/// Budget for children aged 12 through 18.
pub const TEEN_POINTS: u32 = 100;

/// Youngest and oldest ages eligible for a box.
pub const ELIGIBLE_AGES: (i32, i32) = (0, 18);

/// Points budget for a child of the given age.
///
/// Ages outside the eligible range yield zero; callers reject them separately.
pub fn assign_points(age: i32) -> u32 {
    match age {
        0..=11 => YOUNG_CHILD_POINTS,
        12..=18 => TEEN_POINTS,
        _ => 0,
    }
}

/// Whole years between `birth_date` and `today`.
///
/// Negative when the birth date lies in the future.
pub fn age_on(birth_date: Date, today: Date) -> i32 {
    let mut age = i32::from(today.year()) - i32::from(birth_date.year());

    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }

    age
}

/// Whether an age may shop at all.
pub fn is_eligible_age(age: i32) -> bool {
    (ELIGIBLE_AGES.0..=ELIGIBLE_AGES.1).contains(&age)
}

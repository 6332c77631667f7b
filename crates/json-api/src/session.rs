//! Session middleware.
//!
//! Shoppers are identified by an opaque key carried in `x-session-key`. A
//! request without one starts a new session; the key in use is always echoed
//! back so the client can hold on to it.

use birthday_box_app::domain::drafts::SessionKey;
use salvo::{http::header::HeaderValue, prelude::*};
use tracing::{Span, debug};

use crate::extensions::*;

pub(crate) const SESSION_KEY_HEADER: &str = "x-session-key";

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let session = match req.header::<String>(SESSION_KEY_HEADER) {
        Some(value) => match SessionKey::parse(&value) {
            Ok(session) => session,
            Err(_invalid) => {
                res.render(StatusError::bad_request().brief("Invalid session key"));
                ctrl.skip_rest();

                return;
            }
        },
        None => {
            let session = SessionKey::generate();

            debug!(session = %session, "started new session");

            session
        }
    };

    match HeaderValue::from_str(session.as_str()) {
        Ok(value) => {
            res.headers_mut().insert(SESSION_KEY_HEADER, value);
        }
        Err(_unencodable) => {
            res.render(StatusError::internal_server_error());
            ctrl.skip_rest();

            return;
        }
    }

    Span::current().record("session", session.as_str());

    depot.insert_session_key(session);

    ctrl.call_next(req, depot, res).await;
}

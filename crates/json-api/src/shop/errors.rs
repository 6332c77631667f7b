//! Shop Errors

use birthday_box_app::domain::shop::ShopError;
use salvo::{
    oapi::{self, Components, Content, EndpointOutRegister, Operation, ToSchema},
    prelude::*,
    writing::Scribe,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::observability::record_rejection;

/// Body of a 409: where the shopper should go instead, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct RejectionBody {
    /// Step to send the shopper to
    pub redirect: String,

    /// Message to show on that step
    pub error: Option<String>,
}

/// Error side of every shop handler.
#[derive(Debug)]
pub(crate) enum ShopRejection {
    /// The shopper must go back to another step.
    Redirect(RejectionBody),

    /// Anything that is not a flow rejection.
    Status(StatusError),
}

impl From<StatusError> for ShopRejection {
    fn from(error: StatusError) -> Self {
        Self::Status(error)
    }
}

impl From<ShopError> for ShopRejection {
    fn from(error: ShopError) -> Self {
        if let Some(step) = error.redirect() {
            info!(redirect = %step, reason = %error, "shopper redirected");
            record_rejection(step.as_str());

            return Self::Redirect(RejectionBody {
                redirect: step.as_str().to_string(),
                error: error.user_message(),
            });
        }

        match error {
            ShopError::ProductNotFound { .. } => {
                Self::Status(StatusError::not_found().brief("Product not found"))
            }
            ShopError::OrderNotFound => {
                Self::Status(StatusError::not_found().brief("Order not found"))
            }
            other => {
                error!(error = ?other, "shop request failed");

                Self::Status(StatusError::internal_server_error())
            }
        }
    }
}

impl Scribe for ShopRejection {
    fn render(self, res: &mut Response) {
        match self {
            Self::Redirect(body) => {
                res.status_code(StatusCode::CONFLICT);
                res.render(Json(body));
            }
            Self::Status(error) => res.render(error),
        }
    }
}

impl EndpointOutRegister for ShopRejection {
    fn register(components: &mut Components, operation: &mut Operation) {
        <StatusError as EndpointOutRegister>::register(components, operation);

        operation.responses.insert(
            StatusCode::CONFLICT.as_str(),
            oapi::Response::new("Step unavailable; go to `redirect`").add_content(
                "application/json",
                Content::new(RejectionBody::to_schema(components)),
            ),
        );
    }
}

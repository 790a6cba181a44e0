pub mod action;

pub use action::{Action, ImageEditParams, ImageVariationParams};

use serde::{Deserialize, Serialize};

/// Normalized response body for denied and failed requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn no_permission() -> Self {
        Self::new("No Permission")
    }

    pub fn internal_server_error() -> Self {
        Self::new("Internal Server Error")
    }
}

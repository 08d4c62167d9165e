//! Wire types for the payment processor API.
//!
//! The processor's invoice shape matches the domain [`Invoice`] closely
//! enough that the domain type deserializes it directly (`createdTime` as
//! unix seconds, free-form `metadata`); this module only carries the pieces
//! that differ.

use serde::Deserialize;

/// Error body the processor attaches to non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiErrorBody {
    pub fn describe(&self) -> String {
        match (&self.code, &self.message) {
            (Some(code), Some(message)) => format!("{}: {}", code, message),
            (None, Some(message)) => message.clone(),
            (Some(code), None) => code.clone(),
            (None, None) => "unspecified error".to_string(),
        }
    }
}

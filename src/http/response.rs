use serde::de::DeserializeOwned;

use crate::error::HarnessError;

/// How the service answered, in the harness's error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObservedOutcome {
    Accepted,
    ValidationError,
    NotFoundError,
    Unexpected(u16),
}

impl ObservedOutcome {
    pub fn classify(status: u16) -> Self {
        match status {
            200 => ObservedOutcome::Accepted,
            400 => ObservedOutcome::ValidationError,
            404 => ObservedOutcome::NotFoundError,
            other => ObservedOutcome::Unexpected(other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub duration_ms: u128,
    pub body: String,
}

impl HttpResponse {
    pub fn outcome(&self) -> ObservedOutcome {
        ObservedOutcome::classify(self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, HarnessError> {
        serde_json::from_str(&self.body)
            .map_err(|err| HarnessError::decode(format!("response body `{}`", self.body), err))
    }

    /// `"404 Not Found"`-style label for reports.
    pub fn status_line(&self) -> String {
        format!("{} {}", self.status, self.status_text)
    }
}

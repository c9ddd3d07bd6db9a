use thiserror::Error;

/// Main error type for provider calls.
///
/// Adapters attach the most specific kind they can determine from the
/// backend's status signal, preserving the backend's own message text for
/// display. Callers match on the variant, never on message contents.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Rate limited: {0}")]
    RateLimit(String),

    #[error("Connection failed: {0}")]
    Connectivity(String),

    #[error("Provider error: {0}")]
    Api(String),

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),
}

impl ProviderError {
    /// Classify a transport-level failure (DNS, refused connection, timeout).
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            ProviderError::Connectivity(err.to_string())
        } else {
            ProviderError::Api(err.to_string())
        }
    }

    /// Classify a non-success HTTP status together with the response body.
    pub fn from_status(status: reqwest::StatusCode, body: String) -> Self {
        match status.as_u16() {
            401 | 403 => ProviderError::Auth(body),
            429 => ProviderError::RateLimit(body),
            _ => ProviderError::Api(format!("{}: {}", status, body)),
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, ProviderError::Auth(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(matches!(
            ProviderError::from_status(reqwest::StatusCode::UNAUTHORIZED, "bad key".into()),
            ProviderError::Auth(_)
        ));
        assert!(matches!(
            ProviderError::from_status(reqwest::StatusCode::FORBIDDEN, "no access".into()),
            ProviderError::Auth(_)
        ));
        assert!(matches!(
            ProviderError::from_status(reqwest::StatusCode::TOO_MANY_REQUESTS, "slow down".into()),
            ProviderError::RateLimit(_)
        ));
        assert!(matches!(
            ProviderError::from_status(reqwest::StatusCode::INTERNAL_SERVER_ERROR, "boom".into()),
            ProviderError::Api(_)
        ));
    }

    #[test]
    fn test_message_is_preserved() {
        let err = ProviderError::from_status(
            reqwest::StatusCode::TOO_MANY_REQUESTS,
            "quota exceeded, retry later".into(),
        );
        assert!(err.to_string().contains("quota exceeded, retry later"));
    }
}

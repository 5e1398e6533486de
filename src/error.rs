use thiserror::Error;

/// Main error type for storsmoke operations
#[derive(Debug, Error)]
pub enum StorsmokeError {
    #[error("please set/export the following environment variables: {}", .0.join(", "))]
    MissingEnvironment(Vec<String>),

    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    #[error("Azure API error: {0}")]
    ArmApiError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Endpoint discovery failed: {0}")]
    DiscoveryError(String),

    #[error("Step '{step}' failed: {source}")]
    StepFailed {
        step: String,
        #[source]
        source: Box<StorsmokeError>,
    },

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Connection to '{0}' timed out")]
    ConnectionTimeout(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Operation timeout")]
    Timeout,
}

impl StorsmokeError {
    pub fn authentication<S: Into<String>>(msg: S) -> Self {
        Self::AuthenticationError(msg.into())
    }

    pub fn arm_api<S: Into<String>>(msg: S) -> Self {
        Self::ArmApiError(msg.into())
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn discovery<S: Into<String>>(msg: S) -> Self {
        Self::DiscoveryError(msg.into())
    }

    pub fn network<S: Into<String>>(msg: S) -> Self {
        Self::NetworkError(msg.into())
    }

    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        Self::SerializationError(msg.into())
    }

    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn step_failed<S: Into<String>>(step: S, source: StorsmokeError) -> Self {
        Self::StepFailed {
            step: step.into(),
            source: Box::new(source),
        }
    }
}

/// Result type alias for storsmoke operations
pub type Result<T> = std::result::Result<T, StorsmokeError>;

/// Convert Azure Core errors to StorsmokeError
impl From<azure_core::Error> for StorsmokeError {
    fn from(error: azure_core::Error) -> Self {
        Self::ArmApiError(error.to_string())
    }
}

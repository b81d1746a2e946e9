use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutreachError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned status {status}: {body}")]
    ApiStatusError { status: u16, body: String },

    #[error("Unexpected API response: {message}")]
    ResponseFormatError { message: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Input file '{path}' could not be read: {source}")]
    InputFileError {
        path: String,
        source: std::io::Error,
    },

    #[error("No usable API credentials found (tried: {})", .tried.join(", "))]
    MissingCredentialsError { tried: Vec<String> },

    #[error("Credential source '{provider}' could not be loaded: {message}")]
    CredentialSourceError { provider: String, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Api,
    Input,
    Output,
    Configuration,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl OutreachError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            OutreachError::ApiError(_) => ErrorCategory::Network,
            OutreachError::ApiStatusError { .. } | OutreachError::ResponseFormatError { .. } => {
                ErrorCategory::Api
            }
            OutreachError::CsvError(_) | OutreachError::InputFileError { .. } => {
                ErrorCategory::Input
            }
            OutreachError::IoError(_) | OutreachError::SerializationError(_) => {
                ErrorCategory::Output
            }
            OutreachError::MissingCredentialsError { .. }
            | OutreachError::CredentialSourceError { .. }
            | OutreachError::ConfigError { .. }
            | OutreachError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            OutreachError::ProcessingError { .. } => ErrorCategory::Processing,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network | ErrorCategory::Api => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Configuration | ErrorCategory::Processing => {
                ErrorSeverity::High
            }
            ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            OutreachError::ApiError(_) => {
                "Check network connectivity and the --api-base-url value, then run again"
            }
            OutreachError::ApiStatusError { status, .. } if *status == 401 || *status == 403 => {
                "The language-model API rejected the key; check CLAUDE_API_KEY"
            }
            OutreachError::ApiStatusError { status, .. } if *status == 429 => {
                "The API is rate limiting requests; wait a moment and run again"
            }
            OutreachError::ApiStatusError { .. } | OutreachError::ResponseFormatError { .. } => {
                "Check the model name and API availability"
            }
            OutreachError::CsvError(_) | OutreachError::InputFileError { .. } => {
                "Make sure the input file exists and is tab-separated UTF-8 text"
            }
            OutreachError::IoError(_) | OutreachError::SerializationError(_) => {
                "Check that the results directory is writable and the disk is not full"
            }
            OutreachError::MissingCredentialsError { .. }
            | OutreachError::CredentialSourceError { .. } => {
                "Provide CLAUDE_API_KEY and PERPLEXITY_API_KEY via config.toml, api_keys.json or environment variables"
            }
            OutreachError::ConfigError { .. } | OutreachError::InvalidConfigValueError { .. } => {
                "Run with --help to see the accepted options"
            }
            OutreachError::ProcessingError { .. } => "Re-run with --verbose to see the failing step",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not reach the language-model service: {}", self),
            ErrorCategory::Api => format!("The language-model service returned an error: {}", self),
            ErrorCategory::Input => format!("The input could not be read: {}", self),
            ErrorCategory::Output => format!("Results could not be written: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Processing => format!("Processing failed: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, OutreachError>;

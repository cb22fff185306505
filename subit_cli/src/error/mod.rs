use colored::*;
use std::error::Error as StdError;
use std::fmt;
use subit_client_core::Error as CoreError;
use subit_client_core::NotFoundReason;

/// CLI-specific error type with semantic exit codes
#[derive(Debug)]
pub struct CliError {
    /// The main error message
    message: String,

    /// Error category for exit code determination
    category: ErrorCategory,

    /// Additional context information
    context: Vec<(String, String)>,

    /// Suggestions for recovery
    pub suggestions: Vec<String>,

    /// Source error if any
    source: Option<Box<dyn StdError + Send + Sync>>,
}

/// Error categories that map to exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorCategory {
    Usage,
    NotFound,
    Service,
    Internal,
}

/// Semantic exit codes for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    Usage = 1,
    NotFound = 2,
    Internal = 3,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code as u8)
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Extension trait for adding context to errors
pub trait ErrorContext {
    fn with_context(self, key: &str, value: &str) -> Self;
    fn with_suggestion(self, suggestion: &str) -> Self;
    fn with_source(self, source: Box<dyn StdError + Send + Sync>) -> Self;
}

impl CliError {
    fn new(message: &str, category: ErrorCategory) -> Self {
        Self {
            message: message.to_string(),
            category,
            context: Vec::new(),
            suggestions: Vec::new(),
            source: None,
        }
    }

    /// Create a usage error
    pub fn usage(message: &str) -> Self {
        let mut error = Self::new(message, ErrorCategory::Usage);
        error
            .suggestions
            .push("Run 'subit --help' for usage information".to_string());
        error
    }

    /// Create a "nothing found" outcome
    pub fn not_found(reason: NotFoundReason) -> Self {
        Self::new(
            &format!("No subtitles found: {reason}"),
            ErrorCategory::NotFound,
        )
    }

    /// Create an error for a failure of the subtitle service
    pub fn service(message: &str, guidance: &[&str]) -> Self {
        let mut error = Self::new(message, ErrorCategory::Service);
        error.suggestions = guidance.iter().map(|g| g.to_string()).collect();
        error
    }

    /// Create an internal error
    pub fn internal(message: &str) -> Self {
        Self::new(message, ErrorCategory::Internal)
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self.category {
            ErrorCategory::Usage => ExitCode::Usage,
            ErrorCategory::NotFound => ExitCode::NotFound,
            ErrorCategory::Service | ErrorCategory::Internal => ExitCode::Internal,
        }
    }

    /// Format the error for user display
    pub fn format_for_user(&self, debug: bool) -> String {
        let mut output = String::new();

        // Main error message
        let prefix = match self.category {
            ErrorCategory::Usage => "Usage Error".yellow(),
            ErrorCategory::NotFound => "Not Found".yellow(),
            ErrorCategory::Service => "Service Error".red(),
            ErrorCategory::Internal => "Error".red(),
        };

        output.push_str(&format!("{}: {}\n", prefix, self.message));

        // Context information
        if !self.context.is_empty() {
            output.push_str("\nContext:\n");
            for (key, value) in &self.context {
                output.push_str(&format!("  {}: {}\n", key.bold(), value));
            }
        }

        // Error chain in debug mode
        if debug {
            if let Some(source) = &self.source {
                output.push_str("\nCaused by:\n");
                let mut current: Option<&dyn StdError> = Some(source.as_ref());
                let mut level = 1;

                while let Some(err) = current {
                    output.push_str(&format!("  {level}: {err}\n"));
                    current = err.source();
                    level += 1;
                }
            }
        }

        // Suggestions
        if !self.suggestions.is_empty() {
            output.push_str("\nSuggestions:\n");
            for suggestion in &self.suggestions {
                output.push_str(&format!("  - {suggestion}\n"));
            }
        }

        output
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}",
            match self.category {
                ErrorCategory::Usage => "Usage Error",
                ErrorCategory::NotFound => "Not Found",
                ErrorCategory::Service => "Service Error",
                ErrorCategory::Internal => "Error",
            },
            self.message
        )?;

        // Include context in display
        for (key, value) in &self.context {
            write!(f, " ({key}: {value})")?;
        }

        Ok(())
    }
}

impl StdError for CliError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl ErrorContext for CliError {
    fn with_context(mut self, key: &str, value: &str) -> Self {
        self.context.push((key.to_string(), value.to_string()));
        self
    }

    fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.suggestions.push(suggestion.to_string());
        self
    }

    fn with_source(mut self, source: Box<dyn StdError + Send + Sync>) -> Self {
        self.source = Some(source);
        self
    }
}

/// Map library errors to user-facing errors
impl From<CoreError> for CliError {
    fn from(error: CoreError) -> Self {
        let message = error.to_string();
        let cli_error = match &error {
            CoreError::Service(service) => Self::service(&message, service.guidance()),
            CoreError::Io(io) => {
                let mut e = Self::internal(&message);
                if let Some(path) = &io.path {
                    e = e.with_context("path", &path.display().to_string());
                }
                e
            }
            CoreError::Retrieval(_) | CoreError::Validation(_) | CoreError::Internal(_) => {
                Self::internal(&message)
            }
        };
        cli_error.with_source(Box::new(error))
    }
}

/// Convert anyhow errors to CLI errors
impl From<anyhow::Error> for CliError {
    fn from(error: anyhow::Error) -> Self {
        Self::internal(&format!("{error:#}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use subit_client_core::error::{RetrievalError, ServiceError};

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::usage("bad").exit_code(), ExitCode::Usage);
        assert_eq!(
            CliError::not_found(NotFoundReason::NoResults).exit_code(),
            ExitCode::NotFound
        );
        assert_eq!(CliError::internal("boom").exit_code(), ExitCode::Internal);
        assert_eq!(ExitCode::Internal as i32, 3);
    }

    #[test]
    fn test_refused_login_keeps_status_and_guidance() {
        let error = CliError::from(CoreError::from(ServiceError::login_refused(
            "503 Service Unavailable",
        )));

        assert_eq!(error.exit_code(), ExitCode::Internal);
        let text = error.format_for_user(false);
        assert!(text.contains("503 Service Unavailable"));
        assert!(text.contains("200 subtitles per 24h"));
    }

    #[test]
    fn test_retrieval_error_is_internal() {
        let error = CliError::from(CoreError::from(RetrievalError::http_status(
            "http://dl/x.zip",
            404,
        )));
        assert_eq!(error.exit_code(), ExitCode::Internal);
        assert!(error.suggestions.is_empty());
    }

    #[test]
    fn test_debug_output_includes_cause_chain() {
        let error = CliError::internal("lookup failed")
            .with_source(Box::new(std::io::Error::other("disk on fire")));
        assert!(error.format_for_user(true).contains("disk on fire"));
        assert!(!error.format_for_user(false).contains("disk on fire"));
    }
}

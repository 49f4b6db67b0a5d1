use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Field or settings key that caused the error (e.g., "settings.backend_url", "request.text")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., the offending value)
    pub details: Option<String>,
    /// Source of the error (e.g., "voices", "tts", "settings_store")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for the client.
///
/// Every failure the controller can observe lands in one of these buckets;
/// none of them is fatal, the controller turns each into an alert plus a
/// status update and returns to idle.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Validation error: {message}{}", format_context(.context))]
    Validation {
        message: String,
        context: ErrorContext,
    },

    #[error("Network transport error: {message}{}", format_context(.context))]
    Transport {
        message: String,
        context: ErrorContext,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// Non-2xx answer from the backend. `body` is the raw response text.
    #[error("Request failed: {status} {status_text} - {body}")]
    Remote {
        status: u16,
        status_text: String,
        body: String,
    },

    #[error("Settings storage error: {message}{}", format_context(.context))]
    Storage {
        message: String,
        context: ErrorContext,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::configuration_with_context(msg, ErrorContext::new())
    }

    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    pub fn validation_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Validation {
            message: msg.into(),
            context,
        }
    }

    /// Wrap a reqwest failure (connect refused, DNS, body read) with context.
    pub fn transport(err: reqwest::Error, context: ErrorContext) -> Self {
        Error::Transport {
            message: err.to_string(),
            context,
            source: Some(err),
        }
    }

    pub fn storage_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Storage {
            message: msg.into(),
            context,
        }
    }

    /// HTTP status of a backend rejection, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. }
            | Error::Validation { context, .. }
            | Error::Transport { context, .. }
            | Error::Storage { context, .. } => Some(context),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_message_carries_status_and_body() {
        let err = Error::Remote {
            status: 500,
            status_text: "Internal Server Error".into(),
            body: "rate limited".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("Internal Server Error"));
        assert!(msg.contains("rate limited"));
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn context_is_rendered_in_display() {
        let err = Error::validation_with_context(
            "Please enter some text",
            ErrorContext::new().with_field_path("request.text"),
        );
        assert_eq!(
            err.to_string(),
            "Validation error: Please enter some text (field: request.text)"
        );
        assert_eq!(
            err.context().and_then(|c| c.field_path.as_deref()),
            Some("request.text")
        );
    }
}

//! Answer types for the question-answering layer
//!
//! Defines the final answer handed to callers, where it came from, and the
//! errors a remote answerer can report.

use crate::answer::{NO_MEMORIES, UNKNOWN};

/// Why a question was answered locally instead of by the remote model
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// Remote answering is switched off in configuration
    RemoteDisabled,
    /// No API key is configured for the remote model
    NoCredential,
    /// The remote call was made and failed
    RemoteFailed(String),
}

/// Where an answer came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerSource {
    /// The remote model answered
    Remote,
    /// The local engine answered
    Local(FallbackReason),
}

impl AnswerSource {
    /// Short label used in API responses and CLI output
    pub fn label(&self) -> &'static str {
        match self {
            AnswerSource::Remote => "remote",
            AnswerSource::Local(_) => "local",
        }
    }
}

/// An answer to a user's question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub text: String,
    pub source: AnswerSource,
}

impl Answer {
    pub fn remote(text: String) -> Self {
        Self {
            text,
            source: AnswerSource::Remote,
        }
    }

    pub fn local(text: String, reason: FallbackReason) -> Self {
        Self {
            text,
            source: AnswerSource::Local(reason),
        }
    }

    /// User-facing explanation of a fallback, if one is worth showing
    pub fn notice(&self) -> Option<String> {
        match &self.source {
            AnswerSource::Remote | AnswerSource::Local(FallbackReason::RemoteDisabled) => None,
            AnswerSource::Local(FallbackReason::NoCredential) => {
                Some("No remote API key found; answered locally.".to_string())
            }
            AnswerSource::Local(FallbackReason::RemoteFailed(message)) => Some(format!(
                "Remote answer failed ({message}); answered locally."
            )),
        }
    }

    /// Whether the local engine found nothing to say
    pub fn is_unknown(&self) -> bool {
        matches!(self.source, AnswerSource::Local(_)) && self.text == UNKNOWN
    }

    /// Whether the local engine had no memories to work with
    pub fn is_empty_store(&self) -> bool {
        matches!(self.source, AnswerSource::Local(_)) && self.text == NO_MEMORIES
    }
}

/// Remote answerer errors
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    #[error("API key env var '{0}' not set")]
    MissingCredential(String),
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

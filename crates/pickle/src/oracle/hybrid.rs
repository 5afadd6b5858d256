//! Hybrid answerer with local fallback
//!
//! Asks the remote model first when one is configured. If no credential is
//! present, or the remote call fails, the question goes to the local answer
//! engine with the same memories. Never returns an error.

use tracing::{debug, warn};

use crate::answer::LocalAnswerEngine;
use crate::config::Config;
use crate::memory::types::{Memory, MemoryRecord};
use crate::oracle::types::{Answer, FallbackReason, OracleError};
use crate::oracle::{AnswerProvider, RemoteAnswerer};

/// Remote-first answerer that falls back to the local engine
pub struct HybridAnswerer {
    remote: Option<Box<dyn AnswerProvider>>,
    /// Reported when `remote` is `None`
    unavailable: FallbackReason,
    local: LocalAnswerEngine,
}

impl HybridAnswerer {
    /// Build from configuration, constructing the remote answerer when it is
    /// enabled and its API key is set.
    pub fn from_config(config: &Config) -> Self {
        let local = LocalAnswerEngine::new(&config.answer);

        if !config.remote.enabled {
            debug!("Remote answering disabled in config");
            return Self::local_only(local);
        }

        match RemoteAnswerer::new(&config.remote) {
            Ok(remote) => Self::with_remote(Box::new(remote), local),
            Err(OracleError::MissingCredential(var)) => {
                debug!("No API key in {}, answering locally", var);
                Self {
                    remote: None,
                    unavailable: FallbackReason::NoCredential,
                    local,
                }
            }
            Err(e) => {
                warn!("Remote answerer could not be created: {}", e);
                Self {
                    remote: None,
                    unavailable: FallbackReason::RemoteFailed(e.to_string()),
                    local,
                }
            }
        }
    }

    /// Create with a remote provider
    pub fn with_remote(remote: Box<dyn AnswerProvider>, local: LocalAnswerEngine) -> Self {
        Self {
            remote: Some(remote),
            unavailable: FallbackReason::RemoteDisabled,
            local,
        }
    }

    /// Create with only the local engine
    pub fn local_only(local: LocalAnswerEngine) -> Self {
        Self {
            remote: None,
            unavailable: FallbackReason::RemoteDisabled,
            local,
        }
    }

    /// Whether a remote provider is configured
    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// Answer `question` from `memories`.
    pub async fn ask(&self, question: &str, memories: &[Memory]) -> Answer {
        let Some(ref remote) = self.remote else {
            return self.answer_locally(question, memories, self.unavailable.clone());
        };

        if !remote.is_available().await {
            debug!("{} answerer unavailable, answering locally", remote.name());
            return self.answer_locally(question, memories, FallbackReason::NoCredential);
        }

        match remote.answer(question, memories).await {
            Ok(text) => {
                debug!("{} answerer succeeded", remote.name());
                Answer::remote(text)
            }
            Err(e) => {
                warn!("{} answerer failed: {}, answering locally", remote.name(), e);
                self.answer_locally(question, memories, FallbackReason::RemoteFailed(e.to_string()))
            }
        }
    }

    /// Answer with the local engine only
    pub fn answer_locally(
        &self,
        question: &str,
        memories: &[Memory],
        reason: FallbackReason,
    ) -> Answer {
        let records: Vec<MemoryRecord> = memories.iter().map(MemoryRecord::from).collect();
        Answer::local(self.local.answer(question, &records), reason)
    }
}

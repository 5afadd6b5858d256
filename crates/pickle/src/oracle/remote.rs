//! Remote answer provider using OpenAI-compatible APIs
//!
//! Sends the question plus the user's memories as evidence to a chat
//! completions endpoint (Groq by default) and returns the model's reply.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::RemoteConfig;
use crate::memory::types::Memory;
use crate::oracle::AnswerProvider;
use crate::oracle::prompts::{SYSTEM_PROMPT, question_prompt};
use crate::oracle::types::OracleError;

const MAX_ATTEMPTS: u32 = 3;

/// Remote answerer using OpenAI-compatible HTTP APIs
#[derive(Debug)]
pub struct RemoteAnswerer {
    client: Client,
    config: RemoteConfig,
    endpoint: Url,
    api_key: String,
}

/// OpenAI-compatible chat completion request
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
    max_tokens: u32,
}

/// Message in the chat completion request
#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

/// OpenAI-compatible chat completion response
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

impl RemoteAnswerer {
    /// Create a remote answerer from configuration.
    ///
    /// Reads the API key from the environment variable named in
    /// `config.api_key_env`; an unset or blank key is `MissingCredential`.
    pub fn new(config: &RemoteConfig) -> Result<Self, OracleError> {
        let api_key = env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| OracleError::MissingCredential(config.api_key_env.clone()))?;

        let endpoint = format!("{}/chat/completions", config.api_url.trim_end_matches('/'));
        let endpoint = Url::parse(&endpoint).map_err(|e| {
            OracleError::ConfigError(format!("Invalid api_url '{}': {e}", config.api_url))
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| OracleError::ApiError(e.to_string()))?;

        info!(
            "RemoteAnswerer initialized with model: {}, api_url: {}",
            config.model, config.api_url
        );

        Ok(Self {
            client,
            config: config.clone(),
            endpoint,
            api_key,
        })
    }

    /// Call the chat completions API, retrying rate limits and transport
    /// errors with exponential backoff (1s, 2s).
    async fn call_api(&self, request: &ChatCompletionRequest) -> Result<String, OracleError> {
        debug!("Calling remote API at: {}", self.endpoint);

        let mut last_error = None;
        let mut delay = Duration::from_secs(1);

        for attempt in 1..=MAX_ATTEMPTS {
            match self
                .client
                .post(self.endpoint.clone())
                .bearer_auth(&self.api_key)
                .json(request)
                .send()
                .await
            {
                Ok(response) => {
                    let status = response.status();

                    if status.as_u16() == 429 {
                        last_error = Some(format!("rate limited ({status})"));
                        if attempt < MAX_ATTEMPTS {
                            warn!(
                                "Rate limited on attempt {}/{}, waiting {:?}",
                                attempt, MAX_ATTEMPTS, delay
                            );
                            tokio::time::sleep(delay).await;
                            delay *= 2;
                        }
                        continue;
                    }

                    if !status.is_success() {
                        let error_text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        return Err(OracleError::ApiError(format!(
                            "API returned {status}: {error_text}"
                        )));
                    }

                    let completion: ChatCompletionResponse = response
                        .json()
                        .await
                        .map_err(|e| OracleError::ParseError(e.to_string()))?;

                    return completion
                        .choices
                        .into_iter()
                        .next()
                        .map(|c| c.message.content.trim().to_string())
                        .ok_or_else(|| OracleError::ApiError("Empty response".to_string()));
                }
                Err(e) => {
                    let err_msg = e.to_string();
                    last_error = Some(err_msg.clone());
                    if attempt < MAX_ATTEMPTS {
                        warn!(
                            "Request failed on attempt {}/{}, retrying: {}",
                            attempt, MAX_ATTEMPTS, err_msg
                        );
                        tokio::time::sleep(delay).await;
                        delay *= 2;
                    }
                }
            }
        }

        Err(OracleError::ApiError(format!(
            "Failed after {} attempts: {}",
            MAX_ATTEMPTS,
            last_error.unwrap_or_else(|| "Unknown error".to_string())
        )))
    }
}

#[async_trait]
impl AnswerProvider for RemoteAnswerer {
    async fn answer(&self, question: &str, memories: &[Memory]) -> Result<String, OracleError> {
        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                Message {
                    role: "user".to_string(),
                    content: question_prompt(question, memories),
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let answer = self.call_api(&request).await?;
        debug!("Remote answer: {}", answer);
        Ok(answer)
    }

    async fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}

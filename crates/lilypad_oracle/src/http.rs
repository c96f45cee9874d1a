//! Oracle backed by the word-ladder HTTP service.

use crate::config::OracleConfig;
use crate::wire::{
    EditDistanceRequest, FindPathRequest, FindPathResponse, GeneratedWords, ValidateWordRequest,
    ValidityResponse,
};
use async_trait::async_trait;
use lilypad_core::{
    EditDistanceOracle, GuessPath, OracleError, PathOracle, PuzzleGenerator, PuzzleSpec, Word,
    WordOracle,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// HTTP client for the oracle service.
///
/// Connectivity failures and timeouts are retried with linear backoff;
/// error statuses and unreadable bodies fail at once.
#[derive(Debug, Clone)]
pub struct HttpOracle {
    base_url: String,
    client: reqwest::Client,
    max_retries: u32,
    retry_backoff: Duration,
}

impl HttpOracle {
    /// Builds a client from configuration.
    #[instrument(skip(config), fields(base_url = %config.base_url()))]
    pub fn new(config: &OracleConfig) -> Result<Self, OracleError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| OracleError::connectivity(format!("Failed to build HTTP client: {}", e)))?;

        info!("HTTP oracle ready");
        Ok(Self {
            base_url: config.base_url().trim_end_matches('/').to_string(),
            client,
            max_retries: *config.max_retries(),
            retry_backoff: config.retry_backoff(),
        })
    }

    /// Base URL requests are sent under.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    async fn post<B, R>(&self, endpoint: &str, body: &B) -> Result<R, OracleError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = self.url(endpoint);
        self.send_with_retry(endpoint, || self.client.post(&url).json(body))
            .await
    }

    async fn get<R: DeserializeOwned>(&self, endpoint: &str) -> Result<R, OracleError> {
        let url = self.url(endpoint);
        self.send_with_retry(endpoint, || self.client.get(&url)).await
    }

    async fn send_with_retry<R, F>(&self, endpoint: &str, build: F) -> Result<R, OracleError>
    where
        R: DeserializeOwned,
        F: Fn() -> reqwest::RequestBuilder,
    {
        let mut attempt = 0;
        loop {
            match self.send_once(endpoint, build()).await {
                Ok(body) => return Ok(body),
                Err(e) if e.kind.is_transient() && attempt < self.max_retries => {
                    attempt += 1;
                    let wait = self.retry_backoff * attempt;
                    warn!(
                        endpoint,
                        attempt,
                        wait_ms = wait.as_millis() as u64,
                        "Retrying oracle call"
                    );
                    tokio::time::sleep(wait).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn send_once<R: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<R, OracleError> {
        let response = request.send().await.map_err(|e| transport_error(endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(OracleError::status(format!("{} returned {}", endpoint, status)));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| transport_error(endpoint, e))?;
        serde_json::from_slice(&bytes).map_err(|e| {
            OracleError::malformed(format!("{} returned an unreadable body: {}", endpoint, e))
        })
    }
}

fn transport_error(endpoint: &str, e: reqwest::Error) -> OracleError {
    if e.is_timeout() {
        OracleError::timeout(format!("{} timed out: {}", endpoint, e))
    } else {
        OracleError::connectivity(format!("{} unreachable: {}", endpoint, e))
    }
}

fn parse_word(endpoint: &str, raw: &str) -> Result<Word, OracleError> {
    Word::parse(raw)
        .ok_or_else(|| OracleError::malformed(format!("{} returned a blank word", endpoint)))
}

#[async_trait]
impl WordOracle for HttpOracle {
    #[instrument(skip_all, fields(word = %word))]
    async fn is_valid_word(&self, word: &Word) -> Result<bool, OracleError> {
        let body = ValidateWordRequest {
            word: word.to_string(),
        };
        let answer: ValidityResponse = self.post("validate-word", &body).await?;
        debug!(valid = answer.valid, "Word validated");
        Ok(answer.valid)
    }
}

#[async_trait]
impl EditDistanceOracle for HttpOracle {
    #[instrument(skip_all, fields(from = %from, to = %to))]
    async fn is_one_edit_apart(&self, from: &Word, to: &Word) -> Result<bool, OracleError> {
        let body = EditDistanceRequest {
            word1: from.to_string(),
            word2: to.to_string(),
        };
        let answer: ValidityResponse = self.post("check-edit-distance", &body).await?;
        debug!(valid = answer.valid, "Edit distance checked");
        Ok(answer.valid)
    }
}

#[async_trait]
impl PathOracle for HttpOracle {
    #[instrument(skip_all, fields(start = %start, end = %end))]
    async fn shortest_path(
        &self,
        start: &Word,
        end: &Word,
    ) -> Result<Option<GuessPath>, OracleError> {
        let body = FindPathRequest {
            start: start.to_string(),
            end: end.to_string(),
        };
        let answer: FindPathResponse = self.post("find-path", &body).await?;

        let Some(raw) = answer.path else {
            debug!("No path");
            return Ok(None);
        };

        let words = raw
            .iter()
            .map(|w| parse_word("find-path", w))
            .collect::<Result<Vec<_>, _>>()?;
        let path = GuessPath::from_words(words)
            .ok_or_else(|| OracleError::malformed("find-path returned an empty path"))?;

        debug!(steps = path.steps(), "Path found");
        Ok(Some(path))
    }
}

#[async_trait]
impl PuzzleGenerator for HttpOracle {
    #[instrument(skip(self))]
    async fn new_puzzle(&self) -> Result<PuzzleSpec, OracleError> {
        let answer: GeneratedWords = self.get("generate-words").await?;
        let spec = PuzzleSpec::new(
            parse_word("generate-words", &answer.start_word)?,
            parse_word("generate-words", &answer.end_word)?,
        );
        debug!(puzzle = %spec, "Puzzle generated");
        Ok(spec)
    }
}

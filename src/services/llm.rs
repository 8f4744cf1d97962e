use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::models::{LlmJudgment, ProfileInfo, UserPreferences};
use crate::services::endpoint_cache::EndpointCache;

/// Default generation endpoint (local Ollama)
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Well-known local endpoints probed in order when nothing else responds
pub const CANDIDATE_ENDPOINTS: &[&str] = &[
    "http://127.0.0.1:11434",
    "http://localhost:1234",
    "http://localhost:8080",
];

/// Environment override for the generation endpoint
pub const ENDPOINT_ENV_VAR: &str = "SWIPE_LLM_ENDPOINT";

/// Errors that can occur when talking to the LLM endpoint
///
/// These never escape `judge`; they are folded into a neutral judgment so
/// a dead LLM service degrades to "no signal" instead of aborting the
/// decision pass.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("no reachable LLM endpoint")]
    NoEndpoint,

    #[error("empty response from {0}")]
    EmptyResponse(String),

    #[error("invalid response format: {0}")]
    InvalidResponse(String),
}

/// Generation tunables, loaded from settings
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub probe_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "llama3".to_string(),
            temperature: 0.3,
            max_tokens: 200,
            probe_timeout: Duration::from_secs(2),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    generated_text: Option<String>,
}

/// LLM compatibility judge
///
/// Resolves a generation endpoint (cached, env, preferences, default,
/// then well-known local candidates), prompts the model for a 0.0-1.0
/// compatibility score plus rationale, and parses the reply defensively.
pub struct LlmJudge {
    client: Client,
    config: LlmConfig,
    cache: EndpointCache,
    labeled_score: Regex,
    bare_score: Regex,
}

impl LlmJudge {
    pub fn new(config: LlmConfig, cache: EndpointCache) -> Self {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            config,
            cache,
            labeled_score: Regex::new(r"(?i)(?:score|compatibility)\s*[:=]?\s*(0?\.\d+|0|1(?:\.0+)?)")
                .expect("invalid labeled score pattern"),
            bare_score: Regex::new(r"\b(0?\.\d+|0|1(?:\.0+)?)\b")
                .expect("invalid bare score pattern"),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(LlmConfig::default(), EndpointCache::in_memory())
    }

    /// Judge a profile's compatibility with the user's preferences
    ///
    /// Infallible at the signature: network failures, empty replies and
    /// unparseable scores all collapse into the neutral judgment.
    pub async fn judge(&mut self, profile: &ProfileInfo, prefs: &UserPreferences) -> LlmJudgment {
        let endpoint = match self.resolve_endpoint(prefs).await {
            Ok(endpoint) => endpoint,
            Err(e) => {
                tracing::warn!(error = %e, "LLM endpoint resolution failed, degrading to neutral");
                return LlmJudgment::neutral(e.to_string());
            }
        };

        let prompt = build_prompt(profile, prefs);

        match self.generate(&endpoint, &prompt).await {
            Ok(text) => {
                self.cache.store(&endpoint);
                self.judgment_from_text(&text, prefs)
            }
            Err(e) => {
                tracing::warn!(error = %e, endpoint, "LLM call failed, degrading to neutral");
                self.cache.invalidate();
                LlmJudgment::neutral(e.to_string())
            }
        }
    }

    /// Resolve the generation endpoint by priority, probing each candidate
    /// with a short-timeout GET to the model-listing path.
    async fn resolve_endpoint(&mut self, prefs: &UserPreferences) -> Result<String, LlmError> {
        let mut candidates: Vec<String> = Vec::new();

        if let Some(cached) = self.cache.get() {
            candidates.push(cached.to_string());
        }
        if let Ok(env_endpoint) = std::env::var(ENDPOINT_ENV_VAR) {
            if !env_endpoint.trim().is_empty() {
                candidates.push(env_endpoint);
            }
        }
        if let Some(pref_endpoint) = &prefs.llm.endpoint {
            candidates.push(pref_endpoint.clone());
        }
        candidates.push(DEFAULT_ENDPOINT.to_string());
        candidates.extend(CANDIDATE_ENDPOINTS.iter().map(|e| e.to_string()));

        let mut seen: Vec<String> = Vec::new();
        candidates.retain(|c| {
            if seen.contains(c) {
                false
            } else {
                seen.push(c.clone());
                true
            }
        });

        for candidate in candidates {
            if self.probe(&candidate).await {
                tracing::debug!(endpoint = %candidate, "LLM endpoint reachable");
                return Ok(candidate);
            }
        }

        Err(LlmError::NoEndpoint)
    }

    /// Lightweight connectivity check against the tags/models path.
    async fn probe(&self, endpoint: &str) -> bool {
        let url = format!("{}/api/tags", endpoint.trim_end_matches('/'));

        match self
            .client
            .get(&url)
            .timeout(self.config.probe_timeout)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    /// POST the prompt to the generation path and extract the reply text.
    async fn generate(&self, endpoint: &str, prompt: &str) -> Result<String, LlmError> {
        let url = format!("{}/api/generate", endpoint.trim_end_matches('/'));

        let body = GenerateRequest {
            model: &self.config.model,
            prompt,
            stream: false,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let response = self.client.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            return Err(LlmError::InvalidResponse(format!(
                "generation returned {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;
        let parsed: GenerateResponse = serde_json::from_value(json)
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        let text = parsed
            .response
            .or(parsed.generated_text)
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(LlmError::EmptyResponse(endpoint.to_string()));
        }

        Ok(text)
    }

    /// Turn raw model output into a judgment. An unextractable score is a
    /// low-confidence 0.5, not an error.
    fn judgment_from_text(&self, text: &str, prefs: &UserPreferences) -> LlmJudgment {
        let score = match self.extract_score(text) {
            Some(score) => score,
            None => {
                tracing::warn!("no score found in LLM response, defaulting to 0.5 (low confidence)");
                0.5
            }
        };

        LlmJudgment {
            score,
            rationale: text.trim().to_string(),
            is_compatible: score >= prefs.llm.min_comparison_score,
            error: None,
        }
    }

    /// First labeled score wins, then the first bare in-range decimal.
    fn extract_score(&self, text: &str) -> Option<f64> {
        let capture = self
            .labeled_score
            .captures(text)
            .or_else(|| self.bare_score.captures(text))?;

        let score: f64 = capture.get(1)?.as_str().parse().ok()?;
        if (0.0..=1.0).contains(&score) {
            Some(score.clamp(0.0, 1.0))
        } else {
            None
        }
    }
}

/// Natural-language prompt embedding the user's preferences and the
/// profile's scraped text.
fn build_prompt(profile: &ProfileInfo, prefs: &UserPreferences) -> String {
    let mut prompt = String::from(
        "You are evaluating dating-app compatibility. \
         Rate how compatible this profile is with the user's preferences.\n\n",
    );

    prompt.push_str(&format!("User interests: {}\n", prefs.interests.join(", ")));
    if !prefs.avoid_keywords.is_empty() {
        prompt.push_str(&format!(
            "User wants to avoid: {}\n",
            prefs.avoid_keywords.join(", ")
        ));
    }

    prompt.push_str(&format!("\nProfile name: {}\n", profile.name));
    if let Some(age) = profile.age {
        prompt.push_str(&format!("Profile age: {}\n", age));
    }
    if !profile.bio.trim().is_empty() {
        prompt.push_str(&format!("Profile bio: {}\n", profile.bio));
    }
    if !profile.attributes.is_empty() {
        prompt.push_str(&format!(
            "Profile attributes: {}\n",
            profile.attributes.join(", ")
        ));
    }

    prompt.push_str(
        "\nReply with a compatibility score between 0.0 and 1.0 on the first line \
         (for example \"Score: 0.7\"), followed by a brief rationale.",
    );

    prompt
}

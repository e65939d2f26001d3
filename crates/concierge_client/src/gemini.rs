//! Gemini-backed concierge implementation.

use async_trait::async_trait;
use booking_core::ServiceItem;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::provider::{
    ConciergeProvider, FALLBACK_NO_API_KEY, FALLBACK_NO_MATCH, FALLBACK_UNAVAILABLE,
};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Internal failure reasons; absorbed before they reach the caller.
#[derive(Error, Debug)]
enum ConciergeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),
}

pub struct GeminiConcierge {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl GeminiConcierge {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: Some(api_key.into()),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Read the credential from `GEMINI_API_KEY`. An absent or empty
    /// variable yields a keyless concierge that always apologises.
    pub fn from_env() -> Self {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        match api_key {
            Some(key) => Self::new(key),
            None => Self::keyless(),
        }
    }

    /// Concierge without a credential; every query gets the no-key apology.
    pub fn keyless() -> Self {
        Self {
            client: Client::new(),
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn build_prompt(query: &str, services: &[ServiceItem]) -> String {
        let catalog_digest = services
            .iter()
            .map(|s| {
                format!(
                    "ID: {}, Name: {}, Category: {}, Price: ${}",
                    s.id, s.title, s.category_id, s.price
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "You are a high-end hotel concierge.\n\
             The guest asked: \"{}\".\n\n\
             Here are the available services:\n{}\n\n\
             Recommend 1-2 specific services from the list that best match their request.\n\
             Be brief, polite, and sound luxurious.\n\
             Format the output as a short conversational paragraph.",
            query, catalog_digest
        )
    }

    async fn try_recommend(
        &self,
        api_key: &str,
        query: &str,
        services: &[ServiceItem],
    ) -> Result<Option<String>, ConciergeError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let body = serde_json::json!({
            "contents": [{
                "parts": [{ "text": Self::build_prompt(query, services) }],
            }],
        });

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await?;
            return Err(ConciergeError::Api(format!("HTTP {}: {}", status, text)));
        }

        let completion: GenerateContentResponse = response.json().await?;
        Ok(completion.first_text())
    }
}

#[async_trait]
impl ConciergeProvider for GeminiConcierge {
    async fn recommend(&self, query: &str, services: &[ServiceItem]) -> String {
        let Some(api_key) = self.api_key.as_deref() else {
            return FALLBACK_NO_API_KEY.to_string();
        };

        match self.try_recommend(api_key, query, services).await {
            Ok(Some(text)) => text,
            Ok(None) => FALLBACK_NO_MATCH.to_string(),
            Err(err) => {
                warn!(error = %err, "concierge request failed, serving fallback");
                FALLBACK_UNAVAILABLE.to_string()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GenerateContentResponse {
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .filter(|text| !text.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use booking_core::PriceUnit;

    fn sample_services() -> Vec<ServiceItem> {
        vec![ServiceItem {
            id: "c4".to_string(),
            category_id: "chefs".to_string(),
            title: "Spanish flavor, tapas, and paella".to_string(),
            provider_name: "by Pedro".to_string(),
            price: 60.0,
            price_unit: PriceUnit::Guest,
            rating: 4.9,
            review_count: 42,
            image: "paella.jpg".to_string(),
            is_popular: false,
        }]
    }

    #[test]
    fn test_prompt_includes_query_and_catalog_digest() {
        let prompt = GeminiConcierge::build_prompt("a romantic dinner", &sample_services());
        assert!(prompt.contains("\"a romantic dinner\""));
        assert!(prompt.contains("ID: c4, Name: Spanish flavor, tapas, and paella"));
        assert!(prompt.contains("Price: $60"));
    }

    #[test]
    fn test_empty_completion_yields_none() {
        let response = GenerateContentResponse {
            candidates: vec![Candidate {
                content: CandidateContent {
                    parts: vec![CandidatePart {
                        text: "  ".to_string(),
                    }],
                },
            }],
        };
        assert!(response.first_text().is_none());
    }
}

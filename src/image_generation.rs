use std::time::Duration;

use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::utils::error_chain_fmt;

const DEFAULT_MIME_TYPE: &str = "image/png";

/// Client for the generative image API used to prepare carousel photos.
#[derive(Clone)]
pub struct ImageClient {
    base_url: String,
    http_client: reqwest::Client,
    api_key: Secret<String>,
    model: String,
    timeout: Duration,
}

#[derive(thiserror::Error)]
pub enum ImageGenerationError {
    #[error("request to the image API failed")]
    Http(#[from] reqwest::Error),
    #[error("the image API returned no candidates")]
    NoCandidates,
}

impl std::fmt::Debug for ImageGenerationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: [RequestContent<'a>; 1],
    generation_config: GenerationConfig<'a>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: [TextPart<'a>; 1],
}

#[derive(Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    image_config: ImageConfig<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageConfig<'a> {
    aspect_ratio: &'a str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    inline_data: Option<InlineData>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: Option<String>,
    data: String,
}

impl ImageClient {
    pub fn new(base_url: String, api_key: Secret<String>, model: String, timeout: Duration) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url,
            api_key,
            model,
            timeout,
        }
    }

    /// Generates images for `prompt` and returns them as `data:` URLs.
    /// Text parts of the answer are ignored.
    #[tracing::instrument(name = "Generating carousel image", skip(self, prompt))]
    pub async fn generate(
        &self,
        prompt: &str,
        aspect_ratio: &str,
    ) -> Result<Vec<String>, ImageGenerationError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let body = GenerateContentRequest {
            contents: [RequestContent {
                parts: [TextPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                image_config: ImageConfig { aspect_ratio },
            },
        };

        let response: GenerateContentResponse = self
            .http_client
            .post(url)
            .timeout(self.timeout)
            .json(&body)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or(ImageGenerationError::NoCandidates)?;

        let urls = candidate
            .content
            .map(|content| content.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|part| part.inline_data)
            .map(|inline| {
                let mime = inline.mime_type.as_deref().unwrap_or(DEFAULT_MIME_TYPE);
                format!("data:{mime};base64,{}", inline.data)
            })
            .collect();

        Ok(urls)
    }
}

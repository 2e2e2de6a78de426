use std::time::Duration;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use divicuenta_application::{ReceiptImage, ReceiptOcr, ReceiptOcrError};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

const EXTRACTION_PROMPT: &str = "
      You are an expert OCR system for Chilean restaurant receipts.
      The currency is Chilean Pesos (CLP). Prices are integers and do not use decimals.
      Any dots (.) in prices are thousand separators and should be ignored (e.g., '1.500' is 1500).
      Any commas (,) in prices are decimal separators and the numbers after them should be ignored.
      Analyze the provided image of a receipt. Extract each line item and its corresponding price as a whole number (integer).
      - Only include items that are food or drinks.
      - Ignore taxes, tips, totals, discounts, and any other summary lines.
      - Ensure prices are valid numerical integer values. If a price is unclear, estimate it as 0.
      - Provide the output as a JSON object that adheres to the provided schema.
      - If no items are found, return an empty array.
    ";

#[derive(Clone, Debug)]
pub struct GeminiConfig {
    /// `None` leaves the reader unconfigured; every scan then fails with
    /// [`ReceiptOcrError::NotConfigured`].
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
}

impl GeminiConfig {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Receipt reader backed by the Gemini `generateContent` API.
pub struct GeminiReceiptOcr {
    client: Client,
    config: GeminiConfig,
}

impl GeminiReceiptOcr {
    pub fn new(config: GeminiConfig) -> Result<Self, ReceiptOcrError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| ReceiptOcrError::Request {
                source: Box::new(err),
            })?;
        Ok(Self { client, config })
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }
}

impl ReceiptOcr for GeminiReceiptOcr {
    fn extract_items(&self, image: &ReceiptImage<'_>) -> Result<String, ReceiptOcrError> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            return Err(ReceiptOcrError::NotConfigured);
        };

        let body = request_body(image);
        tracing::debug!(
            model = %self.config.model,
            mime_type = image.mime_type,
            image_bytes = image.bytes.len(),
            "sending receipt to Gemini"
        );

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .map_err(|err| ReceiptOcrError::Request {
                source: Box::new(err),
            })?;

        let status = response.status();
        let text = response.text().map_err(|err| ReceiptOcrError::Request {
            source: Box::new(err),
        })?;
        if !status.is_success() {
            return Err(ReceiptOcrError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        candidate_text(&text)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [RequestPart<'a>; 2],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
enum RequestPart<'a> {
    InlineData {
        #[serde(rename = "mimeType")]
        mime_type: &'a str,
        data: String,
    },
    Text(&'a str),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

fn request_body<'a>(image: &ReceiptImage<'a>) -> GenerateContentRequest<'a> {
    GenerateContentRequest {
        contents: [Content {
            parts: [
                RequestPart::InlineData {
                    mime_type: image.mime_type,
                    data: STANDARD.encode(image.bytes),
                },
                RequestPart::Text(EXTRACTION_PROMPT),
            ],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json",
            response_schema: item_schema(),
        },
    }
}

fn item_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "name": {
                    "type": "STRING",
                    "description": "The name of the item.",
                },
                "price": {
                    "type": "INTEGER",
                    "description": "The price of the item as a whole number (integer).",
                },
            },
            "required": ["name", "price"],
        },
    })
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Joins the text parts of the first candidate.
fn candidate_text(raw: &str) -> Result<String, ReceiptOcrError> {
    let response: GenerateContentResponse =
        serde_json::from_str(raw).map_err(|err| ReceiptOcrError::MalformedResponse {
            detail: err.to_string(),
        })?;

    let parts = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts)
        .ok_or_else(|| ReceiptOcrError::MalformedResponse {
            detail: "response has no candidates".to_string(),
        })?;

    let text: String = parts.into_iter().filter_map(|part| part.text).collect();
    if text.trim().is_empty() {
        return Err(ReceiptOcrError::MalformedResponse {
            detail: "candidate has no text".to_string(),
        });
    }
    Ok(text)
}

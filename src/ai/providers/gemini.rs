use super::{checked_items, http_client};
use crate::ai::prompts::shopping_items_schema;
use crate::ai::{GenerationError, LookupError};
use crate::types::{GeneratedImage, ImageFile, ShoppingItem};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
const DEFAULT_CHAT_MODEL: &str = "gemini-2.5-flash";

/// Client for the Gemini `generateContent` REST endpoint
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    image_model: String,
    chat_model: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 2],
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: InlineData<'a>,
    },
    Text {
        text: &'a str,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Serialize, Default)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_modalities: Option<Vec<&'static str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
}

// Gemini API response types
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
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    text: Option<String>,
    inline_data: Option<ResponseInlineData>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseInlineData {
    data: String,
    mime_type: Option<String>,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: http_client(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
        }
    }

    pub fn from_env(api_key: String) -> Self {
        let mut client = Self::new(api_key);
        if let Ok(base_url) = std::env::var("GEMINI_BASE_URL") {
            client.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Ok(model) = std::env::var("GEMINI_IMAGE_MODEL") {
            client.image_model = model;
        }
        if let Ok(model) = std::env::var("GEMINI_CHAT_MODEL") {
            client.chat_model = model;
        }
        client
    }

    pub fn image_model(&self) -> &str {
        &self.image_model
    }

    pub fn chat_model(&self) -> &str {
        &self.chat_model
    }

    pub async fn generate_image(
        &self,
        image: &ImageFile,
        instruction: &str,
    ) -> Result<GeneratedImage, GenerationError> {
        let config = GenerationConfig {
            response_modalities: Some(vec!["IMAGE"]),
            ..Default::default()
        };
        let (status, body) = self
            .generate_content(&self.image_model, image, instruction, config)
            .await?;

        if !status.is_success() {
            return Err(GenerationError::Api {
                status: status.as_u16(),
                body,
            });
        }

        parse_image_response(&body).ok_or(GenerationError::NoImage)
    }

    pub async fn find_items(
        &self,
        image: &ImageFile,
        prompt: &str,
    ) -> Result<Vec<ShoppingItem>, LookupError> {
        let config = GenerationConfig {
            response_mime_type: Some("application/json"),
            response_schema: Some(shopping_items_schema()),
            ..Default::default()
        };
        let (status, body) = self
            .generate_content(&self.chat_model, image, prompt, config)
            .await?;

        if !status.is_success() {
            return Err(LookupError::Api {
                status: status.as_u16(),
                body,
            });
        }

        parse_items_response(&body)
    }

    async fn generate_content(
        &self,
        model: &str,
        image: &ImageFile,
        text: &str,
        generation_config: GenerationConfig,
    ) -> Result<(reqwest::StatusCode, String), reqwest::Error> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        let request = GenerateContentRequest {
            contents: [Content {
                parts: [
                    Part::Inline {
                        inline_data: InlineData {
                            mime_type: &image.mime_type,
                            data: &image.base64,
                        },
                    },
                    Part::Text { text },
                ],
            }],
            generation_config,
        };

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        Ok((status, body))
    }
}

fn response_parts(body: &str) -> Option<Vec<ResponsePart>> {
    let parsed = serde_json::from_str::<GenerateContentResponse>(body).ok()?;
    let first = parsed.candidates.into_iter().next()?;
    Some(first.content?.parts)
}

/// First inline image of the first candidate.
pub fn parse_image_response(body: &str) -> Option<GeneratedImage> {
    response_parts(body)?
        .into_iter()
        .find_map(|part| part.inline_data)
        .filter(|inline| !inline.data.is_empty())
        .map(|inline| GeneratedImage::new(inline.data, inline.mime_type))
}

/// The JSON item array carried in the text parts of the first candidate.
pub fn parse_items_response(body: &str) -> Result<Vec<ShoppingItem>, LookupError> {
    let parts = response_parts(body)
        .ok_or_else(|| LookupError::Malformed("response has no candidates".to_string()))?;
    let text = parts
        .into_iter()
        .filter_map(|part| part.text)
        .collect::<String>();

    let items: Vec<ShoppingItem> = serde_json::from_str(text.trim())
        .map_err(|e| LookupError::Malformed(e.to_string()))?;
    checked_items(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_image_response_skips_text_parts() {
        let body = r#"{"candidates":[{"content":{"parts":[
            {"text":"Here you go"},
            {"inlineData":{"mimeType":"image/png","data":"iVBORw0KGgo="}}
        ]}}]}"#;
        assert_eq!(
            parse_image_response(body),
            Some(GeneratedImage::new("iVBORw0KGgo=", Some("image/png".into())))
        );
    }

    #[test]
    fn test_parse_image_response_without_image() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"I can't do that"}]}}]}"#;
        assert_eq!(parse_image_response(body), None);
        assert_eq!(parse_image_response(r#"{"candidates":[]}"#), None);
        assert_eq!(parse_image_response("not json"), None);
    }

    #[test]
    fn test_parse_items_response() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"[{\"itemName\":\"Rattan Chair\",\"description\":\"Woven armchair\",\"price\":\"$249\",\"purchaseUrl\":\"https://shop.example/chair\"}]"}]}}]}"#;
        let items = parse_items_response(body).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].item_name, "Rattan Chair");
        assert_eq!(items[0].price, "$249");
    }

    #[test]
    fn test_parse_items_response_keeps_at_most_three() {
        let item = r#"{\"itemName\":\"Vase\",\"description\":\"Stoneware\",\"price\":\"$40\",\"purchaseUrl\":\"https://shop.example/vase\"}"#;
        let array = vec![item; 5].join(",");
        let body = format!(r#"{{"candidates":[{{"content":{{"parts":[{{"text":"[{array}]"}}]}}}}]}}"#);
        assert_eq!(parse_items_response(&body).unwrap().len(), 3);
    }

    #[test]
    fn test_parse_items_response_rejects_empty_and_malformed() {
        let empty = r#"{"candidates":[{"content":{"parts":[{"text":"[]"}]}}]}"#;
        assert_eq!(parse_items_response(empty), Err(LookupError::Empty));

        let missing_field = r#"{"candidates":[{"content":{"parts":[{"text":"[{\"itemName\":\"Lamp\"}]"}]}}]}"#;
        assert!(matches!(
            parse_items_response(missing_field),
            Err(LookupError::Malformed(_))
        ));

        assert!(matches!(
            parse_items_response("{}"),
            Err(LookupError::Malformed(_))
        ));
    }

    #[test]
    fn test_request_shape() {
        let request = GenerateContentRequest {
            contents: [Content {
                parts: [
                    Part::Inline {
                        inline_data: InlineData {
                            mime_type: "image/jpeg",
                            data: "AAAA",
                        },
                    },
                    Part::Text { text: "Make it blue" },
                ],
            }],
            generation_config: GenerationConfig {
                response_modalities: Some(vec!["IMAGE"]),
                ..Default::default()
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value["contents"][0]["parts"][0]["inlineData"]["mimeType"],
            "image/jpeg"
        );
        assert_eq!(value["contents"][0]["parts"][1]["text"], "Make it blue");
        assert_eq!(value["generationConfig"]["responseModalities"][0], "IMAGE");
        assert!(value["generationConfig"].get("responseSchema").is_none());
    }
}

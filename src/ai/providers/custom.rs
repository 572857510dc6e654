use super::{checked_items, http_client};
use crate::ai::{GenerationError, LookupError};
use crate::types::{GeneratedImage, ImageFile, ShoppingItem};
use serde::{Deserialize, Serialize};

/// Custom client for a self-hosted design endpoint
pub struct CustomClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

#[derive(Serialize)]
struct DesignRequest<'a> {
    task: &'a str,
    image: &'a ImageFile,
    instruction: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageResponse {
    image: Option<String>,
    mime_type: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ItemsResponse {
    Wrapped { items: Vec<ShoppingItem> },
    Bare(Vec<ShoppingItem>),
}

impl CustomClient {
    pub fn new(endpoint: String, api_key: Option<String>) -> Self {
        Self {
            client: http_client(),
            endpoint,
            api_key,
        }
    }

    pub async fn generate_image(
        &self,
        image: &ImageFile,
        instruction: &str,
    ) -> Result<GeneratedImage, GenerationError> {
        let (status, body) = self.post("redesign", image, instruction).await?;
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
        let (status, body) = self.post("shopping", image, prompt).await?;
        if !status.is_success() {
            return Err(LookupError::Api {
                status: status.as_u16(),
                body,
            });
        }
        parse_items_response(&body)
    }

    async fn post(
        &self,
        task: &str,
        image: &ImageFile,
        instruction: &str,
    ) -> Result<(reqwest::StatusCode, String), reqwest::Error> {
        let mut request = self.client.post(&self.endpoint).json(&DesignRequest {
            task,
            image,
            instruction,
        });

        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok((status, body))
    }
}

pub fn parse_image_response(body: &str) -> Option<GeneratedImage> {
    let response = serde_json::from_str::<ImageResponse>(body).ok()?;
    let data = response.image.filter(|data| !data.is_empty())?;
    Some(GeneratedImage::new(data, response.mime_type))
}

pub fn parse_items_response(body: &str) -> Result<Vec<ShoppingItem>, LookupError> {
    let items = match serde_json::from_str::<ItemsResponse>(body) {
        Ok(ItemsResponse::Wrapped { items }) | Ok(ItemsResponse::Bare(items)) => items,
        Err(err) => return Err(LookupError::Malformed(err.to_string())),
    };
    checked_items(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITEM: &str = r#"{"itemName":"Jute Rug","description":"Hand-woven","price":"$120","purchaseUrl":"https://shop.example/rug"}"#;

    #[test]
    fn test_parse_items_accepts_both_shapes() {
        let wrapped = format!(r#"{{"items":[{ITEM}]}}"#);
        let bare = format!("[{ITEM}]");
        assert_eq!(parse_items_response(&wrapped).unwrap()[0].item_name, "Jute Rug");
        assert_eq!(parse_items_response(&bare).unwrap()[0].item_name, "Jute Rug");
    }

    #[test]
    fn test_parse_items_truncates_to_three() {
        let bare = format!("[{}]", vec![ITEM; 4].join(","));
        assert_eq!(parse_items_response(&bare).unwrap().len(), 3);
    }

    #[test]
    fn test_parse_items_empty() {
        assert_eq!(parse_items_response("[]"), Err(LookupError::Empty));
        assert_eq!(parse_items_response(r#"{"items":[]}"#), Err(LookupError::Empty));
        assert!(matches!(
            parse_items_response("oops"),
            Err(LookupError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_image_response() {
        assert_eq!(parse_image_response(r#"{"image":"AAAA"}"#), Some("AAAA".into()));
        assert_eq!(
            parse_image_response(r#"{"image":"AAAA","mimeType":"image/webp"}"#),
            Some(GeneratedImage::new("AAAA", Some("image/webp".into())))
        );
        assert_eq!(parse_image_response(r#"{"image":""}"#), None);
        assert_eq!(parse_image_response(r#"{"error":"busy"}"#), None);
    }

    #[test]
    fn test_request_carries_task_and_image() {
        let image = ImageFile {
            base64: "AAAA".into(),
            mime_type: "image/png".into(),
            name: "room.png".into(),
        };
        let value = serde_json::to_value(DesignRequest {
            task: "redesign",
            image: &image,
            instruction: "Paint the walls",
        })
        .unwrap();
        assert_eq!(value["task"], "redesign");
        assert_eq!(value["image"]["mimeType"], "image/png");
        assert_eq!(value["instruction"], "Paint the walls");
    }
}

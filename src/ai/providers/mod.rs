pub mod custom;
pub mod gemini;

use super::prompts::{MAX_SHOPPING_ITEMS, shopping_prompt, with_customizations};
use super::{DesignClient, GenerationError, LookupError};
use crate::types::{CustomizationSelections, GeneratedImage, ImageFile, ShoppingItem};
use anyhow::Result;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::env;

pub use custom::CustomClient;
pub use gemini::GeminiClient;

/// One connection pool for every provider.
static HTTP: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

pub(crate) fn http_client() -> reqwest::Client {
    HTTP.clone()
}

/// An empty lookup is a failure; anything past the item cap is dropped.
pub(crate) fn checked_items(mut items: Vec<ShoppingItem>) -> Result<Vec<ShoppingItem>, LookupError> {
    if items.is_empty() {
        return Err(LookupError::Empty);
    }
    if items.len() > MAX_SHOPPING_ITEMS {
        tracing::debug!(returned = items.len(), "truncating shoppable items");
        items.truncate(MAX_SHOPPING_ITEMS);
    }
    Ok(items)
}

/// Enum to hold the configured provider
pub enum ProviderClient {
    Custom(CustomClient),
    Gemini(GeminiClient),
}

impl ProviderClient {
    /// Auto-detect and configure provider from environment variables
    pub fn from_env() -> Result<Self> {
        // Priority order:
        // 1. ATELIER_ENDPOINT → custom JSON endpoint
        // 2. GEMINI_API_KEY (or API_KEY) → Gemini

        if let Ok(endpoint) = env::var("ATELIER_ENDPOINT") {
            let api_key = env::var("ATELIER_API_KEY").ok();
            tracing::info!(%endpoint, "using custom design endpoint");
            return Ok(Self::Custom(CustomClient::new(endpoint, api_key)));
        }

        if let Ok(key) = env::var("GEMINI_API_KEY").or_else(|_| env::var("API_KEY")) {
            let client = GeminiClient::from_env(key);
            tracing::info!(
                image_model = client.image_model(),
                chat_model = client.chat_model(),
                "using Gemini"
            );
            return Ok(Self::Gemini(client));
        }

        Err(anyhow::anyhow!(
            "No design provider configured. Set ATELIER_ENDPOINT or GEMINI_API_KEY"
        ))
    }
}

#[async_trait]
impl DesignClient for ProviderClient {
    async fn redesign(
        &self,
        image: &ImageFile,
        instruction: &str,
        customizations: Option<&CustomizationSelections>,
    ) -> Result<GeneratedImage, GenerationError> {
        let instruction = with_customizations(instruction, customizations);
        tracing::info!(image = %image.name, "requesting redesign");

        let result = match self {
            ProviderClient::Custom(client) => client.generate_image(image, &instruction).await,
            ProviderClient::Gemini(client) => client.generate_image(image, &instruction).await,
        };
        if let Err(err) = &result {
            tracing::error!(error = ?err, "error generating image");
        }
        result
    }

    async fn find_shoppable_items(
        &self,
        image: &ImageFile,
        query: &str,
    ) -> Result<Vec<ShoppingItem>, LookupError> {
        let prompt = shopping_prompt(query);
        tracing::info!(image = %image.name, "looking up shoppable items");

        let result = match self {
            ProviderClient::Custom(client) => client.find_items(image, &prompt).await,
            ProviderClient::Gemini(client) => client.find_items(image, &prompt).await,
        };
        match &result {
            Ok(items) => tracing::info!(count = items.len(), "found shoppable items"),
            Err(err) => tracing::error!(error = ?err, "error getting shoppable links"),
        }
        result
    }
}

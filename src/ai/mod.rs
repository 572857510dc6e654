//! AI module for Atelier
//!
//! All image synthesis and item identification is delegated to a remote
//! generative service. This module defines the client seam the session
//! orchestration talks to and the concrete providers behind it.
//!
//! # Architecture
//!
//! - `prompts` - Instruction text sent along with the room image
//! - `providers` - Provider-specific implementations (Gemini REST, custom endpoint)
//!
//! # Usage
//!
//! ```rust,no_run
//! use atelier::ai::{DesignClient, ProviderClient};
//! use atelier::types::ImageFile;
//!
//! # async fn example(room: ImageFile) -> anyhow::Result<()> {
//! let client = ProviderClient::from_env()?;
//! let redesigned = client.redesign(&room, "Make it cozy", None).await?;
//! # Ok(())
//! # }
//! ```

pub mod prompts;
mod providers;

use crate::types::{CustomizationSelections, GeneratedImage, ImageFile, ShoppingItem};
use async_trait::async_trait;

pub use providers::{CustomClient, GeminiClient, ProviderClient};

/// A redesign request failed or produced no usable image.
///
/// `Display` is the text shown to the user; the variant carries the detail for logs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerationError {
    #[error("Failed to generate image. Please try again.")]
    Request(String),
    #[error("Failed to generate image. Please try again.")]
    Api { status: u16, body: String },
    #[error("Failed to generate image. Please try again.")]
    NoImage,
    #[error("No design provider configured. Set ATELIER_ENDPOINT or GEMINI_API_KEY.")]
    NotConfigured,
}

/// An item lookup failed or the service answered with something other than a non-empty item list.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LookupError {
    #[error("Failed to find shoppable items. Please try a different query.")]
    Request(String),
    #[error("Failed to find shoppable items. Please try a different query.")]
    Api { status: u16, body: String },
    #[error("Failed to find shoppable items. Please try a different query.")]
    Malformed(String),
    #[error("Failed to find shoppable items. Please try a different query.")]
    Empty,
    #[error("No design provider configured. Set ATELIER_ENDPOINT or GEMINI_API_KEY.")]
    NotConfigured,
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        GenerationError::Request(err.to_string())
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        LookupError::Request(err.to_string())
    }
}

/// The remote generative service, as seen by the session orchestration.
///
/// Both calls are single-shot: no retries, no streaming, no cancellation.
#[async_trait]
pub trait DesignClient: Send + Sync {
    /// Returns a new image derived from `image`.
    /// Non-empty `customizations` are folded into the instruction.
    async fn redesign(
        &self,
        image: &ImageFile,
        instruction: &str,
        customizations: Option<&CustomizationSelections>,
    ) -> Result<GeneratedImage, GenerationError>;

    /// Up to three items visible in `image` that match the user's query.
    async fn find_shoppable_items(
        &self,
        image: &ImageFile,
        query: &str,
    ) -> Result<Vec<ShoppingItem>, LookupError>;
}

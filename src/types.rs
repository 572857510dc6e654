use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::OffsetDateTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A decor preset from the static catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Style {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub prompt: &'static str,
}

/// An uploaded room photo or a generated redesign of it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageFile {
    pub base64: String,
    pub mime_type: String,
    pub name: String,
}

impl ImageFile {
    /// The source's name with the generated payload. The MIME type is the one
    /// the service reported, else the source's.
    pub fn with_generated(&self, generated: GeneratedImage) -> Self {
        Self {
            base64: generated.base64,
            mime_type: generated
                .mime_type
                .unwrap_or_else(|| self.mime_type.clone()),
            name: self.name.clone(),
        }
    }
}

/// An image payload returned by the generation service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedImage {
    pub base64: String,
    pub mime_type: Option<String>,
}

impl GeneratedImage {
    pub fn new(base64: impl Into<String>, mime_type: Option<String>) -> Self {
        Self {
            base64: base64.into(),
            mime_type: mime_type.filter(|mime| mime.starts_with("image/")),
        }
    }
}

impl From<String> for GeneratedImage {
    fn from(base64: String) -> Self {
        Self::new(base64, None)
    }
}

impl From<&str> for GeneratedImage {
    fn from(base64: &str) -> Self {
        Self::new(base64, None)
    }
}

/// Category label (e.g. "Flooring") to the single option chosen in it.
pub type CustomizationSelections = BTreeMap<String, String>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItem {
    pub item_name: String,
    pub description: String,
    pub price: String,
    pub purchase_url: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MessageContent {
    Text(String),
    ShoppingResults(Vec<ShoppingItem>),
}

impl MessageContent {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MessageContent::Text(text) => Some(text),
            MessageContent::ShoppingResults(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub content: MessageContent,
    pub created_at: Option<OffsetDateTime>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, MessageContent::Text(text.into()))
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, MessageContent::Text(text.into()))
    }

    pub fn shopping_results(items: Vec<ShoppingItem>) -> Self {
        Self::new(Role::Assistant, MessageContent::ShoppingResults(items))
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    fn new(role: Role, content: MessageContent) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            content,
            created_at: Some(OffsetDateTime::now_utc()),
        }
    }
}

/// A saved design. Holds copies, never references into the live session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodBoardItem {
    pub id: String,
    pub image_base64: String,
    pub style_name: String,
    #[serde(default)]
    pub customizations: CustomizationSelections,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

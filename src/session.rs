//! Session state for the current room and the transitions user actions drive.
//!
//! Every remote-backed action runs in three steps so that no borrow of the
//! session is held across an `.await`:
//!
//! 1. `begin_*` validates preconditions, raises the loading flag and returns a
//!    [`PendingRequest`];
//! 2. [`PendingRequest::run`] performs the remote call;
//! 3. [`Session::complete`] merges the [`Completion`] and lowers the loading flag.

use crate::ai::prompts::{DEFAULT_REDESIGN_PROMPT, MATERIAL_UPDATE_PROMPT};
use crate::ai::{DesignClient, GenerationError, LookupError};
use crate::types::{
    ChatMessage, CustomizationSelections, GeneratedImage, ImageFile, ShoppingItem, Style,
};

/// Id of the greeting seeded after a style is applied.
pub const START_MESSAGE_ID: &str = "start";

// Known weakness: substring matching flags refinements such as
// "make the rug blue" as shopping queries. Kept literal.
const SHOPPING_KEYWORDS: &[&str] = &[
    "shop", "buy", "find", "link", "purchase", "item", "chair", "sofa", "table", "lamp", "rug",
];

const CUSTOMIZED_REPLY: &str = "I've applied your material customizations. What would you like to change next?";
const REFINED_REPLY: &str = "I've updated the design with your changes. What's next?";
const INTERRUPTED_MESSAGE: &str = "The request was interrupted. Please try again.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No room photo yet.
    Empty,
    Idle,
    /// One remote call in flight.
    Generating,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activity {
    Styling(&'static str),
    Customizing,
    Refining,
    Shopping,
}

impl Activity {
    pub fn loading_message(&self) -> String {
        match self {
            Activity::Styling(name) => format!("Reimagining your room in {name} style..."),
            Activity::Customizing => "Applying your material customizations...".to_string(),
            Activity::Refining => "Applying your changes...".to_string(),
            Activity::Shopping => "Searching for shoppable items...".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatIntent {
    Shopping,
    Refinement,
}

pub fn classify_intent(message: &str) -> ChatIntent {
    let lowered = message.to_lowercase();
    if SHOPPING_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
    {
        ChatIntent::Shopping
    } else {
        ChatIntent::Refinement
    }
}

/// Why an action was not started. Session state is untouched when one is returned.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Please wait for the current design to finish.")]
    Busy,
    #[error("Upload a photo of your room first.")]
    NoOriginalImage,
    #[error("Pick a style to generate a design first.")]
    NoGeneratedImage,
    #[error("Pick a style before saving to the mood board.")]
    NoStyleSelected,
    #[error("Type a message first.")]
    EmptyMessage,
}

/// A remote call the session is waiting on.
#[derive(Clone, Debug, PartialEq)]
pub enum PendingRequest {
    Style {
        style: Style,
        image: ImageFile,
    },
    Customize {
        base: ImageFile,
        instruction: String,
        customizations: CustomizationSelections,
    },
    Refine {
        base: ImageFile,
        instruction: String,
        customizations: CustomizationSelections,
    },
    Shopping {
        image: ImageFile,
        query: String,
    },
}

/// The outcome of a [`PendingRequest`], ready to merge into the session.
#[derive(Clone, Debug, PartialEq)]
pub enum Completion {
    Styled {
        style: Style,
        base: ImageFile,
        result: Result<GeneratedImage, GenerationError>,
    },
    Customized {
        base: ImageFile,
        result: Result<GeneratedImage, GenerationError>,
    },
    Refined {
        base: ImageFile,
        result: Result<GeneratedImage, GenerationError>,
    },
    Shopping {
        result: Result<Vec<ShoppingItem>, LookupError>,
    },
}

impl PendingRequest {
    pub async fn run(self, client: &dyn DesignClient) -> Completion {
        match self {
            PendingRequest::Style { style, image } => {
                let result = client.redesign(&image, style.prompt, None).await;
                Completion::Styled {
                    style,
                    base: image,
                    result,
                }
            }
            PendingRequest::Customize {
                base,
                instruction,
                customizations,
            } => {
                let result = client
                    .redesign(&base, &instruction, Some(&customizations))
                    .await;
                Completion::Customized { base, result }
            }
            PendingRequest::Refine {
                base,
                instruction,
                customizations,
            } => {
                let result = client
                    .redesign(&base, &instruction, Some(&customizations))
                    .await;
                Completion::Refined { base, result }
            }
            PendingRequest::Shopping { image, query } => {
                let result = client.find_shoppable_items(&image, &query).await;
                Completion::Shopping { result }
            }
        }
    }

    /// Completes the request without a provider.
    pub fn unavailable(self) -> Completion {
        match self {
            PendingRequest::Style { style, image } => Completion::Styled {
                style,
                base: image,
                result: Err(GenerationError::NotConfigured),
            },
            PendingRequest::Customize { base, .. } => Completion::Customized {
                base,
                result: Err(GenerationError::NotConfigured),
            },
            PendingRequest::Refine { base, .. } => Completion::Refined {
                base,
                result: Err(GenerationError::NotConfigured),
            },
            PendingRequest::Shopping { .. } => Completion::Shopping {
                result: Err(LookupError::NotConfigured),
            },
        }
    }
}

/// What a mood board entry is cut from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DesignSnapshot<'a> {
    pub image_base64: &'a str,
    pub style_name: &'a str,
    pub customizations: &'a CustomizationSelections,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    original: Option<ImageFile>,
    generated: Option<ImageFile>,
    style: Option<Style>,
    customizations: CustomizationSelections,
    messages: Vec<ChatMessage>,
    activity: Option<Activity>,
    error: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        if self.activity.is_some() {
            Phase::Generating
        } else if self.original.is_some() {
            Phase::Idle
        } else {
            Phase::Empty
        }
    }

    pub fn is_loading(&self) -> bool {
        self.activity.is_some()
    }

    pub fn loading_message(&self) -> Option<String> {
        self.activity.map(|activity| activity.loading_message())
    }

    pub fn original(&self) -> Option<&ImageFile> {
        self.original.as_ref()
    }

    pub fn generated(&self) -> Option<&ImageFile> {
        self.generated.as_ref()
    }

    pub fn selected_style(&self) -> Option<&Style> {
        self.style.as_ref()
    }

    pub fn customizations(&self) -> &CustomizationSelections {
        &self.customizations
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    fn ensure_idle(&self) -> Result<(), SessionError> {
        if self.is_loading() {
            return Err(SessionError::Busy);
        }
        Ok(())
    }

    /// Replaces the room photo and resets everything derived from the previous one.
    pub fn upload(&mut self, image: ImageFile) -> Result<(), SessionError> {
        self.ensure_idle()?;
        tracing::info!(name = %image.name, mime = %image.mime_type, "room photo uploaded");
        self.original = Some(image);
        self.generated = None;
        self.style = None;
        self.customizations.clear();
        self.messages.clear();
        self.error = None;
        Ok(())
    }

    /// `None` (or an empty option) clears the category.
    pub fn set_customization(
        &mut self,
        category: &str,
        option: Option<&str>,
    ) -> Result<(), SessionError> {
        self.ensure_idle()?;
        match option.filter(|value| !value.is_empty()) {
            Some(value) => {
                self.customizations
                    .insert(category.to_string(), value.to_string());
            }
            None => {
                self.customizations.remove(category);
            }
        }
        Ok(())
    }

    /// Selecting the chosen option again deselects it.
    pub fn toggle_customization(&mut self, category: &str, option: &str) -> Result<(), SessionError> {
        let already_selected = self
            .customizations
            .get(category)
            .is_some_and(|current| current == option);
        if already_selected {
            self.set_customization(category, None)
        } else {
            self.set_customization(category, Some(option))
        }
    }

    pub fn begin_style_selection(&mut self, style: Style) -> Result<PendingRequest, SessionError> {
        self.ensure_idle()?;
        let image = self.original.clone().ok_or(SessionError::NoOriginalImage)?;

        self.style = Some(style);
        self.generated = None;
        self.error = None;
        self.activity = Some(Activity::Styling(style.name));
        tracing::info!(style = style.id, "style selected");

        Ok(PendingRequest::Style { style, image })
    }

    pub fn begin_customization(&mut self) -> Result<PendingRequest, SessionError> {
        self.ensure_idle()?;
        let original = self.original.as_ref().ok_or(SessionError::NoOriginalImage)?;

        let (base, instruction) = match &self.generated {
            Some(generated) => (generated.clone(), MATERIAL_UPDATE_PROMPT.to_string()),
            None => {
                let prompt = self
                    .style
                    .map(|style| style.prompt)
                    .unwrap_or(DEFAULT_REDESIGN_PROMPT);
                (original.clone(), prompt.to_string())
            }
        };

        self.error = None;
        self.activity = Some(Activity::Customizing);
        tracing::info!(count = self.customizations.len(), "applying customizations");

        Ok(PendingRequest::Customize {
            base,
            instruction,
            customizations: self.customizations.clone(),
        })
    }

    /// Appends the user's message right away and picks the request from its intent.
    pub fn begin_chat(&mut self, text: &str) -> Result<PendingRequest, SessionError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SessionError::EmptyMessage);
        }
        self.ensure_idle()?;
        let base = self.generated.clone().ok_or(SessionError::NoGeneratedImage)?;

        self.messages.push(ChatMessage::user(text));
        self.error = None;

        let intent = classify_intent(text);
        tracing::info!(?intent, "chat message sent");
        let pending = match intent {
            ChatIntent::Shopping => {
                self.activity = Some(Activity::Shopping);
                PendingRequest::Shopping {
                    image: base,
                    query: text.to_string(),
                }
            }
            ChatIntent::Refinement => {
                self.activity = Some(Activity::Refining);
                PendingRequest::Refine {
                    base,
                    instruction: text.to_string(),
                    customizations: self.customizations.clone(),
                }
            }
        };
        Ok(pending)
    }

    /// Merges a finished request. The loading flag is lowered whatever the outcome.
    pub fn complete(&mut self, completion: Completion) {
        self.activity = None;

        match completion {
            Completion::Styled {
                style,
                base,
                result,
            } => match result {
                Ok(image) => {
                    self.generated = Some(base.with_generated(image));
                    self.messages = vec![
                        ChatMessage::assistant(format!(
                            "Here is your room in a {} style! How can I help you refine it?",
                            style.name
                        ))
                        .with_id(START_MESSAGE_ID),
                    ];
                }
                Err(err) => self.fail(err.to_string()),
            },
            Completion::Customized { base, result } => match result {
                Ok(image) => {
                    self.generated = Some(base.with_generated(image));
                    self.messages.retain(|message| message.id != START_MESSAGE_ID);
                    self.messages.push(ChatMessage::assistant(CUSTOMIZED_REPLY));
                }
                Err(err) => self.fail(err.to_string()),
            },
            Completion::Refined { base, result } => match result {
                Ok(image) => {
                    self.generated = Some(base.with_generated(image));
                    self.messages.push(ChatMessage::assistant(REFINED_REPLY));
                }
                Err(err) => {
                    let message = err.to_string();
                    self.messages.push(ChatMessage::assistant(format!(
                        "Sorry, I couldn't apply that change. {message}"
                    )));
                    self.fail(message);
                }
            },
            Completion::Shopping { result } => match result {
                Ok(items) => self.messages.push(ChatMessage::shopping_results(items)),
                Err(err) => {
                    let message = err.to_string();
                    self.messages.push(ChatMessage::assistant(format!(
                        "Sorry, I couldn't find items for that. {message}"
                    )));
                    self.fail(message);
                }
            },
        }
    }

    /// Lowers the loading flag for a request whose result will never arrive.
    pub fn abandon(&mut self) {
        if let Some(activity) = self.activity.take() {
            tracing::warn!(?activity, "design request abandoned");
            self.error = Some(INTERRUPTED_MESSAGE.to_string());
        }
    }

    fn fail(&mut self, message: String) {
        tracing::warn!(%message, "design request failed");
        self.error = Some(message);
    }

    /// The current design, if it can be saved: needs a generated image and a style.
    pub fn design_snapshot(&self) -> Result<DesignSnapshot<'_>, SessionError> {
        let generated = self.generated.as_ref().ok_or(SessionError::NoGeneratedImage)?;
        let style = self.style.as_ref().ok_or(SessionError::NoStyleSelected)?;
        Ok(DesignSnapshot {
            image_base64: &generated.base64,
            style_name: style.name,
            customizations: &self.customizations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::STYLES;
    use crate::types::{MessageContent, Role};

    fn room() -> ImageFile {
        ImageFile {
            base64: "b3JpZ2luYWw=".into(),
            mime_type: "image/jpeg".into(),
            name: "room.jpg".into(),
        }
    }

    #[test]
    fn test_classify_intent_is_case_insensitive_substring() {
        assert_eq!(
            classify_intent("Where can I buy that Chair?"),
            ChatIntent::Shopping
        );
        assert_eq!(classify_intent("Make the rug blue"), ChatIntent::Shopping);
        assert_eq!(classify_intent("LAMPS please"), ChatIntent::Shopping);
        assert_eq!(
            classify_intent("Make the walls warmer"),
            ChatIntent::Refinement
        );
    }

    #[test]
    fn test_phase_progression() {
        let mut session = Session::new();
        assert_eq!(session.phase(), Phase::Empty);
        session.upload(room()).unwrap();
        assert_eq!(session.phase(), Phase::Idle);
        let pending = session.begin_style_selection(STYLES[0]).unwrap();
        assert_eq!(session.phase(), Phase::Generating);
        assert_eq!(
            session.loading_message().as_deref(),
            Some("Reimagining your room in Mid-Century Modern style...")
        );
        session.complete(pending.unavailable());
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_style_selection_requires_original() {
        let mut session = Session::new();
        assert_eq!(
            session.begin_style_selection(STYLES[1]),
            Err(SessionError::NoOriginalImage)
        );
        assert_eq!(session.selected_style(), None);
        assert!(!session.is_loading());
    }

    #[test]
    fn test_style_success_seeds_greeting() {
        let mut session = Session::new();
        session.upload(room()).unwrap();
        let style = STYLES[4];
        session.begin_style_selection(style).unwrap();
        session.complete(Completion::Styled {
            style,
            base: room(),
            result: Ok("bmV3".into()),
        });

        let generated = session.generated().unwrap();
        assert_eq!(generated.base64, "bmV3");
        assert_eq!(generated.mime_type, "image/jpeg");
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].id, START_MESSAGE_ID);
        assert_eq!(session.messages()[0].role, Role::Assistant);
        assert_eq!(
            session.messages()[0].content,
            MessageContent::Text(
                "Here is your room in a Coastal style! How can I help you refine it?".into()
            )
        );
    }

    #[test]
    fn test_toggle_customization() {
        let mut session = Session::new();
        session.toggle_customization("Flooring", "Walnut").unwrap();
        assert_eq!(session.customizations()["Flooring"], "Walnut");
        session.toggle_customization("Flooring", "Light Oak").unwrap();
        assert_eq!(session.customizations()["Flooring"], "Light Oak");
        session.toggle_customization("Flooring", "Light Oak").unwrap();
        assert!(session.customizations().is_empty());
    }

    #[test]
    fn test_customization_without_generated_uses_style_prompt_on_original() {
        let mut session = Session::new();
        session.upload(room()).unwrap();
        session.set_customization("Flooring", Some("Walnut")).unwrap();

        let pending = session.begin_customization().unwrap();
        match pending {
            PendingRequest::Customize {
                base,
                instruction,
                customizations,
            } => {
                assert_eq!(base, room());
                assert_eq!(instruction, DEFAULT_REDESIGN_PROMPT);
                assert_eq!(customizations.len(), 1);
            }
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn test_empty_chat_message_is_ignored() {
        let mut session = Session::new();
        session.upload(room()).unwrap();
        assert_eq!(session.begin_chat("   "), Err(SessionError::EmptyMessage));
        assert_eq!(
            session.begin_chat("make it green"),
            Err(SessionError::NoGeneratedImage)
        );
        assert!(session.messages().is_empty());
    }

    #[test]
    fn test_abandon_releases_the_gate() {
        let mut session = Session::new();
        session.upload(room()).unwrap();
        session.begin_style_selection(STYLES[0]).unwrap();

        session.abandon();

        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.error(), Some(INTERRUPTED_MESSAGE));
        assert!(session.begin_style_selection(STYLES[1]).is_ok());
    }

    #[test]
    fn test_abandon_when_idle_keeps_state() {
        let mut session = Session::new();
        session.upload(room()).unwrap();
        session.abandon();
        assert!(session.error().is_none());
    }

    #[test]
    fn test_snapshot_requires_style_and_generated() {
        let mut session = Session::new();
        session.upload(room()).unwrap();
        assert_eq!(
            session.design_snapshot().unwrap_err(),
            SessionError::NoGeneratedImage
        );
    }
}

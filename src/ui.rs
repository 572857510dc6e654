use crate::mood_board::MoodBoard;
use crate::session::Session;
use crate::theme::{load_theme, save_theme, theme_definition};
use crate::types::ThemeMode;
use crate::views::shared::AppContext;
use crate::views::{
    ChatPanel, ImageComparator, ImageUploader, MaterialCustomizer, MoodBoardPanel, StyleCarousel,
};
use dioxus::prelude::*;

const ATELIER_CSS: Asset = asset!("/assets/atelier.css");

#[component]
pub fn App() -> Element {
    let context = use_context_provider(AppContext::from_env);
    let store = context.store.clone();
    let session = use_signal(Session::new);
    let board = use_signal(move || MoodBoard::load(store));
    let theme = use_signal(|| load_theme(context.store.as_ref()));
    let board_open = use_signal(|| false);

    rsx! {
        ThemeStyles { theme }
        AppHeader { theme, board, board_open }
        main { class: "container",
            if session.read().original().is_none() {
                div { class: "upload-stage",
                    ImageUploader { session }
                }
            } else {
                Workspace { session, board }
            }
        }
        MoodBoardPanel { board, open: board_open }
    }
}

#[component]
fn ThemeStyles(theme: Signal<ThemeMode>) -> Element {
    let definition = theme_definition(theme());
    rsx! {
        document::Link { rel: "stylesheet", href: ATELIER_CSS }
        style { dangerous_inner_html: "{definition.css}" }
    }
}

#[component]
fn AppHeader(mut theme: Signal<ThemeMode>, board: Signal<MoodBoard>, mut board_open: Signal<bool>) -> Element {
    let context = use_context::<AppContext>();
    let definition = theme_definition(theme());
    let saved = board.read().len();
    rsx! {
        header { class: "header",
            div { class: "header-content",
                h1 { class: "header-title", "AI Interior Design Consultant" }
                div { class: "header-actions",
                    button {
                        class: "btn btn-ghost",
                        r#type: "button",
                        onclick: move |_| board_open.set(true),
                        "Mood Board ({saved})"
                    }
                    button {
                        class: "btn btn-ghost",
                        r#type: "button",
                        onclick: move |_| {
                            let next = theme().toggled();
                            theme.set(next);
                            save_theme(context.store.as_ref(), next);
                        },
                        "{definition.toggle_label}"
                    }
                }
            }
        }
    }
}

#[component]
fn Workspace(mut session: Signal<Session>, board: Signal<MoodBoard>) -> Element {
    let snapshot = session.read().clone();
    let can_save = snapshot.design_snapshot().is_ok();

    rsx! {
        div { class: "workspace",
            div { class: "workspace-main",
                StyleCarousel { session }
                if let Some(error) = snapshot.error() {
                    div { class: "error-banner", role: "alert",
                        span { "{error}" }
                        button {
                            class: "btn btn-ghost",
                            r#type: "button",
                            onclick: move |_| session.with_mut(|s| s.dismiss_error()),
                            "Dismiss"
                        }
                    }
                }
                if snapshot.generated().is_some() {
                    div { class: "section-header",
                        h2 { class: "section-title", "Compare Your Room" }
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            disabled: !can_save,
                            onclick: move |_| save_current_design(session, board),
                            "Save to Mood Board"
                        }
                    }
                }
                if let Some(message) = snapshot.loading_message() {
                    div { class: "loading-panel panel",
                        div { class: "spinner" }
                        p { class: "loading-title", "{message}" }
                        p { class: "text-muted", "AI is working its magic. This may take a moment." }
                    }
                } else if let (Some(original), Some(generated)) = (snapshot.original(), snapshot.generated()) {
                    div { class: "compare-section",
                        ImageComparator {
                            original: original.data_url(),
                            generated: generated.data_url(),
                        }
                    }
                } else {
                    div { class: "placeholder panel",
                        h3 { "Your reimagined room will appear here." }
                        p { class: "text-muted", "Select a style above to get started." }
                    }
                }
                MaterialCustomizer { session }
            }
            div { class: "workspace-side",
                if snapshot.generated().is_some() {
                    ChatPanel { session }
                }
            }
        }
    }
}

fn save_current_design(session: Signal<Session>, mut board: Signal<MoodBoard>) {
    let current = session.read();
    match current.design_snapshot() {
        Ok(snapshot) => {
            board.with_mut(|board| {
                board.save_design(
                    snapshot.image_base64,
                    snapshot.style_name,
                    snapshot.customizations,
                );
            });
        }
        Err(err) => tracing::debug!(%err, "nothing to save"),
    }
}

use crate::mood_board::MoodBoard;
use dioxus::prelude::*;

const EXPORT_FILE_NAME: &str = "mood-board.json";

#[cfg(not(target_arch = "wasm32"))]
fn export_board(board: &MoodBoard) -> String {
    let dir = dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| std::path::PathBuf::from("."));
    let path = dir.join(EXPORT_FILE_NAME);
    match board.export_to(&path) {
        Ok(()) => format!("Exported to {}", path.display()),
        Err(err) => {
            tracing::error!(error = %err, "failed to export mood board");
            format!("Export failed: {err}")
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn export_board(_board: &MoodBoard) -> String {
    "Export is not available in this build.".to_string()
}

#[component]
pub fn MoodBoardPanel(mut board: Signal<MoodBoard>, mut open: Signal<bool>) -> Element {
    let mut notice = use_signal(|| Option::<String>::None);

    if !open() {
        return rsx! {};
    }

    let items = board.read().items().to_vec();

    rsx! {
        div { class: "modal-backdrop", role: "dialog", aria_modal: "true",
            div { class: "modal panel",
                header { class: "modal-header",
                    h2 { class: "section-title", "My Mood Board" }
                    div { class: "actions",
                        label { class: "btn btn-ghost",
                            "Import"
                            input {
                                r#type: "file",
                                class: "hidden-input",
                                accept: "application/json,.json",
                                onchange: move |evt: FormEvent| async move {
                                    let mut board = board;
                                    let mut notice = notice;
                                    let Some(engine) = evt.files() else {
                                        return;
                                    };
                                    let Some(path) = engine.files().into_iter().next() else {
                                        return;
                                    };
                                    let Some(raw) = engine.read_file_to_string(&path).await else {
                                        notice.set(Some("Could not read the selected file.".to_string()));
                                        return;
                                    };
                                    let message = match board.with_mut(|b| b.import_json(&raw)) {
                                        Ok(outcome) => outcome.message(),
                                        Err(err) => err.to_string(),
                                    };
                                    notice.set(Some(message));
                                },
                            }
                        }
                        button {
                            class: "btn btn-ghost",
                            r#type: "button",
                            disabled: items.is_empty(),
                            onclick: move |_| notice.set(Some(export_board(&board.read()))),
                            "Export"
                        }
                        button {
                            class: "btn btn-ghost",
                            r#type: "button",
                            onclick: move |_| {
                                notice.set(None);
                                open.set(false);
                            },
                            "Close"
                        }
                    }
                }
                if let Some(message) = notice() {
                    div { class: "notice", "{message}" }
                }
                div { class: "modal-body",
                    if items.is_empty() {
                        div { class: "empty-state",
                            p { "Your mood board is empty." }
                            p { class: "text-muted", "Save your favorite designs to see them here." }
                        }
                    } else {
                        div { class: "board-grid",
                            for item in items.into_iter() {
                                div { key: "{item.id}", class: "board-card",
                                    img {
                                        class: "board-image",
                                        src: "{item.data_url()}",
                                        alt: "Mood board item - {item.style_name}",
                                    }
                                    div { class: "board-caption",
                                        h3 { "{item.style_name}" }
                                        for (category, option) in item.customizations.iter() {
                                            span { key: "{category}", class: "tag-pill", "{category}: {option}" }
                                        }
                                    }
                                    button {
                                        class: "action-btn board-remove",
                                        r#type: "button",
                                        aria_label: "Remove from mood board",
                                        onclick: {
                                            let id = item.id.clone();
                                            move |_| {
                                                board.with_mut(|b| b.remove(&id));
                                            }
                                        },
                                        "Remove"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

use crate::catalog::CUSTOMIZATIONS;
use crate::session::Session;
use crate::views::shared::start_request;
use dioxus::prelude::*;

#[component]
pub fn MaterialCustomizer(mut session: Signal<Session>) -> Element {
    let current = session.read();
    let loading = current.is_loading();
    let selections = current.customizations().clone();

    rsx! {
        div { class: "panel customizer",
            h2 { class: "section-title", "3. Customize Materials (Optional)" }
            for (category, options) in CUSTOMIZATIONS.iter().copied() {
                div { key: "{category}", class: "customizer-group",
                    h3 { class: "control-label", "{category}" }
                    div { class: "chip-row",
                        for option in options.iter().copied() {
                            button {
                                key: "{option}",
                                class: format_args!(
                                    "chip {}",
                                    if selections.get(category).is_some_and(|o| o == option) { "active" } else { "" }
                                ),
                                r#type: "button",
                                disabled: loading,
                                onclick: move |_| {
                                    if let Err(err) = session.with_mut(|s| s.toggle_customization(category, option)) {
                                        tracing::debug!(%err, "customization ignored");
                                    }
                                },
                                "{option}"
                            }
                        }
                    }
                }
            }
            button {
                class: "btn btn-primary btn-block",
                r#type: "button",
                disabled: loading,
                onclick: move |_| start_request(session, |s| s.begin_customization()),
                "Apply Customizations"
            }
        }
    }
}

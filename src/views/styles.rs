use crate::catalog::STYLES;
use crate::session::Session;
use crate::views::shared::start_request;
use dioxus::prelude::*;

#[component]
pub fn StyleCarousel(session: Signal<Session>) -> Element {
    let current = session.read();
    let loading = current.is_loading();
    let selected = current.selected_style().map(|style| style.id);

    rsx! {
        div { class: "panel style-carousel",
            h2 { class: "section-title", "1. Choose a Style" }
            div { class: "style-row",
                for style in STYLES.iter().copied() {
                    button {
                        key: "{style.id}",
                        class: format_args!(
                            "style-card {}",
                            if selected == Some(style.id) { "active" } else { "" }
                        ),
                        r#type: "button",
                        disabled: loading,
                        onclick: move |_| start_request(session, |s| s.begin_style_selection(style)),
                        h3 { class: "style-name", "{style.name}" }
                        p { class: "text-muted", "{style.description}" }
                    }
                }
            }
        }
    }
}

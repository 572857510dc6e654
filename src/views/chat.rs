use crate::session::Session;
use crate::types::{ChatMessage, MessageContent, Role, ShoppingItem};
use crate::views::shared::{format_message_timestamp, start_request};
use dioxus::events::Key;
use dioxus::prelude::*;

fn role_class(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Assistant => "assistant",
    }
}

fn awaiting_reply(messages: &[ChatMessage], loading: bool) -> bool {
    loading && matches!(messages.last(), Some(msg) if msg.role == Role::User)
}

#[component]
pub fn ChatPanel(session: Signal<Session>) -> Element {
    let mut input = use_signal(String::new);
    let (loading, messages) = {
        let current = session.read();
        (current.is_loading(), current.messages().to_vec())
    };

    let mut send_message = move |text: String| {
        if text.trim().is_empty() || session.read().is_loading() {
            return;
        }
        input.set(String::new());
        start_request(session, move |s| s.begin_chat(&text));
    };

    rsx! {
        div { class: "panel chat-panel",
            div { class: "chat-header",
                h2 { class: "section-title", "2. Refine & Shop" }
                p { class: "text-muted", "e.g., \"Make the walls sage green\" or \"Where can I buy that chair?\"" }
            }
            div { id: "chat-list", class: "chat-list",
                for msg in messages.iter() {
                    div { key: "{msg.id}", class: format_args!("message-row {}", role_class(msg.role)),
                        div { class: format_args!("bubble {}", role_class(msg.role)),
                            {match &msg.content {
                                MessageContent::Text(text) => rsx! { p { "{text}" } },
                                MessageContent::ShoppingResults(items) => rsx! { ShoppingLinks { items: items.clone() } },
                            }}
                        }
                        if let Some(ts) = format_message_timestamp(msg.created_at) {
                            div { class: format_args!("message-meta {}", role_class(msg.role)),
                                span { class: "message-timestamp", "{ts}" }
                            }
                        }
                    }
                }
                if awaiting_reply(&messages, loading) {
                    div { class: "message-row assistant",
                        div { class: "bubble assistant",
                            span { class: "shimmer-text", "Thinking…" }
                        }
                    }
                }
            }
            form { class: "composer",
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    send_message(input());
                },
                input {
                    r#type: "text",
                    placeholder: "Describe your change...",
                    value: "{input}",
                    disabled: loading,
                    oninput: move |ev| input.set(ev.value()),
                    onkeydown: move |ev| {
                        if ev.key() == Key::Enter {
                            ev.prevent_default();
                            send_message(input());
                        }
                    },
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: loading || input().trim().is_empty(),
                    onclick: move |_| send_message(input()),
                    "Send"
                }
            }
        }
    }
}

#[component]
fn ShoppingLinks(items: Vec<ShoppingItem>) -> Element {
    rsx! {
        div { class: "shopping-links",
            p { class: "shopping-intro", "Here are some items I found for you:" }
            for (index, item) in items.into_iter().enumerate() {
                ShoppingItemCard { key: "{index}", item }
            }
        }
    }
}

#[component]
fn ShoppingItemCard(item: ShoppingItem) -> Element {
    let link = item.purchase_url.clone();
    let on_copy = move |_| {
        let raw = link.clone();
        spawn(async move {
            #[cfg(feature = "desktop")]
            {
                if let Ok(mut cb) = arboard::Clipboard::new() {
                    let _ = cb.set_text(raw);
                }
            }
            #[cfg(not(feature = "desktop"))]
            {
                let _ = raw;
            }
        });
    };

    rsx! {
        div { class: "shopping-card",
            h4 { class: "shopping-name", "{item.item_name}" }
            p { class: "text-muted", "{item.description}" }
            div { class: "shopping-footer",
                span { class: "shopping-price", "{item.price}" }
                div { class: "actions",
                    button { class: "action-btn", r#type: "button", title: "Copy link", onclick: on_copy, "Copy link" }
                    a {
                        class: "btn btn-primary",
                        href: "{item.purchase_url}",
                        target: "_blank",
                        rel: "noopener noreferrer",
                        "View Item"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_awaiting_reply_only_after_user_message() {
        let user = ChatMessage::user("Make it brighter");
        let assistant = ChatMessage::assistant("Done!");
        assert!(awaiting_reply(&[assistant.clone(), user.clone()], true));
        assert!(!awaiting_reply(&[user.clone()], false));
        assert!(!awaiting_reply(&[user, assistant], true));
        assert!(!awaiting_reply(&[], true));
    }
}

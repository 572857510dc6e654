use crate::storage::KeyValueStore;
use crate::types::ThemeMode;

pub const THEME_KEY: &str = "theme";

pub struct ThemeDefinition {
    pub css: &'static str,
    pub toggle_label: &'static str,
}

pub fn theme_definition(mode: ThemeMode) -> ThemeDefinition {
    match mode {
        ThemeMode::Light => ThemeDefinition {
            css: LIGHT_THEME,
            toggle_label: "Dark mode",
        },
        ThemeMode::Dark => ThemeDefinition {
            css: DARK_THEME,
            toggle_label: "Light mode",
        },
    }
}

/// Stored preference, `Light` when absent or unreadable.
pub fn load_theme(store: &dyn KeyValueStore) -> ThemeMode {
    match store.get(THEME_KEY) {
        Ok(Some(raw)) => ThemeMode::parse(&raw).unwrap_or_else(|| {
            tracing::warn!(%raw, "ignoring unknown theme preference");
            ThemeMode::default()
        }),
        Ok(None) => ThemeMode::default(),
        Err(err) => {
            tracing::warn!(error = %err, "failed to read theme preference");
            ThemeMode::default()
        }
    }
}

pub fn save_theme(store: &dyn KeyValueStore, mode: ThemeMode) {
    if let Err(err) = store.set(THEME_KEY, mode.as_str()) {
        tracing::error!(error = %err, "failed to save theme preference");
    }
}

const LIGHT_THEME: &str = r#"
:root {
    --color-bg-primary: #f9fafb;
    --color-bg-secondary: #ffffff;
    --color-bg-overlay: rgba(0, 0, 0, 0.7);
    --color-text-primary: #1f2937;
    --color-text-muted: #6b7280;
    --color-border: #e5e7eb;
    --color-accent: #4f46e5;
    --color-accent-hover: #4338ca;
    --color-accent-text: #ffffff;
    --color-chat-user-bg: #6366f1;
    --color-chat-user-text: #ffffff;
    --color-chat-assistant-bg: #f3f4f6;
    --color-chat-assistant-text: #1f2937;
    --color-error-bg: #fee2e2;
    --color-error-text: #b91c1c;
}
body { background: var(--color-bg-primary); color: var(--color-text-primary); }
.panel { background: var(--color-bg-secondary); border-color: var(--color-border); }
"#;

const DARK_THEME: &str = r#"
:root {
    --color-bg-primary: #0f172a;
    --color-bg-secondary: #1e293b;
    --color-bg-overlay: rgba(0, 0, 0, 0.8);
    --color-text-primary: #f1f5f9;
    --color-text-muted: #94a3b8;
    --color-border: #334155;
    --color-accent: #818cf8;
    --color-accent-hover: #6366f1;
    --color-accent-text: #0f172a;
    --color-chat-user-bg: #6366f1;
    --color-chat-user-text: #ffffff;
    --color-chat-assistant-bg: #334155;
    --color-chat-assistant-text: #f1f5f9;
    --color-error-bg: #450a0a;
    --color-error-text: #fecaca;
}
body { background: var(--color-bg-primary); color: var(--color-text-primary); }
.panel { background: var(--color-bg-secondary); border-color: var(--color-border); }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_theme_preference_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(load_theme(&store), ThemeMode::Light);
        save_theme(&store, ThemeMode::Dark);
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
        assert_eq!(load_theme(&store), ThemeMode::Dark);
    }

    #[test]
    fn test_unknown_theme_falls_back_to_light() {
        let store = MemoryStore::new();
        store.set(THEME_KEY, "\"dark\"").unwrap();
        assert_eq!(load_theme(&store), ThemeMode::Light);
    }
}

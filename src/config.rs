//! Startup configuration: environment loading and logging.

use tracing_subscriber::EnvFilter;

/// Bundled config for builds without a `.env` file (mobile, web)
const BUNDLED_CONFIG: &str = include_str!("../assets/config.env");

const DEFAULT_LOG_FILTER: &str = "atelier=info";

#[cfg(not(target_arch = "wasm32"))]
pub fn load_dotenv() {
    // First try to load from .env file (desktop dev)
    if dotenvy::dotenv().is_ok() {
        return;
    }

    // Fall back to bundled config
    load_bundled_config();
}

#[cfg(target_arch = "wasm32")]
pub fn load_dotenv() {
    load_bundled_config();
}

fn load_bundled_config() {
    for (key, value) in parse_config(BUNDLED_CONFIG) {
        // Only set if not already set (allow env override)
        if std::env::var(key).is_err() {
            // SAFETY: We're setting env vars at startup before any threads are spawned
            unsafe {
                std::env::set_var(key, value);
            }
        }
    }
}

/// `KEY=VALUE` lines; blank lines and `#` comments are skipped.
fn parse_config(source: &str) -> impl Iterator<Item = (&str, &str)> {
    source.lines().filter_map(|line| {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        let (key, value) = line.split_once('=')?;
        Some((key.trim(), value.trim()))
    })
}

/// Installs the global fmt subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_skips_comments_and_blanks() {
        let source = "# comment\n\nGEMINI_CHAT_MODEL = gemini-2.5-flash\nBROKEN\n  RUST_LOG=debug  \n";
        let pairs: Vec<_> = parse_config(source).collect();
        assert_eq!(
            pairs,
            vec![("GEMINI_CHAT_MODEL", "gemini-2.5-flash"), ("RUST_LOG", "debug")]
        );
    }

    #[test]
    fn test_bundled_config_parses() {
        assert!(
            parse_config(BUNDLED_CONFIG).any(|(key, _)| key == "GEMINI_IMAGE_MODEL")
        );
    }
}

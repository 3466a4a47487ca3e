use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Passed explicitly into the services that need it — there is no
/// process-global settings store.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    /// Directory holding the per-locale Word templates.
    pub templates_dir: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            templates_dir: std::env::var("TEMPLATES_DIR")
                .unwrap_or_else(|_| "templates".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Full path of the template for `locale`.
    pub fn template_path(&self, locale: crate::locale::Locale) -> std::path::PathBuf {
        std::path::Path::new(&self.templates_dir).join(locale.template_file())
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

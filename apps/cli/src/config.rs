use std::{collections::HashMap, fs};

use anyhow::{bail, Context};
use url::Url;

#[derive(Debug)]
pub struct Settings {
    pub api_base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000".into(),
        }
    }
}

/// Layered lookup for the seminar service address: built-in default, then
/// `seminars.toml`, then `SEMINARS_API_URL`, then the `--server-url` flag.
pub fn load_settings(flag_url: Option<String>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("seminars.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("api_base_url") {
                settings.api_base_url = v.clone();
            }
        }
    }

    if let Ok(v) = std::env::var("SEMINARS_API_URL") {
        settings.api_base_url = v;
    }

    if let Some(v) = flag_url {
        settings.api_base_url = v;
    }

    validate_base_url(&settings.api_base_url)?;
    Ok(settings)
}

fn validate_base_url(raw: &str) -> anyhow::Result<()> {
    let url = Url::parse(raw).with_context(|| format!("invalid server url '{raw}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("server url '{raw}' must use http or https");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_service() {
        assert_eq!(Settings::default().api_base_url, "http://localhost:3000");
    }

    #[test]
    fn flag_takes_precedence() {
        let settings =
            load_settings(Some("http://example.com:8080".to_string())).expect("settings");
        assert_eq!(settings.api_base_url, "http://example.com:8080");
    }

    #[test]
    fn rejects_non_http_schemes() {
        assert!(load_settings(Some("ftp://example.com".to_string())).is_err());
    }

    #[test]
    fn rejects_unparseable_urls() {
        assert!(load_settings(Some("not a url".to_string())).is_err());
    }
}

//! Layered configuration.
//!
//! Uses Figment to merge built-in defaults, `docsearch.toml` in the working
//! directory, the per-user `docsearch/config.toml`, and `DOCSEARCH_*`
//! environment variables, in increasing order of precedence.

use anyhow::{Result, anyhow};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::PathBuf;

/// Config file looked up in the current working directory.
pub const LOCAL_CONFIG: &str = "docsearch.toml";

/// Prefix for environment overrides, e.g. `DOCSEARCH_DOCS_ROOT`.
pub const ENV_PREFIX: &str = "DOCSEARCH_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Directory holding one `<version>/search_index.js` per snapshot.
    pub docs_root: PathBuf,
    /// Snapshot searched when none is named explicitly.
    pub default_version: Option<String>,
    /// Default number of hits shown.
    pub limit: usize,
    /// Number of parsed snapshots kept in memory.
    pub cache_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            docs_root: PathBuf::from("docs"),
            default_version: None,
            limit: 10,
            cache_size: 8,
        }
    }
}

impl Settings {
    /// The full provider stack used by [`Settings::load`].
    pub fn figment() -> Figment {
        let mut figment =
            Figment::from(Serialized::defaults(Self::default())).merge(Toml::file(LOCAL_CONFIG));
        if let Some(dir) = dirs::config_dir() {
            figment = figment.merge(Toml::file(dir.join("docsearch").join("config.toml")));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn load() -> Result<Self> {
        Self::from_figment(&Self::figment())
    }

    /// Extract and validate settings from an arbitrary provider stack.
    pub fn from_figment(figment: &Figment) -> Result<Self> {
        let mut settings: Self = figment
            .extract()
            .map_err(|e| anyhow!("Invalid configuration: {}", e))?;

        if settings.cache_size == 0 {
            anyhow::bail!("Invalid configuration: cache_size must be at least 1");
        }
        if settings.limit == 0 {
            anyhow::bail!("Invalid configuration: limit must be at least 1");
        }

        let expanded = expand_tilde(&settings.docs_root.to_string_lossy()).into_owned();
        settings.docs_root = PathBuf::from(expanded);

        tracing::debug!("Resolved settings: {:?}", settings);
        Ok(settings)
    }
}

/// Expands tilde (`~`) in a path to the user's home directory.
///
/// - `~/foo` becomes `/home/user/foo`
/// - `~` becomes `/home/user`
/// - Other paths are returned unchanged
pub fn expand_tilde(path: &str) -> Cow<'_, str> {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return Cow::Owned(home.join(stripped).display().to_string());
        }
    } else if path == "~"
        && let Some(home) = dirs::home_dir()
    {
        return Cow::Owned(home.display().to_string());
    }
    Cow::Borrowed(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};

    fn from_toml(toml: &str) -> Result<Settings> {
        let figment = Figment::from(Serialized::defaults(Settings::default())).merge(Toml::string(toml));
        Settings::from_figment(&figment)
    }

    #[test]
    fn test_defaults() {
        let_assert!(Ok(settings) = from_toml(""));
        check!(settings == Settings::default());
    }

    #[test]
    fn test_toml_overrides() {
        let_assert!(
            Ok(settings) = from_toml(
                r#"
                docs_root = "/srv/docs"
                default_version = "latest"
                limit = 3
                "#
            )
        );
        check!(settings.docs_root == PathBuf::from("/srv/docs"));
        check!(settings.default_version.as_deref() == Some("latest"));
        check!(settings.limit == 3);
        check!(settings.cache_size == 8);
    }

    #[test]
    fn test_zero_cache_rejected() {
        let_assert!(Err(error) = from_toml("cache_size = 0"));
        check!(error.to_string().contains("cache_size"));
    }

    #[test]
    fn test_wrong_type_rejected() {
        check!(from_toml("limit = \"many\"").is_err());
    }

    #[test]
    fn test_expand_tilde_passthrough() {
        check!(expand_tilde("/abs/path") == "/abs/path");
        check!(expand_tilde("relative") == "relative");
    }
}

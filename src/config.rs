//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! overridden by the user's `config.toml` in the site directory.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [api]
//! endpoint = "https://spacetraveling.cdn.prismic.io/api/v2"
//! # access_token = "..."      # Read token for private repositories
//! document_type = "post"
//! page_size = 1               # Posts per listing page
//! paths_page_size = 100       # Page size used to enumerate every post
//! timeout_secs = 30
//!
//! [site]
//! title = "spaceTraveling"
//! logo = "/images/logo.svg"
//! locale = "pt_BR"
//! date_format = "%d %b %Y"
//! edited_format = "*editado em %d %b %Y, às %H:%M"
//! load_more_label = "Carregar mais posts"
//! prev_label = "Post anterior"
//! next_label = "Próximo post"
//!
//! [reading]
//! words_per_minute = 200
//!
//! [comments]
//! enabled = true
//! repo = "justin1508/spaceTraveling"
//! issue_term = "pathname"
//! label = "Comment"
//! theme = "dark-blue"
//!
//! [colors.light]
//! background = "#ffffff"
//! # ...
//!
//! [processing]
//! max_processes = 4         # Parallel detail fetches (omit for auto = CPU cores)
//! ```
//!
//! Config files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early.

use chrono::Locale;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Content API connection and query settings.
    pub api: ApiConfig,
    /// Site identity and display strings.
    pub site: SiteInfo,
    /// Reading time estimation.
    pub reading: ReadingConfig,
    /// Comment widget embedded on post pages.
    pub comments: CommentsConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
    /// Parallel fetch settings.
    pub processing: ProcessingConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.endpoint.trim().is_empty() {
            return Err(ConfigError::Validation(
                "api.endpoint must not be empty".into(),
            ));
        }
        if self.api.document_type.trim().is_empty() {
            return Err(ConfigError::Validation(
                "api.document_type must not be empty".into(),
            ));
        }
        for (key, size) in [
            ("api.page_size", self.api.page_size),
            ("api.paths_page_size", self.api.paths_page_size),
        ] {
            if !(1..=100).contains(&size) {
                return Err(ConfigError::Validation(format!("{key} must be 1-100")));
            }
        }
        if self.reading.words_per_minute == 0 {
            return Err(ConfigError::Validation(
                "reading.words_per_minute must be greater than zero".into(),
            ));
        }
        self.site.locale()?;
        if self.comments.enabled && !is_repo_slug(&self.comments.repo) {
            return Err(ConfigError::Validation(format!(
                "comments.repo must look like owner/name, got {:?}",
                self.comments.repo
            )));
        }
        Ok(())
    }
}

fn is_repo_slug(repo: &str) -> bool {
    match repo.split_once('/') {
        Some((owner, name)) => !owner.is_empty() && !name.is_empty() && !name.contains('/'),
        None => false,
    }
}

/// Content API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    /// API root, e.g. `https://<repo>.cdn.prismic.io/api/v2`.
    pub endpoint: String,
    /// Read token for private repositories.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// Custom type holding blog posts.
    pub document_type: String,
    /// Posts per listing page (1-100).
    pub page_size: u32,
    /// Page size used when enumerating every post (1-100).
    pub paths_page_size: u32,
    /// Per-request timeout.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://spacetraveling.cdn.prismic.io/api/v2".to_string(),
            access_token: None,
            document_type: "post".to_string(),
            page_size: 1,
            paths_page_size: 100,
            timeout_secs: 30,
        }
    }
}

/// Site identity and user-facing labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    /// Appended to every page title: `Post | spaceTraveling`.
    pub title: String,
    /// Logo image shown in the header, linking home.
    pub logo: String,
    /// Locale used for month names in dates (e.g. `pt_BR`, `en_US`).
    pub locale: String,
    /// strftime pattern for publication dates.
    pub date_format: String,
    /// strftime pattern for the "edited" notice on post pages.
    pub edited_format: String,
    pub load_more_label: String,
    pub prev_label: String,
    pub next_label: String,
}

impl SiteInfo {
    /// Resolve the configured locale name.
    pub fn locale(&self) -> Result<Locale, ConfigError> {
        Locale::try_from(self.locale.as_str())
            .map_err(|_| ConfigError::Validation(format!("unknown locale: {}", self.locale)))
    }
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            title: "spaceTraveling".to_string(),
            logo: "/images/logo.svg".to_string(),
            locale: "pt_BR".to_string(),
            date_format: "%d %b %Y".to_string(),
            edited_format: "*editado em %d %b %Y, às %H:%M".to_string(),
            load_more_label: "Carregar mais posts".to_string(),
            prev_label: "Post anterior".to_string(),
            next_label: "Próximo post".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReadingConfig {
    pub words_per_minute: u32,
}

impl Default for ReadingConfig {
    fn default() -> Self {
        Self {
            words_per_minute: 200,
        }
    }
}

/// utterances comment widget settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CommentsConfig {
    pub enabled: bool,
    /// GitHub repository holding the comment issues, as `owner/name`.
    pub repo: String,
    /// How a page maps to an issue (`pathname`, `url`, `title`, ...).
    pub issue_term: String,
    /// Label applied to created issues.
    pub label: String,
    pub theme: String,
}

impl Default for CommentsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            repo: "justin1508/spaceTraveling".to_string(),
            issue_term: "pathname".to_string(),
            label: "Comment".to_string(),
            theme: "dark-blue".to_string(),
        }
    }
}

/// Parallel fetch settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of post details fetched at once.
    /// When absent or null, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Dates, authors, reading time.
    pub text_muted: String,
    pub highlight: String,
    pub link: String,
    pub link_hover: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#1a1d23".to_string(),
            text_muted: "#6b6f78".to_string(),
            highlight: "#ff57b2".to_string(),
            link: "#1a1d23".to_string(),
            link_hover: "#ff57b2".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#1a1d23".to_string(),
            text: "#f8f8f8".to_string(),
            text_muted: "#bbbbbb".to_string(),
            highlight: "#ff57b2".to_string(),
            link: "#f8f8f8".to_string(),
            link_hover: "#ff57b2".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `config.toml`.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# space-traveling configuration
# =============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Content API
# ---------------------------------------------------------------------------
[api]
# API root of the content repository.
endpoint = "https://spacetraveling.cdn.prismic.io/api/v2"

# Read token for private repositories.
# access_token = "..."

# Custom type holding the blog posts.
document_type = "post"

# Posts per listing page. Each further page is linked with "load more".
page_size = 1

# Page size used to enumerate every post when generating post pages.
paths_page_size = 100

# Per-request timeout in seconds.
timeout_secs = 30

# ---------------------------------------------------------------------------
# Site
# ---------------------------------------------------------------------------
[site]
# Appended to every page title: "My post | spaceTraveling".
title = "spaceTraveling"

# Header logo, linking to the home page. Put the file under assets/.
logo = "/images/logo.svg"

# Locale for month names in dates.
locale = "pt_BR"

# strftime patterns for publication dates and the "edited" notice.
date_format = "%d %b %Y"
edited_format = "*editado em %d %b %Y, às %H:%M"

load_more_label = "Carregar mais posts"
prev_label = "Post anterior"
next_label = "Próximo post"

# ---------------------------------------------------------------------------
# Reading time
# ---------------------------------------------------------------------------
[reading]
words_per_minute = 200

# ---------------------------------------------------------------------------
# Comments (utterances, backed by GitHub issues)
# ---------------------------------------------------------------------------
[comments]
enabled = true
repo = "justin1508/spaceTraveling"
issue_term = "pathname"
label = "Comment"
theme = "dark-blue"

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
text = "#1a1d23"
text_muted = "#6b6f78"    # Dates, authors, reading time
highlight = "#ff57b2"
link = "#1a1d23"
link_hover = "#ff57b2"

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#1a1d23"
text = "#f8f8f8"
text_muted = "#bbbbbb"
highlight = "#ff57b2"
link = "#f8f8f8"
link_hover = "#ff57b2"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum post details fetched in parallel.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {light_bg};
    --color-text: {light_text};
    --color-text-muted: {light_text_muted};
    --color-highlight: {light_highlight};
    --color-link: {light_link};
    --color-link-hover: {light_link_hover};
}}

@media (prefers-color-scheme: dark) {{
    :root {{
        --color-bg: {dark_bg};
        --color-text: {dark_text};
        --color-text-muted: {dark_text_muted};
        --color-highlight: {dark_highlight};
        --color-link: {dark_link};
        --color-link-hover: {dark_link_hover};
    }}
}}"#,
        light_bg = colors.light.background,
        light_text = colors.light.text,
        light_text_muted = colors.light.text_muted,
        light_highlight = colors.light.highlight,
        light_link = colors.light.link,
        light_link_hover = colors.light.link_hover,
        dark_bg = colors.dark.background,
        dark_text = colors.dark.text,
        dark_text_muted = colors.dark.text_muted,
        dark_highlight = colors.dark.highlight,
        dark_link = colors.dark.link,
        dark_link_hover = colors.dark.link_hover,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_matches_blog_defaults() {
        let config = SiteConfig::default();
        assert_eq!(config.api.document_type, "post");
        assert_eq!(config.api.page_size, 1);
        assert_eq!(config.api.paths_page_size, 100);
        assert_eq!(config.site.title, "spaceTraveling");
        assert_eq!(config.reading.words_per_minute, 200);
        assert_eq!(config.comments.theme, "dark-blue");
        assert_eq!(config.comments.issue_term, "pathname");
    }

    #[test]
    fn validate_default_config_passes() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[api]
page_size = 5
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.api.page_size, 5);
        // Defaults preserved
        assert_eq!(config.api.paths_page_size, 100);
        assert_eq!(config.site.locale, "pt_BR");
    }

    #[test]
    fn access_token_is_optional() {
        let config = SiteConfig::default();
        assert!(config.api.access_token.is_none());

        let config: SiteConfig = toml::from_str("[api]\naccess_token = \"abc\"\n").unwrap();
        assert_eq!(config.api.access_token.as_deref(), Some("abc"));
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn validate_page_size_bounds() {
        let mut config = SiteConfig::default();
        config.api.page_size = 0;
        assert!(config.validate().is_err());

        config.api.page_size = 101;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("api.page_size"));

        config.api.page_size = 100;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_paths_page_size_bounds() {
        let mut config = SiteConfig::default();
        config.api.paths_page_size = 500;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("paths_page_size"));
    }

    #[test]
    fn validate_words_per_minute_zero() {
        let mut config = SiteConfig::default();
        config.reading.words_per_minute = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_unknown_locale() {
        let mut config = SiteConfig::default();
        config.site.locale = "xx_YY".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("locale"));
    }

    #[test]
    fn validate_other_known_locale() {
        let mut config = SiteConfig::default();
        config.site.locale = "en_US".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_comment_repo_shape() {
        let mut config = SiteConfig::default();
        config.comments.repo = "not-a-repo".to_string();
        assert!(config.validate().is_err());

        config.comments.repo = "owner/".to_string();
        assert!(config.validate().is_err());

        config.comments.repo = "a/b/c".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn disabled_comments_skip_repo_check() {
        let mut config = SiteConfig::default();
        config.comments.enabled = false;
        config.comments.repo = String::new();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_empty_endpoint() {
        let mut config = SiteConfig::default();
        config.api.endpoint = "  ".to_string();
        assert!(config.validate().is_err());
    }

    // =========================================================================
    // Loading
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.site.title, "spaceTraveling");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[site]
title = "Travel Notes"

[comments]
theme = "github-light"
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.site.title, "Travel Notes");
        assert_eq!(config.comments.theme, "github-light");
        assert_eq!(config.comments.label, "Comment");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "this is not valid toml [[[").unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[api]\npage_size = 0\n").unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn unknown_key_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[api]\npagesize = 3\n");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_section_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[apis]\npage_size = 3\n");
        assert!(result.is_err());
    }

    // =========================================================================
    // merge_toml
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("page_size = 1").unwrap();
        let overlay: toml::Value = toml::from_str("page_size = 10").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("page_size").unwrap().as_integer(), Some(10));
    }

    #[test]
    fn merge_toml_deep_nested() {
        let base: toml::Value = toml::from_str(
            r##"
[colors.light]
background = "#fff"
text = "#000"
"##,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r##"
[colors.light]
background = "#fafafa"
"##,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let light = merged.get("colors").unwrap().get("light").unwrap();
        assert_eq!(light.get("background").unwrap().as_str(), Some("#fafafa"));
        assert_eq!(light.get("text").unwrap().as_str(), Some("#000"));
    }

    #[test]
    fn resolve_config_with_overlay() {
        let overlay: toml::Value = toml::from_str("[reading]\nwords_per_minute = 250\n").unwrap();
        let config = resolve_config(stock_defaults_value(), Some(overlay)).unwrap();
        assert_eq!(config.reading.words_per_minute, 250);
        assert_eq!(config.api.page_size, 1);
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let val = stock_defaults_value();
        for section in ["api", "site", "reading", "comments", "colors", "processing"] {
            assert!(val.get(section).is_some(), "missing section {section}");
        }
    }

    // =========================================================================
    // stock_config_toml
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(config.api.endpoint, defaults.api.endpoint);
        assert_eq!(config.api.page_size, defaults.api.page_size);
        assert_eq!(config.site.next_label, defaults.site.next_label);
        assert_eq!(config.site.edited_format, defaults.site.edited_format);
        assert_eq!(config.comments.repo, defaults.comments.repo);
        assert_eq!(config.colors.dark.background, defaults.colors.dark.background);
        assert!(config.validate().is_ok());
    }

    // =========================================================================
    // CSS + threads
    // =========================================================================

    #[test]
    fn generate_css_uses_config_colors() {
        let mut colors = ColorConfig::default();
        colors.light.background = "#f0f0f0".to_string();
        colors.dark.highlight = "#00ff00".to_string();

        let css = generate_color_css(&colors);
        assert!(css.contains("--color-bg: #f0f0f0"));
        assert!(css.contains("--color-highlight: #00ff00"));
        assert!(css.contains("@media (prefers-color-scheme: dark)"));
    }

    #[test]
    fn effective_threads_user_constrains_down() {
        let config = ProcessingConfig {
            max_processes: Some(1),
        };
        assert_eq!(effective_threads(&config), 1);
    }

    #[test]
    fn effective_threads_zero_means_one() {
        let config = ProcessingConfig {
            max_processes: Some(0),
        };
        assert_eq!(effective_threads(&config), 1);
    }
}

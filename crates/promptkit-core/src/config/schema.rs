//! Configuration schema.
//!
//! Hierarchy: `Config` → `TemplateConfig`, `MediaConfig`.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.

use serde::{Deserialize, Serialize};

use crate::media::DEFAULT_IMAGE_MIME;
use crate::template::{RenderOptions, SubstitutionMode};

/// Root configuration — loaded from `~/.promptkit/config.json` + env vars.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub template: TemplateConfig,
    pub media: MediaConfig,
}

// ─────────────────────────────────────────────
// Templates
// ─────────────────────────────────────────────

/// Template rendering defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateConfig {
    /// How bindings are applied.
    pub mode: SubstitutionMode,
    /// Fail on placeholders left unbound.
    pub strict: bool,
    /// Drop `///` comment lines before rendering.
    pub strip_comments: bool,
    /// Directory searched for templates referenced by name.
    pub template_dir: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            mode: SubstitutionMode::Simultaneous,
            strict: false,
            strip_comments: true,
            template_dir: "~/.promptkit/templates".to_string(),
        }
    }
}

impl TemplateConfig {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            mode: self.mode,
            strict: self.strict,
            strip_comments: self.strip_comments,
        }
    }
}

// ─────────────────────────────────────────────
// Media
// ─────────────────────────────────────────────

/// Media encoding defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaConfig {
    /// MIME type used when the extension is not recognised.
    pub fallback_mime: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            fallback_mime: DEFAULT_IMAGE_MIME.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.template.mode, SubstitutionMode::Simultaneous);
        assert!(!config.template.strict);
        assert!(config.template.strip_comments);
        assert_eq!(config.media.fallback_mime, "image/jpeg");
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{"template": {"strict": true}}"#).unwrap();
        assert!(config.template.strict);
        assert!(config.template.strip_comments);
        assert_eq!(config.template.template_dir, "~/.promptkit/templates");
    }

    #[test]
    fn test_camel_case_keys() {
        let raw = serde_json::to_value(Config::default()).unwrap();
        assert!(raw["template"].get("stripComments").is_some());
        assert!(raw["template"].get("templateDir").is_some());
        assert!(raw["media"].get("fallbackMime").is_some());
        assert_eq!(raw["template"]["mode"], "simultaneous");
    }

    #[test]
    fn test_render_options() {
        let tc = TemplateConfig {
            mode: SubstitutionMode::Sequential,
            strict: true,
            strip_comments: false,
            ..TemplateConfig::default()
        };
        let opts = tc.render_options();
        assert_eq!(opts.mode, SubstitutionMode::Sequential);
        assert!(opts.strict);
        assert!(!opts.strip_comments);
    }
}

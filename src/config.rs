//! Page configuration.
//!
//! Defaults reproduce the stock CV page. A page can override any subset by
//! embedding `<script type="application/json" id="cv-config">…</script>`;
//! missing keys keep their defaults.

use serde::{Deserialize, Serialize};

use crate::effects::HoverConfig;
use crate::error::Result;
use crate::form::FormConfig;
use crate::nav::NavConfig;
use crate::scroll::ScrollConfig;
use crate::typewriter::TypewriterConfig;

/// Id of the element holding the JSON override.
pub const CONFIG_ELEMENT_ID: &str = "cv-config";

/// CSS selectors used to capture the page elements at startup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub header: String,
    pub nav_links: String,
    pub sections: String,
    pub year: String,
    pub contact_form: String,
    pub submit: String,
    pub errors: String,
    pub hero_title: String,
    pub hover_targets: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            header: "#site-header".into(),
            nav_links: ".nav-link".into(),
            sections: "section[id]".into(),
            year: "#year".into(),
            contact_form: "#contact-form".into(),
            submit: "button[type=\"submit\"]".into(),
            errors: ".error".into(),
            hero_title: ".hero-title".into(),
            hover_targets: ".btn, .nav-link, .tag, .project-card".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub selectors: Selectors,
    pub scroll: ScrollConfig,
    pub nav: NavConfig,
    pub form: FormConfig,
    pub typewriter: TypewriterConfig,
    pub hover: HoverConfig,
    /// Print the banner and publish the console namespaces.
    pub console: bool,
    /// Minimum level forwarded to the browser console (`error` … `trace`).
    pub log_level: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            selectors: Selectors::default(),
            scroll: ScrollConfig::default(),
            nav: NavConfig::default(),
            form: FormConfig::default(),
            typewriter: TypewriterConfig::default(),
            hover: HoverConfig::default(),
            console: true,
            log_level: "info".into(),
        }
    }
}

impl PageConfig {
    /// Parse an override document; blank input yields the defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(json)?)
    }

    /// Problems that do not stop startup but disable or degrade a feature.
    pub fn warnings(&self) -> Vec<String> {
        let mut out = Vec::new();
        if let Some(accent) = self.typewriter.accent {
            if accent >= self.typewriter.segments.len() {
                out.push(format!(
                    "typewriter accent index {accent} is out of range ({} segments)",
                    self.typewriter.segments.len()
                ));
            }
        }
        if self.typewriter.enabled && self.typewriter.segments.is_empty() {
            out.push("typewriter enabled without segments".to_owned());
        }
        if self.log_level.parse::<tracing::Level>().is_err() {
            out.push(format!("unknown log level {:?}, using info", self.log_level));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_blank_document_means_defaults() {
        assert_eq!(PageConfig::from_json("").unwrap(), PageConfig::default());
        assert_eq!(PageConfig::from_json("  \n").unwrap(), PageConfig::default());
        assert_eq!(PageConfig::from_json("{}").unwrap(), PageConfig::default());
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let cfg = PageConfig::from_json(
            r#"{"scroll": {"threshold": 60}, "typewriter": {"enabled": false}, "log_level": "debug"}"#,
        )
        .unwrap();
        assert_eq!(cfg.scroll.threshold, 60.0);
        assert_eq!(cfg.scroll.elevated, crate::scroll::HeaderStyle::elevated());
        assert!(!cfg.typewriter.enabled);
        assert_eq!(cfg.typewriter.segments.len(), 3);
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.form, FormConfig::default());
        assert!(cfg.warnings().is_empty());
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        assert!(PageConfig::from_json("{\"scroll\": ").is_err());
        assert!(PageConfig::from_json("{\"form\": {\"success_ms\": \"soon\"}}").is_err());
    }

    #[test]
    fn test_warnings() {
        let mut cfg = PageConfig::default();
        cfg.typewriter.accent = Some(7);
        cfg.log_level = "loud".into();
        let warnings = cfg.warnings();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("accent index 7"));
    }
}

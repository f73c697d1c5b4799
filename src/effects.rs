//! Small cosmetic reactors: hover lift, keyboard shortcuts, footer year.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoverConfig {
    pub transition: String,
    pub raised: String,
    pub rest: String,
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            transition: "transform 0.2s ease-out".into(),
            raised: "translateY(-2px)".into(),
            rest: "translateY(0)".into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hover {
    Enter,
    Leave,
}

impl Hover {
    pub fn from_event(kind: &str) -> Option<Self> {
        match kind {
            "mouseenter" => Some(Hover::Enter),
            "mouseleave" => Some(Hover::Leave),
            _ => None,
        }
    }
}

/// Inline style changes for one hover transition. `transition` is only set
/// on enter; leave keeps whatever enter left behind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HoverStyle<'a> {
    pub transition: Option<&'a str>,
    pub transform: &'a str,
}

impl HoverConfig {
    pub fn style_for(&self, hover: Hover) -> HoverStyle<'_> {
        match hover {
            Hover::Enter => HoverStyle {
                transition: Some(&self.transition),
                transform: &self.raised,
            },
            Hover::Leave => HoverStyle {
                transition: None,
                transform: &self.rest,
            },
        }
    }
}

/// Page-wide keyboard shortcuts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    /// Escape: clear form errors and reset the form.
    DismissForm,
    /// Enter inside a single-line input: submit the enclosing form.
    SubmitForm,
}

impl KeyCommand {
    /// `target_tag` is the tag name of the focused element, if any.
    pub fn from_key(key: &str, target_tag: Option<&str>) -> Option<Self> {
        match key {
            "Escape" => Some(KeyCommand::DismissForm),
            "Enter" if target_tag.is_some_and(|t| t.eq_ignore_ascii_case("input")) => {
                Some(KeyCommand::SubmitForm)
            }
            _ => None,
        }
    }
}

pub fn year_stamp(year: u32) -> String {
    year.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_commands() {
        assert_eq!(KeyCommand::from_key("Escape", None), Some(KeyCommand::DismissForm));
        assert_eq!(KeyCommand::from_key("Escape", Some("TEXTAREA")), Some(KeyCommand::DismissForm));
        assert_eq!(KeyCommand::from_key("Enter", Some("INPUT")), Some(KeyCommand::SubmitForm));
        assert_eq!(KeyCommand::from_key("Enter", Some("input")), Some(KeyCommand::SubmitForm));
        assert_eq!(KeyCommand::from_key("Enter", Some("TEXTAREA")), None);
        assert_eq!(KeyCommand::from_key("Enter", None), None);
        assert_eq!(KeyCommand::from_key("a", Some("INPUT")), None);
    }

    #[test]
    fn test_hover_styles() {
        let cfg = HoverConfig::default();
        let enter = cfg.style_for(Hover::Enter);
        assert_eq!(enter.transition, Some("transform 0.2s ease-out"));
        assert_eq!(enter.transform, "translateY(-2px)");
        let leave = cfg.style_for(Hover::Leave);
        assert_eq!(leave.transition, None);
        assert_eq!(leave.transform, "translateY(0)");
        assert_eq!(Hover::from_event("mouseenter"), Some(Hover::Enter));
        assert_eq!(Hover::from_event("click"), None);
    }

    #[test]
    fn test_year_stamp() {
        assert_eq!(year_stamp(2026), "2026");
    }
}

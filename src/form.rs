//! Contact form validation.
//!
//! Submission never leaves the page: the validator clears previous errors,
//! runs all three field checks, and either reports every failing field or
//! flashes a success state on the submit control and clears the form.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::schedule::Scheduler;

// --- Fields & validators -----------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    /// Form control name.
    pub fn name(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Message => "message",
        }
    }

    /// Id of the element that displays this field's error.
    pub fn error_slot(self) -> &'static str {
        match self {
            Field::Name => "name-error",
            Field::Email => "email-error",
            Field::Message => "message-error",
        }
    }

    pub fn error_message(self) -> &'static str {
        match self {
            Field::Name => "Name must be at least 2 characters long",
            Field::Email => "Please enter a valid email address",
            Field::Message => "Message must be at least 10 characters long",
        }
    }

    pub fn is_valid(self, value: Option<&str>) -> bool {
        match self {
            Field::Name => is_valid_name(value),
            Field::Email => is_valid_email(value),
            Field::Message => is_valid_message(value),
        }
    }
}

const MIN_NAME_CHARS: usize = 2;
const MIN_MESSAGE_CHARS: usize = 10;

/// Whitespace as the browser's `\s` and `String.prototype.trim` see it:
/// Unicode `White_Space` plus U+FEFF, minus U+0085.
pub fn is_js_space(c: char) -> bool {
    match c {
        '\u{FEFF}' => true,
        '\u{85}' => false,
        _ => c.is_whitespace(),
    }
}

fn trimmed_len(value: &str) -> usize {
    value.trim_matches(is_js_space).chars().count()
}

pub fn is_valid_name(value: Option<&str>) -> bool {
    value.is_some_and(|v| trimmed_len(v) >= MIN_NAME_CHARS)
}

pub fn is_valid_message(value: Option<&str>) -> bool {
    value.is_some_and(|v| trimmed_len(v) >= MIN_MESSAGE_CHARS)
}

/// `local@domain.tld` shape: a non-empty local part, a single `@`, and a
/// domain holding a `.` with at least one character on each side. No
/// whitespace anywhere.
pub fn is_valid_email(value: Option<&str>) -> bool {
    let Some(value) = value else {
        return false;
    };
    if value.chars().any(is_js_space) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(idx, c)| c == '.' && idx > 0 && idx + 1 < domain.len())
}

// --- Submission ----------------------------------------------------------------

/// Raw values of one submit attempt. `None` means the control is missing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormValues {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

impl FormValues {
    pub fn new(name: &str, email: &str, message: &str) -> Self {
        Self {
            name: Some(name.to_owned()),
            email: Some(email.to_owned()),
            message: Some(message.to_owned()),
        }
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => self.name.as_deref(),
            Field::Email => self.email.as_deref(),
            Field::Message => self.message.as_deref(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

/// Run every validator; failures accumulate in field order.
pub fn validate(values: &FormValues) -> Vec<FieldError> {
    Field::ALL
        .into_iter()
        .filter(|f| !f.is_valid(values.get(*f)))
        .map(|field| FieldError {
            field,
            message: field.error_message(),
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Colour applied to a displayed error message.
    pub error_color: String,
    /// Label shown on the submit control after a successful submission.
    pub success_label: String,
    /// Background and border colour of the submit control while successful.
    pub success_color: String,
    /// How long the success state stays before the control reverts.
    pub success_ms: u32,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            error_color: "#ff6b6b".into(),
            success_label: "Message Sent! ✓".into(),
            success_color: "#4CAF50".into(),
            success_ms: 3000,
        }
    }
}

/// DOM side of the form.
pub trait FormSink {
    /// Empty every error slot and drop its alert styling.
    fn clear_errors(&mut self);
    fn show_error(&mut self, slot: &str, message: &str, color: &str);
    /// Clear all form controls.
    fn reset_fields(&mut self);
    fn show_success(&mut self, label: &str, color: &str);
    /// Put the submit control back to the label and style it had at startup.
    fn restore_submit(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Submitting,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted,
    Rejected(Vec<FieldError>),
}

pub struct FormValidator<S> {
    sink: Rc<RefCell<S>>,
    scheduler: Rc<dyn Scheduler>,
    config: Rc<FormConfig>,
    phase: Cell<FormPhase>,
    // bumped on every success so only the latest revert timer restores the control
    success_generation: Rc<Cell<u64>>,
    // success label showing and not yet reverted
    flash_pending: Rc<Cell<bool>>,
}

impl<S: FormSink + 'static> FormValidator<S> {
    pub fn new(sink: Rc<RefCell<S>>, scheduler: Rc<dyn Scheduler>, config: Rc<FormConfig>) -> Self {
        Self {
            sink,
            scheduler,
            config,
            phase: Cell::new(FormPhase::Idle),
            success_generation: Rc::new(Cell::new(0)),
            flash_pending: Rc::new(Cell::new(false)),
        }
    }

    pub fn phase(&self) -> FormPhase {
        self.phase.get()
    }

    pub fn sink(&self) -> &Rc<RefCell<S>> {
        &self.sink
    }

    pub fn submit(&self, values: &FormValues) -> SubmitOutcome {
        self.phase.set(FormPhase::Submitting);
        self.sink.borrow_mut().clear_errors();
        let errors = validate(values);
        let outcome = if errors.is_empty() {
            self.accept();
            SubmitOutcome::Accepted
        } else {
            let mut sink = self.sink.borrow_mut();
            for err in &errors {
                sink.show_error(err.field.error_slot(), err.message, &self.config.error_color);
            }
            debug!(failed = errors.len(), "contact form rejected");
            SubmitOutcome::Rejected(errors)
        };
        self.phase.set(FormPhase::Idle);
        outcome
    }

    fn accept(&self) {
        {
            let mut sink = self.sink.borrow_mut();
            sink.show_success(&self.config.success_label, &self.config.success_color);
            sink.reset_fields();
        }
        let generation = self.success_generation.get() + 1;
        self.success_generation.set(generation);
        self.flash_pending.set(true);
        let current = self.success_generation.clone();
        let pending = self.flash_pending.clone();
        let sink = self.sink.clone();
        self.scheduler.after(
            self.config.success_ms,
            Box::new(move || {
                if current.get() == generation {
                    pending.set(false);
                    sink.borrow_mut().restore_submit();
                }
            }),
        );
        debug!("contact form accepted");
    }

    /// Escape shortcut: drop errors and clear the form.
    pub fn dismiss(&self) {
        let mut sink = self.sink.borrow_mut();
        sink.clear_errors();
        sink.reset_fields();
    }

    pub fn is_flashing(&self) -> bool {
        self.flash_pending.get()
    }

    /// Revert a success flash right away and orphan its timer. Called when
    /// the page is torn down before the timer can fire.
    pub fn detach(&self) {
        if !self.flash_pending.replace(false) {
            return;
        }
        self.success_generation.set(self.success_generation.get() + 1);
        self.sink.borrow_mut().restore_submit();
        debug!("success flash cut short");
    }

    pub fn show_error(&self, slot: &str, message: &str) {
        self.sink
            .borrow_mut()
            .show_error(slot, message, &self.config.error_color);
    }

    pub fn clear_errors(&self) {
        self.sink.borrow_mut().clear_errors();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_rules() {
        for bad in [None, Some(""), Some("a"), Some("  a  "), Some("   ")] {
            assert!(!is_valid_name(bad), "{bad:?} should be rejected");
        }
        for good in ["Al", "  Al  ", "Zoë", "李雷"] {
            assert!(is_valid_name(Some(good)), "{good:?} should be accepted");
        }
    }

    #[test]
    fn test_email_rules() {
        for bad in [
            "", "a@b", "a.com", "a @b.com", "@b.com", "a@.com", "a@b.", "a@b@c.com", "a@b.com ",
        ] {
            assert!(!is_valid_email(Some(bad)), "{bad:?} should be rejected");
        }
        assert!(!is_valid_email(None));
        for good in ["a@b.com", "a.b@c.co", "first.last@sub.example.org", "x@y.z", "a@.b.c"] {
            assert!(is_valid_email(Some(good)), "{good:?} should be accepted");
        }
    }

    #[test]
    fn test_whitespace_follows_browser_rules() {
        assert!(is_js_space('\u{FEFF}'));
        assert!(!is_js_space('\u{85}'));
        assert!(is_js_space('\u{3000}'));
        assert!(!is_valid_email(Some("a\u{FEFF}@b.com")));
        assert!(is_valid_email(Some("a\u{85}@b.com")));
        assert!(!is_valid_name(Some("A\u{FEFF}")));
        assert!(is_valid_name(Some("A\u{85}")));
    }

    #[test]
    fn test_message_rules() {
        assert!(!is_valid_message(None));
        assert!(!is_valid_message(Some("123456789")));
        assert!(!is_valid_message(Some("   123456789   ")));
        assert!(is_valid_message(Some("1234567890")));
        assert!(is_valid_message(Some("  1234567890  ")));
    }

    #[test]
    fn test_validation_is_cumulative() {
        let errors = validate(&FormValues::default());
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, Field::ALL.to_vec());

        let errors = validate(&FormValues::new("Al", "bad", "short"));
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec![Field::Email, Field::Message]);
    }
}

//! DOM implementations of the reactor sinks.

use tracing::debug;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlFormElement};

use crate::form::FormSink;
use crate::nav::NavSink;
use crate::scroll::{HeaderSink, HeaderState, HeaderStyle};
use crate::typewriter::TitleSink;

const ACTIVE_CLASS: &str = "active";

pub(crate) fn set_style(el: &HtmlElement, property: &str, value: &str) {
    if let Err(err) = el.style().set_property(property, value) {
        debug!(property, error = ?err, "style update rejected");
    }
}

// --- Header -----------------------------------------------------------------

pub struct DomHeader {
    header: HtmlElement,
}

impl DomHeader {
    pub fn new(header: HtmlElement) -> Self {
        Self { header }
    }
}

impl HeaderSink for DomHeader {
    fn apply(&mut self, _state: HeaderState, style: &HeaderStyle) {
        set_style(&self.header, "background", &style.background);
        set_style(&self.header, "backdrop-filter", &style.backdrop_filter);
        set_style(&self.header, "box-shadow", &style.box_shadow);
    }
}

// --- Navigation ---------------------------------------------------------------

/// Nav links paired with the section id they point at.
pub struct DomNav {
    links: Vec<(String, HtmlElement)>,
}

impl DomNav {
    pub fn new(links: Vec<(String, HtmlElement)>) -> Self {
        Self { links }
    }
}

impl NavSink for DomNav {
    fn mark(&mut self, target: &str, active: bool) {
        for (_, link) in self.links.iter().filter(|(t, _)| t == target) {
            if let Err(err) = link.class_list().toggle_with_force(ACTIVE_CLASS, active) {
                debug!(section = target, error = ?err, "class toggle rejected");
            }
        }
    }
}

// --- Contact form -------------------------------------------------------------

/// Write `message` into the element with id `slot`, coloured as an alert.
pub(crate) fn show_error_in(document: &Document, slot: &str, message: &str, color: &str) {
    let Some(el) = document.get_element_by_id(slot) else {
        debug!(slot, "no error slot");
        return;
    };
    el.set_text_content(Some(message));
    if let Some(el) = el.dyn_ref::<HtmlElement>() {
        set_style(el, "color", color);
    }
}

/// Empty every element matching `selector` and drop its colour.
pub(crate) fn clear_errors_in(document: &Document, selector: &str) {
    let Ok(list) = document.query_selector_all(selector) else {
        return;
    };
    for node in (0..list.length()).filter_map(|idx| list.item(idx)) {
        node.set_text_content(Some(""));
        if let Some(el) = node.dyn_ref::<HtmlElement>() {
            set_style(el, "color", "");
        }
    }
}

pub struct DomForm {
    document: Document,
    form: HtmlFormElement,
    submit: Option<HtmlElement>,
    submit_label: String,
    error_selector: String,
}

impl DomForm {
    pub fn new(
        document: Document,
        form: HtmlFormElement,
        submit: Option<HtmlElement>,
        submit_label: String,
        error_selector: String,
    ) -> Self {
        Self { document, form, submit, submit_label, error_selector }
    }
}

impl FormSink for DomForm {
    fn clear_errors(&mut self) {
        clear_errors_in(&self.document, &self.error_selector);
    }

    fn show_error(&mut self, slot: &str, message: &str, color: &str) {
        show_error_in(&self.document, slot, message, color);
    }

    fn reset_fields(&mut self) {
        self.form.reset();
    }

    fn show_success(&mut self, label: &str, color: &str) {
        if let Some(submit) = &self.submit {
            submit.set_text_content(Some(label));
            set_style(submit, "background", color);
            set_style(submit, "border-color", color);
        }
    }

    fn restore_submit(&mut self) {
        if let Some(submit) = &self.submit {
            submit.set_text_content(Some(&self.submit_label));
            set_style(submit, "background", "");
            set_style(submit, "border-color", "");
        }
    }
}

// --- Hero title ---------------------------------------------------------------

pub struct DomTitle {
    title: Element,
}

impl DomTitle {
    pub fn new(title: Element) -> Self {
        Self { title }
    }
}

impl TitleSink for DomTitle {
    fn render(&mut self, markup: &str) {
        self.title.set_inner_html(markup);
    }
}

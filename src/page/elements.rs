//! DOM snapshot taken once at startup.

use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlFormElement, Window};

use crate::config::Selectors;

/// Contact form and the pieces of it the validator touches.
pub struct ContactForm {
    pub form: HtmlFormElement,
    pub submit: Option<HtmlElement>,
    /// Submit label as authored, restored after the success flash.
    pub submit_label: String,
}

/// Every element a reactor may bind to. Optional elements are `None` or an
/// empty list when the page does not have them.
pub struct BoundElements {
    pub window: Window,
    pub document: Document,
    pub header: Option<HtmlElement>,
    pub nav_links: Vec<HtmlElement>,
    pub sections: Vec<HtmlElement>,
    pub year: Option<Element>,
    pub contact_form: Option<ContactForm>,
    pub hero_title: Option<Element>,
    pub hover_targets: Vec<HtmlElement>,
}

impl BoundElements {
    pub fn capture(window: Window, document: Document, selectors: &Selectors) -> Self {
        let contact_form = query_one::<HtmlFormElement>(&document, &selectors.contact_form).map(|form| {
            let submit = form
                .query_selector(&selectors.submit)
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<HtmlElement>().ok());
            let submit_label = submit
                .as_ref()
                .and_then(|s| s.text_content())
                .unwrap_or_default();
            ContactForm { form, submit, submit_label }
        });
        let bound = Self {
            header: query_one(&document, &selectors.header),
            nav_links: query_all(&document, &selectors.nav_links),
            sections: query_all(&document, &selectors.sections),
            year: query_one(&document, &selectors.year),
            contact_form,
            hero_title: query_one(&document, &selectors.hero_title),
            hover_targets: query_all(&document, &selectors.hover_targets),
            window,
            document,
        };
        debug!(
            header = bound.header.is_some(),
            nav_links = bound.nav_links.len(),
            sections = bound.sections.len(),
            form = bound.contact_form.is_some(),
            hero_title = bound.hero_title.is_some(),
            hover_targets = bound.hover_targets.len(),
            "captured page elements"
        );
        bound
    }
}

fn query_one<T: JsCast>(document: &Document, selector: &str) -> Option<T> {
    match document.query_selector(selector) {
        Ok(found) => found.and_then(|el| el.dyn_into::<T>().ok()),
        Err(err) => {
            warn!(selector, error = ?err, "invalid selector");
            None
        }
    }
}

fn query_all<T: JsCast>(document: &Document, selector: &str) -> Vec<T> {
    let list = match document.query_selector_all(selector) {
        Ok(list) => list,
        Err(err) => {
            warn!(selector, error = ?err, "invalid selector");
            return Vec::new();
        }
    };
    (0..list.length())
        .filter_map(|idx| list.item(idx))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}

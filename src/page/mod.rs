//! Browser side of the page: capture the DOM once, attach every reactor,
//! stamp the footer year and publish the devtools facades.
//!
//! The running page is a singleton held in a thread-local, like any other
//! page-lifetime state in a single-threaded WASM module. `stop()` detaches
//! every listener and drops pending timers.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use tracing::{debug, info, warn};
use wasm_bindgen::JsValue;
use web_sys::{Document, Window};

mod browser;
mod elements;
mod exports;
mod reactors;
mod sinks;

pub use elements::{BoundElements, ContactForm};
pub use exports::{CvConsole, CvDebug};
pub use reactors::Reactor;

use browser::{BrowserScheduler, current_year};
use reactors::{
    FormBinding, HoverBinding, KeyboardBinding, NavBinding, ScrollBinding, SharedTracker,
    SharedValidator, TypewriterBinding,
};
use sinks::{DomForm, DomNav};

use crate::config::{CONFIG_ELEMENT_ID, PageConfig};
use crate::console::{CONSOLE_NAMESPACE, DEBUG_NAMESPACE};
use crate::effects::year_stamp;
use crate::error::{PageError, Result};
use crate::form::FormValidator;
use crate::nav::{SectionTracker, target_id};
use crate::schedule::Scheduler;

thread_local! {
    static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
    // install waiting for DOMContentLoaded; dropping it cancels the install
    static PENDING: RefCell<Option<EventListener>> = const { RefCell::new(None) };
}

/// Everything attached to the live document.
pub struct Page {
    root: BoundElements,
    scheduler: Rc<BrowserScheduler>,
    reactors: Vec<Box<dyn Reactor>>,
    tracker: SharedTracker,
    published: Vec<&'static str>,
}

impl Page {
    fn build(config: &PageConfig, root: BoundElements) -> Self {
        let scheduler = Rc::new(BrowserScheduler::new(root.window.clone()));
        let shared: Rc<dyn Scheduler> = scheduler.clone();

        let hrefs: Vec<String> = root
            .nav_links
            .iter()
            .map(|link| link.get_attribute("href").unwrap_or_default())
            .collect();
        let nav_sink = DomNav::new(
            hrefs
                .iter()
                .map(|href| target_id(href).to_owned())
                .zip(root.nav_links.iter().cloned())
                .collect(),
        );
        let tracker: SharedTracker = Rc::new(RefCell::new(SectionTracker::new(&hrefs, nav_sink)));

        let validator: Option<SharedValidator> = root.contact_form.as_ref().map(|contact| {
            let sink = DomForm::new(
                root.document.clone(),
                contact.form.clone(),
                contact.submit.clone(),
                contact.submit_label.clone(),
                config.selectors.errors.clone(),
            );
            Rc::new(FormValidator::new(
                Rc::new(RefCell::new(sink)),
                shared.clone(),
                Rc::new(config.form.clone()),
            ))
        });

        let mut reactors: Vec<Box<dyn Reactor>> = vec![
            Box::new(ScrollBinding::new(config.scroll.clone(), shared.clone())),
            Box::new(NavBinding::new(config.nav.clone(), tracker.clone())),
        ];
        if let Some(validator) = &validator {
            reactors.push(Box::new(FormBinding::new(validator.clone())));
        }
        reactors.push(Box::new(TypewriterBinding::new(config.typewriter.clone(), shared)));
        reactors.push(Box::new(HoverBinding::new(config.hover.clone())));
        reactors.push(Box::new(KeyboardBinding::new(validator, config.selectors.errors.clone())));

        Self { root, scheduler, reactors, tracker, published: Vec::new() }
    }

    fn attach_all(&mut self) {
        for reactor in &mut self.reactors {
            match reactor.attach(&self.root) {
                Ok(()) => debug!(reactor = reactor.name(), "attached"),
                Err(err) => warn!(reactor = reactor.name(), error = %err, "attach failed"),
            }
        }
    }

    fn stamp_year(&self) {
        if let Some(year) = &self.root.year {
            year.set_text_content(Some(&year_stamp(current_year())));
        }
    }

    fn publish(&mut self, config: &PageConfig) {
        if config.console {
            exports::print_banner();
            self.publish_one(CONSOLE_NAMESPACE, CvConsole::default().into());
        }
        let debug = CvDebug::new(
            self.root.document.clone(),
            self.tracker.clone(),
            config.selectors.errors.clone(),
            config.form.error_color.clone(),
        );
        self.publish_one(DEBUG_NAMESPACE, debug.into());
    }

    fn publish_one(&mut self, name: &'static str, value: JsValue) {
        match js_sys::Reflect::set(&self.root.window, &JsValue::from_str(name), &value) {
            Ok(_) => self.published.push(name),
            Err(err) => warn!(name, error = ?err, "could not publish namespace"),
        }
    }

    fn shutdown(mut self) {
        for reactor in self.reactors.iter_mut().rev() {
            reactor.detach();
        }
        self.scheduler.cancel_all();
        for name in self.published.drain(..) {
            let _ = js_sys::Reflect::delete_property(&self.root.window, &JsValue::from_str(name));
        }
        debug!("page detached");
    }
}

/// Read the `#cv-config` override, if the page has one.
pub fn config_from_document() -> Result<PageConfig> {
    let json = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content());
    match json {
        Some(json) => PageConfig::from_json(&json),
        None => Ok(PageConfig::default()),
    }
}

/// Wire the page now, or once `DOMContentLoaded` fires if the document is
/// still loading. A running page is stopped first.
pub fn start(config: PageConfig) -> Result<()> {
    let window = web_sys::window().ok_or(PageError::NoWindow)?;
    let document = window.document().ok_or(PageError::NoDocument)?;
    if document.ready_state() == "loading" {
        defer_install(config, window, document);
    } else {
        install(config, window, document);
    }
    Ok(())
}

fn defer_install(config: PageConfig, window: Window, document: Document) {
    let target = document.clone();
    let listener = EventListener::once(&target, "DOMContentLoaded", move |_| {
        // spent once it fires; keep install's stop() from dropping it mid-call
        if let Some(spent) = PENDING.with(|slot| slot.borrow_mut().take()) {
            spent.forget();
        }
        install(config, window, document);
    });
    PENDING.with(|slot| *slot.borrow_mut() = Some(listener));
}

fn install(config: PageConfig, window: Window, document: Document) {
    stop();
    let root = BoundElements::capture(window, document, &config.selectors);
    let mut page = Page::build(&config, root);
    page.attach_all();
    page.stamp_year();
    page.publish(&config);
    info!(reactors = page.reactors.len(), "page ready");
    PAGE.with(|slot| *slot.borrow_mut() = Some(page));
}

/// Detach everything `start` attached, or cancel a start still waiting for
/// the document. No-op when nothing runs.
pub fn stop() {
    drop(PENDING.with(|slot| slot.borrow_mut().take()));
    if let Some(page) = PAGE.with(|slot| slot.borrow_mut().take()) {
        page.shutdown();
    }
}

pub fn is_running() -> bool {
    PAGE.with(|slot| slot.borrow().is_some())
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn fire_content_loaded(document: &Document) {
        let event = web_sys::Event::new("DOMContentLoaded").unwrap();
        document.dispatch_event(&event).unwrap();
    }

    #[wasm_bindgen_test]
    fn stop_cancels_an_install_waiting_for_the_document() {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();
        stop();
        defer_install(PageConfig::default(), window, document.clone());
        stop();
        fire_content_loaded(&document);
        assert!(!is_running());
    }

    #[wasm_bindgen_test]
    fn deferred_install_runs_once_the_document_is_ready() {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();
        stop();
        defer_install(PageConfig::default(), window, document.clone());
        assert!(!is_running());
        fire_content_loaded(&document);
        assert!(is_running());
        stop();
    }
}

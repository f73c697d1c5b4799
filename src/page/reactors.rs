//! Event wiring between the DOM and the reactor state machines.
//!
//! Each binding registers its listeners in `attach` and drops them in
//! `detach`; `gloo` listeners unregister themselves when dropped.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Element, Event, FormData, HtmlFormElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent, ScrollBehavior, ScrollToOptions,
};

use super::browser::supports_intersection_observer;
use super::elements::BoundElements;
use super::sinks::{DomForm, DomHeader, DomNav, DomTitle, clear_errors_in, set_style};
use crate::effects::{Hover, HoverConfig, KeyCommand};
use crate::error::Result;
use crate::form::{Field, FormValidator, FormValues};
use crate::nav::{NavConfig, SectionIntersection, SectionTracker, scroll_destination, target_id};
use crate::schedule::Scheduler;
use crate::scroll::{ScrollConfig, ScrollReactor};
use crate::typewriter::{Typewriter, TypewriterConfig, TypewriterDriver};

pub type SharedTracker = Rc<RefCell<SectionTracker<DomNav>>>;
pub type SharedValidator = Rc<FormValidator<DomForm>>;

pub trait Reactor {
    fn name(&self) -> &'static str;
    fn attach(&mut self, root: &BoundElements) -> Result<()>;
    fn detach(&mut self);
}

// --- Scroll -------------------------------------------------------------------

pub struct ScrollBinding {
    config: Rc<ScrollConfig>,
    scheduler: Rc<dyn Scheduler>,
    listener: Option<EventListener>,
}

impl ScrollBinding {
    pub fn new(config: ScrollConfig, scheduler: Rc<dyn Scheduler>) -> Self {
        Self { config: Rc::new(config), scheduler, listener: None }
    }
}

impl Reactor for ScrollBinding {
    fn name(&self) -> &'static str {
        "scroll"
    }

    fn attach(&mut self, root: &BoundElements) -> Result<()> {
        let Some(header) = root.header.clone() else {
            debug!("no header, scroll effects off");
            return Ok(());
        };
        let window = root.window.clone();
        let reactor = ScrollReactor::new(
            Rc::new(RefCell::new(DomHeader::new(header))),
            self.scheduler.clone(),
            Rc::new(move || window.scroll_y().unwrap_or(0.0)),
            self.config.clone(),
        );
        // gloo listeners are passive unless asked otherwise
        self.listener = Some(EventListener::new(&root.window, "scroll", move |_| {
            reactor.on_scroll();
        }));
        Ok(())
    }

    fn detach(&mut self) {
        self.listener = None;
    }
}

// --- Navigation -----------------------------------------------------------------

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

pub struct NavBinding {
    config: NavConfig,
    tracker: SharedTracker,
    clicks: Vec<EventListener>,
    observer: Option<(IntersectionObserver, ObserverCallback)>,
}

impl NavBinding {
    pub fn new(config: NavConfig, tracker: SharedTracker) -> Self {
        Self { config, tracker, clicks: Vec::new(), observer: None }
    }

    fn observe_sections(&mut self, root: &BoundElements) -> Result<()> {
        if root.sections.is_empty() {
            debug!("no sections, active highlighting off");
            return Ok(());
        }
        if !supports_intersection_observer(&root.window) {
            debug!("IntersectionObserver unavailable, active highlighting off");
            return Ok(());
        }
        let tracker = self.tracker.clone();
        let callback: ObserverCallback = Closure::wrap(Box::new(
            move |entries: js_sys::Array, _observer: IntersectionObserver| {
                let batch: Vec<SectionIntersection> = entries
                    .iter()
                    .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                    .map(|entry| SectionIntersection {
                        id: entry.target().id(),
                        is_intersecting: entry.is_intersecting(),
                    })
                    .collect();
                tracker.borrow_mut().observe(&batch);
            },
        )
            as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);
        let init = IntersectionObserverInit::new();
        init.set_root_margin(&self.config.focus_band().root_margin());
        init.set_threshold(&JsValue::from_f64(self.config.threshold));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
        for section in &root.sections {
            observer.observe(section);
        }
        self.observer = Some((observer, callback));
        Ok(())
    }
}

impl Reactor for NavBinding {
    fn name(&self) -> &'static str {
        "nav"
    }

    fn attach(&mut self, root: &BoundElements) -> Result<()> {
        for link in &root.nav_links {
            let href = link.get_attribute("href").unwrap_or_default();
            let window = root.window.clone();
            let document = root.document.clone();
            let header = root.header.clone();
            let gutter = self.config.gutter;
            let listener = EventListener::new_with_options(
                link,
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    event.prevent_default();
                    let section_top = document
                        .get_element_by_id(target_id(&href))
                        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
                        .map(|el| f64::from(el.offset_top()));
                    let header_height = header.as_ref().map(|h| f64::from(h.offset_height()));
                    if let Some(top) = scroll_destination(section_top, header_height, gutter) {
                        let options = ScrollToOptions::new();
                        options.set_top(top);
                        options.set_behavior(ScrollBehavior::Smooth);
                        window.scroll_to_with_scroll_to_options(&options);
                    }
                },
            );
            self.clicks.push(listener);
        }
        self.observe_sections(root)
    }

    fn detach(&mut self) {
        self.clicks.clear();
        if let Some((observer, _callback)) = self.observer.take() {
            observer.disconnect();
        }
    }
}

// --- Contact form ---------------------------------------------------------------

pub struct FormBinding {
    validator: SharedValidator,
    listener: Option<EventListener>,
}

impl FormBinding {
    pub fn new(validator: SharedValidator) -> Self {
        Self { validator, listener: None }
    }
}

fn read_values(form: &HtmlFormElement) -> FormValues {
    let Ok(data) = FormData::new_with_form(form) else {
        return FormValues::default();
    };
    let get = |field: Field| data.get(field.name()).as_string();
    FormValues {
        name: get(Field::Name),
        email: get(Field::Email),
        message: get(Field::Message),
    }
}

impl Reactor for FormBinding {
    fn name(&self) -> &'static str {
        "form"
    }

    fn attach(&mut self, root: &BoundElements) -> Result<()> {
        let Some(contact) = &root.contact_form else {
            debug!("no contact form, validation off");
            return Ok(());
        };
        let form = contact.form.clone();
        let validator = self.validator.clone();
        self.listener = Some(EventListener::new_with_options(
            &contact.form,
            "submit",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();
                validator.submit(&read_values(&form));
            },
        ));
        Ok(())
    }

    fn detach(&mut self) {
        self.listener = None;
        self.validator.detach();
    }
}

// --- Typewriter -----------------------------------------------------------------

pub struct TypewriterBinding {
    config: TypewriterConfig,
    scheduler: Rc<dyn Scheduler>,
    driver: Option<TypewriterDriver<DomTitle>>,
}

impl TypewriterBinding {
    pub fn new(config: TypewriterConfig, scheduler: Rc<dyn Scheduler>) -> Self {
        Self { config, scheduler, driver: None }
    }
}

impl Reactor for TypewriterBinding {
    fn name(&self) -> &'static str {
        "typewriter"
    }

    fn attach(&mut self, root: &BoundElements) -> Result<()> {
        if !self.config.enabled {
            debug!("typewriter disabled");
            return Ok(());
        }
        let Some(title) = root.hero_title.clone() else {
            debug!("no hero title, typewriter off");
            return Ok(());
        };
        let Some(typewriter) = Typewriter::new(&self.config) else {
            warn!("typewriter has no segments");
            return Ok(());
        };
        let driver = TypewriterDriver::new(typewriter, DomTitle::new(title), self.scheduler.clone());
        driver.start();
        self.driver = Some(driver);
        Ok(())
    }

    fn detach(&mut self) {
        if let Some(driver) = self.driver.take() {
            driver.stop();
        }
    }
}

// --- Hover ------------------------------------------------------------------------

pub struct HoverBinding {
    config: Rc<HoverConfig>,
    listeners: Vec<EventListener>,
}

impl HoverBinding {
    pub fn new(config: HoverConfig) -> Self {
        Self { config: Rc::new(config), listeners: Vec::new() }
    }
}

impl Reactor for HoverBinding {
    fn name(&self) -> &'static str {
        "hover"
    }

    fn attach(&mut self, root: &BoundElements) -> Result<()> {
        for el in &root.hover_targets {
            for kind in ["mouseenter", "mouseleave"] {
                let target = el.clone();
                let config = self.config.clone();
                self.listeners.push(EventListener::new(el, kind, move |event| {
                    let Some(hover) = Hover::from_event(&event.type_()) else {
                        return;
                    };
                    let style = config.style_for(hover);
                    if let Some(transition) = style.transition {
                        set_style(&target, "transition", transition);
                    }
                    set_style(&target, "transform", style.transform);
                }));
            }
        }
        Ok(())
    }

    fn detach(&mut self) {
        self.listeners.clear();
    }
}

// --- Keyboard ---------------------------------------------------------------------

pub struct KeyboardBinding {
    validator: Option<SharedValidator>,
    error_selector: String,
    listener: Option<EventListener>,
}

impl KeyboardBinding {
    pub fn new(validator: Option<SharedValidator>, error_selector: String) -> Self {
        Self { validator, error_selector, listener: None }
    }
}

fn submit_enclosing_form(event: &Event) {
    let form = event
        .target()
        .and_then(|t| t.dyn_into::<Element>().ok())
        .and_then(|el| el.closest("form").ok().flatten());
    let Some(form) = form else {
        return;
    };
    match Event::new("submit") {
        Ok(submit) => {
            if let Err(err) = form.dispatch_event(&submit) {
                warn!(error = ?err, "submit dispatch failed");
            }
        }
        Err(err) => warn!(error = ?err, "could not create submit event"),
    }
}

impl Reactor for KeyboardBinding {
    fn name(&self) -> &'static str {
        "keyboard"
    }

    fn attach(&mut self, root: &BoundElements) -> Result<()> {
        let validator = self.validator.clone();
        let document = root.document.clone();
        let error_selector = self.error_selector.clone();
        self.listener = Some(EventListener::new_with_options(
            &root.document,
            "keydown",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let tag = event
                    .target()
                    .and_then(|t| t.dyn_into::<Element>().ok())
                    .map(|el| el.tag_name());
                match KeyCommand::from_key(&key_event.key(), tag.as_deref()) {
                    Some(KeyCommand::DismissForm) => match &validator {
                        Some(validator) => validator.dismiss(),
                        // error slots can exist without a captured form
                        None => clear_errors_in(&document, &error_selector),
                    },
                    Some(KeyCommand::SubmitForm) => {
                        // the synthetic submit replaces the browser's implicit one
                        event.prevent_default();
                        submit_enclosing_form(event);
                    }
                    None => {}
                }
            },
        ));
        Ok(())
    }

    fn detach(&mut self) {
        self.listener = None;
    }
}

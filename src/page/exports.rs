//! Objects published on `window` for people poking at the page from devtools.

use wasm_bindgen::prelude::*;
use web_sys::Document;

use super::browser::roll;
use super::reactors::SharedTracker;
use super::sinks::{clear_errors_in, show_error_in};
use crate::console::{ConsoleCommands, ConsoleLine};

fn print(lines: &[ConsoleLine]) {
    for line in lines {
        match line.css {
            Some(css) => web_sys::console::log_2(
                &JsValue::from_str(&format!("%c{}", line.text)),
                &JsValue::from_str(css),
            ),
            None => web_sys::console::log_1(&JsValue::from_str(&line.text)),
        }
    }
}

pub fn print_banner() {
    print(&ConsoleCommands.banner());
}

/// `window.hamburgem`: the console command set.
#[wasm_bindgen]
#[derive(Default)]
pub struct CvConsole {
    commands: ConsoleCommands,
}

#[wasm_bindgen]
impl CvConsole {
    pub fn help(&self) {
        print(&self.commands.help());
    }

    pub fn about(&self) {
        print(&self.commands.about());
    }

    pub fn skills(&self) {
        print(&self.commands.skills());
    }

    pub fn projects(&self) {
        print(&self.commands.projects());
    }

    pub fn contact(&self) {
        print(&self.commands.contact());
    }

    pub fn joke(&self) {
        print(&[self.commands.joke(roll())]);
    }

    pub fn motivate(&self) {
        print(&[self.commands.motivate(roll())]);
    }
}

/// `window.hamburgemCV`: handles into the live reactors.
#[wasm_bindgen]
pub struct CvDebug {
    document: Document,
    tracker: SharedTracker,
    error_selector: String,
    error_color: String,
}

impl CvDebug {
    pub fn new(
        document: Document,
        tracker: SharedTracker,
        error_selector: String,
        error_color: String,
    ) -> Self {
        Self { document, tracker, error_selector, error_color }
    }
}

#[wasm_bindgen]
impl CvDebug {
    #[wasm_bindgen(js_name = updateActiveNavLink)]
    pub fn update_active_nav_link(&self, id: &str) {
        self.tracker.borrow_mut().activate(id);
    }

    #[wasm_bindgen(js_name = showError)]
    pub fn show_error(&self, slot: &str, message: &str) {
        show_error_in(&self.document, slot, message, &self.error_color);
    }

    #[wasm_bindgen(js_name = clearFormErrors)]
    pub fn clear_form_errors(&self) {
        clear_errors_in(&self.document, &self.error_selector);
    }
}

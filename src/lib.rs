//! CV page core crate.
//!
//! Interactive behaviours of a single résumé page compiled to WASM: header
//! elevation on scroll, smooth-scroll navigation with active-section
//! highlighting, contact form validation, the typewriter hero title, hover
//! lifts, keyboard shortcuts and the `hamburgem.*` console commands.
//!
//! The reactor state machines (`scroll`, `nav`, `form`, `typewriter`,
//! `effects`, `console`) are plain Rust and run under `cargo test` on the
//! host. `page` binds them to the live DOM.

use tracing::warn;
use wasm_bindgen::prelude::*;

pub mod config;
pub mod console;
pub mod effects;
pub mod error;
pub mod form;
pub mod logging;
pub mod nav;
pub mod page;
pub mod schedule;
pub mod scroll;
pub mod typewriter;

pub use config::PageConfig;
pub use error::PageError;
pub use form::{Field, FieldError, FormSink, FormValidator, FormValues, SubmitOutcome};
pub use nav::{NavSink, SectionIntersection, SectionTracker};
pub use schedule::{Scheduler, VirtualClock};
pub use scroll::{HeaderSink, HeaderState, ScrollReactor};
pub use typewriter::{TitleSink, Typewriter, TypewriterDriver, TypewriterState};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    if let Err(err) = start_page() {
        web_sys::console::warn_1(&err);
    }
}

// -----------------------------------------------------------------------------
// Entrypoints
// -----------------------------------------------------------------------------

/// Start with the page's own `#cv-config` override (or the defaults).
#[wasm_bindgen]
pub fn start_page() -> Result<(), JsValue> {
    match page::config_from_document() {
        Ok(config) => launch(config),
        Err(err) => {
            logging::init("info");
            warn!(error = %err, "ignoring page configuration");
            launch(PageConfig::default())
        }
    }
}

/// Start (or restart) with an explicit JSON configuration.
#[wasm_bindgen]
pub fn start_page_with_config(json: &str) -> Result<(), JsValue> {
    launch(PageConfig::from_json(json)?)
}

#[wasm_bindgen]
pub fn stop_page() {
    page::stop();
}

fn launch(config: PageConfig) -> Result<(), JsValue> {
    logging::init(&config.log_level);
    for warning in config.warnings() {
        warn!("{warning}");
    }
    page::start(config)?;
    Ok(())
}

//! `tracing` output for the browser console.
//!
//! [`ConsoleLayer`] formats each event as a single line and hands it to an
//! emitter; the default emitter maps levels onto `console.debug/info/warn/error`.

use std::fmt::{self, Write as _};

use tracing::field::{Field, Visit};
use tracing::level_filters::LevelFilter;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use wasm_bindgen::JsValue;

pub type Emitter = fn(Level, &str);

/// A tracing Layer that writes events to the browser console.
pub struct ConsoleLayer {
    emit: Emitter,
}

impl Default for ConsoleLayer {
    fn default() -> Self {
        Self { emit: emit_to_console }
    }
}

impl ConsoleLayer {
    pub fn with_emitter(emit: Emitter) -> Self {
        Self { emit }
    }
}

impl<S: Subscriber> Layer<S> for ConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);
        let meta = event.metadata();
        (self.emit)(*meta.level(), &format_line(meta.target(), &visitor.message, &visitor.fields));
    }
}

#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: String,
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{value:?}");
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

/// `[target] message key=value ...`
pub fn format_line(target: &str, message: &str, fields: &str) -> String {
    format!("[{target}] {message}{fields}")
}

fn emit_to_console(level: Level, line: &str) {
    let line = JsValue::from_str(line);
    match level {
        Level::ERROR => web_sys::console::error_1(&line),
        Level::WARN => web_sys::console::warn_1(&line),
        Level::INFO => web_sys::console::info_1(&line),
        _ => web_sys::console::debug_1(&line),
    }
}

/// Install the console subscriber. Later calls are ignored.
pub fn init(level: &str) {
    let filter = level.parse::<LevelFilter>().unwrap_or(LevelFilter::INFO);
    let _ = tracing_subscriber::registry()
        .with(ConsoleLayer::default().with_filter(filter))
        .try_init();
}

//! Browser services: timers, frame callbacks, clock and randomness.

use std::cell::Cell;
use std::rc::Rc;

use gloo::timers::callback::Timeout;
use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use crate::schedule::{Scheduler, Task};

/// [`Scheduler`] on top of `setTimeout` and `requestAnimationFrame`.
/// Pending work is dropped once [`BrowserScheduler::cancel_all`] ran.
pub struct BrowserScheduler {
    window: Window,
    active: Rc<Cell<bool>>,
}

impl BrowserScheduler {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            active: Rc::new(Cell::new(true)),
        }
    }

    pub fn cancel_all(&self) {
        self.active.set(false);
    }
}

impl Scheduler for BrowserScheduler {
    fn after(&self, delay_ms: u32, task: Task) {
        let active = self.active.clone();
        Timeout::new(delay_ms, move || {
            if active.get() {
                task();
            }
        })
        .forget();
    }

    fn next_frame(&self, task: Task) {
        let active = self.active.clone();
        let slot = Rc::new(Cell::new(Some(task)));
        let pending = slot.clone();
        let callback = Closure::once_into_js(move |_ts: f64| {
            if let Some(task) = pending.take() {
                if active.get() {
                    task();
                }
            }
        });
        if let Err(err) = self.window.request_animation_frame(callback.unchecked_ref()) {
            // no frame scheduling: run now so callers waiting on the frame are not stuck
            warn!(error = ?err, "requestAnimationFrame failed");
            if let Some(task) = slot.take() {
                task();
            }
        }
    }
}

pub fn current_year() -> u32 {
    js_sys::Date::new_0().get_full_year()
}

pub fn supports_intersection_observer(window: &Window) -> bool {
    js_sys::Reflect::has(window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false)
}

/// Random number for picking console quips.
#[cfg(feature = "rng")]
pub fn roll() -> usize {
    let mut buf = [0u8; 4];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u32::from_le_bytes(buf) as usize,
        Err(_) => math_random_roll(),
    }
}

#[cfg(not(feature = "rng"))]
pub fn roll() -> usize {
    math_random_roll()
}

fn math_random_roll() -> usize {
    (js_sys::Math::random() * f64::from(u32::MAX)) as usize
}

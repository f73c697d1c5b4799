//! Header elevation on scroll.
//!
//! Scroll events are coalesced: at most one header update is queued per
//! animation frame, and the update reads the scroll offset when the frame
//! runs rather than when the event fired.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::schedule::Scheduler;

/// Discrete header look. There are no interpolated states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderState {
    Flat,
    Elevated,
}

impl HeaderState {
    /// `Elevated` strictly above the threshold, `Flat` at or below it.
    pub fn for_offset(offset: f64, threshold: f64) -> Self {
        if offset > threshold {
            HeaderState::Elevated
        } else {
            HeaderState::Flat
        }
    }
}

/// Inline style bundle written to the header for one [`HeaderState`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderStyle {
    pub background: String,
    pub backdrop_filter: String,
    pub box_shadow: String,
}

impl HeaderStyle {
    pub fn elevated() -> Self {
        Self {
            background: "rgba(42, 42, 42, 0.98)".into(),
            backdrop_filter: "blur(15px)".into(),
            box_shadow: "0 4px 20px rgba(0, 0, 0, 0.3)".into(),
        }
    }

    pub fn flat() -> Self {
        Self {
            background: "rgba(42, 42, 42, 0.95)".into(),
            backdrop_filter: "blur(10px)".into(),
            box_shadow: "none".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Offset (CSS px) above which the header is elevated.
    pub threshold: f64,
    pub elevated: HeaderStyle,
    pub flat: HeaderStyle,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            threshold: 100.0,
            elevated: HeaderStyle::elevated(),
            flat: HeaderStyle::flat(),
        }
    }
}

impl ScrollConfig {
    pub fn style_for(&self, state: HeaderState) -> &HeaderStyle {
        match state {
            HeaderState::Elevated => &self.elevated,
            HeaderState::Flat => &self.flat,
        }
    }
}

/// Where header styles end up.
pub trait HeaderSink {
    fn apply(&mut self, state: HeaderState, style: &HeaderStyle);
}

/// Source of the current vertical scroll offset.
pub type OffsetSource = Rc<dyn Fn() -> f64>;

pub struct ScrollReactor<S> {
    sink: Rc<RefCell<S>>,
    scheduler: Rc<dyn Scheduler>,
    offset: OffsetSource,
    config: Rc<ScrollConfig>,
    // set by on_scroll, cleared by the frame callback
    queued: Rc<Cell<bool>>,
}

impl<S: HeaderSink + 'static> ScrollReactor<S> {
    pub fn new(
        sink: Rc<RefCell<S>>,
        scheduler: Rc<dyn Scheduler>,
        offset: OffsetSource,
        config: Rc<ScrollConfig>,
    ) -> Self {
        Self {
            sink,
            scheduler,
            offset,
            config,
            queued: Rc::new(Cell::new(false)),
        }
    }

    /// Handle one scroll notification. Returns `true` when this call queued
    /// the frame update, `false` when one was already pending.
    pub fn on_scroll(&self) -> bool {
        if self.queued.replace(true) {
            return false;
        }
        let sink = self.sink.clone();
        let offset = self.offset.clone();
        let config = self.config.clone();
        let queued = self.queued.clone();
        self.scheduler.next_frame(Box::new(move || {
            let state = HeaderState::for_offset(offset(), config.threshold);
            sink.borrow_mut().apply(state, config.style_for(state));
            queued.set(false);
        }));
        true
    }

    pub fn is_queued(&self) -> bool {
        self.queued.get()
    }

    pub fn sink(&self) -> &Rc<RefCell<S>> {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::VirtualClock;

    #[derive(Default)]
    struct Recorder {
        applied: Vec<HeaderState>,
        last: Option<HeaderStyle>,
    }

    impl HeaderSink for Recorder {
        fn apply(&mut self, state: HeaderState, style: &HeaderStyle) {
            self.applied.push(state);
            self.last = Some(style.clone());
        }
    }

    fn reactor(offset: Rc<Cell<f64>>) -> (Rc<VirtualClock>, ScrollReactor<Recorder>) {
        let clock = Rc::new(VirtualClock::new());
        let reactor = ScrollReactor::new(
            Rc::new(RefCell::new(Recorder::default())),
            clock.clone(),
            Rc::new(move || offset.get()),
            Rc::new(ScrollConfig::default()),
        );
        (clock, reactor)
    }

    #[test]
    fn test_threshold_boundary() {
        assert_eq!(HeaderState::for_offset(0.0, 100.0), HeaderState::Flat);
        assert_eq!(HeaderState::for_offset(100.0, 100.0), HeaderState::Flat);
        assert_eq!(HeaderState::for_offset(100.5, 100.0), HeaderState::Elevated);
        assert_eq!(HeaderState::for_offset(101.0, 100.0), HeaderState::Elevated);
        for offset in 0..=100 {
            assert_eq!(HeaderState::for_offset(offset as f64, 100.0), HeaderState::Flat);
        }
        for offset in 101..400 {
            assert_eq!(HeaderState::for_offset(offset as f64, 100.0), HeaderState::Elevated);
        }
    }

    #[test]
    fn test_burst_of_scrolls_coalesces_into_one_frame() {
        let offset = Rc::new(Cell::new(10.0));
        let (clock, reactor) = reactor(offset.clone());
        assert!(reactor.on_scroll());
        for _ in 0..20 {
            assert!(!reactor.on_scroll());
        }
        assert_eq!(clock.pending_frames(), 1);
        // offset read when the frame runs, not when the event fired
        offset.set(250.0);
        clock.run_frame();
        let sink = reactor.sink().borrow();
        assert_eq!(sink.applied, vec![HeaderState::Elevated]);
        assert_eq!(sink.last, Some(HeaderStyle::elevated()));
        drop(sink);
        assert!(!reactor.is_queued());
    }

    #[test]
    fn test_next_scroll_after_frame_queues_again() {
        let offset = Rc::new(Cell::new(500.0));
        let (clock, reactor) = reactor(offset.clone());
        reactor.on_scroll();
        clock.run_frame();
        offset.set(40.0);
        assert!(reactor.on_scroll());
        clock.run_frame();
        assert_eq!(
            reactor.sink().borrow().applied,
            vec![HeaderState::Elevated, HeaderState::Flat]
        );
        assert_eq!(reactor.sink().borrow().last, Some(HeaderStyle::flat()));
    }
}

//! Typewriter effect for the hero title.
//!
//! [`Typewriter::step`] is a pure transition `(state) -> (state, delay)`;
//! [`TypewriterDriver`] renders, steps and reschedules itself through a
//! [`Scheduler`] for as long as it runs.

use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::schedule::Scheduler;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypewriterConfig {
    pub enabled: bool,
    pub segments: Vec<String>,
    /// Index of the segment rendered with accent styling.
    pub accent: Option<usize>,
    pub type_ms: u32,
    pub delete_ms: u32,
    pub pause_ms: u32,
    /// Class of the span wrapping the accent segment.
    pub accent_class: String,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            segments: vec!["Welcome to ".into(), "Hamburgem's".into(), " world".into()],
            accent: Some(1),
            type_ms: 100,
            delete_ms: 50,
            pause_ms: 1000,
            accent_class: "accent".into(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TypewriterState {
    pub segment: usize,
    /// Characters of the current segment revealed.
    pub chars: usize,
    pub deleting: bool,
}

/// Piece of the rendered title.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TitleRun<'a> {
    pub text: &'a str,
    pub accent: bool,
}

#[derive(Clone, Debug)]
pub struct Typewriter {
    segments: Vec<String>,
    lengths: Vec<usize>,
    accent: Option<usize>,
    accent_class: String,
    type_ms: u32,
    delete_ms: u32,
    pause_ms: u32,
}

impl Typewriter {
    /// `None` when there is nothing to type.
    pub fn new(config: &TypewriterConfig) -> Option<Self> {
        if config.segments.is_empty() {
            return None;
        }
        Some(Self {
            lengths: config.segments.iter().map(|s| s.chars().count()).collect(),
            segments: config.segments.clone(),
            accent: config.accent,
            accent_class: config.accent_class.clone(),
            type_ms: config.type_ms,
            delete_ms: config.delete_ms,
            pause_ms: config.pause_ms,
        })
    }

    pub fn total_chars(&self) -> usize {
        self.lengths.iter().sum()
    }

    /// Steps in one type-out/delete-back loop: every character plus one
    /// segment boundary (or direction switch) per segment, in each direction.
    pub fn cycle_len(&self) -> usize {
        2 * (self.total_chars() + self.segments.len())
    }

    /// Next state and the delay before it should be shown.
    pub fn step(&self, state: TypewriterState) -> (TypewriterState, u32) {
        let last = self.segments.len() - 1;
        let segment = state.segment.min(last);
        let len = self.lengths[segment];
        if !state.deleting {
            if state.chars < len {
                (TypewriterState { chars: state.chars + 1, ..state }, self.type_ms)
            } else if segment < last {
                let next = TypewriterState { segment: segment + 1, chars: 0, deleting: false };
                (next, self.type_ms)
            } else {
                (TypewriterState { deleting: true, ..state }, self.pause_ms)
            }
        } else if state.chars > 0 {
            (TypewriterState { chars: state.chars - 1, ..state }, self.delete_ms)
        } else if segment > 0 {
            let prev = TypewriterState {
                segment: segment - 1,
                chars: self.lengths[segment - 1],
                deleting: true,
            };
            (prev, self.delete_ms)
        } else {
            (TypewriterState { deleting: false, ..state }, self.pause_ms)
        }
    }

    /// Visible pieces: earlier segments whole, the current one up to the cursor.
    pub fn runs(&self, state: TypewriterState) -> Vec<TitleRun<'_>> {
        let current = state.segment.min(self.segments.len() - 1);
        let mut runs = Vec::with_capacity(current + 1);
        for (idx, text) in self.segments.iter().enumerate().take(current) {
            runs.push(TitleRun { text, accent: self.accent == Some(idx) });
        }
        let partial = char_prefix(&self.segments[current], state.chars);
        if !partial.is_empty() {
            runs.push(TitleRun { text: partial, accent: self.accent == Some(current) });
        }
        runs
    }

    /// Title markup with the accent segment wrapped in a span.
    pub fn markup(&self, state: TypewriterState) -> String {
        let mut out = String::new();
        for run in self.runs(state) {
            let text = escape_html(run.text);
            if run.accent {
                out.push_str(&format!("<span class=\"{}\">{}</span>", self.accent_class, text));
            } else {
                out.push_str(&text);
            }
        }
        out
    }
}

fn char_prefix(text: &str, chars: usize) -> &str {
    match text.char_indices().nth(chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Where the revealed title is written.
pub trait TitleSink {
    fn render(&mut self, markup: &str);
}

struct DriverInner<S> {
    typewriter: Typewriter,
    state: Cell<TypewriterState>,
    sink: RefCell<S>,
    scheduler: Rc<dyn Scheduler>,
    running: Cell<bool>,
}

/// Self-rescheduling loop around a [`Typewriter`].
pub struct TypewriterDriver<S> {
    inner: Rc<DriverInner<S>>,
}

impl<S: TitleSink + 'static> TypewriterDriver<S> {
    pub fn new(typewriter: Typewriter, sink: S, scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            inner: Rc::new(DriverInner {
                typewriter,
                state: Cell::new(TypewriterState::default()),
                sink: RefCell::new(sink),
                scheduler,
                running: Cell::new(false),
            }),
        }
    }

    /// Render the current frame immediately and keep going. No-op when
    /// already running.
    pub fn start(&self) {
        if self.inner.running.replace(true) {
            return;
        }
        tick(self.inner.clone());
    }

    /// Stop at the next scheduled tick; the title keeps its last frame.
    pub fn stop(&self) {
        self.inner.running.set(false);
    }

    pub fn is_running(&self) -> bool {
        self.inner.running.get()
    }

    pub fn state(&self) -> TypewriterState {
        self.inner.state.get()
    }

    pub fn with_sink<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.inner.sink.borrow())
    }
}

fn tick<S: TitleSink + 'static>(inner: Rc<DriverInner<S>>) {
    if !inner.running.get() {
        return;
    }
    let state = inner.state.get();
    inner.sink.borrow_mut().render(&inner.typewriter.markup(state));
    let (next, delay) = inner.typewriter.step(state);
    inner.state.set(next);
    let again = inner.clone();
    inner.scheduler.after(delay, Box::new(move || tick(again)));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typewriter() -> Typewriter {
        Typewriter::new(&TypewriterConfig::default()).unwrap()
    }

    fn state(segment: usize, chars: usize, deleting: bool) -> TypewriterState {
        TypewriterState { segment, chars, deleting }
    }

    #[test]
    fn test_typing_transitions() {
        let tw = typewriter();
        assert_eq!(tw.step(state(0, 0, false)), (state(0, 1, false), 100));
        assert_eq!(tw.step(state(0, 11, false)), (state(1, 0, false), 100));
        assert_eq!(tw.step(state(2, 6, false)), (state(2, 6, true), 1000));
    }

    #[test]
    fn test_deleting_transitions() {
        let tw = typewriter();
        assert_eq!(tw.step(state(2, 6, true)), (state(2, 5, true), 50));
        assert_eq!(tw.step(state(2, 0, true)), (state(1, 11, true), 50));
        assert_eq!(tw.step(state(0, 0, true)), (state(0, 0, false), 1000));
    }

    #[test]
    fn test_markup_wraps_accent_in_every_phase() {
        let tw = typewriter();
        assert_eq!(tw.markup(state(0, 0, false)), "");
        assert_eq!(tw.markup(state(0, 4, false)), "Welc");
        assert_eq!(
            tw.markup(state(1, 3, false)),
            "Welcome to <span class=\"accent\">Ham</span>"
        );
        assert_eq!(
            tw.markup(state(2, 3, true)),
            "Welcome to <span class=\"accent\">Hamburgem&#39;s</span> wo"
        );
        // step-back frame shows the previous segment whole again
        assert_eq!(
            tw.markup(state(1, 11, true)),
            "Welcome to <span class=\"accent\">Hamburgem&#39;s</span>"
        );
    }

    #[test]
    fn test_prefix_counts_characters_not_bytes() {
        let tw = Typewriter::new(&TypewriterConfig {
            segments: vec!["你好".into(), "<b>".into()],
            accent: None,
            ..TypewriterConfig::default()
        })
        .unwrap();
        assert_eq!(tw.markup(state(0, 1, false)), "你");
        assert_eq!(tw.markup(state(1, 2, false)), "你好&lt;b");
    }

    #[test]
    fn test_empty_segment_list_disables_effect() {
        let cfg = TypewriterConfig { segments: vec![], ..TypewriterConfig::default() };
        assert!(Typewriter::new(&cfg).is_none());
    }

    #[test]
    fn test_one_cycle_is_a_closed_loop() {
        let tw = typewriter();
        let start = TypewriterState::default();
        let mut s = start;
        let mut pauses = 0;
        for i in 0..tw.cycle_len() {
            let (next, delay) = tw.step(s);
            if delay == 1000 {
                pauses += 1;
            }
            s = next;
            if i + 1 < tw.cycle_len() {
                assert_ne!(s, start, "returned early after {} steps", i + 1);
            }
        }
        assert_eq!(s, start);
        assert_eq!(pauses, 2);
    }
}

//! Navigation: click-to-scroll targets and active-section highlighting.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Extra space (CSS px) left between the header and a scrolled-to section.
    pub gutter: f64,
    /// Share of the viewport (percent) excluded from the top of the focus band.
    pub band_top_percent: f64,
    /// Share of the viewport (percent) excluded from the bottom of the focus band.
    pub band_bottom_percent: f64,
    /// Intersection ratio at which the observer reports a section.
    pub threshold: f64,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            gutter: 20.0,
            band_top_percent: 20.0,
            band_bottom_percent: 70.0,
            threshold: 0.1,
        }
    }
}

impl NavConfig {
    pub fn focus_band(&self) -> FocusBand {
        FocusBand {
            top_percent: self.band_top_percent,
            bottom_percent: self.band_bottom_percent,
        }
    }
}

/// The slice of the viewport that decides which section is "being read".
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FocusBand {
    pub top_percent: f64,
    pub bottom_percent: f64,
}

impl FocusBand {
    /// Observer root margin shrinking the viewport down to the band.
    pub fn root_margin(&self) -> String {
        format!("-{}% 0px -{}% 0px", self.top_percent, self.bottom_percent)
    }

    /// Band edges in viewport coordinates.
    pub fn bounds(&self, viewport_height: f64) -> (f64, f64) {
        let top = viewport_height * self.top_percent / 100.0;
        let bottom = viewport_height * (100.0 - self.bottom_percent) / 100.0;
        (top, bottom)
    }

    /// Whether an element spanning `top..bottom` (viewport coordinates)
    /// overlaps the band.
    pub fn intersects(&self, top: f64, bottom: f64, viewport_height: f64) -> bool {
        let (band_top, band_bottom) = self.bounds(viewport_height);
        top < band_bottom && bottom > band_top
    }
}

/// Section id a nav link points at (`#about` -> `about`).
pub fn target_id(href: &str) -> &str {
    href.strip_prefix('#').unwrap_or(href)
}

/// Scroll position that puts a section just below the header. Nothing to do
/// without both a section and a header.
pub fn scroll_destination(
    section_top: Option<f64>,
    header_height: Option<f64>,
    gutter: f64,
) -> Option<f64> {
    Some(section_top? - header_height? - gutter)
}

/// One observer notification for a section.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionIntersection {
    pub id: String,
    pub is_intersecting: bool,
}

impl SectionIntersection {
    pub fn entering(id: impl Into<String>) -> Self {
        Self { id: id.into(), is_intersecting: true }
    }

    pub fn leaving(id: impl Into<String>) -> Self {
        Self { id: id.into(), is_intersecting: false }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub target: String,
    pub active: bool,
}

/// Where the active marker is written.
pub trait NavSink {
    fn mark(&mut self, target: &str, active: bool);
}

pub struct SectionTracker<S> {
    links: Vec<NavLink>,
    active: Option<String>,
    sink: S,
}

impl<S: NavSink> SectionTracker<S> {
    /// Build from link hrefs, in document order.
    pub fn new<I, H>(hrefs: I, sink: S) -> Self
    where
        I: IntoIterator<Item = H>,
        H: AsRef<str>,
    {
        let links = hrefs
            .into_iter()
            .map(|href| NavLink {
                target: target_id(href.as_ref()).to_owned(),
                active: false,
            })
            .collect();
        Self { links, active: None, sink }
    }

    /// Process one observer batch in delivery order. The last intersecting
    /// entry wins; leaving entries never clear the marker.
    pub fn observe(&mut self, batch: &[SectionIntersection]) -> Option<&str> {
        for entry in batch.iter().filter(|e| e.is_intersecting) {
            self.activate(&entry.id);
        }
        self.active()
    }

    /// Mark `id` active and resynchronise every link.
    pub fn activate(&mut self, id: &str) {
        self.active = Some(id.to_owned());
        for link in &mut self.links {
            link.active = link.target == id;
            self.sink.mark(&link.target, link.active);
        }
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn links(&self) -> &[NavLink] {
        &self.links
    }

    pub fn active_links(&self) -> impl Iterator<Item = &NavLink> {
        self.links.iter().filter(|l| l.active)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[derive(Default)]
    struct Classes(BTreeMap<String, bool>);

    impl NavSink for Classes {
        fn mark(&mut self, target: &str, active: bool) {
            self.0.insert(target.to_owned(), active);
        }
    }

    fn tracker() -> SectionTracker<Classes> {
        SectionTracker::new(["#home", "#about", "#projects", "#contact"], Classes::default())
    }

    #[test]
    fn test_target_id_strips_fragment_marker() {
        assert_eq!(target_id("#about"), "about");
        assert_eq!(target_id("about"), "about");
        assert_eq!(target_id("#"), "");
    }

    #[test]
    fn test_nothing_active_before_first_observation() {
        let t = tracker();
        assert_eq!(t.active(), None);
        assert_eq!(t.active_links().count(), 0);
        assert!(t.sink().0.is_empty());
    }

    #[test]
    fn test_last_intersecting_entry_in_batch_wins() {
        let mut t = tracker();
        let active = t.observe(&[
            SectionIntersection::entering("about"),
            SectionIntersection::leaving("home"),
            SectionIntersection::entering("projects"),
            SectionIntersection::leaving("about"),
        ]);
        assert_eq!(active, Some("projects"));
        let active: Vec<_> = t.active_links().map(|l| l.target.as_str()).collect();
        assert_eq!(active, vec!["projects"]);
        assert_eq!(t.sink().0.get("projects"), Some(&true));
        assert_eq!(t.sink().0.get("about"), Some(&false));
        assert_eq!(t.sink().0.get("home"), Some(&false));
    }

    #[test]
    fn test_leaving_only_batch_keeps_previous_marker() {
        let mut t = tracker();
        t.observe(&[SectionIntersection::entering("contact")]);
        t.observe(&[SectionIntersection::leaving("contact")]);
        assert_eq!(t.active(), Some("contact"));
        assert_eq!(t.active_links().count(), 1);
    }

    #[test]
    fn test_exactly_one_active_across_sequences() {
        let ids = ["home", "about", "projects", "contact"];
        let mut t = tracker();
        for round in 0..12 {
            let batch: Vec<_> = (0..=round % 3)
                .map(|k| SectionIntersection::entering(ids[(round + k) % ids.len()]))
                .collect();
            let expected = batch.last().map(|e| e.id.clone());
            t.observe(&batch);
            assert_eq!(t.active().map(str::to_owned), expected);
            assert_eq!(t.active_links().count(), 1);
        }
    }

    #[test]
    fn test_scroll_destination_needs_section_and_header() {
        assert_eq!(scroll_destination(Some(900.0), Some(80.0), 20.0), Some(800.0));
        assert_eq!(scroll_destination(None, Some(80.0), 20.0), None);
        assert_eq!(scroll_destination(Some(900.0), None, 20.0), None);
    }

    #[test]
    fn test_focus_band_geometry() {
        let band = NavConfig::default().focus_band();
        assert_eq!(band.root_margin(), "-20% 0px -70% 0px");
        assert_eq!(band.bounds(1000.0), (200.0, 300.0));
        assert!(band.intersects(250.0, 900.0, 1000.0));
        assert!(band.intersects(-400.0, 201.0, 1000.0));
        assert!(!band.intersects(0.0, 200.0, 1000.0));
        assert!(!band.intersects(300.0, 800.0, 1000.0));
    }
}

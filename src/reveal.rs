//! Scroll-driven reveal state.
//!
//! Everything here is plain data plus the transitions applied to it by
//! intersection and scroll callbacks. The Leptos hooks in `app::hooks` own the
//! browser side (observers, listeners, animation frames) and feed samples into
//! these types, which keeps the math testable off the main thread.

use std::collections::BTreeSet;

/// How long the page must stay still before `is_scrolling` drops back to false.
pub const SCROLL_IDLE_MS: u64 = 150;

/// Observer thresholds used by the timeline, `[0.0, 0.1, ..., 1.0]`.
pub fn dense_thresholds() -> Vec<f64> {
    (0..=10).map(|step| step as f64 / 10.0).collect()
}

fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevealOptions {
    /// Fraction of the element that must be visible, `0.0..=1.0`.
    pub threshold: f64,
    pub root_margin: String,
    pub trigger_once: bool,
    pub disabled: bool,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: "0px".to_string(),
            trigger_once: true,
            disabled: false,
        }
    }
}

impl RevealOptions {
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = clamp01(threshold);
        self
    }

    pub fn root_margin(mut self, root_margin: impl Into<String>) -> Self {
        self.root_margin = root_margin.into();
        self
    }

    pub fn trigger_once(mut self, trigger_once: bool) -> Self {
        self.trigger_once = trigger_once;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RevealState {
    pub is_visible: bool,
    pub has_animated: bool,
}

impl RevealState {
    /// Apply one intersection result.
    ///
    /// With `trigger_once`, `has_animated` latches on the first intersection
    /// while `is_visible` keeps tracking the element so callers can still fade
    /// it out. Without it, both flags follow the observer.
    pub fn observe(&mut self, is_intersecting: bool, trigger_once: bool) {
        if is_intersecting {
            self.is_visible = true;
            self.has_animated = true;
        } else {
            self.is_visible = false;
            if !trigger_once {
                self.has_animated = false;
            }
        }
    }

    /// Whether the element should render in its revealed state.
    pub fn is_revealed(&self, trigger_once: bool) -> bool {
        self.is_visible || (trigger_once && self.has_animated)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Settle the state when the element attaches. Without observer support
    /// the element stays hidden and unobserved; otherwise a bounding-rect
    /// guess may reveal it before the first callback.
    pub fn attach(&mut self, supported: bool, estimated_visible: bool, trigger_once: bool) {
        if !supported {
            self.reset();
        } else if estimated_visible {
            self.observe(true, trigger_once);
        }
    }
}

/// Synchronous visibility guess from a bounding rect, used before the first
/// observer callback arrives.
pub fn estimate_visible(rect_top: f64, rect_bottom: f64, viewport_height: f64, threshold: f64) -> bool {
    if viewport_height <= 0.0 {
        return false;
    }
    rect_top < viewport_height * (1.0 - clamp01(threshold)) && rect_bottom > 0.0
}

/// One sample of the document's scroll geometry.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_y: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

impl ScrollMetrics {
    pub fn progress(&self) -> f64 {
        let scrollable = self.scroll_height - self.client_height;
        if scrollable.is_nan() || scrollable <= 0.0 {
            return 0.0;
        }
        clamp01(self.scroll_y / scrollable)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollProgress {
    pub progress: f64,
    pub is_scrolling: bool,
}

/// What a single scroll event asks of the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollTick {
    /// No frame is pending yet, so one should be requested.
    pub request_frame: bool,
    /// First event of a burst: `is_scrolling` just turned on.
    pub started: bool,
}

/// Frame-throttled scroll sampling.
///
/// A scroll event asks for an animation frame only when none is pending, so
/// bursts of events cost one recompute per frame.
#[derive(Debug, Clone, Default)]
pub struct ScrollSampler {
    frame_pending: bool,
    state: ScrollProgress,
}

impl ScrollSampler {
    pub fn state(&self) -> ScrollProgress {
        self.state
    }

    /// Record a scroll event.
    pub fn on_scroll(&mut self) -> ScrollTick {
        let started = !self.state.is_scrolling;
        self.state.is_scrolling = true;
        let request_frame = !self.frame_pending;
        self.frame_pending = true;
        ScrollTick {
            request_frame,
            started,
        }
    }

    pub fn on_frame(&mut self, metrics: ScrollMetrics) -> ScrollProgress {
        self.frame_pending = false;
        self.state.progress = metrics.progress();
        self.state
    }

    /// Called once the idle timer fires without an intervening scroll.
    pub fn on_idle(&mut self) -> ScrollProgress {
        self.state.is_scrolling = false;
        self.state
    }

    /// Forget a frame that was cancelled before it ran.
    pub fn cancel_frame(&mut self) {
        self.frame_pending = false;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Milestone {
    pub id: String,
    pub progress_threshold: f64,
}

impl Milestone {
    pub fn new(id: impl Into<String>, progress_threshold: f64) -> Self {
        Self {
            id: id.into(),
            progress_threshold,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimelineProgress {
    pub progress: f64,
    pub active_milestones: BTreeSet<String>,
}

impl TimelineProgress {
    pub fn is_active(&self, id: &str) -> bool {
        self.active_milestones.contains(id)
    }
}

#[derive(Debug, Clone)]
pub struct TimelineTracker {
    milestones: Vec<Milestone>,
    trigger_once: bool,
    state: TimelineProgress,
}

impl TimelineTracker {
    pub fn new(milestones: Vec<Milestone>, trigger_once: bool) -> Self {
        Self {
            milestones,
            trigger_once,
            state: TimelineProgress::default(),
        }
    }

    pub fn state(&self) -> &TimelineProgress {
        &self.state
    }

    /// Apply one observer entry and return the new state.
    pub fn observe(&mut self, is_intersecting: bool, intersection_ratio: f64) -> &TimelineProgress {
        let progress = if is_intersecting {
            clamp01(intersection_ratio)
        } else {
            0.0
        };

        // frozen once fully revealed
        if self.trigger_once && self.state.progress >= 1.0 && progress < 1.0 {
            return &self.state;
        }

        self.state.progress = progress;
        self.state.active_milestones = if is_intersecting {
            self.milestones
                .iter()
                .filter(|m| m.progress_threshold <= progress)
                .map(|m| m.id.clone())
                .collect()
        } else {
            BTreeSet::new()
        };
        &self.state
    }

    pub fn reset(&mut self) {
        self.state = TimelineProgress::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(scroll_y: f64) -> ScrollMetrics {
        ScrollMetrics {
            scroll_y,
            scroll_height: 3000.0,
            client_height: 1000.0,
        }
    }

    #[test]
    fn test_reveal_trigger_once_latches() {
        let mut state = RevealState::default();
        state.observe(true, true);
        assert_eq!(
            state,
            RevealState {
                is_visible: true,
                has_animated: true
            }
        );

        state.observe(false, true);
        assert!(!state.is_visible);
        assert!(state.has_animated);
        assert!(state.is_revealed(true));

        state.observe(true, true);
        state.observe(false, true);
        assert!(state.has_animated);
    }

    #[test]
    fn test_reveal_without_trigger_once_follows_observer() {
        let mut state = RevealState::default();
        state.observe(true, false);
        assert!(state.is_revealed(false));
        state.observe(false, false);
        assert_eq!(state, RevealState::default());
        assert!(!state.is_revealed(false));
    }

    #[test]
    fn test_reveal_not_intersecting_before_trigger() {
        let mut state = RevealState::default();
        state.observe(false, true);
        assert_eq!(state, RevealState::default());
    }

    #[test]
    fn test_estimate_visible() {
        // 10% threshold on a 1000px viewport: top must be above 900px
        assert!(estimate_visible(100.0, 400.0, 1000.0, 0.1));
        assert!(!estimate_visible(950.0, 1200.0, 1000.0, 0.1));
        // scrolled past
        assert!(!estimate_visible(-500.0, -10.0, 1000.0, 0.1));
        assert!(!estimate_visible(0.0, 100.0, 0.0, 0.1));
    }

    #[test]
    fn test_scroll_progress_bounds() {
        assert_eq!(metrics(0.0).progress(), 0.0);
        assert_eq!(metrics(-50.0).progress(), 0.0);
        assert_eq!(metrics(1000.0).progress(), 0.5);
        assert_eq!(metrics(2000.0).progress(), 1.0);
        assert_eq!(metrics(5000.0).progress(), 1.0);
    }

    #[test]
    fn test_scroll_progress_monotonic() {
        let mut last = 0.0;
        for step in 0..=200 {
            let p = metrics(step as f64 * 10.0).progress();
            assert!((0.0..=1.0).contains(&p));
            assert!(p >= last);
            last = p;
        }
    }

    #[test]
    fn test_scroll_progress_without_scrollable_distance() {
        let short = ScrollMetrics {
            scroll_y: 0.0,
            scroll_height: 800.0,
            client_height: 800.0,
        };
        assert_eq!(short.progress(), 0.0);
        let nan = ScrollMetrics {
            scroll_y: f64::NAN,
            scroll_height: 2000.0,
            client_height: 1000.0,
        };
        assert_eq!(nan.progress(), 0.0);
    }

    #[test]
    fn test_sampler_requests_one_frame_per_burst() {
        let mut sampler = ScrollSampler::default();
        assert!(sampler.on_scroll().request_frame);
        assert!(!sampler.on_scroll().request_frame);
        assert!(!sampler.on_scroll().request_frame);
        assert!(sampler.state().is_scrolling);

        let state = sampler.on_frame(metrics(500.0));
        assert_eq!(state.progress, 0.25);
        assert!(state.is_scrolling);

        // next event after the frame ran asks for a new one
        assert!(sampler.on_scroll().request_frame);
        sampler.cancel_frame();
        assert!(sampler.on_scroll().request_frame);
    }

    #[test]
    fn test_sampler_flags_scroll_start_once_per_burst() {
        let mut sampler = ScrollSampler::default();
        assert_eq!(
            sampler.on_scroll(),
            ScrollTick {
                request_frame: true,
                started: true
            }
        );
        for _ in 0..10 {
            assert!(!sampler.on_scroll().started);
        }
        sampler.on_frame(metrics(100.0));
        assert!(!sampler.on_scroll().started);

        sampler.on_idle();
        assert!(sampler.on_scroll().started);
    }

    #[test]
    fn test_reveal_attach_without_observer_support() {
        let mut state = RevealState {
            is_visible: true,
            has_animated: true,
        };
        state.attach(false, true, true);
        assert_eq!(state, RevealState::default());
        assert!(!state.is_revealed(true));
    }

    #[test]
    fn test_reveal_attach_uses_estimate() {
        let mut state = RevealState::default();
        state.attach(true, false, true);
        assert_eq!(state, RevealState::default());

        state.attach(true, true, true);
        assert!(state.is_visible);
        assert!(state.has_animated);
    }

    #[test]
    fn test_sampler_idle_keeps_progress() {
        let mut sampler = ScrollSampler::default();
        sampler.on_scroll();
        sampler.on_frame(metrics(2000.0));
        let state = sampler.on_idle();
        assert!(!state.is_scrolling);
        assert_eq!(state.progress, 1.0);
    }

    #[test]
    fn test_dense_thresholds() {
        let thresholds = dense_thresholds();
        assert_eq!(thresholds.len(), 11);
        assert_eq!(thresholds[0], 0.0);
        assert_eq!(thresholds[5], 0.5);
        assert_eq!(thresholds[10], 1.0);
    }

    fn journey() -> Vec<Milestone> {
        vec![
            Milestone::new("start", 0.0),
            Milestone::new("junior", 0.25),
            Milestone::new("senior", 0.5),
            Milestone::new("lead", 0.75),
            Milestone::new("now", 1.0),
        ]
    }

    #[test]
    fn test_timeline_active_set_matches_threshold() {
        let mut tracker = TimelineTracker::new(journey(), false);
        for ratio in dense_thresholds() {
            let state = tracker.observe(true, ratio).clone();
            let expected: BTreeSet<String> = journey()
                .into_iter()
                .filter(|m| m.progress_threshold <= ratio)
                .map(|m| m.id)
                .collect();
            assert_eq!(state.active_milestones, expected);
            assert_eq!(state.progress, ratio);
        }
    }

    #[test]
    fn test_timeline_not_intersecting_resets() {
        let mut tracker = TimelineTracker::new(journey(), false);
        tracker.observe(true, 0.6);
        assert!(tracker.state().is_active("senior"));

        let state = tracker.observe(false, 0.6);
        assert_eq!(state.progress, 0.0);
        assert!(state.active_milestones.is_empty());
    }

    #[test]
    fn test_timeline_trigger_once_freezes_at_full() {
        let mut tracker = TimelineTracker::new(journey(), true);
        tracker.observe(true, 0.4);
        // below full progress it still tracks down
        assert_eq!(tracker.observe(true, 0.2).progress, 0.2);

        tracker.observe(true, 1.0);
        assert_eq!(tracker.state().active_milestones.len(), 5);

        let state = tracker.observe(true, 0.3);
        assert_eq!(state.progress, 1.0);
        let state = tracker.observe(false, 0.0);
        assert_eq!(state.progress, 1.0);
        assert!(state.is_active("now"));
    }

    #[test]
    fn test_timeline_unordered_milestones() {
        let milestones = vec![Milestone::new("late", 0.9), Milestone::new("early", 0.1)];
        let mut tracker = TimelineTracker::new(milestones, false);
        let state = tracker.observe(true, 0.5);
        assert!(state.is_active("early"));
        assert!(!state.is_active("late"));
    }

    #[test]
    fn test_options_builder_clamps_threshold() {
        let options = RevealOptions::default()
            .threshold(1.5)
            .root_margin("0px 0px -10% 0px")
            .trigger_once(false);
        assert_eq!(options.threshold, 1.0);
        assert_eq!(options.root_margin, "0px 0px -10% 0px");
        assert!(!options.trigger_once);
        assert!(!options.disabled);
    }
}

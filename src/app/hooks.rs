//! Browser-side reveal hooks.
//!
//! On the server none of the observers or listeners attach, so every hook
//! renders its initial state and hydration picks up from there.

use std::{collections::BTreeSet, time::Duration};

use leptos::{html, prelude::*};
use leptos_use::{
    use_event_listener, use_intersection_observer_with_options, use_media_query, use_supported,
    use_window, UseIntersectionObserverOptions,
};
use wasm_bindgen::JsValue;

use crate::reveal::{
    dense_thresholds, estimate_visible, Milestone, RevealOptions, RevealState, ScrollMetrics,
    ScrollProgress, ScrollSampler, TimelineProgress, TimelineTracker, SCROLL_IDLE_MS,
};

pub struct UseScrollAnimationReturn {
    pub node_ref: NodeRef<html::Div>,
    pub is_visible: Signal<bool>,
    pub has_animated: Signal<bool>,
}

/// Track whether the node bound to `node_ref` has scrolled into view.
///
/// The observer lives as long as the calling component and is disconnected
/// when the node is swapped or the component is dropped.
pub fn use_scroll_animation(options: RevealOptions) -> UseScrollAnimationReturn {
    let node_ref = NodeRef::<html::Div>::new();
    let (state, set_state) = signal(RevealState::default());

    let RevealOptions {
        threshold,
        root_margin,
        trigger_once,
        disabled,
    } = options;

    if !disabled {
        let is_supported = use_intersection_observer_supported();
        let _ = use_intersection_observer_with_options(
            node_ref,
            move |entries, _| {
                for entry in entries {
                    set_state.update(|s| s.observe(entry.is_intersecting(), trigger_once));
                }
            },
            UseIntersectionObserverOptions::default()
                .thresholds(vec![threshold])
                .root_margin(root_margin),
        );

        Effect::new(move |_| {
            let supported = is_supported.get();
            if !supported {
                log::debug!("IntersectionObserver unavailable, reveal disabled");
            }
            // first guess on attach, the observer confirms on its first callback
            let estimated = supported
                && node_ref.get().is_some_and(|el| {
                    let rect = el.get_bounding_client_rect();
                    estimate_visible(rect.top(), rect.bottom(), viewport_height(), threshold)
                });
            if !supported || estimated {
                set_state.update(|s| s.attach(supported, estimated, trigger_once));
            }
        });
    }

    UseScrollAnimationReturn {
        node_ref,
        is_visible: Signal::derive(move || state.get().is_visible),
        has_animated: Signal::derive(move || state.get().has_animated),
    }
}

pub struct UseScrollProgressReturn {
    pub progress: Signal<f64>,
    pub is_scrolling: Signal<bool>,
}

/// Page scroll progress, sampled at most once per animation frame.
pub fn use_scroll_progress() -> UseScrollProgressReturn {
    let (state, set_state) = signal(ScrollProgress::default());
    let sampler = StoredValue::new(ScrollSampler::default());
    let frame = StoredValue::new(None::<AnimationFrameRequestHandle>);
    let idle = StoredValue::new(None::<TimeoutHandle>);

    let sample = move || {
        frame.try_set_value(None);
        if let Some(next) = sampler.try_update_value(|s| s.on_frame(read_scroll_metrics())) {
            set_state.set(next);
        }
    };

    let _ = use_event_listener(use_window(), leptos::ev::scroll, move |_| {
        let Some(tick) = sampler.try_update_value(|s| s.on_scroll()) else {
            return;
        };
        if tick.started {
            set_state.update(|s| s.is_scrolling = true);
        }

        if tick.request_frame {
            match request_animation_frame_with_handle(sample) {
                Ok(handle) => frame.set_value(Some(handle)),
                Err(_) => sampler.update_value(|s| s.cancel_frame()),
            }
        }

        if let Some(handle) = idle.get_value() {
            handle.clear();
        }
        let handle = set_timeout_with_handle(
            move || {
                if let Some(next) = sampler.try_update_value(|s| s.on_idle()) {
                    set_state.set(next);
                }
            },
            Duration::from_millis(SCROLL_IDLE_MS),
        );
        idle.set_value(handle.ok());
    });

    // pages can load already scrolled (anchors, back navigation)
    Effect::new(move |_| sample());

    on_cleanup(move || {
        if let Some(handle) = frame.try_get_value().flatten() {
            handle.cancel();
        }
        if let Some(handle) = idle.try_get_value().flatten() {
            handle.clear();
        }
    });

    UseScrollProgressReturn {
        progress: Signal::derive(move || state.get().progress),
        is_scrolling: Signal::derive(move || state.get().is_scrolling),
    }
}

pub struct UseTimelineProgressReturn {
    pub node_ref: NodeRef<html::Div>,
    pub progress: Signal<f64>,
    pub active_milestones: Signal<BTreeSet<String>>,
}

/// Reveal progress of a timeline container and the milestones it has passed.
///
/// The observer always reports at the dense `0.0, 0.1, ..., 1.0` steps;
/// `options.threshold` is not used here.
pub fn use_timeline_progress(
    milestones: Vec<Milestone>,
    options: RevealOptions,
) -> UseTimelineProgressReturn {
    let node_ref = NodeRef::<html::Div>::new();
    let (state, set_state) = signal(TimelineProgress::default());
    let tracker = StoredValue::new(TimelineTracker::new(milestones, options.trigger_once));

    if !options.disabled {
        let is_supported = use_intersection_observer_supported();
        let _ = use_intersection_observer_with_options(
            node_ref,
            move |entries, _| {
                for entry in entries {
                    let next = tracker.try_update_value(|t| {
                        t.observe(entry.is_intersecting(), entry.intersection_ratio())
                            .clone()
                    });
                    if let Some(next) = next {
                        set_state.set(next);
                    }
                }
            },
            UseIntersectionObserverOptions::default()
                .thresholds(dense_thresholds())
                .root_margin(options.root_margin),
        );

        Effect::new(move |_| {
            if !is_supported.get() {
                tracker.update_value(|t| t.reset());
                set_state.set(TimelineProgress::default());
            }
        });
    }

    UseTimelineProgressReturn {
        node_ref,
        progress: Signal::derive(move || state.with(|s| s.progress)),
        active_milestones: Signal::derive(move || state.with(|s| s.active_milestones.clone())),
    }
}

/// `prefers-reduced-motion: reduce`.
pub fn use_reduced_motion() -> Signal<bool> {
    use_media_query("(prefers-reduced-motion: reduce)")
}

/// Stays false during SSR; flips once mounted in a browser that has the API.
fn use_intersection_observer_supported() -> Signal<bool> {
    use_supported(|| {
        web_sys::js_sys::Reflect::has(&window(), &JsValue::from_str("IntersectionObserver"))
            .unwrap_or_default()
    })
}

fn viewport_height() -> f64 {
    window()
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0)
}

fn read_scroll_metrics() -> ScrollMetrics {
    let scroll_y = window().scroll_y().unwrap_or(0.0);
    let (scroll_height, client_height) = document()
        .document_element()
        .map(|el| (el.scroll_height() as f64, el.client_height() as f64))
        .unwrap_or_default();
    ScrollMetrics {
        scroll_y,
        scroll_height,
        client_height,
    }
}

use leptos::prelude::*;

use super::content::JourneyEntry;
use super::hooks::{
    use_reduced_motion, use_scroll_animation, use_scroll_progress, use_timeline_progress,
    UseScrollAnimationReturn, UseScrollProgressReturn, UseTimelineProgressReturn,
};
use crate::reveal::{Milestone, RevealOptions, RevealState};

/// Fades and lifts its children in once they scroll into view.
#[component]
pub fn Reveal(
    children: Children,
    #[prop(optional, into)] class: String,
    #[prop(optional)] delay_ms: u32,
    #[prop(optional)] options: Option<RevealOptions>,
) -> impl IntoView {
    let options = options.unwrap_or_default();
    let trigger_once = options.trigger_once;
    let reduced_motion = use_reduced_motion();
    let UseScrollAnimationReturn {
        node_ref,
        is_visible,
        has_animated,
    } = use_scroll_animation(options);

    let revealed = move || {
        let state = RevealState {
            is_visible: is_visible.get(),
            has_animated: has_animated.get(),
        };
        reduced_motion.get() || state.is_revealed(trigger_once)
    };

    view! {
        <div
            node_ref=node_ref
            class=move || {
                let motion = if revealed() {
                    "opacity-100 translate-y-0"
                } else {
                    "opacity-0 translate-y-8"
                };
                format!("{class} transition-all duration-700 ease-out {motion}")
            }
            style=format!("transition-delay: {delay_ms}ms")
        >
            {children()}
        </div>
    }
}

#[component]
pub fn ScrollProgressBar() -> impl IntoView {
    let UseScrollProgressReturn {
        progress,
        is_scrolling,
    } = use_scroll_progress();

    view! {
        <div class="fixed top-0 left-0 z-50 h-1 w-full pointer-events-none" aria-hidden="true">
            <div
                class=move || {
                    if is_scrolling.get() {
                        "h-full bg-cyan opacity-100 transition-opacity duration-150"
                    } else {
                        "h-full bg-cyan opacity-60 transition-opacity duration-500"
                    }
                }
                style:width=move || format!("{:.2}%", progress.get() * 100.0)
            ></div>
        </div>
    }
}

/// Vertical timeline whose rail fills and entries light up as it scrolls in.
#[component]
pub fn Timeline(entries: &'static [JourneyEntry]) -> impl IntoView {
    let milestones = entries
        .iter()
        .map(|e| Milestone::new(e.id, e.progress_threshold))
        .collect();
    let UseTimelineProgressReturn {
        node_ref,
        progress,
        active_milestones,
    } = use_timeline_progress(milestones, RevealOptions::default());

    view! {
        <div node_ref=node_ref class="relative pl-10">
            <div class="absolute left-3 top-0 h-full w-0.5 bg-brightBlack/40">
                <div
                    class="w-full bg-cyan transition-all duration-500 ease-out"
                    style:height=move || format!("{:.0}%", progress.get() * 100.0)
                ></div>
            </div>
            <ol class="space-y-8">
                {entries
                    .iter()
                    .map(|entry| {
                        let id = entry.id;
                        let active = move || active_milestones.with(|a| a.contains(id));
                        view! {
                            <li class=move || {
                                if active() {
                                    "relative opacity-100 translate-x-0 transition-all duration-500"
                                } else {
                                    "relative opacity-40 -translate-x-2 transition-all duration-500"
                                }
                            }>
                                <span class=move || {
                                    if active() {
                                        "absolute -left-[2.05rem] top-1 h-3 w-3 rounded-full bg-cyan"
                                    } else {
                                        "absolute -left-[2.05rem] top-1 h-3 w-3 rounded-full bg-brightBlack"
                                    }
                                }></span>
                                <p class="text-sm text-muted">{entry.period}</p>
                                <h3 class="text-lg font-bold">
                                    {entry.role} <span class="text-cyan">" @ " {entry.org}</span>
                                </h3>
                                <p class="text-base leading-relaxed">{entry.summary}</p>
                            </li>
                        }
                    })
                    .collect_view()}
            </ol>
        </div>
    }
}

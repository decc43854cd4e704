use leptos::prelude::*;
use leptos_router::{components::*, hooks::use_location};

use crate::config::{BUILD_TIME, SITE_TITLE};

const NAV_LINKS: &[(&str, &str)] = &[
    ("/#projects", "Projects"),
    ("/#skills", "Skills"),
    ("/#journey", "Journey"),
    ("/blog", "Blog"),
    ("/#contact", "Contact"),
];

#[component]
pub fn Header() -> impl IntoView {
    let pathname = use_location().pathname;
    let on_blog = move || pathname.get().starts_with("/blog");

    view! {
        <header class="sticky top-0 z-40 shadow-lg bg-background/90 backdrop-blur-sm">
            <div class="mx-auto max-w-7xl px-4 sm:px-6 lg:px-8 py-4 flex flex-wrap items-center justify-between gap-4">
                <A href="/" attr:class="text-2xl font-bold">
                    <span class="text-green">"➜"</span>
                    " "
                    <span class="text-cyan">{SITE_TITLE}</span>
                </A>
                <nav class="flex flex-wrap gap-4 text-sm">
                    {NAV_LINKS
                        .iter()
                        .map(|(href, label)| {
                            let is_blog = *href == "/blog";
                            view! {
                                <a
                                    href={*href}
                                    class=move || {
                                        if is_blog && on_blog() {
                                            "text-cyan underline underline-offset-4"
                                        } else {
                                            "hover:text-cyan transition-colors duration-200"
                                        }
                                    }
                                >
                                    {*label}
                                </a>
                            }
                        })
                        .collect_view()}
                </nav>
            </div>
        </header>
    }
}

#[component]
pub fn Footer() -> impl IntoView {
    let built = chrono::DateTime::parse_from_rfc3339(BUILD_TIME)
        .map(|d| d.format("%b %e, %Y").to_string())
        .unwrap_or_default();
    view! {
        <footer class="mt-auto py-6 text-center text-sm text-muted">
            <span>{format!("© {SITE_TITLE}")}</span>
            " · "
            <a href="/rss.xml" class="hover:text-yellow">"RSS"</a>
            " · "
            <span>"Last built " {built}</span>
        </footer>
    }
}

mod blog;
mod content;
mod header;
pub mod hooks;
mod homepage;
pub mod reveal;

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{components::*, path};

use blog::{BlogHome, BlogPage, BlogWrapper};
use header::{Footer, Header};
use homepage::HomePage;
use reveal::ScrollProgressBar;

use crate::config::SITE_TITLE;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <meta name="color-scheme" content="dark" />
                <link rel="shortcut icon" type="image/ico" href="/favicon.ico" />
                <link rel="stylesheet" id="leptos" href="/pkg/portfolio-site.css" />
                <link
                    rel="alternate"
                    type="application/rss+xml"
                    title="RSS"
                    href="/rss.xml"
                />
                <MetaTags />
            </head>
            <body class="font-mono flex flex-col min-h-screen">
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    view! {
        <Title formatter=|title| format!("{SITE_TITLE} - {title}") />

        <Router>
            <ScrollProgressBar />
            <Header />
            <main class="flex flex-col flex-grow items-center mx-auto w-full max-w-7xl px-4 py-8">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=path!("/") view=HomePage />
                    <ParentRoute path=path!("/blog") view=BlogWrapper>
                        <Route path=path!("") view=BlogHome />
                        <Route path=path!(":slug") view=BlogPage />
                    </ParentRoute>
                </Routes>
            </main>
            <Footer />
        </Router>
    }
}

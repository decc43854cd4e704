use leptos::{html::Input, prelude::*, server_fn::codec::GetUrl};
use leptos_meta::Title;
use leptos_router::{components::*, hooks::*};

#[cfg(feature = "ssr")]
use std::sync::Arc;

use super::reveal::Reveal;
#[cfg(feature = "ssr")]
use crate::blog::{BlogError, BlogStore};
use crate::{
    blog::BlogPost,
    config::{BLOG_DESCRIPTION, BLOG_TITLE},
};

const RELATED_LIMIT: usize = 3;

#[cfg(feature = "ssr")]
fn blog_store() -> Result<Arc<BlogStore>, ServerFnError> {
    use_context::<Arc<BlogStore>>().ok_or_else(|| ServerFnError::new("Blog store not configured"))
}

#[cfg(feature = "ssr")]
fn server_err(e: BlogError) -> ServerFnError {
    ServerFnError::new(e)
}

#[component]
pub fn BlogWrapper() -> impl IntoView {
    let clicked = ArcTrigger::new();
    provide_context(clicked.clone());
    view! {
        <Title text="Blog" />
        <div class="text-center mb-8">
            <h1 class="font-bold text-3xl lg:text-4xl mb-4 section-content">
                <a
                    href="/blog"
                    on:click=move |_| clicked.notify()
                    class="hover:text-purple transition-colors duration-200"
                >
                    {BLOG_TITLE}
                </a>
                <a
                    href="/rss.xml"
                    target="_blank"
                    class="relative top-1 ml-4 text-brightYellow hover:text-yellow transition-colors duration-200"
                    aria-label="RSS Feed"
                >
                    <i class="extra-rss" />
                </a>
            </h1>
            <div class="max-w-2xl mx-auto text-lg font-medium text-muted section-content">
                {BLOG_DESCRIPTION}
            </div>
        </div>
        <div class="w-full max-w-4xl mx-auto text-left">
            <Outlet />
        </div>
    }
}

/// Published posts matching `pattern` (regex, empty for all) and `category`
/// (empty for all). Bodies are left out of the listing.
#[server(input = GetUrl)]
pub async fn list_posts(pattern: String, category: String) -> Result<Vec<BlogPost>, ServerFnError> {
    let store = blog_store()?;
    let posts = store
        .search_posts(&pattern)
        .await
        .map_err(server_err)?;
    Ok(posts
        .into_iter()
        .filter(|p| category.is_empty() || p.in_category(&category))
        .map(|mut p| {
            p.content.clear();
            p
        })
        .collect())
}

#[server(input = GetUrl)]
pub async fn list_categories() -> Result<Vec<String>, ServerFnError> {
    Ok(blog_store()?.get_all_categories().await)
}

#[server(input = GetUrl)]
pub async fn get_post(slug: String) -> Result<BlogPost, ServerFnError> {
    blog_store()?
        .get_blog_post_by_slug(&slug)
        .await
        .map_err(server_err)
}

#[server(input = GetUrl)]
pub async fn get_related(slug: String) -> Result<Vec<BlogPost>, ServerFnError> {
    let related = blog_store()?
        .get_related_posts(&slug, RELATED_LIMIT)
        .await
        .map_err(server_err)?;
    Ok(related
        .into_iter()
        .map(|mut p| {
            p.content.clear();
            p
        })
        .collect())
}

#[component]
pub fn BlogHome() -> impl IntoView {
    let (search, set_search) = signal(String::new());
    let (category, set_category) = signal(String::new());
    let input_ref = NodeRef::<Input>::new();

    let posts = Resource::new(
        move || (search.get(), category.get()),
        |(search, category)| async move { list_posts(search, category).await },
    );
    let categories = Resource::new(|| (), |_| async { list_categories().await.unwrap_or_default() });

    let header_clicked = expect_context::<ArcTrigger>();
    Effect::watch(
        move || header_clicked.track(),
        move |_, _, _| {
            let el = if let Some(el) = input_ref.get_untracked() {
                el
            } else {
                return;
            };
            set_search.set(String::new());
            set_category.set(String::new());
            el.set_value("");
        },
        false,
    );

    view! {
        <Title text="Blog Home" />
        <div class="mb-6 space-y-4">
            <form
                class="flex flex-col sm:flex-row gap-3 items-start sm:items-center"
                on:submit=move |ev| {
                    ev.prevent_default();
                    let el = if let Some(el) = input_ref.get_untracked() {
                        el
                    } else {
                        return;
                    };
                    set_search.set(el.value());
                }
            >
                <label for="blog_search" class="font-medium text-cyan whitespace-nowrap">
                    "🔍 Search (regex):"
                </label>
                <div class="flex-grow w-full sm:max-w-md">
                    <input
                        id="blog_search"
                        class="w-full px-4 py-2 rounded-md border border-muted focus:outline-none focus:ring-2 focus:ring-cyan focus:border-cyan bg-background text-foreground placeholder-muted transition-all duration-200"
                        node_ref=input_ref
                        placeholder="Enter search pattern..."
                    />
                </div>
                <button
                    type="submit"
                    class="px-4 py-2 bg-cyan/20 hover:bg-cyan/30 text-cyan rounded-md border border-cyan/30 transition-all duration-200 whitespace-nowrap"
                >
                    "Search"
                </button>
            </form>
            <Suspense>
                {move || Suspend::new(async move {
                    let categories = categories.await;
                    view! {
                        <div class="flex flex-wrap gap-2">
                            <CategoryChip name={String::new()} label={"All".to_string()} category set_category />
                            {categories
                                .into_iter()
                                .map(|c| {
                                    view! {
                                        <CategoryChip name={c.clone()} label=c category set_category />
                                    }
                                })
                                .collect_view()}
                        </div>
                    }
                })}
            </Suspense>
        </div>
        <Transition fallback=move || {
            view! {
                <div class="space-y-4">
                    <div class="loading-skeleton h-8 rounded"></div>
                    <div class="loading-skeleton h-6 rounded w-3/4"></div>
                    <div class="loading-skeleton h-8 rounded"></div>
                    <div class="loading-skeleton h-6 rounded w-2/3"></div>
                </div>
            }
        }>
            {move || Suspend::new(async move {
                match posts.await {
                    Ok(posts) if posts.is_empty() => {
                        view! { <p class="text-muted">"No posts found."</p> }.into_any()
                    }
                    Ok(posts) => {
                        view! {
                            <div class="space-y-4 section-content">
                                {posts
                                    .into_iter()
                                    .enumerate()
                                    .map(|(i, post)| {
                                        view! {
                                            <Reveal delay_ms={(i.min(5) as u32) * 75}>
                                                <PostCard post />
                                            </Reveal>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                        }
                            .into_any()
                    }
                    Err(e) => {
                        view! { <p class="text-red">{e.to_string()}</p> }.into_any()
                    }
                }
            })}
        </Transition>
    }
}

#[component]
fn CategoryChip(
    name: String,
    label: String,
    category: ReadSignal<String>,
    set_category: WriteSignal<String>,
) -> impl IntoView {
    let selected = {
        let name = name.clone();
        move || category.get() == name
    };
    view! {
        <button
            type="button"
            on:click=move |_| set_category.set(name.clone())
            class=move || {
                if selected() {
                    "rounded-md px-3 py-1 text-sm bg-cyan/30 text-cyan border border-cyan/40"
                } else {
                    "rounded-md px-3 py-1 text-sm bg-brightBlack/30 border border-muted/30 hover:bg-brightBlack/50"
                }
            }
        >
            {label}
        </button>
    }
}

#[component]
fn PostCard(post: BlogPost) -> impl IntoView {
    view! {
        <div class="mb-4 hover:bg-brightBlack/20 p-3 rounded-md transition-colors duration-200">
            <A attr:class="block" href={format!("/blog/{}", post.slug)}>
                <div class="flex flex-wrap items-baseline gap-x-3 text-sm text-muted">
                    <span>{post.display_date()}</span>
                    <span>{format!("{} min read", post.reading_time)}</span>
                    <span class="text-purple">{post.category.clone()}</span>
                </div>
                <div class="text-lg text-blue font-medium leading-tight mt-1">{post.title.clone()}</div>
                <p class="mt-1 text-sm">{post.excerpt.clone()}</p>
                <div class="mt-2">
                    {post
                        .tags
                        .iter()
                        .map(|s| {
                            view! {
                                <span class="rounded-md px-2 py-1 bg-brightBlack mr-2 text-sm">
                                    {s.to_string()}
                                </span>
                            }
                        })
                        .collect_view()}
                </div>
            </A>
        </div>
    }
}

#[component]
pub fn BlogPage() -> impl IntoView {
    let params = use_params_map();
    let slug = move || params.get().get("slug").unwrap_or_default();
    let post = Resource::new(slug, |slug| async move { get_post(slug).await });
    let related = Resource::new(slug, |slug| async move {
        get_related(slug).await.unwrap_or_default()
    });

    view! {
        <Title text="Blog Post" />
        <div id="blog_content">
            <Suspense>
                {move || Suspend::new(async move {
                    match post.await {
                        Ok(p) => {
                            view! {
                                <Title text={p.title.clone()} />
                                <h2 class="text-2xl lg:text-3xl font-bold mb-4">{p.title.clone()}</h2>
                                <div class="mb-6 p-4 bg-brightBlack/20 rounded-md border border-muted/30">
                                    <div class="flex flex-wrap items-center gap-4 text-sm">
                                        <span class="text-yellow font-medium">
                                            "📅 " {p.display_date()}
                                        </span>
                                        <span class="text-cyan font-medium">
                                            "⏱ " {format!("{} min read", p.reading_time)}
                                        </span>
                                        <span class="text-purple font-medium">
                                            "📁 " {p.category.clone()}
                                        </span>
                                        <div class="flex flex-wrap gap-1">
                                            <span class="text-green font-medium">"🏷️ "</span>
                                            {p
                                                .tags
                                                .into_iter()
                                                .map(|tag| {
                                                    view! {
                                                        <span class="bg-green/20 text-green px-2 py-1 rounded text-xs">
                                                            {tag}
                                                        </span>
                                                    }
                                                })
                                                .collect_view()}
                                        </div>
                                    </div>
                                </div>
                                <article class="prose prose-invert max-w-none">
                                    <div inner_html=p.content></div>
                                </article>
                            }
                                .into_any()
                        }
                        Err(_) => {
                            view! {
                                <p class="text-red">"Post not found."</p>
                                <A href="/blog">"Back to all posts"</A>
                            }
                                .into_any()
                        }
                    }
                })}
            </Suspense>
            <Suspense>
                {move || Suspend::new(async move {
                    let related = related.await;
                    (!related.is_empty())
                        .then(|| {
                            view! {
                                <section class="mt-12 border-t border-muted/30 pt-6">
                                    <h3 class="text-xl font-bold mb-4">"Related posts"</h3>
                                    {related
                                        .into_iter()
                                        .map(|post| view! { <PostCard post /> })
                                        .collect_view()}
                                </section>
                            }
                        })
                })}
            </Suspense>
        </div>
    }
}

use leptos::prelude::*;
use leptos_meta::Title;

use super::{
    content::{
        HERO_BLURB, HERO_NAME, HERO_TAGLINE, JOURNEY, PROJECTS, SKILLS, SOCIAL_LINKS,
    },
    reveal::{Reveal, Timeline},
};
use crate::config::CONTACT_EMAIL;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <Title text="About Me" />
        <div class="max-w-6xl mx-auto px-4 page-content">
            <Hero />
            <Projects />
            <Skills />
            <Journey />
            <Contact />
        </div>
    }
}

#[component]
fn Hero() -> impl IntoView {
    view! {
        <section class="min-h-[60vh] flex flex-col justify-center items-center text-center gap-6">
            <Reveal>
                <h1 class="text-4xl lg:text-5xl font-bold">"Hi, I'm " {HERO_NAME}</h1>
            </Reveal>
            <Reveal delay_ms=150>
                <p class="text-xl text-cyan">{HERO_TAGLINE}</p>
            </Reveal>
            <Reveal delay_ms=300 class="max-w-2xl">
                <p class="text-base leading-relaxed">{HERO_BLURB}</p>
            </Reveal>
            <Reveal delay_ms=450>
                <div class="flex gap-4">
                    <a
                        href="#projects"
                        class="bg-cyan/20 hover:bg-cyan/30 text-cyan px-6 py-3 rounded-md font-medium transition-all duration-200 border border-cyan/30"
                    >
                        "See my work"
                    </a>
                    <a
                        href="/blog"
                        class="px-6 py-3 rounded-md font-medium border border-muted/30 hover:bg-brightBlack/20 transition-all duration-200"
                    >
                        "Read the blog"
                    </a>
                </div>
            </Reveal>
        </section>
    }
}

#[component]
fn Projects() -> impl IntoView {
    view! {
        <section id="projects" class="my-16">
            <Reveal>
                <h2 class="text-2xl font-bold mb-8 text-center">"Projects"</h2>
            </Reveal>
            <div class="grid gap-6 md:grid-cols-2 lg:grid-cols-3">
                {PROJECTS
                    .iter()
                    .enumerate()
                    .map(|(i, project)| {
                        view! {
                            <Reveal delay_ms={i as u32 * 100} class="h-full">
                                <a
                                    href=project.link
                                    target="_blank"
                                    rel="noopener noreferrer"
                                    class="block h-full p-6 rounded-lg border border-muted/30 bg-brightBlack/20 hover:bg-brightBlack/40 transition-colors duration-200"
                                >
                                    <h3 class="text-lg font-bold text-blue mb-2">{project.name}</h3>
                                    <p class="text-sm mb-4 leading-relaxed">{project.description}</p>
                                    <div class="flex flex-wrap gap-2">
                                        {project
                                            .tech
                                            .iter()
                                            .map(|t| {
                                                view! {
                                                    <span class="rounded-md px-2 py-1 bg-brightBlack text-xs">
                                                        {*t}
                                                    </span>
                                                }
                                            })
                                            .collect_view()}
                                    </div>
                                </a>
                            </Reveal>
                        }
                    })
                    .collect_view()}
            </div>
        </section>
    }
}

#[component]
fn Skills() -> impl IntoView {
    view! {
        <section id="skills" class="my-16">
            <Reveal>
                <h2 class="text-2xl font-bold mb-8 text-center">"Skills"</h2>
            </Reveal>
            <div class="grid gap-6 md:grid-cols-3">
                {SKILLS
                    .iter()
                    .map(|group| {
                        view! {
                            <Reveal class="p-4 rounded-md bg-brightBlack/30">
                                <h3 class="font-bold text-green mb-3">{group.title}</h3>
                                <ul class="flex flex-wrap gap-2">
                                    {group
                                        .skills
                                        .iter()
                                        .map(|s| {
                                            view! {
                                                <li class="rounded px-2 py-1 bg-green/20 text-green text-sm">
                                                    {*s}
                                                </li>
                                            }
                                        })
                                        .collect_view()}
                                </ul>
                            </Reveal>
                        }
                    })
                    .collect_view()}
            </div>
        </section>
    }
}

#[component]
fn Journey() -> impl IntoView {
    view! {
        <section id="journey" class="my-16 max-w-3xl mx-auto">
            <Reveal>
                <h2 class="text-2xl font-bold mb-8 text-center">"Professional Journey"</h2>
            </Reveal>
            <Timeline entries=JOURNEY />
        </section>
    }
}

#[component]
fn Contact() -> impl IntoView {
    let mailto = format!("mailto:{CONTACT_EMAIL}");
    view! {
        <section id="contact" class="flex justify-center items-center my-16">
            <Reveal class="w-full max-w-2xl text-center">
                <h2 class="text-2xl font-bold mb-6">"Let's Connect"</h2>
                <div class="bg-brightBlack/30 p-6 rounded-lg border border-muted/30">
                    <p class="text-lg mb-4 text-cyan font-medium">
                        "Open to collaboration and interesting conversations"
                    </p>
                    <div class="flex flex-col sm:flex-row items-center justify-center gap-4 mt-6">
                        <a
                            href=mailto
                            class="bg-cyan/20 hover:bg-cyan/30 text-cyan px-6 py-3 rounded-md font-medium transition-all duration-200 border border-cyan/30"
                        >
                            {CONTACT_EMAIL}
                        </a>
                        <div class="flex gap-3">
                            {SOCIAL_LINKS
                                .iter()
                                .map(|(label, href, icon)| {
                                    view! {
                                        <a
                                            href={*href}
                                            target="_blank"
                                            rel="noopener noreferrer"
                                            class="hover:text-brightBlue text-2xl"
                                            aria-label={*label}
                                        >
                                            <i class={*icon}></i>
                                        </a>
                                    }
                                })
                                .collect_view()}
                        </div>
                    </div>
                </div>
            </Reveal>
        </section>
    }
}

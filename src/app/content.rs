//! Static copy for the home page.

pub struct Project {
    pub name: &'static str,
    pub description: &'static str,
    pub tech: &'static [&'static str],
    pub link: &'static str,
}

pub struct SkillGroup {
    pub title: &'static str,
    pub skills: &'static [&'static str],
}

pub struct JourneyEntry {
    pub id: &'static str,
    pub period: &'static str,
    pub role: &'static str,
    pub org: &'static str,
    pub summary: &'static str,
    /// Timeline progress at which this entry lights up.
    pub progress_threshold: f64,
}

pub const HERO_NAME: &str = "Jordan Avery";
pub const HERO_TAGLINE: &str = "Full-stack engineer building fast, resilient web software";
pub const HERO_BLURB: &str = "I design systems that stay quick under load and interfaces that stay out of the way. Lately that means Rust on the server, WASM in the browser and a lot of thinking about offline-first data.";

pub const PROJECTS: &[Project] = &[
    Project {
        name: "Driftwood",
        description: "Offline-first field notes app with conflict-free sync across devices.",
        tech: &["Rust", "CRDTs", "IndexedDB", "Leptos"],
        link: "https://github.com/jordanavery/driftwood",
    },
    Project {
        name: "Lanternfish",
        description: "Log search service that indexes a few million lines per second on one box.",
        tech: &["Rust", "Tokio", "Tantivy"],
        link: "https://github.com/jordanavery/lanternfish",
    },
    Project {
        name: "Keel",
        description: "Zero-config deploy previews for static sites, built on object storage.",
        tech: &["Go", "S3", "Terraform"],
        link: "https://github.com/jordanavery/keel",
    },
];

pub const SKILLS: &[SkillGroup] = &[
    SkillGroup {
        title: "Frontend",
        skills: &["TypeScript", "React", "Leptos", "WebAssembly", "Tailwind", "Accessibility"],
    },
    SkillGroup {
        title: "Backend",
        skills: &["Rust", "Go", "Axum", "PostgreSQL", "Redis", "gRPC"],
    },
    SkillGroup {
        title: "Infrastructure",
        skills: &["Kubernetes", "Terraform", "AWS", "Observability", "CI/CD"],
    },
];

pub const JOURNEY: &[JourneyEntry] = &[
    JourneyEntry {
        id: "first-job",
        period: "2014",
        role: "Junior Developer",
        org: "Harbor Analytics",
        summary: "Shipped dashboards and learned why slow queries are everyone's problem.",
        progress_threshold: 0.1,
    },
    JourneyEntry {
        id: "platform",
        period: "2017",
        role: "Software Engineer",
        org: "Northwind Logistics",
        summary: "Moved route planning from nightly batches to a streaming pipeline.",
        progress_threshold: 0.3,
    },
    JourneyEntry {
        id: "senior",
        period: "2020",
        role: "Senior Engineer",
        org: "Tidewater Health",
        summary: "Led the offline-capable clinician app used across rural clinics.",
        progress_threshold: 0.6,
    },
    JourneyEntry {
        id: "staff",
        period: "2023",
        role: "Staff Engineer",
        org: "Independent",
        summary: "Consulting on Rust services and WASM frontends, writing about what works.",
        progress_threshold: 0.9,
    },
];

pub const SOCIAL_LINKS: &[(&str, &str, &str)] = &[
    ("GitHub", "https://github.com/jordanavery", "devicon-github-plain"),
    ("LinkedIn", "https://linkedin.com/in/jordanavery", "devicon-linkedin-plain"),
];

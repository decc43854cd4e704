use rss::{
    extension::atom::{AtomExtensionBuilder, Link},
    CategoryBuilder, Channel, ChannelBuilder, GuidBuilder, ItemBuilder,
};

use crate::{
    blog::BlogPost,
    config::{BLOG_DESCRIPTION, BLOG_TITLE, CONTACT_EMAIL, SITE_TITLE, SITE_URL},
};

pub fn post_url(slug: &str) -> String {
    format!("{SITE_URL}/blog/{slug}")
}

/// RSS 2.0 channel for the given (already published, sorted) posts.
pub fn build_channel(posts: &[BlogPost], build_time: &str) -> Channel {
    let items = posts
        .iter()
        .map(|p| {
            let link = post_url(&p.slug);
            let guid = GuidBuilder::default().value(&link).permalink(true).build();
            let categories = p
                .tags
                .iter()
                .map(|t| CategoryBuilder::default().name(t.clone()).build())
                .collect::<Vec<_>>();
            // midnight UTC, the feed only knows calendar dates
            let pub_date = p
                .date
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc().to_rfc2822());
            ItemBuilder::default()
                .title(p.title.clone())
                .description(p.excerpt.clone())
                .author(format!("{CONTACT_EMAIL} ({SITE_TITLE})"))
                .pub_date(pub_date)
                .link(link)
                .guid(guid)
                .categories(categories)
                .build()
        })
        .collect::<Vec<_>>();

    let mut atom_link = Link::default();
    atom_link.set_rel("self");
    atom_link.set_href(format!("{SITE_URL}/rss.xml"));
    atom_link.set_mime_type("application/rss+xml".to_string());

    let last_build_date = chrono::DateTime::parse_from_rfc3339(build_time)
        .ok()
        .map(|d| d.to_rfc2822());

    ChannelBuilder::default()
        .title(BLOG_TITLE)
        .description(BLOG_DESCRIPTION)
        .link(format!("{SITE_URL}/blog"))
        .language("en-us".to_string())
        .ttl("60".to_string())
        .last_build_date(last_build_date)
        .atom_ext(AtomExtensionBuilder::default().links(vec![atom_link]).build())
        .items(items)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blog::tests::post;
    use chrono::NaiveDate;

    #[test]
    fn test_channel_items() {
        let mut first = post("hello_world", "Meta", &["intro", "site"]);
        first.title = "Hello".to_string();
        first.excerpt = "First post".to_string();
        first.date = NaiveDate::from_ymd_opt(2024, 5, 5);
        let undated = post("undated", "Meta", &[]);

        let channel = build_channel(&[first, undated], "2024-06-01T12:00:00+00:00");
        assert_eq!(channel.title(), BLOG_TITLE);
        let built = chrono::DateTime::parse_from_rfc3339("2024-06-01T12:00:00+00:00").unwrap();
        assert_eq!(
            channel.last_build_date(),
            Some(built.to_rfc2822().as_str())
        );

        let items = channel.items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title(), Some("Hello"));
        assert_eq!(items[0].description(), Some("First post"));
        assert_eq!(items[0].link(), Some(post_url("hello_world").as_str()));
        let published = NaiveDate::from_ymd_opt(2024, 5, 5)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap()
            .and_utc();
        assert_eq!(items[0].pub_date(), Some(published.to_rfc2822().as_str()));
        assert_eq!(items[0].categories().len(), 2);
        assert_eq!(items[1].pub_date(), None);
    }

    #[test]
    fn test_bad_build_time_is_omitted() {
        let channel = build_channel(&[], "not a time");
        assert_eq!(channel.last_build_date(), None);
        assert!(channel.items().is_empty());
    }
}

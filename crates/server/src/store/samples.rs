use chrono::{Duration, Utc};
use linkshelf_common::Bookmark;
use uuid::Uuid;

struct Sample {
    url: &'static str,
    title: &'static str,
    description: Option<&'static str>,
    tags: &'static [&'static str],
}

const SAMPLES: &[Sample] = &[
    Sample {
        url: "https://react.dev",
        title: "React",
        description: Some("The library for web and native user interfaces"),
        tags: &["react", "javascript", "frontend"],
    },
    Sample {
        url: "https://nodejs.org",
        title: "Node.js",
        description: Some("JavaScript runtime built on the V8 engine"),
        tags: &["nodejs", "javascript", "backend"],
    },
    Sample {
        url: "https://doc.rust-lang.org/book/",
        title: "The Rust Programming Language",
        description: None,
        tags: &["rust", "docs"],
    },
    Sample {
        url: "https://developer.mozilla.org",
        title: "MDN Web Docs",
        description: Some("Resources for developers, by developers"),
        tags: &["docs", "web"],
    },
];

/// Seed entries, oldest first so the last one reads as the most recent.
pub(super) fn sample_bookmarks() -> Vec<Bookmark> {
    let now = Utc::now();
    let count = SAMPLES.len() as i64;
    SAMPLES
        .iter()
        .enumerate()
        .map(|(i, sample)| Bookmark {
            id: Uuid::new_v4().to_string(),
            url: sample.url.to_string(),
            title: sample.title.to_string(),
            description: sample.description.map(str::to_string),
            tags: Some(sample.tags.iter().map(|t| t.to_string()).collect()),
            created_at: now - Duration::minutes(count - i as i64),
        })
        .collect()
}

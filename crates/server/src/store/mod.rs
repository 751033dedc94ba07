//! In-memory bookmark collection.
//!
//! Insertion order is recency order; nothing here sorts or paginates.

use chrono::Utc;
use linkshelf_common::validation::{validate_payload, ValidationErrors, ValidationMode};
use linkshelf_common::{Bookmark, BookmarkPayload, TagsField};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

mod samples;

/// Store handle shared by the HTTP handlers. One logical writer at a time.
pub type SharedStore = Arc<Mutex<BookmarkStore>>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),
    #[error("Bookmark not found")]
    NotFound,
}

#[derive(Debug, Default)]
pub struct BookmarkStore {
    bookmarks: Vec<Bookmark>,
}

impl BookmarkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with a few sample bookmarks.
    pub fn with_samples() -> Self {
        Self {
            bookmarks: samples::sample_bookmarks(),
        }
    }

    pub fn into_shared(self) -> SharedStore {
        Arc::new(Mutex::new(self))
    }

    pub fn len(&self) -> usize {
        self.bookmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Bookmark> {
        self.bookmarks.iter().find(|b| b.id == id)
    }

    /// All bookmarks, or those tagged with `tag_filter`. An empty filter means no filter.
    ///
    /// Stored tags are always lowercase, so lowercasing the filter is enough.
    pub fn list(&self, tag_filter: Option<&str>) -> Vec<Bookmark> {
        match tag_filter.filter(|tag| !tag.is_empty()) {
            None => self.bookmarks.clone(),
            Some(tag) => {
                let tag = tag.to_lowercase();
                self.bookmarks
                    .iter()
                    .filter(|b| b.tags.as_ref().is_some_and(|tags| tags.contains(&tag)))
                    .cloned()
                    .collect()
            }
        }
    }

    pub fn create(&mut self, payload: BookmarkPayload) -> Result<Bookmark, StoreError> {
        validate_payload(&payload, ValidationMode::Create)?;

        let BookmarkPayload {
            url,
            title,
            description,
            tags,
        } = payload;
        let bookmark = Bookmark {
            id: Uuid::new_v4().to_string(),
            url: url.unwrap_or_default(),
            title: title.unwrap_or_default(),
            description,
            tags: tags.and_then(TagsField::into_list),
            created_at: Utc::now(),
        };
        debug!(bookmark_id = %bookmark.id, "Bookmark created.");
        self.bookmarks.push(bookmark.clone());
        Ok(bookmark)
    }

    /// Merges the supplied fields over the stored record. `id` and
    /// `created_at` are never touched. Unknown ids fail before validation.
    pub fn update(&mut self, id: &str, payload: BookmarkPayload) -> Result<Bookmark, StoreError> {
        let existing = self
            .bookmarks
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(StoreError::NotFound)?;

        validate_payload(&payload, ValidationMode::Update)?;

        if let Some(url) = payload.url {
            existing.url = url;
        }
        if let Some(title) = payload.title {
            existing.title = title;
        }
        if let Some(description) = payload.description {
            existing.description = Some(description);
        }
        if let Some(tags) = payload.tags.and_then(TagsField::into_list) {
            existing.tags = Some(tags);
        }
        debug!(bookmark_id = %id, "Bookmark updated.");
        Ok(existing.clone())
    }

    pub fn delete(&mut self, id: &str) -> Result<Bookmark, StoreError> {
        let index = self
            .bookmarks
            .iter()
            .position(|b| b.id == id)
            .ok_or(StoreError::NotFound)?;
        debug!(bookmark_id = %id, "Bookmark deleted.");
        Ok(self.bookmarks.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkshelf_common::validation::{
        TAGS_NOT_LOWERCASE, TITLE_REQUIRED, TITLE_TOO_LONG, TOO_MANY_TAGS, URL_INVALID,
        URL_REQUIRED,
    };

    fn validation_message(err: StoreError) -> String {
        match err {
            StoreError::Validation(errors) => errors.to_string(),
            StoreError::NotFound => panic!("expected a validation error"),
        }
    }

    fn seeded() -> (BookmarkStore, Bookmark, Bookmark) {
        let mut store = BookmarkStore::new();
        let react = store
            .create(
                BookmarkPayload::new("https://react.dev", "React")
                    .with_tags(["react", "javascript"]),
            )
            .unwrap();
        let node = store
            .create(BookmarkPayload::new("https://nodejs.org", "Node").with_tags(["nodejs"]))
            .unwrap();
        (store, react, node)
    }

    #[test]
    fn test_create_then_list_contains_record() {
        let mut store = BookmarkStore::new();
        let payload = BookmarkPayload::new("https://example.com", "Example")
            .with_description("An example")
            .with_tags(["rust", "web"]);
        let created = store.create(payload).unwrap();

        let listed = store.list(None);
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], created);
        assert_eq!(created.url, "https://example.com");
        assert_eq!(created.title, "Example");
        assert_eq!(created.description.as_deref(), Some("An example"));
        assert_eq!(created.tags, Some(vec!["rust".to_string(), "web".to_string()]));
        assert!(!created.id.is_empty());
    }

    #[test]
    fn test_create_assigns_unique_ids_and_appends() {
        let (store, react, node) = seeded();
        assert_ne!(react.id, node.id);
        let ids: Vec<_> = store.list(None).into_iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![react.id, node.id]);
    }

    #[test]
    fn test_create_rejects_invalid_payloads() {
        let mut store = BookmarkStore::new();
        let cases = [
            (BookmarkPayload { title: Some("Test".into()), ..Default::default() }, URL_REQUIRED),
            (BookmarkPayload::new("not-a-valid-url", "Test"), URL_INVALID),
            (BookmarkPayload::new("https://example.com", "a".repeat(201)), TITLE_TOO_LONG),
            (
                BookmarkPayload::new("https://example.com", "Test")
                    .with_tags(["tag1", "tag2", "tag3", "tag4", "tag5", "tag6"]),
                TOO_MANY_TAGS,
            ),
            (
                BookmarkPayload::new("https://example.com", "Test")
                    .with_tags(["React", "JavaScript"]),
                TAGS_NOT_LOWERCASE,
            ),
        ];
        for (payload, expected) in cases {
            let message = validation_message(store.create(payload).unwrap_err());
            assert!(message.contains(expected), "{message:?} should contain {expected:?}");
        }
        assert!(store.is_empty());
    }

    #[test]
    fn test_list_filters_by_tag() {
        let (store, react, _) = seeded();
        let filtered = store.list(Some("react"));
        assert_eq!(filtered, vec![react.clone()]);

        assert_eq!(store.list(Some("REACT")), vec![react]);
        assert!(store.list(Some("python")).is_empty());
        assert_eq!(store.list(Some("")).len(), 2);
    }

    #[test]
    fn test_list_is_idempotent() {
        let (store, _, _) = seeded();
        assert_eq!(store.list(None), store.list(None));
        assert_eq!(store.list(Some("nodejs")), store.list(Some("nodejs")));
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let (mut store, _, _) = seeded();
        let valid = BookmarkPayload::new("https://example.com", "Fine");
        let invalid = BookmarkPayload::new("nope", "");
        assert_eq!(store.update("missing", valid), Err(StoreError::NotFound));
        assert_eq!(store.update("missing", invalid), Err(StoreError::NotFound));
    }

    #[test]
    fn test_partial_update_keeps_other_fields() {
        let (mut store, react, _) = seeded();
        let payload = BookmarkPayload {
            description: Some("x".to_string()),
            ..Default::default()
        };
        let updated = store.update(&react.id, payload).unwrap();

        assert_eq!(updated.description.as_deref(), Some("x"));
        assert_eq!(updated.id, react.id);
        assert_eq!(updated.url, react.url);
        assert_eq!(updated.title, react.title);
        assert_eq!(updated.tags, react.tags);
        assert_eq!(updated.created_at, react.created_at);
        assert_eq!(store.get(&react.id), Some(&updated));
    }

    #[test]
    fn test_update_replaces_supplied_fields_in_place() {
        let (mut store, react, node) = seeded();
        let payload = BookmarkPayload::new("https://react.dev/learn", "Learn React")
            .with_tags(["react"]);
        let updated = store.update(&react.id, payload).unwrap();
        assert_eq!(updated.url, "https://react.dev/learn");
        assert_eq!(updated.title, "Learn React");
        assert_eq!(updated.tags, Some(vec!["react".to_string()]));

        let ids: Vec<_> = store.list(None).into_iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![react.id, node.id]);
    }

    #[test]
    fn test_failed_update_mutates_nothing() {
        let (mut store, react, _) = seeded();
        let payload = BookmarkPayload {
            title: Some(String::new()),
            description: Some("should not land".to_string()),
            ..Default::default()
        };
        let message = validation_message(store.update(&react.id, payload).unwrap_err());
        assert_eq!(message, TITLE_REQUIRED);
        assert_eq!(store.get(&react.id), Some(&react));
    }

    #[test]
    fn test_delete_returns_removed_record() {
        let (mut store, react, node) = seeded();
        let removed = store.delete(&react.id).unwrap();
        assert_eq!(removed, react);
        assert_eq!(store.list(None), vec![node]);
        assert_eq!(store.delete(&react.id), Err(StoreError::NotFound));
    }

    #[test]
    fn test_samples_satisfy_invariants() {
        let store = BookmarkStore::with_samples();
        assert!(!store.is_empty());
        for bookmark in store.list(None) {
            let payload = BookmarkPayload {
                url: Some(bookmark.url.clone()),
                title: Some(bookmark.title.clone()),
                description: bookmark.description.clone(),
                tags: bookmark.tags.clone().map(TagsField::List),
            };
            assert!(validate_payload(&payload, ValidationMode::Create).is_ok());
        }
    }
}

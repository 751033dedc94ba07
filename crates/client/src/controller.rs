//! Client-side view state over the remote bookmark collection.
//!
//! The controller never commits optimistically: the local cache only changes
//! after the server confirms a mutation. Every remote failure replaces the
//! single current error; every success clears it.

use linkshelf_common::validation::{is_valid_url, validate_payload, ValidationMode};
use linkshelf_common::{Bookmark, BookmarkPayload};
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::api_client::BookmarkApi;
use crate::error::{ClientError, PreferencesError};
use crate::preferences::Preferences;

pub const DEFAULT_PAGE_SIZE: usize = 12;

pub struct BookmarkController<A> {
    api: A,
    bookmarks: Vec<Bookmark>,
    tag_filter: Option<String>,
    search: String,
    page: usize,
    page_size: usize,
    error: Option<String>,
    preferences: Preferences,
    preferences_path: Option<PathBuf>,
}

impl<A: BookmarkApi> BookmarkController<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            bookmarks: Vec::new(),
            tag_filter: None,
            search: String::new(),
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
            error: None,
            preferences: Preferences::default(),
            preferences_path: None,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Loads preferences from `path` and persists later changes there.
    pub fn with_preferences_file(mut self, path: impl Into<PathBuf>) -> Result<Self, PreferencesError> {
        let path = path.into();
        self.preferences = Preferences::load(&path)?;
        self.preferences_path = Some(path);
        Ok(self)
    }

    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn tag_filter(&self) -> Option<&str> {
        self.tag_filter.as_deref()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn dark_mode(&self) -> bool {
        self.preferences.dark_mode
    }

    fn record<T>(&mut self, result: Result<T, ClientError>) -> Option<T> {
        match result {
            Ok(value) => {
                self.error = None;
                Some(value)
            }
            Err(e) => {
                warn!(error = %e, "Bookmark operation failed.");
                self.error = Some(e.to_string());
                None
            }
        }
    }

    /// Replaces the cache with the server's list for the active tag filter.
    pub async fn fetch(&mut self) -> bool {
        let result = self.api.list(self.tag_filter.as_deref()).await;
        match self.record(result) {
            Some(bookmarks) => {
                debug!(count = bookmarks.len(), "Fetched bookmarks.");
                self.bookmarks = bookmarks;
                self.page = 0;
                true
            }
            None => false,
        }
    }

    pub async fn create(&mut self, payload: BookmarkPayload) -> Option<Bookmark> {
        let result = match validate_payload(&payload, ValidationMode::Create) {
            Ok(()) => self.api.create(&payload).await,
            Err(errors) => Err(errors.into()),
        };
        let created = self.record(result)?;
        self.bookmarks.insert(0, created.clone());
        self.page = 0;
        Some(created)
    }

    pub async fn update(&mut self, id: &str, payload: BookmarkPayload) -> Option<Bookmark> {
        let result = match validate_payload(&payload, ValidationMode::Update) {
            Ok(()) => self.api.update(id, &payload).await,
            Err(errors) => Err(errors.into()),
        };
        let updated = self.record(result)?;
        if let Some(slot) = self.bookmarks.iter_mut().find(|b| b.id == updated.id) {
            *slot = updated.clone();
        }
        Some(updated)
    }

    pub async fn delete(&mut self, id: &str) -> Option<Bookmark> {
        let result = self.api.delete(id).await;
        let removed = self.record(result)?;
        self.bookmarks.retain(|b| b.id != removed.id);
        self.clamp_page();
        Some(removed)
    }

    /// Best-effort title auto-fill. Never touches the error state.
    pub async fn fetch_title(&self, url: &str) -> Option<String> {
        if !is_valid_url(url) {
            return None;
        }
        match self.api.fetch_title(url).await {
            Ok(title) => title,
            Err(e) => {
                debug!(url = %url, error = %e, "Title lookup failed.");
                None
            }
        }
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 0;
    }

    /// Sets the tag filter (lowercased; empty clears it) and refetches.
    pub async fn set_tag_filter(&mut self, tag: Option<&str>) -> bool {
        self.tag_filter = tag
            .map(str::to_lowercase)
            .filter(|tag| !tag.is_empty());
        self.fetch().await
    }

    /// Cached bookmarks whose title or url contains the search string, ignoring case.
    pub fn filtered(&self) -> Vec<&Bookmark> {
        let needle = self.search.to_lowercase();
        self.bookmarks
            .iter()
            .filter(|b| {
                needle.is_empty()
                    || b.title.to_lowercase().contains(&needle)
                    || b.url.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn page_count(&self) -> usize {
        self.filtered().len().div_ceil(self.page_size)
    }

    /// The current page of the filtered view.
    pub fn visible(&self) -> Vec<&Bookmark> {
        self.filtered()
            .into_iter()
            .skip(self.page * self.page_size)
            .take(self.page_size)
            .collect()
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
        self.clamp_page();
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page + 1);
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    fn clamp_page(&mut self) {
        let last = self.page_count().saturating_sub(1);
        if self.page > last {
            self.page = last;
        }
    }

    pub fn set_dark_mode(&mut self, enabled: bool) -> Result<(), PreferencesError> {
        self.preferences.dark_mode = enabled;
        if let Some(path) = &self.preferences_path {
            self.preferences.save(path)?;
        }
        Ok(())
    }

    pub fn toggle_dark_mode(&mut self) -> Result<bool, PreferencesError> {
        let enabled = !self.preferences.dark_mode;
        self.set_dark_mode(enabled)?;
        Ok(enabled)
    }
}

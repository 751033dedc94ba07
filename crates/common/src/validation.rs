//! Field rules for bookmark payloads, shared by the server and the client.
//!
//! Rules are evaluated in a fixed order (url, title, description, tags) and
//! every violation is collected, so the resulting message list is stable for
//! a given payload.

use std::fmt;

use url::Url;

use crate::models::{BookmarkPayload, TagsField};

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_DESCRIPTION_LEN: usize = 500;
pub const MAX_TAGS: usize = 5;

pub const URL_REQUIRED: &str = "URL is required";
pub const URL_INVALID: &str = "URL must be valid";
pub const TITLE_REQUIRED: &str = "Title is required";
pub const TITLE_TOO_LONG: &str = "Title must be max 200 characters";
pub const DESCRIPTION_TOO_LONG: &str = "Description must be max 500 characters";
pub const TAGS_NOT_ARRAY: &str = "Tags must be an array";
pub const TOO_MANY_TAGS: &str = "Maximum 5 tags allowed";
pub const TAGS_NOT_LOWERCASE: &str = "Tags must be lowercase";

/// Create requires `url` and `title`; update only checks what was supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    Create,
    Update,
}

/// One or more violated field rules, in rule order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<String>);

impl ValidationErrors {
    pub fn messages(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Returns `true` when `value` parses as an absolute URL.
pub fn is_valid_url(value: &str) -> bool {
    Url::parse(value).is_ok()
}

/// Collects every rule violation of `payload` for the given mode.
pub fn collect_errors(payload: &BookmarkPayload, mode: ValidationMode) -> Vec<String> {
    let mut errors = Vec::new();

    match payload.url.as_deref() {
        None if mode == ValidationMode::Create => errors.push(URL_REQUIRED.to_string()),
        None => {}
        Some("") => errors.push(URL_REQUIRED.to_string()),
        Some(url) if !is_valid_url(url) => errors.push(URL_INVALID.to_string()),
        Some(_) => {}
    }

    match payload.title.as_deref() {
        None if mode == ValidationMode::Create => errors.push(TITLE_REQUIRED.to_string()),
        None => {}
        Some("") => errors.push(TITLE_REQUIRED.to_string()),
        Some(title) if title.chars().count() > MAX_TITLE_LEN => {
            errors.push(TITLE_TOO_LONG.to_string())
        }
        Some(_) => {}
    }

    if let Some(description) = payload.description.as_deref() {
        if description.chars().count() > MAX_DESCRIPTION_LEN {
            errors.push(DESCRIPTION_TOO_LONG.to_string());
        }
    }

    if let Some(tags) = &payload.tags {
        if let Some(message) = tags_error(tags) {
            errors.push(message.to_string());
        }
    }

    errors
}

/// The first failing tag rule, if any. The three tag checks never stack.
fn tags_error(tags: &TagsField) -> Option<&'static str> {
    let TagsField::List(tags) = tags else {
        return Some(TAGS_NOT_ARRAY);
    };
    if tags.len() > MAX_TAGS {
        return Some(TOO_MANY_TAGS);
    }
    if tags.iter().any(|tag| *tag != tag.to_lowercase()) {
        return Some(TAGS_NOT_LOWERCASE);
    }
    None
}

pub fn validate_payload(
    payload: &BookmarkPayload,
    mode: ValidationMode,
) -> Result<(), ValidationErrors> {
    let errors = collect_errors(payload, mode);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}

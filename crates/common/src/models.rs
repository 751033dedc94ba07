use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A saved link with its descriptive metadata.
/// `id` and `created_at` are assigned by the server and never change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: String,
    pub url: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

/// The `tags` field as it arrives on the wire.
///
/// Anything that is not an array of strings is kept as `Invalid` so the
/// validator can report it instead of failing the whole body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagsField {
    List(Vec<String>),
    Invalid(serde_json::Value),
}

impl TagsField {
    /// The tag list, if it arrived with the right shape.
    pub fn into_list(self) -> Option<Vec<String>> {
        match self {
            TagsField::List(tags) => Some(tags),
            TagsField::Invalid(_) => None,
        }
    }
}

impl From<Vec<String>> for TagsField {
    fn from(tags: Vec<String>) -> Self {
        TagsField::List(tags)
    }
}

/// Body of a create or update request. Every field is optional so the same
/// shape serves both full creates and partial updates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookmarkPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<TagsField>,
}

impl BookmarkPayload {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(TagsField::List(tags.into_iter().map(Into::into).collect()));
        self
    }
}

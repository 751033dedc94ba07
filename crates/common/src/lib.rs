pub mod api;
pub mod models;
pub mod validation;

pub use api::{ApiResponse, MetadataResponse};
pub use models::{Bookmark, BookmarkPayload, TagsField};
pub use validation::{ValidationErrors, ValidationMode};

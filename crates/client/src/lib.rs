pub mod api_client;
pub mod controller;
pub mod error;
pub mod preferences;

pub use api_client::{BookmarkApi, HttpBookmarkApi};
pub use controller::BookmarkController;
pub use error::ClientError;
pub use preferences::Preferences;

pub mod bookmark_routes;
pub mod metadata_routes;

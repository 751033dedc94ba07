pub mod config;
pub mod metadata;
pub mod store;
pub mod version;
pub mod web;

pub mod batchread;
pub mod config;
pub mod error;
pub mod feature_store;
pub mod metadata;
pub mod model;
pub mod security;

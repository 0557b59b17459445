pub mod client;
pub mod filename;
pub mod models;
pub mod response;

pub use client::{ApiClient, MediaPayload};
pub use models::ApiConfig;

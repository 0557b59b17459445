pub mod download_coordinator;
pub mod request_builder;
pub mod saver;

pub use download_coordinator::DownloadCoordinator;
pub use request_builder::{build_request, RequestForm};
pub use saver::DirectorySaver;

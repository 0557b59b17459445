pub mod error;
pub mod model;
pub mod platform;

pub use error::AppError;
pub use model::{
    DownloadRequest, FetchedFile, MediaType, Platform, ProgressStage, ProgressState,
    ProgressUpdate, Toast, ToastKind,
};

use std::path::PathBuf;
use std::sync::Arc;

use futures::channel::mpsc;
use futures::stream::{self, BoxStream};
use futures::StreamExt;

use super::saver::FileSaver;
use crate::{
    api::{ApiClient, MediaPayload},
    domain::{AppError, DownloadRequest, ProgressStage, ProgressUpdate},
    utils::apply_custom_stem,
};

pub const TRACING_TARGET: &str = "universal_media_downloader::coordinator";

pub const PROCESSING_MESSAGE: &str = "Analyzing media and preparing download...";
pub const SINGLE_DOWNLOAD_MESSAGE: &str = "Downloading your media file...";
pub const SINGLE_COMPLETE_MESSAGE: &str = "Your download is ready!";
pub const MULTI_COMPLETE_MESSAGE: &str = "All files downloaded";

/// Outcome of a successful request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadSummary {
    /// Name shown to the user, the first file for multi-file results.
    pub primary_filename: String,
    pub saved: Vec<PathBuf>,
}

#[derive(Clone)]
pub struct DownloadCoordinator {
    api_client: ApiClient,
    saver: Arc<dyn FileSaver>,
}

impl DownloadCoordinator {
    pub fn new(api_client: ApiClient, saver: Arc<dyn FileSaver>) -> Self {
        Self { api_client, saver }
    }

    /// Fetches and saves everything behind `request`.
    ///
    /// `notify` sees `Processing`, then one `Downloading` per file, then
    /// exactly one terminal `Complete` or `Error`.
    pub async fn run<F>(&self, request: DownloadRequest, mut notify: F) -> Result<DownloadSummary, AppError>
    where
        F: FnMut(ProgressUpdate) + Send,
    {
        tracing::info!(
            target: TRACING_TARGET,
            url = %request.url,
            platform = request.platform.map(|p| p.as_str()),
            "Starting download"
        );
        notify(ProgressUpdate::new(ProgressStage::Processing, PROCESSING_MESSAGE));

        match self.fetch_and_save(&request, &mut notify).await {
            Ok((summary, message)) => {
                tracing::info!(
                    target: TRACING_TARGET,
                    filename = %summary.primary_filename,
                    files = summary.saved.len(),
                    "Download complete"
                );
                notify(
                    ProgressUpdate::new(ProgressStage::Complete, message)
                        .with_filename(summary.primary_filename.clone()),
                );
                Ok(summary)
            }
            Err(err) => {
                tracing::warn!(target: TRACING_TARGET, url = %request.url, error = %err, "Download failed");
                notify(ProgressUpdate::new(ProgressStage::Error, err.to_string()));
                Err(err)
            }
        }
    }

    async fn fetch_and_save<F>(
        &self,
        request: &DownloadRequest,
        notify: &mut F,
    ) -> Result<(DownloadSummary, &'static str), AppError>
    where
        F: FnMut(ProgressUpdate) + Send,
    {
        let payload = self
            .api_client
            .fetch_media(&request.url, request.media_type)
            .await?;

        match payload {
            MediaPayload::Single(mut file) => {
                if let Some(custom) = &request.filename {
                    file.filename = apply_custom_stem(&file.filename, custom);
                }

                notify(
                    ProgressUpdate::new(ProgressStage::Downloading, SINGLE_DOWNLOAD_MESSAGE)
                        .with_filename(file.filename.clone()),
                );
                let path = self.saver.save(&file).await?;

                Ok((
                    DownloadSummary {
                        primary_filename: file.filename,
                        saved: vec![path],
                    },
                    SINGLE_COMPLETE_MESSAGE,
                ))
            }
            MediaPayload::Multiple(files) => {
                let total = files.len();
                let mut saved = Vec::with_capacity(total);
                let mut primary_filename = None;

                // One at a time, in the order the backend listed them.
                for (index, mut file) in files.into_iter().enumerate() {
                    if file.filename.trim().is_empty() {
                        file.filename = format!("file_{}", index);
                    }

                    notify(
                        ProgressUpdate::new(
                            ProgressStage::Downloading,
                            format!("Downloading file {} of {}...", index + 1, total),
                        )
                        .with_filename(file.filename.clone()),
                    );
                    saved.push(self.saver.save(&file).await?);
                    primary_filename.get_or_insert(file.filename);
                }

                Ok((
                    DownloadSummary {
                        primary_filename: primary_filename
                            .or_else(|| request.filename.clone())
                            .unwrap_or_else(|| request.url.clone()),
                        saved,
                    },
                    MULTI_COMPLETE_MESSAGE,
                ))
            }
        }
    }

    /// Runs the request in the background, yielding each progress update.
    /// The stream ends after the terminal update.
    pub fn run_stream(&self, request: DownloadRequest) -> BoxStream<'static, ProgressUpdate> {
        let (tx, rx) = mpsc::unbounded();
        let coordinator = self.clone();

        let driver = async move {
            let _ = coordinator
                .run(request, move |update| {
                    let _ = tx.unbounded_send(update);
                })
                .await;
        };

        stream::select(
            rx,
            stream::once(driver).filter_map(|()| async { None::<ProgressUpdate> }),
        )
        .boxed()
    }
}

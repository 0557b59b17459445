use reqwest::header::ACCEPT;
use reqwest::{Client, Response};

use super::filename::{derive_filename, FilenameHints};
use super::models::{ApiConfig, FileEntry};
use super::response::{status_message, ResponseBody};
use crate::domain::{AppError, FetchedFile, MediaType};

pub const TRACING_TARGET: &str = "universal_media_downloader::api";

const API_KEY_HEADER: &str = "x-api-key";

pub type Result<T> = std::result::Result<T, AppError>;

/// What the backend handed back for one request.
#[derive(Debug, Clone)]
pub enum MediaPayload {
    Single(FetchedFile),
    /// Ordered as listed by the backend.
    Multiple(Vec<FetchedFile>),
}

#[derive(Clone)]
pub struct ApiClient {
    config: ApiConfig,
    http: Client,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn api_key(&self) -> Result<&str> {
        self.config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(AppError::Configuration)
    }

    /// Asks the backend for the media behind `url` and collects the payload.
    pub async fn fetch_media(&self, url: &str, media_type: Option<MediaType>) -> Result<MediaPayload> {
        let api_key = self.api_key()?;

        let mut query = vec![("url", url)];
        if let Some(media_type) = media_type {
            query.push(("media_type", media_type.as_str()));
        }

        tracing::info!(
            target: TRACING_TARGET,
            endpoint = %self.config.api_url,
            url,
            media_type = media_type.map(|m| m.as_str()),
            "Requesting media"
        );

        let response = self
            .http
            .get(&self.config.api_url)
            .query(&query)
            .header(API_KEY_HEADER, api_key)
            .header(ACCEPT, "*/*")
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = failure_message(response).await;
            tracing::warn!(
                target: TRACING_TARGET,
                status = status.as_u16(),
                message = %message,
                "Backend rejected request"
            );
            return Err(AppError::Download(message));
        }

        let headers = response.headers().clone();
        let bytes = response.bytes().await.map_err(network_error)?;

        match ResponseBody::classify(&headers, bytes) {
            ResponseBody::Error(message) => {
                tracing::warn!(target: TRACING_TARGET, message = %message, "Backend returned error payload");
                Err(AppError::Download(message))
            }
            ResponseBody::FileList(entries) => {
                tracing::info!(target: TRACING_TARGET, count = entries.len(), "Backend returned file list");
                let files = self.fetch_listed_files(&entries, api_key).await?;
                Ok(MediaPayload::Multiple(files))
            }
            ResponseBody::Binary {
                bytes,
                content_type,
                content_disposition,
            } => {
                if bytes.is_empty() {
                    return Err(AppError::EmptyPayload);
                }

                let filename = derive_filename(&FilenameHints {
                    content_disposition: content_disposition.as_deref(),
                    content_type: content_type.as_deref(),
                    source_url: url,
                });

                tracing::info!(
                    target: TRACING_TARGET,
                    filename = %filename,
                    size = bytes.len(),
                    "Received media payload"
                );

                Ok(MediaPayload::Single(FetchedFile {
                    blob: bytes,
                    filename,
                }))
            }
        }
    }

    /// Fetches each entry in order, one at a time. The first failure aborts
    /// the rest.
    async fn fetch_listed_files(&self, entries: &[FileEntry], api_key: &str) -> Result<Vec<FetchedFile>> {
        let mut files = Vec::with_capacity(entries.len());

        for (index, entry) in entries.iter().enumerate() {
            let file_url = self.config.file_url(&entry.download_url);
            tracing::debug!(
                target: TRACING_TARGET,
                position = index + 1,
                total = entries.len(),
                filename = %entry.filename,
                url = %file_url,
                "Fetching listed file"
            );

            let response = self
                .http
                .get(&file_url)
                .header(API_KEY_HEADER, api_key)
                .header(ACCEPT, "*/*")
                .send()
                .await
                .map_err(|e| listed_file_error(&entry.filename, e))?;

            let status = response.status();
            if !status.is_success() {
                return Err(AppError::Download(format!(
                    "Failed to fetch file: {} ({})",
                    entry.filename,
                    status.as_u16()
                )));
            }

            let blob = response
                .bytes()
                .await
                .map_err(|e| listed_file_error(&entry.filename, e))?;

            files.push(FetchedFile {
                blob,
                filename: entry.filename.clone(),
            });
        }

        Ok(files)
    }
}

async fn failure_message(response: Response) -> String {
    let status = response.status();
    // Any readable, non-empty body wins over the canned text.
    match response.text().await {
        Ok(text) if !text.is_empty() => text,
        _ => status_message(status),
    }
}

fn network_error(err: reqwest::Error) -> AppError {
    tracing::error!(target: TRACING_TARGET, error = %err, "Request failed");
    AppError::Network
}

fn listed_file_error(filename: &str, err: reqwest::Error) -> AppError {
    tracing::error!(target: TRACING_TARGET, filename, error = %err, "Listed file request failed");
    AppError::Download(format!("Failed to fetch file: {}", filename))
}

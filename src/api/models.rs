use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/download";

pub const ENV_API_URL: &str = "MEDIA_API_URL";
pub const ENV_API_KEY: &str = "MEDIA_API_KEY";
pub const ENV_FILES_URL: &str = "MEDIA_FILES_URL";
pub const ENV_DOWNLOAD_DIR: &str = "MEDIA_DOWNLOAD_DIR";

/// One entry of a multi-file response.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct FileEntry {
    pub filename: String,
    pub download_url: String,
}

/// 2xx JSON body listing files that must be fetched individually.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FileListResponse {
    #[serde(default)]
    pub files: Vec<FileEntry>,
}

/// JSON body describing a failure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn into_message(self) -> String {
        self.error
            .filter(|s| !s.is_empty())
            .or(self.message.filter(|s| !s.is_empty()))
            .unwrap_or_else(|| "Download failed".to_string())
    }
}

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    /// Base for file-list follow-up fetches. Derived from `api_url` when unset.
    pub files_url: Option<String>,
    pub download_dir: PathBuf,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            files_url: None,
            download_dir: default_download_dir(),
        }
    }
}

impl ApiConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            api_url: non_empty(ENV_API_URL).unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            api_key: non_empty(ENV_API_KEY),
            files_url: non_empty(ENV_FILES_URL),
            download_dir: non_empty(ENV_DOWNLOAD_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(default_download_dir),
        }
    }

    /// Base URL that relative `download_url` entries are appended to.
    pub fn files_base(&self) -> String {
        if let Some(files_url) = &self.files_url {
            return files_url.trim_end_matches('/').to_string();
        }

        match Url::parse(&self.api_url) {
            Ok(mut url) => {
                let path = url.path().trim_end_matches('/');
                let base = path.strip_suffix("/download").unwrap_or(path).to_string();
                url.set_path(&base);
                url.set_query(None);
                url.set_fragment(None);
                url.as_str().trim_end_matches('/').to_string()
            }
            Err(_) => self
                .api_url
                .trim_end_matches('/')
                .trim_end_matches("/download")
                .to_string(),
        }
    }

    /// Resolves a file-list entry to an absolute URL.
    pub fn file_url(&self, download_url: &str) -> String {
        if Url::parse(download_url).is_ok() {
            return download_url.to_string();
        }
        if download_url.starts_with('/') {
            format!("{}{}", self.files_base(), download_url)
        } else {
            format!("{}/{}", self.files_base(), download_url)
        }
    }
}

fn default_download_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

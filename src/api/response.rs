use bytes::Bytes;
use reqwest::header::{HeaderMap, CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::StatusCode;

use super::models::{ErrorResponse, FileEntry, FileListResponse};

/// Shape of a successful primary response, decided once from the content type.
#[derive(Debug, Clone)]
pub enum ResponseBody {
    /// JSON without a usable file list.
    Error(String),
    /// JSON listing files to fetch one by one.
    FileList(Vec<FileEntry>),
    /// The media bytes themselves.
    Binary {
        bytes: Bytes,
        content_type: Option<String>,
        content_disposition: Option<String>,
    },
}

impl ResponseBody {
    pub fn classify(headers: &HeaderMap, bytes: Bytes) -> Self {
        let content_type = header_str(headers, CONTENT_TYPE.as_str());

        if content_type
            .as_deref()
            .is_some_and(|ct| ct.contains("application/json"))
        {
            return Self::from_json(&bytes);
        }

        Self::Binary {
            bytes,
            content_type,
            content_disposition: header_str(headers, CONTENT_DISPOSITION.as_str()),
        }
    }

    fn from_json(bytes: &[u8]) -> Self {
        if let Ok(list) = serde_json::from_slice::<FileListResponse>(bytes) {
            if !list.files.is_empty() {
                return Self::FileList(list.files);
            }
        }

        let error = serde_json::from_slice::<ErrorResponse>(bytes).unwrap_or_default();
        Self::Error(error.into_message())
    }
}

fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Canned message for a failed status when the body carried none.
pub fn status_message(status: StatusCode) -> String {
    match status.as_u16() {
        400 => "Invalid URL provided".to_string(),
        401 => "Authentication failed - invalid API key".to_string(),
        403 => "Access forbidden".to_string(),
        404 => "Media not found or unsupported platform".to_string(),
        429 => "Rate limit exceeded - please try again later".to_string(),
        500 => "Server error - please try again later".to_string(),
        code => format!("Download failed ({})", code),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn test_classify_file_list() {
        let body = Bytes::from_static(
            br#"{"status":"ok","files":[{"file_id":"1","filename":"a.mp4","download_url":"/f/1"}]}"#,
        );
        match ResponseBody::classify(&headers(&[("content-type", "application/json")]), body) {
            ResponseBody::FileList(files) => {
                assert_eq!(files.len(), 1);
                assert_eq!(files[0].filename, "a.mp4");
                assert_eq!(files[0].download_url, "/f/1");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_classify_json_without_files_is_error() {
        let body = Bytes::from_static(br#"{"files":[],"error":"Unsupported platform"}"#);
        match ResponseBody::classify(
            &headers(&[("content-type", "application/json; charset=utf-8")]),
            body,
        ) {
            ResponseBody::Error(message) => assert_eq!(message, "Unsupported platform"),
            other => panic!("unexpected {:?}", other),
        }

        let garbage = Bytes::from_static(b"not json");
        assert!(matches!(
            ResponseBody::classify(&headers(&[("content-type", "application/json")]), garbage),
            ResponseBody::Error(ref m) if m == "Download failed"
        ));
    }

    #[test]
    fn test_classify_binary_keeps_headers() {
        let body = Bytes::from_static(b"ID3");
        let map = headers(&[
            ("content-type", "audio/mpeg"),
            ("content-disposition", "attachment; filename=\"song.mp3\""),
        ]);
        match ResponseBody::classify(&map, body) {
            ResponseBody::Binary {
                bytes,
                content_type,
                content_disposition,
            } => {
                assert_eq!(&bytes[..], b"ID3");
                assert_eq!(content_type.as_deref(), Some("audio/mpeg"));
                assert_eq!(
                    content_disposition.as_deref(),
                    Some("attachment; filename=\"song.mp3\"")
                );
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_status_messages() {
        assert_eq!(
            status_message(StatusCode::TOO_MANY_REQUESTS),
            "Rate limit exceeded - please try again later"
        );
        assert_eq!(
            status_message(StatusCode::UNAUTHORIZED),
            "Authentication failed - invalid API key"
        );
        assert_eq!(status_message(StatusCode::BAD_REQUEST), "Invalid URL provided");
        assert_eq!(status_message(StatusCode::FORBIDDEN), "Access forbidden");
        assert_eq!(
            status_message(StatusCode::NOT_FOUND),
            "Media not found or unsupported platform"
        );
        assert_eq!(
            status_message(StatusCode::INTERNAL_SERVER_ERROR),
            "Server error - please try again later"
        );
        assert_eq!(status_message(StatusCode::BAD_GATEWAY), "Download failed (502)");
    }
}

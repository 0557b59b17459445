use regex::Regex;
use url::Url;

use crate::domain::{AppError, DownloadRequest, MediaType, Platform};

/// Raw form input.
#[derive(Debug, Clone, Default)]
pub struct RequestForm {
    pub url: String,
    pub filename: String,
    pub platform: Option<Platform>,
    pub media_type: MediaType,
}

/// Accepts absolute URLs and bare domains such as `youtube.com/watch?v=...`.
pub fn is_valid_url(input: &str) -> bool {
    let input = input.trim();
    if input.is_empty() {
        return false;
    }
    if Url::parse(input).is_ok() {
        return true;
    }

    Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9\-._]*[a-zA-Z0-9]\.[a-zA-Z]{2,}(/.*)?$")
        .map(|re| re.is_match(input))
        .unwrap_or(false)
}

/// Prefixes `https://` unless the input already carries an http(s) scheme.
pub fn normalize_url(input: &str) -> String {
    let input = input.trim();
    if input.starts_with("http") {
        input.to_string()
    } else {
        format!("https://{}", input)
    }
}

pub fn build_request(form: &RequestForm) -> Result<DownloadRequest, AppError> {
    if !is_valid_url(&form.url) {
        return Err(AppError::Validation);
    }

    let media_type = form
        .platform
        .filter(|p| p.info().has_media_type)
        .map(|_| form.media_type);

    let filename = Some(form.filename.trim())
        .filter(|f| !f.is_empty())
        .map(str::to_string);

    Ok(DownloadRequest {
        url: normalize_url(&form.url),
        platform: form.platform,
        media_type,
        filename,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(url: &str, platform: Option<Platform>) -> RequestForm {
        RequestForm {
            url: url.to_string(),
            platform,
            ..Default::default()
        }
    }

    #[test]
    fn test_scheme_added_when_missing() {
        let request = build_request(&form("youtube.com/watch?v=abc", Some(Platform::YouTube))).unwrap();
        assert_eq!(request.url, "https://youtube.com/watch?v=abc");

        let request = build_request(&form("open.spotify.com/track/1", Some(Platform::Spotify))).unwrap();
        assert!(request.url.starts_with("https://"));
    }

    #[test]
    fn test_http_urls_pass_through() {
        for url in ["http://x.com/u/status/1", "https://instagram.com/p/abc/"] {
            let request = build_request(&form(url, Some(Platform::Instagram))).unwrap();
            assert_eq!(request.url, url);
        }
    }

    #[test]
    fn test_malformed_urls_rejected() {
        for url in ["", "   ", "localhost", "not a url", "-bad.com", "example.c", "exa mple.com"] {
            assert_eq!(
                build_request(&form(url, Some(Platform::X))),
                Err(AppError::Validation),
                "accepted {:?}",
                url
            );
        }
    }

    #[test]
    fn test_media_type_only_for_flagged_platform() {
        for platform in Platform::ALL {
            let request = build_request(&RequestForm {
                url: "https://example.com/media".into(),
                platform: Some(platform),
                media_type: MediaType::Audio,
                ..Default::default()
            })
            .unwrap();

            if platform == Platform::YouTube {
                assert_eq!(request.media_type, Some(MediaType::Audio));
            } else {
                assert_eq!(request.media_type, None);
            }
        }

        let request = build_request(&form("https://example.com/media", None)).unwrap();
        assert_eq!(request.media_type, None);
    }

    #[test]
    fn test_blank_filename_is_unset() {
        let mut input = form("https://youtube.com/watch?v=1", Some(Platform::YouTube));
        input.filename = "   ".into();
        assert_eq!(build_request(&input).unwrap().filename, None);

        input.filename = "  holiday clip ".into();
        assert_eq!(
            build_request(&input).unwrap().filename.as_deref(),
            Some("holiday clip")
        );
    }
}

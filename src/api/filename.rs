use regex::Regex;
use url::Url;

pub const FALLBACK_FILENAME: &str = "downloaded_media";

/// Response facts the filename heuristics look at.
#[derive(Debug, Clone, Copy)]
pub struct FilenameHints<'a> {
    pub content_disposition: Option<&'a str>,
    pub content_type: Option<&'a str>,
    /// The media URL that was requested.
    pub source_url: &'a str,
}

type Extractor = fn(&FilenameHints<'_>) -> Option<String>;

/// Tried in order, first hit wins.
const EXTRACTORS: [Extractor; 4] = [
    from_disposition_extended,
    from_disposition_plain,
    from_source_url,
    from_content_type,
];

/// Derives a non-empty filename for a binary response.
pub fn derive_filename(hints: &FilenameHints<'_>) -> String {
    EXTRACTORS
        .iter()
        .find_map(|extract| extract(hints))
        .unwrap_or_else(|| FALLBACK_FILENAME.to_string())
}

/// `filename*=UTF-8''<percent-encoded>` (RFC 5987)
fn from_disposition_extended(hints: &FilenameHints<'_>) -> Option<String> {
    let re = Regex::new(r"(?i)filename\*=UTF-8''([^;\n\r]+)").ok()?;
    disposition_capture(&re, hints.content_disposition?)
}

/// `filename="<name>"` or `filename=<name>`
fn from_disposition_plain(hints: &FilenameHints<'_>) -> Option<String> {
    let re = Regex::new(r#"(?i)filename="?([^";]+)"?"#).ok()?;
    disposition_capture(&re, hints.content_disposition?)
}

fn disposition_capture(re: &Regex, header: &str) -> Option<String> {
    let raw = re.captures(header)?.get(1)?.as_str();
    let decoded = urlencoding::decode(raw.trim()).ok()?;
    non_empty(decoded.trim())
}

fn from_source_url(hints: &FilenameHints<'_>) -> Option<String> {
    let url = Url::parse(hints.source_url).ok()?;
    let last = url.path_segments()?.next_back()?;
    if !last.contains('.') {
        return None;
    }
    let decoded = urlencoding::decode(last).ok()?;
    non_empty(&decoded)
}

fn from_content_type(hints: &FilenameHints<'_>) -> Option<String> {
    let content_type = hints.content_type?;
    let name = if content_type.contains("audio") {
        "audio.mp3"
    } else if content_type.contains("video") {
        "video.mp4"
    } else if content_type.contains("image") {
        "image.jpg"
    } else {
        return None;
    };
    Some(name.to_string())
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

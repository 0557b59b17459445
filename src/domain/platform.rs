use super::model::{MediaType, Platform};

/// Catalog entry describing a supported platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub placeholder: &'static str,
    pub has_media_type: bool,
    pub media_types: &'static [(MediaType, &'static str)],
}

const INSTAGRAM: PlatformInfo = PlatformInfo {
    name: "Instagram",
    description: "Post / Reel / IGTV",
    placeholder: "https://instagram.com/p/...",
    has_media_type: false,
    media_types: &[],
};

const SPOTIFY: PlatformInfo = PlatformInfo {
    name: "Spotify",
    description: "Song (MP3)",
    placeholder: "https://open.spotify.com/track/...",
    has_media_type: false,
    media_types: &[],
};

const YOUTUBE: PlatformInfo = PlatformInfo {
    name: "YouTube",
    description: "Video / Audio",
    placeholder: "https://youtube.com/watch?v=...",
    has_media_type: true,
    media_types: &[
        (MediaType::Video, "Video (MP4)"),
        (MediaType::Audio, "Audio (MP3)"),
    ],
};

const X: PlatformInfo = PlatformInfo {
    name: "X / Twitter",
    description: "Video",
    placeholder: "https://x.com/user/status/...",
    has_media_type: false,
    media_types: &[],
};

impl Platform {
    pub fn info(&self) -> &'static PlatformInfo {
        match self {
            Platform::Instagram => &INSTAGRAM,
            Platform::Spotify => &SPOTIFY,
            Platform::YouTube => &YOUTUBE,
            Platform::X => &X,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_youtube_has_media_type() {
        let flagged: Vec<_> = Platform::ALL
            .iter()
            .filter(|p| p.info().has_media_type)
            .collect();
        assert_eq!(flagged, [&Platform::YouTube]);
        assert_eq!(Platform::YouTube.info().media_types.len(), 2);
    }

    #[test]
    fn test_display_uses_catalog_name() {
        assert_eq!(Platform::X.to_string(), "X / Twitter");
    }
}

use std::fmt;

use bytes::Bytes;

/// Source services the backend knows how to extract media from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Instagram,
    Spotify,
    YouTube,
    X,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Instagram,
        Platform::Spotify,
        Platform::YouTube,
        Platform::X,
    ];

    /// Identifier used by the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::Spotify => "spotify",
            Platform::YouTube => "youtube",
            Platform::X => "x",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.info().name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MediaType {
    Audio,
    #[default]
    Video,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Audio => "audio",
            MediaType::Video => "video",
        }
    }
}

/// One user-initiated fetch intent, built by the request builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: String,
    pub platform: Option<Platform>,
    pub media_type: Option<MediaType>,
    pub filename: Option<String>,
}

/// A retrieved payload ready to be saved.
#[derive(Debug, Clone)]
pub struct FetchedFile {
    pub blob: Bytes,
    pub filename: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStage {
    Processing,
    Downloading,
    Complete,
    Error,
}

impl ProgressStage {
    fn rank(&self) -> u8 {
        match self {
            ProgressStage::Processing => 0,
            ProgressStage::Downloading => 1,
            ProgressStage::Complete | ProgressStage::Error => 2,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.rank() == 2
    }

    /// Stages only move forward. A non-terminal stage may repeat (the
    /// coordinator restates `Processing`, and `Downloading` comes once per
    /// file), nothing leaves a terminal stage.
    pub fn can_advance_to(&self, next: ProgressStage) -> bool {
        !self.is_terminal() && next.rank() >= self.rank()
    }

    pub fn title(&self) -> &'static str {
        match self {
            ProgressStage::Processing => "Processing Media",
            ProgressStage::Downloading => "Downloading File",
            ProgressStage::Complete => "Download Complete",
            ProgressStage::Error => "Download Failed",
        }
    }
}

/// A stage transition reported by the download coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub stage: ProgressStage,
    pub message: String,
    pub filename: Option<String>,
}

impl ProgressUpdate {
    pub fn new(stage: ProgressStage, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
            filename: None,
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }
}

/// The progress panel's current position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressState {
    pub stage: ProgressStage,
    pub message: String,
    pub filename: Option<String>,
}

impl ProgressState {
    pub fn reset(message: impl Into<String>) -> Self {
        Self {
            stage: ProgressStage::Processing,
            message: message.into(),
            filename: None,
        }
    }

    /// Applies an update, returning `false` if it would move backwards.
    pub fn advance(&mut self, update: ProgressUpdate) -> bool {
        if !self.stage.can_advance_to(update.stage) {
            return false;
        }
        self.stage = update.stage;
        self.message = update.message;
        self.filename = update.filename;
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_moves_forward_only() {
        let mut state = ProgressState::reset("start");
        assert!(state.advance(ProgressUpdate::new(ProgressStage::Downloading, "file 1 of 2")));
        assert!(state.advance(ProgressUpdate::new(ProgressStage::Downloading, "file 2 of 2")));
        assert!(state.advance(ProgressUpdate::new(ProgressStage::Complete, "done")));

        assert!(!state.advance(ProgressUpdate::new(ProgressStage::Processing, "again")));
        assert!(!state.advance(ProgressUpdate::new(ProgressStage::Error, "late")));
        assert_eq!(state.stage, ProgressStage::Complete);
        assert_eq!(state.message, "done");
    }

    #[test]
    fn test_processing_may_be_restated() {
        let mut state = ProgressState::reset("start");
        assert!(state.advance(ProgressUpdate::new(ProgressStage::Processing, "analyzing")));
        assert_eq!(state.message, "analyzing");
        assert!(state.advance(ProgressUpdate::new(ProgressStage::Downloading, "file 1 of 1")));
        assert!(!state.advance(ProgressUpdate::new(ProgressStage::Processing, "again")));
    }

    #[test]
    fn test_processing_can_fail_directly() {
        let mut state = ProgressState::reset("start");
        assert!(state.advance(ProgressUpdate::new(ProgressStage::Error, "boom")));
        assert!(state.stage.is_terminal());
    }

    #[test]
    fn test_platform_identifiers() {
        let ids: Vec<_> = Platform::ALL.iter().map(|p| p.as_str()).collect();
        assert_eq!(ids, ["instagram", "spotify", "youtube", "x"]);
        assert_eq!(MediaType::default(), MediaType::Video);
    }
}

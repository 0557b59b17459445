mod progress;

pub use progress::{progress_panel, toast_view};

use std::path::PathBuf;

use iced::{
    widget::{button, column, pick_list, radio, row, text, text_input, Space},
    Color, Element, Length,
};

use crate::application::RequestForm;
use crate::domain::{MediaType, Platform};

fn error_color() -> Color {
    Color::from_rgb(0.86, 0.15, 0.15)
}

fn hint_color() -> Color {
    Color::from_rgb(0.45, 0.45, 0.5)
}

/// Main view state
pub struct DownloadView {
    pub platform: Option<Platform>,
    pub media_type: MediaType,
    pub url: String,
    pub filename: String,
    pub download_dir: PathBuf,
    pub is_url_valid: bool,
    pub is_loading: bool,
}

impl DownloadView {
    pub fn new(download_dir: PathBuf) -> Self {
        Self {
            platform: None,
            media_type: MediaType::default(),
            url: String::new(),
            filename: String::new(),
            download_dir,
            is_url_valid: true,
            is_loading: false,
        }
    }

    pub fn form(&self) -> RequestForm {
        RequestForm {
            url: self.url.clone(),
            filename: self.filename.clone(),
            platform: self.platform,
            media_type: self.media_type,
        }
    }
}

#[derive(Debug, Clone)]
pub enum DownloadMessage {
    PlatformSelected(Platform),
    MediaTypeSelected(MediaType),
    UrlChanged(String),
    FilenameChanged(String),
    ChooseFolderPressed,
    DownloadPressed,
}

impl DownloadView {
    pub fn update(&mut self, message: DownloadMessage) {
        match message {
            DownloadMessage::PlatformSelected(platform) => {
                self.platform = Some(platform);
            }
            DownloadMessage::MediaTypeSelected(media_type) => {
                self.media_type = media_type;
            }
            DownloadMessage::UrlChanged(url) => {
                if !url.trim().is_empty() {
                    self.is_url_valid = true;
                }
                self.url = url;
            }
            DownloadMessage::FilenameChanged(filename) => {
                self.filename = filename;
            }
            DownloadMessage::ChooseFolderPressed | DownloadMessage::DownloadPressed => {
                // Handled by the app
            }
        }
    }

    pub fn view(&self) -> Element<'_, DownloadMessage> {
        let header = column![
            text("Universal Media Downloader").size(32),
            text("Supports Instagram, Spotify, YouTube & X/Twitter")
                .size(14)
                .color(hint_color()),
        ]
        .spacing(4);

        let platform_picker = column![
            text("Platform").size(16),
            pick_list(Platform::ALL, self.platform, DownloadMessage::PlatformSelected)
                .placeholder("Select a platform")
                .width(Length::Fill),
        ]
        .spacing(6);

        let Some(platform) = self.platform else {
            return column![
                header,
                Space::new().height(Length::Fixed(20.0)),
                platform_picker,
                Space::new().height(Length::Fixed(20.0)),
                text("Please select a platform above to continue").size(16),
            ]
            .padding(20)
            .spacing(10)
            .into();
        };

        let info = platform.info();
        let mut form = column![
            header,
            Space::new().height(Length::Fixed(20.0)),
            platform_picker,
            text(format!("Download from {}: {}", info.name, info.description)).size(14),
        ]
        .spacing(10);

        if info.has_media_type {
            let choices = info
                .media_types
                .iter()
                .fold(row![].spacing(20), |choices, (value, label)| {
                    choices.push(radio(
                        *label,
                        *value,
                        Some(self.media_type),
                        DownloadMessage::MediaTypeSelected,
                    ))
                });
            form = form.push(column![text("Media type").size(16), choices].spacing(6));
        }

        let mut url_input = text_input(info.placeholder, &self.url).padding(10);
        let mut filename_input =
            text_input("Custom filename (without extension)", &self.filename).padding(10);
        if !self.is_loading {
            url_input = url_input.on_input(DownloadMessage::UrlChanged);
            filename_input = filename_input.on_input(DownloadMessage::FilenameChanged);
        }

        form = form.push(column![text("Media URL").size(16), url_input].spacing(6));
        if !self.is_url_valid {
            form = form.push(text("Please enter a valid URL").size(14).color(error_color()));
        }

        form = form.push(
            column![
                text("Save as (optional)").size(16),
                filename_input,
                text("Leave blank to use default filename")
                    .size(12)
                    .color(hint_color()),
            ]
            .spacing(6),
        );

        form = form.push(
            row![
                text(format!("Saving to: {}", self.download_dir.display()))
                    .size(12)
                    .width(Length::Fill),
                button("Change folder")
                    .on_press_maybe((!self.is_loading).then_some(DownloadMessage::ChooseFolderPressed))
                    .padding([6, 12]),
            ]
            .spacing(10),
        );

        let can_submit = !self.is_loading && !self.url.trim().is_empty();
        let label = if self.is_loading {
            "Processing..."
        } else {
            "Download Media"
        };

        form.push(Space::new().height(Length::Fixed(10.0)))
            .push(
                button(label)
                    .on_press_maybe(can_submit.then_some(DownloadMessage::DownloadPressed))
                    .padding([10, 20]),
            )
            .padding(20)
            .into()
    }
}

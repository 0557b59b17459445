use crate::api::{ApiClient, ApiConfig};
use crate::application::{build_request, DirectorySaver, DownloadCoordinator};
use crate::domain::{ProgressStage, ProgressState, ProgressUpdate, Toast, ToastKind};
use crate::ui::{progress_panel, toast_view, DownloadMessage, DownloadView};
use futures::StreamExt;
use iced::widget::{column, scrollable};
use iced::Task;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

pub const TRACING_TARGET: &str = "universal_media_downloader::app";

const COMPLETE_DISMISS_DELAY: Duration = Duration::from_secs(2);
const ERROR_DISMISS_DELAY: Duration = Duration::from_secs(3);
const TOAST_DISMISS_DELAY: Duration = Duration::from_secs(6);

pub struct DownloadApp {
    view: DownloadView,
    api_client: ApiClient,
    progress: Option<ProgressState>,
    toast: Option<Toast>,
    // Bumped per request / toast so stale dismissal timers are ignored
    progress_generation: u64,
    toast_generation: u64,
}

impl Default for DownloadApp {
    fn default() -> Self {
        Self::new(ApiConfig::from_env())
    }
}

impl DownloadApp {
    pub fn new(config: ApiConfig) -> Self {
        if config.api_key.is_none() {
            tracing::warn!(
                target: TRACING_TARGET,
                "No API key configured, downloads will fail until MEDIA_API_KEY is set"
            );
        }

        let view = DownloadView::new(config.download_dir.clone());
        let api_client = ApiClient::new(config);

        Self {
            view,
            api_client,
            progress: None,
            toast: None,
            progress_generation: 0,
            toast_generation: 0,
        }
    }

    fn show_toast(&mut self, message: String, kind: ToastKind) -> Task<Message> {
        self.toast = Some(Toast { message, kind });
        self.toast_generation += 1;
        let generation = self.toast_generation;

        Task::perform(sleep(TOAST_DISMISS_DELAY), move |_| {
            Message::DismissToast(generation)
        })
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    UiMessage(DownloadMessage),
    FolderSelected(Option<PathBuf>),
    /// Stage transition from the running download
    Progress(ProgressUpdate),
    DismissProgress(u64),
    DismissToast(u64),
    CloseToast,
}

pub fn update(app: &mut DownloadApp, message: Message) -> Task<Message> {
    match message {
        Message::UiMessage(ui_msg) => {
            app.view.update(ui_msg.clone());

            match ui_msg {
                DownloadMessage::DownloadPressed => return start_download(app),
                DownloadMessage::ChooseFolderPressed => {
                    let current = app.view.download_dir.clone();
                    return Task::perform(
                        async move {
                            rfd::AsyncFileDialog::new()
                                .set_directory(&current)
                                .pick_folder()
                                .await
                                .map(|handle| handle.path().to_path_buf())
                        },
                        Message::FolderSelected,
                    );
                }
                _ => {}
            }
        }
        Message::FolderSelected(Some(dir)) => {
            tracing::info!(target: TRACING_TARGET, dir = %dir.display(), "Download folder changed");
            app.view.download_dir = dir;
        }
        Message::FolderSelected(None) => {}
        Message::Progress(update) => {
            let stage = update.stage;
            let Some(progress) = app.progress.as_mut() else {
                return Task::none();
            };
            if !progress.advance(update) {
                tracing::debug!(target: TRACING_TARGET, ?stage, "Ignoring out-of-order progress update");
                return Task::none();
            }

            if stage.is_terminal() {
                app.view.is_loading = false;
                let generation = app.progress_generation;
                let delay = match stage {
                    ProgressStage::Complete => COMPLETE_DISMISS_DELAY,
                    _ => ERROR_DISMISS_DELAY,
                };
                return Task::perform(sleep(delay), move |_| {
                    Message::DismissProgress(generation)
                });
            }
        }
        Message::DismissProgress(generation) => {
            if generation != app.progress_generation {
                return Task::none();
            }
            if let Some(progress) = app.progress.take() {
                return match progress.stage {
                    ProgressStage::Complete => {
                        let name = progress.filename.unwrap_or_default();
                        app.show_toast(format!("Successfully downloaded: {}", name), ToastKind::Success)
                    }
                    ProgressStage::Error => app.show_toast(progress.message, ToastKind::Error),
                    _ => {
                        // Not finished yet, keep showing it
                        app.progress = Some(progress);
                        Task::none()
                    }
                };
            }
        }
        Message::DismissToast(generation) => {
            if generation == app.toast_generation {
                app.toast = None;
            }
        }
        Message::CloseToast => {
            app.toast = None;
        }
    }
    Task::none()
}

// Timers are created lazily so building a task needs no runtime.
async fn sleep(delay: Duration) {
    tokio::time::sleep(delay).await
}

fn start_download(app: &mut DownloadApp) -> Task<Message> {
    if app.view.is_loading || app.view.platform.is_none() {
        return Task::none();
    }

    let request = match build_request(&app.view.form()) {
        Ok(request) => request,
        Err(e) => {
            app.view.is_url_valid = false;
            tracing::debug!(target: TRACING_TARGET, error = %e, "Rejected form input");
            return Task::none();
        }
    };

    app.view.is_url_valid = true;
    app.view.is_loading = true;
    app.progress_generation += 1;
    app.progress = Some(ProgressState::reset(
        crate::application::download_coordinator::PROCESSING_MESSAGE,
    ));

    let saver = Arc::new(DirectorySaver::new(app.view.download_dir.clone()));
    let coordinator = DownloadCoordinator::new(app.api_client.clone(), saver);

    Task::stream(coordinator.run_stream(request).map(Message::Progress))
}

pub fn view(app: &DownloadApp) -> iced::Element<'_, Message> {
    let mut content = column![app.view.view().map(Message::UiMessage)].spacing(10);

    if let Some(progress) = &app.progress {
        content = content.push(progress_panel(progress));
    }
    if let Some(toast) = &app.toast {
        content = content.push(toast_view(toast, Message::CloseToast));
    }

    scrollable(content.padding(10)).into()
}

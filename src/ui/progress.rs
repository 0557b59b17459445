use iced::{
    widget::{button, column, container, progress_bar, row, text},
    Color, Element, Length,
};

use crate::domain::{ProgressStage, ProgressState, Toast, ToastKind};

fn stage_color(stage: ProgressStage) -> Color {
    match stage {
        ProgressStage::Processing | ProgressStage::Downloading => Color::from_rgb(0.23, 0.51, 0.96),
        ProgressStage::Complete => Color::from_rgb(0.13, 0.77, 0.37),
        ProgressStage::Error => Color::from_rgb(0.94, 0.27, 0.27),
    }
}

fn stage_percent(stage: ProgressStage) -> f32 {
    match stage {
        ProgressStage::Processing => 30.0,
        ProgressStage::Downloading => 85.0,
        ProgressStage::Complete | ProgressStage::Error => 100.0,
    }
}

/// Panel shown while a request is in flight and briefly after it ends.
pub fn progress_panel<'a, Message: 'a>(state: &'a ProgressState) -> Element<'a, Message> {
    let mut panel = column![
        text(state.stage.title())
            .size(20)
            .color(stage_color(state.stage)),
        text(&state.message).size(14),
    ]
    .spacing(10);

    if state.stage != ProgressStage::Error {
        panel = panel.push(progress_bar(0.0..=100.0, stage_percent(state.stage)));
    }

    if let Some(filename) = &state.filename {
        panel = panel.push(text(filename).size(12));
    }

    container(panel.padding(16)).width(Length::Fill).into()
}

pub fn toast_view<'a, Message: Clone + 'a>(toast: &'a Toast, on_close: Message) -> Element<'a, Message> {
    let color = match toast.kind {
        ToastKind::Success => Color::from_rgb(0.09, 0.5, 0.24),
        ToastKind::Error => Color::from_rgb(0.73, 0.11, 0.11),
    };

    container(
        row![
            text(&toast.message).color(color).width(Length::Fill),
            button("x").on_press(on_close).padding([2, 8]),
        ]
        .spacing(10),
    )
    .padding(12)
    .width(Length::Fill)
    .into()
}

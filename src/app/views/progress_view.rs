use egui::{Color32, ProgressBar, RichText};

use crate::app::views::View;
use crate::pipeline::{PipelinePhase, PipelineState};

pub struct ProgressView<'a> {
    state: &'a PipelineState,
}

impl<'a> ProgressView<'a> {
    pub fn new(state: &'a PipelineState) -> Self {
        Self { state }
    }

    fn status_text(&self) -> RichText {
        match self.state.phase() {
            PipelinePhase::Idle => RichText::new("Select an image or video to begin"),
            PipelinePhase::FileSelected => RichText::new("Ready to analyze"),
            PipelinePhase::Uploading { .. } => RichText::new("Uploading…"),
            PipelinePhase::Analyzing { .. } => RichText::new("Analyzing…"),
            PipelinePhase::Complete { result } => match result.location_name() {
                Some(name) => RichText::new(format!("Located: {}", name)).strong(),
                None => RichText::new("Analysis complete"),
            },
            PipelinePhase::Error { reason } => RichText::new(reason).color(Color32::LIGHT_RED),
        }
    }
}

impl View for ProgressView<'_> {
    fn draw(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(self.status_text());
            if let Some(percent) = self.state.progress() {
                ui.add(
                    ProgressBar::new(percent as f32 / 100.0)
                        .text(format!("{}%", percent))
                        .animate(self.state.is_analyzing()),
                );
            }
        });
    }
}

use egui::{Button, Color32, RichText};

use crate::app::controller::AppController;
use crate::app::views::View;
use crate::pipeline::{NextStep, PipelineState};

const HIGHLIGHT: Color32 = Color32::from_rgb(255, 196, 0);

/// Upload / Analyze / Details buttons plus the current selection.
pub struct ControlsView<'a> {
    state: &'a PipelineState,
    controller: &'a AppController,
    preview: Option<&'a egui::TextureHandle>,
}

impl<'a> ControlsView<'a> {
    pub fn new(
        state: &'a PipelineState,
        controller: &'a AppController,
        preview: Option<&'a egui::TextureHandle>,
    ) -> Self {
        Self {
            state,
            controller,
            preview,
        }
    }

    /// The button matching the next step gets a highlighted frame.
    fn step_button(&self, label: &str, step: NextStep) -> Button<'static> {
        let button = Button::new(RichText::new(label.to_string()).strong());
        if self.state.next_step() == step {
            button.stroke(egui::Stroke::new(2.0, HIGHLIGHT))
        } else {
            button
        }
    }

    fn draw_selection(&self, ui: &mut egui::Ui) {
        ui.group(|ui| match self.state.selected() {
            Some(media) => {
                ui.horizontal(|ui| {
                    if let Some(texture) = self.preview {
                        ui.add(egui::Image::new(texture).max_height(48.0));
                    }
                    ui.vertical(|ui| {
                        ui.label(RichText::new(media.file.name()).strong());
                        ui.label(format!(
                            "{} · {} · {:.1} KiB",
                            media.kind,
                            media.file.mime(),
                            media.file.len() as f64 / 1024.0
                        ));
                    });
                });
            }
            None => {
                ui.label("No file selected");
            }
        });
    }
}

impl View for ControlsView<'_> {
    fn draw(&mut self, ui: &mut egui::Ui) {
        let busy = self.controller.is_busy();
        ui.horizontal(|ui| {
            let upload = self.step_button("📂 Upload", NextStep::Upload);
            if ui.add_enabled(!busy, upload).clicked() {
                self.controller.pick_file();
            }

            let can_analyze = self.state.selected().is_some() && !busy;
            let analyze = self.step_button("🔍 Analyze", NextStep::Analyze);
            if ui.add_enabled(can_analyze, analyze).clicked() {
                self.controller.run_analysis();
            }

            let details_label = if self.state.details_visible() {
                "Hide details"
            } else {
                "Details"
            };
            let details = self.step_button(details_label, NextStep::Details);
            if ui.add_enabled(self.state.result().is_some(), details).clicked() {
                self.controller.toggle_details();
            }

            ui.separator();
            self.draw_selection(ui);
        });
    }
}

use egui::{Color32, RichText};

use crate::app::controller::AppController;
use crate::app::views::View;
use crate::common::MediaKind;
use crate::pipeline::orchestration::StageTimings;
use crate::pipeline::{AnalysisResult, PipelineState};

/// Side panel rendering the fields of a completed analysis.
pub struct DetailsView<'a> {
    state: &'a PipelineState,
    controller: &'a AppController,
    preview: Option<&'a egui::TextureHandle>,
}

impl<'a> DetailsView<'a> {
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

    fn draw_media(&self, ui: &mut egui::Ui, result: &AnalysisResult, kind: MediaKind) {
        ui.group(|ui| match (kind, result.media_url(kind)) {
            (MediaKind::Image, Some(url)) => {
                ui.add(
                    egui::Image::from_uri(url.to_string())
                        .max_height(220.0)
                        .maintain_aspect_ratio(true),
                );
            }
            (MediaKind::Video, Some(url)) => {
                ui.label("Analyzed video");
                ui.hyperlink_to(url, url);
                if let Some(frames) = result.frames_analyzed {
                    ui.label(format!("Frames analyzed: {}", frames));
                }
            }
            (_, None) => match self.preview {
                Some(texture) => {
                    ui.add(egui::Image::new(texture).max_height(220.0));
                }
                None => {
                    ui.label("No preview available");
                }
            },
        });
    }

    fn draw_fields(&self, ui: &mut egui::Ui, result: &AnalysisResult) {
        egui::Grid::new("analysis_fields")
            .num_columns(2)
            .striped(true)
            .show(ui, |ui| {
                ui.label("Location");
                ui.label(RichText::new(result.location_name().unwrap_or("Unknown")).strong());
                ui.end_row();

                ui.label("Confidence");
                ui.label(
                    result
                        .confidence()
                        .map(|c| c.to_string())
                        .unwrap_or_else(|| "n/a".to_string()),
                );
                ui.end_row();

                match self.state.location() {
                    Some(position) => {
                        ui.label("Coordinates");
                        ui.label(format!("{:.4}, {:.4}", position.latitude, position.longitude));
                    }
                    None => {
                        ui.label("Coordinates");
                        ui.label(RichText::new("Location unresolved").italics().weak());
                    }
                }
                ui.end_row();
            });

        if let Some(reasoning) = result.reasoning() {
            ui.separator();
            ui.label(RichText::new("Reasoning").strong());
            ui.label(reasoning);
        }

        draw_list(ui, "Other guesses", result.location_guesses());
        draw_list(ui, "Locations found in frames", result.locations_found());
    }
}

fn draw_list(ui: &mut egui::Ui, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    ui.separator();
    ui.label(RichText::new(title).strong());
    for item in items {
        ui.label(format!("• {}", item));
    }
}

fn draw_timings(ui: &mut egui::Ui, timings: &StageTimings) {
    if timings.is_empty() {
        return;
    }
    ui.separator();
    ui.collapsing("Timings", |ui| {
        for (stage, duration) in timings.iter() {
            ui.label(format!("{:<8} {:>8.1} ms", stage.as_str(), duration.as_secs_f64() * 1000.0));
        }
        ui.label(
            RichText::new(format!("total {:.1} ms", timings.total().as_secs_f64() * 1000.0))
                .color(Color32::GRAY),
        );
    });
}

impl View for DetailsView<'_> {
    fn draw(&mut self, ui: &mut egui::Ui) {
        let (Some(result), Some(kind)) = (self.state.result(), self.state.media_kind()) else {
            return;
        };

        ui.horizontal(|ui| {
            ui.heading("Analysis");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("✕").clicked() {
                    self.controller.hide_details();
                }
            });
        });
        ui.separator();

        egui::ScrollArea::vertical().show(ui, |ui| {
            self.draw_media(ui, result, kind);
            self.draw_fields(ui, result);
            draw_timings(ui, self.state.timings());
        });
    }
}

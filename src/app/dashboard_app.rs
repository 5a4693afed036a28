use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local};
use egui::{Color32, RichText, TextureOptions};
use tokio::runtime::Handle;
use tokio::sync::mpsc::error::TryRecvError as MpscTryRecvError;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info};

use crate::app::controller::{AppController, UiUpdate};
use crate::app::views::{ControlsView, DetailsView, ProgressView, View};
use crate::common::{MediaFile, MediaKind};
use crate::config::Settings;
use crate::error::AppError;
use crate::map::{FlightProfile, GlobeView, SharedMapView};
use crate::pipeline::PipelineState;
use crate::pipeline::pipeline_factory::{HttpPipelineFactory, PipelineFactory};

const TITLE: &str = "Spyglass - Media Geolocation";

/// A failure shown to the user, stamped when it reached the UI.
pub struct Alert {
    pub raised_at: DateTime<Local>,
    pub error: AppError,
}

impl Alert {
    fn new(error: AppError) -> Self {
        Self {
            raised_at: Local::now(),
            error,
        }
    }
}

pub struct DashboardApp {
    controller: AppController,
    state_rx: watch::Receiver<PipelineState>,
    ui_update_rx: mpsc::Receiver<UiUpdate>,
    globe: Arc<Mutex<GlobeView>>,
    preview: Option<egui::TextureHandle>,
    active_alert: Option<usize>,
    errors: Vec<Alert>,
}

impl DashboardApp {
    pub fn new(
        controller: AppController,
        ui_update_rx: mpsc::Receiver<UiUpdate>,
        globe: Arc<Mutex<GlobeView>>,
    ) -> Self {
        Self {
            state_rx: controller.subscribe(),
            controller,
            ui_update_rx,
            globe,
            preview: None,
            active_alert: None,
            errors: Vec::new(),
        }
    }

    pub fn start_gui(settings: &Settings) -> Result<(), AppError> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size(egui::vec2(1280.0, 800.0))
                .with_title(TITLE),
            ..Default::default()
        };

        let profile = FlightProfile::from_settings(&settings.map);
        let globe = Arc::new(Mutex::new(GlobeView::new(profile)));
        let map: SharedMapView = globe.clone();
        let orchestrator = HttpPipelineFactory::new(settings.clone()).build(map)?;
        let runtime = Handle::try_current().map_err(|e| AppError::Ui(e.to_string()))?;

        eframe::run_native(
            TITLE,
            options,
            Box::new(move |cc| {
                egui_extras::install_image_loaders(&cc.egui_ctx);

                let (ui_update_tx, ui_update_rx) = mpsc::channel::<UiUpdate>(100);
                let controller = AppController::new(
                    orchestrator,
                    runtime.clone(),
                    ui_update_tx,
                    cc.egui_ctx.clone(),
                );

                // Repaint whenever the pipeline publishes a new state.
                let mut state_rx = controller.subscribe();
                let ctx = cc.egui_ctx.clone();
                runtime.spawn(async move {
                    while state_rx.changed().await.is_ok() {
                        ctx.request_repaint();
                    }
                });

                Ok(Box::new(DashboardApp::new(controller, ui_update_rx, globe)))
            }),
        )
        .map_err(|e| AppError::Ui(e.to_string()))
    }

    fn drain_updates(&mut self, ctx: &egui::Context) {
        loop {
            match self.ui_update_rx.try_recv() {
                Ok(UiUpdate::Error(error)) => {
                    self.errors.push(Alert::new(error));
                    self.active_alert = Some(self.errors.len() - 1);
                }
                Ok(UiUpdate::Preview { file, image }) => {
                    if !is_current_selection(&self.state_rx.borrow(), &file) {
                        debug!("Dropping stale preview for '{}'", file.name());
                        continue;
                    }
                    self.preview = image.map(|image| {
                        ctx.load_texture("media_preview", image, TextureOptions::LINEAR)
                    });
                }
                Err(MpscTryRecvError::Empty) => break,
                Err(MpscTryRecvError::Disconnected) => {
                    error!("UI update sender disconnected");
                    break;
                }
            }
        }
    }

    fn draw_alert(&mut self, ctx: &egui::Context) {
        let Some(alert) = self.active_alert.and_then(|i| self.errors.get(i)) else {
            return;
        };
        let mut dismissed = false;
        egui::Window::new("Something went wrong")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(alert.error.to_string());
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        if dismissed {
            self.active_alert = None;
        }
    }
}

/// Previews decode off the UI thread, so one can land after a newer pick.
fn is_current_selection(state: &PipelineState, file: &MediaFile) -> bool {
    state
        .selected()
        .is_some_and(|selected| selected.file.same_file(file))
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_updates(ctx);

        let state = self.state_rx.borrow_and_update().clone();
        if state.selected().is_none() || state.media_kind() == Some(MediaKind::Video) {
            self.preview = None;
        }

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.heading(TITLE);
            ui.separator();
            ControlsView::new(&state, &self.controller, self.preview.as_ref()).draw(ui);
        });

        egui::TopBottomPanel::bottom("error_panel")
            .resizable(true)
            .show(ctx, |ui| {
                ProgressView::new(&state).draw(ui);
                ui.separator();
                ui.heading("Error Log");
                egui::ScrollArea::vertical().max_height(120.0).show(ui, |ui| {
                    for alert in self.errors.iter().rev() {
                        ui.label(
                            RichText::new(format!(
                                "[{}] {}",
                                alert.raised_at.format("%H:%M:%S"),
                                alert.error
                            ))
                            .color(Color32::LIGHT_RED),
                        );
                    }
                });
            });

        if state.details_visible() {
            egui::SidePanel::right("details")
                .resizable(true)
                .default_width(340.0)
                .show(ctx, |ui| {
                    DetailsView::new(&state, &self.controller, self.preview.as_ref()).draw(ui);
                });
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::default())
            .show(ctx, |ui| {
                let response = match self.globe.lock() {
                    Ok(mut globe) => globe.show(ui),
                    Err(_) => {
                        ui.label("Map view unavailable");
                        return;
                    }
                };
                if response.marker_clicked || response.background_clicked {
                    self.controller.select_marker(response.marker_clicked);
                }
            });

        self.draw_alert(ctx);
    }
}

impl Drop for DashboardApp {
    fn drop(&mut self) {
        info!("Dashboard closing");
        self.controller.teardown();
    }
}

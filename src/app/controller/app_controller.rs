use std::path::PathBuf;

use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, warn};

use crate::common::{MediaFile, MediaKind};
use crate::error::AppError;
use crate::pipeline::{PipelineOrchestrator, PipelineState, RunOutcome};

const PREVIEW_MAX_SIDE: u32 = 512;

/// Messages from background work back to the UI thread.
pub enum UiUpdate {
    Error(AppError),
    /// Thumbnail for `file`; stale once another file has been selected.
    Preview {
        file: MediaFile,
        image: Option<egui::ColorImage>,
    },
}

/// Glue between egui callbacks and the async pipeline. Every method returns
/// immediately; the work runs on the tokio runtime.
pub struct AppController {
    orchestrator: PipelineOrchestrator,
    runtime: Handle,
    ui_update_tx: mpsc::Sender<UiUpdate>,
    ctx: egui::Context,
}

impl AppController {
    pub fn new(
        orchestrator: PipelineOrchestrator,
        runtime: Handle,
        ui_update_tx: mpsc::Sender<UiUpdate>,
        ctx: egui::Context,
    ) -> Self {
        Self {
            orchestrator,
            runtime,
            ui_update_tx,
            ctx,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<PipelineState> {
        self.orchestrator.subscribe()
    }

    pub fn is_busy(&self) -> bool {
        self.orchestrator.is_busy()
    }

    /// Opens the native file dialog on its own thread, then loads the file.
    pub fn pick_file(&self) {
        let controller = self.background();
        std::thread::spawn(move || {
            let path = rfd::FileDialog::new()
                .add_filter(
                    "Images and videos",
                    &[
                        "jpg", "jpeg", "png", "gif", "webp", "bmp", "mp4", "mov", "webm", "mkv",
                        "avi",
                    ],
                )
                .add_filter("All files", &["*"])
                .set_title("Select media to analyze")
                .pick_file();

            match path {
                Some(path) => controller.load_file(path),
                None => debug!("File dialog dismissed"),
            }
        });
    }

    pub fn run_analysis(&self) {
        let controller = self.background();
        self.runtime.spawn(async move {
            match controller.orchestrator.run_analysis().await {
                Ok(RunOutcome::Completed { location }) => {
                    debug!("Run completed, location {:?}", location);
                }
                Ok(outcome) => info!("Analysis not started: {:?}", outcome),
                Err(e) if e.is_user_facing() => controller.report(e).await,
                Err(e) => warn!("Run ended quietly: {}", e),
            }
        });
    }

    pub fn toggle_details(&self) {
        self.orchestrator.toggle_details();
    }

    pub fn hide_details(&self) {
        self.orchestrator.hide_details();
    }

    pub fn select_marker(&self, marker_hit: bool) {
        self.orchestrator.select_marker(marker_hit);
    }

    pub fn teardown(&self) {
        self.orchestrator.teardown();
    }

    fn background(&self) -> BackgroundHandle {
        BackgroundHandle {
            orchestrator: self.orchestrator.clone(),
            runtime: self.runtime.clone(),
            ui_update_tx: self.ui_update_tx.clone(),
            ctx: self.ctx.clone(),
        }
    }
}

/// The owned half of the controller that background tasks carry around.
#[derive(Clone)]
struct BackgroundHandle {
    orchestrator: PipelineOrchestrator,
    runtime: Handle,
    ui_update_tx: mpsc::Sender<UiUpdate>,
    ctx: egui::Context,
}

impl BackgroundHandle {
    fn load_file(self, path: PathBuf) {
        let runtime = self.runtime.clone();
        runtime.spawn(async move {
            let file = match MediaFile::load(&path).await {
                Ok(file) => file,
                Err(e) => {
                    error!("Failed to read {}: {}", path.display(), e);
                    self.report(e).await;
                    return;
                }
            };

            match self.orchestrator.select_file(file.clone()) {
                Ok(MediaKind::Image) => {
                    let source = file.clone();
                    let image = tokio::task::spawn_blocking(move || decode_preview(&source))
                        .await
                        .unwrap_or_else(|e| {
                            warn!("Preview task failed: {}", e);
                            None
                        });
                    self.send(UiUpdate::Preview { file, image }).await;
                }
                Ok(MediaKind::Video) => self.send(UiUpdate::Preview { file, image: None }).await,
                Err(e) => self.report(e).await,
            }
        });
    }

    async fn report(&self, error: AppError) {
        self.send(UiUpdate::Error(error)).await;
    }

    async fn send(&self, update: UiUpdate) {
        if let Err(e) = self.ui_update_tx.send(update).await {
            error!("UI update receiver dropped: {}", e);
            return;
        }
        self.ctx.request_repaint();
    }
}

/// Thumbnail of a local image for display before the upload finishes.
pub fn decode_preview(file: &MediaFile) -> Option<egui::ColorImage> {
    let decoded = match image::load_from_memory(file.bytes()) {
        Ok(decoded) => decoded,
        Err(e) => {
            warn!("Cannot preview '{}': {}", file.name(), e);
            return None;
        }
    };
    let thumbnail = decoded.thumbnail(PREVIEW_MAX_SIDE, PREVIEW_MAX_SIDE).to_rgba8();
    Some(egui::ColorImage::from_rgba_unmultiplied(
        [thumbnail.width() as usize, thumbnail.height() as usize],
        thumbnail.as_raw(),
    ))
}

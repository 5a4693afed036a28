use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use super::progress::ProgressTicker;
use super::stage_timings::{PipelineStage, StageTimer};
use crate::common::{Coordinates, MediaFile, MediaKind, SelectedMedia};
use crate::config::ProgressSettings;
use crate::error::AppError;
use crate::map::SharedMapView;
use crate::pipeline::services::{AnalysisClient, Geocoder, MediaUploader, is_resolvable};
use crate::pipeline::types::{AnalysisResult, PipelineState};

/// How a call to [`PipelineOrchestrator::run_analysis`] ended, short of an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RunOutcome {
    /// The result is shown. `location` is set when a marker was requested.
    Completed { location: Option<Coordinates> },
    NoSelection,
    Busy,
}

/// Clears the single-flight flag however the run ends.
struct InFlightGuard(Arc<AtomicBool>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Sequences select -> upload -> analyze -> geocode -> marker and owns the
/// dashboard state. Cloning is cheap; clones share the same run.
#[derive(Clone)]
pub struct PipelineOrchestrator {
    state: Arc<watch::Sender<PipelineState>>,
    in_flight: Arc<AtomicBool>,
    uploader: Arc<dyn MediaUploader>,
    analysis: Arc<dyn AnalysisClient>,
    geocoder: Arc<dyn Geocoder>,
    map: SharedMapView,
    progress: ProgressSettings,
}

impl PipelineOrchestrator {
    pub fn builder(progress: ProgressSettings) -> PipelineOrchestratorBuilder {
        PipelineOrchestratorBuilder::new(progress)
    }

    pub fn subscribe(&self) -> watch::Receiver<PipelineState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> PipelineState {
        self.state.borrow().clone()
    }

    /// True from the moment a run starts until its marker step is done.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Replace the current selection. An unsupported kind leaves state untouched.
    pub fn select_file(&self, file: MediaFile) -> Result<MediaKind, AppError> {
        let media = SelectedMedia::try_from_file(file).inspect_err(|e| warn!("{}", e))?;
        let kind = media.kind;
        let name = media.file.name().to_string();

        let mut busy = false;
        self.state.send_if_modified(|state| {
            if self.in_flight.load(Ordering::SeqCst) {
                busy = true;
                return false;
            }
            state.select(media);
            true
        });
        if busy {
            return Err(AppError::Busy);
        }

        info!("Selected {} '{}'", kind, name);
        Ok(kind)
    }

    /// One full pipeline run for the current selection.
    ///
    /// Upload and analysis failures end the run in the error phase and are
    /// returned. A missing location or an unready map only costs the marker.
    #[instrument(skip(self), fields(run_id = tracing::field::Empty))]
    pub async fn run_analysis(&self) -> Result<RunOutcome, AppError> {
        let run_id = Uuid::new_v4();
        let mut started: Result<SelectedMedia, RunOutcome> = Err(RunOutcome::NoSelection);

        self.state.send_if_modified(|state| {
            let Some(selected) = state.selected().cloned() else {
                return false;
            };
            if self
                .in_flight
                .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
                .is_err()
            {
                started = Err(RunOutcome::Busy);
                return false;
            }
            state.begin_upload(run_id);
            started = Ok(selected);
            true
        });

        let media = match started {
            Ok(media) => media,
            Err(outcome) => {
                debug!("Run not started: {:?}", outcome);
                return Ok(outcome);
            }
        };
        let _guard = InFlightGuard(self.in_flight.clone());
        tracing::Span::current().record("run_id", tracing::field::display(run_id));
        info!("Starting analysis of {} '{}'", media.kind, media.file.name());

        let ticker = ProgressTicker::spawn(self.state.clone(), &self.progress);
        let fetched = self.upload_and_analyze(&media).await;
        ticker.stop().await;

        let result = match fetched {
            Ok(result) => Arc::new(result),
            Err(e) => {
                error!("Pipeline run failed: {}", e);
                self.state.send_modify(|state| state.fail(e.to_string()));
                return Err(e);
            }
        };
        self.state.send_modify(|state| state.complete(result.clone()));
        info!(
            "Analysis complete: {}",
            result.location_name().unwrap_or("no location")
        );

        let location = self.locate(&result).await;
        if let (Some(position), Some(label)) = (location, result.location_name()) {
            self.state.send_modify(|state| state.set_location(position));
            self.place_marker(position, label);
        }

        let total = self.state.borrow().timings().total();
        info!("Pipeline run finished in {:?}", total);
        Ok(RunOutcome::Completed { location })
    }

    async fn upload_and_analyze(&self, media: &SelectedMedia) -> Result<AnalysisResult, AppError> {
        let timer = StageTimer::start(PipelineStage::Upload);
        let media_url = self.uploader.upload(&media.file, media.kind).await?;
        self.record(timer);
        debug!("Uploaded to {}", media_url);

        self.state.send_modify(|state| state.begin_analysis());

        let timer = StageTimer::start(PipelineStage::Analyze);
        let result = self.analysis.analyze(&media_url, media.kind).await?;
        self.record(timer);

        if !result.is_success() {
            let reason = result
                .error
                .clone()
                .unwrap_or_else(|| format!("status '{}'", result.status));
            return Err(AppError::AnalysisFailed(reason));
        }
        Ok(result)
    }

    async fn locate(&self, result: &AnalysisResult) -> Option<Coordinates> {
        let name = match result.location_name() {
            Some(name) if is_resolvable(name) => name,
            other => {
                info!("Skipping geocoding for {:?}", other);
                return None;
            }
        };

        let timer = StageTimer::start(PipelineStage::Geocode);
        let position = self.geocoder.resolve(name).await;
        self.record(timer);

        if position.is_none() {
            warn!("{}", AppError::GeocodeUnavailable(name.to_string()));
        }
        position
    }

    fn place_marker(&self, position: Coordinates, label: &str) {
        let timer = StageTimer::start(PipelineStage::Marker);
        let placed = match self.map.lock() {
            Ok(mut map) => map.set_marker(position, label),
            Err(_) => Err(AppError::Ui("map view lock poisoned".to_string())),
        };
        match placed {
            Ok(flight) => {
                self.record(timer);
                debug!(
                    "Camera flying to {:.4}, {:.4} at {} m",
                    flight.destination.latitude, flight.destination.longitude, flight.altitude_m
                );
            }
            Err(e) => warn!("Marker dropped: {}", e),
        }
    }

    fn record(&self, timer: StageTimer) {
        let (stage, duration) = timer.finish();
        debug!("{} took {:?}", stage.as_str(), duration);
        self.state.send_modify(|state| state.timings_mut().record(stage, duration));
    }

    pub fn toggle_details(&self) -> bool {
        let mut visible = false;
        self.state.send_if_modified(|state| {
            visible = !state.details_visible();
            state.set_details_visible(visible)
        });
        self.state.borrow().details_visible()
    }

    pub fn show_details(&self) {
        self.state.send_if_modified(|state| state.set_details_visible(true));
    }

    pub fn hide_details(&self) {
        self.state.send_if_modified(|state| state.set_details_visible(false));
    }

    /// A click on the globe: the marker opens the details, anything else hides them.
    pub fn select_marker(&self, marker_hit: bool) {
        if marker_hit {
            self.show_details();
        } else {
            self.hide_details();
        }
    }

    pub fn teardown(&self) {
        match self.map.lock() {
            Ok(mut map) => map.teardown(),
            Err(e) => warn!("Map view lock poisoned during teardown: {}", e),
        }
    }
}

pub struct PipelineOrchestratorBuilder {
    progress: ProgressSettings,
    uploader: Option<Arc<dyn MediaUploader>>,
    analysis: Option<Arc<dyn AnalysisClient>>,
    geocoder: Option<Arc<dyn Geocoder>>,
    map: Option<SharedMapView>,
}

impl PipelineOrchestratorBuilder {
    pub fn new(progress: ProgressSettings) -> Self {
        Self {
            progress,
            uploader: None,
            analysis: None,
            geocoder: None,
            map: None,
        }
    }

    pub fn uploader(mut self, uploader: Arc<dyn MediaUploader>) -> Self {
        self.uploader = Some(uploader);
        self
    }

    pub fn analysis(mut self, analysis: Arc<dyn AnalysisClient>) -> Self {
        self.analysis = Some(analysis);
        self
    }

    pub fn geocoder(mut self, geocoder: Arc<dyn Geocoder>) -> Self {
        self.geocoder = Some(geocoder);
        self
    }

    pub fn map(mut self, map: SharedMapView) -> Self {
        self.map = Some(map);
        self
    }

    // Sets the progress step, this will override the default configuration.
    pub fn progress_step(mut self, step: u8) -> Self {
        self.progress.step = step;
        self
    }

    pub fn build(self) -> Result<PipelineOrchestrator, AppError> {
        let uploader = self
            .uploader
            .ok_or(AppError::Pipeline("Uploader not set".to_string()))?;
        let analysis = self
            .analysis
            .ok_or(AppError::Pipeline("Analysis client not set".to_string()))?;
        let geocoder = self
            .geocoder
            .ok_or(AppError::Pipeline("Geocoder not set".to_string()))?;
        let map = self
            .map
            .ok_or(AppError::Pipeline("Map view not set".to_string()))?;

        Ok(PipelineOrchestrator {
            state: Arc::new(watch::Sender::new(PipelineState::default())),
            in_flight: Arc::new(AtomicBool::new(false)),
            uploader,
            analysis,
            geocoder,
            map,
            progress: self.progress,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::Notify;
    use tokio_stream::StreamExt;
    use tokio_stream::wrappers::WatchStream;

    use super::*;
    use crate::map::{CameraFlight, FlightProfile, MapView, Marker};
    use crate::pipeline::types::PipelinePhase;

    #[derive(Default)]
    struct FakeUploader {
        calls: AtomicUsize,
        fail: bool,
        gate: Option<Arc<Notify>>,
    }

    #[async_trait]
    impl MediaUploader for FakeUploader {
        async fn upload(&self, file: &MediaFile, kind: MediaKind) -> Result<String, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            if self.fail {
                return Err(AppError::UploadFailed("storage unreachable".to_string()));
            }
            Ok(format!("https://cdn.test/{}/{}", kind, file.name()))
        }
    }

    struct FakeAnalysis {
        calls: AtomicUsize,
        response: serde_json::Value,
        delay: Duration,
    }

    impl FakeAnalysis {
        fn new(response: serde_json::Value) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                response,
                delay: Duration::ZERO,
            }
        }
    }

    #[async_trait]
    impl AnalysisClient for FakeAnalysis {
        async fn analyze(
            &self,
            media_url: &str,
            _kind: MediaKind,
        ) -> Result<AnalysisResult, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            let mut result: AnalysisResult = serde_json::from_value(self.response.clone()).unwrap();
            result.image_url = Some(media_url.to_string());
            Ok(result)
        }
    }

    #[derive(Default)]
    struct FakeGeocoder {
        calls: Mutex<Vec<String>>,
        answer: Option<Coordinates>,
    }

    #[async_trait]
    impl Geocoder for FakeGeocoder {
        async fn resolve(&self, name: &str) -> Option<Coordinates> {
            self.calls.lock().unwrap().push(name.to_string());
            self.answer
        }
    }

    #[derive(Default)]
    struct RecordingMap {
        ready: bool,
        marker: Option<Marker>,
        flights: Vec<CameraFlight>,
        torn_down: bool,
    }

    impl MapView for RecordingMap {
        fn is_ready(&self) -> bool {
            self.ready
        }

        fn set_marker(
            &mut self,
            position: Coordinates,
            label: &str,
        ) -> Result<CameraFlight, AppError> {
            if !self.ready {
                return Err(AppError::ViewerUnready);
            }
            self.marker = Some(Marker {
                position,
                label: label.to_string(),
            });
            let flight = FlightProfile::default().flight_to(position);
            self.flights.push(flight);
            Ok(flight)
        }

        fn marker(&self) -> Option<&Marker> {
            self.marker.as_ref()
        }

        fn teardown(&mut self) {
            self.ready = false;
            self.torn_down = true;
        }
    }

    struct Harness {
        orchestrator: PipelineOrchestrator,
        uploader: Arc<FakeUploader>,
        analysis: Arc<FakeAnalysis>,
        geocoder: Arc<FakeGeocoder>,
        map: Arc<Mutex<RecordingMap>>,
    }

    fn paris() -> Coordinates {
        Coordinates::new(48.8566, 2.3522)
    }

    fn success(location: &str) -> serde_json::Value {
        serde_json::json!({
            "status": "success",
            "top_location": location,
            "confidence": 87,
            "ai_analysis": { "reasoning": "Haussmann facades" }
        })
    }

    fn harness(
        uploader: FakeUploader,
        analysis: FakeAnalysis,
        geocoder: FakeGeocoder,
        ready: bool,
    ) -> Harness {
        let uploader = Arc::new(uploader);
        let analysis = Arc::new(analysis);
        let geocoder = Arc::new(geocoder);
        let map = Arc::new(Mutex::new(RecordingMap {
            ready,
            ..Default::default()
        }));
        let orchestrator = PipelineOrchestrator::builder(ProgressSettings::default())
            .uploader(uploader.clone())
            .analysis(analysis.clone())
            .geocoder(geocoder.clone())
            .map(map.clone())
            .build()
            .expect("Failed to build orchestrator");
        Harness {
            orchestrator,
            uploader,
            analysis,
            geocoder,
            map,
        }
    }

    fn paris_harness() -> Harness {
        harness(
            FakeUploader::default(),
            FakeAnalysis::new(success("Paris")),
            FakeGeocoder {
                answer: Some(paris()),
                ..Default::default()
            },
            true,
        )
    }

    fn jpeg() -> MediaFile {
        MediaFile::new("eiffel.jpg", "image/jpeg", vec![0xFFu8, 0xD8, 0xFF])
    }

    #[test]
    fn test_builder_requires_collaborators() {
        let result = PipelineOrchestrator::builder(ProgressSettings::default()).build();
        assert!(matches!(result, Err(AppError::Pipeline(_))));
    }

    #[tokio::test]
    async fn test_rejected_kind_leaves_state_untouched() {
        let h = paris_harness();
        h.orchestrator.select_file(jpeg()).unwrap();
        h.orchestrator.run_analysis().await.unwrap();
        let before = h.orchestrator.snapshot();

        let err = h
            .orchestrator
            .select_file(MediaFile::new("notes.pdf", "application/pdf", vec![1u8]))
            .unwrap_err();
        assert!(matches!(err, AppError::KindRejected(ref mime) if mime == "application/pdf"));

        let after = h.orchestrator.snapshot();
        assert_eq!(after.phase().as_str(), "Complete");
        assert_eq!(after.selected().unwrap().file.name(), "eiffel.jpg");
        assert_eq!(after.location(), before.location());
        assert_eq!(after.run_id(), before.run_id());
    }

    #[tokio::test]
    async fn test_run_without_selection_is_noop() {
        let h = paris_harness();
        let outcome = h.orchestrator.run_analysis().await.unwrap();
        assert_eq!(outcome, RunOutcome::NoSelection);
        assert_eq!(h.uploader.calls.load(Ordering::SeqCst), 0);
        assert!(matches!(h.orchestrator.snapshot().phase(), PipelinePhase::Idle));
    }

    #[tokio::test]
    async fn test_paris_places_marker_and_flies_top_down() {
        let h = paris_harness();
        assert_eq!(h.orchestrator.select_file(jpeg()).unwrap(), MediaKind::Image);

        let outcome = h.orchestrator.run_analysis().await.unwrap();
        assert_eq!(outcome, RunOutcome::Completed { location: Some(paris()) });

        let map = h.map.lock().unwrap();
        let marker = map.marker().unwrap();
        assert_eq!(marker.position.latitude, 48.8566);
        assert_eq!(marker.position.longitude, 2.3522);
        assert_eq!(marker.label, "Paris");

        assert_eq!(map.flights.len(), 1);
        let flight = map.flights[0];
        assert_eq!(flight.destination, paris());
        assert_eq!(flight.altitude_m, 30_000.0);
        assert_eq!(flight.pitch_deg, -90.0);
        assert_eq!(flight.heading_deg, 0.0);

        let state = h.orchestrator.snapshot();
        assert_eq!(state.progress(), Some(100));
        assert_eq!(state.location(), Some(paris()));
        assert_eq!(state.result().unwrap().location_name(), Some("Paris"));
        assert!(state.timings().get(PipelineStage::Upload).is_some());
        assert!(state.timings().get(PipelineStage::Marker).is_some());
        assert_eq!(*h.geocoder.calls.lock().unwrap(), vec!["Paris".to_string()]);
        assert!(!h.orchestrator.is_busy());
    }

    #[tokio::test]
    async fn test_unknown_location_skips_geocoding() {
        let h = harness(
            FakeUploader::default(),
            FakeAnalysis::new(success("Unknown Location")),
            FakeGeocoder {
                answer: Some(paris()),
                ..Default::default()
            },
            true,
        );
        h.orchestrator.select_file(jpeg()).unwrap();

        let outcome = h.orchestrator.run_analysis().await.unwrap();
        assert_eq!(outcome, RunOutcome::Completed { location: None });
        assert!(h.geocoder.calls.lock().unwrap().is_empty());
        assert!(h.map.lock().unwrap().marker().is_none());

        let state = h.orchestrator.snapshot();
        assert_eq!(state.result().unwrap().location_name(), Some("Unknown Location"));
        assert!(state.timings().get(PipelineStage::Geocode).is_none());
    }

    #[tokio::test]
    async fn test_geocode_miss_still_shows_result() {
        let h = harness(
            FakeUploader::default(),
            FakeAnalysis::new(success("Atlantis")),
            FakeGeocoder::default(),
            true,
        );
        h.orchestrator.select_file(jpeg()).unwrap();

        let outcome = h.orchestrator.run_analysis().await.unwrap();
        assert_eq!(outcome, RunOutcome::Completed { location: None });
        assert!(h.map.lock().unwrap().marker().is_none());
        assert!(h.orchestrator.snapshot().result().is_some());
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let h = harness(
            FakeUploader::default(),
            FakeAnalysis::new(serde_json::json!({
                "status": "error",
                "top_location": "Paris",
                "error": "model overloaded"
            })),
            FakeGeocoder {
                answer: Some(paris()),
                ..Default::default()
            },
            true,
        );
        h.orchestrator.select_file(jpeg()).unwrap();

        let err = h.orchestrator.run_analysis().await.unwrap_err();
        assert!(
            matches!(err, AppError::AnalysisFailed(ref reason) if reason == "model overloaded")
        );

        let state = h.orchestrator.snapshot();
        assert!(state.result().is_none());
        assert!(state.error().unwrap().contains("model overloaded"));
        assert!(state.selected().is_some());
        assert!(h.geocoder.calls.lock().unwrap().is_empty());
        assert!(h.map.lock().unwrap().marker().is_none());
    }

    #[tokio::test]
    async fn test_upload_failure_allows_retry() {
        let h = harness(
            FakeUploader {
                fail: true,
                ..Default::default()
            },
            FakeAnalysis::new(success("Paris")),
            FakeGeocoder::default(),
            true,
        );
        h.orchestrator.select_file(jpeg()).unwrap();

        let err = h.orchestrator.run_analysis().await.unwrap_err();
        assert!(matches!(err, AppError::UploadFailed(_)));
        assert_eq!(h.analysis.calls.load(Ordering::SeqCst), 0);
        assert!(!h.orchestrator.is_busy());

        let err = h.orchestrator.run_analysis().await.unwrap_err();
        assert!(matches!(err, AppError::UploadFailed(_)));
        assert_eq!(h.uploader.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_second_run_while_in_flight_is_rejected() {
        let gate = Arc::new(Notify::new());
        let h = harness(
            FakeUploader {
                gate: Some(gate.clone()),
                ..Default::default()
            },
            FakeAnalysis::new(success("Paris")),
            FakeGeocoder {
                answer: Some(paris()),
                ..Default::default()
            },
            true,
        );
        h.orchestrator.select_file(jpeg()).unwrap();

        let first = tokio::spawn({
            let orchestrator = h.orchestrator.clone();
            async move { orchestrator.run_analysis().await }
        });
        while h.uploader.calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        assert_eq!(h.orchestrator.run_analysis().await.unwrap(), RunOutcome::Busy);
        assert!(matches!(h.orchestrator.select_file(jpeg()), Err(AppError::Busy)));

        gate.notify_one();
        let outcome = first.await.unwrap().unwrap();
        assert_eq!(outcome, RunOutcome::Completed { location: Some(paris()) });
        assert_eq!(h.uploader.calls.load(Ordering::SeqCst), 1);
        assert_eq!(h.analysis.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_progress_is_monotonic_and_capped() {
        let h = harness(
            FakeUploader::default(),
            FakeAnalysis {
                delay: Duration::from_secs(30),
                ..FakeAnalysis::new(success("Paris"))
            },
            FakeGeocoder {
                answer: Some(paris()),
                ..Default::default()
            },
            true,
        );
        h.orchestrator.select_file(jpeg()).unwrap();

        let mut updates = WatchStream::new(h.orchestrator.subscribe());
        let collector = tokio::spawn(async move {
            let mut seen = Vec::new();
            while let Some(state) = updates.next().await {
                let phase = state.phase().as_str();
                seen.push((phase, state.progress()));
                if phase == "Complete" {
                    break;
                }
            }
            seen
        });

        h.orchestrator.run_analysis().await.unwrap();
        let seen = collector.await.unwrap();

        let in_flight: Vec<u8> = seen
            .iter()
            .filter(|(phase, _)| *phase == "Uploading" || *phase == "Analyzing")
            .filter_map(|(_, progress)| *progress)
            .collect();
        assert!(!in_flight.is_empty());
        assert!(in_flight.windows(2).all(|w| w[0] <= w[1]));
        assert!(in_flight.iter().all(|p| *p < 100));
        assert_eq!(in_flight.last(), Some(&99));
        assert_eq!(seen.last(), Some(&("Complete", Some(100))));
    }

    #[tokio::test]
    async fn test_new_selection_clears_result_and_details() {
        let h = paris_harness();
        h.orchestrator.select_file(jpeg()).unwrap();
        h.orchestrator.run_analysis().await.unwrap();
        assert!(h.orchestrator.toggle_details());

        h.orchestrator
            .select_file(MediaFile::new("clip.mp4", "video/mp4", vec![0u8; 4]))
            .unwrap();
        let state = h.orchestrator.snapshot();
        assert!(state.result().is_none());
        assert!(!state.details_visible());
        assert_eq!(state.location(), None);
        assert_eq!(state.media_kind(), Some(MediaKind::Video));
        assert!(matches!(state.phase(), PipelinePhase::FileSelected));
    }

    #[tokio::test]
    async fn test_unready_viewer_is_swallowed() {
        let h = harness(
            FakeUploader::default(),
            FakeAnalysis::new(success("Paris")),
            FakeGeocoder {
                answer: Some(paris()),
                ..Default::default()
            },
            false,
        );
        h.orchestrator.select_file(jpeg()).unwrap();

        let outcome = h.orchestrator.run_analysis().await.unwrap();
        assert_eq!(outcome, RunOutcome::Completed { location: Some(paris()) });
        assert!(h.map.lock().unwrap().marker().is_none());
        assert!(h.orchestrator.snapshot().result().is_some());
    }

    #[tokio::test]
    async fn test_marker_click_shows_details() {
        let h = paris_harness();
        h.orchestrator.select_marker(true);
        assert!(!h.orchestrator.snapshot().details_visible());

        h.orchestrator.select_file(jpeg()).unwrap();
        h.orchestrator.run_analysis().await.unwrap();

        h.orchestrator.select_marker(true);
        assert!(h.orchestrator.snapshot().details_visible());
        h.orchestrator.select_marker(false);
        assert!(!h.orchestrator.snapshot().details_visible());
        h.orchestrator.select_marker(true);
        h.orchestrator.select_marker(true);
        assert!(h.orchestrator.snapshot().details_visible());
    }

    #[tokio::test]
    async fn test_teardown_releases_map() {
        let h = paris_harness();
        h.orchestrator.teardown();
        assert!(h.map.lock().unwrap().torn_down);
    }
}

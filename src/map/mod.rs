pub mod coastlines;
pub mod globe_view;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::common::Coordinates;
use crate::config::MapSettings;
use crate::error::AppError;

pub use globe_view::GlobeView;

/// Straight down, north up.
pub const TOP_DOWN_HEADING_DEG: f64 = 0.0;
pub const TOP_DOWN_PITCH_DEG: f64 = -90.0;
pub const TOP_DOWN_ROLL_DEG: f64 = 0.0;

const DEFAULT_FLIGHT_DURATION: Duration = Duration::from_secs(2);

/// The single pin + label shown for the current result.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: Coordinates,
    pub label: String,
}

/// A camera move issued when a marker is placed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFlight {
    pub destination: Coordinates,
    pub altitude_m: f64,
    pub heading_deg: f64,
    pub pitch_deg: f64,
    pub roll_deg: f64,
    pub duration: Duration,
}

impl CameraFlight {
    pub fn top_down(destination: Coordinates, altitude_m: f64, duration: Duration) -> Self {
        Self {
            destination,
            altitude_m,
            heading_deg: TOP_DOWN_HEADING_DEG,
            pitch_deg: TOP_DOWN_PITCH_DEG,
            roll_deg: TOP_DOWN_ROLL_DEG,
            duration,
        }
    }
}

/// Fixed altitude and duration for every marker flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightProfile {
    pub altitude_m: f64,
    pub duration: Duration,
}

impl FlightProfile {
    pub fn from_settings(settings: &MapSettings) -> Self {
        Self {
            altitude_m: settings.flight_altitude_m,
            duration: Duration::try_from_secs_f64(settings.flight_duration_secs.max(0.0))
                .unwrap_or(DEFAULT_FLIGHT_DURATION),
        }
    }

    pub fn flight_to(&self, destination: Coordinates) -> CameraFlight {
        CameraFlight::top_down(destination, self.altitude_m, self.duration)
    }
}

impl Default for FlightProfile {
    fn default() -> Self {
        Self::from_settings(&MapSettings::default())
    }
}

/// What the orchestrator needs from a map renderer.
pub trait MapView: Send {
    fn is_ready(&self) -> bool;

    /// Replace any existing marker with one at `position` and fly the camera
    /// straight down onto it.
    fn set_marker(&mut self, position: Coordinates, label: &str) -> Result<CameraFlight, AppError>;

    fn marker(&self) -> Option<&Marker>;

    /// Release the view. It is unready afterwards.
    fn teardown(&mut self);
}

pub type SharedMapView = Arc<Mutex<dyn MapView>>;

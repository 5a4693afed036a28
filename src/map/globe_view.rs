//! Orthographic globe rendered with the egui painter.
//!
//! The camera always looks straight down at `camera.center`, north up, so a
//! flight only has to move the center and the altitude.

use std::f64::consts::PI;
use std::time::{Duration, Instant};

use egui::{Align2, Color32, FontId, Pos2, Sense, Shape, Stroke, Vec2};
use tracing::{debug, info};

use crate::common::Coordinates;
use crate::error::AppError;
use crate::map::coastlines::OUTLINES;
use crate::map::{CameraFlight, FlightProfile, MapView, Marker};

const HOME_ALTITUDE_M: f64 = 20_000_000.0;
const MIN_ALTITUDE_M: f64 = 1_000.0;
const MAX_ALTITUDE_M: f64 = 60_000_000.0;
const MARKER_HIT_RADIUS: f32 = 16.0;
const PIN_HEIGHT: f32 = 22.0;
const GRATICULE_STEP_DEG: i32 = 30;

const SPACE: Color32 = Color32::from_rgb(6, 10, 18);
const OCEAN: Color32 = Color32::from_rgb(12, 38, 64);
const GRID: Color32 = Color32::from_rgb(32, 72, 104);
const COAST: Color32 = Color32::from_rgb(90, 220, 160);
const PIN: Color32 = Color32::from_rgb(230, 57, 70);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub center: Coordinates,
    pub altitude_m: f64,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            center: Coordinates::new(20.0, 10.0),
            altitude_m: HOME_ALTITUDE_M,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ActiveFlight {
    from: CameraPose,
    to: CameraPose,
    started: Instant,
    duration: Duration,
}

/// What the user did to the globe this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlobeResponse {
    pub marker_clicked: bool,
    pub background_clicked: bool,
}

pub struct GlobeView {
    ready: bool,
    released: bool,
    camera: CameraPose,
    flight: Option<ActiveFlight>,
    marker: Option<Marker>,
    profile: FlightProfile,
}

impl GlobeView {
    pub fn new(profile: FlightProfile) -> Self {
        Self {
            ready: false,
            released: false,
            camera: CameraPose::default(),
            flight: None,
            marker: None,
            profile,
        }
    }

    pub fn camera(&self) -> CameraPose {
        self.camera
    }

    pub fn is_flying(&self) -> bool {
        self.flight.is_some()
    }

    /// The view becomes usable once it has been laid out at least once.
    fn initialize(&mut self) {
        if !self.ready && !self.released {
            info!("Globe view initialized");
            self.ready = true;
        }
    }

    /// Step the active flight, if any, to `now`.
    pub fn advance(&mut self, now: Instant) {
        let Some(flight) = self.flight else {
            return;
        };
        let elapsed = now.saturating_duration_since(flight.started);
        if flight.duration.is_zero() || elapsed >= flight.duration {
            self.camera = flight.to;
            self.flight = None;
            debug!("Camera flight finished at {:?}", self.camera.center);
            return;
        }
        let t = elapsed.as_secs_f64() / flight.duration.as_secs_f64();
        self.camera = interpolate(flight.from, flight.to, ease_in_out(t));
    }

    fn radius_px(&self, min_side: f32) -> f32 {
        let zoom = (HOME_ALTITUDE_M / self.camera.altitude_m).sqrt().max(0.25);
        min_side * 0.45 * zoom as f32
    }

    fn to_screen(&self, center: Pos2, radius: f32, point: Coordinates) -> Option<Pos2> {
        project(self.camera.center, point)
            .map(|(x, y)| Pos2::new(center.x + x as f32 * radius, center.y - y as f32 * radius))
    }

    pub fn show(&mut self, ui: &mut egui::Ui) -> GlobeResponse {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        let rect = response.rect;
        if rect.width() > 0.0 && rect.height() > 0.0 {
            self.initialize();
        }

        if response.dragged() {
            self.flight = None;
            self.pan(response.drag_delta(), self.radius_px(rect.width().min(rect.height())));
        }
        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll != 0.0 {
                self.flight = None;
                self.zoom(scroll);
            }
        }

        self.advance(Instant::now());
        if self.flight.is_some() {
            ui.ctx().request_repaint();
        }

        let center = rect.center();
        let radius = self.radius_px(rect.width().min(rect.height()));

        painter.rect_filled(rect, 0.0, SPACE);
        painter.circle_filled(center, radius, OCEAN);
        self.paint_graticule(&painter, center, radius);
        for ring in OUTLINES {
            let points = ring
                .iter()
                .map(|(lat, lon)| Coordinates::new(*lat as f64, *lon as f64));
            self.paint_path(&painter, center, radius, points, Stroke::new(1.5, COAST));
        }

        let mut globe_response = GlobeResponse::default();
        let marker_pos = self
            .marker
            .as_ref()
            .and_then(|m| self.to_screen(center, radius, m.position));
        if let (Some(marker), Some(pos)) = (&self.marker, marker_pos) {
            paint_marker(&painter, pos, &marker.label);
        }

        if response.clicked() {
            let hit = match (response.interact_pointer_pos(), marker_pos) {
                (Some(pointer), Some(pin)) => {
                    pointer.distance(pin - Vec2::new(0.0, PIN_HEIGHT * 0.6)) <= MARKER_HIT_RADIUS
                }
                _ => false,
            };
            globe_response.marker_clicked = hit;
            globe_response.background_clicked = !hit;
        }

        painter.text(
            rect.left_bottom() + Vec2::new(8.0, -8.0),
            Align2::LEFT_BOTTOM,
            format!(
                "{:.4}°, {:.4}°  alt {:.0} km",
                self.camera.center.latitude,
                self.camera.center.longitude,
                self.camera.altitude_m / 1000.0
            ),
            FontId::monospace(11.0),
            GRID,
        );

        globe_response
    }

    fn pan(&mut self, delta: Vec2, radius: f32) {
        if radius <= 0.0 {
            return;
        }
        let lat = self.camera.center.latitude + (delta.y / radius) as f64 * 180.0 / PI;
        let lon = self.camera.center.longitude - (delta.x / radius) as f64 * 180.0 / PI;
        self.camera.center = Coordinates::new(lat.clamp(-89.0, 89.0), wrap_longitude(lon));
    }

    fn zoom(&mut self, scroll: f32) {
        let factor = (-scroll as f64 / 200.0).exp();
        self.camera.altitude_m =
            (self.camera.altitude_m * factor).clamp(MIN_ALTITUDE_M, MAX_ALTITUDE_M);
    }

    fn paint_graticule(&self, painter: &egui::Painter, center: Pos2, radius: f32) {
        let stroke = Stroke::new(0.5, GRID);
        for lat in (-60..=60).step_by(GRATICULE_STEP_DEG as usize) {
            let points = (-180..=180)
                .step_by(2)
                .map(|lon| Coordinates::new(lat as f64, lon as f64));
            self.paint_path(painter, center, radius, points, stroke);
        }
        for lon in (-180..180).step_by(GRATICULE_STEP_DEG as usize) {
            let points = (-90..=90)
                .step_by(2)
                .map(|lat| Coordinates::new(lat as f64, lon as f64));
            self.paint_path(painter, center, radius, points, stroke);
        }
    }

    /// Draws the visible runs of a polyline; hidden points break the line.
    fn paint_path(
        &self,
        painter: &egui::Painter,
        center: Pos2,
        radius: f32,
        points: impl Iterator<Item = Coordinates>,
        stroke: Stroke,
    ) {
        let mut run: Vec<Pos2> = Vec::new();
        for point in points {
            match self.to_screen(center, radius, point) {
                Some(pos) => run.push(pos),
                None => {
                    if run.len() > 1 {
                        painter.add(Shape::line(std::mem::take(&mut run), stroke));
                    }
                    run.clear();
                }
            }
        }
        if run.len() > 1 {
            painter.add(Shape::line(run, stroke));
        }
    }
}

impl MapView for GlobeView {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn set_marker(&mut self, position: Coordinates, label: &str) -> Result<CameraFlight, AppError> {
        if !self.ready {
            return Err(AppError::ViewerUnready);
        }

        if let Some(previous) = self.marker.take() {
            debug!("Removing marker '{}'", previous.label);
        }
        self.marker = Some(Marker {
            position,
            label: label.to_string(),
        });

        let flight = self.profile.flight_to(position);
        self.flight = Some(ActiveFlight {
            from: self.camera,
            to: CameraPose {
                center: flight.destination,
                altitude_m: flight.altitude_m,
            },
            started: Instant::now(),
            duration: flight.duration,
        });
        info!(
            "Marker '{}' placed at {:.4}, {:.4}; flying to {:.0} m",
            label, position.latitude, position.longitude, flight.altitude_m
        );
        Ok(flight)
    }

    fn marker(&self) -> Option<&Marker> {
        self.marker.as_ref()
    }

    fn teardown(&mut self) {
        info!("Globe view released");
        self.ready = false;
        self.released = true;
        self.marker = None;
        self.flight = None;
    }
}

fn paint_marker(painter: &egui::Painter, tip: Pos2, label: &str) {
    let head = tip - Vec2::new(0.0, PIN_HEIGHT * 0.6);
    painter.add(Shape::convex_polygon(
        vec![tip, head + Vec2::new(-6.0, 2.0), head + Vec2::new(6.0, 2.0)],
        PIN,
        Stroke::NONE,
    ));
    painter.circle(head, 7.0, PIN, Stroke::new(1.5, Color32::WHITE));
    painter.circle_filled(head, 2.5, Color32::WHITE);

    let label_pos = tip - Vec2::new(0.0, PIN_HEIGHT + 6.0);
    let font = FontId::proportional(16.0);
    let halo = [
        Vec2::new(-1.0, 0.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(0.0, -1.0),
        Vec2::new(0.0, 1.0),
    ];
    for offset in halo {
        let pos = label_pos + offset;
        painter.text(pos, Align2::CENTER_BOTTOM, label, font.clone(), Color32::BLACK);
    }
    painter.text(label_pos, Align2::CENTER_BOTTOM, label, font, Color32::WHITE);
}

/// Orthographic projection of `point` for a camera above `center`, north up.
///
/// Returns unit-disc coordinates (x east, y north), or `None` on the far side.
pub fn project(center: Coordinates, point: Coordinates) -> Option<(f64, f64)> {
    let (phi0, lambda0) = (center.latitude.to_radians(), center.longitude.to_radians());
    let (phi, lambda) = (point.latitude.to_radians(), point.longitude.to_radians());
    let d_lambda = lambda - lambda0;

    let cos_c = phi0.sin() * phi.sin() + phi0.cos() * phi.cos() * d_lambda.cos();
    if cos_c < 0.0 {
        return None;
    }
    let x = phi.cos() * d_lambda.sin();
    let y = phi0.cos() * phi.sin() - phi0.sin() * phi.cos() * d_lambda.cos();
    Some((x, y))
}

fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Longitude takes the short way round; altitude moves geometrically.
fn interpolate(from: CameraPose, to: CameraPose, t: f64) -> CameraPose {
    let lat = from.center.latitude + (to.center.latitude - from.center.latitude) * t;
    let d_lon = shortest_longitude_delta(from.center.longitude, to.center.longitude);
    let lon = wrap_longitude(from.center.longitude + d_lon * t);
    let (a0, a1) = (from.altitude_m.max(1.0).ln(), to.altitude_m.max(1.0).ln());
    CameraPose {
        center: Coordinates::new(lat, lon),
        altitude_m: (a0 + (a1 - a0) * t).exp(),
    }
}

fn shortest_longitude_delta(from: f64, to: f64) -> f64 {
    let mut delta = to - from;
    if delta > 180.0 {
        delta -= 360.0;
    } else if delta < -180.0 {
        delta += 360.0;
    }
    delta
}

fn wrap_longitude(lon: f64) -> f64 {
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 { 180.0 } else { wrapped }
}

pub mod controller;
pub mod dashboard_app;
pub mod views;

pub use dashboard_app::DashboardApp;

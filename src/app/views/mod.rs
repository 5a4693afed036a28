pub mod controls_view;
pub mod details_view;
pub mod progress_view;

pub use controls_view::ControlsView;
pub use details_view::DetailsView;
pub use progress_view::ProgressView;

pub trait View {
    fn draw(&mut self, ui: &mut egui::Ui);
}

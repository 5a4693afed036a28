pub mod coordinates;
pub mod media;

pub use coordinates::Coordinates;
pub use media::{MediaFile, MediaKind, SelectedMedia};

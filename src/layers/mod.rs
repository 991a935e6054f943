pub mod marker;

pub use marker::{MarkerDescriptor, MarkerDiff, MarkerPresenter, PopupContent};

mod error;
mod location_presenter;

pub use error::PresenterError;
pub use location_presenter::LocationPresenter;

use std::fmt::Debug;
use std::sync::Arc;

pub const DEFAULT_ADDRESS_TEXT: &str = "Could not find address";

/// A single, independently settable piece of text on the display surface.
pub trait TextField: Debug + Send + Sync {
    fn set_text(&self, text: &str);

    fn text(&self) -> String;
}

/// Handles to the fields the presenter writes to, injected at construction.
#[derive(Clone, Debug)]
pub struct DisplayFields {
    pub latitude: Arc<dyn TextField>,
    pub longitude: Arc<dyn TextField>,
    pub altitude: Arc<dyn TextField>,
    pub accuracy: Arc<dyn TextField>,
    pub address: Arc<dyn TextField>,
}

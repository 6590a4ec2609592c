pub mod display;
pub mod events;
pub mod geocoder;
pub mod permission;
mod position_sample;
pub mod provider;
mod resolved_address;

pub use position_sample::PositionSample;
pub use resolved_address::ResolvedAddress;

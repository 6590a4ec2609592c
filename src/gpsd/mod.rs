mod provider;
mod report;

pub use provider::GpsdProvider;

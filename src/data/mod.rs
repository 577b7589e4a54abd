//! Data module - JSON loading and email cleaning

mod loader;
mod processor;

pub use loader::{DataLoader, LoaderError};
pub use processor::{is_invalid_email, DataProcessor, ProcessorError};

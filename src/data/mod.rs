//! Data module - records, the reactive record frame and CSV loading

mod loader;
mod record;

pub use loader::{DataLoader, LoaderError};
pub use record::{sample_records, Record, RecordFrame};

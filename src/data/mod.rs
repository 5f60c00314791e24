//! Interaction stream input module

pub mod parquet;
pub mod stream;

pub use stream::{open_events, EventReader, InteractionEvent};

use anyhow::Result;
use std::path::Path;

/// Supported input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Tab-separated `<timestamp>\t<from>\t<to>` lines
    Text,
    /// Parquet file with sender and receiver columns
    Parquet,
}

impl InputFormat {
    /// Guess the format from the file extension
    pub fn detect(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("parquet") => InputFormat::Parquet,
            _ => InputFormat::Text,
        }
    }
}

/// Read all events from `path` as a single ordered stream
pub fn read_events(
    path: &Path,
    format: InputFormat,
    from_column: &str,
    to_column: &str,
) -> Result<Box<dyn Iterator<Item = Result<InteractionEvent>>>> {
    match format {
        InputFormat::Text => Ok(Box::new(open_events(path)?)),
        InputFormat::Parquet => {
            let events = parquet::load_events(path, from_column, to_column)?;
            Ok(Box::new(events.into_iter().map(Ok)))
        }
    }
}

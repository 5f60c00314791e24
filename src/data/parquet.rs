//! Parquet file handling for interaction data

use crate::data::stream::InteractionEvent;
use anyhow::{anyhow, Result};
use polars::prelude::*;
use std::path::Path;

/// Default column holding the sending key
pub const DEFAULT_FROM_COLUMN: &str = "from";

/// Default column holding the receiving key
pub const DEFAULT_TO_COLUMN: &str = "to";

/// Load interaction events from a Parquet file, in row order
///
/// Key columns of any type are cast to strings.
pub fn load_events(path: &Path, from_column: &str, to_column: &str) -> Result<Vec<InteractionEvent>> {
    log::info!("Reading parquet file: {}", path.display());

    // Check if the file exists
    if !path.exists() {
        return Err(anyhow!("File not found: {}", path.display()));
    }

    let df = LazyFrame::scan_parquet(path, Default::default())?
        .select([
            col(from_column).cast(DataType::String),
            col(to_column).cast(DataType::String),
        ])
        .collect()?;

    log::info!("Loaded {} interactions", df.height());

    let from_col = df.column(from_column)?.str()?;
    let to_col = df.column(to_column)?.str()?;

    let mut events = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        match (from_col.get(i), to_col.get(i)) {
            (Some(from), Some(to)) if !from.is_empty() && !to.is_empty() => {
                events.push(InteractionEvent::new(from, to));
            }
            _ => return Err(anyhow!("Row {}: missing sender or receiver", i)),
        }
    }

    Ok(events)
}

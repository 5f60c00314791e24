//! Tab-separated interaction log reading
//!
//! Each line holds a timestamp, the sending key and the receiving key,
//! separated by tabs. The timestamp is ignored; the second field is the
//! sender and the last field is the receiver. Empty fields are skipped.

use anyhow::{anyhow, Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// A single directed interaction between two external keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionEvent {
    pub from: String,
    pub to: String,
}

impl InteractionEvent {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Parse one log line. Blank lines yield `None`.
pub fn parse_line(line: &str, line_number: usize) -> Result<Option<InteractionEvent>> {
    if line.trim().is_empty() {
        return Ok(None);
    }

    // Empty fields from doubled or trailing tabs are skipped
    let fields: Vec<&str> = line
        .split('\t')
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .collect();
    if fields.len() < 3 {
        return Err(anyhow!(
            "Line {}: expected <timestamp>\\t<from>\\t<to>, found {} field(s)",
            line_number,
            fields.len()
        ));
    }

    Ok(Some(InteractionEvent::new(fields[1], fields[fields.len() - 1])))
}

/// Iterator over the events of a tab-separated log, in file order
pub struct EventReader<R> {
    lines: std::io::Lines<R>,
    line_number: usize,
}

impl<R: BufRead> EventReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
        }
    }
}

impl<R: BufRead> Iterator for EventReader<R> {
    type Item = Result<InteractionEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let next = self.lines.next()?;
            self.line_number += 1;
            let line = match next {
                Ok(line) => line,
                Err(e) => {
                    let e = anyhow::Error::new(e)
                        .context(format!("Failed to read line {}", self.line_number));
                    return Some(Err(e));
                }
            };

            match parse_line(&line, self.line_number) {
                Ok(Some(event)) => return Some(Ok(event)),
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Open a tab-separated interaction log
pub fn open_events(path: &Path) -> Result<EventReader<BufReader<File>>> {
    log::info!("Reading interaction log: {}", path.display());

    let file = File::open(path)
        .with_context(|| format!("Failed to open input file: {}", path.display()))?;

    Ok(EventReader::new(BufReader::new(file)))
}

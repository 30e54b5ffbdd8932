//! Rank report export
//!
//! Turns a rank mapping plus a name lookup into an ordered report:
//! rank descending, ties broken by name ascending and then by id, so the
//! output is fully deterministic.

use crate::error::AirRankResult;
use crate::graph::{AirportId, PLACEHOLDER_NAME};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::io::Write;

/// One line of the report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedAirport {
    pub rank: f64,
    pub id: AirportId,
    pub name: String,
}

/// Report serialization format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// `<rank with 10 decimals><separator><name>` per line
    #[default]
    Text,
    /// `rank,id,name` rows
    Csv,
    /// Array of `{rank, id, name}` objects
    Json,
}

/// How a report is written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// Field separator for the text format
    pub separator: String,
    /// Keep only the top N entries
    pub limit: Option<usize>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Text,
            separator: "\t".to_string(),
            limit: None,
        }
    }
}

/// Order a rank mapping for output
pub fn ranking(
    ranks: &IndexMap<AirportId, f64>,
    names: &IndexMap<AirportId, String>,
) -> Vec<RankedAirport> {
    let mut entries: Vec<RankedAirport> = ranks
        .iter()
        .map(|(id, &rank)| RankedAirport {
            rank,
            id: id.clone(),
            name: names
                .get(id)
                .cloned()
                .unwrap_or_else(|| PLACEHOLDER_NAME.to_string()),
        })
        .collect();

    entries.sort_by(compare);
    entries
}

fn compare(a: &RankedAirport, b: &RankedAirport) -> Ordering {
    b.rank
        .total_cmp(&a.rank)
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.id.cmp(&b.id))
}

/// Format a single text line (without the trailing newline)
pub fn format_line(entry: &RankedAirport, separator: &str) -> String {
    format!("{:.10}{}{}", entry.rank, separator, entry.name)
}

/// Write an ordered report
pub fn write_report<W: Write>(
    mut writer: W,
    entries: &[RankedAirport],
    options: &ExportOptions,
) -> AirRankResult<()> {
    let entries = match options.limit {
        Some(limit) => &entries[..limit.min(entries.len())],
        None => entries,
    };

    match options.format {
        ExportFormat::Text => {
            for entry in entries {
                writeln!(writer, "{}", format_line(entry, &options.separator))?;
            }
        }
        ExportFormat::Csv => {
            let mut csv_writer = csv::Writer::from_writer(&mut writer);
            csv_writer.write_record(["rank", "id", "name"])?;
            for entry in entries {
                csv_writer.write_record([
                    format!("{:.10}", entry.rank).as_str(),
                    entry.id.as_str(),
                    entry.name.as_str(),
                ])?;
            }
            csv_writer.flush()?;
        }
        ExportFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, entries)?;
            writeln!(writer)?;
        }
    }

    writer.flush()?;
    Ok(())
}

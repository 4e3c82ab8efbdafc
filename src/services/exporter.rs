use crate::error::Result;
use crate::types::{CsvRow, ExportSummary, ScoredMovie};
use std::path::Path;
use tracing::info;

pub const CSV_HEADER: [&str; 3] = ["Title", "VOD name", "Rating"];

pub struct CsvExporter;

impl CsvExporter {
    /// Writes `movies` to `path`, replacing any existing file. The header row
    /// is always written, even for an empty list.
    pub fn export(movies: &[ScoredMovie], path: &Path) -> Result<ExportSummary> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_path(path)?;

        writer.write_record(CSV_HEADER)?;
        for movie in movies {
            writer.serialize(CsvRow::from(movie))?;
        }
        writer.flush()?;

        info!("Wrote {} rows to {}", movies.len(), path.display());

        Ok(ExportSummary {
            path: path.to_path_buf(),
            rows: movies.len(),
        })
    }
}

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::models::job::JobPosting;

/// Loads the job corpus CSV. A missing or unreadable file is an error;
/// a file with only a header is a valid empty corpus.
pub fn load_postings(path: &Path) -> Result<Vec<JobPosting>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open job dataset {}", path.display()))?;
    let postings = parse_postings(file)
        .with_context(|| format!("Failed to parse job dataset {}", path.display()))?;
    info!("Loaded {} job postings from {}", postings.len(), path.display());
    Ok(postings)
}

/// Parses postings from CSV with a header row. Rows that fail to
/// deserialize are skipped with a warning rather than failing the corpus.
pub fn parse_postings<R: Read>(reader: R) -> Result<Vec<JobPosting>> {
    // Trim::All also trims header names, so "Job_Title " still maps
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    csv_reader.headers().context("Unreadable CSV header row")?;

    let mut postings = Vec::new();
    for (row, record) in csv_reader.deserialize::<JobPosting>().enumerate() {
        match record {
            Ok(posting) => postings.push(posting),
            Err(e) => warn!("Skipping malformed job dataset row {}: {e}", row + 2),
        }
    }
    Ok(postings)
}

use crate::aggregate::{aggregate, SkippedRow};
use crate::cell::Cell;
use crate::error::IngestError;
use crate::header::{locate_header, HeaderLocation, HeaderVocabulary};
use crate::models::RecordSet;

/// Successful ingestion of one worksheet. `records` is never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Ingestion {
    pub header: HeaderLocation,
    pub records: RecordSet,
    pub skipped: Vec<SkippedRow>,
}

/// Locate the header, then aggregate the rows below it. Either step failing
/// ends the run; there are no retries and no I/O.
pub fn ingest(grid: &[Vec<Cell>], vocabulary: &HeaderVocabulary) -> Result<Ingestion, IngestError> {
    let header = locate_header(grid, vocabulary)?;
    let aggregation = aggregate(grid, &header)?;
    Ok(Ingestion {
        header,
        records: aggregation.records,
        skipped: aggregation.skipped,
    })
}

// Library root: data ingestion and report assembly for the `courtside` binary.

pub mod ingest;
pub mod report;

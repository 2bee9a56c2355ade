//! Reading raw patient tables from CSV or Parquet sources.
//!
//! Every source is decoded into a single Arrow `RecordBatch`. URL sources
//! are fetched once into memory and decoded from there.

pub mod source;

use std::io::{Read, Seek, SeekFrom};
use std::sync::Arc;
use std::time::Instant;

use arrow::compute::concat_batches;
use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::record_batch::RecordBatch;
use log::{debug, info};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::file::reader::ChunkReader;

use crate::config::DatasetConfig;
use crate::error::util::safe_open_file;
use crate::error::{Error, Result};
use crate::utils::logging::{log_operation_complete, log_operation_start};

pub use source::{DataSource, SourceFormat};

/// Read the configured source into one record batch
pub fn read_source(config: &DatasetConfig) -> Result<RecordBatch> {
    let source = &config.source;
    let start = Instant::now();
    log_operation_start("Loading", source);

    let batch = match source {
        DataSource::Path(path) => {
            let file = safe_open_file(path, "reading patient records")?;
            match source.format() {
                SourceFormat::Csv => read_csv(file, config),
                SourceFormat::Parquet => read_parquet(file, config),
            }
        }
        DataSource::Url(url) => {
            let body = fetch_url(url, config)?.bytes().map_err(|e| {
                Error::unavailable(url.as_str(), format!("failed to read response body: {e}"))
            })?;
            match source.format() {
                SourceFormat::Csv => read_csv(std::io::Cursor::new(body), config),
                SourceFormat::Parquet => read_parquet(body, config),
            }
        }
    }
    .map_err(|e| match e {
        Error::Arrow(e) => Error::unavailable(source.to_string(), format!("failed to decode: {e}")),
        Error::Parquet(e) => {
            Error::unavailable(source.to_string(), format!("failed to decode: {e}"))
        }
        other => other,
    })?;

    log_operation_complete("loaded", source, batch.num_rows(), Some(start.elapsed()));
    Ok(batch)
}

/// Decode CSV text with an inferred schema
pub fn read_csv<R: Read + Seek>(mut reader: R, config: &DatasetConfig) -> Result<RecordBatch> {
    let format = Format::default()
        .with_header(config.has_header)
        .with_delimiter(config.delimiter);

    let (schema, rows_sampled) = format.infer_schema(&mut reader, config.infer_schema_rows)?;
    debug!(
        "Inferred CSV schema with {} columns from {rows_sampled} rows",
        schema.fields().len()
    );
    reader
        .seek(SeekFrom::Start(0))
        .map_err(|e| Error::unavailable("csv input", format!("failed to rewind: {e}")))?;

    let schema = Arc::new(schema);
    let csv_reader = ReaderBuilder::new(schema.clone())
        .with_header(config.has_header)
        .with_delimiter(config.delimiter)
        .with_batch_size(config.batch_size)
        .build(reader)?;

    let batches = csv_reader.collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(concat_batches(&schema, &batches)?)
}

/// Decode a Parquet file or in-memory buffer
pub fn read_parquet<T: ChunkReader + 'static>(
    input: T,
    config: &DatasetConfig,
) -> Result<RecordBatch> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(input)?;
    let schema = builder.schema().clone();
    let reader = builder.with_batch_size(config.batch_size).build()?;

    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(concat_batches(&schema, &batches)?)
}

/// Send a GET request, failing on transport errors and non-success statuses
fn fetch_url(url: &str, config: &DatasetConfig) -> Result<reqwest::blocking::Response> {
    info!("Fetching {url}");
    let client = reqwest::blocking::Client::builder()
        .timeout(config.request_timeout)
        .build()
        .map_err(|e| Error::unavailable(url, format!("failed to build HTTP client: {e}")))?;

    let response = client
        .get(url)
        .send()
        .map_err(|e| Error::unavailable(url, format!("request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::unavailable(url, format!("HTTP status {status}")));
    }

    Ok(response)
}

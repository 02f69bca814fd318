use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use arrow::datatypes::SchemaRef;
use csv::{Reader, ReaderBuilder, StringRecord};
use tracing::{debug, info, warn};
use tv_core::{build_text_batch, text_schema, Chunk};

use crate::config::ReaderConfig;
use crate::DataError;

/// CSV file read as a forward-only stream of fixed-size batches
#[derive(Debug, Clone)]
pub struct CsvSource {
    /// Path to the CSV file
    path: PathBuf,
    /// Text schema built from the header row
    schema: SchemaRef,
    config: ReaderConfig,
}

impl CsvSource {
    /// Open a CSV file and read its header row.
    ///
    /// No data rows are read here; use [`CsvSource::batches`] for that.
    pub fn open(path: impl AsRef<Path>, config: &ReaderConfig) -> Result<Self, DataError> {
        let path = path.as_ref().to_path_buf();
        let mut reader = Self::csv_reader(&path, config)?;

        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Err(DataError::NoColumns);
        }

        let names = column_names(&headers, config.has_headers);
        info!("Opened CSV {:?} with {} columns", path, names.len());

        Ok(Self {
            path,
            schema: text_schema(&names),
            config: config.clone(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn column_names(&self) -> Vec<String> {
        self.schema.fields().iter().map(|f| f.name().clone()).collect()
    }

    /// Start a fresh pass over the file from the first data row
    pub fn batches(&self) -> Result<CsvBatchStream, DataError> {
        let reader = Self::csv_reader(&self.path, &self.config)?;
        Ok(CsvBatchStream {
            reader,
            schema: self.schema.clone(),
            batch_size: self.config.chunk_size.max(1),
            next_index: 0,
            rows_read: 0,
            finished: false,
            failure: None,
            pending: None,
        })
    }

    fn csv_reader(path: &Path, config: &ReaderConfig) -> Result<Reader<BufReader<File>>, DataError> {
        let file = File::open(path)?;
        Ok(ReaderBuilder::new()
            .has_headers(config.has_headers)
            .delimiter(config.delimiter)
            .flexible(true)
            .from_reader(BufReader::new(file)))
    }
}

/// Header names; blank or missing names become `Unnamed: <index>`
fn column_names(headers: &StringRecord, has_headers: bool) -> Vec<String> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            if !has_headers {
                idx.to_string()
            } else if name.trim().is_empty() {
                format!("Unnamed: {}", idx)
            } else {
                name.to_string()
            }
        })
        .collect()
}

/// Iterator over the batches of a CSV file.
///
/// Every batch holds `batch_size` rows except possibly the last one. Empty
/// fields are null cells. A record with more fields than the header is a
/// parse error: the rows before it are still handed out, then the stream
/// yields that error on every later call.
pub struct CsvBatchStream {
    reader: Reader<BufReader<File>>,
    schema: SchemaRef,
    batch_size: usize,
    next_index: usize,
    rows_read: usize,
    finished: bool,
    /// Error that stopped the stream
    failure: Option<String>,
    /// Error hit after some rows of the current batch were read
    pending: Option<DataError>,
}

impl CsvBatchStream {
    /// Rows handed out so far
    pub fn rows_read(&self) -> usize {
        self.rows_read
    }

    /// Read up to `batch_size` rows. An error is returned next to the rows
    /// read before it.
    fn read_rows(&mut self) -> (Vec<Vec<Option<String>>>, Option<DataError>) {
        let width = self.schema.fields().len();
        let mut rows = Vec::with_capacity(self.batch_size.min(1024));
        let mut record = StringRecord::new();

        while rows.len() < self.batch_size {
            match self.reader.read_record(&mut record) {
                Ok(true) => {}
                Ok(false) => {
                    self.finished = true;
                    break;
                }
                Err(e) => return (rows, Some(e.into())),
            }

            if record.len() > width {
                let line = record.position().map(|p| p.line()).unwrap_or_default();
                let error = DataError::Csv(format!(
                    "expected {} fields in line {}, saw {}",
                    width,
                    line,
                    record.len()
                ));
                return (rows, Some(error));
            }

            rows.push(
                record
                    .iter()
                    .map(|field| if field.is_empty() { None } else { Some(field.to_string()) })
                    .collect(),
            );
        }

        (rows, None)
    }

    fn fail(&mut self, error: DataError) -> Option<Result<Chunk, DataError>> {
        warn!("CSV stream stopped at chunk {}: {}", self.next_index, error);
        self.failure = Some(error.to_string());
        Some(Err(error))
    }
}

impl Iterator for CsvBatchStream {
    type Item = Result<Chunk, DataError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(error) = self.pending.take() {
            return self.fail(error);
        }
        if let Some(reason) = &self.failure {
            return Some(Err(DataError::Halted(reason.clone())));
        }
        if self.finished {
            return None;
        }

        let (rows, error) = self.read_rows();
        if let Some(error) = error {
            if rows.is_empty() {
                return self.fail(error);
            }
            self.pending = Some(error);
        }

        if rows.is_empty() {
            return None;
        }

        let batch = match build_text_batch(self.schema.clone(), &rows) {
            Ok(batch) => batch,
            Err(e) => return self.fail(e.into()),
        };

        let chunk = Chunk::new(self.next_index, self.rows_read + 1, batch);
        debug!("Read chunk {} ({} rows)", self.next_index, rows.len());

        self.next_index += 1;
        self.rows_read += rows.len();
        Some(Ok(chunk))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_batches_split_rows_by_chunk_size() {
        let mut contents = String::from("id,name\n");
        for i in 0..7 {
            contents.push_str(&format!("{},row{}\n", i, i));
        }
        let file = csv_file(&contents);
        let config = ReaderConfig::default().with_chunk_size(3);

        let source = CsvSource::open(file.path(), &config).unwrap();
        let chunks: Vec<Chunk> = source.batches().unwrap().collect::<Result<_, _>>().unwrap();

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].num_rows(), 3);
        assert_eq!(chunks[2].num_rows(), 1);
        assert_eq!(chunks[1].index(), 1);
        assert_eq!(chunks[1].first_row_number(), 4);
        assert_eq!(chunks[2].cell(0, 1), Some("row6"));
    }

    #[test]
    fn test_empty_fields_are_null_and_short_rows_padded() {
        let file = csv_file("a,b,c\n1,,3\n4\n");
        let source = CsvSource::open(file.path(), &ReaderConfig::default()).unwrap();
        let chunk = source.batches().unwrap().next().unwrap().unwrap();

        assert_eq!(chunk.cell(0, 1), None);
        assert_eq!(chunk.cell(0, 2), Some("3"));
        assert_eq!(chunk.cell(1, 0), Some("4"));
        assert_eq!(chunk.cell(1, 2), None);
    }

    #[test]
    fn test_extra_fields_are_an_error() {
        let file = csv_file("a,b\n1,2,3\n4,5\n");
        let source = CsvSource::open(file.path(), &ReaderConfig::default()).unwrap();
        let mut batches = source.batches().unwrap();

        assert!(matches!(batches.next(), Some(Err(DataError::Csv(_)))));
        assert!(matches!(batches.next(), Some(Err(DataError::Halted(_)))));
    }

    #[test]
    fn test_rows_before_a_bad_record_are_kept() {
        let file = csv_file("a,b\n1,2\n3,4\n5,6\n7,8,9\n10,11\n");
        let config = ReaderConfig::default().with_chunk_size(2);
        let source = CsvSource::open(file.path(), &config).unwrap();
        let mut batches = source.batches().unwrap();

        assert_eq!(batches.next().unwrap().unwrap().num_rows(), 2);
        let partial = batches.next().unwrap().unwrap();
        assert_eq!(partial.num_rows(), 1);
        assert_eq!(partial.first_row_number(), 3);
        assert_eq!(partial.cell(0, 0), Some("5"));

        assert!(matches!(batches.next(), Some(Err(DataError::Csv(_)))));
        assert!(matches!(batches.next(), Some(Err(DataError::Halted(_)))));
        assert_eq!(batches.rows_read(), 3);
    }

    #[test]
    fn test_blank_header_names_are_generated() {
        let file = csv_file("name,,age\nx,y,z\n");
        let source = CsvSource::open(file.path(), &ReaderConfig::default()).unwrap();

        assert_eq!(source.column_names(), vec!["name", "Unnamed: 1", "age"]);
    }

    #[test]
    fn test_repeated_header_names_are_made_unique() {
        let file = csv_file("a,a,,a\n1,2,3,4\n");
        let source = CsvSource::open(file.path(), &ReaderConfig::default()).unwrap();

        assert_eq!(source.column_names(), vec!["a", "a.1", "Unnamed: 2", "a.2"]);
    }

    #[test]
    fn test_empty_file_has_no_columns() {
        let file = csv_file("");
        let result = CsvSource::open(file.path(), &ReaderConfig::default());

        assert!(matches!(result, Err(DataError::NoColumns)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = CsvSource::open("/definitely/not/here.csv", &ReaderConfig::default());
        assert!(matches!(result, Err(DataError::Io(_))));
    }
}

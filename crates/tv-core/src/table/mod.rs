//! Text-cell table model
//!
//! Every table handled by the viewer is an Arrow [`RecordBatch`] whose columns
//! are all nullable `Utf8`. No per-file schema is inferred: values are carried
//! as the text the source produced, and a missing value is a null cell.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, StringArray, StringBuilder};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;

/// Build a schema of nullable text columns with the given names.
///
/// Repeated names get a `.1`, `.2`, ... suffix so every column can be looked
/// up by name.
pub fn text_schema<S: AsRef<str>>(names: &[S]) -> SchemaRef {
    let fields = unique_names(names)
        .into_iter()
        .map(|name| Field::new(name, DataType::Utf8, true))
        .collect::<Vec<_>>();
    Arc::new(Schema::new(fields))
}

fn unique_names<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut taken: HashSet<String> = names.iter().map(|n| n.as_ref().to_string()).collect();
    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut unique = Vec::with_capacity(names.len());

    for name in names {
        let name = name.as_ref();
        let count = seen.entry(name).or_insert(0);
        if *count == 0 {
            unique.push(name.to_string());
        } else {
            let mut candidate = format!("{}.{}", name, count);
            while taken.contains(&candidate) {
                *count += 1;
                candidate = format!("{}.{}", name, count);
            }
            taken.insert(candidate.clone());
            unique.push(candidate);
        }
        *count += 1;
    }

    unique
}

/// Build a text batch from row-major cells.
///
/// Rows shorter than the schema are padded with nulls; extra cells are ignored.
pub fn build_text_batch(schema: SchemaRef, rows: &[Vec<Option<String>>]) -> Result<RecordBatch, ArrowError> {
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(schema.fields().len());

    for col_idx in 0..schema.fields().len() {
        let mut builder = StringBuilder::new();
        for row in rows {
            match row.get(col_idx) {
                Some(Some(value)) => builder.append_value(value),
                _ => builder.append_null(),
            }
        }
        columns.push(Arc::new(builder.finish()));
    }

    if columns.is_empty() {
        // A batch without columns still needs to know how many rows it holds
        let options = arrow::record_batch::RecordBatchOptions::new().with_row_count(Some(rows.len()));
        return RecordBatch::try_new_with_options(schema, columns, &options);
    }

    RecordBatch::try_new(schema, columns)
}

/// A page of rows together with its position in the source
#[derive(Debug, Clone)]
pub struct Chunk {
    /// 0-based position of the chunk in its source
    index: usize,
    /// 1-based row number of the first row
    first_row_number: usize,
    batch: RecordBatch,
}

impl Chunk {
    /// Create a chunk
    pub fn new(index: usize, first_row_number: usize, batch: RecordBatch) -> Self {
        Self {
            index,
            first_row_number,
            batch,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn first_row_number(&self) -> usize {
        self.first_row_number
    }

    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn num_columns(&self) -> usize {
        self.batch.num_columns()
    }

    pub fn is_empty(&self) -> bool {
        self.batch.num_rows() == 0
    }

    /// Column names in source order
    pub fn column_names(&self) -> Vec<String> {
        self.batch
            .schema()
            .fields()
            .iter()
            .map(|field| field.name().clone())
            .collect()
    }

    /// Absolute 1-based row number of the row at `offset` within this chunk
    pub fn row_number(&self, offset: usize) -> usize {
        self.first_row_number + offset
    }

    /// Row number of the last row, if the chunk has any rows
    pub fn last_row_number(&self) -> Option<usize> {
        self.num_rows().checked_sub(1).map(|offset| self.row_number(offset))
    }

    /// Cell text, `None` when the cell is null
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        let array = self.batch.column(col).as_any().downcast_ref::<StringArray>()?;
        if row >= array.len() || array.is_null(row) {
            None
        } else {
            Some(array.value(row))
        }
    }

    /// All cells of a row in column order
    pub fn row_cells(&self, row: usize) -> Vec<Option<String>> {
        (0..self.num_columns())
            .map(|col| self.cell(row, col).map(str::to_string))
            .collect()
    }

    /// The row as rendered in a grid: the row number followed by every cell,
    /// nulls shown as empty text
    pub fn display_row(&self, row: usize) -> Vec<String> {
        let mut values = Vec::with_capacity(self.num_columns() + 1);
        values.push(self.row_number(row).to_string());
        for col in 0..self.num_columns() {
            values.push(self.cell(row, col).unwrap_or_default().to_string());
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[Option<&str>]) -> Vec<Option<String>> {
        values.iter().map(|v| v.map(str::to_string)).collect()
    }

    #[test]
    fn test_build_text_batch_pads_short_rows() {
        let schema = text_schema(&["name", "age"]);
        let rows = vec![
            cells(&[Some("Alice"), Some("42")]),
            cells(&[Some("bob")]),
        ];

        let batch = build_text_batch(schema, &rows).unwrap();
        let chunk = Chunk::new(0, 1, batch);

        assert_eq!(chunk.num_rows(), 2);
        assert_eq!(chunk.cell(0, 0), Some("Alice"));
        assert_eq!(chunk.cell(1, 1), None);
        assert_eq!(chunk.column_names(), vec!["name", "age"]);
    }

    #[test]
    fn test_repeated_column_names_get_suffixes() {
        let schema = text_schema(&["a", "b", "a", "a.1", "a"]);
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();

        assert_eq!(names, vec!["a", "b", "a.2", "a.1", "a.3"]);
    }

    #[test]
    fn test_row_numbers_are_offset_by_chunk_start() {
        let schema = text_schema(&["v"]);
        let rows = vec![cells(&[Some("a")]), cells(&[Some("b")])];
        let chunk = Chunk::new(2, 10_001, build_text_batch(schema, &rows).unwrap());

        assert_eq!(chunk.row_number(0), 10_001);
        assert_eq!(chunk.last_row_number(), Some(10_002));
        assert_eq!(chunk.display_row(1), vec!["10002", "b"]);
    }

    #[test]
    fn test_empty_batch_has_no_last_row() {
        let schema = text_schema::<&str>(&[]);
        let chunk = Chunk::new(0, 1, build_text_batch(schema, &[]).unwrap());

        assert!(chunk.is_empty());
        assert_eq!(chunk.last_row_number(), None);
    }
}

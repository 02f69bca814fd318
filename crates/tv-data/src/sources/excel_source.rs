use std::path::Path;

use arrow::record_batch::RecordBatch;
use calamine::{open_workbook, Data, DataType, Range, Reader, Xlsx};
use indexmap::IndexMap;
use tracing::{debug, info};
use tv_core::{build_text_batch, text_schema, Chunk};

use crate::DataError;

/// Every sheet of a workbook, fully loaded, in workbook order.
///
/// The first row of each sheet names its columns. A sheet is exposed as a
/// single chunk whose rows are numbered from 1.
#[derive(Debug, Clone, Default)]
pub struct SheetCollection {
    sheets: IndexMap<String, Chunk>,
}

impl SheetCollection {
    /// Load every sheet of an `.xlsx` workbook
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        let mut workbook: Xlsx<_> = open_workbook(path)?;

        let mut sheets = IndexMap::new();
        for name in workbook.sheet_names() {
            let range = workbook.worksheet_range(&name)?;
            let batch = range_to_batch(&range)?;
            debug!("Loaded sheet '{}' ({} rows)", name, batch.num_rows());
            sheets.insert(name, Chunk::new(0, 1, batch));
        }

        info!("Opened workbook {:?} with {} sheets", path, sheets.len());
        Ok(Self { sheets })
    }

    /// Build a collection from already materialized tables
    pub fn from_sheets(sheets: impl IntoIterator<Item = (String, RecordBatch)>) -> Self {
        Self {
            sheets: sheets
                .into_iter()
                .map(|(name, batch)| (name, Chunk::new(0, 1, batch)))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Sheet names in workbook order
    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.keys().map(String::as_str)
    }

    /// Sheet at a workbook position
    pub fn get_index(&self, index: usize) -> Option<(&str, &Chunk)> {
        self.sheets
            .get_index(index)
            .map(|(name, chunk)| (name.as_str(), chunk))
    }

    /// Sheets in workbook order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Chunk)> {
        self.sheets.iter().map(|(name, chunk)| (name.as_str(), chunk))
    }
}

/// Convert a worksheet range to a text batch, using its first row as header
pub fn range_to_batch(range: &Range<Data>) -> Result<RecordBatch, DataError> {
    let mut rows = range.rows();

    let names: Vec<String> = match rows.next() {
        Some(header) => header
            .iter()
            .enumerate()
            .map(|(idx, cell)| cell_text(cell).unwrap_or_else(|| format!("Unnamed: {}", idx)))
            .collect(),
        None => Vec::new(),
    };

    let data: Vec<Vec<Option<String>>> = rows
        .map(|row| row.iter().map(cell_text).collect())
        .collect();

    Ok(build_text_batch(text_schema(&names), &data)?)
}

/// Text of a worksheet cell; `None` for empty cells
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) if s.is_empty() => None,
        Data::DateTime(_) | Data::DateTimeIso(_) => cell
            .as_datetime()
            .map(|dt| dt.to_string())
            .or_else(|| Some(cell.to_string())),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{ExcelDateTime, ExcelDateTimeType};

    fn fixture(name: &str) -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
    }

    fn sheet(cells: &[&[Data]]) -> Range<Data> {
        let height = cells.len() as u32;
        let width = cells.iter().map(|r| r.len()).max().unwrap_or(0) as u32;
        let mut range = Range::new((0, 0), (height - 1, width - 1));
        for (r, row) in cells.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                range.set_value((r as u32, c as u32), value.clone());
            }
        }
        range
    }

    #[test]
    fn test_first_row_is_header() {
        let range = sheet(&[
            &[Data::String("name".into()), Data::String("score".into())],
            &[Data::String("Alice".into()), Data::Float(42.0)],
            &[Data::String("bob".into()), Data::Int(99)],
        ]);

        let batch = range_to_batch(&range).unwrap();
        let chunk = Chunk::new(0, 1, batch);

        assert_eq!(chunk.column_names(), vec!["name", "score"]);
        assert_eq!(chunk.num_rows(), 2);
        assert_eq!(chunk.cell(0, 1), Some("42"));
        assert_eq!(chunk.cell(1, 1), Some("99"));
    }

    #[test]
    fn test_empty_cells_are_null() {
        let range = sheet(&[
            &[Data::String("a".into()), Data::Empty],
            &[Data::Empty, Data::Bool(true)],
        ]);

        let batch = range_to_batch(&range).unwrap();
        let chunk = Chunk::new(0, 1, batch);

        assert_eq!(chunk.column_names(), vec!["a", "Unnamed: 1"]);
        assert_eq!(chunk.cell(0, 0), None);
        assert_eq!(chunk.cell(0, 1), Some("true"));
    }

    #[test]
    fn test_empty_sheet_has_no_rows() {
        let batch = range_to_batch(&Range::empty()).unwrap();
        assert_eq!(batch.num_rows(), 0);
        assert_eq!(batch.num_columns(), 0);
    }

    #[test]
    fn test_sheets_keep_workbook_order() {
        let jan = range_to_batch(&sheet(&[&[Data::String("v".into())], &[Data::String("x".into())]])).unwrap();
        let feb = range_to_batch(&sheet(&[&[Data::String("v".into())]])).unwrap();

        let sheets = SheetCollection::from_sheets(vec![
            ("Jan".to_string(), jan),
            ("Feb".to_string(), feb),
        ]);

        assert_eq!(sheets.sheet_names().collect::<Vec<_>>(), vec!["Jan", "Feb"]);
        assert_eq!(sheets.get_index(1).map(|(name, _)| name), Some("Feb"));
        assert_eq!(sheets.get_index(0).map(|(_, c)| c.num_rows()), Some(1));
    }

    #[test]
    fn test_date_cells_are_formatted() {
        let serial = Data::DateTime(ExcelDateTime::new(45306.5, ExcelDateTimeType::DateTime, false));
        assert_eq!(cell_text(&serial).as_deref(), Some("2024-01-15 12:00:00"));

        let iso = Data::DateTimeIso("2024-01-15T10:30:00".to_string());
        assert_eq!(cell_text(&iso).as_deref(), Some("2024-01-15 10:30:00"));
    }

    #[test]
    fn test_open_workbook_file() {
        let sheets = SheetCollection::open(fixture("workbook.xlsx")).unwrap();

        assert_eq!(sheets.sheet_names().collect::<Vec<_>>(), vec!["Jan", "Feb"]);

        let (_, jan) = sheets.get_index(0).unwrap();
        assert_eq!(jan.column_names(), vec!["name", "joined", "score"]);
        assert_eq!(jan.num_rows(), 2);
        assert_eq!(jan.cell(0, 0), Some("Alice"));
        assert_eq!(jan.cell(0, 1), Some("2024-01-15 00:00:00"));
        assert_eq!(jan.cell(0, 2), Some("42"));
        assert_eq!(jan.cell(1, 1), None);

        let (_, feb) = sheets.get_index(1).unwrap();
        assert_eq!(feb.cell(0, 0), Some("CARL"));
    }

    #[test]
    fn test_missing_workbook_is_an_error() {
        assert!(SheetCollection::open(fixture("missing.xlsx")).is_err());
    }
}

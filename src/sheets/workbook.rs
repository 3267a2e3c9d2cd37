//! Local workbook source
//!
//! A workbook is either a spreadsheet file (`.xlsx`, `.xlsm`, `.xls`,
//! `.ods`) read with calamine, or a directory of CSV exports named
//! `<sheet name>.csv`. Sheet lookup is exact first, then case-insensitive.

use super::*;
use async_trait::async_trait;
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::{Component, Path, PathBuf};

const SPREADSHEET_EXTENSIONS: [&str; 4] = ["xlsx", "xlsm", "xls", "ods"];

/// Reads sheets from a spreadsheet file or a directory of CSV files
#[derive(Debug, Clone)]
pub struct WorkbookSource {
    path: PathBuf,
}

impl WorkbookSource {
    /// Create a source over a spreadsheet file or CSV directory
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Workbook location
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the workbook is a single spreadsheet file
    pub fn is_spreadsheet(&self) -> bool {
        self.path
            .extension()
            .map(|ext| {
                SPREADSHEET_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            })
            .unwrap_or(false)
    }

    /// Locate the CSV file for a sheet
    async fn csv_path(&self, sheet: &str) -> SheetResult<Option<PathBuf>> {
        let exact = self.path.join(format!("{}.csv", sheet));
        if tokio::fs::try_exists(&exact).await? {
            return Ok(Some(exact));
        }

        let wanted = sheet.to_lowercase();
        let mut entries = tokio::fs::read_dir(&self.path).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_csv = path
                .extension()
                .map(|ext| ext.eq_ignore_ascii_case("csv"))
                .unwrap_or(false);
            let stem_matches = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().to_lowercase() == wanted)
                .unwrap_or(false);
            if is_csv && stem_matches {
                return Ok(Some(path));
            }
        }

        Ok(None)
    }

    async fn fetch_spreadsheet(&self, sheet: &str) -> SheetResult<Option<Sheet>> {
        let path = self.path.clone();
        let name = sheet.to_string();
        tokio::task::spawn_blocking(move || read_spreadsheet(&path, &name))
            .await
            .map_err(|e| SheetError::Xlsx(format!("spreadsheet reader failed: {}", e)))?
    }
}

/// Reject names that could resolve outside the workbook directory
pub fn validate_sheet_name(sheet: &str) -> SheetResult<()> {
    let path = Path::new(sheet);
    let single_component = matches!(
        path.components().collect::<Vec<_>>().as_slice(),
        [Component::Normal(_)]
    );
    if sheet.trim().is_empty()
        || sheet.contains(['/', '\\', '\0'])
        || path.is_absolute()
        || !single_component
    {
        return Err(SheetError::InvalidSheetName(sheet.to_string()));
    }
    Ok(())
}

/// Read one worksheet; `None` when the file has no such sheet
fn read_spreadsheet(path: &Path, sheet: &str) -> SheetResult<Option<Sheet>> {
    let mut workbook = open_workbook_auto(path)?;
    let names = workbook.sheet_names();

    let wanted = sheet.to_lowercase();
    let Some(actual) = names
        .iter()
        .find(|n| n.as_str() == sheet)
        .or_else(|| names.iter().find(|n| n.to_lowercase() == wanted))
        .cloned()
    else {
        return Ok(None);
    };

    let range = workbook.worksheet_range(&actual)?;
    Ok(Some(range_to_sheet(sheet, &range)))
}

/// First row is the header; blank rows are dropped
fn range_to_sheet(name: &str, range: &Range<Data>) -> Sheet {
    let mut rows = range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect::<Vec<String>>());

    let Some(headers) = rows.next() else {
        return Sheet::empty(name);
    };
    let rows = rows
        .filter(|row| !row.iter().all(|cell| cell.trim().is_empty()))
        .collect();

    Sheet::new(name, headers, rows)
}

/// Decode CSV bytes into a sheet
pub(crate) fn parse_csv(name: &str, data: &[u8]) -> SheetResult<Sheet> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data);

    let mut headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();
    if let Some(first) = headers.first_mut() {
        *first = first.trim_start_matches('\u{feff}').to_string();
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        // Spreadsheet exports pad trailing blank rows with commas
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        rows.push(record.iter().map(String::from).collect());
    }

    Ok(Sheet::new(name, headers, rows))
}

#[async_trait]
impl SheetSource for WorkbookSource {
    fn name(&self) -> &str {
        "workbook"
    }

    async fn fetch(&self, sheet: &str) -> SheetResult<Sheet> {
        validate_sheet_name(sheet)?;
        if !tokio::fs::try_exists(&self.path).await? {
            return Err(SheetError::WorkbookNotFound(self.path.clone()));
        }

        let loaded = if self.is_spreadsheet() {
            self.fetch_spreadsheet(sheet).await?
        } else {
            match self.csv_path(sheet).await? {
                Some(path) => {
                    let data = tokio::fs::read(&path).await?;
                    Some(parse_csv(sheet, &data)?)
                }
                None => None,
            }
        };

        match loaded {
            Some(parsed) => {
                tracing::debug!(sheet = %sheet, rows = parsed.len(), "Loaded sheet from workbook");
                Ok(parsed)
            }
            None => {
                tracing::debug!(sheet = %sheet, path = ?self.path, "Sheet not in workbook");
                Ok(Sheet::empty(sheet))
            }
        }
    }

    async fn ping(&self) -> SheetResult<()> {
        if tokio::fs::try_exists(&self.path).await? {
            Ok(())
        } else {
            Err(SheetError::WorkbookNotFound(self.path.clone()))
        }
    }
}

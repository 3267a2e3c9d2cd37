//! Core sheet types
//!
//! A [`Sheet`] is a header row plus string cells, the shape every source
//! produces. A [`Record`] is one row keyed by column name, in column order.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A named table of string cells
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sheet {
    /// Sheet (tab) name in the workbook
    pub name: String,
    /// Column headers
    pub headers: Vec<String>,
    /// Data rows; a short row reads as empty cells
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    /// Create a sheet from headers and rows
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows,
        }
    }

    /// Create an empty sheet
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Build a sheet from string slices (handy for fixtures)
    pub fn from_rows(name: &str, headers: &[&str], rows: &[&[&str]]) -> Self {
        Self::new(
            name,
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    /// True when the sheet has no rows or no columns
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.headers.is_empty()
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Index of the column with this exact header
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Whether a column exists
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Cell at a row and column, "" when absent
    pub fn cell(&self, row: usize, column: &str) -> &str {
        self.column_index(column)
            .and_then(|idx| self.rows.get(row).and_then(|r| r.get(idx)))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Clean up header whitespace: NBSP and tabs become spaces, one pass of
    /// double-space collapsing, then trim.
    pub fn normalize_headers(&mut self) {
        for header in &mut self.headers {
            *header = normalize_header(header);
        }
    }

    /// Trim surrounding whitespace from every header
    pub fn trim_headers(&mut self) {
        for header in &mut self.headers {
            *header = header.trim().to_string();
        }
    }

    /// Add an empty column when it does not exist yet.
    ///
    /// Cells beyond the existing headers are dropped first so they never
    /// land in the new column.
    pub fn ensure_column(&mut self, name: &str) {
        if !self.has_column(name) {
            let width = self.headers.len();
            for row in &mut self.rows {
                row.resize(width, String::new());
                row.push(String::new());
            }
            self.headers.push(name.to_string());
        }
    }

    /// Rename columns; `rename` returns the new name for headers it maps
    pub fn rename_columns<F>(&mut self, rename: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        for header in &mut self.headers {
            if let Some(new_name) = rename(header) {
                *header = new_name;
            }
        }
    }

    /// Keep only the listed columns that exist, in the listed order
    pub fn select(&self, columns: &[&str]) -> Sheet {
        let indices: Vec<usize> = columns
            .iter()
            .filter_map(|c| self.column_index(c))
            .collect();

        Sheet {
            name: self.name.clone(),
            headers: indices.iter().map(|&i| self.headers[i].clone()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| {
                    indices
                        .iter()
                        .map(|&i| row.get(i).cloned().unwrap_or_default())
                        .collect()
                })
                .collect(),
        }
    }

    /// Apply a transform to every cell
    pub fn map_cells<F>(&mut self, f: F)
    where
        F: Fn(&str) -> String,
    {
        for row in &mut self.rows {
            for cell in row.iter_mut() {
                *cell = f(cell);
            }
        }
    }

    /// Rows as records keyed by header
    pub fn records(&self) -> Vec<Record> {
        self.rows
            .iter()
            .map(|row| Record {
                fields: self
                    .headers
                    .iter()
                    .enumerate()
                    .map(|(i, h)| (h.clone(), row.get(i).cloned().unwrap_or_default()))
                    .collect(),
            })
            .collect()
    }
}

/// Header cleanup shared by sheets whose headers come from free-typed cells
pub fn normalize_header(header: &str) -> String {
    header
        .replace('\u{a0}', " ")
        .replace('\t', " ")
        .replace("  ", " ")
        .trim()
        .to_string()
}

/// One sheet row as ordered `(column, value)` pairs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    /// Build a record from pairs
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Value for an exact column name
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Value for an exact column name, "" when absent
    pub fn value(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    /// Value for a column matched case-insensitively after trimming
    pub fn get_ci(&self, key: &str) -> Option<&str> {
        let wanted = key.trim().to_lowercase();
        self.fields
            .iter()
            .find(|(k, _)| k.trim().to_lowercase() == wanted)
            .map(|(_, v)| v.as_str())
    }

    /// First non-empty value among candidate columns (exact names)
    pub fn first_of(&self, keys: &[&str]) -> &str {
        keys.iter()
            .filter_map(|k| self.get(k))
            .find(|v| !v.is_empty())
            .unwrap_or("")
    }

    /// First value among candidate columns matched case-insensitively
    pub fn first_of_ci(&self, keys: &[&str]) -> &str {
        keys.iter()
            .find_map(|k| self.get_ci(k))
            .unwrap_or("")
    }

    /// Set a value, appending the column if missing
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value,
            None => self.fields.push((key.to_string(), value)),
        }
    }

    /// Iterate over `(column, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterate over values in column order
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, v)| v.as_str())
    }

    /// Column names in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Sheet {
        Sheet::from_rows(
            "sample",
            &["Months", " 2024\u{a0}", "2025"],
            &[&["Jan", "10", "12"], &["Feb", "8"]],
        )
    }

    #[test]
    fn test_short_rows_read_as_empty() {
        let mut sheet = sample();
        sheet.normalize_headers();
        assert_eq!(sheet.cell(1, "2025"), "");
        assert_eq!(sheet.cell(0, "2024"), "10");
        assert_eq!(sheet.cell(5, "Months"), "");
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("\tTarget\u{a0} Amount "), "Target Amount");
        assert_eq!(normalize_header("a    b"), "a  b");
    }

    #[test]
    fn test_select_and_ensure_column() {
        let mut sheet = sample();
        sheet.trim_headers();
        let picked = sheet.select(&["2025", "Months", "missing"]);
        assert_eq!(picked.headers, vec!["2025", "Months"]);
        assert_eq!(picked.rows[1], vec!["".to_string(), "Feb".to_string()]);

        sheet.ensure_column("Notes");
        assert_eq!(sheet.headers.len(), 4);
        assert_eq!(sheet.cell(0, "Notes"), "");
    }

    #[test]
    fn test_ensure_column_ignores_overflow_cells() {
        let mut sheet = Sheet::new(
            "plan",
            vec!["Goal".into(), "Action".into()],
            vec![
                vec!["Grow".into(), "Launch".into(), "stray note".into()],
                vec!["Keep".into()],
            ],
        );

        sheet.ensure_column("Photo_URL 1");

        assert_eq!(sheet.cell(0, "Photo_URL 1"), "");
        assert_eq!(sheet.rows[0].len(), 3);
        assert_eq!(sheet.rows[1], vec!["Keep".to_string(), String::new(), String::new()]);
    }

    #[test]
    fn test_record_lookups() {
        let record = Record::from_pairs([("Key Topic", "Launch"), ("OWNER ", "Ana")]);
        assert_eq!(record.get_ci("owner"), Some("Ana"));
        assert_eq!(record.first_of(&["Key_Topic", "Key Topic"]), "Launch");
        assert_eq!(record.first_of_ci(&["Activity_ID", "Activity ID"]), "");
    }

    #[test]
    fn test_record_serializes_in_column_order() {
        let record = Record::from_pairs([("b", "1"), ("a", "2")]);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"b":"1","a":"2"}"#);
    }

    #[test]
    fn test_empty_sheet() {
        assert!(Sheet::empty("x").is_empty());
        assert!(Sheet::from_rows("x", &[], &[&[]]).is_empty());
    }
}

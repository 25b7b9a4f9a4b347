use super::{format_flag, parse_flag};

/// An ordered table of string-valued records sharing one header.
///
/// Rows are never reordered; index `i` always names the same record for the
/// lifetime of a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Create an empty dataset with the given header.
    pub const fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Build a dataset from a header and rows.
    ///
    /// Returns the zero-based index of the first row whose width differs from
    /// the header as the error.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, usize> {
        if let Some(bad) = rows.iter().position(|row| row.len() != headers.len()) {
            return Err(bad);
        }
        Ok(Self { headers, rows })
    }

    /// Append a record. Rows whose width differs from the header are refused.
    pub fn push_row(&mut self, row: Vec<String>) -> bool {
        if row.len() != self.headers.len() {
            return false;
        }
        self.rows.push(row);
        true
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of records.
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of fields per record.
    pub const fn width(&self) -> usize {
        self.headers.len()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.rows.iter().map(Vec::as_slice)
    }

    pub fn row(&self, row: usize) -> Option<&[String]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Value at a (row, column) position.
    pub fn value(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// Value of a named field in a record.
    pub fn field(&self, row: usize, name: &str) -> Option<&str> {
        self.value(row, self.column_index(name)?)
    }

    /// Boolean value of a named field. Missing fields read as false.
    pub fn flag(&self, row: usize, name: &str) -> bool {
        self.field(row, name).is_some_and(parse_flag)
    }

    /// Iterate `(field, value)` pairs of one record in header order.
    pub fn fields(&self, row: usize) -> impl Iterator<Item = (&str, &str)> {
        let values = self.rows.get(row).map(Vec::as_slice).unwrap_or_default();
        self.headers
            .iter()
            .map(String::as_str)
            .zip(values.iter().map(String::as_str))
    }

    /// Overwrite one cell. Returns false when the position does not exist.
    pub fn set_value(&mut self, row: usize, col: usize, value: impl Into<String>) -> bool {
        match self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(cell) => {
                *cell = value.into();
                true
            }
            None => false,
        }
    }

    /// Overwrite a named field. Returns false when the row or field is missing.
    pub fn set_field(&mut self, row: usize, name: &str, value: impl Into<String>) -> bool {
        match self.column_index(name) {
            Some(col) => self.set_value(row, col, value),
            None => false,
        }
    }

    pub fn set_flag(&mut self, row: usize, name: &str, value: bool) -> bool {
        self.set_field(row, name, format_flag(value))
    }

    /// Set `name` to `value` on every record, appending the column if absent.
    pub fn fill_column(&mut self, name: &str, value: &str) {
        if let Some(col) = self.column_index(name) {
            for row in &mut self.rows {
                row[col] = value.to_string();
            }
        } else {
            self.headers.push(name.to_string());
            for row in &mut self.rows {
                row.push(value.to_string());
            }
        }
    }

    /// Append `name` with `value` on every record unless it already exists.
    ///
    /// Returns true when the column was added.
    pub fn ensure_column(&mut self, name: &str, value: &str) -> bool {
        if self.has_column(name) {
            return false;
        }
        self.fill_column(name, value);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::from_rows(
            vec!["id".into(), "img_name".into(), "score".into()],
            vec![
                vec!["1".into(), "a.png".into(), "10".into()],
                vec!["2".into(), "b.png".into(), "20".into()],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_from_rows_rejects_ragged_row() {
        let err = Dataset::from_rows(
            vec!["a".into(), "b".into()],
            vec![vec!["1".into(), "2".into()], vec!["3".into()]],
        )
        .unwrap_err();
        assert_eq!(err, 1);
    }

    #[test]
    fn test_field_lookup_by_name() {
        let ds = sample();
        assert_eq!(ds.field(1, "img_name"), Some("b.png"));
        assert_eq!(ds.field(1, "missing"), None);
        assert_eq!(ds.field(5, "id"), None);
    }

    #[test]
    fn test_fill_column_appends_then_overwrites() {
        let mut ds = sample();
        ds.fill_column("edited", "False");
        assert_eq!(ds.headers().last().map(String::as_str), Some("edited"));
        assert_eq!(ds.field(0, "edited"), Some("False"));

        ds.set_flag(0, "edited", true);
        ds.fill_column("edited", "False");
        assert_eq!(ds.width(), 4);
        assert!(!ds.flag(0, "edited"));
    }

    #[test]
    fn test_ensure_column_keeps_existing_values() {
        let mut ds = sample();
        assert!(!ds.ensure_column("score", "0"));
        assert_eq!(ds.field(0, "score"), Some("10"));
        assert!(ds.ensure_column("viewed", "False"));
        assert_eq!(ds.field(1, "viewed"), Some("False"));
    }

    #[test]
    fn test_set_field_out_of_range_is_rejected() {
        let mut ds = sample();
        assert!(!ds.set_field(9, "score", "1"));
        assert!(!ds.set_field(0, "nope", "1"));
        assert!(ds.set_field(0, "score", "11"));
        assert_eq!(ds.field(0, "score"), Some("11"));
    }

    #[test]
    fn test_fields_pairs_headers_with_values() {
        let ds = sample();
        let pairs: Vec<_> = ds.fields(0).collect();
        assert_eq!(pairs, vec![("id", "1"), ("img_name", "a.png"), ("score", "10")]);
        assert_eq!(ds.fields(7).count(), 0);
    }
}

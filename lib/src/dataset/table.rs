use super::{is_missing, DatasetError};
use csv::ReaderBuilder;
use ndarray::{Array1, Array2};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Column-oriented table of optional string cells.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    columns: Vec<Vec<Option<String>>>,
    n_rows: usize,
}

impl Table {
    /// Read a CSV file with a header row.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_reader(BufReader::new(file))?;
        tracing::debug!(
            path = %path.display(),
            rows = table.n_rows(),
            cols = table.n_cols(),
            "read table"
        );
        Ok(table)
    }

    /// Read CSV data with a header row from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);

        let headers: Vec<String> = rdr
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        if headers.is_empty() || headers.iter().all(String::is_empty) {
            return Err(DatasetError::NoHeader);
        }

        let mut columns: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
        for result in rdr.records() {
            // Flexible mode is off, so every record has headers.len() fields.
            let record = result?;
            for (column, cell) in columns.iter_mut().zip(record.iter()) {
                column.push((!is_missing(cell)).then(|| cell.to_string()));
            }
        }

        Self::from_columns(headers.into_iter().zip(columns).collect())
    }

    /// Build a table from named columns of equal length.
    pub fn from_columns(named: Vec<(String, Vec<Option<String>>)>) -> Result<Self, DatasetError> {
        let n_rows = named.first().map_or(0, |(_, c)| c.len());
        let mut seen = HashSet::new();
        let mut headers = Vec::with_capacity(named.len());
        let mut columns = Vec::with_capacity(named.len());

        for (name, column) in named {
            if !seen.insert(name.clone()) {
                return Err(DatasetError::DuplicateColumn(name));
            }
            if column.len() != n_rows {
                return Err(DatasetError::RaggedColumn {
                    column: name,
                    expected: n_rows,
                    got: column.len(),
                });
            }
            headers.push(name);
            columns.push(column);
        }

        Ok(Self {
            headers,
            columns,
            n_rows,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.headers.len()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Raw cells of a column.
    pub fn column(&self, name: &str) -> Result<&[Option<String>], DatasetError> {
        self.position(name)
            .map(|idx| self.columns[idx].as_slice())
            .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))
    }

    /// A copy of the table without `name`.
    pub fn drop_column(&self, name: &str) -> Result<Table, DatasetError> {
        let idx = self
            .position(name)
            .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))?;
        let mut table = self.clone();
        table.headers.remove(idx);
        table.columns.remove(idx);
        Ok(table)
    }

    /// Parse a column as `f64`; missing cells become NaN.
    ///
    /// Surrounding whitespace is ignored when parsing, so a blank or padded
    /// missing marker is also NaN.
    pub fn numeric_column(&self, name: &str) -> Result<Array1<f64>, DatasetError> {
        self.column(name)?
            .iter()
            .enumerate()
            .map(|(row, cell)| match cell.as_deref().map(str::trim) {
                None => Ok(f64::NAN),
                Some(value) if is_missing(value) => Ok(f64::NAN),
                Some(value) => value.parse::<f64>().map_err(|_| DatasetError::ParseNumber {
                    column: name.to_string(),
                    row,
                    value: value.to_string(),
                }),
            })
            .collect()
    }

    /// Numeric matrix of the given columns, in the given order.
    pub fn numeric_matrix(&self, names: &[String]) -> Result<Array2<f64>, DatasetError> {
        let mut matrix = Array2::<f64>::zeros((self.n_rows, names.len()));
        for (j, name) in names.iter().enumerate() {
            let column = self.numeric_column(name)?;
            matrix.column_mut(j).assign(&column);
        }
        Ok(matrix)
    }

    /// Categorical matrix of the given columns, in the given order.
    pub fn categorical_matrix(
        &self,
        names: &[String],
    ) -> Result<Array2<Option<String>>, DatasetError> {
        let mut matrix = Array2::<Option<String>>::from_elem((self.n_rows, names.len()), None);
        for (j, name) in names.iter().enumerate() {
            for (cell, value) in matrix.column_mut(j).iter_mut().zip(self.column(name)?) {
                cell.clone_from(value);
            }
        }
        Ok(matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CSV: &str = "\
gender,lunch,reading_score,math_score
female,standard,72,70
male,,NA,55
female,free/reduced,90,
";

    fn table() -> Table {
        Table::from_reader(CSV.as_bytes()).unwrap()
    }

    #[test]
    fn test_table_from_reader() {
        let t = table();
        assert_eq!(t.n_rows(), 3);
        assert_eq!(t.n_cols(), 4);
        assert_eq!(t.headers()[2], "reading_score");
        assert!(t.has_column("lunch"));
        assert!(!t.has_column("writing_score"));
    }

    #[test]
    fn test_table_missing_markers() {
        let t = table();
        assert_eq!(t.column("lunch").unwrap()[1], None);
        assert_eq!(t.column("math_score").unwrap()[2], None);
    }

    #[test]
    fn test_table_numeric_column() {
        let scores = table().numeric_column("reading_score").unwrap();
        assert_eq!(scores[0], 72.0);
        assert!(scores[1].is_nan());
        assert_eq!(scores[2], 90.0);
    }

    #[test]
    fn test_table_keeps_cell_whitespace() {
        let t = Table::from_reader("gender,lunch\n male, NA\nmale,NA\n".as_bytes()).unwrap();
        let gender = t.column("gender").unwrap();
        assert_eq!(gender[0].as_deref(), Some(" male"));
        assert_eq!(gender[1].as_deref(), Some("male"));
        assert_eq!(t.column("lunch").unwrap()[0].as_deref(), Some(" NA"));
        assert_eq!(t.column("lunch").unwrap()[1], None);
    }

    #[test]
    fn test_table_numeric_column_trims_padding() {
        let t = Table::from_reader("score\n 72 \n   \n NA\n".as_bytes()).unwrap();
        let scores = t.numeric_column("score").unwrap();
        assert_eq!(scores[0], 72.0);
        assert!(scores[1].is_nan());
        assert!(scores[2].is_nan());
    }

    #[test]
    fn test_table_numeric_column_parse_error() {
        let result = table().numeric_column("gender");
        assert!(matches!(
            result,
            Err(DatasetError::ParseNumber { row: 0, .. })
        ));
    }

    #[test]
    fn test_table_matrices() {
        let t = table();
        let numeric = t
            .numeric_matrix(&["math_score".to_string(), "reading_score".to_string()])
            .unwrap();
        assert_eq!(numeric.dim(), (3, 2));
        assert_eq!(numeric[[0, 0]], 70.0);
        assert_eq!(numeric[[0, 1]], 72.0);

        let categorical = t
            .categorical_matrix(&["lunch".to_string(), "gender".to_string()])
            .unwrap();
        assert_eq!(categorical[[2, 0]].as_deref(), Some("free/reduced"));
        assert_eq!(categorical[[1, 1]].as_deref(), Some("male"));
    }

    #[test]
    fn test_table_missing_column() {
        let result = table().categorical_matrix(&["race_ethnicity".to_string()]);
        assert!(matches!(result, Err(DatasetError::MissingColumn(ref c)) if c == "race_ethnicity"));
    }

    #[test]
    fn test_table_drop_column() {
        let t = table();
        let dropped = t.drop_column("math_score").unwrap();
        assert_eq!(dropped.n_cols(), 3);
        assert!(!dropped.has_column("math_score"));
        assert_eq!(dropped.n_rows(), 3);
        // Original is untouched.
        assert!(t.has_column("math_score"));
    }

    #[test]
    fn test_table_from_columns_rejects_ragged() {
        let result = Table::from_columns(vec![
            ("a".to_string(), vec![None, None]),
            ("b".to_string(), vec![None]),
        ]);
        assert!(matches!(result, Err(DatasetError::RaggedColumn { .. })));
    }

    #[test]
    fn test_table_from_columns_rejects_duplicates() {
        let result = Table::from_columns(vec![
            ("a".to_string(), vec![None]),
            ("a".to_string(), vec![None]),
        ]);
        assert!(matches!(result, Err(DatasetError::DuplicateColumn(_))));
    }

    #[test]
    fn test_table_header_only() {
        let t = Table::from_reader("a,b\n".as_bytes()).unwrap();
        assert_eq!(t.n_rows(), 0);
        assert_eq!(t.numeric_matrix(&["a".to_string()]).unwrap().dim(), (0, 1));
    }

    #[test]
    fn test_table_from_csv_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CSV.as_bytes()).unwrap();

        let t = Table::from_csv_path(file.path()).unwrap();
        assert_eq!(t, table());
    }

    #[test]
    fn test_table_from_csv_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Table::from_csv_path(dir.path().join("absent.csv"));
        assert!(matches!(result, Err(DatasetError::Io { .. })));
    }
}

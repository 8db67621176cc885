use ndarray::Array2;
use scoreprep::dataset::Table;

const GENDER: [&str; 2] = ["female", "male"];
const RACE: [&str; 5] = ["group A", "group B", "group C", "group D", "group E"];
const EDUCATION: [&str; 6] = [
    "associate's degree",
    "bachelor's degree",
    "high school",
    "master's degree",
    "some college",
    "some high school",
];
const LUNCH: [&str; 2] = ["standard", "free/reduced"];
const PREP: [&str; 2] = ["none", "completed"];

/// Deterministic student table with `n` rows and roughly 5% missing cells.
///
/// # Example
///
/// ```no_run
/// use benchmarks::synthetic_students;
///
/// let table = synthetic_students(1_000);
/// assert_eq!(table.n_rows(), 1_000);
/// ```
pub fn synthetic_students(n: usize) -> Table {
    fn column<F: Fn(usize) -> Option<String>>(n: usize, f: F) -> Vec<Option<String>> {
        (0..n).map(f).collect()
    }
    let score = |i: usize, a: usize, b: usize| (b + (i * a) % 60).to_string();

    let columns = vec![
        (
            "gender".to_string(),
            column(n, |i| (i % 23 != 4).then(|| GENDER[i % 2].to_string())),
        ),
        (
            "race_ethnicity".to_string(),
            column(n, |i| Some(RACE[(i * 3) % 5].to_string())),
        ),
        (
            "parental_level_of_education".to_string(),
            column(n, |i| Some(EDUCATION[(i * 7) % 6].to_string())),
        ),
        (
            "lunch".to_string(),
            column(n, |i| (i % 19 != 2).then(|| LUNCH[(i / 3) % 2].to_string())),
        ),
        (
            "test_preparation_course".to_string(),
            column(n, |i| Some(PREP[(i / 2) % 2].to_string())),
        ),
        ("math_score".to_string(), column(n, |i| Some(score(i, 29, 30)))),
        (
            "reading_score".to_string(),
            column(n, |i| (i % 17 != 9).then(|| score(i, 37, 40))),
        ),
        ("writing_score".to_string(), column(n, |i| Some(score(i, 53, 35)))),
    ];

    // Columns are built with equal lengths and unique names.
    Table::from_columns(columns).unwrap_or_else(|e| panic!("synthetic table: {}", e))
}

/// `n x cols` matrix with every 13th cell missing.
pub fn numeric_matrix(n: usize, cols: usize) -> Array2<f64> {
    Array2::from_shape_fn((n, cols), |(i, j)| {
        if (i + j) % 13 == 0 {
            f64::NAN
        } else {
            ((i * 31 + j * 17) % 100) as f64
        }
    })
}

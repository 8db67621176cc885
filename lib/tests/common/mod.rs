#![allow(dead_code)]

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

pub const HEADER: &str = "gender,race_ethnicity,parental_level_of_education,lunch,test_preparation_course,math_score,reading_score,writing_score";

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

/// One-hot width of the categorical columns above.
pub const ONE_HOT_WIDTH: usize = 2 + 5 + 6 + 2 + 2;

pub fn reading_score(i: usize) -> Option<f64> {
    (i % 11 != 5).then(|| (40 + (i * 37) % 60) as f64)
}

pub fn math_score(i: usize) -> f64 {
    (30 + (i * 29) % 70) as f64
}

/// Deterministic student rows for indices in `rows`, with a few missing cells.
pub fn student_csv(rows: std::ops::Range<usize>) -> String {
    let mut csv = String::from(HEADER);
    csv.push('\n');
    for i in rows {
        let gender = if i % 17 == 3 { "NA" } else { GENDER[i % 2] };
        let lunch = if i % 13 == 7 { "" } else { LUNCH[(i / 3) % 2] };
        let reading = reading_score(i).map_or(String::new(), |v| v.to_string());
        writeln!(
            csv,
            "{},{},{},{},{},{},{},{}",
            gender,
            RACE[(i * 3) % 5],
            EDUCATION[(i * 7) % 6],
            lunch,
            PREP[(i / 2) % 2],
            math_score(i),
            reading,
            35 + (i * 53) % 65,
        )
        .unwrap();
    }
    csv
}

pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

//! Roster models - class groups and their students

use std::fmt;

use serde::{Deserialize, Serialize};

/// Roll number as delivered by the roster sheet.
///
/// Spreadsheet cells come back either as numbers or as text, and the value
/// is echoed back unchanged when a record is synced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StudentNumber {
    Int(i64),
    /// Non-integral numeric cell, kept as the exact JSON number
    Decimal(serde_json::Number),
    Text(String),
}

impl fmt::Display for StudentNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StudentNumber::Int(n) => write!(f, "{}", n),
            StudentNumber::Decimal(n) => write!(f, "{}", n),
            StudentNumber::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for StudentNumber {
    fn from(n: i64) -> Self {
        StudentNumber::Int(n)
    }
}

impl From<&str> for StudentNumber {
    fn from(s: &str) -> Self {
        StudentNumber::Text(s.to_string())
    }
}

/// A student inside a class group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub number: StudentNumber,
    pub name: String,
}

impl Student {
    /// Tile label shown in the student grid, e.g. `1 Kim`
    pub fn label(&self) -> String {
        format!("{} {}", self.number, self.name)
    }
}

/// A class with its students, replaced wholesale on each roster refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassGroup {
    pub id: String,
    pub name: String,
    pub students: Vec<Student>,
    /// Demo classes are never mirrored to the remote sheet
    #[serde(default)]
    pub demo: bool,
}

impl ClassGroup {
    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    pub fn find_student(&self, student_id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id == student_id)
    }

    /// Case-insensitive substring match on the display name
    pub fn matches_query(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }
}

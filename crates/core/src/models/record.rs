//! Activity record model

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ClassGroup, Student, StudentNumber};

/// Category tag stored with every record
pub const ACTIVITY_CATEGORY: &str = "활동";

/// One saved student activity note.
///
/// Student and class fields are denormalized snapshots taken at save time,
/// so a record stays readable after the roster changes or disconnects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    pub id: String,
    pub student_id: String,
    pub student_name: String,
    pub student_number: StudentNumber,
    pub class_id: String,
    pub class_name: String,
    #[serde(rename = "type")]
    pub category: String,
    pub content: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

impl ActivityRecord {
    pub fn new(student: &Student, class_id: String, class_name: String, content: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            student_id: student.id.clone(),
            student_name: student.name.clone(),
            student_number: student.number.clone(),
            class_id,
            class_name,
            category: ACTIVITY_CATEGORY.to_string(),
            content,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    pub fn for_class(student: &Student, class: &ClassGroup, content: String) -> Self {
        Self::new(student, class.id.clone(), class.name.clone(), content)
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Student snapshot used when reopening the record in the editor
    pub fn student(&self) -> Student {
        Student {
            id: self.student_id.clone(),
            number: self.student_number.clone(),
            name: self.student_name.clone(),
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.timestamp)
            .single()
            .unwrap_or_default()
    }

    pub fn format_time(&self) -> String {
        self.created_at()
            .with_timezone(&Local)
            .format("%H:%M")
            .to_string()
    }
}

//! Record archive view

use chrono::{Local, TimeZone};
use edulog_core::{DateGroup, LocalStorage};

use super::{Controller, View};

impl<S: LocalStorage + Clone> Controller<S> {
    /// Swap between the main view and the archive
    pub fn toggle_archive(&mut self) {
        self.view = match self.view {
            View::Main => View::Recent,
            View::Recent => View::Main,
        };
    }

    /// Archive groups by local calendar date
    pub fn archive(&self) -> Vec<DateGroup> {
        self.archive_in(&Local)
    }

    pub fn archive_in<Tz: TimeZone>(&self, tz: &Tz) -> Vec<DateGroup> {
        self.records.grouped(tz)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::FixedOffset;
    use edulog_core::{ActivityRecord, MemoryStorage, Student, StudentNumber};

    use super::*;
    use crate::viewmodel::test_support::controller;
    use crate::viewmodel::Overlay;

    fn record(ts: i64, content: &str) -> ActivityRecord {
        let student = Student {
            id: "1A_3".into(),
            number: StudentNumber::from("3"),
            name: "Park".into(),
        };
        ActivityRecord::new(&student, "1A".into(), "1학년 A반".into(), content.into())
            .with_timestamp(ts)
    }

    #[test]
    fn test_toggle_and_title() {
        let storage = Arc::new(MemoryStorage::new());
        let mut ctl = controller(&storage);

        ctl.toggle_archive();
        assert_eq!(ctl.view(), View::Recent);
        assert_eq!(ctl.title(), "기록 보관소");
        assert!(ctl.can_go_back());

        ctl.toggle_archive();
        assert_eq!(ctl.view(), View::Main);
    }

    #[test]
    fn test_archive_groups_and_reopens_record() {
        let storage = Arc::new(MemoryStorage::new());
        let mut ctl = controller(&storage);
        // 2024-03-05 and 2024-03-06, KST
        ctl.records.add(record(1_709_600_000_000, "older")).unwrap();
        ctl.records.add(record(1_709_690_000_000, "newer")).unwrap();
        ctl.toggle_archive();

        let kst = FixedOffset::east_opt(9 * 3600).unwrap();
        let groups = ctl.archive_in(&kst);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].label, "2024. 3. 6.");
        assert_eq!(groups[0].records[0].content, "newer");

        let id = groups[1].records[0].id.clone();
        ctl.open_record(&id);
        match ctl.overlay() {
            Overlay::Editor(editor) => {
                assert_eq!(editor.content, "older");
                assert_eq!(editor.class_name, "1학년 A반");
                assert_eq!(editor.student.label(), "3 Park");
            }
            other => panic!("expected editor, got {:?}", other),
        }
    }
}

//! Archive view grouping
//!
//! Partitions records by the calendar day they were written on.

use std::collections::BTreeMap;

use chrono::{NaiveDate, TimeZone};

use crate::models::ActivityRecord;

/// Records written on one calendar day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateGroup {
    pub date: NaiveDate,
    /// Korean short date, e.g. `2024. 3. 5.`
    pub label: String,
    /// In store order
    pub records: Vec<ActivityRecord>,
}

/// Group `records` by local date in `tz`, most recent date first
pub fn group_by_date<Tz: TimeZone>(records: &[ActivityRecord], tz: &Tz) -> Vec<DateGroup> {
    let mut days: BTreeMap<NaiveDate, Vec<ActivityRecord>> = BTreeMap::new();
    for record in records {
        let date = record.created_at().with_timezone(tz).date_naive();
        days.entry(date).or_default().push(record.clone());
    }

    days.into_iter()
        .rev()
        .map(|(date, records)| DateGroup {
            date,
            label: date.format("%Y. %-m. %-d.").to_string(),
            records,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Student, StudentNumber};
    use chrono::FixedOffset;

    fn at(ts: i64, content: &str) -> ActivityRecord {
        let student = Student {
            id: "s".into(),
            number: StudentNumber::Int(1),
            name: "Kim".into(),
        };
        ActivityRecord::new(&student, "1A".into(), "A".into(), content.into()).with_timestamp(ts)
    }

    fn kst() -> FixedOffset {
        FixedOffset::east_opt(9 * 3600).unwrap()
    }

    // 2024-03-05 00:30 KST == 2024-03-04 15:30 UTC
    const MAR5_EARLY: i64 = 1_709_566_200_000;
    // 2024-03-05 23:00 KST
    const MAR5_LATE: i64 = 1_709_647_200_000;
    // 2024-03-06 09:00 KST
    const MAR6: i64 = 1_709_683_200_000;

    #[test]
    fn test_same_day_grouped_regardless_of_order() {
        let records = vec![at(MAR5_EARLY, "a"), at(MAR6, "b"), at(MAR5_LATE, "c")];
        let groups = group_by_date(&records, &kst());

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].date, NaiveDate::from_ymd_opt(2024, 3, 6).unwrap());
        assert_eq!(groups[1].date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());

        let mar5: Vec<_> = groups[1].records.iter().map(|r| r.content.as_str()).collect();
        assert_eq!(mar5, vec!["a", "c"]);
    }

    #[test]
    fn test_day_boundary_follows_time_zone() {
        let records = vec![at(MAR5_EARLY, "a")];

        let local = group_by_date(&records, &kst());
        let utc = group_by_date(&records, &chrono::Utc);

        assert_eq!(local[0].label, "2024. 3. 5.");
        assert_eq!(utc[0].label, "2024. 3. 4.");
    }

    #[test]
    fn test_empty() {
        assert!(group_by_date(&[], &kst()).is_empty());
    }
}

use crate::db::log::ttlog_quiet;
use crate::db::store::LogStore;
use crate::errors::AppResult;
use chrono::NaiveDate;
use tracing::debug;

/// Literal the user must type to confirm a destructive operation.
pub const CONFIRM_WORD: &str = "reset";

/// True only for the exact confirmation literal (line ending ignored).
pub fn is_confirmed(input: &str) -> bool {
    input.trim_end_matches(['\r', '\n']) == CONFIRM_WORD
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteScope {
    /// Every record dated on the given day.
    Day(NaiveDate),
    All,
    Last,
}

impl DeleteScope {
    pub fn describe(&self) -> String {
        match self {
            DeleteScope::Day(d) => format!("all entries for {}", d),
            DeleteScope::All => "all entries".to_string(),
            DeleteScope::Last => "the last entry".to_string(),
        }
    }
}

pub struct DeleteLogic;

impl DeleteLogic {
    /// Remove the records selected by `scope`; returns how many went.
    ///
    /// Implemented as snapshot → filter → `replace_all`. A record appended
    /// by another process between the read and the rewrite would be lost.
    /// Lines that fail to parse are not carried over by a rewrite.
    pub fn apply(store: &LogStore, scope: DeleteScope) -> AppResult<usize> {
        let removed = match scope {
            DeleteScope::Day(day) => {
                let records = store.read_all()?;
                let total = records.len();
                let keep: Vec<_> = records.into_iter().filter(|r| r.date != day).collect();
                let removed = total - keep.len();

                // Nothing dated that day: leave the file alone
                if removed > 0 {
                    store.replace_all(&keep)?;
                }
                removed
            }
            DeleteScope::All => {
                let removed = store.read_all()?.len();
                if store.exists() {
                    store.reset()?;
                } else {
                    store.ensure()?;
                }
                removed
            }
            DeleteScope::Last => usize::from(store.delete_last()?.is_some()),
        };

        debug!(?scope, removed, "delete applied");
        if removed > 0 {
            ttlog_quiet(
                store.path(),
                "del",
                &scope.describe(),
                &format!("Deleted {} record(s)", removed),
            );
        }

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::Record;
    use chrono::NaiveTime;
    use std::fs;

    fn rec(date: &str, task: &str, minutes: i64) -> Record {
        let t = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        Record::new(
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            task,
            t,
            t,
            minutes,
        )
    }

    fn seeded() -> (tempfile::TempDir, LogStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = LogStore::new(dir.path().join("time_log.csv"));
        for r in [
            rec("2024-01-01", "Main", 30),
            rec("2024-01-02", "Main", 40),
            rec("2024-01-02", "Secondary", 15),
            rec("2024-01-03", "Main", 50),
        ] {
            store.append(&r).unwrap();
        }
        (dir, store)
    }

    #[test]
    fn confirmation_requires_exact_literal() {
        assert!(is_confirmed("reset"));
        assert!(is_confirmed("reset\n"));
        assert!(is_confirmed("reset\r\n"));
        assert!(!is_confirmed(""));
        assert!(!is_confirmed("RESET"));
        assert!(!is_confirmed("reset please"));
        assert!(!is_confirmed("y"));
    }

    #[test]
    fn delete_day_is_idempotent() {
        let (_dir, store) = seeded();
        let day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

        assert_eq!(DeleteLogic::apply(&store, DeleteScope::Day(day)).unwrap(), 2);
        let after_first = fs::read_to_string(store.path()).unwrap();

        assert_eq!(DeleteLogic::apply(&store, DeleteScope::Day(day)).unwrap(), 0);
        assert_eq!(fs::read_to_string(store.path()).unwrap(), after_first);

        let left: Vec<i64> = store
            .read_all()
            .unwrap()
            .iter()
            .map(|r| r.duration_minutes)
            .collect();
        assert_eq!(left, vec![30, 50]);
    }

    #[test]
    fn delete_all_leaves_an_empty_log() {
        let (_dir, store) = seeded();
        assert_eq!(DeleteLogic::apply(&store, DeleteScope::All).unwrap(), 4);
        assert!(store.exists());
        assert!(store.read_all().unwrap().is_empty());
        assert_eq!(DeleteLogic::apply(&store, DeleteScope::All).unwrap(), 0);
    }

    #[test]
    fn delete_last_removes_the_tail() {
        let (_dir, store) = seeded();
        assert_eq!(DeleteLogic::apply(&store, DeleteScope::Last).unwrap(), 1);
        let records = store.read_all().unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records.last().unwrap().duration_minutes, 15);
    }

    #[test]
    fn deletions_are_audited() {
        let (dir, store) = seeded();
        DeleteLogic::apply(&store, DeleteScope::Last).unwrap();
        let audit = fs::read_to_string(dir.path().join("time_log.audit.csv")).unwrap();
        assert!(audit.contains("del"));
        assert!(audit.contains("the last entry"));
    }
}

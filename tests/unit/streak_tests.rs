/// Streak ledger behaviour seen from outside the crate
use chrono::NaiveDate;
use morning_routine_mcp::*;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
}

/// Commit every day in order, using the last date as "today"
fn ledger_of(days: &[(&str, DayOutcome)]) -> StreakLedger {
    let today = days.last().map(|(d, _)| date(d)).unwrap_or_else(|| date("2024-01-01"));
    let mut ledger = StreakLedger::new();
    for (day, outcome) in days {
        ledger.commit_day(date(day), *outcome, today).expect("commit");
    }
    ledger
}

#[cfg(test)]
mod streak_unit_tests {
    use super::*;
    use DayOutcome::{Completed, Missed};

    #[test]
    fn test_consecutive_days_build_streak() {
        let ledger = ledger_of(&[
            ("2024-01-01", Completed),
            ("2024-01-02", Completed),
            ("2024-01-03", Completed),
        ]);
        assert_eq!(ledger.current_streak(), 3);
        assert_eq!(ledger.best_streak(), 3);
        assert_eq!(ledger.last_completed_date(), Some(date("2024-01-03")));
    }

    #[test]
    fn test_gap_breaks_streak() {
        let ledger = ledger_of(&[("2024-01-01", Completed), ("2024-01-03", Completed)]);
        assert_eq!(ledger.current_streak(), 1);
        assert_eq!(ledger.best_streak(), 1);
        assert_eq!(ledger.status_on(date("2024-01-02")), DayStatus::Unresolved);
    }

    #[test]
    fn test_miss_resets_but_best_survives() {
        let ledger = ledger_of(&[
            ("2024-01-01", Completed),
            ("2024-01-02", Completed),
            ("2024-01-03", Missed),
        ]);
        assert_eq!(ledger.current_streak(), 0);
        assert_eq!(ledger.best_streak(), 2);
        assert_eq!(ledger.last_completed_date(), Some(date("2024-01-02")));
    }

    #[test]
    fn test_best_streak_never_decreases() {
        let mut ledger = StreakLedger::new();
        let today = date("2024-01-31");
        let mut best = 0;
        let outcomes = [Completed, Completed, Missed, Completed, Missed, Completed, Completed, Completed];
        for (offset, outcome) in outcomes.iter().enumerate() {
            let day = date("2024-01-01") + chrono::Duration::days(offset as i64);
            let update = ledger.commit_day(day, *outcome, today).expect("commit");
            assert!(update.best_streak >= best);
            assert!(update.best_streak >= update.current_streak);
            best = update.best_streak;
        }
        assert_eq!(best, 3);
    }

    #[test]
    fn test_commit_is_idempotent() {
        let mut ledger = ledger_of(&[("2024-01-01", Completed)]);
        let again = ledger
            .commit_day(date("2024-01-01"), Completed, date("2024-01-01"))
            .expect("repeat commit");
        assert!(!again.changed);
        assert_eq!(again.current_streak, 1);
        assert_eq!(ledger.history().len(), 1);
    }

    #[test]
    fn test_conflicting_outcome_is_rejected() {
        let mut ledger = ledger_of(&[("2024-01-01", Completed)]);
        let before = ledger.clone();
        let err = ledger
            .commit_day(date("2024-01-01"), Missed, date("2024-01-01"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_future_commit_is_rejected() {
        let mut ledger = StreakLedger::new();
        let err = ledger
            .commit_day(date("2024-01-02"), Completed, date("2024-01-01"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(ledger.history().is_empty());
    }

    #[test]
    fn test_rollover_detection() {
        let ledger = ledger_of(&[("2024-01-01", Completed)]);
        assert!(!ledger.detect_rollover(date("2024-01-01")));
        assert!(ledger.detect_rollover(date("2024-01-02")));
        assert!(!StreakLedger::new().detect_rollover(date("2024-01-02")));
    }

    #[test]
    fn test_monthly_percentage_example() {
        let ledger = ledger_of(&[
            ("2024-03-01", Completed),
            ("2024-03-02", Completed),
            ("2024-03-03", Missed),
        ]);
        assert_eq!(ledger.monthly_completion_percentage(date("2024-03-03")), 67);
        // Over elapsed days the unresolved 4th and 5th count against it
        assert_eq!(ledger.elapsed_completion_percentage(date("2024-03-05")), 40);
        assert_eq!(StreakLedger::new().monthly_completion_percentage(date("2024-03-05")), 0);
    }

    #[test]
    fn test_recovery_replays_history() {
        let mut ledger = ledger_of(&[
            ("2024-01-01", Completed),
            ("2024-01-02", Missed),
            ("2024-01-03", Completed),
        ]);
        assert_eq!(ledger.current_streak(), 1);

        let update = ledger
            .recover_day(date("2024-01-02"), Entitlement::Active, date("2024-01-03"))
            .expect("recover");
        assert!(update.changed);
        assert_eq!(update.current_streak, 3);
        assert_eq!(update.best_streak, 3);
        assert_eq!(ledger.status_on(date("2024-01-02")), DayStatus::Completed);
    }

    #[test]
    fn test_recovery_requires_entitlement() {
        let mut ledger = ledger_of(&[("2024-01-01", Missed)]);
        let err = ledger
            .recover_day(date("2024-01-01"), Entitlement::Inactive, date("2024-01-01"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PreconditionDenied);
        assert_eq!(ledger.outcome_on(date("2024-01-01")), Some(Missed));
    }

    #[test]
    fn test_calendar_padding_starts_on_sunday() {
        let ledger = ledger_of(&[("2024-03-01", Completed)]);
        let view = ledger.calendar_view(date("2024-03-15"));
        // 2024-03-01 is a Friday
        assert_eq!(view.padding(), 5);
        assert_eq!(view.cells.len(), 5 + 31);
        assert_eq!(view.status_of_day(1), Some(DayStatus::Completed));
        assert_eq!(view.status_of_day(2), Some(DayStatus::Unresolved));
        assert_eq!(view.status_of_day(32), None);
    }
}

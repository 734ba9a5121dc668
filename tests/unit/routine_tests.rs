/// Checklist and session behaviour seen from outside the crate
use chrono::NaiveDate;
use morning_routine_mcp::*;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
}

fn tick_all(session: &mut RoutineSession<'_>) {
    let ids: Vec<TaskId> = session.state().routine.tasks().iter().map(|t| t.id.clone()).collect();
    for id in ids {
        session.toggle_task(&id);
    }
}

#[cfg(test)]
mod routine_unit_tests {
    use super::*;

    #[test]
    fn test_default_routine() {
        let routine = RoutineState::default();
        let titles: Vec<&str> = routine.tasks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, DEFAULT_TASK_TITLES.to_vec());
        assert_eq!(routine.tasks()[4].order, 5);
        assert!(!routine.is_complete());
    }

    #[test]
    fn test_empty_routine_rejected_and_previous_kept() {
        let mut routine = RoutineState::default();
        let before = routine.clone();

        let err = routine.replace_tasks(Vec::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(routine, before);
    }

    #[test]
    fn test_invalid_title_rejected_and_previous_kept() {
        let mut routine = RoutineState::default();
        let before = routine.clone();

        let drafts = vec![TaskDraft::new("Stretch"), TaskDraft::new("   ")];
        assert!(routine.replace_tasks(drafts).is_err());
        assert_eq!(routine, before);

        let too_long = "x".repeat(MAX_TITLE_LEN + 1);
        assert!(routine.replace_tasks(vec![TaskDraft::new(too_long)]).is_err());
        assert_eq!(routine, before);
    }

    #[test]
    fn test_replace_resets_completion_and_order() {
        let mut routine = RoutineState::default();
        let kept = routine.tasks()[3].id.clone();
        routine.toggle_task(&kept);

        routine
            .replace_tasks(vec![TaskDraft::existing(kept.clone(), "Move body"), TaskDraft::new("Read")])
            .expect("replace");

        assert_eq!(routine.len(), 2);
        assert_eq!(routine.tasks()[0].id, kept);
        assert_eq!(routine.tasks()[0].order, 1);
        assert_eq!(routine.tasks()[1].order, 2);
        assert_eq!(routine.completed_count(), 0);
    }

    #[test]
    fn test_toggle_unknown_id_is_noop() {
        let mut routine = RoutineState::default();
        let before = routine.clone();
        assert!(!routine.toggle_task(&TaskId::new()));
        assert_eq!(routine, before);
    }

    #[test]
    fn test_reset_day_is_idempotent() {
        let mut routine = RoutineState::default();
        let first = routine.tasks()[0].id.clone();
        routine.toggle_task(&first);

        routine.reset_day();
        let once = routine.clone();
        routine.reset_day();
        assert_eq!(routine, once);
        assert_eq!(routine.completed_count(), 0);
    }

    #[test]
    fn test_unresolved_yesterday_stays_unresolved() {
        let mut state = AppState::default();
        {
            let mut session = RoutineSession::open(&mut state, date("2024-01-14"));
            tick_all(&mut session);
            session.complete_day().expect("complete");
        }
        {
            // Ticked a few on the 15th but never completed
            let mut session = RoutineSession::open(&mut state, date("2024-01-15"));
            let first = session.state().routine.tasks()[0].id.clone();
            session.toggle_task(&first);
        }

        let session = RoutineSession::open(&mut state, date("2024-01-16"));
        assert!(session.rolled_over());
        assert_eq!(session.state().routine.completed_count(), 0);
        assert_eq!(session.state().ledger.status_on(date("2024-01-15")), DayStatus::Unresolved);
        assert_eq!(session.summary().current_streak, 0);
        assert_eq!(session.summary().best_streak, 1);
    }

    #[test]
    fn test_state_survives_json_round_trip() {
        let mut state = AppState::default();
        {
            let mut session = RoutineSession::open(&mut state, date("2024-01-15"));
            tick_all(&mut session);
            session.complete_day().expect("complete");
            session.miss_day(date("2024-01-10")).expect("miss");
        }

        let json = serde_json::to_string(&state).expect("serialize");
        let restored: AppState = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored, state);
    }
}

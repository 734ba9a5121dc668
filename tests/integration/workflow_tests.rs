/// Tool workflows against an on-disk database across several days
use chrono::NaiveDate;
use morning_routine_mcp::tools::*;
use morning_routine_mcp::*;
use tempfile::NamedTempFile;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
}

fn win_morning(ctx: &ToolContext<'_, SqliteStorage>) -> CompleteDayResponse {
    let tasks = list_tasks(ctx, ListTasksParams::default()).expect("list").tasks;
    for task in tasks {
        toggle_task(ctx, ToggleTaskParams { task_id: task.task_id }).expect("toggle");
    }
    complete_day(ctx, &LogNotifier, CompleteDayParams::default()).expect("complete")
}

#[cfg(test)]
mod workflow_integration_tests {
    use super::*;

    #[tokio::test]
    async fn test_server_creation() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let server = MorningRoutineServer::new(temp_file.path().to_path_buf(), "default").await;
        assert!(server.is_ok());
        assert_eq!(server.expect("server").profile(), "default");
    }

    #[tokio::test]
    async fn test_week_of_mornings_persists() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let db_path = temp_file.path().to_path_buf();

        let mut clock = FixedClock::new(date("2024-03-01"));
        for expected in 1..=3 {
            let server = MorningRoutineServer::new(db_path.clone(), "default")
                .await
                .expect("server")
                .with_clock(clock);
            let response = win_morning(&server.context());
            assert_eq!(response.current_streak, expected);
            clock.advance(1);
        }

        // Skip the 4th, then record it as missed on the 5th
        clock.advance(1);
        let server = MorningRoutineServer::new(db_path.clone(), "default")
            .await
            .expect("server")
            .with_clock(clock);
        let ctx = server.context();
        let missed = miss_day(&ctx, MissDayParams::default()).expect("miss");
        assert_eq!(missed.date, "2024-03-04");
        assert_eq!(missed.current_streak, 0);

        let stats = get_stats(&ctx, StatsParams::default()).expect("stats");
        assert_eq!(stats.stats.best_streak, 3);
        assert_eq!(stats.stats.monthly_percentage, 75);
        assert_eq!(stats.stats.elapsed_percentage, 60);

        // Recover the missed day: the run of four is rebuilt
        let recovered = recover_day(
            &ctx,
            RecoverDayParams { date: "2024-03-04".to_string(), entitled: true },
        )
        .expect("recover");
        assert_eq!(recovered.current_streak, 4);
        assert_eq!(recovered.best_streak, 4);

        // Second recovery this month is over quota
        miss_day(&ctx, MissDayParams { date: Some("2024-03-05".to_string()) }).expect("miss today");
        let denied = recover_day(
            &ctx,
            RecoverDayParams { date: "2024-03-05".to_string(), entitled: true },
        );
        assert!(matches!(
            denied,
            Err(ServerError::Domain(DomainError::PreconditionDenied { .. }))
        ));

        // Reopen from disk and compare
        let storage = SqliteStorage::new(db_path).expect("reopen");
        let state = storage.load_state("default").expect("load");
        assert_eq!(state.ledger.best_streak(), 4);
        assert_eq!(state.ledger.status_on(date("2024-03-04")), DayStatus::Completed);
        assert_eq!(state.ledger.status_on(date("2024-03-05")), DayStatus::Missed);
        assert_eq!(state.ledger.recoveries().len(), 1);
    }

    #[tokio::test]
    async fn test_ticks_survive_restart_but_not_midnight() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let db_path = temp_file.path().to_path_buf();
        let clock = FixedClock::new(date("2024-01-15"));

        let first_task = {
            let server = MorningRoutineServer::new(db_path.clone(), "default")
                .await
                .expect("server")
                .with_clock(clock);
            let ctx = server.context();
            let task = list_tasks(&ctx, ListTasksParams::default()).expect("list").tasks[0].task_id.clone();
            toggle_task(&ctx, ToggleTaskParams { task_id: task.clone() }).expect("toggle");
            task
        };

        let server = MorningRoutineServer::new(db_path.clone(), "default")
            .await
            .expect("server")
            .with_clock(clock);
        let listed = list_tasks(&server.context(), ListTasksParams::default()).expect("list");
        assert_eq!(listed.done, 1);
        assert_eq!(listed.tasks[0].task_id, first_task);

        let mut tomorrow = clock;
        tomorrow.advance(1);
        let server = server.with_clock(tomorrow);
        let listed = list_tasks(&server.context(), ListTasksParams::default()).expect("list");
        assert_eq!(listed.done, 0);
        assert_eq!(listed.tasks[0].task_id, first_task);
    }

    #[tokio::test]
    async fn test_profiles_are_independent() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let db_path = temp_file.path().to_path_buf();
        let clock = FixedClock::new(date("2024-01-15"));

        let alice = MorningRoutineServer::new(db_path.clone(), "alice")
            .await
            .expect("server")
            .with_clock(clock);
        win_morning(&alice.context());

        let bob = MorningRoutineServer::new(db_path, "bob")
            .await
            .expect("server")
            .with_clock(clock);
        let stats = get_stats(&bob.context(), StatsParams::default()).expect("stats");
        assert_eq!(stats.stats.total_completions, 0);

        let mut profiles = bob.storage().profiles().expect("profiles");
        profiles.sort();
        assert_eq!(profiles, vec!["alice".to_string(), "bob".to_string()]);
    }

    #[test]
    fn test_storage_interface() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let storage = SqliteStorage::new(temp_file.path().to_path_buf())
            .expect("Failed to create storage");

        let _: &dyn StateStore = &storage;
        assert!(!storage.has_state("default").expect("has_state"));
    }
}

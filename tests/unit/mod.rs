/// Unit tests for the routine and streak model, through the public API
mod routine_tests;
mod streak_tests;

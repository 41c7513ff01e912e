//! Helpers for setting up throwaway SQLite databases in integration tests.
pub mod prepare_env;
pub mod seed;

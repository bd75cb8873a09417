
/// Postgres connection tests (skipped without a reachable database)
pub mod db_tests;

/// Entity round trips and relation queries against Postgres
pub mod crud_tests;

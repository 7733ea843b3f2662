//! Shared configuration of the Eventmi system tests
//!
//! The tests in `tests/` drive the HTTP interface of a running Eventmi server and cross-check the
//! results directly in the server's PostgreSQL database. Both are configured through environment
//! variables (a `.env` file in the working directory is loaded, as well).

pub mod config;

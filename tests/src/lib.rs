//! # Voteboard Test Suite
//!
//! Cross-crate suites that exercise the domain services and the HTTP
//! gateway together:
//!
//! - `integration::voting_flow` - full admin + voting scenarios
//! - `integration::concurrency` - the no-lost-updates and
//!   exactly-one-duplicate-winner guarantees under contention
//! - `integration::persistence` - RocksDB reload behavior
//! - `integration::http_api` - end-to-end HTTP surface against a bound
//!   listener

//! # apismoke
//!
//! A small smoke-test harness for a remote user-management REST API. Six
//! fixed checks (login, failed login, user lookup, missing-user lookup, user
//! creation, user deletion) run once each, in order, fully independently.
//! Each check writes exactly one row to a CSV report; exceptions additionally
//! append a line to a plain-text error log.
//!
//! ```text
//! +-------------------+     +-------------------+     +-------------------+
//! | config + fixtures | --> | runner            | --> | report (csv)      |
//! | apismoke.toml     |     | check table x6    |     | error log (txt)   |
//! | test_data.json    |     | sequential        |     | append-only       |
//! +-------------------+     +-------------------+     +-------------------+
//!                                    |
//!                                    v
//!                           +-------------------+
//!                           | http client       |
//!                           | reqwest + timeout |
//!                           +-------------------+
//! ```

pub mod check;
pub mod config;
pub mod error;
pub mod http;
pub mod report;
pub mod runner;

pub use check::{Check, Outcome, Status};
pub use config::{FixtureSet, HarnessConfig};
pub use error::{Error, Result};
pub use report::{ErrorLog, Report};
pub use runner::Runner;

// Test Helper Modules
//
// In-memory stand-ins for the report data source and the identity store, so
// dispatch and HTTP tests run without MySQL.
//
// Usage (from a test target):
//   #[path = "../helpers/mod.rs"]
//   mod helpers;
//   use helpers::*;

#![allow(dead_code)]

pub mod in_memory_repository;
pub mod test_identity;

pub use in_memory_repository::*;
pub use test_identity::*;

use chrono::NaiveDate;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

//! Core types and utilities for apiprobe.
//!
//! This crate provides the pieces every apiprobe run is built from:
//!
//! - **Categories**: `Category` maps a fixture group to its REST endpoint
//! - **Fixtures**: `TestCase`, `Fixture`, `FixtureSet` and the loader
//! - **Requests**: `RequestPlan` describes the single HTTP call a case makes
//! - **Comparison**: `normalize_body`, `ResponseBody`, `IgnorePolicy`, `compare`, `FieldDiff`
//! - **Reports**: `CaseOutcome`, `CategoryReport`, `RunReport`
//!
//! # Fixture layout
//!
//! Each category reads two JSON objects keyed by test name:
//!
//! - `{payloads_dir}/{category}_testcases.json` holds request payloads
//! - `{responses_dir}/{category}_responses.json` holds expected responses

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod category;
pub mod compare;
pub mod error;
pub mod fixture;
pub mod report;
pub mod request;

pub use category::Category;
pub use compare::{compare, normalize_body, Comparison, FieldDiff, IgnorePolicy, ResponseBody};
pub use error::{CoreError, Result};
pub use fixture::{load_category, parse_fixtures, Fixture, FixtureSet, TestCase};
pub use report::{CaseOutcome, CategoryReport, RunReport, Verdict};
pub use request::{plan_request, HttpMethod, RequestPlan};

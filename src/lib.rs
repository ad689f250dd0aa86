//! Contract tests for the classified-ad listing service.
//!
//! Builds valid and deliberately broken ad payloads, sends them to the
//! service, and checks every answer against the documented contract:
//! status codes, the create-response envelope, and the shape of lookups by
//! id and by seller.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod identity;
pub mod payload;
pub mod testing;

pub use config::HarnessConfig;
pub use error::{ContractViolation, HarnessError};
pub use testing::{RunReport, Scenario, ScenarioRunner};

//! # Contract Scenarios
//!
//! Scenario definitions, the oracle that checks responses against the ad
//! service contract, the create-then-lookup fixture, and a sequential runner
//! that collects per-scenario outcomes into a [`RunReport`].

pub mod fixture;
pub mod oracle;
pub mod runner;
pub mod scenario;

use std::fmt::Write as _;

use serde::Serialize;

pub use fixture::CreatedAd;
pub use oracle::{AdRecord, SUCCESS_MARKER, extract_ad_id};
pub use runner::ScenarioRunner;
pub use scenario::Scenario;

/// Progress of one scenario. A scenario that stops early keeps the last
/// state it reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioState {
    RequestBuilt,
    Sent,
    ResponseReceived,
    Asserted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Passed,
    /// The service answered but broke the contract.
    Failed,
    /// The scenario could not complete (transport, bad URL, or the service
    /// state it relies on was missing).
    Errored,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    pub scenario: String,
    pub state: ScenarioState,
    pub verdict: Verdict,
    pub failure: Option<String>,
    pub duration_ms: u128,
}

impl ScenarioOutcome {
    pub fn passed(&self) -> bool {
        self.verdict == Verdict::Passed
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub base_url: String,
    pub seed: u64,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u128,
    pub outcomes: Vec<ScenarioOutcome>,
}

impl RunReport {
    pub fn record(&mut self, outcome: ScenarioOutcome) {
        self.total += 1;
        if outcome.passed() {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
        self.outcomes.push(outcome);
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    pub fn outcome(&self, scenario: &str) -> Option<&ScenarioOutcome> {
        self.outcomes.iter().find(|o| o.scenario == scenario)
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} scenarios against {}: {} passed, {} failed (seed {}, {} ms)",
            self.total, self.base_url, self.passed, self.failed, self.seed, self.duration_ms
        );
        for outcome in &self.outcomes {
            let label = match outcome.verdict {
                Verdict::Passed => "PASS",
                Verdict::Failed => "FAIL",
                Verdict::Errored => "ERROR",
            };
            let _ = write!(out, "  {label} {} ({} ms)", outcome.scenario, outcome.duration_ms);
            if let Some(failure) = &outcome.failure {
                let _ = write!(out, " at {:?}: {failure}", outcome.state);
            }
            out.push('\n');
        }
        out
    }
}

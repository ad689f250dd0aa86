//! Sequential scenario execution.
//!
//! Scenarios run one at a time and share nothing but the seller-id
//! generator; a failing scenario is recorded and the run moves on.

use std::time::Instant;

use tracing::{info, warn};

use crate::config::HarnessConfig;
use crate::error::{ContractViolation, HarnessError};
use crate::http::{ApiClient, Endpoint, HttpResponse, RequestInput};
use crate::identity::{SellerId, SellerIdGenerator};
use crate::payload::PayloadBuilder;

use super::fixture::CreatedAd;
use super::oracle;
use super::scenario::{MALFORMED_AD_ID, MALFORMED_SELLER_ID, Scenario};
use super::{RunReport, ScenarioOutcome, ScenarioState, Verdict};

/// Tracks how far a scenario got through its request/response cycle.
struct Attempt<'a> {
    client: &'a ApiClient,
    state: ScenarioState,
}

impl<'a> Attempt<'a> {
    fn new(client: &'a ApiClient) -> Self {
        Self {
            client,
            state: ScenarioState::RequestBuilt,
        }
    }

    async fn exchange(&mut self, request: RequestInput) -> Result<HttpResponse, HarnessError> {
        self.state = ScenarioState::RequestBuilt;
        let url = self.client.url_for(&request)?;
        self.state = ScenarioState::Sent;
        let response = self.client.send_to(url, request).await?;
        self.state = ScenarioState::ResponseReceived;
        Ok(response)
    }

    async fn create_ad(&mut self, seller_id: SellerId) -> Result<CreatedAd, HarnessError> {
        let response = self.exchange(CreatedAd::request(seller_id)).await?;
        CreatedAd::from_response(seller_id, &response)
    }
}

pub struct ScenarioRunner {
    client: ApiClient,
    ids: SellerIdGenerator,
}

impl ScenarioRunner {
    pub fn new(config: &HarnessConfig) -> Result<Self, HarnessError> {
        Ok(Self {
            client: ApiClient::new(config)?,
            ids: SellerIdGenerator::new(config.seed),
        })
    }

    pub fn seed(&self) -> u64 {
        self.ids.seed()
    }

    pub async fn run_all(&mut self, scenarios: &[Scenario]) -> RunReport {
        let started = Instant::now();
        let mut report = RunReport {
            base_url: self.client.base_url().to_string(),
            seed: self.seed(),
            ..RunReport::default()
        };
        for scenario in scenarios {
            let outcome = self.run(*scenario).await;
            report.record(outcome);
        }
        report.duration_ms = started.elapsed().as_millis();
        info!(
            total = report.total,
            passed = report.passed,
            failed = report.failed,
            seed = report.seed,
            "run finished"
        );
        report
    }

    pub async fn run(&mut self, scenario: Scenario) -> ScenarioOutcome {
        let name = scenario.name();
        info!(scenario = %name, "scenario started");

        let started = Instant::now();
        let client = self.client.clone();
        let mut attempt = Attempt::new(&client);
        let result = self.execute(scenario, &mut attempt).await;
        let duration_ms = started.elapsed().as_millis();

        let (verdict, failure) = match result {
            Ok(()) => {
                attempt.state = ScenarioState::Asserted;
                (Verdict::Passed, None)
            }
            // An undecodable body is a body-shape mismatch, not a harness fault.
            Err(err @ (HarnessError::Contract(_) | HarnessError::Decode { .. })) => {
                attempt.state = ScenarioState::Asserted;
                (Verdict::Failed, Some(err.to_string()))
            }
            Err(other) => (Verdict::Errored, Some(other.to_string())),
        };

        match &failure {
            None => info!(scenario = %name, duration_ms = duration_ms as u64, "scenario passed"),
            Some(reason) => {
                warn!(scenario = %name, state = ?attempt.state, %reason, "scenario failed")
            }
        }

        ScenarioOutcome {
            scenario: name,
            state: attempt.state,
            verdict,
            failure,
            duration_ms,
        }
    }

    async fn execute(
        &mut self,
        scenario: Scenario,
        attempt: &mut Attempt<'_>,
    ) -> Result<(), HarnessError> {
        match scenario {
            Scenario::CreateValid => {
                attempt.create_ad(self.ids.next_id()).await?;
            }
            Scenario::CreateInvalid(case) => {
                let body = PayloadBuilder::new(self.ids.next_id())
                    .override_with(&case.corruption())
                    .build();
                let response = attempt
                    .exchange(RequestInput::post_json(Endpoint::CreateItem, body))
                    .await?;
                oracle::expect_status(&response, 400)?;
            }
            Scenario::GetById => {
                let ad = attempt.create_ad(self.ids.next_id()).await?;
                let request = RequestInput::get(Endpoint::ItemById(ad.id.clone()));
                let first = oracle::expect_ads(&attempt.exchange(request.clone()).await?)?;
                let record = oracle::expect_single(&first)?;
                oracle::expect_field("id", ad.id.as_str(), record.id.as_str())?;
                oracle::expect_field("name", ad.payload.name.as_str(), record.name.as_str())?;

                let second = oracle::expect_ads(&attempt.exchange(request).await?)?;
                if second != first {
                    return Err(ContractViolation::new(
                        "repeated GET to return the same ad",
                        format!("{} ads on the second read", second.len()),
                    )
                    .into());
                }
            }
            Scenario::GetByIdMalformed => {
                let request = RequestInput::get(Endpoint::ItemById(MALFORMED_AD_ID.to_string()));
                oracle::expect_status(&attempt.exchange(request).await?, 404)?;
            }
            Scenario::GetByIdMissing => {
                let request = RequestInput::get(Endpoint::ItemById(String::new()));
                oracle::expect_status(&attempt.exchange(request).await?, 404)?;
            }
            Scenario::GetBySellerEmpty => {
                let seller_id = self.ids.next_id();
                let request = RequestInput::get(Endpoint::ItemsBySeller(seller_id.to_string()));
                let records = oracle::expect_ads(&attempt.exchange(request).await?)?;
                oracle::expect_empty(&records)?;
            }
            Scenario::GetBySellerWithAd => {
                let seller_id = self.ids.next_id();
                let request = RequestInput::get(Endpoint::ItemsBySeller(seller_id.to_string()));
                let existing = oracle::expect_ads(&attempt.exchange(request).await?)?;
                if !existing.is_empty() {
                    // Ads are never deleted, so a replayed seed finds its own earlier ads.
                    return Err(HarnessError::Precondition(format!(
                        "seller id {seller_id} not fresh ({} ads already), \
                         seed replayed against persisted data",
                        existing.len()
                    )));
                }
                let ad = attempt.create_ad(seller_id).await?;
                let request =
                    RequestInput::get(Endpoint::ItemsBySeller(ad.seller_id.to_string()));
                let records = oracle::expect_ads(&attempt.exchange(request).await?)?;
                let record = oracle::expect_single(&records)?;
                oracle::expect_field("id", ad.id.as_str(), record.id.as_str())?;
                oracle::expect_field(
                    "sellerId",
                    i64::from(ad.seller_id.value()),
                    record.seller_id,
                )?;
            }
            Scenario::GetBySellerMalformed => {
                let request =
                    RequestInput::get(Endpoint::ItemsBySeller(MALFORMED_SELLER_ID.to_string()));
                oracle::expect_status(&attempt.exchange(request).await?, 404)?;
            }
        }
        Ok(())
    }
}

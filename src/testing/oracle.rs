//! Response checks for the ad service contract.
//!
//! Each check either returns the piece of the response later steps need
//! (a new ad id, the decoded ads) or a [`ContractViolation`] describing the
//! mismatch.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ContractViolation, HarnessError};
use crate::http::HttpResponse;

/// Text the service puts in front of the new ad id after a successful create.
pub const SUCCESS_MARKER: &str = "Сохранили объявление - ";

#[derive(Debug, Clone, Deserialize)]
struct CreateEnvelope {
    status: String,
}

/// An ad as returned by the lookup endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdRecord {
    pub id: String,
    pub name: String,
    pub seller_id: i64,
    /// Everything else the service returns (price, statistics, createdAt).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub fn expect_status(response: &HttpResponse, expected: u16) -> Result<(), ContractViolation> {
    if response.status == expected {
        return Ok(());
    }
    Err(ContractViolation::new(
        format!("HTTP {expected}"),
        format!(
            "HTTP {} ({:?}) with body {}",
            response.status_line(),
            response.outcome(),
            response.body
        ),
    ))
}

/// Strip the success marker from a create status and return the bare id.
pub fn extract_ad_id(status: &str) -> Result<String, ContractViolation> {
    if !status.contains(SUCCESS_MARKER) {
        return Err(ContractViolation::new(
            format!("status containing `{SUCCESS_MARKER}`"),
            format!("`{status}`"),
        ));
    }
    let id = status.replacen(SUCCESS_MARKER, "", 1).trim().to_string();
    if id.is_empty() {
        return Err(ContractViolation::new(
            "an ad id after the success marker",
            format!("`{status}`"),
        ));
    }
    Ok(id)
}

/// 200 with `{"status": "<marker><id>"}`; yields the id.
pub fn expect_created(response: &HttpResponse) -> Result<String, HarnessError> {
    expect_status(response, 200)?;
    let envelope: CreateEnvelope = response.json()?;
    Ok(extract_ad_id(&envelope.status)?)
}

/// 200 with a JSON array of ads.
pub fn expect_ads(response: &HttpResponse) -> Result<Vec<AdRecord>, HarnessError> {
    expect_status(response, 200)?;
    response.json()
}

pub fn expect_empty(records: &[AdRecord]) -> Result<(), ContractViolation> {
    if records.is_empty() {
        return Ok(());
    }
    Err(ContractViolation::new(
        "an empty ad list",
        format!("{} ads", records.len()),
    ))
}

pub fn expect_single(records: &[AdRecord]) -> Result<&AdRecord, ContractViolation> {
    match records {
        [only] => Ok(only),
        _ => Err(ContractViolation::new(
            "exactly one ad",
            format!("{} ads", records.len()),
        )),
    }
}

pub fn expect_field<T>(field: &str, expected: T, actual: T) -> Result<(), ContractViolation>
where
    T: PartialEq + Display,
{
    if expected == actual {
        return Ok(());
    }
    Err(ContractViolation::new(
        format!("{field} = {expected}"),
        format!("{field} = {actual}"),
    ))
}

use serde_json::Value;

use super::method::HttpMethod;

/// Service routes, relative to the configured base URL.
///
/// Path segments are inserted verbatim: malformed and empty ids are part of
/// what the harness sends on purpose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    CreateItem,
    ItemById(String),
    ItemsBySeller(String),
}

impl Endpoint {
    pub fn path(&self) -> String {
        match self {
            Endpoint::CreateItem => "/item".to_string(),
            Endpoint::ItemById(id) => format!("/item/{id}"),
            Endpoint::ItemsBySeller(seller_id) => format!("/{seller_id}/item"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RequestInput {
    pub method: HttpMethod,
    pub endpoint: Endpoint,
    pub body: Option<Value>,
}

impl RequestInput {
    pub fn get(endpoint: Endpoint) -> Self {
        Self {
            method: HttpMethod::Get,
            endpoint,
            body: None,
        }
    }

    pub fn post_json(endpoint: Endpoint, body: Value) -> Self {
        Self {
            method: HttpMethod::Post,
            endpoint,
            body: Some(body),
        }
    }
}

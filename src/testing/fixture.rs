//! Create-then-lookup fixture: posts a valid ad and hands its id and seller
//! id to scenarios that read it back.

use tracing::debug;

use crate::error::HarnessError;
use crate::http::{ApiClient, Endpoint, HttpResponse, RequestInput};
use crate::identity::SellerId;
use crate::payload::{AdPayload, PayloadBuilder};

use super::oracle;

#[derive(Debug, Clone)]
pub struct CreatedAd {
    pub id: String,
    pub seller_id: SellerId,
    pub payload: AdPayload,
}

impl CreatedAd {
    /// The POST request this fixture issues for `seller_id`.
    pub fn request(seller_id: SellerId) -> RequestInput {
        RequestInput::post_json(Endpoint::CreateItem, PayloadBuilder::new(seller_id).build())
    }

    /// Read the new id from a create response.
    pub fn from_response(
        seller_id: SellerId,
        response: &HttpResponse,
    ) -> Result<Self, HarnessError> {
        let id = oracle::expect_created(response)?;
        debug!(ad_id = %id, seller_id = %seller_id, "ad created");
        Ok(Self {
            id,
            seller_id,
            payload: AdPayload::new(seller_id),
        })
    }

    pub async fn provision(client: &ApiClient, seller_id: SellerId) -> Result<Self, HarnessError> {
        let response = client.send(Self::request(seller_id)).await?;
        Self::from_response(seller_id, &response)
    }
}

//! # Ad Payloads
//!
//! The valid ad body sent to `POST /item` and a builder that overrides it
//! field by field to produce deliberately malformed bodies.
//!
//! Overrides hold raw JSON values so a field can be replaced with the wrong
//! type. Nested `statistics` overrides merge into the defaults instead of
//! replacing the whole object.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::identity::SellerId;

pub const DEFAULT_NAME: &str = "Телефон";
pub const DEFAULT_PRICE: i64 = 85566;
pub const DEFAULT_CONTACTS: i64 = 32;
pub const DEFAULT_LIKE: i64 = 35;
pub const DEFAULT_VIEW_COUNT: i64 = 14;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub contacts: i64,
    pub like: i64,
    pub view_count: i64,
}

impl Default for Statistics {
    fn default() -> Self {
        Self {
            contacts: DEFAULT_CONTACTS,
            like: DEFAULT_LIKE,
            view_count: DEFAULT_VIEW_COUNT,
        }
    }
}

/// A well-formed ad as the service expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdPayload {
    pub name: String,
    pub price: i64,
    pub seller_id: SellerId,
    pub statistics: Statistics,
}

impl AdPayload {
    pub fn new(seller_id: SellerId) -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            price: DEFAULT_PRICE,
            seller_id,
            statistics: Statistics::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatisticsOverride {
    pub contacts: Option<Value>,
    pub like: Option<Value>,
    pub view_count: Option<Value>,
}

impl StatisticsOverride {
    fn merge(&mut self, other: &StatisticsOverride) {
        merge_field(&mut self.contacts, &other.contacts);
        merge_field(&mut self.like, &other.like);
        merge_field(&mut self.view_count, &other.view_count);
    }
}

/// Partial replacement for an [`AdPayload`]. `None` keeps the default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PayloadOverride {
    pub name: Option<Value>,
    pub price: Option<Value>,
    pub seller_id: Option<Value>,
    pub statistics: StatisticsOverride,
}

impl PayloadOverride {
    pub fn name(mut self, value: impl Into<Value>) -> Self {
        self.name = Some(value.into());
        self
    }

    pub fn price(mut self, value: impl Into<Value>) -> Self {
        self.price = Some(value.into());
        self
    }

    pub fn seller_id(mut self, value: impl Into<Value>) -> Self {
        self.seller_id = Some(value.into());
        self
    }

    pub fn contacts(mut self, value: impl Into<Value>) -> Self {
        self.statistics.contacts = Some(value.into());
        self
    }

    pub fn like(mut self, value: impl Into<Value>) -> Self {
        self.statistics.like = Some(value.into());
        self
    }

    pub fn view_count(mut self, value: impl Into<Value>) -> Self {
        self.statistics.view_count = Some(value.into());
        self
    }

    fn merge(&mut self, other: &PayloadOverride) {
        merge_field(&mut self.name, &other.name);
        merge_field(&mut self.price, &other.price);
        merge_field(&mut self.seller_id, &other.seller_id);
        self.statistics.merge(&other.statistics);
    }
}

fn merge_field(target: &mut Option<Value>, incoming: &Option<Value>) {
    if let Some(value) = incoming {
        *target = Some(value.clone());
    }
}

#[derive(Debug, Clone)]
pub struct PayloadBuilder {
    base: AdPayload,
    overrides: PayloadOverride,
}

impl PayloadBuilder {
    pub fn new(seller_id: SellerId) -> Self {
        Self::from_payload(AdPayload::new(seller_id))
    }

    pub fn from_payload(base: AdPayload) -> Self {
        Self {
            base,
            overrides: PayloadOverride::default(),
        }
    }

    /// Layer `partial` on top of any earlier overrides; later values win.
    pub fn override_with(mut self, partial: &PayloadOverride) -> Self {
        self.overrides.merge(partial);
        self
    }

    /// The untouched valid payload this builder started from.
    pub fn base(&self) -> &AdPayload {
        &self.base
    }

    pub fn build(&self) -> Value {
        let mut statistics = Map::new();
        statistics.insert("contacts".into(), self.base.statistics.contacts.into());
        statistics.insert("like".into(), self.base.statistics.like.into());
        statistics.insert("viewCount".into(), self.base.statistics.view_count.into());
        let patch = &self.overrides.statistics;
        apply(&mut statistics, "contacts", &patch.contacts);
        apply(&mut statistics, "like", &patch.like);
        apply(&mut statistics, "viewCount", &patch.view_count);

        let mut fields = Map::new();
        fields.insert("name".into(), self.base.name.clone().into());
        fields.insert("price".into(), self.base.price.into());
        fields.insert("sellerId".into(), self.base.seller_id.value().into());
        fields.insert("statistics".into(), Value::Object(statistics));
        apply(&mut fields, "name", &self.overrides.name);
        apply(&mut fields, "price", &self.overrides.price);
        apply(&mut fields, "sellerId", &self.overrides.seller_id);

        Value::Object(fields)
    }
}

fn apply(fields: &mut Map<String, Value>, key: &str, value: &Option<Value>) {
    if let Some(value) = value {
        fields.insert(key.to_string(), value.clone());
    }
}

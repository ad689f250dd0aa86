//! # Invalid Payloads
//!
//! Corruptions of the valid ad body the service must reject with 400. Each
//! case touches the minimum number of fields needed to hit one validation
//! path, so a service that only checks the first bad field still fails
//! some of them.

use std::fmt::{self, Display};

use crate::payload::PayloadOverride;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidCase {
    EmptyName,
    NegativePrice,
    NonNumericSellerId,
    NonNumericContacts,
    NegativeLikes,
    NonNumericViewsNegativeLikes,
}

impl InvalidCase {
    pub const ALL: [InvalidCase; 6] = [
        InvalidCase::EmptyName,
        InvalidCase::NegativePrice,
        InvalidCase::NonNumericSellerId,
        InvalidCase::NonNumericContacts,
        InvalidCase::NegativeLikes,
        InvalidCase::NonNumericViewsNegativeLikes,
    ];

    /// Stable identifier used in scenario names.
    pub fn slug(self) -> &'static str {
        match self {
            InvalidCase::EmptyName => "empty_name",
            InvalidCase::NegativePrice => "negative_price",
            InvalidCase::NonNumericSellerId => "non_numeric_seller_id",
            InvalidCase::NonNumericContacts => "non_numeric_contacts",
            InvalidCase::NegativeLikes => "negative_likes",
            InvalidCase::NonNumericViewsNegativeLikes => "non_numeric_views_negative_likes",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|case| case.slug() == slug)
    }

    pub fn corruption(self) -> PayloadOverride {
        let patch = PayloadOverride::default();
        match self {
            InvalidCase::EmptyName => patch.name(""),
            InvalidCase::NegativePrice => patch.price(-100),
            InvalidCase::NonNumericSellerId => patch.seller_id("abc123"),
            InvalidCase::NonNumericContacts => patch.contacts("много"),
            InvalidCase::NegativeLikes => patch.like(-10),
            InvalidCase::NonNumericViewsNegativeLikes => patch.view_count("none").like(-10),
        }
    }
}

impl Display for InvalidCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InvalidCase::EmptyName => "empty name",
            InvalidCase::NegativePrice => "negative price",
            InvalidCase::NonNumericSellerId => "string seller id",
            InvalidCase::NonNumericContacts => "string statistics.contacts",
            InvalidCase::NegativeLikes => "negative statistics.like",
            InvalidCase::NonNumericViewsNegativeLikes => {
                "string statistics.viewCount with negative statistics.like"
            }
        };
        write!(f, "{label}")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::identity::SellerId;
    use crate::payload::PayloadBuilder;

    fn corrupted(case: InvalidCase) -> serde_json::Value {
        PayloadBuilder::new(SellerId::from(500_000))
            .override_with(&case.corruption())
            .build()
    }

    /// Top-level and nested fields that differ from the valid body.
    fn changed_paths(case: InvalidCase) -> Vec<String> {
        let valid = PayloadBuilder::new(SellerId::from(500_000)).build();
        let body = corrupted(case);
        let mut paths = Vec::new();
        for key in ["name", "price", "sellerId"] {
            if body[key] != valid[key] {
                paths.push(key.to_string());
            }
        }
        for key in ["contacts", "like", "viewCount"] {
            if body["statistics"][key] != valid["statistics"][key] {
                paths.push(format!("statistics.{key}"));
            }
        }
        paths
    }

    #[test]
    fn every_case_is_a_minimal_diff() {
        assert_eq!(changed_paths(InvalidCase::EmptyName), ["name"]);
        assert_eq!(changed_paths(InvalidCase::NegativePrice), ["price"]);
        assert_eq!(changed_paths(InvalidCase::NonNumericSellerId), ["sellerId"]);
        assert_eq!(changed_paths(InvalidCase::NonNumericContacts), ["statistics.contacts"]);
        assert_eq!(changed_paths(InvalidCase::NegativeLikes), ["statistics.like"]);
        assert_eq!(
            changed_paths(InvalidCase::NonNumericViewsNegativeLikes),
            ["statistics.like", "statistics.viewCount"]
        );
    }

    #[test]
    fn corrupted_values_match_catalog() {
        assert_eq!(corrupted(InvalidCase::EmptyName)["name"], json!(""));
        assert_eq!(corrupted(InvalidCase::NegativePrice)["price"], json!(-100));
        assert_eq!(corrupted(InvalidCase::NonNumericSellerId)["sellerId"], json!("abc123"));
        assert_eq!(
            corrupted(InvalidCase::NonNumericContacts)["statistics"]["contacts"],
            json!("много")
        );
        let compound = corrupted(InvalidCase::NonNumericViewsNegativeLikes);
        assert_eq!(compound["statistics"]["viewCount"], json!("none"));
        assert_eq!(compound["statistics"]["like"], json!(-10));
    }

    #[test]
    fn slugs_are_unique_and_round_trip() {
        let slugs: std::collections::HashSet<_> =
            InvalidCase::ALL.iter().map(|case| case.slug()).collect();
        assert_eq!(slugs.len(), InvalidCase::ALL.len());
        for case in InvalidCase::ALL {
            assert_eq!(InvalidCase::from_slug(case.slug()), Some(case));
        }
        assert_eq!(InvalidCase::from_slug("nope"), None);
    }
}

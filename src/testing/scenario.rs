use std::fmt::{self, Display};

use crate::catalog::InvalidCase;

/// Id token that is not a valid ad id.
pub const MALFORMED_AD_ID: &str = "invalid-id";
/// Seller token that is not a number.
pub const MALFORMED_SELLER_ID: &str = "invalid-seller";

const CREATE_INVALID_PREFIX: &str = "create_invalid/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    CreateValid,
    CreateInvalid(InvalidCase),
    GetById,
    GetByIdMalformed,
    GetByIdMissing,
    GetBySellerEmpty,
    GetBySellerWithAd,
    GetBySellerMalformed,
}

impl Scenario {
    /// The full suite in execution order.
    pub fn all() -> Vec<Scenario> {
        let mut scenarios = vec![Scenario::CreateValid];
        scenarios.extend(InvalidCase::ALL.into_iter().map(Scenario::CreateInvalid));
        scenarios.extend([
            Scenario::GetById,
            Scenario::GetByIdMalformed,
            Scenario::GetByIdMissing,
            Scenario::GetBySellerEmpty,
            Scenario::GetBySellerWithAd,
            Scenario::GetBySellerMalformed,
        ]);
        scenarios
    }

    pub fn name(&self) -> String {
        match self {
            Scenario::CreateValid => "create_valid".to_string(),
            Scenario::CreateInvalid(case) => format!("{CREATE_INVALID_PREFIX}{}", case.slug()),
            Scenario::GetById => "get_by_id".to_string(),
            Scenario::GetByIdMalformed => "get_by_id_malformed".to_string(),
            Scenario::GetByIdMissing => "get_by_id_missing".to_string(),
            Scenario::GetBySellerEmpty => "get_by_seller_empty".to_string(),
            Scenario::GetBySellerWithAd => "get_by_seller_with_ad".to_string(),
            Scenario::GetBySellerMalformed => "get_by_seller_malformed".to_string(),
        }
    }

    pub fn from_name(name: &str) -> Option<Scenario> {
        if let Some(slug) = name.strip_prefix(CREATE_INVALID_PREFIX) {
            return InvalidCase::from_slug(slug).map(Scenario::CreateInvalid);
        }
        Scenario::all().into_iter().find(|scenario| scenario.name() == name)
    }

    pub fn description(&self) -> String {
        match self {
            Scenario::CreateValid => "POST a valid ad, expect 200 and a new id".to_string(),
            Scenario::CreateInvalid(case) => format!("POST an ad with {case}, expect 400"),
            Scenario::GetById => "GET a created ad by id, expect it back unchanged".to_string(),
            Scenario::GetByIdMalformed => {
                format!("GET /item/{MALFORMED_AD_ID}, expect 404")
            }
            Scenario::GetByIdMissing => "GET /item/ with no id, expect 404".to_string(),
            Scenario::GetBySellerEmpty => {
                "GET ads of a fresh seller, expect an empty list".to_string()
            }
            Scenario::GetBySellerWithAd => {
                "GET ads of a seller with one ad, expect exactly that ad".to_string()
            }
            Scenario::GetBySellerMalformed => {
                format!("GET /{MALFORMED_SELLER_ID}/item, expect 404")
            }
        }
    }
}

impl Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

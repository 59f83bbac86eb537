//! Three-tier locality score between a requester and a dealer.

use serde::Serialize;

/// How close a dealer is to the requester.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LocationTier {
    DifferentProvince,
    SameProvince,
    SameCity,
}

impl LocationTier {
    pub fn score(&self) -> u32 {
        match self {
            LocationTier::SameCity => 100,
            LocationTier::SameProvince => 50,
            LocationTier::DifferentProvince => 10,
        }
    }

    pub fn reason(&self) -> &'static str {
        match self {
            LocationTier::SameCity => "Same city",
            LocationTier::SameProvince => "Same province",
            LocationTier::DifferentProvince => "Different province",
        }
    }
}

/// Score plus the human-readable reason tag attached to ranked results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LocationScore {
    pub score: u32,
    pub reason: &'static str,
}

impl From<LocationTier> for LocationScore {
    fn from(tier: LocationTier) -> Self {
        Self {
            score: tier.score(),
            reason: tier.reason(),
        }
    }
}

/// Classify a dealer relative to a requester. Comparison is exact.
pub fn location_tier(
    requester_province: &str,
    requester_city: &str,
    dealer_province: &str,
    dealer_city: &str,
) -> LocationTier {
    if requester_province != dealer_province {
        LocationTier::DifferentProvince
    } else if requester_city == dealer_city {
        LocationTier::SameCity
    } else {
        LocationTier::SameProvince
    }
}

/// Score a dealer location: 100 same city, 50 same province, 10 otherwise.
pub fn score_location(
    requester_province: &str,
    requester_city: &str,
    dealer_province: &str,
    dealer_city: &str,
) -> LocationScore {
    location_tier(
        requester_province,
        requester_city,
        dealer_province,
        dealer_city,
    )
    .into()
}

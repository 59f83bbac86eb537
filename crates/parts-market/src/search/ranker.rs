//! Post-fetch ordering of one page.

use crate::catalog::Candidate;
use crate::location::{self, LocationScore};
use crate::search::{RequesterLocation, SortMode};
use serde::Serialize;

/// A candidate plus its location score, when one was computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedCandidate {
    #[serde(flatten)]
    pub candidate: Candidate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_score: Option<LocationScore>,
}

impl RankedCandidate {
    pub fn unscored(candidate: Candidate) -> Self {
        Self {
            candidate,
            location_score: None,
        }
    }
}

/// Order a fetched page.
///
/// Only `location` with a fully known requester reorders anything. Scored
/// candidates are stably sorted by descending score; candidates whose dealer
/// location is incomplete follow them in store order.
pub fn rank(
    candidates: Vec<Candidate>,
    sort: SortMode,
    requester: &RequesterLocation,
) -> Vec<RankedCandidate> {
    if sort != SortMode::Location {
        return candidates.into_iter().map(RankedCandidate::unscored).collect();
    }

    let Some((province, city)) = requester.both() else {
        tracing::debug!("requester location incomplete, keeping store order");
        return candidates.into_iter().map(RankedCandidate::unscored).collect();
    };

    if !location::is_valid_city_for_province(city, province) {
        tracing::debug!(province, city, "requester location not in region catalog");
    }

    let (mut scored, unscored): (Vec<_>, Vec<_>) = candidates
        .into_iter()
        .map(|candidate| {
            let location_score = candidate
                .dealer
                .location()
                .map(|(dp, dc)| location::score_location(province, city, dp, dc));
            RankedCandidate {
                candidate,
                location_score,
            }
        })
        .partition(|r| r.location_score.is_some());

    // `sort_by` is stable, so equal scores keep store order.
    scored.sort_by(|a, b| score_of(b).cmp(&score_of(a)));
    scored.extend(unscored);
    scored
}

fn score_of(ranked: &RankedCandidate) -> u32 {
    ranked.location_score.map_or(0, |s| s.score)
}

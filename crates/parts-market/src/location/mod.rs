//! Location module.
//!
//! The locality score used by the `location` sort, plus the static region
//! catalog served to clients for province/city pickers.

mod regions;
mod scorer;

pub use regions::{cities_of, is_known_province, is_valid_city_for_province, provinces};
pub use scorer::{location_tier, score_location, LocationScore, LocationTier};

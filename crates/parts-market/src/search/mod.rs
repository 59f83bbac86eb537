//! Search module.
//!
//! Turns validated criteria into a store predicate, fetches one page plus the
//! filtered total, and applies the location re-sort.

mod criteria;
mod filter;
mod params;
mod query;
mod ranker;
mod results;
mod service;

pub use criteria::{RequesterLocation, SearchCriteria, SortMode, DEFAULT_LIMIT};
pub use filter::{escape_like, fold_case, search_document, Filter};
pub use params::{SearchLimits, SearchParams};
pub use query::{ProductPredicate, StoreOrder, StoreQuery};
pub use ranker::{rank, RankedCandidate};
pub use results::{Pagination, RankedPage};
pub use service::SearchService;

//! Trade route derivation over station market data.
//!
//! Pure request-scoped pipeline: raw station values are normalized and
//! grouped into a [`CommodityIndex`], matched into candidate routes, then
//! ranked. Nothing in here performs I/O or holds state across requests.

pub mod catalog;
pub mod index;
pub mod listing;
pub mod trade_route;

pub use catalog::{list_commodities, CommodityEntry};
pub use index::{build_index, CommodityIndex};
pub use trade_route::{match_routes, rank_routes, TradeRoute};

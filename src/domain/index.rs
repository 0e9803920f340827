//! Grouping of normalized listings by commodity.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use serde_json::Value;

use super::listing::{Listing, RawGood, RawStation};

/// Ordered multimap from commodity nickname to its listings.
///
/// Buckets iterate in first-seen commodity order and listings within a
/// bucket keep their first-seen order across stations; the route ranker
/// relies on both for stable tie-breaking. Built once per request, never
/// mutated afterwards.
#[derive(Debug, Default)]
pub struct CommodityIndex {
    order: Vec<String>,
    buckets: HashMap<String, Vec<Listing>>,
}

impl CommodityIndex {
    /// Iterate buckets in first-seen commodity order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Listing])> {
        self.order.iter().map(|nickname| {
            let listings = self
                .buckets
                .get(nickname)
                .map_or(&[][..], Vec::as_slice);
            (nickname.as_str(), listings)
        })
    }

    pub fn get(&self, nickname: &str) -> Option<&[Listing]> {
        self.buckets.get(nickname).map(Vec::as_slice)
    }

    /// Number of distinct commodities.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn push(&mut self, listing: Listing) {
        match self.buckets.entry(listing.commodity_nickname.clone()) {
            Entry::Occupied(mut entry) => entry.get_mut().push(listing),
            Entry::Vacant(entry) => {
                self.order.push(listing.commodity_nickname.clone());
                entry.insert(vec![listing]);
            }
        }
    }
}

/// Build the per-commodity index from the raw station payload.
///
/// Stations or listings that are not well-formed objects are skipped, as
/// are listings without a commodity nickname. Each station contributes at
/// most one listing per commodity: the first occurrence claims the
/// (station, commodity) slot before the text filter runs, so a filtered
/// first occurrence still shadows later duplicates.
///
/// `commodity_filter` is a case-insensitive substring match against the
/// commodity nickname or its display name.
pub fn build_index(stations: &[Value], commodity_filter: Option<&str>) -> CommodityIndex {
    let filter = commodity_filter.map(str::to_lowercase);
    let mut index = CommodityIndex::default();

    for station in stations {
        let Ok(station) = serde_json::from_value::<RawStation>(station.clone()) else {
            continue;
        };
        let mut seen: HashSet<String> = HashSet::new();

        for good in station.market_goods.as_deref().unwrap_or(&[]) {
            let Ok(good) = serde_json::from_value::<RawGood>(good.clone()) else {
                continue;
            };
            let Some(nickname) = good.nickname.as_deref() else {
                continue;
            };
            if !seen.insert(nickname.to_string()) {
                continue;
            }
            if let Some(filter) = filter.as_deref() {
                let name = good.name.as_deref().unwrap_or("");
                if !nickname.to_lowercase().contains(filter)
                    && !name.to_lowercase().contains(filter)
                {
                    continue;
                }
            }
            if let Some(listing) = Listing::from_raw(&station, &good) {
                index.push(listing);
            }
        }
    }

    index
}

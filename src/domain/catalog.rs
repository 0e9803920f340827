//! Catalog of distinct tradeable commodities.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use super::listing::{RawGood, RawStation};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CommodityEntry {
    pub nickname: String,
    pub name: String,
}

/// Collect the distinct commodities observed across all stations.
///
/// Each nickname appears once with its first-seen display name (falling
/// back to the nickname itself when a name is missing). Sorted ascending by
/// display name; the nickname breaks ties so equal names still order
/// deterministically.
pub fn list_commodities(stations: &[Value]) -> Vec<CommodityEntry> {
    let mut names: HashMap<String, String> = HashMap::new();

    for station in stations {
        let Ok(station) = serde_json::from_value::<RawStation>(station.clone()) else {
            continue;
        };
        for good in station.market_goods.as_deref().unwrap_or(&[]) {
            let Ok(good) = serde_json::from_value::<RawGood>(good.clone()) else {
                continue;
            };
            let Some(nickname) = good.nickname else {
                continue;
            };
            if !names.contains_key(&nickname) {
                let name = good.name.unwrap_or_else(|| nickname.clone());
                names.insert(nickname, name);
            }
        }
    }

    let mut entries: Vec<CommodityEntry> = names
        .into_iter()
        .map(|(nickname, name)| CommodityEntry { nickname, name })
        .collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.nickname.cmp(&b.nickname)));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn station(goods: Value) -> Value {
        json!({ "nickname": "st", "market_goods": goods })
    }

    #[test]
    fn each_nickname_appears_once_with_its_first_seen_name() {
        let stations = vec![
            station(json!([{ "nickname": "commodity_ore", "name": "Ore" }])),
            station(json!([{ "nickname": "commodity_ore", "name": "Raw Ore" }])),
        ];

        let catalog = list_commodities(&stations);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].nickname, "commodity_ore");
        assert_eq!(catalog[0].name, "Ore");
    }

    #[test]
    fn sorted_by_name_then_nickname() {
        let stations = vec![station(json!([
            { "nickname": "commodity_b", "name": "Ore" },
            { "nickname": "commodity_a", "name": "Ore" },
            { "nickname": "commodity_c", "name": "Gold" },
        ]))];

        let catalog = list_commodities(&stations);
        let order: Vec<&str> = catalog.iter().map(|e| e.nickname.as_str()).collect();
        assert_eq!(order, vec!["commodity_c", "commodity_a", "commodity_b"]);
    }

    #[test]
    fn missing_name_falls_back_to_the_nickname() {
        let stations = vec![station(json!([{ "nickname": "commodity_ore" }]))];
        let catalog = list_commodities(&stations);
        assert_eq!(catalog[0].name, "commodity_ore");
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let stations = vec![
            json!("garbage"),
            station(json!([42, { "name": "no nickname" }])),
        ];
        assert!(list_commodities(&stations).is_empty());
    }
}

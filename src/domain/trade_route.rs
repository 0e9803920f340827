//! Trade route derivation and ranking.

use std::cmp::Ordering;

use serde::Serialize;

use super::index::CommodityIndex;

/// A single-commodity haul between two distinct stations: buy at
/// `from_base`, sell at `to_base`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TradeRoute {
    pub commodity_nickname: String,
    pub commodity_name: String,
    pub from_base: String,
    pub from_base_nickname: String,
    pub from_system: String,
    pub from_region: String,
    pub from_faction: String,
    pub from_sector: String,
    /// Price paid to acquire one unit at the origin.
    pub buy_price: f64,
    pub to_base: String,
    pub to_base_nickname: String,
    pub to_system: String,
    pub to_region: String,
    pub to_faction: String,
    pub to_sector: String,
    /// Price received per unit at the destination.
    pub sell_price: f64,
    pub profit_per_unit: f64,
    pub volume: f64,
    pub profit_per_volume: f64,
}

/// Derive every candidate route from the index.
///
/// Sellers are stations offering the commodity to travelers (`base_sells`
/// set), buyers are stations paying for deliveries. Every (seller, buyer)
/// pair at distinct stations becomes a candidate; it survives only when the
/// per-unit profit strictly exceeds `min_profit`. The cross product per
/// commodity is quadratic, which is fine at the station counts the source
/// serves.
pub fn match_routes(index: &CommodityIndex, min_profit: f64) -> Vec<TradeRoute> {
    let mut routes = Vec::new();

    for (nickname, listings) in index.iter() {
        let sellers: Vec<_> = listings.iter().filter(|l| l.base_sells).collect();
        let buyers: Vec<_> = listings.iter().filter(|l| !l.base_sells).collect();

        for seller in &sellers {
            for buyer in &buyers {
                if seller.base_nickname == buyer.base_nickname {
                    continue;
                }

                let profit_per_unit = buyer.price - seller.price;
                if profit_per_unit <= min_profit {
                    continue;
                }

                routes.push(TradeRoute {
                    commodity_nickname: nickname.to_string(),
                    commodity_name: seller.commodity_name.clone(),
                    from_base: seller.base_name.clone(),
                    from_base_nickname: seller.base_nickname.clone(),
                    from_system: seller.system_name.clone(),
                    from_region: seller.region_name.clone(),
                    from_faction: seller.faction_name.clone(),
                    from_sector: seller.sector_coord.clone(),
                    buy_price: seller.price,
                    to_base: buyer.base_name.clone(),
                    to_base_nickname: buyer.base_nickname.clone(),
                    to_system: buyer.system_name.clone(),
                    to_region: buyer.region_name.clone(),
                    to_faction: buyer.faction_name.clone(),
                    to_sector: buyer.sector_coord.clone(),
                    sell_price: buyer.price,
                    profit_per_unit,
                    volume: seller.volume,
                    profit_per_volume: profit_per_volume(profit_per_unit, seller.volume),
                });
            }
        }
    }

    routes
}

/// Stable sort descending by per-unit profit, then truncate to `limit`.
/// Ties keep the order routes were emitted in by [`match_routes`].
pub fn rank_routes(mut routes: Vec<TradeRoute>, limit: usize) -> Vec<TradeRoute> {
    routes.sort_by(|a, b| {
        b.profit_per_unit
            .partial_cmp(&a.profit_per_unit)
            .unwrap_or(Ordering::Equal)
    });
    routes.truncate(limit);
    routes
}

/// Normalization guarantees `volume >= 1`, but the division stays guarded
/// in case a future source hands out unnormalized listings.
fn profit_per_volume(profit_per_unit: f64, volume: f64) -> f64 {
    if volume > 0.0 {
        (profit_per_unit / volume * 100.0).round() / 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::index::build_index;
    use serde_json::{json, Value};

    fn station_with_good(
        base: &str,
        commodity: &str,
        price: f64,
        base_sells: bool,
        volume: f64,
    ) -> Value {
        json!({
            "nickname": base,
            "name": base,
            "system_name": "Omega-3",
            "market_goods": [{
                "nickname": commodity,
                "name": commodity,
                "price_base_sells_for": price,
                "base_sells": base_sells,
                "volume": volume,
            }],
        })
    }

    #[test]
    fn pairs_seller_with_buyer_and_computes_profit() {
        let stations = vec![
            station_with_good("st_a", "commodity_widget", 10.0, true, 2.0),
            station_with_good("st_b", "commodity_widget", 25.0, false, 2.0),
        ];

        let routes = match_routes(&build_index(&stations, None), 0.0);
        assert_eq!(routes.len(), 1);

        let route = &routes[0];
        assert_eq!(route.from_base_nickname, "st_a");
        assert_eq!(route.to_base_nickname, "st_b");
        assert_eq!(route.buy_price, 10.0);
        assert_eq!(route.sell_price, 25.0);
        assert_eq!(route.profit_per_unit, 15.0);
        assert_eq!(route.volume, 2.0);
        assert_eq!(route.profit_per_volume, 7.5);
    }

    #[test]
    fn limit_keeps_only_the_most_profitable_routes() {
        let stations = vec![
            station_with_good("st_a", "commodity_widget", 10.0, true, 2.0),
            station_with_good("st_b", "commodity_widget", 25.0, false, 2.0),
            station_with_good("st_c", "commodity_widget", 5.0, true, 1.0),
        ];

        let routes = match_routes(&build_index(&stations, None), 0.0);
        assert_eq!(routes.len(), 2);

        let top = rank_routes(routes, 1);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].from_base_nickname, "st_c");
        assert_eq!(top[0].profit_per_unit, 20.0);
    }

    #[test]
    fn never_routes_a_station_to_itself() {
        let stations = vec![
            station_with_good("st_a", "commodity_ore", 10.0, true, 1.0),
            station_with_good("st_b", "commodity_ore", 30.0, false, 1.0),
            station_with_good("st_c", "commodity_ore", 20.0, false, 1.0),
        ];

        for route in match_routes(&build_index(&stations, None), 0.0) {
            assert_ne!(route.from_base_nickname, route.to_base_nickname);
        }
    }

    #[test]
    fn profit_threshold_is_strictly_exclusive() {
        let stations = vec![
            station_with_good("st_a", "commodity_ore", 10.0, true, 1.0),
            station_with_good("st_b", "commodity_ore", 25.0, false, 1.0),
        ];
        let index = build_index(&stations, None);

        // profit_per_unit is exactly 15: kept below, dropped at the bound
        assert_eq!(match_routes(&index, 14.0).len(), 1);
        assert_eq!(match_routes(&index, 15.0).len(), 0);
    }

    #[test]
    fn ranking_is_descending_and_stable_for_equal_profits() {
        let stations = vec![
            station_with_good("st_a", "commodity_ore", 10.0, true, 1.0),
            station_with_good("st_b", "commodity_ore", 25.0, false, 1.0),
            station_with_good("st_c", "commodity_ore", 25.0, false, 1.0),
            station_with_good("st_d", "commodity_gold", 5.0, true, 1.0),
            station_with_good("st_e", "commodity_gold", 45.0, false, 1.0),
        ];

        let ranked = rank_routes(match_routes(&build_index(&stations, None), 0.0), 100);
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].commodity_nickname, "commodity_gold");
        // The two ore routes tie at 15; emission order (st_b before st_c)
        // must be preserved.
        assert_eq!(ranked[1].to_base_nickname, "st_b");
        assert_eq!(ranked[2].to_base_nickname, "st_c");
    }

    #[test]
    fn limit_zero_yields_an_empty_result() {
        let stations = vec![
            station_with_good("st_a", "commodity_ore", 10.0, true, 1.0),
            station_with_good("st_b", "commodity_ore", 25.0, false, 1.0),
        ];
        let ranked = rank_routes(match_routes(&build_index(&stations, None), 0.0), 0);
        assert!(ranked.is_empty());
    }

    #[test]
    fn per_volume_profit_rounds_to_two_decimals_and_guards_zero() {
        assert_eq!(profit_per_volume(10.0, 3.0), 3.33);
        assert_eq!(profit_per_volume(10.0, 0.0), 0.0);
        assert_eq!(profit_per_volume(10.0, -1.0), 0.0);
    }
}

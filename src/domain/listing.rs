//! Raw market record shapes and their normalization.
//!
//! The market data source returns dirty, partially filled records. Every
//! field on the raw shapes is optional and deserialized leniently, so a
//! wrong-typed field degrades to `None` instead of discarding the record.
//! All defaulting happens in one place: [`Listing::from_raw`].

use serde::{Deserialize, Deserializer};
use serde_json::Value;

const UNKNOWN: &str = "Unknown";

/// One station as returned by the market data source.
///
/// A value that is not a JSON object fails to deserialize and is skipped by
/// the index builder; an object always deserializes, whatever its fields
/// hold.
#[derive(Debug, Default, Deserialize)]
pub struct RawStation {
    #[serde(default, deserialize_with = "lenient")]
    pub nickname: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub system_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub region_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub faction_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub sector_coord: Option<String>,
    /// Listings stay as raw values so one malformed entry cannot take the
    /// whole station down with it.
    #[serde(default, deserialize_with = "lenient")]
    pub market_goods: Option<Vec<Value>>,
}

/// One market listing nested in a station record.
#[derive(Debug, Default, Deserialize)]
pub struct RawGood {
    #[serde(default, deserialize_with = "lenient")]
    pub nickname: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub price_base_sells_for: Option<f64>,
    /// True when the station offers the commodity to travelers at `price`,
    /// false when it pays `price` for deliveries.
    #[serde(default, deserialize_with = "lenient")]
    pub base_sells: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub volume: Option<f64>,
}

/// A market listing with every defaulting decision already applied.
/// Immutable once built; downstream matching never re-checks fields.
#[derive(Clone, Debug, PartialEq)]
pub struct Listing {
    pub commodity_nickname: String,
    pub commodity_name: String,
    pub base_nickname: String,
    pub base_name: String,
    pub system_name: String,
    pub region_name: String,
    pub faction_name: String,
    pub sector_coord: String,
    pub price: f64,
    pub base_sells: bool,
    pub volume: f64,
}

impl Listing {
    /// Build a normalized listing from one raw station/listing pair.
    ///
    /// Returns `None` when the listing carries no commodity nickname: that
    /// nickname is the join key, and an entry without it cannot be matched
    /// against anything.
    pub fn from_raw(station: &RawStation, good: &RawGood) -> Option<Self> {
        let commodity_nickname = good.nickname.clone()?;
        Some(Self {
            commodity_nickname,
            commodity_name: unwrap_name(&good.name),
            base_nickname: station
                .nickname
                .clone()
                .unwrap_or_else(|| "unknown".to_string()),
            base_name: unwrap_name(&station.name),
            system_name: unwrap_name(&station.system_name),
            region_name: unwrap_name(&station.region_name),
            faction_name: unwrap_name(&station.faction_name),
            sector_coord: unwrap_name(&station.sector_coord),
            price: good.price_base_sells_for.unwrap_or(0.0),
            base_sells: good.base_sells.unwrap_or(false),
            // A non-positive volume would poison the per-volume division
            // downstream, so it gets the same default as a missing one.
            volume: good.volume.filter(|v| *v > 0.0).unwrap_or(1.0),
        })
    }
}

fn unwrap_name(field: &Option<String>) -> String {
    field.clone().unwrap_or_else(|| UNKNOWN.to_string())
}

/// Deserialize a field into `None` when its value does not match the
/// expected type, instead of failing the surrounding record.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

//! Types for public endpoints.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::types::OhlcInterval;

/// Server time response.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerTime {
    /// Unix timestamp
    pub unixtime: i64,
    /// RFC 1123 formatted time string
    pub rfc1123: String,
}

/// System status response.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemStatus {
    pub status: String,
    pub timestamp: String,
}

/// Parameters for the asset info query.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AssetsRequest {
    /// Comma-delimited, case-insensitive asset list; all assets when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset: Option<String>,
    /// Asset class filter (default: "currency")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aclass: Option<String>,
}

impl AssetsRequest {
    /// Restrict the query to the given assets.
    pub fn for_assets(assets: impl Into<String>) -> Self {
        Self {
            asset: Some(assets.into()),
            aclass: None,
        }
    }
}

/// Information about a single asset.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetInfo {
    /// Asset class
    pub aclass: String,
    /// Alternate name, like EUR, USD, XBT
    pub altname: String,
    /// Decimal places for record keeping
    pub decimals: u8,
    /// Decimal places for display, usually fewer
    pub display_decimals: u8,
    #[serde(default)]
    pub status: Option<String>,
}

/// Parameters for the tradable asset pairs query.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AssetPairsRequest {
    /// Comma-delimited, case-insensitive pair list; all pairs when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pair: Option<String>,
    /// Info level to retrieve: "info", "leverage", "fees", or "margin"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

impl AssetPairsRequest {
    /// Restrict the query to the given pairs.
    pub fn for_pairs(pairs: impl Into<String>) -> Self {
        Self {
            pair: Some(pairs.into()),
            info: None,
        }
    }
}

/// Information about a tradable asset pair.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetPair {
    /// Alternate pair name
    pub altname: String,
    /// WebSocket pair name
    #[serde(default)]
    pub wsname: Option<String>,
    /// Base asset id
    pub base: String,
    /// Quote asset id
    pub quote: String,
    /// Scaling decimal places for the pair
    pub pair_decimals: u8,
    /// Scaling decimal places for volume
    pub lot_decimals: u8,
    /// Minimum order volume
    #[serde(default)]
    pub ordermin: Option<Decimal>,
    /// Minimum order cost
    #[serde(default)]
    pub costmin: Option<Decimal>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Ticker snapshot for one pair.
#[derive(Debug, Clone, Deserialize)]
pub struct TickerInfo {
    /// Ask [price, whole lot volume, lot volume]
    pub a: Vec<Decimal>,
    /// Bid [price, whole lot volume, lot volume]
    pub b: Vec<Decimal>,
    /// Last trade closed [price, lot volume]
    pub c: Vec<Decimal>,
    /// Volume [today, last 24 hours]
    pub v: Vec<Decimal>,
    /// Volume weighted average price [today, last 24 hours]
    pub p: Vec<Decimal>,
    /// Number of trades [today, last 24 hours]
    pub t: Vec<u64>,
    /// Low [today, last 24 hours]
    pub l: Vec<Decimal>,
    /// High [today, last 24 hours]
    pub h: Vec<Decimal>,
    /// Today's opening price
    pub o: Decimal,
}

impl TickerInfo {
    pub fn ask_price(&self) -> Decimal {
        self.a.first().copied().unwrap_or_default()
    }

    pub fn bid_price(&self) -> Decimal {
        self.b.first().copied().unwrap_or_default()
    }

    pub fn last_price(&self) -> Decimal {
        self.c.first().copied().unwrap_or_default()
    }
}

/// Parameters for the OHLC query.
#[derive(Debug, Clone, Serialize)]
pub struct OhlcRequest {
    pub pair: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<OhlcInterval>,
    /// Return committed frames since this Unix time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<i64>,
}

impl OhlcRequest {
    pub fn new(pair: impl Into<String>) -> Self {
        Self {
            pair: pair.into(),
            interval: None,
            since: None,
        }
    }

    pub fn interval(mut self, interval: OhlcInterval) -> Self {
        self.interval = Some(interval);
        self
    }

    pub fn since(mut self, since: i64) -> Self {
        self.since = Some(since);
        self
    }
}

/// OHLC data keyed by pair, with the pagination cursor.
///
/// The final candle is the current not-yet-committed frame; `last` is the
/// `since` value to use when polling for new committed frames.
#[derive(Debug, Clone, Deserialize)]
pub struct OhlcPage {
    #[serde(flatten)]
    pub candles: HashMap<String, Vec<OhlcCandle>>,
    pub last: i64,
}

/// One OHLC frame.
///
/// Wire form: `[time, open, high, low, close, vwap, volume, count]`.
#[derive(Debug, Clone)]
pub struct OhlcCandle {
    pub time: i64,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub vwap: Decimal,
    pub volume: Decimal,
    pub count: u64,
}

impl<'de> Deserialize<'de> for OhlcCandle {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (time, open, high, low, close, vwap, volume, count): (
            i64,
            Decimal,
            Decimal,
            Decimal,
            Decimal,
            Decimal,
            Decimal,
            u64,
        ) = Deserialize::deserialize(deserializer)?;
        Ok(Self {
            time,
            open,
            high,
            low,
            close,
            vwap,
            volume,
            count,
        })
    }
}

/// Parameters for the order book query.
#[derive(Debug, Clone, Serialize)]
pub struct DepthRequest {
    pub pair: String,
    /// Maximum number of levels per side
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u16>,
}

impl DepthRequest {
    pub fn new(pair: impl Into<String>) -> Self {
        Self {
            pair: pair.into(),
            count: None,
        }
    }

    pub fn count(mut self, count: u16) -> Self {
        self.count = Some(count);
        self
    }
}

/// Order book for one pair.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderBook {
    pub asks: Vec<BookLevel>,
    pub bids: Vec<BookLevel>,
}

/// One price level. Wire form: `[price, volume, timestamp]`.
#[derive(Debug, Clone)]
pub struct BookLevel {
    pub price: Decimal,
    pub volume: Decimal,
    pub timestamp: i64,
}

impl<'de> Deserialize<'de> for BookLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (price, volume, timestamp): (Decimal, Decimal, i64) =
            Deserialize::deserialize(deserializer)?;
        Ok(Self {
            price,
            volume,
            timestamp,
        })
    }
}

/// Parameters for the recent trades query.
#[derive(Debug, Clone, Serialize)]
pub struct TradesRequest {
    pub pair: String,
    /// Return trades since this cursor (the `last` of a previous page)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u16>,
}

impl TradesRequest {
    pub fn new(pair: impl Into<String>) -> Self {
        Self {
            pair: pair.into(),
            since: None,
            count: None,
        }
    }

    pub fn since(mut self, since: impl Into<String>) -> Self {
        self.since = Some(since.into());
        self
    }

    pub fn count(mut self, count: u16) -> Self {
        self.count = Some(count);
        self
    }
}

/// Taker side of a public trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeSide {
    #[serde(rename = "b")]
    Buy,
    #[serde(rename = "s")]
    Sell,
}

impl TradeSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeSide::Buy => "buy",
            TradeSide::Sell => "sell",
        }
    }
}

/// Execution kind of a public trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeKind {
    #[serde(rename = "m")]
    Market,
    #[serde(rename = "l")]
    Limit,
}

impl TradeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeKind::Market => "market",
            TradeKind::Limit => "limit",
        }
    }
}

/// One public trade, decoded from its positional wire form.
///
/// The API has carried both a 6-element row
/// `[price, volume, time, side, kind, misc]` and the current 7-element row
/// with a trailing trade id; both decode into this record.
#[derive(Debug, Clone)]
pub struct TradeRecord {
    pub price: Decimal,
    pub volume: Decimal,
    /// Unix timestamp with fractional seconds
    pub time: f64,
    pub side: TradeSide,
    pub kind: TradeKind,
    pub misc: String,
    /// Present on 7-element rows only
    pub trade_id: Option<i64>,
}

impl<'de> Deserialize<'de> for TradeRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TradeVisitor;

        impl<'de> Visitor<'de> for TradeVisitor {
            type Value = TradeRecord;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a trade array of 6 or 7 elements")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let price = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let volume = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                let time = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(2, &self))?;
                let side = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(3, &self))?;
                let kind = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(4, &self))?;
                let misc = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(5, &self))?;
                let trade_id = seq.next_element()?;
                Ok(TradeRecord {
                    price,
                    volume,
                    time,
                    side,
                    kind,
                    misc,
                    trade_id,
                })
            }
        }

        deserializer.deserialize_seq(TradeVisitor)
    }
}

/// One page of recent trades with the pagination cursor.
#[derive(Debug, Clone)]
pub struct TradesPage {
    /// Trades keyed by pair name
    pub trades: HashMap<String, Vec<TradeRecord>>,
    /// Cursor to pass as `since` on the next poll
    pub last: String,
}

impl TradesPage {
    /// Trades for one pair, empty when the pair is absent.
    pub fn for_pair(&self, pair: &str) -> &[TradeRecord] {
        self.trades.get(pair).map(Vec::as_slice).unwrap_or_default()
    }
}

impl<'de> Deserialize<'de> for TradesPage {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // The cursor lives alongside the pair keys, so the map is taken
        // apart by hand rather than flattened.
        let mut raw: HashMap<String, serde_json::Value> = HashMap::deserialize(deserializer)?;
        let last = raw
            .remove("last")
            .ok_or_else(|| de::Error::missing_field("last"))?;
        let last = String::deserialize(last).map_err(de::Error::custom)?;

        let mut trades = HashMap::with_capacity(raw.len());
        for (pair, rows) in raw {
            let rows: Vec<TradeRecord> = serde_json::from_value(rows).map_err(de::Error::custom)?;
            trades.insert(pair, rows);
        }
        Ok(Self { trades, last })
    }
}

/// Parameters for the recent spreads query.
#[derive(Debug, Clone, Serialize)]
pub struct SpreadRequest {
    pub pair: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<i64>,
}

impl SpreadRequest {
    pub fn new(pair: impl Into<String>) -> Self {
        Self {
            pair: pair.into(),
            since: None,
        }
    }

    pub fn since(mut self, since: i64) -> Self {
        self.since = Some(since);
        self
    }
}

/// One page of recent spreads with the pagination cursor.
#[derive(Debug, Clone, Deserialize)]
pub struct SpreadPage {
    #[serde(flatten)]
    pub spreads: HashMap<String, Vec<SpreadTick>>,
    pub last: i64,
}

/// One spread observation. Wire form: `[time, bid, ask]`.
#[derive(Debug, Clone)]
pub struct SpreadTick {
    pub time: i64,
    pub bid: Decimal,
    pub ask: Decimal,
}

impl<'de> Deserialize<'de> for SpreadTick {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (time, bid, ask): (i64, Decimal, Decimal) = Deserialize::deserialize(deserializer)?;
        Ok(Self { time, bid, ask })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_trade_record_decodes_seven_element_row() {
        let row = json!(["50243.20000", "0.10000000", 1616663618.0942, "b", "m", "", 123456]);
        let trade: TradeRecord = serde_json::from_value(row).unwrap();
        assert_eq!(trade.price, "50243.2".parse().unwrap());
        assert_eq!(trade.side, TradeSide::Buy);
        assert_eq!(trade.kind, TradeKind::Market);
        assert_eq!(trade.trade_id, Some(123456));
    }

    #[test]
    fn test_trade_record_decodes_six_element_row() {
        let row = json!(["4100.5", "1.50000000", 1560516023.070651, "s", "l", "x"]);
        let trade: TradeRecord = serde_json::from_value(row).unwrap();
        assert_eq!(trade.side, TradeSide::Sell);
        assert_eq!(trade.kind, TradeKind::Limit);
        assert_eq!(trade.misc, "x");
        assert_eq!(trade.trade_id, None);
    }

    #[test]
    fn test_trade_record_rejects_short_row() {
        let row = json!(["4100.5", "1.5"]);
        assert!(serde_json::from_value::<TradeRecord>(row).is_err());
    }

    #[test]
    fn test_trades_page_splits_cursor_from_pairs() {
        let page: TradesPage = serde_json::from_value(json!({
            "XXBTZUSD": [["50243.2", "0.1", 1616663618.0942, "b", "m", "", 1]],
            "last": "1616663618041272106"
        }))
        .unwrap();
        assert_eq!(page.last, "1616663618041272106");
        assert_eq!(page.for_pair("XXBTZUSD").len(), 1);
        assert!(page.for_pair("XXBTZEUR").is_empty());
    }

    #[test]
    fn test_ohlc_candle_decodes() {
        let row = json!([1616662740, "52591.9", "52599.9", "52591.8", "52599.9", "52599.1", "0.11091626", 5]);
        let candle: OhlcCandle = serde_json::from_value(row).unwrap();
        assert_eq!(candle.time, 1616662740);
        assert_eq!(candle.count, 5);
    }

    #[test]
    fn test_book_level_decodes() {
        let level: BookLevel =
            serde_json::from_value(json!(["52523.0", "1.199", 1616663113])).unwrap();
        assert_eq!(level.timestamp, 1616663113);
    }
}

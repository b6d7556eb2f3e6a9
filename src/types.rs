//! Shared wire types used by both public and private endpoints.

use serde::{Deserialize, Serialize};

/// Buy or sell side of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuySell {
    Buy,
    Sell,
}

impl std::fmt::Display for BuySell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuySell::Buy => write!(f, "buy"),
            BuySell::Sell => write!(f, "sell"),
        }
    }
}

/// Order execution type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderType {
    /// Execute immediately at the best available price
    Market,
    /// Execute at the given price or better
    Limit,
    /// Trigger a market order when price reaches the stop price
    StopLoss,
    /// Trigger a market order when price reaches the profit target
    TakeProfit,
    /// Trigger a limit order when price reaches the stop price
    StopLossLimit,
    /// Trigger a limit order when price reaches the profit target
    TakeProfitLimit,
    TrailingStop,
    TrailingStopLimit,
    SettlePosition,
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderType::Market => "market",
            OrderType::Limit => "limit",
            OrderType::StopLoss => "stop-loss",
            OrderType::TakeProfit => "take-profit",
            OrderType::StopLossLimit => "stop-loss-limit",
            OrderType::TakeProfitLimit => "take-profit-limit",
            OrderType::TrailingStop => "trailing-stop",
            OrderType::TrailingStopLimit => "trailing-stop-limit",
            OrderType::SettlePosition => "settle-position",
        };
        write!(f, "{s}")
    }
}

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Accepted but not yet in the book
    Pending,
    /// Live in the book
    Open,
    /// Fully executed
    Closed,
    Canceled,
    Expired,
}

/// OHLC candle interval in minutes.
///
/// The exchange accepts only this fixed set; other values come back as an
/// invalid-arguments error, so the set is enforced by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub enum OhlcInterval {
    Min1,
    Min5,
    Min15,
    Min30,
    Hour1,
    Hour4,
    Day1,
    Week1,
    Day15,
}

impl From<OhlcInterval> for u32 {
    fn from(interval: OhlcInterval) -> u32 {
        match interval {
            OhlcInterval::Min1 => 1,
            OhlcInterval::Min5 => 5,
            OhlcInterval::Min15 => 15,
            OhlcInterval::Min30 => 30,
            OhlcInterval::Hour1 => 60,
            OhlcInterval::Hour4 => 240,
            OhlcInterval::Day1 => 1440,
            OhlcInterval::Week1 => 10080,
            OhlcInterval::Day15 => 21600,
        }
    }
}

impl TryFrom<u32> for OhlcInterval {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(OhlcInterval::Min1),
            5 => Ok(OhlcInterval::Min5),
            15 => Ok(OhlcInterval::Min15),
            30 => Ok(OhlcInterval::Min30),
            60 => Ok(OhlcInterval::Hour1),
            240 => Ok(OhlcInterval::Hour4),
            1440 => Ok(OhlcInterval::Day1),
            10080 => Ok(OhlcInterval::Week1),
            21600 => Ok(OhlcInterval::Day15),
            _ => Err(format!("invalid OHLC interval: {value}")),
        }
    }
}

//! Types for private endpoints.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{BuySell, OrderStatus, OrderType};

/// Parameters for placing an order.
///
/// The exchange requires `pair`, `type`, `ordertype` and `volume`; the
/// client reports every omitted one before anything goes on the wire, so a
/// half-built request never costs a nonce. Field order here is the order
/// parameters are encoded, signed and transmitted in.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AddOrderRequest {
    /// Asset pair, e.g. `XBTEUR`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pair: Option<String>,
    /// Buy or sell
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub side: Option<BuySell>,
    /// Execution type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordertype: Option<OrderType>,
    /// Order size in base currency
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<Decimal>,
    /// Price, meaning depends on the order type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    /// Secondary price for two-price order types
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price2: Option<Decimal>,
    /// Desired leverage, e.g. `2:1`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leverage: Option<String>,
    /// Comma-delimited order flags
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oflags: Option<String>,
    /// User reference id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub userref: Option<i64>,
    /// Validate inputs only, do not submit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validate: Option<bool>,
}

impl AddOrderRequest {
    /// Start an empty request; set fields with the builder methods.
    pub fn new() -> Self {
        Self::default()
    }

    /// A market order with all required fields set.
    pub fn market(pair: impl Into<String>, side: BuySell, volume: Decimal) -> Self {
        Self {
            pair: Some(pair.into()),
            side: Some(side),
            ordertype: Some(OrderType::Market),
            volume: Some(volume),
            ..Self::default()
        }
    }

    /// A limit order with all required fields set.
    pub fn limit(pair: impl Into<String>, side: BuySell, volume: Decimal, price: Decimal) -> Self {
        Self {
            pair: Some(pair.into()),
            side: Some(side),
            ordertype: Some(OrderType::Limit),
            volume: Some(volume),
            price: Some(price),
            ..Self::default()
        }
    }

    pub fn pair(mut self, pair: impl Into<String>) -> Self {
        self.pair = Some(pair.into());
        self
    }

    pub fn side(mut self, side: BuySell) -> Self {
        self.side = Some(side);
        self
    }

    pub fn ordertype(mut self, ordertype: OrderType) -> Self {
        self.ordertype = Some(ordertype);
        self
    }

    pub fn volume(mut self, volume: Decimal) -> Self {
        self.volume = Some(volume);
        self
    }

    pub fn price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    pub fn price2(mut self, price2: Decimal) -> Self {
        self.price2 = Some(price2);
        self
    }

    pub fn leverage(mut self, leverage: impl Into<String>) -> Self {
        self.leverage = Some(leverage.into());
        self
    }

    pub fn userref(mut self, userref: i64) -> Self {
        self.userref = Some(userref);
        self
    }

    /// Ask the exchange to validate without submitting.
    pub fn validate_only(mut self) -> Self {
        self.validate = Some(true);
        self
    }

    /// Wire names of required parameters that are still unset.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.pair.is_none() {
            missing.push("pair");
        }
        if self.side.is_none() {
            missing.push("type");
        }
        if self.ordertype.is_none() {
            missing.push("ordertype");
        }
        if self.volume.is_none() {
            missing.push("volume");
        }
        missing
    }
}

/// Receipt for a placed (or validated) order.
#[derive(Debug, Clone, Deserialize)]
pub struct AddOrderReceipt {
    /// Human-readable order description
    pub descr: OrderConfirmation,
    /// Transaction ids, absent for validate-only requests
    #[serde(default)]
    pub txid: Vec<String>,
}

/// Description block echoed back when an order is accepted.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderConfirmation {
    pub order: String,
    #[serde(default)]
    pub close: Option<String>,
}

/// Parameters for amending an open order.
///
/// `txid` and `pair` are required; unset optional fields keep the order's
/// current values.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EditOrderRequest {
    /// Transaction id of the order being amended
    #[serde(skip_serializing_if = "Option::is_none")]
    pub txid: Option<String>,
    /// Asset pair of the order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pair: Option<String>,
    /// New order size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<Decimal>,
    /// New price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    /// New secondary price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price2: Option<Decimal>,
    /// User reference id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub userref: Option<i64>,
    /// Validate inputs only, do not amend
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validate: Option<bool>,
}

impl EditOrderRequest {
    /// Start a request amending the given order.
    pub fn for_order(txid: impl Into<String>, pair: impl Into<String>) -> Self {
        Self {
            txid: Some(txid.into()),
            pair: Some(pair.into()),
            ..Self::default()
        }
    }

    /// Start an empty request; set fields with the builder methods.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn txid(mut self, txid: impl Into<String>) -> Self {
        self.txid = Some(txid.into());
        self
    }

    pub fn pair(mut self, pair: impl Into<String>) -> Self {
        self.pair = Some(pair.into());
        self
    }

    pub fn volume(mut self, volume: Decimal) -> Self {
        self.volume = Some(volume);
        self
    }

    pub fn price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    pub fn price2(mut self, price2: Decimal) -> Self {
        self.price2 = Some(price2);
        self
    }

    /// Wire names of required parameters that are still unset.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.txid.is_none() {
            missing.push("txid");
        }
        if self.pair.is_none() {
            missing.push("pair");
        }
        missing
    }
}

/// Receipt for an amended order.
#[derive(Debug, Clone, Deserialize)]
pub struct EditOrderReceipt {
    /// New transaction id, when the amendment replaced the order
    #[serde(default)]
    pub txid: Option<String>,
    /// Transaction id the amendment applied to
    #[serde(default)]
    pub originaltxid: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub descr: Option<OrderConfirmation>,
}

/// Receipt for a cancellation.
#[derive(Debug, Clone, Deserialize)]
pub struct CancelOrderReceipt {
    /// Number of orders canceled
    pub count: u32,
    /// Set when the cancellation is still pending
    #[serde(default)]
    pub pending: Option<bool>,
}

/// Parameters for the trade balance query.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TradeBalanceRequest {
    /// Base asset for the calculation, default ZUSD
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset: Option<String>,
}

impl TradeBalanceRequest {
    pub fn in_asset(asset: impl Into<String>) -> Self {
        Self {
            asset: Some(asset.into()),
        }
    }
}

/// Margin account overview.
#[derive(Debug, Clone, Deserialize)]
pub struct TradeBalance {
    /// Combined balance of all currencies
    #[serde(rename = "eb")]
    pub equivalent_balance: Decimal,
    /// Combined balance of all equity currencies
    #[serde(rename = "tb")]
    pub trade_balance: Decimal,
    /// Margin amount of open positions
    #[serde(rename = "m", default)]
    pub margin: Decimal,
    /// Unrealized net profit/loss of open positions
    #[serde(rename = "n", default)]
    pub unrealized_pnl: Decimal,
    /// Cost basis of open positions
    #[serde(rename = "c", default)]
    pub cost_basis: Decimal,
    /// Current floating valuation of open positions
    #[serde(rename = "v", default)]
    pub floating_valuation: Decimal,
    /// Trade balance plus unrealized profit/loss
    #[serde(rename = "e")]
    pub equity: Decimal,
    /// Equity minus initial margin
    #[serde(rename = "mf")]
    pub free_margin: Decimal,
    /// Percentage of equity over initial margin
    #[serde(rename = "ml", default)]
    pub margin_level: Option<Decimal>,
}

/// Parameters for the open orders query.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OpenOrdersRequest {
    /// Include trades in the output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trades: Option<bool>,
    /// Restrict to a user reference id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub userref: Option<i64>,
}

/// Open orders keyed by transaction id.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenOrders {
    pub open: HashMap<String, Order>,
}

/// Parameters for the closed orders query.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClosedOrdersRequest {
    /// Include trades in the output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trades: Option<bool>,
    /// Restrict to a user reference id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub userref: Option<i64>,
    /// Start Unix timestamp or order txid, exclusive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
    /// End Unix timestamp or order txid, inclusive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,
    /// Result offset for pagination
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ofs: Option<u32>,
    /// Which time to filter on: open, close, or both
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closetime: Option<String>,
}

/// Closed orders keyed by transaction id, with the total count.
#[derive(Debug, Clone, Deserialize)]
pub struct ClosedOrders {
    pub closed: HashMap<String, Order>,
    pub count: u32,
}

/// A resting or historical order.
#[derive(Debug, Clone, Deserialize)]
pub struct Order {
    /// Referral order transaction id
    #[serde(default)]
    pub refid: Option<String>,
    /// User reference id
    #[serde(default)]
    pub userref: Option<i64>,
    pub status: OrderStatus,
    /// Open timestamp
    pub opentm: f64,
    /// Close timestamp, set once the order leaves the book
    #[serde(default)]
    pub closetm: Option<f64>,
    pub descr: OrderDescription,
    /// Ordered volume
    pub vol: Decimal,
    /// Executed volume
    pub vol_exec: Decimal,
    pub cost: Decimal,
    pub fee: Decimal,
    /// Average execution price
    pub price: Decimal,
    #[serde(default)]
    pub misc: String,
    #[serde(default)]
    pub oflags: String,
    /// Reason the order left the book
    #[serde(default)]
    pub reason: Option<String>,
}

/// Descriptive block of an order.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderDescription {
    pub pair: String,
    #[serde(rename = "type")]
    pub side: BuySell,
    pub ordertype: OrderType,
    pub price: Decimal,
    pub price2: Decimal,
    pub leverage: String,
    /// Full order description text
    pub order: String,
    #[serde(default)]
    pub close: Option<String>,
}

/// Parameters for the trade volume query.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TradeVolumeRequest {
    /// Comma-delimited list of asset pairs for fee tier info
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pair: Option<String>,
    /// Include fee tier info in the output
    #[serde(rename = "fee-info", skip_serializing_if = "Option::is_none")]
    pub fee_info: Option<bool>,
}

impl TradeVolumeRequest {
    pub fn for_pairs(pairs: impl Into<String>) -> Self {
        Self {
            pair: Some(pairs.into()),
            fee_info: None,
        }
    }
}

/// 30-day trade volume with optional fee schedules.
#[derive(Debug, Clone, Deserialize)]
pub struct TradeVolume {
    /// Volume currency
    pub currency: String,
    /// Current discount volume
    pub volume: Decimal,
    /// Taker fee tiers keyed by pair, when requested
    #[serde(default)]
    pub fees: Option<HashMap<String, FeeTier>>,
    /// Maker fee tiers keyed by pair, for pairs on a maker/taker schedule
    #[serde(default)]
    pub fees_maker: Option<HashMap<String, FeeTier>>,
}

/// Fee tier info for one pair.
#[derive(Debug, Clone, Deserialize)]
pub struct FeeTier {
    /// Current fee in percent
    pub fee: Decimal,
    #[serde(default)]
    pub minfee: Option<Decimal>,
    #[serde(default)]
    pub maxfee: Option<Decimal>,
    /// Next tier's fee, absent at the lowest tier
    #[serde(default)]
    pub nextfee: Option<Decimal>,
    #[serde(default)]
    pub nextvolume: Option<Decimal>,
    #[serde(default)]
    pub tiervolume: Option<Decimal>,
}

/// Parameters for a withdrawal.
#[derive(Debug, Clone, Serialize)]
pub struct WithdrawRequest {
    /// Asset being withdrawn
    pub asset: String,
    /// Withdrawal key name, as set up on the account
    pub key: String,
    /// Amount to withdraw, including fees
    pub amount: Decimal,
}

impl WithdrawRequest {
    pub fn new(asset: impl Into<String>, key: impl Into<String>, amount: Decimal) -> Self {
        Self {
            asset: asset.into(),
            key: key.into(),
            amount,
        }
    }
}

/// Receipt for a withdrawal request.
#[derive(Debug, Clone, Deserialize)]
pub struct WithdrawReceipt {
    /// Reference id of the withdrawal
    pub refid: String,
}

//! Endpoint configuration and method name constants.

/// Default base URL for the REST API.
pub const KRAKEN_API_URL: &str = "https://api.kraken.com";

/// Default API version segment.
pub const KRAKEN_API_VERSION: u32 = 0;

/// Immutable endpoint configuration fixed at client construction.
///
/// Determines the public and private URL prefixes:
/// `{base_url}/{version}/public/{Method}` and
/// `{base_url}/{version}/private/{Method}`.
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    base_url: String,
    version: u32,
}

impl EndpointConfig {
    /// Create a configuration with the given base URL and version.
    ///
    /// A trailing slash on the base URL is trimmed so path concatenation
    /// stays uniform.
    pub fn new(base_url: impl Into<String>, version: u32) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url, version }
    }

    /// The configured base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The configured API version.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// URL path for a private method, e.g. `/0/private/AddOrder`.
    ///
    /// This exact string is part of the signed payload, so it is built in
    /// one place and reused for both signing and dispatch.
    pub fn private_path(&self, method: &str) -> String {
        format!("/{}/private/{}", self.version, method)
    }

    /// Full URL for a public method.
    pub fn public_url(&self, method: &str) -> String {
        format!("{}/{}/public/{}", self.base_url, self.version, method)
    }

    /// Full URL for a private method.
    pub fn private_url(&self, method: &str) -> String {
        format!("{}{}", self.base_url, self.private_path(method))
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self::new(KRAKEN_API_URL, KRAKEN_API_VERSION)
    }
}

/// Public method names (no authentication).
pub mod public {
    pub const TIME: &str = "Time";
    pub const SYSTEM_STATUS: &str = "SystemStatus";
    pub const ASSETS: &str = "Assets";
    pub const ASSET_PAIRS: &str = "AssetPairs";
    pub const TICKER: &str = "Ticker";
    pub const OHLC: &str = "OHLC";
    pub const DEPTH: &str = "Depth";
    pub const TRADES: &str = "Trades";
    pub const SPREAD: &str = "Spread";
}

/// Private method names (signed requests).
pub mod private {
    pub const BALANCE: &str = "Balance";
    pub const TRADE_BALANCE: &str = "TradeBalance";
    pub const OPEN_ORDERS: &str = "OpenOrders";
    pub const CLOSED_ORDERS: &str = "ClosedOrders";
    pub const TRADE_VOLUME: &str = "TradeVolume";
    pub const ADD_ORDER: &str = "AddOrder";
    pub const EDIT_ORDER: &str = "EditOrder";
    pub const CANCEL_ORDER: &str = "CancelOrder";
    pub const WITHDRAW: &str = "Withdraw";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prefixes() {
        let config = EndpointConfig::default();
        assert_eq!(
            config.public_url(public::TIME),
            "https://api.kraken.com/0/public/Time"
        );
        assert_eq!(
            config.private_url(private::ADD_ORDER),
            "https://api.kraken.com/0/private/AddOrder"
        );
        assert_eq!(config.private_path(private::ADD_ORDER), "/0/private/AddOrder");
    }

    #[test]
    fn test_custom_base_and_version() {
        let config = EndpointConfig::new("http://127.0.0.1:8080/", 2);
        assert_eq!(config.public_url("Time"), "http://127.0.0.1:8080/2/public/Time");
        assert_eq!(config.private_path("Balance"), "/2/private/Balance");
    }
}

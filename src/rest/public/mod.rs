//! Public endpoints (no authentication).

mod types;

pub use types::*;

use std::collections::HashMap;

use crate::error::ClientError;
use crate::rest::RestClient;
use crate::rest::endpoints::public;
use crate::rest::envelope::ResponseEnvelope;

impl RestClient {
    /// Get the server time.
    ///
    /// Useful for synchronizing local time and checking API availability.
    pub async fn server_time(&self) -> Result<ResponseEnvelope<ServerTime>, ClientError> {
        self.public_get(public::TIME).await
    }

    /// Get the current system status.
    pub async fn system_status(&self) -> Result<ResponseEnvelope<SystemStatus>, ClientError> {
        self.public_get(public::SYSTEM_STATUS).await
    }

    /// Get asset info, keyed by asset id (ZEUR, ZUSD, XXBT, ...).
    pub async fn assets(
        &self,
        request: Option<&AssetsRequest>,
    ) -> Result<ResponseEnvelope<HashMap<String, AssetInfo>>, ClientError> {
        match request {
            Some(req) => self.public_get_with(public::ASSETS, req).await,
            None => self.public_get(public::ASSETS).await,
        }
    }

    /// Get tradable asset pairs, keyed by pair id (XXBTZEUR, XXBTZUSD, ...).
    pub async fn asset_pairs(
        &self,
        request: Option<&AssetPairsRequest>,
    ) -> Result<ResponseEnvelope<HashMap<String, AssetPair>>, ClientError> {
        match request {
            Some(req) => self.public_get_with(public::ASSET_PAIRS, req).await,
            None => self.public_get(public::ASSET_PAIRS).await,
        }
    }

    /// Get ticker info for one or more comma-delimited pairs.
    pub async fn ticker(
        &self,
        pairs: &str,
    ) -> Result<ResponseEnvelope<HashMap<String, TickerInfo>>, ClientError> {
        #[derive(serde::Serialize)]
        struct Params<'a> {
            pair: &'a str,
        }
        self.public_get_with(public::TICKER, &Params { pair: pairs })
            .await
    }

    /// Get OHLC frames for a pair.
    ///
    /// The `last` field of the page is the `since` value for the next poll
    /// of committed frames.
    pub async fn ohlc(&self, request: &OhlcRequest) -> Result<ResponseEnvelope<OhlcPage>, ClientError> {
        self.public_get_with(public::OHLC, request).await
    }

    /// Get the order book for a pair.
    pub async fn order_book(
        &self,
        request: &DepthRequest,
    ) -> Result<ResponseEnvelope<HashMap<String, OrderBook>>, ClientError> {
        self.public_get_with(public::DEPTH, request).await
    }

    /// Get recent trades for a pair.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use kraken_rest::rest::{RestClient, TradesRequest};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = RestClient::new()?;
    ///     let page = client
    ///         .trades(&TradesRequest::new("XXBTZUSD"))
    ///         .await?
    ///         .into_result()?;
    ///     for trade in page.for_pair("XXBTZUSD") {
    ///         println!("{} {} @ {}", trade.side.as_str(), trade.volume, trade.price);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn trades(
        &self,
        request: &TradesRequest,
    ) -> Result<ResponseEnvelope<TradesPage>, ClientError> {
        self.public_get_with(public::TRADES, request).await
    }

    /// Get recent spread data for a pair.
    pub async fn spread(
        &self,
        request: &SpreadRequest,
    ) -> Result<ResponseEnvelope<SpreadPage>, ClientError> {
        self.public_get_with(public::SPREAD, request).await
    }
}

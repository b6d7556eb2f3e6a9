//! Private endpoints (signed requests).
//!
//! All methods here require credentials on the client. Credential and
//! required-argument checks run before any network I/O, so a rejected call
//! never consumes a nonce.

mod types;

pub use types::*;

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::error::ClientError;
use crate::rest::RestClient;
use crate::rest::endpoints::private;
use crate::rest::envelope::ResponseEnvelope;

#[derive(serde::Serialize)]
struct NoParams {}

impl RestClient {
    /// Get the account balance for all assets.
    pub async fn balance(
        &self,
    ) -> Result<ResponseEnvelope<HashMap<String, Decimal>>, ClientError> {
        self.private_post(private::BALANCE, &NoParams {}).await
    }

    /// Get the margin account overview.
    pub async fn trade_balance(
        &self,
        request: Option<&TradeBalanceRequest>,
    ) -> Result<ResponseEnvelope<TradeBalance>, ClientError> {
        match request {
            Some(req) => self.private_post(private::TRADE_BALANCE, req).await,
            None => self.private_post(private::TRADE_BALANCE, &NoParams {}).await,
        }
    }

    /// Get open orders.
    pub async fn open_orders(
        &self,
        request: Option<&OpenOrdersRequest>,
    ) -> Result<ResponseEnvelope<OpenOrders>, ClientError> {
        match request {
            Some(req) => self.private_post(private::OPEN_ORDERS, req).await,
            None => self.private_post(private::OPEN_ORDERS, &NoParams {}).await,
        }
    }

    /// Get closed orders.
    pub async fn closed_orders(
        &self,
        request: Option<&ClosedOrdersRequest>,
    ) -> Result<ResponseEnvelope<ClosedOrders>, ClientError> {
        match request {
            Some(req) => self.private_post(private::CLOSED_ORDERS, req).await,
            None => self.private_post(private::CLOSED_ORDERS, &NoParams {}).await,
        }
    }

    /// Get 30-day trade volume and, optionally, fee tiers.
    pub async fn trade_volume(
        &self,
        request: Option<&TradeVolumeRequest>,
    ) -> Result<ResponseEnvelope<TradeVolume>, ClientError> {
        match request {
            Some(req) => self.private_post(private::TRADE_VOLUME, req).await,
            None => self.private_post(private::TRADE_VOLUME, &NoParams {}).await,
        }
    }

    /// Place a new order.
    ///
    /// Fails with [`ClientError::MissingArguments`] naming every unset
    /// required field (`pair`, `type`, `ordertype`, `volume`) before any
    /// network call is made.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use kraken_rest::auth::Credentials;
    /// use kraken_rest::rest::{AddOrderRequest, RestClient};
    /// use kraken_rest::types::BuySell;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = RestClient::builder()
    ///         .credentials(Credentials::from_env()?)
    ///         .build()?;
    ///     let order = AddOrderRequest::limit(
    ///         "XBTUSD",
    ///         BuySell::Buy,
    ///         "1.25".parse()?,
    ///         "37500".parse()?,
    ///     );
    ///     let receipt = client.add_order(&order).await?.into_result()?;
    ///     println!("placed: {:?}", receipt.txid);
    ///     Ok(())
    /// }
    /// ```
    pub async fn add_order(
        &self,
        request: &AddOrderRequest,
    ) -> Result<ResponseEnvelope<AddOrderReceipt>, ClientError> {
        let missing = request.missing_required();
        if !missing.is_empty() {
            return Err(ClientError::MissingArguments {
                endpoint: private::ADD_ORDER,
                keys: missing,
            });
        }
        self.private_post(private::ADD_ORDER, request).await
    }

    /// Amend an open order.
    ///
    /// Fails with [`ClientError::MissingArguments`] naming every unset
    /// required field (`txid`, `pair`) before any network call is made.
    pub async fn edit_order(
        &self,
        request: &EditOrderRequest,
    ) -> Result<ResponseEnvelope<EditOrderReceipt>, ClientError> {
        let missing = request.missing_required();
        if !missing.is_empty() {
            return Err(ClientError::MissingArguments {
                endpoint: private::EDIT_ORDER,
                keys: missing,
            });
        }
        self.private_post(private::EDIT_ORDER, request).await
    }

    /// Cancel an open order by transaction id.
    pub async fn cancel_order(
        &self,
        txid: &str,
    ) -> Result<ResponseEnvelope<CancelOrderReceipt>, ClientError> {
        #[derive(serde::Serialize)]
        struct Params<'a> {
            txid: &'a str,
        }
        self.private_post(private::CANCEL_ORDER, &Params { txid })
            .await
    }

    /// Withdraw funds to a preconfigured withdrawal key.
    pub async fn withdraw(
        &self,
        request: &WithdrawRequest,
    ) -> Result<ResponseEnvelope<WithdrawReceipt>, ClientError> {
        self.private_post(private::WITHDRAW, request).await
    }
}

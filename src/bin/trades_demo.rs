//! Prints Kraken XBT/USD and XBT/EUR trades on the command line, with
//! optional audible (text-to-speech) price alerts.
//!
//! Run: cargo run --bin trades_demo
//!
//! Polls the public Trades endpoint for each currency in turn, keeping the
//! returned `last` cursor so only new trades are printed. Alert thresholds
//! ratchet outward after each trigger so one price excursion does not fire
//! forever. The loop runs until the process is killed.

use std::collections::HashMap;
use std::process::Command;
use std::time::Duration;

use colored::Colorize;
use rust_decimal::Decimal;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

use kraken_rest::error::Severity;
use kraken_rest::rest::{RestClient, TradeRecord, TradeSide, TradesRequest};

/// Seconds to wait between calls, to stay inside the public call limit.
/// Tier 3 accounts can lower this to 4, tier 4 accounts to 2.
const CALL_LIMIT_SECS: u64 = 6;

/// After each alert the threshold moves outward to the latest price or the
/// old threshold scaled by this coefficient, whichever is further out.
const ALERT_ADJUST_COEFF: &str = "1.001";

/// Currencies to watch, their Kraken pair names and display glyphs.
const CURRENCIES: [Currency; 2] = [
    Currency {
        code: "USD",
        word: "dollars",
        symbol: '$',
        pair: "XXBTZUSD",
        audible_trades: false,
    },
    Currency {
        code: "EUR",
        word: "euros",
        symbol: '€',
        pair: "XXBTZEUR",
        audible_trades: false,
    },
];

#[derive(Clone, Copy)]
struct Currency {
    code: &'static str,
    word: &'static str,
    symbol: char,
    pair: &'static str,
    audible_trades: bool,
}

/// Per-session price alert state.
///
/// Owns the thresholds for every currency; nothing here is global, so two
/// feeds could run side by side with independent alert settings.
struct AlertTracker {
    thresholds: HashMap<&'static str, Thresholds>,
    coeff: Decimal,
}

#[derive(Clone, Copy, Default)]
struct Thresholds {
    below: Option<Decimal>,
    above: Option<Decimal>,
}

enum Crossing {
    Below,
    Above,
}

struct AlertEvent {
    crossing: Crossing,
    old_threshold: Decimal,
    new_threshold: Decimal,
}

impl AlertTracker {
    fn new(coeff: Decimal) -> Self {
        let mut thresholds = HashMap::new();
        // Alert settings per currency; None disables that side.
        thresholds.insert("USD", Thresholds::default());
        thresholds.insert(
            "EUR",
            Thresholds {
                below: Some(Decimal::from(98_000)),
                above: Some(Decimal::from(102_000)),
            },
        );
        Self { thresholds, coeff }
    }

    /// Check a price against the currency's thresholds, ratcheting the
    /// crossed threshold outward so the next alert needs a further move.
    fn check(&mut self, currency: &str, price: Decimal) -> Option<AlertEvent> {
        let entry = self.thresholds.get_mut(currency)?;
        match (entry.below, entry.above) {
            (Some(below), _) if price < below => {
                let updated = (below / self.coeff).min(price);
                entry.below = Some(updated);
                Some(AlertEvent {
                    crossing: Crossing::Below,
                    old_threshold: below,
                    new_threshold: updated,
                })
            }
            (_, Some(above)) if price > above => {
                let updated = (above * self.coeff).max(price);
                entry.above = Some(updated);
                Some(AlertEvent {
                    crossing: Crossing::Above,
                    old_threshold: above,
                    new_threshold: updated,
                })
            }
            _ => None,
        }
    }
}

/// The polling loop and its cursor state.
struct TradeFeed {
    client: RestClient,
    cursors: HashMap<&'static str, String>,
    alerts: AlertTracker,
    utc_offset: UtcOffset,
}

impl TradeFeed {
    fn new(client: RestClient) -> Self {
        let coeff: Decimal = ALERT_ADJUST_COEFF.parse().unwrap_or(Decimal::ONE);
        Self {
            client,
            cursors: HashMap::new(),
            alerts: AlertTracker::new(coeff),
            utc_offset: UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC),
        }
    }

    async fn run(mut self) {
        loop {
            for currency in CURRENCIES {
                self.poll(currency).await;
                tokio::time::sleep(Duration::from_secs(CALL_LIMIT_SECS)).await;
            }
        }
    }

    async fn poll(&mut self, currency: Currency) {
        let mut request = TradesRequest::new(currency.pair);
        let had_cursor = self.cursors.contains_key(currency.code);
        if let Some(cursor) = self.cursors.get(currency.code) {
            request = request.since(cursor.clone());
        }

        let envelope = match self.client.trades(&request).await {
            Ok(envelope) => envelope,
            Err(err) => {
                tracing::warn!(%err, currency = currency.code, "trades query failed");
                println!("\r\n{err}\r\n");
                return;
            }
        };

        if !envelope.is_success() {
            for message in envelope.errors() {
                let severity = match message.severity {
                    Severity::Error => "Error",
                    Severity::Warning => "Warning",
                };
                println!(
                    "{severity}: '{} {}' in {} trades query!",
                    message.category.get(1..).unwrap_or_default(),
                    message.reason.to_lowercase(),
                    currency.code
                );
            }
            return;
        }

        let Some(page) = envelope.result else {
            return;
        };

        let trades = page.for_pair(currency.pair);
        // Without a cursor the page holds the last thousand trades; show
        // just the newest and let the cursor take it from there.
        let to_display: &[TradeRecord] = if had_cursor {
            trades
        } else {
            trades.split_last().map(|(last, _)| std::slice::from_ref(last)).unwrap_or(&[])
        };

        for trade in to_display {
            self.output_trade(currency, trade);
        }
        self.cursors.insert(currency.code, page.last);
    }

    fn output_trade(&mut self, currency: Currency, trade: &TradeRecord) {
        self.print_trade(currency, trade);
        if currency.audible_trades {
            speak(&spoken_trade(currency, trade));
        }
        self.run_price_alert(currency, trade);
    }

    fn print_trade(&self, currency: Currency, trade: &TradeRecord) {
        let indent = if currency.code == "EUR" { " ".repeat(48) } else { String::new() };
        let side_word = match trade.side {
            TradeSide::Buy => "buy ".green(),
            TradeSide::Sell => "sell".red(),
        };
        let clock = self.clock_time(trade.time);
        let volume = format!("{:>12}", trade.volume.round_dp(8));
        let volume = match trade.side {
            TradeSide::Buy => volume.as_str().green(),
            TradeSide::Sell => volume.as_str().red(),
        };
        println!(
            "{indent}{}  {side_word}  {} {} {volume} ฿  {}",
            clock.as_str().dimmed(),
            currency.symbol,
            trade.price.round_dp(1),
            trade.kind.as_str()
        );
    }

    fn run_price_alert(&mut self, currency: Currency, trade: &TradeRecord) {
        let Some(event) = self.alerts.check(currency.code, trade.price) else {
            return;
        };
        let direction = match event.crossing {
            Crossing::Below => "below",
            Crossing::Above => "above",
        };
        let alert = format!(
            "In {}, the price of {} is {direction} your threshold of {} with the {} of {} bitcoin.",
            currency.word,
            trade.price,
            event.old_threshold.round_dp(2),
            trade.side.as_str(),
            spoken_volume(trade.volume),
        );
        println!(
            "\r\n{}\r\nThe price threshold has been updated from {} to {}.\r\n",
            alert.as_str().yellow().bold(),
            event.old_threshold.round_dp(2),
            event.new_threshold.round_dp(2)
        );
        speak(&alert);
    }

    fn clock_time(&self, unixtime: f64) -> String {
        let format = format_description!("[hour]:[minute]:[second]");
        OffsetDateTime::from_unix_timestamp(unixtime as i64)
            .map(|t| t.to_offset(self.utc_offset))
            .ok()
            .and_then(|t| t.format(format).ok())
            .unwrap_or_else(|| "--:--:--".to_string())
    }
}

fn spoken_trade(currency: Currency, trade: &TradeRecord) -> String {
    format!(
        "{}: {}, {} bitcoin, at {}",
        currency.word,
        trade.side.as_str(),
        spoken_volume(trade.volume),
        trade.price.round_dp(1)
    )
}

fn spoken_volume(volume: Decimal) -> String {
    let rounded = volume.round_dp(1);
    if rounded < Decimal::ONE {
        "less than one".to_string()
    } else {
        rounded.normalize().to_string()
    }
}

/// Best-effort text-to-speech via the system `say` command.
fn speak(text: &str) {
    if let Err(err) = Command::new("say").arg(text).spawn() {
        tracing::debug!(%err, "text-to-speech unavailable");
    }
}

#[tokio::main]
async fn main() -> kraken_rest::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let client = RestClient::new()?;
    TradeFeed::new(client).run().await;
    Ok(())
}

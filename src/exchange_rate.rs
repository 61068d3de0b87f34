use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Currencies kept from a provider response.
pub const TRACKED_CURRENCIES: [&str; 2] = ["USD", "EUR"];

/// One element of the provider's `exchangeRate` list.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRateEntry {
    pub currency: String,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub sale_rate: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub purchase_rate: Option<Decimal>,
}

/// Reads a rate as written by the provider, keeping its scale (`27.0` stays `27.0`).
/// Anything that is not a number or a numeric string becomes `None`.
fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match Value::deserialize(deserializer)? {
        Value::Number(number) => number.to_string(),
        Value::String(text) => text,
        _ => return Ok(None),
    };

    Ok(Decimal::from_str(text.trim())
        .or_else(|_| Decimal::from_scientific(text.trim()))
        .ok())
}

impl ExchangeRateEntry {
    pub fn is_tracked(&self) -> bool {
        TRACKED_CURRENCIES.contains(&self.currency.as_str())
    }

    pub fn rate(&self) -> Rate {
        Rate {
            sale: self.sale_rate,
            purchase: self.purchase_rate,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rate {
    pub sale: Option<Decimal>,
    pub purchase: Option<Decimal>,
}

/// Tracked currency rates for a single `DD.MM.YYYY` date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateSnapshot {
    pub date: String,
    pub rates: BTreeMap<String, Rate>,
}

impl RateSnapshot {
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            rates: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, currency: impl Into<String>, rate: Rate) {
        self.rates.insert(currency.into(), rate);
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

struct OptionalDecimal(Option<Decimal>);

impl fmt::Display for OptionalDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{value}"),
            None => f.write_str("None"),
        }
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"sale\": {}, \"purchase\": {}}}",
            OptionalDecimal(self.sale),
            OptionalDecimal(self.purchase)
        )
    }
}

impl fmt::Display for RateSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{\"{}\": {{", self.date)?;
        for (i, (currency, rate)) in self.rates.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "\"{currency}\": {rate}")?;
        }
        f.write_str("}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn entry_reads_provider_fields() {
        let entry: ExchangeRateEntry = serde_json::from_str(
            r#"{"baseCurrency":"UAH","currency":"USD","saleRateNB":26.9,"purchaseRateNB":26.9,"saleRate":27.5,"purchaseRate":27.0}"#,
        )
        .unwrap();

        assert_eq!(entry.currency, "USD");
        assert_eq!(
            entry.rate(),
            Rate {
                sale: Some(dec("27.5")),
                purchase: Some(dec("27.0")),
            }
        );
        assert!(entry.is_tracked());
    }

    #[test]
    fn entry_without_commercial_rates() {
        let entry: ExchangeRateEntry =
            serde_json::from_str(r#"{"currency":"PLN","saleRateNB":7.1}"#).unwrap();

        assert_eq!(entry.rate(), Rate::default());
        assert!(!entry.is_tracked());
    }

    #[test]
    fn unreadable_rate_becomes_none() {
        let entry: ExchangeRateEntry = serde_json::from_str(
            r#"{"currency":"USD","saleRate":"n/a","purchaseRate":27.0}"#,
        )
        .unwrap();

        assert_eq!(entry.currency, "USD");
        assert_eq!(entry.rate().sale, None);
        assert_eq!(entry.rate().purchase, Some(dec("27.0")));

        let entry: ExchangeRateEntry =
            serde_json::from_str(r#"{"currency":"EUR","saleRate":null,"purchaseRate":"29.5"}"#)
                .unwrap();
        assert_eq!(
            entry.rate(),
            Rate {
                sale: None,
                purchase: Some(dec("29.5")),
            }
        );
    }

    #[test]
    fn provider_scale_is_kept() {
        let entry: ExchangeRateEntry =
            serde_json::from_str(r#"{"currency":"USD","saleRate":27.5,"purchaseRate":27.0}"#)
                .unwrap();

        assert_eq!(
            entry.rate().to_string(),
            r#"{"sale": 27.5, "purchase": 27.0}"#
        );
    }

    #[test]
    fn snapshot_display() {
        let mut snapshot = RateSnapshot::new("01.01.2024");
        snapshot.insert(
            "USD",
            Rate {
                sale: Some(dec("27.5")),
                purchase: None,
            },
        );
        snapshot.insert(
            "EUR",
            Rate {
                sale: Some(dec("30.1")),
                purchase: Some(dec("29.5")),
            },
        );

        assert_eq!(
            snapshot.to_string(),
            r#"{"01.01.2024": {"EUR": {"sale": 30.1, "purchase": 29.5}, "USD": {"sale": 27.5, "purchase": None}}}"#
        );
    }
}

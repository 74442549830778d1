//! Product record as served by the storefront listing endpoints.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::id::ProductId;
use crate::number::parse_lenient;

/// A catalog product as returned by `/load-more-top-rated`.
///
/// Read-only on the client. Prices are in the smallest currency unit the
/// backend uses (VND has no minor unit).
///
/// Numeric fields accept JSON numbers, numeric strings (decimal columns are
/// serialized as `"20000.00"`) and `null`; anything unreadable becomes 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(default)]
    pub name: String,
    /// Delimited list of image URLs, e.g. `"['https://a.jpg', 'https://b.jpg']"`.
    #[serde(default)]
    pub images: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub list_price: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub discount: f64,
    #[serde(default, deserialize_with = "lenient_rating")]
    pub average_rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub review_count: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub quantity_sold: u64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

impl RawNumber {
    fn value(self) -> Option<f64> {
        match self {
            RawNumber::Number(v) => Some(v).filter(|v| v.is_finite()),
            RawNumber::Text(s) => parse_lenient(&s),
            RawNumber::Other(_) => None,
        }
    }
}

fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(RawNumber::deserialize(deserializer)?.value().unwrap_or(0.0))
}

fn lenient_rating<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(RawNumber::deserialize(deserializer)?.value())
}

fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = lenient_amount(deserializer)?;
    Ok(value.max(0.0).round() as u64)
}

impl Product {
    /// Check the pricing invariant `list_price >= discount >= 0`.
    pub fn validate(&self) -> DomainResult<()> {
        if !self.list_price.is_finite() || !self.discount.is_finite() {
            return Err(DomainError::validation(format!(
                "product {}: non-finite price",
                self.id
            )));
        }
        if self.discount < 0.0 {
            return Err(DomainError::invariant(format!(
                "product {}: negative discount {}",
                self.id, self.discount
            )));
        }
        if self.discount > self.list_price {
            return Err(DomainError::invariant(format!(
                "product {}: discount {} exceeds list price {}",
                self.id, self.discount, self.list_price
            )));
        }
        Ok(())
    }

    /// Discount as a whole percentage of the list price.
    ///
    /// `None` when there is no discount or the list price cannot carry one.
    pub fn discount_percent(&self) -> Option<i64> {
        if self.discount <= 0.0 || self.list_price <= 0.0 {
            return None;
        }
        let percent = (self.discount / self.list_price * 100.0).round();
        percent.is_finite().then_some(percent as i64)
    }

    /// Price after discount.
    pub fn sale_price(&self) -> f64 {
        self.list_price - self.discount
    }

    /// First URL of the `images` list, stripped of list punctuation.
    pub fn primary_image(&self) -> &str {
        let first = self.images.split(',').next().unwrap_or_default();
        first.trim_matches(|c: char| c.is_whitespace() || matches!(c, '[' | ']' | '\'' | '"'))
    }
}

use serde::{Deserialize, Serialize};

use crate::ids::{Expandable, opt_string_or_number, string_or_number};
use crate::timestamp::Timestamp;

/// Stripe-style nested list (`{"object": "list", "data": [...]}`). The
/// platform API sends the bare array instead; both decode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListObject<T> {
    pub data: Vec<T>,
}

impl<'de, T> Deserialize<'de> for ListObject<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Shape<T> {
            Bare(Vec<T>),
            Wrapped {
                #[serde(default = "Vec::new")]
                data: Vec<T>,
            },
        }

        let data = match Shape::<T>::deserialize(deserializer)? {
            Shape::Bare(data) | Shape::Wrapped { data } => data,
        };
        Ok(Self { data })
    }
}

impl<T> Default for ListObject<T> {
    fn default() -> Self {
        Self { data: Vec::new() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Customer {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub currency: Option<String>,
    pub delinquent: Option<bool>,
    pub created: Option<Timestamp>,
}

impl Customer {
    /// Name, falling back to email, for tables and lookups.
    pub fn display_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .or(self.email.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recurring {
    pub interval: Option<String>,
    pub interval_count: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Price {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub product: Option<Expandable>,
    pub nickname: Option<String>,
    pub unit_amount: Option<i64>,
    pub currency: Option<String>,
    pub recurring: Option<Recurring>,
    pub active: Option<bool>,
    #[serde(rename = "type")]
    pub price_type: Option<String>,
    pub created: Option<Timestamp>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub active: Option<bool>,
    pub default_price: Option<Expandable>,
    pub created: Option<Timestamp>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubscriptionItem {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub price: Option<Price>,
    pub quantity: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Subscription {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub customer: Option<Expandable>,
    /// Flat variant used by the platform API.
    #[serde(deserialize_with = "opt_string_or_number")]
    pub customer_id: Option<String>,
    pub status: Option<String>,
    pub items: Option<ListObject<SubscriptionItem>>,
    pub current_period_start: Option<Timestamp>,
    pub current_period_end: Option<Timestamp>,
    pub cancel_at_period_end: Option<bool>,
    pub canceled_at: Option<Timestamp>,
    pub trial_end: Option<Timestamp>,
    pub created: Option<Timestamp>,
}

impl Subscription {
    pub fn customer_ref(&self) -> Option<&str> {
        self.customer
            .as_ref()
            .map(Expandable::id)
            .or(self.customer_id.as_deref())
            .filter(|id| !id.is_empty())
    }

    pub fn first_price(&self) -> Option<&Price> {
        self.items
            .as_ref()?
            .data
            .iter()
            .find_map(|item| item.price.as_ref())
    }
}

/// How a coupon discounts an invoice.
#[derive(Debug, Clone, PartialEq)]
pub enum Discount {
    Percent(f64),
    Amount { amount: i64, currency: String },
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Coupon {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: Option<String>,
    pub percent_off: Option<f64>,
    pub amount_off: Option<i64>,
    pub currency: Option<String>,
    pub duration: Option<String>,
    pub duration_in_months: Option<u32>,
    pub times_redeemed: Option<u64>,
    pub max_redemptions: Option<u64>,
    pub redeem_by: Option<Timestamp>,
    pub valid: Option<bool>,
    pub created: Option<Timestamp>,
}

impl Coupon {
    /// `percent_off` wins when both are present, matching the API's own precedence.
    pub fn discount(&self) -> Discount {
        if let Some(percent) = self.percent_off {
            return Discount::Percent(percent);
        }
        match (self.amount_off, self.currency.as_deref()) {
            (Some(amount), Some(currency)) => Discount::Amount {
                amount,
                currency: currency.to_string(),
            },
            _ => Discount::Unknown,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromotionCode {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub code: Option<String>,
    pub coupon: Option<Expandable>,
    pub active: Option<bool>,
    pub times_redeemed: Option<u64>,
    pub max_redemptions: Option<u64>,
    pub expires_at: Option<Timestamp>,
    pub created: Option<Timestamp>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceItem {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub customer: Option<Expandable>,
    pub amount: Option<i64>,
    pub currency: Option<String>,
    pub description: Option<String>,
    pub invoice: Option<Expandable>,
    pub quantity: Option<u64>,
    /// Stripe names the creation time `date` on invoice items.
    #[serde(alias = "created")]
    pub date: Option<Timestamp>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Card {
    pub brand: Option<String>,
    pub last4: Option<String>,
    pub exp_month: Option<u32>,
    pub exp_year: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentMethod {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(rename = "type")]
    pub method_type: Option<String>,
    pub customer: Option<Expandable>,
    pub card: Option<Card>,
    pub created: Option<Timestamp>,
}

//! Stripe API wire types.
//!
//! Response objects deserialized from Stripe JSON. Identifiers are opaque
//! strings issued by Stripe; this crate never generates them. Fields that
//! are not essential to callers default when absent, so a response missing
//! them still decodes. The subscription period bounds are required and
//! decode straight from Unix epoch seconds into UTC datetimes.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use subpay_core::SubscriptionSummary;

/// Stripe customer object.
#[derive(Debug, Clone, Deserialize)]
pub struct Customer {
    /// Stripe customer ID.
    pub id: String,
    /// Customer email.
    #[serde(default)]
    pub email: Option<String>,
    /// Customer name.
    #[serde(default)]
    pub name: Option<String>,
    /// Metadata attached to the customer.
    #[serde(default)]
    pub metadata: serde_json::Value,
    /// Created timestamp (Unix).
    #[serde(default)]
    pub created: i64,
}

/// Stripe product object.
#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    /// Stripe product ID.
    pub id: String,
    /// Product name.
    #[serde(default)]
    pub name: Option<String>,
    /// Whether the product is active.
    #[serde(default)]
    pub active: bool,
    /// Metadata attached to the product.
    #[serde(default)]
    pub metadata: serde_json::Value,
    /// Created timestamp (Unix).
    #[serde(default)]
    pub created: i64,
}

/// Stripe price object.
#[derive(Debug, Clone, Deserialize)]
pub struct Price {
    /// Stripe price ID.
    pub id: String,
    /// Three-letter ISO currency code.
    #[serde(default)]
    pub currency: String,
    /// Amount in the smallest currency unit (cents for USD).
    #[serde(default)]
    pub unit_amount: Option<i64>,
    /// Recurring billing settings.
    #[serde(default)]
    pub recurring: Option<Recurring>,
    /// ID of the product this price belongs to.
    #[serde(default)]
    pub product: Option<String>,
    /// Metadata attached to the price.
    #[serde(default)]
    pub metadata: serde_json::Value,
}

/// Recurring billing settings on a price.
#[derive(Debug, Clone, Deserialize)]
pub struct Recurring {
    /// Billing interval ("day", "week", "month" or "year").
    pub interval: String,
    /// Number of intervals between billings.
    #[serde(default)]
    pub interval_count: Option<i64>,
}

/// Stripe Checkout session object.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    /// Session ID.
    pub id: String,
    /// Checkout URL to redirect the user to.
    #[serde(default)]
    pub url: Option<String>,
    /// Customer ID attached to the session.
    #[serde(default)]
    pub customer: Option<String>,
    /// Subscription created by the session, present once checkout completes.
    #[serde(default)]
    pub subscription: Option<String>,
    /// Payment status.
    #[serde(default)]
    pub payment_status: Option<String>,
    /// Session status.
    #[serde(default)]
    pub status: Option<String>,
    /// Metadata.
    #[serde(default)]
    pub metadata: serde_json::Value,
}

/// Stripe subscription object.
///
/// The period bounds arrive as Unix timestamps and deserialize directly
/// into UTC datetimes; every surface of these values downstream uses that
/// single conversion.
#[derive(Debug, Clone, Deserialize)]
pub struct Subscription {
    /// Subscription ID.
    pub id: String,
    /// Customer the subscription belongs to.
    #[serde(default)]
    pub customer: Option<String>,
    /// Subscription status (e.g. "active", "canceled").
    pub status: String,
    /// Start of the current billing period (UTC).
    #[serde(with = "chrono::serde::ts_seconds")]
    pub current_period_start: DateTime<Utc>,
    /// End of the current billing period (UTC).
    #[serde(with = "chrono::serde::ts_seconds")]
    pub current_period_end: DateTime<Utc>,
    /// Whether the subscription cancels at period end instead of renewing.
    pub cancel_at_period_end: bool,
    /// When the subscription was canceled, if it was (UTC).
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub canceled_at: Option<DateTime<Utc>>,
    /// The plan the subscription is billed on.
    #[serde(default)]
    pub plan: Option<Plan>,
    /// Metadata.
    #[serde(default)]
    pub metadata: serde_json::Value,
}

/// Stripe plan object attached to a subscription.
#[derive(Debug, Clone, Deserialize)]
pub struct Plan {
    /// Stripe plan ID.
    pub id: String,
    /// Amount in the smallest currency unit.
    #[serde(default)]
    pub amount: Option<i64>,
    /// Three-letter ISO currency code.
    #[serde(default)]
    pub currency: String,
    /// Billing interval.
    #[serde(default)]
    pub interval: String,
    /// ID of the product this plan belongs to.
    #[serde(default)]
    pub product: Option<String>,
}

/// Stripe list response wrapper.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeList<T> {
    /// Object type (always "list").
    pub object: String,
    /// Data items.
    pub data: Vec<T>,
    /// Whether there are more items.
    pub has_more: bool,
    /// URL for the list endpoint.
    #[serde(default)]
    pub url: Option<String>,
}

/// Stripe API error response.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorResponse {
    /// Error details.
    pub error: StripeErrorDetail,
}

/// Stripe error detail.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorDetail {
    /// Error type.
    #[serde(rename = "type")]
    pub error_type: String,
    /// Error message.
    pub message: String,
    /// Error code.
    #[serde(default)]
    pub code: Option<String>,
    /// Parameter that caused the error.
    #[serde(default)]
    pub param: Option<String>,
}

impl From<&Subscription> for SubscriptionSummary {
    fn from(sub: &Subscription) -> Self {
        Self {
            status: sub.status.clone(),
            current_period_start: sub.current_period_start,
            current_period_end: sub.current_period_end,
            cancel_at_period_end: sub.cancel_at_period_end,
        }
    }
}

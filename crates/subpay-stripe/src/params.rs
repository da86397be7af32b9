//! Request parameters for Stripe operations.
//!
//! Each create/cancel operation takes one of these structs. Defaults match
//! the values the operations fall back to when a caller leaves a field
//! alone; empty strings and empty metadata are omitted from the request
//! form entirely.

use std::collections::BTreeMap;

/// Parameters for creating a customer.
#[derive(Debug, Clone, Default)]
pub struct CreateCustomer {
    /// Customer name. Omitted when empty.
    pub name: String,
    /// Customer email. Omitted when empty.
    pub email: String,
    /// Metadata to attach to the customer.
    pub metadata: BTreeMap<String, String>,
}

/// Parameters for creating a product.
#[derive(Debug, Clone, Default)]
pub struct CreateProduct {
    /// Product name. Omitted when empty.
    pub name: String,
    /// Metadata to attach to the product.
    pub metadata: BTreeMap<String, String>,
}

/// Parameters for creating a recurring price.
///
/// `product` has no default: a price cannot exist without one, and the
/// client rejects the call before any request is made if it is missing.
#[derive(Debug, Clone)]
pub struct CreatePrice {
    /// Three-letter ISO currency code.
    pub currency: String,
    /// Amount in the smallest currency unit (cents for USD).
    pub unit_amount: i64,
    /// Billing interval ("day", "week", "month" or "year").
    pub interval: String,
    /// ID of the product the price belongs to. Required.
    pub product: Option<String>,
    /// Metadata to attach to the price.
    pub metadata: BTreeMap<String, String>,
}

impl Default for CreatePrice {
    fn default() -> Self {
        Self {
            currency: "usd".to_string(),
            unit_amount: 9999,
            interval: "month".to_string(),
            product: None,
            metadata: BTreeMap::new(),
        }
    }
}

/// Parameters for canceling a subscription.
#[derive(Debug, Clone)]
pub struct CancelSubscription {
    /// Free-form comment recorded with the cancellation.
    pub reason: String,
    /// Cancellation feedback category (e.g. "other", "too_expensive").
    pub feedback: String,
    /// Cancel at the end of the current period instead of immediately.
    pub at_period_end: bool,
}

impl Default for CancelSubscription {
    fn default() -> Self {
        Self {
            reason: String::new(),
            feedback: "other".to_string(),
            at_period_end: false,
        }
    }
}

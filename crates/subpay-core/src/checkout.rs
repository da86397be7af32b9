//! Resolved checkout records.

use serde::{Deserialize, Serialize};

use crate::subscription::SubscriptionSummary;

/// The combined record resolved from a completed Checkout session.
///
/// Ties together the three provider identifiers a caller needs after a
/// checkout completes, plus the normalized subscription fields. The summary
/// is flattened on serialization, so the record stays the flat mapping its
/// consumers expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutPlan {
    /// Customer the checkout session was created for.
    pub customer_id: String,

    /// Plan the resulting subscription is billed on.
    pub plan_id: String,

    /// Subscription created by the checkout.
    pub subscription_id: String,

    /// Normalized subscription fields, serialized inline.
    #[serde(flatten)]
    pub subscription: SubscriptionSummary,
}

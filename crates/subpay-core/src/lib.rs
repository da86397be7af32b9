//! Core types for subpay.
//!
//! This crate provides the wire-independent records shared across the
//! subpay workspace:
//!
//! - **Subscriptions**: [`SubscriptionSummary`], the normalized view of a
//!   billing subscription
//! - **Checkout**: [`CheckoutPlan`], the combined record resolved from a
//!   completed Checkout session
//!
//! All timestamps are UTC. Period bounds originate as Unix epoch seconds on
//! the wire and are carried here as [`chrono::DateTime`] values, so every
//! consumer sees the same instant regardless of local timezone.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod checkout;
pub mod subscription;

pub use checkout::CheckoutPlan;
pub use subscription::SubscriptionSummary;

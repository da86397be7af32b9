//! Stripe client for subpay.
//!
//! This crate provides a thin convenience layer over the Stripe REST API
//! for subscription billing: customers, products, recurring prices,
//! Checkout sessions, and subscription lifecycle. Responses come back as
//! full typed records; the normalized views live in [`subpay_core`].
//!
//! # Example
//!
//! ```no_run
//! use subpay_stripe::{CreatePrice, CreateProduct, StripeClient};
//!
//! # async fn example() -> Result<(), subpay_stripe::StripeError> {
//! // Reads STRIPE_SECRET_KEY from the environment.
//! let client = StripeClient::from_env()?;
//!
//! let product = client
//!     .create_product(CreateProduct {
//!         name: "Pro plan".to_string(),
//!         ..CreateProduct::default()
//!     })
//!     .await?;
//!
//! let price = client
//!     .create_price(CreatePrice {
//!         product: Some(product.id),
//!         unit_amount: 1500,
//!         ..CreatePrice::default()
//!     })
//!     .await?;
//!
//! println!("Created price: {}", price.id);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod config;
mod error;
mod params;
mod types;

pub use client::{StripeClient, SESSION_ID_PLACEHOLDER};
pub use config::{
    StripeConfig, API_BASE_ENV, DEFAULT_API_BASE, DEFAULT_TIMEOUT_SECONDS, SECRET_KEY_ENV,
};
pub use error::StripeError;
pub use params::{CancelSubscription, CreateCustomer, CreatePrice, CreateProduct};
pub use types::*;

pub use subpay_core::{CheckoutPlan, SubscriptionSummary};

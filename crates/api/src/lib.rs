//! # Medi-Track API
//!
//! HTTP implementation of the gateway traits in `meditrack-core`.
//!
//! Every method issues exactly one request and settles into its typed payload or a
//! [`meditrack_core::GatewayError`]. Nothing is retried or cached.

mod admin;
mod auth;
mod booking;
mod client;
mod records;

pub use client::HttpGateway;

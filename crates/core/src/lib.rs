//! # Medi-Track Core
//!
//! Client-side logic for the Medi-Track appointment booking system.
//!
//! This crate contains everything that does not touch the network:
//! - Session state (who is signed in, with which role) and its on-disk persistence
//! - The slot selection controller behind the booking flow
//! - Skip-gated queries, list reductions and role navigation for the dashboard screens
//!
//! **No transport**: the HTTP implementation of the gateway traits lives in `meditrack-api`.

pub mod booking;
pub mod config;
pub mod constants;
pub mod error;
pub mod gateway;
pub mod models;
pub mod navigation;
pub mod queries;
pub mod session;
pub mod views;

#[cfg(test)]
pub(crate) mod testing;

pub use booking::{BookingFlow, DraftBooking, Notice, NoticeKind, Phase, SlotSelection};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, GatewayError};
pub use gateway::{AdminGateway, AuthGateway, BookingGateway, GatewayResult, RecordsGateway};
pub use queries::Fetch;
pub use session::{Identity, SessionStore};

//! Clicker economy service.
//!
//! This crate wires the economy together for a chat front end:
//!
//! - Player ledger: start, profile, click, upgrades, leaderboards
//! - Businesses: purchases and the periodic income engine
//! - Casino: bet flow and spin resolution
//! - Milk jar mini-game
//! - Admin roster and admin-level ledger edits
//!
//! # Handlers
//!
//! Each handler takes the shared [`AppState`] plus the caller's identity and
//! returns a serializable response or a [`ServiceError`]. Handlers never
//! hold state across calls; the casino flow is carried by the caller as a
//! [`clicker_core::CasinoPlay`] value.
//!
//! # Background tasks
//!
//! [`income::spawn_income_engine`] credits business income on a fixed interval
//! and [`persistence::spawn_flusher`] writes dirty domains to disk. Both stop
//! when the shutdown signal fires.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)] // Handlers all return Result<_, ServiceError>

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod income;
pub mod persistence;
pub mod state;

pub use auth::AdminAuth;
pub use config::ServiceConfig;
pub use error::ServiceError;
pub use state::AppState;

//! cleanfeed: client core for the Keep India Clean community feed.
//!
//! ARCHITECTURE
//! ============
//! Leaf to root:
//! - `storage`: durable key-value store that survives restarts.
//! - `session`: who is logged in, mirrored into `storage`.
//! - `loading`: process-wide busy indicator backed by an outstanding-call count.
//! - `notify`: transient user-facing notifications.
//! - `net`: the request pipeline (outbound/inbound policies) over a
//!   pluggable `Transport`, plus typed API calls.
//! - `flows`: feature routes (login, register, create post, feed, ...)
//!   without their views.
//! - `app`: service container built once at start and handed to flows.

pub mod app;
pub mod config;
pub mod data;
pub mod flows;
pub mod loading;
pub mod model;
pub mod net;
pub mod notify;
pub mod session;
pub mod storage;

pub use app::App;
pub use config::Config;

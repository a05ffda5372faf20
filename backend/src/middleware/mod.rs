//! Request middleware applied to the whole application.
//!
//! Bearer-token checks are scoped to the protected routes and live with the
//! HTTP adapter in [`crate::inbound::http::access_gate`].

pub mod trace;

pub use trace::Trace;

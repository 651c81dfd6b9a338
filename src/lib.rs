#![doc(test(attr(deny(warnings))))]

//! Franchise Core offers the aggregation pipeline and client-state layer
//! behind a franchise/VIP business-management dashboard: windowed filtering,
//! totals reduction, derived metrics, and pagination over records served by
//! an external REST backend.

pub mod cli;
pub mod client;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Franchise Core tracing initialized.");
    });
}

//! Library exports for aoa-client, shared between the binary and tests.

pub mod api;
pub mod config;
pub mod dispatcher;
pub mod models;
pub mod router;
pub mod session;
pub mod startup;
pub mod state;
pub mod storage;
pub mod transport;
pub mod utils;

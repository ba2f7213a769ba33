//! Integration test modules for autoroute
//!
//! - scenarios: availability events and the routing they produce
//! - hooks: interplay with other listeners and the `*_new` hooks
//! - system: RouteSystem lifecycle and configuration

pub mod hooks;
pub mod system;

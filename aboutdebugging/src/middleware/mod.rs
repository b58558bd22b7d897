//! Middleware turning raw runtime listings into display-ready targets
//!
//! Each one matches a single `*_SUCCESS` tag, replaces the raw lists it
//! carries with normalized ones, and forwards the rebuilt action. Every
//! other action passes through untouched.

mod extension_component_data;
mod tab_component_data;
mod worker_component_data;

pub use extension_component_data::ExtensionComponentDataMiddleware;
pub use tab_component_data::TabComponentDataMiddleware;
pub use worker_component_data::WorkerComponentDataMiddleware;

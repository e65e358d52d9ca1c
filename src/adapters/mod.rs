/// Adapters - concrete implementations of the ports
///
/// These modules implement the port traits for specific backends and services.
pub mod services;
pub mod storage;

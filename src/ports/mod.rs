/// Port trait definitions (interfaces)
///
/// These traits define the contracts for adapters to implement.
/// Following the ports-and-adapters (hexagonal) architecture pattern.
pub mod llm;
pub mod storage;

#[cfg(test)]
pub mod mocks;

pub use llm::{CompletionRequest, LlmConfig, LlmServicePort};
pub use storage::StoragePort;

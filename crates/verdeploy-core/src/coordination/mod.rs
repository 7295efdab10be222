//! Run sequencing

pub mod orchestrator;

pub use orchestrator::DeploymentOrchestrator;

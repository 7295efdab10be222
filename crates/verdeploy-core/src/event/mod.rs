//! GitHub event payload parsing and trigger context resolution

pub mod context;
pub mod payload;

pub use context::{resolve_trigger, strip_branch_prefix, TriggerSource};
pub use payload::EventPayload;

//! Classification, dispatch and run orchestration

pub mod context;
pub mod dispatch;
pub mod file_type;
pub mod orchestrator;
pub mod status;

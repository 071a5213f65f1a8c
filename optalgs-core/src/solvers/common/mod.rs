pub mod step_policy;
pub mod trace;

//! Display formatting for terminal output

pub mod plan;
pub mod policy;

pub use plan::{format_plan, format_plan_summary};
pub use policy::format_policy;

//! terraform-plan-filter
//!
//! Reduces Terraform plan output to the resources it creates, updates and
//! destroys, grouped by resource type and rendered as text, JSON or HTML.

pub mod error;
pub mod output;
pub mod plan;
pub mod resource;

pub use error::FilterError;
pub use output::{OutputFormat, PlanReport, RenderOptions, render};
pub use plan::{InputFormat, parse, parse_json, parse_text};
pub use resource::{Action, PlanSummary, ResourceCollection, extract_resource_type};

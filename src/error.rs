use std::path::PathBuf;

use thiserror::Error;

pub const JSON_PLAN_HINT: &str = "This tool only supports JSON-formatted Terraform plans.\n\
Please use the following commands:\n  \
terraform plan -out=tfplan\n  \
terraform show -json tfplan | terraform-plan-filter";

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("input appears to be text format, expected JSON\n\n{}", JSON_PLAN_HINT)]
    InputFormat,

    #[error("error parsing Terraform plan: {0}")]
    InputParse(String),

    #[error("plan file {} does not exist", .0.display())]
    PlanNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("error formatting output: {0}")]
    Format(String),
}

impl From<serde_json::Error> for FilterError {
    fn from(err: serde_json::Error) -> Self {
        FilterError::Format(err.to_string())
    }
}

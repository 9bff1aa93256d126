mod json;
mod text;

pub use json::parse_json;
pub use text::parse_text;

use std::io::Read;

use crate::error::{FilterError, JSON_PLAN_HINT};
use crate::resource::ResourceCollection;

/// Shape of the plan on the input stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputFormat {
    /// Output of `terraform show -json <planfile>`.
    #[default]
    Json,
    /// Human-readable `terraform plan` output.
    Text,
}

/// Reads the whole stream and parses it as `format`.
///
/// JSON input must be UTF-8. Text input is decoded lossily so a stray
/// byte in an attribute value does not fail the run.
pub fn parse<R: Read>(
    mut reader: R,
    format: InputFormat,
) -> Result<ResourceCollection, FilterError> {
    let mut input = Vec::new();
    reader.read_to_end(&mut input)?;

    tracing::debug!(bytes = input.len(), ?format, "plan input read");

    match format {
        InputFormat::Json => {
            let text = std::str::from_utf8(&input).map_err(|err| {
                FilterError::InputParse(format!(
                    "input is not UTF-8 encoded: {err}\n\n{JSON_PLAN_HINT}"
                ))
            })?;
            parse_json(text)
        }
        InputFormat::Text => Ok(parse_text(&String::from_utf8_lossy(&input))),
    }
}

mod debug;
mod html;
mod json;
mod text;

pub use debug::render_debug;
pub use html::render_html;
pub use json::{PlanReport, ReportSummary, render_json};
pub use text::render_text;

use chrono::{DateTime, Local};

use crate::error::FilterError;
use crate::resource::{MODULE_TYPE, ResourceCollection};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Html,
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub use_colors: bool,
    pub generated_at: DateTime<Local>,
}

impl RenderOptions {
    pub fn new(use_colors: bool) -> Self {
        Self {
            use_colors,
            generated_at: Local::now(),
        }
    }
}

/// Renders the whole report in memory so nothing partial reaches the output.
pub fn render(
    collection: &ResourceCollection,
    format: OutputFormat,
    options: &RenderOptions,
) -> Result<String, FilterError> {
    match format {
        OutputFormat::Text => Ok(render_text(collection, options)),
        OutputFormat::Json => render_json(collection, options),
        OutputFormat::Html => Ok(render_html(collection, options)),
    }
}

/// Type groups in display order: the module group first, then the rest
/// alphabetically.
fn ordered_groups(
    groups: std::collections::BTreeMap<String, Vec<String>>,
) -> Vec<(String, Vec<String>)> {
    let (mut ordered, rest): (Vec<_>, Vec<_>) = groups
        .into_iter()
        .filter(|(_, resources)| !resources.is_empty())
        .partition(|(resource_type, _)| resource_type == MODULE_TYPE);

    ordered.extend(rest);
    ordered
}

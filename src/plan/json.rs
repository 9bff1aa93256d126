use serde::Deserialize;

use crate::error::{FilterError, JSON_PLAN_HINT};
use crate::resource::{Action, PlanSummary, ResourceCollection};

/// First non-blank prefixes of human-readable `terraform plan` output.
const LEGACY_TEXT_MARKERS: &[&str] = &[
    "Terraform will perform",
    "Terraform used the selected providers",
    "An execution plan has been generated",
    "Resource actions are indicated",
    "Refreshing state",
    "Reading...",
    "No changes.",
    "Plan:",
    "Note: Objects have changed",
    "data.",
    "module.",
    "#",
    "+ ",
    "~ ",
    "- ",
    "-/+ ",
    "+/- ",
    "<= ",
];

/// Full document shape of `terraform show -json`.
#[derive(Debug, Deserialize)]
struct PlanDocument {
    format_version: String,
    #[serde(default)]
    terraform_version: Option<String>,
    #[serde(default)]
    resource_changes: Vec<ResourceChange>,
}

#[derive(Debug, Deserialize)]
struct ResourceChange {
    address: String,
    mode: ResourceMode,
    #[serde(rename = "type")]
    resource_type: String,
    name: String,
    change: Change,
}

/// Minimal record accepted when the full document shape does not match.
#[derive(Debug, Deserialize)]
struct ChangeRecord {
    address: String,
    #[serde(default)]
    mode: ResourceMode,
    change: Change,
}

#[derive(Debug, Deserialize)]
struct Change {
    #[serde(default)]
    actions: Vec<ChangeAction>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ResourceMode {
    #[default]
    Managed,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ChangeAction {
    Create,
    Update,
    Delete,
    Replace,
    NoOp,
    Read,
    #[serde(other)]
    Unknown,
}

impl From<ResourceChange> for ChangeRecord {
    fn from(rc: ResourceChange) -> Self {
        tracing::trace!(
            address = %rc.address,
            resource_type = %rc.resource_type,
            name = %rc.name,
            "strict record"
        );
        Self {
            address: rc.address,
            mode: rc.mode,
            change: rc.change,
        }
    }
}

/// Parses `terraform show -json` output.
///
/// The full document schema is tried first. When it does not match, only the
/// `resource_changes` field is decoded, so partial or trimmed documents are
/// still accepted as long as that field is well-formed.
pub fn parse_json(input: &str) -> Result<ResourceCollection, FilterError> {
    let value: serde_json::Value = match serde_json::from_str(input) {
        Ok(value) => value,
        Err(err) if looks_like_text_plan(input) => {
            tracing::debug!(error = %err, "input is not JSON but looks like plan text");
            return Err(FilterError::InputFormat);
        }
        Err(err) => {
            return Err(FilterError::InputParse(format!(
                "invalid JSON: {err}\n\n{JSON_PLAN_HINT}"
            )));
        }
    };

    let records: Vec<ChangeRecord> = match PlanDocument::deserialize(&value) {
        Ok(doc) => {
            tracing::debug!(
                format_version = %doc.format_version,
                terraform_version = doc.terraform_version.as_deref().unwrap_or("unknown"),
                "parsed full plan document"
            );
            doc.resource_changes.into_iter().map(ChangeRecord::from).collect()
        }
        Err(err) => {
            tracing::debug!(error = %err, "full plan schema did not match, decoding resource_changes only");
            parse_resource_changes(&value)?
        }
    };

    Ok(build_collection(records))
}

fn parse_resource_changes(value: &serde_json::Value) -> Result<Vec<ChangeRecord>, FilterError> {
    let changes = value.get("resource_changes").ok_or_else(|| {
        FilterError::InputParse(format!(
            "missing resource_changes field\n\n{JSON_PLAN_HINT}"
        ))
    })?;

    Vec::<ChangeRecord>::deserialize(changes)
        .map_err(|err| FilterError::InputParse(format!("malformed resource_changes: {err}")))
}

fn build_collection(records: Vec<ChangeRecord>) -> ResourceCollection {
    let mut collection = ResourceCollection::new();
    let mut summary = PlanSummary::default();

    for record in records {
        let actions = &record.change.actions;

        if record.mode == ResourceMode::Data {
            tracing::debug!(address = %record.address, "skipping data source");
            continue;
        }

        if actions.iter().all(|a| *a == ChangeAction::NoOp) {
            tracing::debug!(address = %record.address, "skipping no-op");
            continue;
        }

        if actions.contains(&ChangeAction::Replace) {
            collection.add_replacement(&record.address);
            summary.adds += 1;
            summary.destroys += 1;
            continue;
        }

        for action in actions {
            match action {
                ChangeAction::Create => {
                    collection.add(Action::Create, &record.address);
                    summary.adds += 1;
                }
                ChangeAction::Update => {
                    collection.add(Action::Update, &record.address);
                    summary.changes += 1;
                }
                ChangeAction::Delete => {
                    collection.add(Action::Destroy, &record.address);
                    summary.destroys += 1;
                }
                ChangeAction::Replace | ChangeAction::NoOp | ChangeAction::Read => {}
                ChangeAction::Unknown => {
                    tracing::warn!(address = %record.address, "ignoring unrecognized plan action");
                }
            }
        }
    }

    tracing::info!(
        adds = summary.adds,
        changes = summary.changes,
        destroys = summary.destroys,
        "plan parsed"
    );

    collection.set_summary(summary);
    collection.has_detailed_resources = true;
    collection
}

fn looks_like_text_plan(input: &str) -> bool {
    let Some(first_line) = input.lines().map(str::trim).find(|line| !line.is_empty()) else {
        return false;
    };

    LEGACY_TEXT_MARKERS
        .iter()
        .any(|marker| first_line.starts_with(marker))
}

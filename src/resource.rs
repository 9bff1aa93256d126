use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static RESOURCE_DEFINITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*resource\s+"([^"]+)"\s+"([^"]+)""#).expect("invalid resource definition regex")
});

/// Nested block names that show up in plan text but are never resources.
const NESTED_BLOCKS: &[&str] = &[
    "statement",
    "action",
    "visibility_config",
    "field_to_match",
    "and_statement",
    "or_statement",
    "not_statement",
    "uri_path",
    "text_transformation",
    "allow",
    "block",
    "rule",
    "parameter",
    "setting",
    "alias",
    "override_action",
    "none",
    "regular_expression",
    "regex_pattern_set_reference_statement",
    "label_match_statement",
    "rule_group_reference_statement",
    "regex_match_statement",
    "tags",
    "tags_all",
];

pub const MODULE_TYPE: &str = "module";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Action {
    Create,
    Update,
    Destroy,
}

impl Action {
    /// Display order used by every formatter.
    pub const ALL: [Action; 3] = [Action::Create, Action::Update, Action::Destroy];

    pub fn symbol(self) -> &'static str {
        match self {
            Action::Create => "+",
            Action::Update => "~",
            Action::Destroy => "-",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Action::Create => "RESOURCES TO CREATE",
            Action::Update => "RESOURCES TO UPDATE",
            Action::Destroy => "RESOURCES TO DESTROY",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Update => "update",
            Action::Destroy => "destroy",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counts taken from a `Plan: N to add, M to change, K to destroy.` line,
/// or computed from JSON records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanSummary {
    pub adds: usize,
    pub changes: usize,
    pub destroys: usize,
}

impl PlanSummary {
    pub fn total(&self) -> usize {
        self.adds + self.changes + self.destroys
    }

    pub fn count_for(&self, action: Action) -> usize {
        match action {
            Action::Create => self.adds,
            Action::Update => self.changes,
            Action::Destroy => self.destroys,
        }
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Plan: {} to add, {} to change, {} to destroy.",
            self.adds, self.changes, self.destroys
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceCollection {
    resources: BTreeMap<Action, BTreeSet<String>>,
    pub found_summary: bool,
    pub has_detailed_resources: bool,
    pub summary: PlanSummary,
}

impl ResourceCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, action: Action, resource: &str) {
        let trimmed = resource.trim();
        if trimmed.is_empty() || trimmed == "#" {
            return;
        }

        let normalized = normalize_identifier(trimmed);
        self.resources.entry(action).or_default().insert(normalized);
        self.has_detailed_resources = true;
    }

    /// Records a destroy-then-create of the same address.
    pub fn add_replacement(&mut self, resource: &str) {
        self.add(Action::Destroy, resource);
        self.add(Action::Create, resource);
    }

    pub fn set_summary(&mut self, summary: PlanSummary) {
        self.summary = summary;
        self.found_summary = true;
    }

    pub fn resources_for_action(&self, action: Action) -> Vec<String> {
        self.resources
            .get(&action)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn count_for_action(&self, action: Action) -> usize {
        self.resources.get(&action).map_or(0, BTreeSet::len)
    }

    pub fn is_empty(&self) -> bool {
        Action::ALL.iter().all(|a| self.count_for_action(*a) == 0)
    }

    /// Summary counters win when the input carried them; otherwise each
    /// (action, address) pair counts once, so a replacement counts twice.
    pub fn total_changes(&self) -> usize {
        if self.found_summary {
            return self.summary.total();
        }

        Action::ALL.iter().map(|a| self.count_for_action(*a)).sum()
    }

    pub fn resources_by_type(&self, action: Action) -> BTreeMap<String, Vec<String>> {
        let mut by_type: BTreeMap<String, Vec<String>> = BTreeMap::new();

        if let Some(set) = self.resources.get(&action) {
            // BTreeSet iteration is already sorted, so every group stays sorted.
            for resource in set {
                by_type
                    .entry(extract_resource_type(resource))
                    .or_default()
                    .push(resource.clone());
            }
        }

        by_type
    }
}

pub fn is_module_resource(resource: &str) -> bool {
    resource.starts_with("module.")
}

/// Resource type used for display grouping.
///
/// Accepts `aws_s3_bucket.example`, `module.network.aws_vpc.main` and
/// `resource "aws_s3_bucket" "example"`. Module addresses are all grouped
/// under [`MODULE_TYPE`].
pub fn extract_resource_type(resource: &str) -> String {
    if let Some(caps) = RESOURCE_DEFINITION.captures(resource) {
        return caps[1].to_string();
    }

    if is_module_resource(resource) {
        return MODULE_TYPE.to_string();
    }

    match resource.split_once('.') {
        Some((resource_type, _)) if !resource_type.is_empty() => resource_type.to_string(),
        _ if resource.is_empty() => "unknown".to_string(),
        _ => resource.to_string(),
    }
}

/// Converts `resource "type" "name"` into `type.name`.
pub fn normalize_identifier(resource: &str) -> String {
    match RESOURCE_DEFINITION.captures(resource) {
        Some(caps) => format!("{}.{}", &caps[1], &caps[2]),
        None => resource.trim().to_string(),
    }
}

/// True for identifiers that are really nested blocks or attribute
/// assignments picked up from plan text. Real addresses always carry a
/// `type.name` pair, nested blocks are bare keywords.
pub fn is_nested_attribute(resource: &str) -> bool {
    let resource = resource.trim();
    if resource.contains(" = ") || resource.ends_with(" =") {
        return true;
    }

    let head = resource.split_whitespace().next().unwrap_or_default();
    if is_nested_block_keyword(head) {
        return true;
    }

    !resource.contains('.')
}

fn is_nested_block_keyword(word: &str) -> bool {
    NESTED_BLOCKS.contains(&word)
}

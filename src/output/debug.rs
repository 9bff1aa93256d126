use tabled::settings::Style;
use tabled::{Table, Tabled};
use termtree::Tree;

use crate::resource::{Action, ResourceCollection};

#[derive(Tabled)]
struct DebugRow {
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

/// Diagnostics printed to stderr by `--verbose`: collection flags and
/// counters, then an action/type breakdown.
pub fn render_debug(collection: &ResourceCollection) -> String {
    let mut rows = vec![
        DebugRow {
            field: "Found summary",
            value: collection.found_summary.to_string(),
        },
        DebugRow {
            field: "Has detailed resources",
            value: collection.has_detailed_resources.to_string(),
        },
    ];

    if collection.found_summary {
        rows.push(DebugRow {
            field: "Summary adds",
            value: collection.summary.adds.to_string(),
        });
        rows.push(DebugRow {
            field: "Summary changes",
            value: collection.summary.changes.to_string(),
        });
        rows.push(DebugRow {
            field: "Summary destroys",
            value: collection.summary.destroys.to_string(),
        });
    }

    rows.push(DebugRow {
        field: "Total changes detected",
        value: collection.total_changes().to_string(),
    });

    let mut table = Table::new(rows);
    table.with(Style::modern());

    format!("{table}\n{}", breakdown_tree(collection))
}

fn breakdown_tree(collection: &ResourceCollection) -> Tree<String> {
    let mut root = Tree::new("plan".to_string());

    for action in Action::ALL {
        let count = collection.count_for_action(action);
        if count == 0 {
            continue;
        }

        let leaves = collection
            .resources_by_type(action)
            .into_iter()
            .map(|(resource_type, resources)| format!("{resource_type} ({})", resources.len()));

        root.push(Tree::new(format!("{action} ({count})")).with_leaves(leaves));
    }

    root
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::PlanSummary;

    #[test]
    fn test_render_debug_table() {
        let mut rc = ResourceCollection::new();
        rc.add(Action::Create, "aws_s3_bucket.logs");
        rc.set_summary(PlanSummary {
            adds: 1,
            changes: 0,
            destroys: 0,
        });

        let out = render_debug(&rc);
        assert!(out.contains("Found summary"));
        assert!(out.contains("Has detailed resources"));
        assert!(out.contains("Summary adds"));
        assert!(out.contains("Total changes detected"));
    }

    #[test]
    fn test_render_debug_omits_summary_rows_without_summary() {
        let mut rc = ResourceCollection::new();
        rc.add(Action::Update, "aws_instance.web");

        let out = render_debug(&rc);
        assert!(!out.contains("Summary adds"));
    }

    #[test]
    fn test_breakdown_tree_lists_types() {
        let mut rc = ResourceCollection::new();
        rc.add(Action::Create, "aws_s3_bucket.logs");
        rc.add(Action::Create, "aws_s3_bucket.data");
        rc.add(Action::Destroy, "module.network.aws_vpc.main");

        let tree = breakdown_tree(&rc).to_string();
        assert!(tree.starts_with("plan"));
        assert!(tree.contains("create (2)"));
        assert!(tree.contains("aws_s3_bucket (2)"));
        assert!(tree.contains("destroy (1)"));
        assert!(tree.contains("module (1)"));
        assert!(!tree.contains("update"));
    }
}

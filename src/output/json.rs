use serde::{Deserialize, Serialize};

use super::RenderOptions;
use crate::error::FilterError;
use crate::resource::{Action, ResourceCollection};

/// Machine-readable report written by `--json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanReport {
    pub create: Vec<String>,
    pub update: Vec<String>,
    pub destroy: Vec<String>,
    pub summary: ReportSummary,
    pub has_detailed_resources: bool,
    pub found_summary: bool,
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total: usize,
    pub adds: usize,
    pub changes: usize,
    pub destroys: usize,
}

impl PlanReport {
    pub fn from_collection(collection: &ResourceCollection, options: &RenderOptions) -> Self {
        Self {
            create: collection.resources_for_action(Action::Create),
            update: collection.resources_for_action(Action::Update),
            destroy: collection.resources_for_action(Action::Destroy),
            summary: ReportSummary {
                total: collection.total_changes(),
                adds: collection.summary.adds,
                changes: collection.summary.changes,
                destroys: collection.summary.destroys,
            },
            has_detailed_resources: collection.has_detailed_resources,
            found_summary: collection.found_summary,
            timestamp: options.generated_at.to_rfc3339(),
        }
    }
}

pub fn render_json(
    collection: &ResourceCollection,
    options: &RenderOptions,
) -> Result<String, FilterError> {
    let report = PlanReport::from_collection(collection, options);
    Ok(serde_json::to_string_pretty(&report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::parse_json;
    use crate::resource::PlanSummary;
    use chrono::{Local, TimeZone};

    fn fixed_options() -> RenderOptions {
        RenderOptions {
            use_colors: false,
            generated_at: Local.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_render_json_fields() {
        let mut rc = ResourceCollection::new();
        rc.add(Action::Create, "aws_s3_bucket.logs");
        rc.add(Action::Create, "aws_s3_bucket.data");
        rc.add(Action::Update, "aws_instance.web");

        let out = render_json(&rc, &fixed_options()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(
            value["create"],
            serde_json::json!(["aws_s3_bucket.data", "aws_s3_bucket.logs"])
        );
        assert_eq!(value["update"], serde_json::json!(["aws_instance.web"]));
        assert_eq!(value["destroy"], serde_json::json!([]));
        assert_eq!(value["summary"]["total"], 3);
        assert_eq!(value["has_detailed_resources"], true);
        assert_eq!(value["found_summary"], false);
        assert!(value["timestamp"].as_str().unwrap().starts_with("2024-05-01T12:30:00"));
    }

    #[test]
    fn test_render_json_summary_counters() {
        let mut rc = ResourceCollection::new();
        rc.set_summary(PlanSummary {
            adds: 2,
            changes: 1,
            destroys: 4,
        });

        let out = render_json(&rc, &fixed_options()).unwrap();
        let report: PlanReport = serde_json::from_str(&out).unwrap();

        assert_eq!(
            report.summary,
            ReportSummary {
                total: 7,
                adds: 2,
                changes: 1,
                destroys: 4
            }
        );
        assert!(report.found_summary);
        assert!(!report.has_detailed_resources);
    }

    #[test]
    fn test_render_json_reproduces_parsed_sets() {
        let plan = r#"{"format_version":"1.2","resource_changes":[
            {"address":"aws_s3_bucket.logs","mode":"managed","type":"aws_s3_bucket","name":"logs","change":{"actions":["create"]}},
            {"address":"module.network.aws_vpc.main","mode":"managed","type":"aws_vpc","name":"main","change":{"actions":["update"]}},
            {"address":"aws_instance.db","mode":"managed","type":"aws_instance","name":"db","change":{"actions":["delete","create"]}}
        ]}"#;
        let rc = parse_json(plan).unwrap();

        let out = render_json(&rc, &fixed_options()).unwrap();
        let report: PlanReport = serde_json::from_str(&out).unwrap();

        assert_eq!(report.create, rc.resources_for_action(Action::Create));
        assert_eq!(report.update, rc.resources_for_action(Action::Update));
        assert_eq!(report.destroy, rc.resources_for_action(Action::Destroy));
        assert_eq!(report.summary.total, 4);
    }
}

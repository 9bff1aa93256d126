use owo_colors::{AnsiColors, OwoColorize};

use super::{RenderOptions, ordered_groups};
use crate::resource::{Action, ResourceCollection};

const HEADER: &str = "=== TERRAFORM PLAN SUMMARY ===";

/// Plain or ANSI-colored terminal report.
pub fn render_text(collection: &ResourceCollection, options: &RenderOptions) -> String {
    let mut out = String::new();
    let colors = options.use_colors;

    out.push('\n');
    out.push_str(&bold(HEADER, colors));
    out.push_str("\n\n");

    if collection.has_detailed_resources {
        for action in Action::ALL {
            render_action(&mut out, collection, action, colors);
        }
    } else if collection.found_summary {
        render_summary_only(&mut out, collection, colors);
    }

    out.push_str(&format!(
        "{} {}\n",
        bold("TOTAL CHANGES:", colors),
        collection.total_changes()
    ));

    if collection.found_summary {
        out.push_str(&format!(
            "\n{} {}\n",
            bold("Plan Summary:", colors),
            collection.summary
        ));
    }

    out
}

fn render_action(out: &mut String, collection: &ResourceCollection, action: Action, colors: bool) {
    if collection.count_for_action(action) == 0 {
        return;
    }

    out.push_str(&bold(&format!("{}:", action.label()), colors));
    out.push('\n');

    for (resource_type, resources) in ordered_groups(collection.resources_by_type(action)) {
        let subheader = format!("# {} RESOURCES:", resource_type.to_uppercase());
        out.push_str(&format!("  {}\n", bold(&subheader, colors)));

        for resource in resources {
            let line = format!("{} {}", action.symbol(), resource);
            if colors {
                out.push_str(&format!("    {}\n", line.color(action_color(action))));
            } else {
                out.push_str(&format!("    {line}\n"));
            }
        }
        out.push('\n');
    }
}

fn render_summary_only(out: &mut String, collection: &ResourceCollection, colors: bool) {
    for action in Action::ALL {
        let count = collection.summary.count_for(action);
        if count == 0 {
            continue;
        }

        out.push_str(&format!(
            "{} {} (details not available)\n\n",
            bold(&format!("{}:", action.label()), colors),
            count
        ));
    }
}

fn action_color(action: Action) -> AnsiColors {
    match action {
        Action::Create => AnsiColors::Green,
        Action::Update => AnsiColors::Yellow,
        Action::Destroy => AnsiColors::Red,
    }
}

fn bold(text: &str, colors: bool) -> String {
    if colors {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::PlanSummary;

    fn sample() -> ResourceCollection {
        let mut rc = ResourceCollection::new();
        rc.add(Action::Create, "aws_s3_bucket.logs");
        rc.add(Action::Create, "aws_s3_bucket.data");
        rc.add(Action::Update, "aws_instance.web");
        rc.add(Action::Destroy, "aws_cloudfront_distribution.old");
        rc
    }

    #[test]
    fn test_render_text_plain() {
        let out = render_text(&sample(), &RenderOptions::new(false));

        let expected = [
            "TERRAFORM PLAN SUMMARY",
            "RESOURCES TO CREATE:",
            "# AWS_S3_BUCKET RESOURCES:",
            "+ aws_s3_bucket.data",
            "+ aws_s3_bucket.logs",
            "RESOURCES TO UPDATE:",
            "# AWS_INSTANCE RESOURCES:",
            "~ aws_instance.web",
            "RESOURCES TO DESTROY:",
            "# AWS_CLOUDFRONT_DISTRIBUTION RESOURCES:",
            "- aws_cloudfront_distribution.old",
            "TOTAL CHANGES: 4",
        ];
        for phrase in expected {
            assert!(out.contains(phrase), "missing {phrase:?} in:\n{out}");
        }
        assert!(!out.contains('\u{1b}'));
        assert!(!out.contains("Plan Summary:"));
    }

    #[test]
    fn test_render_text_action_order() {
        let out = render_text(&sample(), &RenderOptions::new(false));

        let create = out.find("RESOURCES TO CREATE:").unwrap();
        let update = out.find("RESOURCES TO UPDATE:").unwrap();
        let destroy = out.find("RESOURCES TO DESTROY:").unwrap();
        assert!(create < update && update < destroy);
        assert!(out.find("+ aws_s3_bucket.data").unwrap() < out.find("+ aws_s3_bucket.logs").unwrap());
    }

    #[test]
    fn test_render_text_exact_layout() {
        let mut rc = ResourceCollection::new();
        rc.add(Action::Create, "aws_s3_bucket.logs");

        let out = render_text(&rc, &RenderOptions::new(false));
        assert_eq!(
            out,
            "\n=== TERRAFORM PLAN SUMMARY ===\n\n\
             RESOURCES TO CREATE:\n  \
             # AWS_S3_BUCKET RESOURCES:\n    \
             + aws_s3_bucket.logs\n\n\
             TOTAL CHANGES: 1\n"
        );
    }

    #[test]
    fn test_render_text_module_group_first() {
        let mut rc = ResourceCollection::new();
        rc.add(Action::Update, "module.network.aws_vpc.main");
        rc.add(Action::Update, "aws_instance.web");

        let out = render_text(&rc, &RenderOptions::new(false));
        let module = out.find("# MODULE RESOURCES:").unwrap();
        let instance = out.find("# AWS_INSTANCE RESOURCES:").unwrap();
        assert!(module < instance);
        assert!(out.contains("~ module.network.aws_vpc.main"));
    }

    #[test]
    fn test_render_text_skips_empty_actions() {
        let mut rc = ResourceCollection::new();
        rc.add(Action::Destroy, "aws_iam_role.old");

        let out = render_text(&rc, &RenderOptions::new(false));
        assert!(!out.contains("RESOURCES TO CREATE:"));
        assert!(!out.contains("RESOURCES TO UPDATE:"));
        assert!(out.contains("RESOURCES TO DESTROY:"));
    }

    #[test]
    fn test_render_text_summary_only() {
        let mut rc = ResourceCollection::new();
        rc.set_summary(PlanSummary {
            adds: 2,
            changes: 1,
            destroys: 0,
        });

        let out = render_text(&rc, &RenderOptions::new(false));
        assert!(out.contains("RESOURCES TO CREATE: 2 (details not available)"));
        assert!(out.contains("RESOURCES TO UPDATE: 1 (details not available)"));
        assert!(!out.contains("RESOURCES TO DESTROY:"));
        assert!(out.contains("TOTAL CHANGES: 3"));
        assert!(out.contains("Plan Summary: Plan: 2 to add, 1 to change, 0 to destroy."));
    }

    #[test]
    fn test_render_text_colored() {
        let out = render_text(&sample(), &RenderOptions::new(true));

        assert!(out.contains('\u{1b}'));
        assert!(out.contains("aws_s3_bucket.logs"));
        assert!(out.contains("\u{1b}[32m+ aws_s3_bucket.logs"));
        assert!(out.contains("\u{1b}[31m- aws_cloudfront_distribution.old"));
    }
}

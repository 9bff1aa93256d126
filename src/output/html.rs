use super::{RenderOptions, ordered_groups};
use crate::resource::{Action, ResourceCollection};

const STYLES: &str = r#"    <style>
        body {
            font-family: Arial, sans-serif;
            line-height: 1.6;
            max-width: 1200px;
            margin: 0 auto;
            padding: 20px;
            color: #333;
        }
        h1 {
            color: #0f4c81;
            border-bottom: 2px solid #0f4c81;
            padding-bottom: 10px;
        }
        .summary {
            background: #f5f5f5;
            padding: 15px;
            border-radius: 4px;
            margin-bottom: 20px;
        }
        .action-group { margin-bottom: 30px; }
        .create h2 { color: #2a9d8f; }
        .update h2 { color: #e9c46a; }
        .destroy h2 { color: #e76f51; }
        .resource-type {
            background: #f9f9f9;
            padding: 8px 12px;
            margin-bottom: 10px;
            border-radius: 4px;
            font-weight: bold;
        }
        .resource {
            background: white;
            border-left: 4px solid #ddd;
            padding: 10px 15px;
            margin-bottom: 10px;
            border-radius: 0 4px 4px 0;
            font-family: monospace;
        }
        .create .resource { border-left-color: #2a9d8f; }
        .update .resource { border-left-color: #e9c46a; }
        .destroy .resource { border-left-color: #e76f51; }
        .plan-summary {
            margin-top: 20px;
            font-weight: bold;
            padding: 10px;
            background-color: #f0f8ff;
            border-radius: 4px;
        }
        .timestamp {
            font-size: 0.8em;
            color: #666;
            margin-top: 30px;
        }
    </style>
"#;

/// Self-contained HTML report with inline styles.
pub fn render_html(collection: &ResourceCollection, options: &RenderOptions) -> String {
    let mut out = String::new();

    out.push_str("<!DOCTYPE html>\n");
    out.push_str("<html lang=\"en\">\n");
    out.push_str("<head>\n");
    out.push_str("    <meta charset=\"UTF-8\">\n");
    out.push_str("    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    out.push_str("    <title>Terraform Plan Summary</title>\n");
    out.push_str(STYLES);
    out.push_str("</head>\n");
    out.push_str("<body>\n");

    out.push_str("    <h1>Terraform Plan Summary</h1>\n");
    out.push_str("    <div class=\"summary\">\n");
    out.push_str(&format!(
        "        <p><strong>Total changes:</strong> {}</p>\n",
        collection.total_changes()
    ));
    out.push_str("    </div>\n");

    if collection.has_detailed_resources {
        for action in Action::ALL {
            render_action(&mut out, collection, action);
        }
    } else if collection.found_summary {
        render_summary_only(&mut out, collection);
    }

    if collection.found_summary {
        out.push_str(&format!(
            "    <div class=\"plan-summary\">{}</div>\n",
            collection.summary
        ));
    }

    out.push_str(&format!(
        "    <div class=\"timestamp\">Report generated on {}</div>\n",
        options.generated_at.format("%B %-d, %Y %H:%M:%S")
    ));
    out.push_str("</body>\n");
    out.push_str("</html>\n");

    out
}

fn render_action(out: &mut String, collection: &ResourceCollection, action: Action) {
    if collection.count_for_action(action) == 0 {
        return;
    }

    out.push_str(&format!("    <div class=\"action-group {action}\">\n"));
    out.push_str(&format!("        <h2>Resources to {action}</h2>\n"));

    for (resource_type, resources) in ordered_groups(collection.resources_by_type(action)) {
        out.push_str(&format!(
            "        <div class=\"resource-type\">{} RESOURCES</div>\n",
            html_escape(&resource_type.to_uppercase())
        ));

        for resource in resources {
            out.push_str(&format!(
                "        <div class=\"resource\">{} {}</div>\n",
                action.symbol(),
                html_escape(&resource)
            ));
        }
    }

    out.push_str("    </div>\n");
}

fn render_summary_only(out: &mut String, collection: &ResourceCollection) {
    out.push_str("    <div class=\"summary-details\">\n");

    for action in Action::ALL {
        let count = collection.summary.count_for(action);
        if count > 0 {
            out.push_str(&format!(
                "        <p><strong>Resources to {action}:</strong> {count} (details not available)</p>\n"
            ));
        }
    }

    out.push_str("    </div>\n");
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

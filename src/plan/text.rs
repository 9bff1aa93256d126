use std::sync::LazyLock;

use regex::Regex;

use crate::resource::{
    Action, PlanSummary, ResourceCollection, is_nested_attribute, normalize_identifier,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Single(Action),
    Replacement,
}

/// Where a matched identifier came from on the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineSource {
    /// `# <address> will be ...` comment header carrying the full address.
    Header,
    /// `+ resource "T" "N" {` body opening; module path and index are lost.
    ResourceBlock,
    Other,
}

struct LinePattern {
    regex: Regex,
    kind: LineKind,
    source: LineSource,
}

fn pattern(re: &str, kind: LineKind, source: LineSource) -> LinePattern {
    LinePattern {
        regex: Regex::new(re).expect("invalid plan line regex"),
        kind,
        source,
    }
}

/// Checked in order; the first match wins. Comment headers come first since
/// the bare `will be ...` forms would otherwise capture the leading `#`.
static LINE_PATTERNS: LazyLock<Vec<LinePattern>> = LazyLock::new(|| {
    use LineKind::{Replacement, Single};
    use LineSource::{Header, Other, ResourceBlock};

    vec![
        pattern(r"^\s*#\s+(.+?)\s+will\s+be\s+created", Single(Action::Create), Header),
        pattern(
            r"^\s*#\s+(.+?)\s+will\s+be\s+updated\s+in-place",
            Single(Action::Update),
            Header,
        ),
        pattern(r"^\s*#\s+(.+?)\s+will\s+be\s+destroyed", Single(Action::Destroy), Header),
        pattern(r"^\s*#\s+(.+?)\s+must\s+be\s+replaced", Replacement, Header),
        pattern(
            r#"^\s*\+\s+(resource\s+"[^"]+"\s+"[^"]+")\s*\{"#,
            Single(Action::Create),
            ResourceBlock,
        ),
        pattern(
            r#"^\s*~\s+(resource\s+"[^"]+"\s+"[^"]+")\s*\{"#,
            Single(Action::Update),
            ResourceBlock,
        ),
        pattern(
            r#"^\s*-\s+(resource\s+"[^"]+"\s+"[^"]+")\s*\{"#,
            Single(Action::Destroy),
            ResourceBlock,
        ),
        pattern(r"^\s*\+\s+(.+?)\s+\{", Single(Action::Create), Other),
        pattern(r"^\s*~\s+(.+?)\s+\{", Single(Action::Update), Other),
        pattern(r"^\s*-\s+(.+?)\s+\{", Single(Action::Destroy), Other),
        pattern(r"^(.+?)\s+will\s+be\s+created", Single(Action::Create), Other),
        pattern(r"^(.+?)\s+will\s+be\s+updated\s+in-place", Single(Action::Update), Other),
        pattern(r"^(.+?)\s+will\s+be\s+destroyed", Single(Action::Destroy), Other),
        pattern(r"^(.+?)\s+must\s+be\s+replaced", Replacement, Other),
    ]
});

static PLAN_SUMMARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Plan:\s+(\d+)\s+to\s+add,\s+(\d+)\s+to\s+change,\s+(\d+)\s+to\s+destroy")
        .expect("invalid plan summary regex")
});

static DATA_SOURCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:#|<=)?\s*data[\s.]").expect("invalid data source regex"));

static BLOCK_OPENING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[+~-]\s+)?([a-z_]+)\s*(?:=\s*)?[{(\[]").expect("invalid block opening regex")
});

/// Parses human-readable `terraform plan` output line by line.
///
/// Unrecognized lines are ignored; this never fails once the text is in
/// memory.
pub fn parse_text(input: &str) -> ResourceCollection {
    let mut collection = ResourceCollection::new();
    let mut last_header: Option<String> = None;

    for line in input.lines() {
        if let Some(summary) = parse_summary_line(line) {
            tracing::debug!(%summary, "plan summary line");
            collection.set_summary(summary);
            continue;
        }

        if DATA_SOURCE.is_match(line) || is_non_resource_block(line) {
            continue;
        }

        let Some((kind, source, identifier)) = match_line(line) else {
            continue;
        };

        if is_nested_attribute(&identifier) {
            tracing::trace!(%identifier, "skipping nested block");
            continue;
        }

        match source {
            LineSource::Header => last_header = Some(identifier.clone()),
            LineSource::ResourceBlock => {
                let recorded = last_header
                    .take()
                    .is_some_and(|header| block_belongs_to_header(&identifier, &header));
                if recorded {
                    tracing::trace!(%identifier, "resource body already recorded");
                    continue;
                }
            }
            LineSource::Other => {}
        }

        tracing::debug!(%identifier, ?kind, "plan line matched");
        match kind {
            LineKind::Single(action) => collection.add(action, &identifier),
            LineKind::Replacement => collection.add_replacement(&identifier),
        }
    }

    collection
}

fn match_line(line: &str) -> Option<(LineKind, LineSource, String)> {
    LINE_PATTERNS.iter().find_map(|p| {
        p.regex
            .captures(line)
            .map(|caps| (p.kind, p.source, normalize_identifier(&caps[1])))
    })
}

/// `aws_vpc.main` opens the body of `module.network.aws_vpc.main`, and
/// `aws_instance.web` the body of `aws_instance.web[0]`.
fn block_belongs_to_header(block: &str, header: &str) -> bool {
    let base = header
        .strip_suffix(']')
        .and_then(|rest| rest.rsplit_once('['))
        .map_or(header, |(base, _)| base);
    base == block
        || base
            .strip_suffix(block)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

fn parse_summary_line(line: &str) -> Option<PlanSummary> {
    let caps = PLAN_SUMMARY.captures(line)?;

    Some(PlanSummary {
        adds: caps[1].parse().ok()?,
        changes: caps[2].parse().ok()?,
        destroys: caps[3].parse().ok()?,
    })
}

/// Lines such as `+ tags = {`, `~ rule {` or `statement (` open nested
/// blocks inside a resource body.
fn is_non_resource_block(line: &str) -> bool {
    BLOCK_OPENING
        .captures(line)
        .is_some_and(|caps| &caps[1] != "resource")
}

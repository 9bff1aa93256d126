use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

/// Flags that older releases accepted with a single leading dash.
const LEGACY_FLAGS: &[&str] = &[
    "no-color", "json", "html", "text", "plan", "output", "verbose", "version",
];

/// Summarize a Terraform plan by action and resource type.
///
/// Reads `terraform show -json` output from stdin or --plan.
#[derive(Parser, Debug)]
#[command(name = "terraform-plan-filter", author, version, about)]
pub struct Cli {
    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Output in JSON format
    #[arg(long, conflicts_with = "html")]
    pub json: bool,

    /// Output in HTML format
    #[arg(long)]
    pub html: bool,

    /// Parse legacy human-readable plan text instead of JSON
    #[arg(long)]
    pub text: bool,

    /// Terraform JSON plan file (default: stdin)
    #[arg(long, value_name = "PATH")]
    pub plan: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Show parse diagnostics on stderr
    #[arg(long)]
    pub verbose: bool,
}

impl Cli {
    /// Parses process arguments, accepting the single-dash spellings too.
    pub fn parse_args() -> Self {
        Self::parse_from(normalize_legacy_args(std::env::args_os()))
    }
}

/// Rewrites `-json`, `-plan=x`, `-plan x` and friends to their `--` form.
pub fn normalize_legacy_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .enumerate()
        .map(|(idx, arg)| {
            if idx == 0 {
                return arg;
            }
            let rewritten = arg
                .to_str()
                .filter(|s| is_legacy_flag(s))
                .map(|s| OsString::from(format!("-{s}")));
            rewritten.unwrap_or(arg)
        })
        .collect()
}

fn is_legacy_flag(arg: &str) -> bool {
    let Some(rest) = arg.strip_prefix('-') else {
        return false;
    };
    if rest.starts_with('-') {
        return false;
    }

    let name = rest.split_once('=').map_or(rest, |(name, _)| name);
    LEGACY_FLAGS.contains(&name)
}

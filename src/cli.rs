mod args;

pub use args::Cli;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use terraform_plan_filter::output::{self, OutputFormat, RenderOptions};
use terraform_plan_filter::plan::{self, InputFormat};
use terraform_plan_filter::FilterError;

/// Everything a run needs, resolved from flags and environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub plan: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub input_format: InputFormat,
    pub output_format: OutputFormat,
    pub use_colors: bool,
    pub verbose: bool,
}

impl RunConfig {
    pub fn from_cli(cli: Cli) -> Self {
        Self::resolve(cli, |key| std::env::var(key).ok())
    }

    fn resolve(cli: Cli, env: impl Fn(&str) -> Option<String>) -> Self {
        let output_format = if cli.json {
            OutputFormat::Json
        } else if cli.html {
            OutputFormat::Html
        } else {
            OutputFormat::Text
        };

        let input_format = if cli.text {
            InputFormat::Text
        } else {
            InputFormat::Json
        };

        Self {
            plan: cli.plan,
            output: cli.output,
            input_format,
            output_format,
            use_colors: !cli.no_color && colors_allowed(env),
            verbose: cli.verbose,
        }
    }
}

/// `NO_COLOR` with any non-empty value, or `TERM=dumb`, turns colors off.
fn colors_allowed(env: impl Fn(&str) -> Option<String>) -> bool {
    let no_color = env("NO_COLOR").is_some_and(|v| !v.is_empty());
    let dumb_term = env("TERM").is_some_and(|v| v == "dumb");
    !(no_color || dumb_term)
}

pub fn run(config: &RunConfig) -> Result<(), FilterError> {
    let collection = match &config.plan {
        Some(path) => {
            if !path.exists() {
                return Err(FilterError::PlanNotFound(path.clone()));
            }
            tracing::debug!(path = %path.display(), "reading plan file");
            plan::parse(File::open(path)?, config.input_format)?
        }
        None => {
            tracing::debug!("reading plan from stdin");
            plan::parse(io::stdin().lock(), config.input_format)?
        }
    };

    let options = RenderOptions::new(config.use_colors);
    let rendered = output::render(&collection, config.output_format, &options)?;

    match &config.output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            writer.write_all(rendered.as_bytes())?;
            writer.flush()?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }

    if config.verbose {
        eprintln!("{}", output::render_debug(&collection));
    }

    Ok(())
}

//! Command-line argument parsing
//!
//! Supports:
//! - Annotating a single file with an inline or file-based step definition
//! - Rendering every host of a YAML manifest
//! - Jumping to one step, or dumping parsed steps as JSON

use clap::Parser;
use std::path::PathBuf;

use crate::config::CodeStepsConfig;
use crate::render::PresentationMode;
use crate::syntax::LanguageId;

/// Walk through code one highlighted step at a time
#[derive(Parser, Debug)]
#[command(
    name = "codesteps",
    version,
    about = "Walk through code one highlighted step at a time"
)]
pub struct CliArgs {
    /// Source file to annotate
    #[arg(value_name = "FILE", required_unless_present = "manifest")]
    pub file: Option<PathBuf>,

    /// Language of the source (defaults to detection from the extension)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Step definition, e.g. "l1c1-l1c3:Keyword;l2:Body"
    #[arg(short, long, conflicts_with = "steps_file")]
    pub steps: Option<String>,

    /// Read the step definition from a file
    #[arg(long, value_name = "PATH")]
    pub steps_file: Option<PathBuf>,

    /// Trim surrounding whitespace from the source
    #[arg(long)]
    pub trim: bool,

    /// How active letters are shown
    #[arg(long, value_enum)]
    pub mode: Option<PresentationMode>,

    /// Show only step N (1-based)
    #[arg(long, value_name = "N")]
    pub step: Option<usize>,

    /// Print parsed steps as JSON instead of rendering
    #[arg(long)]
    pub json: bool,

    /// Print activation events and diagnostics as JSON lines
    #[arg(long)]
    pub events: bool,

    /// Disable ANSI colors
    #[arg(long)]
    pub no_color: bool,

    /// Render every host listed in a YAML manifest
    #[arg(long, value_name = "PATH", conflicts_with = "file")]
    pub manifest: Option<PathBuf>,
}

/// Where the step definition comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepsSource {
    Inline(String),
    File(PathBuf),
}

/// What to annotate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    File {
        path: PathBuf,
        language: String,
        steps: Option<StepsSource>,
    },
    Manifest(PathBuf),
}

/// Configuration derived from CLI arguments and user defaults
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub input: Input,
    pub trim: bool,
    pub mode: PresentationMode,
    /// 0-based step to show, converted from the 1-based flag
    pub step: Option<usize>,
    pub json: bool,
    pub events: bool,
    pub color: bool,
}

impl CliArgs {
    /// Convert parsed CLI args into startup configuration
    pub fn into_config(self, defaults: &CodeStepsConfig) -> Result<StartupConfig, String> {
        let input = match (self.manifest, self.file) {
            (Some(manifest), _) => Input::Manifest(manifest),
            (None, Some(path)) => {
                let language = self
                    .language
                    .unwrap_or_else(|| detect_language(&path, defaults));
                let steps = match (self.steps, self.steps_file) {
                    (Some(inline), _) => Some(StepsSource::Inline(inline)),
                    (None, Some(file)) => Some(StepsSource::File(file)),
                    (None, None) => None,
                };
                Input::File {
                    path,
                    language,
                    steps,
                }
            }
            (None, None) => return Err("Either FILE or --manifest is required".to_string()),
        };

        let step = match self.step {
            Some(0) => return Err("--step is 1-based, 0 is not a step".to_string()),
            Some(n) => Some(n - 1),
            None => None,
        };

        Ok(StartupConfig {
            input,
            trim: self.trim || defaults.trim,
            mode: self.mode.unwrap_or(defaults.presentation),
            step,
            json: self.json,
            events: self.events,
            color: !self.no_color,
        })
    }
}

fn detect_language(path: &std::path::Path, defaults: &CodeStepsConfig) -> String {
    match LanguageId::from_path(path) {
        LanguageId::PlainText => defaults.fallback_language.clone(),
        lang => lang.name().to_string(),
    }
}

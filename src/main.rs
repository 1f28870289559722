use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use codesteps::cli::{CliArgs, Input, StartupConfig, StepsSource};
use codesteps::config::CodeStepsConfig;
use codesteps::error::Diagnostic;
use codesteps::render::TerminalPresenter;
use codesteps::steps::Step;
use codesteps::syntax::HighlightTokenizer;
use codesteps::{CodeSteps, CodeStepsManager, HostOptions, RecordingObserver};

/// JSON dump of one host
#[derive(Serialize)]
struct HostReport<'a> {
    language: &'a str,
    lines: usize,
    letters: usize,
    steps: &'a [Step],
    diagnostics: &'a [Diagnostic],
}

impl<'a> HostReport<'a> {
    fn new(host: &'a CodeSteps) -> Self {
        Self {
            language: &host.options().language,
            lines: host.grid().line_count(),
            letters: host.grid().cell_count(),
            steps: host.steps(),
            diagnostics: host.diagnostics(),
        }
    }
}

fn main() -> Result<()> {
    codesteps::tracing::init();

    let args = CliArgs::parse();
    let defaults = CodeStepsConfig::load();
    let config = args.into_config(&defaults).map_err(anyhow::Error::msg)?;

    let presenter = TerminalPresenter::new(config.mode, config.color);
    let mut observer = RecordingObserver::new();
    let mut out = io::stdout().lock();

    match &config.input {
        Input::Manifest(path) => {
            let content = read(path)?;
            let mut manager = CodeStepsManager::parse_yaml(
                Box::new(HighlightTokenizer::new()),
                &content,
                &mut observer,
            )
            .with_context(|| format!("Invalid manifest {}", path.display()))?;

            for skipped in manager.skipped() {
                eprintln!("Skipped host #{}: {}", skipped.index, skipped.error);
            }

            for (i, host) in manager.hosts_mut().iter_mut().enumerate() {
                if i > 0 {
                    writeln!(out)?;
                }
                walk(host, &config, &presenter, &mut observer, &mut out)?;
            }
        }
        Input::File {
            path,
            language,
            steps,
        } => {
            let text = read(path)?;
            let steps = match steps {
                Some(StepsSource::Inline(definition)) => Some(definition.clone()),
                Some(StepsSource::File(steps_path)) => Some(read(steps_path)?),
                None => None,
            };

            let options = HostOptions {
                text,
                language: language.clone(),
                trim: config.trim,
                enabled: true,
                steps,
            };

            let mut tokenizer = HighlightTokenizer::new();
            let mut host = CodeSteps::new(options, &mut tokenizer, &mut observer)
                .with_context(|| format!("Cannot annotate {}", path.display()))?;
            walk(&mut host, &config, &presenter, &mut observer, &mut out)?;
        }
    }

    Ok(())
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Render one host: a single step, every step in order, or a JSON dump
fn walk(
    host: &mut CodeSteps,
    config: &StartupConfig,
    presenter: &TerminalPresenter,
    observer: &mut RecordingObserver,
    out: &mut impl Write,
) -> Result<()> {
    if config.json {
        serde_json::to_writer_pretty(&mut *out, &HostReport::new(host))?;
        writeln!(out)?;
    } else if let Some(step) = config.step {
        host.go_to(step, observer)?;
        write!(out, "{}", presenter.render(host))?;
    } else {
        loop {
            write!(out, "{}", presenter.render(host))?;
            if !host.next(observer) {
                break;
            }
            writeln!(out)?;
        }
    }

    if config.events {
        for event in observer.take() {
            writeln!(out, "{}", serde_json::to_string(&event)?)?;
        }
    }

    Ok(())
}

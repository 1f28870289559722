//! One annotated code block
//!
//! A [`CodeSteps`] host owns the letter grid built from its text, the parsed
//! steps and the navigator. Input adapters (keys, buttons, resize events)
//! call its methods explicitly; the host itself registers no listeners.

use serde::{Deserialize, Serialize};

use crate::error::{CodeStepsError, Diagnostic};
use crate::letters::{expand_tabs, LetterGrid};
use crate::navigator::Navigator;
use crate::observer::StepObserver;
use crate::steps::{parse_steps, Step};
use crate::syntax::Tokenizer;

fn default_language() -> String {
    "plaintext".to_string()
}

fn default_enabled() -> bool {
    true
}

/// Everything a host element provides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostOptions {
    /// Raw code text
    pub text: String,
    /// Language identifier handed to the tokenizer
    #[serde(default = "default_language")]
    pub language: String,
    /// Trim surrounding whitespace from the text before indexing
    #[serde(default)]
    pub trim: bool,
    /// Whether navigation input is accepted
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Step definition; `None` means one whole-code step
    #[serde(default)]
    pub steps: Option<String>,
}

impl HostOptions {
    pub fn new(text: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: language.into(),
            trim: false,
            enabled: true,
            steps: None,
        }
    }

    pub fn with_steps(mut self, steps: impl Into<String>) -> Self {
        self.steps = Some(steps.into());
        self
    }

    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Text as it will be indexed: tabs expanded, optionally trimmed
    pub fn normalized_text(&self) -> String {
        let text = expand_tabs(&self.text);
        if self.trim {
            text.trim().to_string()
        } else {
            text
        }
    }
}

/// Measures the rendered height of a description text
pub trait DescriptionMeasure {
    fn measure(&self, text: &str) -> f32;
}

/// Measures descriptions by wrapped line count at a fixed width
#[derive(Debug, Clone, Copy)]
pub struct LineCountMeasure {
    /// Available width in characters
    pub width: usize,
    pub line_height: f32,
}

impl DescriptionMeasure for LineCountMeasure {
    fn measure(&self, text: &str) -> f32 {
        let width = self.width.max(1);
        let lines: usize = text
            .split('\n')
            .map(|line| line.chars().count().div_ceil(width).max(1))
            .sum();
        lines as f32 * self.line_height
    }
}

/// An annotated code block with its steps and navigation state
#[derive(Debug, Clone)]
pub struct CodeSteps {
    options: HostOptions,
    grid: LetterGrid,
    navigator: Navigator,
    diagnostics: Vec<Diagnostic>,
    enabled: bool,
    descriptions_height: Option<f32>,
}

impl CodeSteps {
    /// Build a host: tokenize, index, parse steps and, when enabled,
    /// activate the first step.
    ///
    /// Fails on empty text or when the tokenizer cannot handle the language.
    /// Step-definition problems are reported to `observer` as diagnostics.
    pub fn new(
        options: HostOptions,
        tokenizer: &mut dyn Tokenizer,
        observer: &mut dyn StepObserver,
    ) -> Result<Self, CodeStepsError> {
        let text = options.normalized_text();
        if text.is_empty() {
            return Err(CodeStepsError::EmptyText);
        }

        let tree = tokenizer.tokenize(&text, &options.language)?;
        let grid = LetterGrid::from_tree(&tree);
        let parsed = parse_steps(options.steps.as_deref(), &grid);

        for diagnostic in &parsed.diagnostics {
            observer.diagnostic(diagnostic);
        }

        tracing::debug!(
            "Built host: {} lines, {} letters, {} steps ({})",
            grid.line_count(),
            grid.cell_count(),
            parsed.steps.len(),
            options.language
        );

        let enabled = options.enabled;
        let mut host = Self {
            options,
            grid,
            navigator: Navigator::new(parsed.steps),
            diagnostics: parsed.diagnostics,
            enabled,
            descriptions_height: None,
        };

        if host.enabled {
            host.navigator.activate_initial(observer)?;
        }

        Ok(host)
    }

    pub fn options(&self) -> &HostOptions {
        &self.options
    }

    pub fn grid(&self) -> &LetterGrid {
        &self.grid
    }

    pub fn steps(&self) -> &[Step] {
        self.navigator.steps()
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn current(&self) -> Option<usize> {
        self.navigator.current()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Tallest description measured by the last [`CodeSteps::resize`]
    pub fn descriptions_height(&self) -> Option<f32> {
        self.descriptions_height
    }

    /// Next step; ignored while disabled or at the last step
    pub fn next(&mut self, observer: &mut dyn StepObserver) -> bool {
        if !self.enabled {
            tracing::trace!("next ignored, host disabled");
            return false;
        }
        self.navigator.next(observer)
    }

    /// Previous step; ignored while disabled or at the first step
    pub fn previous(&mut self, observer: &mut dyn StepObserver) -> bool {
        if !self.enabled {
            tracing::trace!("previous ignored, host disabled");
            return false;
        }
        self.navigator.previous(observer)
    }

    /// Jump to `index`. Out-of-range indices fail even while disabled;
    /// valid ones are ignored until the host is enabled.
    pub fn go_to(
        &mut self,
        index: usize,
        observer: &mut dyn StepObserver,
    ) -> Result<(), CodeStepsError> {
        let count = self.navigator.step_count();
        if index >= count {
            return Err(CodeStepsError::IndexOutOfRange { index, count });
        }
        if !self.enabled {
            tracing::trace!("go_to({}) ignored, host disabled", index);
            return Ok(());
        }
        self.navigator.go_to(index, observer)
    }

    /// Accept input again and re-activate the remembered step
    pub fn enable(&mut self, observer: &mut dyn StepObserver) -> Result<(), CodeStepsError> {
        if self.enabled && !self.navigator.is_suspended() && self.navigator.current().is_some() {
            return Ok(());
        }
        self.enabled = true;
        self.navigator.resume(observer)
    }

    /// Stop accepting input and clear every emphasis
    pub fn disable(&mut self, observer: &mut dyn StepObserver) {
        self.enabled = false;
        self.navigator.suspend(observer);
    }

    /// Recompute layout-dependent metrics. Returns the tallest description
    /// height, or `None` while disabled.
    pub fn resize(&mut self, measure: &dyn DescriptionMeasure) -> Option<f32> {
        if !self.enabled {
            return None;
        }

        let height = self
            .navigator
            .steps()
            .iter()
            .filter_map(Step::description)
            .map(|text| measure.measure(text))
            .fold(0.0_f32, f32::max);

        self.descriptions_height = Some(height);
        Some(height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::{NoopObserver, RecordingObserver};
    use crate::syntax::PlainTokenizer;

    fn host(options: HostOptions) -> CodeSteps {
        CodeSteps::new(options, &mut PlainTokenizer, &mut NoopObserver).unwrap()
    }

    #[test]
    fn test_tabs_expand_and_trim() {
        let opts = HostOptions::new("\n\tx\n", "plain").with_trim(true);
        assert_eq!(opts.normalized_text(), "x");
        let opts = HostOptions::new("\tx", "plain");
        assert_eq!(opts.normalized_text(), "    x");
    }

    #[test]
    fn test_empty_text_is_fatal() {
        let err = CodeSteps::new(
            HostOptions::new("  \n ", "plain").with_trim(true),
            &mut PlainTokenizer,
            &mut NoopObserver,
        )
        .unwrap_err();
        assert_eq!(err, CodeStepsError::EmptyText);
    }

    #[test]
    fn test_enabled_host_starts_on_first_step() {
        let host = host(HostOptions::new("ab\ncd", "plain").with_steps("l2:x;l1:y"));
        assert_eq!(host.current(), Some(0));
        assert!(host.navigator().active().letters.iter().all(|l| l.line == 1));
    }

    #[test]
    fn test_disabled_host_ignores_navigation() {
        let mut host = host(
            HostOptions::new("ab\ncd", "plain")
                .with_steps("l1:x;l2:y")
                .with_enabled(false),
        );
        assert_eq!(host.current(), None);
        assert!(!host.next(&mut NoopObserver));
        host.go_to(1, &mut NoopObserver).unwrap();
        assert_eq!(host.current(), None);
        assert_eq!(
            host.go_to(5, &mut NoopObserver),
            Err(CodeStepsError::IndexOutOfRange { index: 5, count: 2 })
        );

        host.enable(&mut NoopObserver).unwrap();
        assert_eq!(host.current(), Some(0));
        assert!(host.next(&mut NoopObserver));
    }

    #[test]
    fn test_disable_clears_emphasis_and_enable_restores() {
        let mut host = host(HostOptions::new("ab\ncd", "plain").with_steps("l1:x;l2:y"));
        host.next(&mut NoopObserver);
        host.disable(&mut NoopObserver);
        assert!(host.navigator().active().letters.is_empty());
        assert!(!host.previous(&mut NoopObserver));

        let mut rec = RecordingObserver::new();
        host.enable(&mut rec).unwrap();
        assert_eq!(host.current(), Some(1));
        assert_eq!(rec.events.len(), 1);
    }

    #[test]
    fn test_enable_when_already_enabled_is_noop() {
        let mut host = host(HostOptions::new("ab", "plain"));
        let mut rec = RecordingObserver::new();
        host.enable(&mut rec).unwrap();
        assert!(rec.events.is_empty());
    }

    #[test]
    fn test_diagnostics_reach_observer() {
        let mut rec = RecordingObserver::new();
        let host = CodeSteps::new(
            HostOptions::new("ab", "plain").with_steps("l1-l1-l1:x;l1:y"),
            &mut PlainTokenizer,
            &mut rec,
        )
        .unwrap();
        assert_eq!(host.diagnostics().len(), 1);
        assert_eq!(rec.diagnostics().count(), 1);
    }

    #[test]
    fn test_resize_measures_tallest_description() {
        let mut host = host(
            HostOptions::new("ab\ncd", "plain")
                .with_steps("l1:short;l2:a much longer description;l1:"),
        );
        let measure = LineCountMeasure {
            width: 10,
            line_height: 2.0,
        };
        assert_eq!(host.resize(&measure), Some(6.0));
        assert_eq!(host.descriptions_height(), Some(6.0));

        host.disable(&mut NoopObserver);
        assert_eq!(host.resize(&measure), None);
    }

    #[test]
    fn test_options_from_yaml_defaults() {
        let opts: HostOptions = serde_yaml::from_str("text: \"x = 1\"").unwrap();
        assert_eq!(opts.language, "plaintext");
        assert!(opts.enabled);
        assert!(!opts.trim);
        assert_eq!(opts.steps, None);
    }
}

//! Outbound events: step activation, deactivation and parse diagnostics

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::Diagnostic;
use crate::letters::LetterRef;

/// What became active on a step transition
#[derive(Debug, Clone, Copy)]
pub struct Activation<'a> {
    pub index: usize,
    pub letters: &'a BTreeSet<LetterRef>,
    pub description: Option<&'a str>,
    pub is_first: bool,
    pub is_last: bool,
}

/// Receives engine events. Every method defaults to doing nothing.
pub trait StepObserver {
    fn step_activated(&mut self, _activation: &Activation<'_>) {}

    fn step_deactivated(&mut self, _index: usize) {}

    fn diagnostic(&mut self, _diagnostic: &Diagnostic) {}
}

/// Observer that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl StepObserver for NoopObserver {}

/// Owned copy of an event, as collected by [`RecordingObserver`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StepEvent {
    Activated {
        index: usize,
        letters: Vec<LetterRef>,
        description: Option<String>,
        is_first: bool,
        is_last: bool,
    },
    Deactivated {
        index: usize,
    },
    Diagnostic(Diagnostic),
}

/// Collects every event in order
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    pub events: Vec<StepEvent>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain recorded events
    pub fn take(&mut self) -> Vec<StepEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.events.iter().filter_map(|e| match e {
            StepEvent::Diagnostic(d) => Some(d),
            _ => None,
        })
    }
}

impl StepObserver for RecordingObserver {
    fn step_activated(&mut self, activation: &Activation<'_>) {
        self.events.push(StepEvent::Activated {
            index: activation.index,
            letters: activation.letters.iter().copied().collect(),
            description: activation.description.map(str::to_string),
            is_first: activation.is_first,
            is_last: activation.is_last,
        });
    }

    fn step_deactivated(&mut self, index: usize) {
        self.events.push(StepEvent::Deactivated { index });
    }

    fn diagnostic(&mut self, diagnostic: &Diagnostic) {
        self.events.push(StepEvent::Diagnostic(diagnostic.clone()));
    }
}

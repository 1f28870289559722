//! Step navigation state machine
//!
//! States are "uninitialized" (`current() == None`) and "on step i". Every
//! transition deactivates the previously active step and activates the new
//! one before returning, so callers never observe zero or two active steps
//! once navigation has started.

use std::collections::HashSet;

use crate::error::CodeStepsError;
use crate::letters::LetterRef;
use crate::observer::{Activation, StepObserver};
use crate::steps::Step;

/// What is currently shown
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveState {
    /// Emphasized letters
    pub letters: HashSet<LetterRef>,
    /// Index of the step whose description is visible
    pub description: Option<usize>,
    pub can_previous: bool,
    pub can_next: bool,
}

#[derive(Debug, Clone)]
pub struct Navigator {
    steps: Vec<Step>,
    current: Option<usize>,
    active: ActiveState,
    /// Emphasis cleared by `suspend`; the current step is not active
    suspended: bool,
}

impl Navigator {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps,
            current: None,
            active: ActiveState::default(),
            suspended: false,
        }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn current_step(&self) -> Option<&Step> {
        self.current.and_then(|i| self.steps.get(i))
    }

    pub fn active(&self) -> &ActiveState {
        &self.active
    }

    pub fn is_emphasized(&self, letter: LetterRef) -> bool {
        self.active.letters.contains(&letter)
    }

    /// Index of the step whose description is visible
    pub fn visible_description(&self) -> Option<usize> {
        self.active.description
    }

    pub fn can_previous(&self) -> bool {
        self.active.can_previous
    }

    pub fn can_next(&self) -> bool {
        self.active.can_next
    }

    /// Activate step 0. Only valid before navigation has started; later
    /// calls are ignored.
    pub fn activate_initial(
        &mut self,
        observer: &mut dyn StepObserver,
    ) -> Result<(), CodeStepsError> {
        if self.current.is_some() {
            tracing::debug!("activate_initial ignored, already on step {:?}", self.current);
            return Ok(());
        }
        self.go_to(0, observer)
    }

    /// Move forward one step. Returns false (and does nothing) at the last
    /// step or before navigation started.
    pub fn next(&mut self, observer: &mut dyn StepObserver) -> bool {
        match self.current {
            Some(i) if i + 1 < self.steps.len() => {
                self.transition(i + 1, observer);
                true
            }
            _ => false,
        }
    }

    /// Move back one step. Returns false (and does nothing) at step 0 or
    /// before navigation started.
    pub fn previous(&mut self, observer: &mut dyn StepObserver) -> bool {
        match self.current {
            Some(i) if i > 0 => {
                self.transition(i - 1, observer);
                true
            }
            _ => false,
        }
    }

    /// Jump to step `index`
    pub fn go_to(
        &mut self,
        index: usize,
        observer: &mut dyn StepObserver,
    ) -> Result<(), CodeStepsError> {
        if index >= self.steps.len() {
            return Err(CodeStepsError::IndexOutOfRange {
                index,
                count: self.steps.len(),
            });
        }
        self.transition(index, observer);
        Ok(())
    }

    /// Clear all emphasis while remembering the current step
    pub fn suspend(&mut self, observer: &mut dyn StepObserver) {
        if self.suspended {
            return;
        }
        if let Some(i) = self.current {
            self.deactivate(i, observer);
        }
        self.active = ActiveState::default();
        self.suspended = true;
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Re-activate the remembered step, or step 0 if navigation never started
    pub fn resume(&mut self, observer: &mut dyn StepObserver) -> Result<(), CodeStepsError> {
        let index = self.current.unwrap_or(0);
        self.go_to(index, observer)
    }

    fn transition(&mut self, index: usize, observer: &mut dyn StepObserver) {
        if let Some(old) = self.current.filter(|_| !self.suspended) {
            self.deactivate(old, observer);
        }
        self.suspended = false;
        self.activate(index, observer);
        self.current = Some(index);
        tracing::debug!("Now on step {} of {}", index + 1, self.steps.len());
    }

    fn deactivate(&mut self, index: usize, observer: &mut dyn StepObserver) {
        let step = &self.steps[index];
        for letter in &step.letters {
            self.active.letters.remove(letter);
        }
        if self.active.description == Some(index) {
            self.active.description = None;
        }
        observer.step_deactivated(index);
    }

    fn activate(&mut self, index: usize, observer: &mut dyn StepObserver) {
        let step = &self.steps[index];
        self.active.letters.extend(step.letters.iter().copied());
        if step.has_description() {
            self.active.description = Some(index);
        }

        let is_first = index == 0;
        let is_last = index + 1 == self.steps.len();
        self.active.can_previous = !is_first;
        self.active.can_next = !is_last;

        observer.step_activated(&Activation {
            index,
            letters: &step.letters,
            description: step.description(),
            is_first,
            is_last,
        });
    }
}

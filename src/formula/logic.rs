//! Append-only step history with a redo stack and condensed view.

use super::types::{CondensedStep, FormulaStep};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormulaLog {
    steps: Vec<FormulaStep>,
    redo_stack: Vec<FormulaStep>,
    condensed: Vec<CondensedStep>,
}

impl FormulaLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log holding `steps` with an empty redo stack.
    pub fn from_steps(steps: Vec<FormulaStep>) -> Self {
        let mut log = Self {
            steps,
            redo_stack: Vec::new(),
            condensed: Vec::new(),
        };
        log.rebuild_condensed();
        log
    }

    pub fn steps(&self) -> &[FormulaStep] {
        &self.steps
    }

    pub fn redo_stack(&self) -> &[FormulaStep] {
        &self.redo_stack
    }

    pub fn condensed(&self) -> &[CondensedStep] {
        &self.condensed
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn last(&self) -> Option<&FormulaStep> {
        self.steps.last()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Appends a step; any redo history is discarded.
    pub fn commit(&mut self, step: FormulaStep) {
        self.steps.push(step);
        self.redo_stack.clear();
        self.rebuild_condensed();
    }

    /// Moves the latest step onto the redo stack and returns it.
    pub fn undo(&mut self) -> Option<FormulaStep> {
        let step = self.steps.pop()?;
        self.redo_stack.push(step.clone());
        self.rebuild_condensed();
        Some(step)
    }

    /// Moves the latest undone step back onto the log and returns it.
    pub fn redo(&mut self) -> Option<FormulaStep> {
        let step = self.redo_stack.pop()?;
        self.steps.push(step.clone());
        self.rebuild_condensed();
        Some(step)
    }

    /// Plain-text display lines, one per condensed entry.
    pub fn display_lines(&self) -> Vec<String> {
        self.condensed
            .iter()
            .enumerate()
            .map(|(i, step)| step.display_line(i + 1))
            .collect()
    }

    /// Only adjacent steps with identical text merge.
    fn rebuild_condensed(&mut self) {
        self.condensed.clear();
        for step in &self.steps {
            match self.condensed.last_mut() {
                Some(last) if last.text == step.text => {
                    last.repeat += 1;
                    last.potential_after = step.potential_after;
                }
                _ => self.condensed.push(CondensedStep {
                    text: step.text.clone(),
                    repeat: 1,
                    potential_after: step.potential_after,
                }),
            }
        }
    }
}

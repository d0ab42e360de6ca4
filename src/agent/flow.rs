//! Flow step editing
//!
//! Every mutation leaves `order` equal to the step's position, i.e. a dense
//! `0..n` sequence.

use crate::store::models::{FlowStep, StepKind};

/// Direction for [`move_step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            _ => anyhow::bail!("Unknown direction: {}", s),
        }
    }
}

/// Placeholder content for a freshly added step
pub fn placeholder(kind: StepKind) -> &'static str {
    match kind {
        StepKind::Prompt => "Enter prompt text...",
        StepKind::Intent => "Define intent...",
    }
}

/// Rewrite `order` to match position
pub fn renumber(steps: &mut [FlowStep]) {
    for (index, step) in steps.iter_mut().enumerate() {
        step.order = index;
    }
}

/// Sort steps by their declared order (stable for ties) and renumber.
/// Used for step lists that arrive from outside the store.
pub fn normalize(steps: &mut [FlowStep]) {
    steps.sort_by_key(|step| step.order);
    renumber(steps);
}

/// Append a step with placeholder content, returning its id
pub fn add_step(steps: &mut Vec<FlowStep>, kind: StepKind) -> String {
    let step = FlowStep::new(kind, placeholder(kind), steps.len());
    let id = step.id.clone();
    steps.push(step);
    id
}

/// Replace a step's content. Returns false if no step has that id.
pub fn update_content(steps: &mut [FlowStep], step_id: &str, content: &str) -> bool {
    match steps.iter_mut().find(|step| step.id == step_id) {
        Some(step) => {
            step.body.set_content(content);
            true
        }
        None => false,
    }
}

/// Remove a step. Returns false if no step has that id.
pub fn delete_step(steps: &mut Vec<FlowStep>, step_id: &str) -> bool {
    let before = steps.len();
    steps.retain(|step| step.id != step_id);
    renumber(steps);
    steps.len() != before
}

/// Swap a step with its neighbour. Moving past either end is a no-op.
/// Returns true if the sequence changed.
pub fn move_step(steps: &mut [FlowStep], step_id: &str, direction: Direction) -> bool {
    let Some(index) = steps.iter().position(|step| step.id == step_id) else {
        return false;
    };

    let target = match direction {
        Direction::Up if index == 0 => return false,
        Direction::Up => index - 1,
        Direction::Down if index + 1 == steps.len() => return false,
        Direction::Down => index + 1,
    };

    steps.swap(index, target);
    renumber(steps);
    true
}

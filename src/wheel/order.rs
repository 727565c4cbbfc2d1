use crate::foundation::core::Rgb8;
use crate::foundation::error::{WheelError, WheelResult};

/// One entry on the wheel.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Candidate {
    /// Display text drawn on the segment.
    pub label: String,
    /// Segment fill color.
    pub color: Rgb8,
}

impl Candidate {
    /// Create a candidate from a label and a color.
    pub fn new(label: impl Into<String>, color: Rgb8) -> Self {
        Self {
            label: label.into(),
            color,
        }
    }
}

/// Candidates in draw order plus the segment the animation must settle on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderedWheel {
    candidates: Vec<Candidate>,
    source_indices: Vec<usize>,
    terminal_segment_index: usize,
}

impl OrderedWheel {
    /// Candidates in draw order; segment `i` shows `candidates()[i]`.
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Position of each drawn candidate in the caller's original list.
    pub fn source_indices(&self) -> &[usize] {
        &self.source_indices
    }

    /// Number of segments; always `>= 1`.
    pub fn segment_count(&self) -> usize {
        self.candidates.len()
    }

    /// Segment that ends up under the pointer.
    pub fn terminal_segment_index(&self) -> usize {
        self.terminal_segment_index
    }

    /// The winning candidate.
    pub fn winner(&self) -> &Candidate {
        &self.candidates[self.terminal_segment_index]
    }
}

/// Reorder `candidates` so the winner at `selected_index` sits at a known segment.
///
/// The winner is removed, appended to the end, and the whole list is reversed. The result is a
/// pure function of `(candidates.len(), selected_index)`.
pub fn order(candidates: &[Candidate], selected_index: usize) -> WheelResult<OrderedWheel> {
    if candidates.is_empty() {
        return Err(WheelError::EmptyInput);
    }
    if selected_index >= candidates.len() {
        return Err(WheelError::invalid_selection(
            selected_index,
            candidates.len(),
        ));
    }

    let mut source_indices: Vec<usize> = (0..candidates.len())
        .filter(|&i| i != selected_index)
        .collect();
    source_indices.push(selected_index);
    let appended_at = source_indices.len() - 1;
    source_indices.reverse();
    let terminal_segment_index = source_indices.len() - 1 - appended_at;

    let candidates = source_indices
        .iter()
        .map(|&i| candidates[i].clone())
        .collect();

    Ok(OrderedWheel {
        candidates,
        source_indices,
        terminal_segment_index,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/wheel/order.rs"]
mod tests;

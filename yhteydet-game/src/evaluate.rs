//! Guess evaluator: judges a four-tile selection.

use crate::data::CATEGORY_COUNT;

/// Outcome of classifying one submitted selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// All four tiles share the given category.
    AllCorrect(u8),
    /// Exactly three of the four tiles share a category.
    OneAway,
    Wrong,
}

/// Classify the resolved category memberships of a four-tile selection.
///
/// An unresolvable tile id (`None`) classifies as `Wrong`; it indicates a
/// caller-side state bug, not a player error.
#[must_use]
pub fn classify(resolved: [Option<u8>; 4]) -> Verdict {
    let mut categories = [0u8; 4];
    for (slot, membership) in categories.iter_mut().zip(resolved) {
        match membership {
            Some(category) => *slot = category,
            None => {
                log::warn!("selection references a tile outside the current puzzle");
                return Verdict::Wrong;
            }
        }
    }

    if categories.iter().all(|&c| c == categories[0]) {
        return Verdict::AllCorrect(categories[0]);
    }

    let mut counts = [0u8; CATEGORY_COUNT];
    for &category in &categories {
        if let Some(count) = counts.get_mut(usize::from(category)) {
            *count += 1;
        }
    }
    if counts.iter().any(|&count| count == 3) {
        Verdict::OneAway
    } else {
        Verdict::Wrong
    }
}

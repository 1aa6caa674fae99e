//! Span conflict resolution

use super::bank::PatternBank;
use crate::domain::EntitySpan;

/// Resolve overlapping candidates into a non-overlapping span set
///
/// Stable-sorts candidates by ascending start offset, ties by descending
/// bank priority, then greedily accepts each candidate that does not
/// overlap an already-accepted span. Earlier start wins first refusal;
/// among equal starts, higher priority wins; among equal (start,
/// priority), the candidate assembled first wins. An accepted
/// low-priority span therefore blocks a later higher-priority span that
/// starts inside it. That ordering behavior is part of the published
/// output contract; do not replace it with global-priority resolution.
///
/// Always terminates with a valid (possibly empty) set, in ascending
/// start order.
pub fn resolve_conflicts(mut candidates: Vec<EntitySpan>, bank: &PatternBank) -> Vec<EntitySpan> {
    candidates.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then_with(|| bank.priority(&b.label).cmp(&bank.priority(&a.label)))
    });

    let mut accepted: Vec<EntitySpan> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if accepted.iter().any(|kept| kept.overlaps(&candidate)) {
            continue;
        }
        accepted.push(candidate);
    }

    accepted
}

//! Input-to-target matching
//!
//! A target matches when its meaning starts with the typed text, ignoring
//! case only; whitespace is significant. Ties go to the earliest target in
//! the list, which is creation order.

use super::state::Target;

/// Outcome of matching the input buffer against the targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FocusResolution {
    /// Index of the focused target
    pub index: Option<usize>,
    /// The focused target's meaning equals the input
    pub exact: bool,
}

/// Comparison form of typed or target text
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
}

/// Prefix (and exact) match of already-normalized input against a target
fn match_kind(input: &str, target: &Target) -> Option<bool> {
    let meaning = normalize(&target.match_text);
    if meaning.is_empty() || !meaning.starts_with(input) {
        return None;
    }
    Some(meaning == input)
}

/// Find the focused target for `input`. Empty input focuses nothing; targets
/// with empty meanings or malformed geometry never match.
pub fn resolve_focus(input: &str, targets: &[Target]) -> FocusResolution {
    let input = normalize(input);
    if input.is_empty() {
        return FocusResolution::default();
    }

    targets
        .iter()
        .enumerate()
        .filter(|(_, t)| t.is_well_formed())
        .find_map(|(i, t)| {
            match_kind(&input, t).map(|exact| FocusResolution {
                index: Some(i),
                exact,
            })
        })
        .unwrap_or_default()
}

/// Set the focus flag on exactly `index` and clear it everywhere else
pub fn apply_focus(targets: &mut [Target], index: Option<usize>) {
    for (i, target) in targets.iter_mut().enumerate() {
        target.is_focused = Some(i) == index;
    }
}

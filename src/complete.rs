//! Prefix completion.
//!
//! Completion re-tokenizes the partial input. While the first token is
//! still being typed it is prefix-matched against every registry name;
//! once the command name is complete, the command's own completion hook
//! (if any) supplies candidates for the argument under the cursor. Both
//! paths share the three-way contract: zero matches do nothing, one
//! match completes the token, several are printed for the user.

use heapless::{String, Vec};

use crate::config::{MAX_COMMANDS, MAX_LINE_LEN};
use crate::registry::Registry;
use crate::token;

/// What one completion attempt decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Nothing matched; leave the input untouched.
    None,
    /// Exactly one match: the new content of the input buffer, ending
    /// with a separator (the completed token is quoted when it contains
    /// whitespace).
    Replace(String<MAX_LINE_LEN>),
    /// Several matches: print them and redraw the prompt with the
    /// original partial input intact.
    Candidates(Vec<&'static str, MAX_COMMANDS>),
}

/// Compute the completion action for `input`.
pub fn complete(registry: &Registry, input: &str) -> Action {
    let Ok(tokens) = token::tokenize(input) else {
        return Action::None;
    };
    let Some(&first) = tokens.first() else {
        return Action::None;
    };

    let open = !input
        .as_bytes()
        .last()
        .copied()
        .is_some_and(token::is_delimiter);

    if tokens.len() == 1 && open && input.ends_with(first) {
        // Still typing the command name.
        let matches = name_matches(registry, first);
        return resolve(input, first, matches);
    }

    // Command name complete: defer to the command's own hook.
    let Some(entry) = registry.find(first) else {
        return Action::None;
    };
    let Some(completer) = entry.completer else {
        return Action::None;
    };
    let candidates = completer(&tokens);

    let partial = if open {
        match tokens.last().copied() {
            // An unterminated quoted span hides the real tail; there is
            // nothing safe to complete.
            Some(last) if !input.ends_with(last) => return Action::None,
            Some(last) => last,
            None => "",
        }
    } else {
        ""
    };
    let mut matches: Vec<&'static str, MAX_COMMANDS> = Vec::new();
    for &candidate in &candidates {
        if candidate.starts_with(partial) && matches.push(candidate).is_err() {
            break;
        }
    }
    resolve(input, partial, matches)
}

/// Registry names starting with `prefix`, in registration order.
pub fn name_matches(registry: &Registry, prefix: &str) -> Vec<&'static str, MAX_COMMANDS> {
    let mut matches: Vec<&'static str, MAX_COMMANDS> = Vec::new();
    for entry in registry.entries() {
        if entry.schema.name.starts_with(prefix) {
            // Capacity equals the registry capacity, so this never
            // overflows.
            let _ = matches.push(entry.schema.name);
        }
    }
    matches
}

/// Apply the three-way match contract for one partial token.
fn resolve(input: &str, partial: &str, matches: Vec<&'static str, MAX_COMMANDS>) -> Action {
    match matches.len() {
        0 => Action::None,
        1 => replace(input, partial, matches[0]).map_or(Action::None, Action::Replace),
        _ => Action::Candidates(matches),
    }
}

/// Rebuild the input with the partial trailing token replaced by the
/// completed one plus a separator. `None` when the result would not fit.
fn replace(input: &str, partial: &str, completed: &str) -> Option<String<MAX_LINE_LEN>> {
    let keep = &input[..input.len() - partial.len()];
    let mut next: String<MAX_LINE_LEN> = String::new();
    next.push_str(keep).ok()?;
    let quote = completed.as_bytes().iter().any(|&b| token::is_delimiter(b));
    if quote {
        next.push('"').ok()?;
    }
    next.push_str(completed).ok()?;
    if quote {
        next.push('"').ok()?;
    }
    next.push(' ').ok()?;
    Some(next)
}

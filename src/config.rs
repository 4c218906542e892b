//! Runtime options and fixed capacity limits.
//!
//! Capacities are compile-time constants so every buffer in the engine
//! has a known size; exceeding one at runtime is a fatal
//! [`BufferExhausted`](crate::error::Error::BufferExhausted) condition,
//! never a silent truncation. Behavioral switches live in [`Config`].

/// Maximum length in bytes of one input line.
///
/// Bounds the session input buffer and every history slot. Lines longer
/// than this are rejected as buffer exhaustion.
pub const MAX_LINE_LEN: usize = 256;

/// Maximum number of tokens per line, the command name included.
pub const MAX_TOKENS: usize = 16;

/// Maximum number of fields in one command schema.
///
/// Bounds the field tracker bitset. Schemas with more fields are
/// rejected when the registry is built.
pub const MAX_FIELDS: usize = 16;

/// Maximum number of registered commands, builtins included.
pub const MAX_COMMANDS: usize = 32;

/// Maximum number of retained history entries.
///
/// Appending past this evicts the oldest entry; its global index is
/// never reused.
pub const MAX_HISTORY: usize = 16;

/// Maximum length of one precomputed usage string.
pub const MAX_USAGE_LEN: usize = 128;

/// Maximum number of candidates a completion hook may report.
pub const MAX_CANDIDATES: usize = 8;

/// Behavioral options of one session.
///
/// Capacities are fixed at compile time (see the `MAX_*` constants);
/// everything here can vary per session.
#[derive(Debug, Clone)]
pub struct Config {
    /// Prompt text written by [`Shell::write_prompt`](crate::shell::Shell::write_prompt).
    pub prompt: &'static str,
    /// Accept the case-insensitive `y`/`n`/`yes`/`no`/`0`/`1` aliases for
    /// bool fields in addition to the exact `true`/`false` literals.
    pub bool_aliases: bool,
    /// Emit ANSI color codes for the prompt and error reporting.
    pub color: bool,
    /// Echo typed characters and line edits back to the output sink.
    pub echo: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: "> ",
            bool_aliases: false,
            color: false,
            echo: true,
        }
    }
}

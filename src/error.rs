//! Common error types for the command engine.

/// Errors produced while tokenizing, binding, or dispatching one line.
///
/// Everything except [`BufferExhausted`](Error::BufferExhausted) is
/// recovered at the dispatcher boundary: it is reported to the user,
/// becomes the session's last outcome, and never unwinds past the line
/// that caused it.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// A non-default field was still unbound when input ran out.
    MissingArg,
    /// A token could not be parsed as its field's declared type.
    InvalidArg,
    /// Tokens remained after every positional field was bound.
    TooManyArgs,
    /// A field was bound twice in one pass.
    RepeatedArg,
    /// A `--` token matched no declared flag field.
    UnknownFlag,
    /// The line named no registered command.
    UnknownCommand,
    /// A history index outside the retained window.
    LineNotFound,
    /// A handler failed with an opaque cause of its own.
    Command(&'static str),
    /// A failure surfaced while re-running a history entry.
    UserCommand,
    /// A fixed capacity was exceeded. Not recoverable: this signals
    /// misconfigured static limits, and the embedder is expected to
    /// abort or reset the session rather than continue.
    BufferExhausted,
}

impl Error {
    /// Short human-readable cause, used by `$?` and error reporting.
    pub fn as_str(&self) -> &'static str {
        match *self {
            Error::MissingArg => "missing argument",
            Error::InvalidArg => "invalid argument",
            Error::TooManyArgs => "too many arguments",
            Error::RepeatedArg => "repeated argument",
            Error::UnknownFlag => "unknown flag",
            Error::UnknownCommand => "unknown command",
            Error::LineNotFound => "line not found",
            Error::Command(cause) => cause,
            Error::UserCommand => "user command failed",
            Error::BufferExhausted => "buffer exhausted",
        }
    }
}

/// A failed write to the output sink is indistinguishable from an
/// exhausted sink buffer, so it maps to the fatal capacity error.
impl From<core::fmt::Error> for Error {
    fn from(_: core::fmt::Error) -> Self {
        Error::BufferExhausted
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match *self {
            Error::MissingArg => defmt::write!(f, "MissingArg"),
            Error::InvalidArg => defmt::write!(f, "InvalidArg"),
            Error::TooManyArgs => defmt::write!(f, "TooManyArgs"),
            Error::RepeatedArg => defmt::write!(f, "RepeatedArg"),
            Error::UnknownFlag => defmt::write!(f, "UnknownFlag"),
            Error::UnknownCommand => defmt::write!(f, "UnknownCommand"),
            Error::LineNotFound => defmt::write!(f, "LineNotFound"),
            Error::Command(cause) => defmt::write!(f, "Command({=str})", cause),
            Error::UserCommand => defmt::write!(f, "UserCommand"),
            Error::BufferExhausted => defmt::write!(f, "BufferExhausted"),
        }
    }
}

/// Configuration errors reported while building a registry.
///
/// These are fatal: they indicate a broken command declaration, not a
/// user-input problem, and are surfaced once at construction so they
/// can never occur at dispatch time.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ConfigError {
    /// A defaulted field precedes a field without a default.
    DefaultBeforeRequired,
    /// A remaining-tokens field is not the last field, or appears twice.
    RemainingNotLast,
    /// A schema mixes flag fields with a remaining-tokens field.
    FlagWithRemaining,
    /// A schema declares more fields than the tracker can hold.
    TooManyFields,
    /// A default value does not fit its field's declared type.
    BadDefault,
    /// Two commands (builtin or user) share a name.
    DuplicateName,
    /// The merged command set exceeds [`MAX_COMMANDS`](crate::config::MAX_COMMANDS).
    TooManyCommands,
    /// A generated usage string exceeds [`MAX_USAGE_LEN`](crate::config::MAX_USAGE_LEN).
    UsageTooLong,
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            ConfigError::DefaultBeforeRequired => defmt::write!(f, "DefaultBeforeRequired"),
            ConfigError::RemainingNotLast => defmt::write!(f, "RemainingNotLast"),
            ConfigError::FlagWithRemaining => defmt::write!(f, "FlagWithRemaining"),
            ConfigError::TooManyFields => defmt::write!(f, "TooManyFields"),
            ConfigError::BadDefault => defmt::write!(f, "BadDefault"),
            ConfigError::DuplicateName => defmt::write!(f, "DuplicateName"),
            ConfigError::TooManyCommands => defmt::write!(f, "TooManyCommands"),
            ConfigError::UsageTooLong => defmt::write!(f, "UsageTooLong"),
        }
    }
}

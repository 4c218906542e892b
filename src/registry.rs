//! Command registry.
//!
//! Built once by merging the six builtin commands with the embedding
//! application's static command table, keyed by name with collision
//! detection. Usage text is rendered per entry at build time so failure
//! paths never format schemas at dispatch. The registry is immutable
//! after construction and may be shared read-only between sessions.

use core::fmt::{self, Write};

use heapless::{String, Vec};

use crate::binder::BoundArgs;
use crate::builtin;
use crate::config::{MAX_CANDIDATES, MAX_COMMANDS, MAX_USAGE_LEN};
use crate::error::{ConfigError, Error};
use crate::schema::{DefaultValue, FieldKind, FlagKind, FloatWidth, IntWidth, Schema};
use crate::shell::Context;

/// Command handler, invoked with the dispatch context and the bound
/// arguments. An `Err` is reported together with the command's usage
/// text and becomes the session's last outcome.
pub type Handler = fn(&mut Context<'_>, &BoundArgs<'_>) -> Result<(), Error>;

/// Per-command argument completion hook.
///
/// Receives the split tokens of the partial line and returns the full
/// candidate set for the argument under the cursor; the engine prefix-
/// filters against the partial token and applies the three-way match
/// contract.
pub type Completer = fn(tokens: &[&str]) -> Vec<&'static str, MAX_CANDIDATES>;

/// A deployable command: schema, handler, optional completion hook.
#[derive(Clone, Copy)]
pub struct Command {
    /// Declared argument shape.
    pub schema: Schema,
    /// Invoked after successful binding.
    pub handler: Handler,
    /// Optional argument completion hook.
    pub completer: Option<Completer>,
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

pub(crate) struct Entry {
    pub(crate) schema: Schema,
    pub(crate) handler: Handler,
    pub(crate) completer: Option<Completer>,
    pub(crate) usage: String<MAX_USAGE_LEN>,
}

/// Immutable name → (schema, handler, usage) table.
pub struct Registry {
    entries: Vec<Entry, MAX_COMMANDS>,
}

impl Registry {
    /// Build the merged builtin + user table.
    ///
    /// Fatal configuration errors (invalid schemas, duplicate names,
    /// capacity overruns) are returned here and can never occur at
    /// dispatch time.
    pub fn build(user: &[Command]) -> Result<Self, ConfigError> {
        let mut registry = Self {
            entries: Vec::new(),
        };
        for command in builtin::BUILTINS {
            registry.insert(command)?;
        }
        for command in user {
            registry.insert(command)?;
        }
        Ok(registry)
    }

    fn insert(&mut self, command: &Command) -> Result<(), ConfigError> {
        command.schema.validate()?;
        if self.find(command.schema.name).is_some() {
            return Err(ConfigError::DuplicateName);
        }
        let usage = render_usage(&command.schema)?;
        self.entries
            .push(Entry {
                schema: command.schema,
                handler: command.handler,
                completer: command.completer,
                usage,
            })
            .map_err(|_| ConfigError::TooManyCommands)
    }

    pub(crate) fn find(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.schema.name == name)
    }

    pub(crate) fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Whether a command with this exact name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Precomputed usage text for a registered command.
    pub fn usage(&self, name: &str) -> Option<&str> {
        self.find(name).map(|entry| entry.usage.as_str())
    }

    /// Number of registered commands, builtins included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty (it never is: builtins are always
    /// present).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for entry in &self.entries {
            list.entry(&entry.schema.name);
        }
        list.finish()
    }
}

fn render_usage(schema: &Schema) -> Result<String<MAX_USAGE_LEN>, ConfigError> {
    let mut usage: String<MAX_USAGE_LEN> = String::new();
    write_usage(&mut usage, schema).map_err(|_| ConfigError::UsageTooLong)?;
    Ok(usage)
}

fn write_usage(out: &mut impl Write, schema: &Schema) -> fmt::Result {
    out.write_str(schema.name)?;
    for field in schema.fields {
        out.write_char(' ')?;
        match field.kind {
            FieldKind::Flag(FlagKind::Required) => write!(out, "<--[no-]{}>", field.name)?,
            FieldKind::Flag(_) => write!(out, "[--[no-]{}]", field.name)?,
            FieldKind::Remaining => write!(out, "[{}...]", field.name)?,
            _ => {
                let (open, close) = if field.is_defaulted() {
                    ('[', ']')
                } else {
                    ('<', '>')
                };
                out.write_char(open)?;
                write!(out, "{}:", field.name)?;
                write_kind(out, &field.kind)?;
                if let Some(default) = field.default {
                    out.write_char('=')?;
                    write_default(out, &default)?;
                }
                out.write_char(close)?;
            }
        }
    }
    Ok(())
}

fn write_kind(out: &mut impl Write, kind: &FieldKind) -> fmt::Result {
    match kind {
        FieldKind::Str => out.write_str("str"),
        FieldKind::Bool => out.write_str("bool"),
        FieldKind::Int(width) => out.write_str(match width {
            IntWidth::W8 => "i8",
            IntWidth::W16 => "i16",
            IntWidth::W32 => "i32",
            IntWidth::W64 => "i64",
        }),
        FieldKind::Uint(width) => out.write_str(match width {
            IntWidth::W8 => "u8",
            IntWidth::W16 => "u16",
            IntWidth::W32 => "u32",
            IntWidth::W64 => "u64",
        }),
        FieldKind::Float(FloatWidth::W32) => out.write_str("f32"),
        FieldKind::Float(FloatWidth::W64) => out.write_str("f64"),
        FieldKind::Enum(members) => {
            for (index, member) in members.iter().enumerate() {
                if index > 0 {
                    out.write_char('|')?;
                }
                out.write_str(member)?;
            }
            Ok(())
        }
        FieldKind::Flag(_) | FieldKind::Remaining => Ok(()),
    }
}

fn write_default(out: &mut impl Write, default: &DefaultValue) -> fmt::Result {
    match default {
        DefaultValue::Str(value) => out.write_str(value),
        DefaultValue::Bool(value) => write!(out, "{}", value),
        DefaultValue::Int(value) => write!(out, "{}", value),
        DefaultValue::Uint(value) => write!(out, "{}", value),
        DefaultValue::Float(value) => write!(out, "{}", value),
        DefaultValue::Enum(member) => out.write_str(member),
    }
}

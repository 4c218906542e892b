//! Command schemas.
//!
//! A [`Schema`] is a static, registry-time-fixed description of one
//! command: a name, a one-line description, and an ordered list of
//! [`Field`] descriptors interpreted by the binder at dispatch time.
//! Declaration invariants are checked once when the registry is built;
//! a broken schema is a configuration error, never a runtime error.

use crate::config::MAX_FIELDS;
use crate::error::ConfigError;

/// Width of an integer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntWidth {
    /// 8 bits.
    W8,
    /// 16 bits.
    W16,
    /// 32 bits.
    W32,
    /// 64 bits.
    W64,
}

impl IntWidth {
    pub(crate) fn umax(self) -> u64 {
        match self {
            IntWidth::W8 => u8::MAX as u64,
            IntWidth::W16 => u16::MAX as u64,
            IntWidth::W32 => u32::MAX as u64,
            IntWidth::W64 => u64::MAX,
        }
    }

    pub(crate) fn imin(self) -> i64 {
        match self {
            IntWidth::W8 => i8::MIN as i64,
            IntWidth::W16 => i16::MIN as i64,
            IntWidth::W32 => i32::MIN as i64,
            IntWidth::W64 => i64::MIN,
        }
    }

    pub(crate) fn imax(self) -> i64 {
        match self {
            IntWidth::W8 => i8::MAX as i64,
            IntWidth::W16 => i16::MAX as i64,
            IntWidth::W32 => i32::MAX as i64,
            IntWidth::W64 => i64::MAX,
        }
    }
}

/// Width of a float field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatWidth {
    /// 32 bits.
    W32,
    /// 64 bits.
    W64,
}

/// Declared semantics of a flag field.
///
/// Every flag answers to both `--name` and `--no-name`; the kind only
/// fixes the value taken when neither appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    /// Defaults to `false`; typically set with `--name`.
    Set,
    /// Defaults to `true`; typically cleared with `--no-name`.
    Clear,
    /// No default: one of the two forms must appear.
    Required,
}

/// Semantic type of one field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// The token verbatim; never fails to parse.
    Str,
    /// `true`/`false`, plus the configured aliases.
    Bool,
    /// Signed integer of the given width, base auto-detected.
    Int(IntWidth),
    /// Unsigned integer of the given width, base auto-detected.
    Uint(IntWidth),
    /// Floating point.
    Float(FloatWidth),
    /// One of a static set of member names, matched case-sensitively.
    Enum(&'static [&'static str]),
    /// Positionally-independent boolean bound only via `--name`/`--no-name`.
    Flag(FlagKind),
    /// Consumes every leftover token in one step. Must be the last
    /// field and cannot coexist with flag fields.
    Remaining,
}

/// A default value carried by a field descriptor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    /// Default for a string field.
    Str(&'static str),
    /// Default for a bool field.
    Bool(bool),
    /// Default for a signed integer field.
    Int(i64),
    /// Default for an unsigned integer field.
    Uint(u64),
    /// Default for a float field.
    Float(f64),
    /// Default member name for an enum field; must name a declared member.
    Enum(&'static str),
}

/// One declared argument of a command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field {
    /// Field name; for flag fields this is also the flag spelling.
    pub name: &'static str,
    /// Semantic type.
    pub kind: FieldKind,
    /// Value taken when the field is never bound. Flag and remaining
    /// fields derive their default from the kind instead.
    pub default: Option<DefaultValue>,
}

impl Field {
    /// A field with an explicit kind and no default.
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            default: None,
        }
    }

    /// A string field.
    pub const fn str(name: &'static str) -> Self {
        Self::new(name, FieldKind::Str)
    }

    /// A bool field.
    pub const fn boolean(name: &'static str) -> Self {
        Self::new(name, FieldKind::Bool)
    }

    /// A signed integer field.
    pub const fn int(name: &'static str, width: IntWidth) -> Self {
        Self::new(name, FieldKind::Int(width))
    }

    /// An unsigned integer field.
    pub const fn uint(name: &'static str, width: IntWidth) -> Self {
        Self::new(name, FieldKind::Uint(width))
    }

    /// A float field.
    pub const fn float(name: &'static str, width: FloatWidth) -> Self {
        Self::new(name, FieldKind::Float(width))
    }

    /// An enumeration field over a static member set.
    pub const fn enumeration(name: &'static str, members: &'static [&'static str]) -> Self {
        Self::new(name, FieldKind::Enum(members))
    }

    /// A flag field.
    pub const fn flag(name: &'static str, kind: FlagKind) -> Self {
        Self::new(name, FieldKind::Flag(kind))
    }

    /// A remaining-tokens sink.
    pub const fn remaining(name: &'static str) -> Self {
        Self::new(name, FieldKind::Remaining)
    }

    /// Attach a default value.
    pub const fn with_default(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }

    /// Whether the field takes a value when never bound. Flags other
    /// than [`FlagKind::Required`] and the remaining sink are
    /// implicitly defaulted.
    pub fn is_defaulted(&self) -> bool {
        match self.kind {
            FieldKind::Flag(kind) => !matches!(kind, FlagKind::Required),
            FieldKind::Remaining => true,
            _ => self.default.is_some(),
        }
    }

    fn check_default(&self) -> Result<(), ConfigError> {
        let Some(default) = self.default else {
            return Ok(());
        };
        let fits = match (self.kind, default) {
            (FieldKind::Str, DefaultValue::Str(_)) => true,
            (FieldKind::Bool, DefaultValue::Bool(_)) => true,
            (FieldKind::Int(width), DefaultValue::Int(value)) => {
                value >= width.imin() && value <= width.imax()
            }
            (FieldKind::Uint(width), DefaultValue::Uint(value)) => value <= width.umax(),
            (FieldKind::Float(_), DefaultValue::Float(_)) => true,
            (FieldKind::Enum(members), DefaultValue::Enum(name)) => members.contains(&name),
            // Flag and remaining defaults come from the kind alone.
            _ => false,
        };
        if fits { Ok(()) } else { Err(ConfigError::BadDefault) }
    }
}

/// A command's declared shape.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    /// Command name as typed by the user.
    pub name: &'static str,
    /// One-line description shown by `help`.
    pub description: &'static str,
    /// Ordered field list.
    pub fields: &'static [Field],
}

impl Schema {
    /// Declare a schema.
    pub const fn new(
        name: &'static str,
        description: &'static str,
        fields: &'static [Field],
    ) -> Self {
        Self {
            name,
            description,
            fields,
        }
    }

    /// Number of fields that must be bound for a pass to complete.
    pub fn required_count(&self) -> usize {
        self.fields.iter().filter(|f| !f.is_defaulted()).count()
    }

    /// Check the declaration invariants.
    ///
    /// Rejects: defaulted positional fields before non-defaulted ones, a
    /// remaining sink anywhere but last, flags mixed with a remaining
    /// sink, oversized field lists, and defaults that do not fit their
    /// field's type.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fields.len() > MAX_FIELDS {
            return Err(ConfigError::TooManyFields);
        }

        let mut has_flag = false;
        let mut has_remaining = false;
        let mut seen_default = false;
        for (index, field) in self.fields.iter().enumerate() {
            field.check_default()?;
            match field.kind {
                FieldKind::Flag(_) => {
                    has_flag = true;
                    // Flags are never bound positionally, so they are
                    // exempt from the default-ordering rule.
                    continue;
                }
                FieldKind::Remaining => {
                    if has_remaining || index != self.fields.len() - 1 {
                        return Err(ConfigError::RemainingNotLast);
                    }
                    has_remaining = true;
                }
                _ => {}
            }
            if field.is_defaulted() {
                seen_default = true;
            } else if seen_default {
                return Err(ConfigError::DefaultBeforeRequired);
            }
        }

        if has_flag && has_remaining {
            return Err(ConfigError::FlagWithRemaining);
        }
        Ok(())
    }
}

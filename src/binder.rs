//! Schema-driven field binding.
//!
//! The binder walks a token slice left to right and realizes a schema's
//! fields as concrete [`Value`]s: `--` tokens bind flag fields by name,
//! everything else binds the next positional field in declaration order.
//! One [`FieldTracker`] bit per field records what has been bound; after
//! the tokens run out, unbound defaulted fields take their declared
//! default and any unbound required field fails the pass.
//!
//! Binding has no shared mutable state: the same schema and token slice
//! always produce the same bound arguments or the same error.

use heapless::Vec;

use crate::config::{Config, MAX_FIELDS, MAX_TOKENS};
use crate::error::Error;
use crate::schema::{DefaultValue, Field, FieldKind, FlagKind, FloatWidth, IntWidth, Schema};

/// Prefix marking a positionally-independent flag token.
pub const FLAG_PREFIX: &str = "--";

/// A bound field value. Borrows token text from the dispatched line.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// Verbatim token.
    Str(&'a str),
    /// Parsed bool literal.
    Bool(bool),
    /// Parsed signed integer.
    Int(i64),
    /// Parsed unsigned integer.
    Uint(u64),
    /// Parsed float (32-bit fields are widened).
    Float(f64),
    /// The matched member name from the field's declared set.
    Enum(&'static str),
    /// Flag state.
    Flag(bool),
    /// The leftover token tail captured by a remaining sink.
    Remaining(Vec<&'a str, MAX_TOKENS>),
}

/// Bitset over one schema's fields recording what one pass has bound.
#[derive(Debug, Clone, Copy)]
pub struct FieldTracker {
    bits: u32,
    len: usize,
}

impl FieldTracker {
    /// Tracker for a schema with `len` fields. Schema validation caps
    /// `len` at [`MAX_FIELDS`], well inside the bitset.
    pub fn new(len: usize) -> Self {
        Self { bits: 0, len }
    }

    /// Mark field `index` bound. Marking twice is [`Error::RepeatedArg`].
    pub fn mark(&mut self, index: usize) -> Result<(), Error> {
        let bit = 1u32 << index;
        if self.bits & bit != 0 {
            return Err(Error::RepeatedArg);
        }
        self.bits |= bit;
        Ok(())
    }

    /// Whether field `index` has been bound.
    pub fn is_set(&self, index: usize) -> bool {
        self.bits & (1u32 << index) != 0
    }

    /// Every field has been bound.
    pub fn full(&self) -> bool {
        self.bits.count_ones() as usize == self.len
    }

    /// At least every non-default field could have been bound.
    pub fn done(&self, required: usize) -> bool {
        self.bits.count_ones() as usize >= required
    }
}

/// A schema's fields realized with concrete values for one dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundArgs<'a> {
    fields: &'static [Field],
    values: Vec<Value<'a>, MAX_FIELDS>,
}

impl<'a> BoundArgs<'a> {
    /// The value bound for field `name`.
    pub fn get(&self, name: &str) -> Option<&Value<'a>> {
        let index = self.fields.iter().position(|f| f.name == name)?;
        self.values.get(index)
    }

    /// String field accessor.
    pub fn text(&self, name: &str) -> Option<&'a str> {
        match self.get(name)? {
            Value::Str(value) => Some(*value),
            _ => None,
        }
    }

    /// Bool or flag field accessor.
    pub fn boolean(&self, name: &str) -> Option<bool> {
        match self.get(name)? {
            Value::Bool(value) | Value::Flag(value) => Some(*value),
            _ => None,
        }
    }

    /// Signed integer field accessor.
    pub fn int(&self, name: &str) -> Option<i64> {
        match self.get(name)? {
            Value::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Unsigned integer field accessor.
    pub fn uint(&self, name: &str) -> Option<u64> {
        match self.get(name)? {
            Value::Uint(value) => Some(*value),
            _ => None,
        }
    }

    /// Float field accessor.
    pub fn float(&self, name: &str) -> Option<f64> {
        match self.get(name)? {
            Value::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Enum field accessor; yields the matched member name.
    pub fn member(&self, name: &str) -> Option<&'static str> {
        match self.get(name)? {
            Value::Enum(member) => Some(*member),
            _ => None,
        }
    }

    /// The token tail captured by the schema's remaining sink, if any.
    pub fn rest(&self) -> Option<&[&'a str]> {
        self.values.iter().find_map(|value| match value {
            Value::Remaining(tail) => Some(tail.as_slice()),
            _ => None,
        })
    }
}

/// Bind `tokens` (the tokens after the command name) against `schema`.
pub fn bind<'a>(
    schema: &Schema,
    tokens: &[&'a str],
    config: &Config,
) -> Result<BoundArgs<'a>, Error> {
    let fields = schema.fields;
    let mut tracker = FieldTracker::new(fields.len());
    let mut values: Vec<Option<Value<'a>>, MAX_FIELDS> = Vec::new();
    for _ in fields {
        values.push(None).map_err(|_| Error::BufferExhausted)?;
    }

    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i];
        if let Some(flag) = token.strip_prefix(FLAG_PREFIX) {
            bind_flag(fields, &mut tracker, &mut values, flag)?;
        } else {
            let Some(index) = next_positional(fields, &tracker) else {
                return Err(Error::TooManyArgs);
            };
            let field = &fields[index];
            if let FieldKind::Remaining = field.kind {
                // The sink takes the whole tail in one step; nothing
                // after it is re-examined.
                let mut tail: Vec<&'a str, MAX_TOKENS> = Vec::new();
                tail.extend_from_slice(&tokens[i..])
                    .map_err(|_| Error::BufferExhausted)?;
                tracker.mark(index)?;
                values[index] = Some(Value::Remaining(tail));
                break;
            }
            tracker.mark(index)?;
            values[index] = Some(parse_value(field, token, config)?);
        }
        i += 1;
    }

    if !tracker.done(schema.required_count()) {
        return Err(Error::MissingArg);
    }

    // Fill defaults. A required field the popcount test missed (a
    // defaulted flag bound while a positional was not) still fails here.
    let mut bound: Vec<Value<'a>, MAX_FIELDS> = Vec::new();
    for (index, value) in values.into_iter().enumerate() {
        let value = match value {
            Some(value) => value,
            None => default_value(&fields[index]).ok_or(Error::MissingArg)?,
        };
        bound.push(value).map_err(|_| Error::BufferExhausted)?;
    }

    Ok(BoundArgs {
        fields,
        values: bound,
    })
}

/// Match a stripped flag token against the schema's flag fields, in
/// declaration order. `--name` binds true, `--no-name` binds false.
fn bind_flag<'a>(
    fields: &'static [Field],
    tracker: &mut FieldTracker,
    values: &mut Vec<Option<Value<'a>>, MAX_FIELDS>,
    flag: &str,
) -> Result<(), Error> {
    for (index, field) in fields.iter().enumerate() {
        if !matches!(field.kind, FieldKind::Flag(_)) {
            continue;
        }
        let state = if flag == field.name {
            Some(true)
        } else if flag.strip_prefix("no-") == Some(field.name) {
            Some(false)
        } else {
            None
        };
        if let Some(state) = state {
            tracker.mark(index)?;
            values[index] = Some(Value::Flag(state));
            return Ok(());
        }
    }
    Err(Error::UnknownFlag)
}

/// First not-yet-bound field in declaration order, skipping flags.
fn next_positional(fields: &[Field], tracker: &FieldTracker) -> Option<usize> {
    fields.iter().enumerate().position(|(index, field)| {
        !matches!(field.kind, FieldKind::Flag(_)) && !tracker.is_set(index)
    })
}

fn parse_value<'a>(field: &Field, token: &'a str, config: &Config) -> Result<Value<'a>, Error> {
    match field.kind {
        FieldKind::Str => Ok(Value::Str(token)),
        FieldKind::Bool => parse_bool(token, config.bool_aliases)
            .map(Value::Bool)
            .ok_or(Error::InvalidArg),
        FieldKind::Int(width) => parse_int(token, width)
            .map(Value::Int)
            .ok_or(Error::InvalidArg),
        FieldKind::Uint(width) => parse_uint(token, width)
            .map(Value::Uint)
            .ok_or(Error::InvalidArg),
        FieldKind::Float(FloatWidth::W32) => token
            .parse::<f32>()
            .map(|value| Value::Float(value as f64))
            .map_err(|_| Error::InvalidArg),
        FieldKind::Float(FloatWidth::W64) => token
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| Error::InvalidArg),
        FieldKind::Enum(members) => members
            .iter()
            .copied()
            .find(|member| *member == token)
            .map(Value::Enum)
            .ok_or(Error::InvalidArg),
        // Flags are never positional and the sink is handled by the
        // caller, so a token can never parse as either.
        FieldKind::Flag(_) | FieldKind::Remaining => Err(Error::InvalidArg),
    }
}

fn default_value(field: &Field) -> Option<Value<'static>> {
    match field.kind {
        FieldKind::Flag(FlagKind::Set) => Some(Value::Flag(false)),
        FieldKind::Flag(FlagKind::Clear) => Some(Value::Flag(true)),
        FieldKind::Flag(FlagKind::Required) => None,
        FieldKind::Remaining => Some(Value::Remaining(Vec::new())),
        _ => field.default.map(|default| match default {
            DefaultValue::Str(value) => Value::Str(value),
            DefaultValue::Bool(value) => Value::Bool(value),
            DefaultValue::Int(value) => Value::Int(value),
            DefaultValue::Uint(value) => Value::Uint(value),
            DefaultValue::Float(value) => Value::Float(value),
            DefaultValue::Enum(member) => Value::Enum(member),
        }),
    }
}

fn parse_bool(token: &str, aliases: bool) -> Option<bool> {
    match token {
        "true" => return Some(true),
        "false" => return Some(false),
        _ => {}
    }
    if !aliases {
        return None;
    }
    const TRUE_ALIASES: &[&str] = &["y", "yes", "1"];
    const FALSE_ALIASES: &[&str] = &["n", "no", "0"];
    if TRUE_ALIASES.iter().any(|a| token.eq_ignore_ascii_case(a)) {
        return Some(true);
    }
    if FALSE_ALIASES.iter().any(|a| token.eq_ignore_ascii_case(a)) {
        return Some(false);
    }
    None
}

/// Split an optional `0x`/`0b`/`0o` base prefix off an unsigned literal.
fn split_radix(literal: &str) -> (u32, &str) {
    if let Some(digits) = literal.strip_prefix("0x").or_else(|| literal.strip_prefix("0X")) {
        (16, digits)
    } else if let Some(digits) = literal.strip_prefix("0b").or_else(|| literal.strip_prefix("0B")) {
        (2, digits)
    } else if let Some(digits) = literal.strip_prefix("0o").or_else(|| literal.strip_prefix("0O")) {
        (8, digits)
    } else {
        (10, literal)
    }
}

fn parse_magnitude(literal: &str) -> Option<u64> {
    let (radix, digits) = split_radix(literal);
    // from_str_radix tolerates a leading sign; the sign was already
    // consumed by the caller, so a second one is malformed input.
    if digits.starts_with('+') || digits.starts_with('-') {
        return None;
    }
    u64::from_str_radix(digits, radix).ok()
}

fn parse_uint(token: &str, width: IntWidth) -> Option<u64> {
    let literal = token.strip_prefix('+').unwrap_or(token);
    let value = parse_magnitude(literal)?;
    (value <= width.umax()).then_some(value)
}

fn parse_int(token: &str, width: IntWidth) -> Option<i64> {
    let (negative, literal) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token.strip_prefix('+').unwrap_or(token)),
    };
    let magnitude = parse_magnitude(literal)?;
    if negative {
        if magnitude > width.imin().unsigned_abs() {
            return None;
        }
        Some((-(magnitude as i128)) as i64)
    } else {
        (magnitude <= width.imax() as u64).then_some(magnitude as i64)
    }
}

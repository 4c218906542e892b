//! # libshell - Embedded command console engine
//!
//! An interactive, line-oriented command engine for resource-constrained
//! devices exposing a debug console over a byte stream (UART, RTT, USB
//! CDC). The engine reads lines, resolves them against a fixed command
//! registry, binds arguments according to each command's declared schema,
//! and dispatches to a handler — entirely without heap allocation.
//!
//! ## Features
//!
//! - **Zero-allocation**: every buffer is a fixed-capacity `heapless`
//!   structure with compile-time limits
//! - **Schema-driven binding**: commands declare typed fields (integers
//!   with automatic base detection, bools, enums, flags, a trailing
//!   token sink) validated once at registry construction
//! - **Two-tier registry**: six builtin commands (`!`, `$?`, `clear`,
//!   `exit`, `help`, `history`) merged with the application's command set
//! - **Bounded history**: ring buffer with stable global indices that
//!   survive eviction, driving the `!` and `history` builtins
//! - **Completion**: prefix matching over command names plus optional
//!   per-command argument hooks
//!
//! ## Usage
//!
//! ```rust
//! use libshell::binder::BoundArgs;
//! use libshell::config::Config;
//! use libshell::error::Error;
//! use libshell::registry::{Command, Registry};
//! use libshell::schema::{DefaultValue, Field, IntWidth, Schema};
//! use libshell::shell::{Context, Shell};
//!
//! fn blink(ctx: &mut Context<'_>, args: &BoundArgs<'_>) -> Result<(), Error> {
//!     let times = args.uint("times").ok_or(Error::InvalidArg)?;
//!     write!(ctx.out, "blinking {} times\r\n", times)?;
//!     Ok(())
//! }
//!
//! const BLINK_FIELDS: &[Field] = &[
//!     Field::uint("times", IntWidth::W32).with_default(DefaultValue::Uint(1)),
//! ];
//!
//! static COMMANDS: &[Command] = &[Command {
//!     schema: Schema::new("blink", "blink the status LED", BLINK_FIELDS),
//!     handler: blink,
//!     completer: None,
//! }];
//!
//! use core::fmt::Write;
//!
//! let registry = Registry::build(COMMANDS).unwrap();
//! let mut shell = Shell::new(&registry, Config::default());
//! let mut out = String::new();
//! shell.dispatch(&mut out, "blink 0x3").unwrap();
//! assert!(out.contains("blinking 3 times"));
//! ```
//!
//! ## Platform Support
//!
//! The engine performs no raw I/O itself: the platform decodes key input
//! into [`io::Event`]s and supplies any [`core::fmt::Write`] sink for
//! output, so the library runs on anything with Rust's `core`.
//!
//! ## Optional Features
//!
//! - `std`: Enable standard library support (default: disabled)
//! - `defmt`: Enable defmt formatting of error types for embedded debugging

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]

/// Token binding: the field tracker and the schema-driven binder that
/// turns a token slice into typed bound arguments.
pub mod binder;

mod builtin;

/// Prefix completion over registry names and per-command argument hooks.
pub mod complete;

/// Runtime options and the fixed capacity limits of the engine.
pub mod config;

/// The unified error taxonomy for tokenizing, binding, and dispatch,
/// plus the registration-time configuration errors.
pub mod error;

/// Bounded command history with stable global indices.
pub mod history;

/// Boundary traits for the embedding platform: decoded input events.
pub mod io;

/// The merged builtin + user command table with precomputed usage text.
pub mod registry;

/// Command schemas: field descriptors, defaults, and their validation.
pub mod schema;

/// Session state, the dispatcher, and event-driven line editing.
pub mod shell;

/// Quote-aware line tokenizer.
pub mod token;

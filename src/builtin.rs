//! Builtin command set, always registered alongside user commands.

use core::fmt::Write;

use heapless::String;

use crate::binder::BoundArgs;
use crate::config::MAX_LINE_LEN;
use crate::error::Error;
use crate::registry::Command;
use crate::schema::{DefaultValue, Field, IntWidth, Schema};
use crate::shell::{Context, Outcome};

const RERUN_FIELDS: &[Field] = &[Field::uint("index", IntWidth::W32)];
const HELP_FIELDS: &[Field] = &[Field::str("name").with_default(DefaultValue::Str(""))];

/// Every builtin, in help-listing order.
pub(crate) static BUILTINS: &[Command] = &[
    Command {
        schema: Schema::new("!", "re-run a history entry", RERUN_FIELDS),
        handler: rerun,
        completer: None,
    },
    Command {
        schema: Schema::new("$?", "print the outcome of the last command", &[]),
        handler: last_status,
        completer: None,
    },
    Command {
        schema: Schema::new("clear", "clear the screen", &[]),
        handler: clear,
        completer: None,
    },
    Command {
        schema: Schema::new("exit", "stop the session", &[]),
        handler: exit,
        completer: None,
    },
    Command {
        schema: Schema::new("help", "list commands or show usage for one", HELP_FIELDS),
        handler: help,
        completer: None,
    },
    Command {
        schema: Schema::new("history", "list retained lines with their indices", &[]),
        handler: history,
        completer: None,
    },
];

fn rerun(ctx: &mut Context<'_>, args: &BoundArgs<'_>) -> Result<(), Error> {
    let index = args.uint("index").ok_or(Error::InvalidArg)? as usize;
    // Drop the "! n" invocation itself so the referenced line ends up
    // newest once the re-run completes.
    ctx.history.pop();
    let line = ctx.history.get(index)?;
    let mut copy: String<MAX_LINE_LEN> = String::new();
    copy.push_str(line).map_err(|_| Error::BufferExhausted)?;
    ctx.requeue(copy);
    Ok(())
}

fn last_status(ctx: &mut Context<'_>, _args: &BoundArgs<'_>) -> Result<(), Error> {
    match ctx.last {
        Outcome::Ok => write!(ctx.out, "0\r\n")?,
        Outcome::Failed(cause) => write!(ctx.out, "1 ({})\r\n", cause.as_str())?,
    }
    Ok(())
}

fn clear(ctx: &mut Context<'_>, _args: &BoundArgs<'_>) -> Result<(), Error> {
    write!(ctx.out, "\x1b[2J\x1b[H")?;
    Ok(())
}

fn exit(ctx: &mut Context<'_>, _args: &BoundArgs<'_>) -> Result<(), Error> {
    *ctx.running = false;
    Ok(())
}

fn help(ctx: &mut Context<'_>, args: &BoundArgs<'_>) -> Result<(), Error> {
    let name = args.text("name").ok_or(Error::InvalidArg)?;
    if name.is_empty() {
        write!(ctx.out, "available commands:\r\n")?;
        for entry in ctx.registry.entries() {
            write!(
                ctx.out,
                "  {:12} {}\r\n",
                entry.schema.name, entry.schema.description
            )?;
        }
        write!(ctx.out, "type 'help <name>' for usage.\r\n")?;
        return Ok(());
    }
    match ctx.registry.find(name) {
        Some(entry) => {
            write!(ctx.out, "{}\r\n", entry.schema.description)?;
            write!(ctx.out, "usage: {}\r\n", entry.usage)?;
            Ok(())
        }
        None => {
            write!(ctx.out, "unknown command: {}\r\n", name)?;
            Err(Error::UnknownCommand)
        }
    }
}

fn history(ctx: &mut Context<'_>, _args: &BoundArgs<'_>) -> Result<(), Error> {
    if ctx.history.is_empty() {
        write!(ctx.out, "history is empty\r\n")?;
        return Ok(());
    }
    for (index, line) in ctx.history.iter() {
        write!(ctx.out, "  {:3}  {}\r\n", index, line)?;
    }
    Ok(())
}

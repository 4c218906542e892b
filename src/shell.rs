//! Session state and dispatch.
//!
//! A [`Shell`] owns everything one interactive session mutates: the
//! input buffer, the history, the running flag, and the outcome of the
//! last dispatched command. The registry is borrowed read-only so it
//! can be shared by several sessions.
//!
//! Dispatch of one line runs to completion before the next begins:
//! tokenize, append to history, resolve the command name, bind the
//! remaining tokens, invoke the handler, record the outcome. Every
//! binding or lookup failure is recovered here — reported to the output
//! sink together with the command's usage text — and only fatal
//! capacity exhaustion propagates to the embedder.

use core::fmt::{self, Write as _};

use heapless::{String, Vec};

use crate::binder;
use crate::complete::{self, Action};
use crate::config::{Config, MAX_LINE_LEN, MAX_TOKENS};
use crate::error::Error;
use crate::history::History;
use crate::io::Event;
use crate::registry::Registry;
use crate::token;

/// Result of the most recently dispatched command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    /// The command ran to completion.
    #[default]
    Ok,
    /// Dispatch failed with the recorded cause.
    Failed(Error),
}

#[cfg(feature = "defmt")]
impl defmt::Format for Outcome {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Outcome::Ok => defmt::write!(f, "Ok"),
            Outcome::Failed(cause) => defmt::write!(f, "Failed({})", cause),
        }
    }
}

/// Dispatch context handed to command handlers.
pub struct Context<'c> {
    /// Output sink for the current line.
    pub out: &'c mut dyn fmt::Write,
    /// The session's history buffer.
    pub history: &'c mut History,
    /// The immutable command table.
    pub registry: &'c Registry,
    /// Active configuration.
    pub config: &'c Config,
    /// Outcome of the previous dispatched line, as reported by `$?`.
    pub last: Outcome,
    /// Cleared by a handler to stop the session loop.
    pub running: &'c mut bool,
    requeue: &'c mut Option<String<MAX_LINE_LEN>>,
}

impl Context<'_> {
    /// Queue `line` to be dispatched once the current handler returns.
    ///
    /// A failure of the queued line is recorded as a re-run failure
    /// rather than its own cause.
    pub fn requeue(&mut self, line: String<MAX_LINE_LEN>) {
        *self.requeue = Some(line);
    }
}

impl fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("last", &self.last)
            .field("running", &self.running)
            .finish_non_exhaustive()
    }
}

/// One interactive session.
#[derive(Debug)]
pub struct Shell<'r> {
    registry: &'r Registry,
    config: Config,
    history: History,
    input: String<MAX_LINE_LEN>,
    /// In-progress line stashed while arrow keys walk the history.
    stash: String<MAX_LINE_LEN>,
    /// Global history index currently recalled into the input buffer.
    nav: Option<usize>,
    requeue: Option<String<MAX_LINE_LEN>>,
    running: bool,
    last: Outcome,
}

impl<'r> Shell<'r> {
    /// Create a session over a built registry.
    pub fn new(registry: &'r Registry, config: Config) -> Self {
        Self {
            registry,
            config,
            history: History::new(),
            input: String::new(),
            stash: String::new(),
            nav: None,
            requeue: None,
            running: true,
            last: Outcome::Ok,
        }
    }

    /// False once a handler has requested termination; the embedding
    /// loop observes this between lines.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Outcome of the last dispatched line.
    pub fn last_outcome(&self) -> Outcome {
        self.last
    }

    /// The session's history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// The in-progress input line.
    pub fn input(&self) -> &str {
        self.input.as_str()
    }

    /// Active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Write the configured prompt to `out`.
    pub fn write_prompt(&self, out: &mut dyn fmt::Write) -> Result<(), Error> {
        if self.config.color {
            write!(out, "\x1b[32m{}\x1b[0m", self.config.prompt)?;
        } else {
            out.write_str(self.config.prompt)?;
        }
        Ok(())
    }

    /// Dispatch one raw line.
    ///
    /// Returns the recorded outcome; user-level failures are reported to
    /// `out` and recovered. `Err` carries only fatal capacity
    /// exhaustion, after which the session should be reset.
    pub fn dispatch(&mut self, out: &mut dyn fmt::Write, line: &str) -> Result<Outcome, Error> {
        self.nav = None;
        let mut outcome = self.dispatch_one(out, line)?;

        // The `!` builtin queues the referenced line; a failure while
        // re-running it is recorded as a re-run failure. A queued line
        // can queue another only through a chain of malformed `!`
        // invocations retained in history, all of which fail at binding,
        // so this loop terminates.
        while let Some(queued) = self.requeue.take() {
            outcome = match self.dispatch_one(out, queued.as_str())? {
                Outcome::Ok => Outcome::Ok,
                Outcome::Failed(_) => Outcome::Failed(Error::UserCommand),
            };
            self.last = outcome;
        }
        Ok(outcome)
    }

    fn dispatch_one(&mut self, out: &mut dyn fmt::Write, line: &str) -> Result<Outcome, Error> {
        let tokens = token::tokenize(line)?;
        let Some(&first) = tokens.first() else {
            // Only delimiters: a pure no-op, nothing appended or
            // recorded.
            return Ok(self.last);
        };

        self.history.append(line)?;

        // "!3" is accepted alongside "! 3".
        let (name, index_arg) = split_bang(first);

        let registry = self.registry;
        let Some(entry) = registry.find(name) else {
            write!(out, "unknown command: {}\r\n", name)?;
            return Ok(self.record(Outcome::Failed(Error::UnknownCommand)));
        };

        let mut argv: Vec<&str, MAX_TOKENS> = Vec::new();
        if let Some(arg) = index_arg {
            argv.push(arg).map_err(|_| Error::BufferExhausted)?;
        }
        argv.extend_from_slice(&tokens[1..])
            .map_err(|_| Error::BufferExhausted)?;

        let bound = match binder::bind(&entry.schema, &argv, &self.config) {
            Ok(bound) => bound,
            Err(Error::BufferExhausted) => return Err(Error::BufferExhausted),
            Err(cause) => {
                self.report(out, cause, Some(entry.usage.as_str()))?;
                return Ok(self.record(Outcome::Failed(cause)));
            }
        };

        let result = {
            let mut context = Context {
                out: &mut *out,
                history: &mut self.history,
                registry,
                config: &self.config,
                last: self.last,
                running: &mut self.running,
                requeue: &mut self.requeue,
            };
            (entry.handler)(&mut context, &bound)
        };

        let outcome = match result {
            Ok(()) => Outcome::Ok,
            Err(Error::BufferExhausted) => return Err(Error::BufferExhausted),
            Err(cause) => {
                self.report(out, cause, Some(entry.usage.as_str()))?;
                Outcome::Failed(cause)
            }
        };
        Ok(self.record(outcome))
    }

    /// Feed one decoded input event.
    ///
    /// Printable characters extend the input buffer (echoed when
    /// enabled), backspace erases, enter dispatches the buffered line,
    /// tab completes, and the vertical arrows recall history.
    pub fn handle_event(&mut self, out: &mut dyn fmt::Write, event: Event) -> Result<(), Error> {
        match event {
            Event::Char(c) => {
                if c.is_control() {
                    return Ok(());
                }
                self.nav = None;
                self.input.push(c).map_err(|_| Error::BufferExhausted)?;
                if self.config.echo {
                    write!(out, "{}", c)?;
                }
            }
            Event::Backspace => {
                self.nav = None;
                if self.input.pop().is_some() && self.config.echo {
                    out.write_str("\x08 \x08")?;
                }
            }
            Event::Enter => {
                if self.config.echo {
                    out.write_str("\r\n")?;
                }
                let line = self.input.clone();
                self.input.clear();
                self.dispatch(out, line.as_str())?;
            }
            Event::Tab => self.complete_input(out)?,
            Event::ArrowUp => self.recall_older(out)?,
            Event::ArrowDown => self.recall_newer(out)?,
            // No in-line cursor editing.
            Event::ArrowLeft | Event::ArrowRight => {}
        }
        Ok(())
    }

    fn complete_input(&mut self, out: &mut dyn fmt::Write) -> Result<(), Error> {
        match complete::complete(self.registry, self.input.as_str()) {
            Action::None => {}
            Action::Replace(next) => {
                if self.config.echo {
                    match next.as_str().strip_prefix(self.input.as_str()) {
                        Some(suffix) => out.write_str(suffix)?,
                        None => {
                            // Quoted replacement rewrote earlier text:
                            // redraw the whole line.
                            self.erase_echo(out)?;
                            out.write_str(next.as_str())?;
                        }
                    }
                }
                self.input = next;
            }
            Action::Candidates(candidates) => {
                out.write_str("\r\n")?;
                for name in &candidates {
                    write!(out, "{}  ", name)?;
                }
                out.write_str("\r\n")?;
                self.write_prompt(out)?;
                out.write_str(self.input.as_str())?;
            }
        }
        Ok(())
    }

    fn recall_older(&mut self, out: &mut dyn fmt::Write) -> Result<(), Error> {
        let target = match self.nav {
            None => {
                let Some(newest) = self.history.newest() else {
                    return Ok(());
                };
                self.stash.clear();
                self.stash
                    .push_str(self.input.as_str())
                    .map_err(|_| Error::BufferExhausted)?;
                newest
            }
            Some(current) if current > self.history.offset() => current - 1,
            Some(current) => current,
        };
        self.nav = Some(target);
        self.replace_input(out, Some(target))
    }

    fn recall_newer(&mut self, out: &mut dyn fmt::Write) -> Result<(), Error> {
        let Some(current) = self.nav else {
            return Ok(());
        };
        match self.history.newest() {
            Some(newest) if current < newest => {
                self.nav = Some(current + 1);
                self.replace_input(out, Some(current + 1))
            }
            _ => {
                // Walked past the newest entry: restore the stashed
                // in-progress line.
                self.nav = None;
                self.replace_input(out, None)
            }
        }
    }

    fn replace_input(&mut self, out: &mut dyn fmt::Write, index: Option<usize>) -> Result<(), Error> {
        self.erase_echo(out)?;
        let text = match index {
            Some(index) => self.history.get(index)?,
            None => self.stash.as_str(),
        };
        self.input.clear();
        self.input
            .push_str(text)
            .map_err(|_| Error::BufferExhausted)?;
        if self.config.echo {
            out.write_str(self.input.as_str())?;
        }
        Ok(())
    }

    fn erase_echo(&self, out: &mut dyn fmt::Write) -> Result<(), Error> {
        if self.config.echo {
            for _ in self.input.chars() {
                out.write_str("\x08 \x08")?;
            }
        }
        Ok(())
    }

    fn report(&self, out: &mut dyn fmt::Write, cause: Error, usage: Option<&str>) -> Result<(), Error> {
        if self.config.color {
            write!(out, "\x1b[31merror:\x1b[0m {}\r\n", cause.as_str())?;
        } else {
            write!(out, "error: {}\r\n", cause.as_str())?;
        }
        if let Some(usage) = usage {
            write!(out, "usage: {}\r\n", usage)?;
        }
        Ok(())
    }

    fn record(&mut self, outcome: Outcome) -> Outcome {
        self.last = outcome;
        outcome
    }
}

/// Split the compact `!<n>` spelling into the `!` builtin plus its
/// index argument.
fn split_bang(first: &str) -> (&str, Option<&str>) {
    match first.strip_prefix('!') {
        Some(rest) if !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()) => {
            ("!", Some(rest))
        }
        _ => (first, None),
    }
}

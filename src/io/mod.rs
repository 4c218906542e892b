//! Boundary traits for the embedding platform.
//!
//! The engine performs no raw I/O. The platform owns the byte stream:
//! it decodes raw input (escape sequences included) into [`Event`]s and
//! feeds them to [`Shell::handle_event`](crate::shell::Shell::handle_event),
//! and it supplies any [`core::fmt::Write`] sink for output. A typical
//! embedding loop:
//!
//! ```text
//! shell.write_prompt(&mut uart)?;
//! while shell.is_running() {
//!     let event = source.next_event()?;
//!     shell.handle_event(&mut uart, event)?;
//! }
//! ```

/// A decoded terminal input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A typed character. Control characters are ignored by the engine.
    Char(char),
    /// Erase the character before the cursor.
    Backspace,
    /// Request completion of the current input.
    Tab,
    /// Submit the current line.
    Enter,
    /// Recall the previous (older) history line.
    ArrowUp,
    /// Recall the next (newer) history line.
    ArrowDown,
    /// Cursor left. The engine has no in-line cursor and ignores it.
    ArrowLeft,
    /// Cursor right. Ignored, like [`Event::ArrowLeft`].
    ArrowRight,
}

/// Blocking source of decoded input events.
///
/// Reading is the engine's only blocking point: `next_event` parks the
/// calling thread until an event arrives or the stream fails.
pub trait EventSource {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Block until the next event arrives.
    fn next_event(&mut self) -> Result<Event, Self::Error>;
}

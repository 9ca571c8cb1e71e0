//! Frame sinks: where serialized canvas text ends up.
//!
//! [`TerminalSink`] flushes frames to a real terminal on the alternate
//! screen. Each row is positioned explicitly, so raw mode line endings never
//! matter.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, Print, ResetColor, SetAttribute},
    terminal, QueueableCommand,
};

/// Receives one fully serialized frame at a time.
pub trait TextSink {
    fn write_frame(&mut self, frame: &str) -> Result<()>;
}

/// Keeps only the latest frame.
impl TextSink for String {
    fn write_frame(&mut self, frame: &str) -> Result<()> {
        self.clear();
        self.push_str(frame);
        Ok(())
    }
}

pub struct TerminalSink {
    stdout: io::Stdout,
    origin: (u16, u16),
    buf: Vec<u8>,
}

impl Default for TerminalSink {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalSink {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            origin: (0, 0),
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    /// Draw frames starting at this terminal column and row.
    pub fn at(mut self, column: u16, row: u16) -> Self {
        self.origin = (column, row);
        self
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.buf.queue(terminal::Clear(terminal::ClearType::All))?;
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl TextSink for TerminalSink {
    fn write_frame(&mut self, frame: &str) -> Result<()> {
        self.buf.clear();
        encode_frame_into(frame, self.origin, &mut self.buf)?;
        self.flush_buf()
    }
}

/// Encode a frame as one cursor move plus one print per row.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_frame_into(frame: &str, origin: (u16, u16), out: &mut Vec<u8>) -> Result<()> {
    let (column, row) = origin;
    for (y, line) in frame.lines().enumerate() {
        out.queue(cursor::MoveTo(column, row.saturating_add(y as u16)))?;
        out.queue(Print(line))?;
    }
    Ok(())
}

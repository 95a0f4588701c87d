use core::fmt::Write as _;
use std::io::{self, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{
        self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};
use log::warn;
use quickread_core::render::{DisplaySink, Frame};

use super::orp::{ORP_ANCHOR_PERCENT, anchor_column, anchor_line, progress_bar};

const HEADER_ROW: u16 = 1;
const MARKER_TOP_ROW: u16 = 3;
const CHUNK_ROW: u16 = 4;
const MARKER_BOTTOM_ROW: u16 = 5;
const PROGRESS_ROW: u16 = 7;
const STATUS_ROW: u16 = 9;
const HELP_ROW: u16 = 11;
const MIN_WIDTH: u16 = 20;

type HeaderLine = heapless::String<96>;

const HELP_TEXT: &str = "s start  p pause  space toggle  r reset  +/- wpm  c chunking  q quit";

/// Puts the terminal in raw, alternate-screen mode until dropped.
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        if let Err(err) = execute!(io::stdout(), EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(err);
        }
        Ok(Self { _private: () })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Full-screen RSVP view with the pivot letter pinned to one column.
pub struct TerminalDisplay<W: Write> {
    out: W,
    width: u16,
    status: String,
    fault_logged: bool,
    needs_clear: bool,
}

impl TerminalDisplay<io::Stdout> {
    /// Draws on stdout, sized to the current terminal.
    pub fn stdout() -> Self {
        let width = terminal::size().map(|(cols, _)| cols).unwrap_or(80);
        Self::new(io::stdout(), width)
    }
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W, width: u16) -> Self {
        Self {
            out,
            width: width.max(MIN_WIDTH),
            status: String::new(),
            fault_logged: false,
            needs_clear: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw_frame(&mut self, frame: Frame<'_>) -> io::Result<()> {
        let width = self.width as usize;
        let anchor = anchor_column(width, ORP_ANCHOR_PERCENT) as u16;

        if core::mem::take(&mut self.needs_clear) {
            queue!(self.out, Clear(ClearType::All))?;
        }

        let mut header = HeaderLine::new();
        let progress_pct = match frame {
            Frame::Idle { counter, .. } => {
                let _ = write!(header, "quickread  {counter}");
                0
            }
            Frame::Chunk {
                counter,
                progress_pct,
                wpm,
                ..
            } => {
                let _ = write!(header, "quickread  {wpm} wpm  {counter}");
                progress_pct
            }
        };

        queue!(
            self.out,
            MoveTo(0, HEADER_ROW),
            Clear(ClearType::CurrentLine),
            Print(header.as_str()),
            MoveTo(0, MARKER_TOP_ROW),
            Clear(ClearType::CurrentLine),
            MoveTo(0, CHUNK_ROW),
            Clear(ClearType::CurrentLine),
            MoveTo(0, MARKER_BOTTOM_ROW),
            Clear(ClearType::CurrentLine),
        )?;

        match frame {
            Frame::Idle { message, .. } => {
                let indent = width.saturating_sub(message.chars().count()) / 2;
                queue!(self.out, MoveTo(indent as u16, CHUNK_ROW), Print(message))?;
            }
            Frame::Chunk { text, .. } => {
                let line = anchor_line(text, width, ORP_ANCHOR_PERCENT);
                queue!(
                    self.out,
                    MoveTo(anchor, MARKER_TOP_ROW),
                    Print('v'),
                    MoveTo(line.indent as u16, CHUNK_ROW),
                    Print(line.before),
                    SetForegroundColor(Color::Red),
                    SetAttribute(Attribute::Bold),
                    Print(line.pivot),
                    SetAttribute(Attribute::Reset),
                    ResetColor,
                    Print(line.after),
                    MoveTo(anchor, MARKER_BOTTOM_ROW),
                    Print('^'),
                )?;
            }
        }

        queue!(
            self.out,
            MoveTo(0, PROGRESS_ROW),
            Clear(ClearType::CurrentLine),
            Print(progress_bar(progress_pct, width)),
            MoveTo(0, HELP_ROW),
            Clear(ClearType::CurrentLine),
            Print(HELP_TEXT),
        )?;
        self.draw_status()
    }

    fn draw_status(&mut self) -> io::Result<()> {
        queue!(
            self.out,
            MoveTo(0, STATUS_ROW),
            Clear(ClearType::CurrentLine),
            Print(&self.status),
        )?;
        self.out.flush()
    }

    fn report(&mut self, result: io::Result<()>) {
        if let Err(err) = result
            && !self.fault_logged
        {
            warn!("display: terminal write failed: {}", err);
            self.fault_logged = true;
        }
    }
}

impl<W: Write> DisplaySink for TerminalDisplay<W> {
    fn show(&mut self, frame: Frame<'_>) {
        let result = self.draw_frame(frame);
        self.report(result);
    }

    fn set_status(&mut self, status: &str) {
        self.status.clear();
        self.status.push_str(status);
        let result = self.draw_status();
        self.report(result);
    }

    /// Leftovers from the old layout are wiped on the next frame.
    fn resize(&mut self, columns: u16) {
        self.width = columns.max(MIN_WIDTH);
        self.needs_clear = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(display: TerminalDisplay<Vec<u8>>) -> String {
        String::from_utf8(display.into_inner()).unwrap()
    }

    #[test]
    fn chunk_frame_prints_pivot_split_and_counter() {
        let mut display = TerminalDisplay::new(Vec::new(), 80);
        display.show(Frame::Chunk {
            text: "quick",
            progress_pct: 40,
            counter: "2 / 5",
            wpm: 300,
        });

        let out = rendered(display);
        assert!(out.contains("quickread  300 wpm  2 / 5"));
        assert!(out.contains('q'));
        assert!(out.contains("ick"));
        assert!(out.contains("[###########"));
    }

    #[test]
    fn status_survives_redraws() {
        let mut display = TerminalDisplay::new(Vec::new(), 40);
        display.set_status("Loaded 5 words");
        display.show(Frame::Idle {
            message: "Select text and click Start",
            counter: "0 / 0",
        });

        let out = rendered(display);
        assert_eq!(out.matches("Loaded 5 words").count(), 2);
        assert!(out.contains("Select text and click Start"));
    }

    #[test]
    fn resize_moves_the_pivot_column_and_clears_once() {
        let chunk = Frame::Chunk {
            text: "quick",
            progress_pct: 40,
            counter: "2 / 5",
            wpm: 300,
        };
        let mut display = TerminalDisplay::new(Vec::new(), 80);
        display.show(chunk);
        display.resize(40);
        display.show(chunk);
        display.show(chunk);

        let out = rendered(display);
        let anchor = anchor_column(40, ORP_ANCHOR_PERCENT) + 1;
        assert!(out.contains(&format!("\x1b[{};{}Hv", MARKER_TOP_ROW + 1, anchor)));
        assert_eq!(out.matches("\x1b[2J").count(), 1);
    }

    #[test]
    fn resize_never_goes_below_minimum_width() {
        let mut display = TerminalDisplay::new(Vec::new(), 80);
        display.resize(3);
        assert_eq!(display.width, MIN_WIDTH);
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::ErrorKind::BrokenPipe.into())
        }
    }

    #[test]
    fn write_failures_are_absorbed() {
        let mut display = TerminalDisplay::new(BrokenPipe, 80);
        display.set_status("Finished!");
        display.set_status("Finished!");
        assert!(display.fault_logged);
    }
}

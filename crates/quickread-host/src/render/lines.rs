use std::io::Write;

use log::warn;
use quickread_core::render::{DisplaySink, Frame};

/// Line-per-frame output for pipes and non-interactive terminals.
pub struct LineDisplay<W: Write> {
    out: W,
    fault_logged: bool,
}

impl<W: Write> LineDisplay<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            fault_logged: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn report(&mut self, result: std::io::Result<()>) {
        if let Err(err) = result
            && !self.fault_logged
        {
            warn!("display: line output failed: {}", err);
            self.fault_logged = true;
        }
    }
}

impl<W: Write> DisplaySink for LineDisplay<W> {
    fn show(&mut self, frame: Frame<'_>) {
        let result = match frame {
            Frame::Idle { message, counter } => writeln!(self.out, "[{counter}] {message}"),
            Frame::Chunk {
                text,
                progress_pct,
                counter,
                ..
            } => writeln!(self.out, "[{counter} {progress_pct:>3}%] {text}"),
        };
        let result = result.and_then(|()| self.out.flush());
        self.report(result);
    }

    fn set_status(&mut self, status: &str) {
        let result = writeln!(self.out, "-- {status}").and_then(|()| self.out.flush());
        self.report(result);
    }
}

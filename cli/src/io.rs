//! Host-side collaborators for the memory-mapped display and keyboard:
//! stdout for the display, raw-mode non-blocking stdin for the keyboard.

use std::time::Duration;

use accumulon_core::{InputSource, OutputSink};
use crossterm::event::{self, Event, KeyCode};
use crossterm::terminal;

/// Writes flushed display lines straight to stdout.
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn write_line(&mut self, line: &str) {
        println!("{line}");
    }
}

/// Polls stdin in raw mode without blocking, translating key events to
/// their ASCII byte. Enables raw mode on construction and restores the
/// terminal on drop, matching the original's termios save/restore pairing.
pub struct RawStdinSource {
    raw_mode_enabled: bool,
}

impl RawStdinSource {
    pub fn new() -> Self {
        let raw_mode_enabled = terminal::enable_raw_mode().is_ok();
        if !raw_mode_enabled {
            eprintln!("[keyboard] could not enable raw terminal mode; input disabled");
        }
        Self { raw_mode_enabled }
    }
}

impl Default for RawStdinSource {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RawStdinSource {
    fn drop(&mut self) {
        if self.raw_mode_enabled {
            let _ = terminal::disable_raw_mode();
        }
    }
}

impl InputSource for RawStdinSource {
    fn poll_byte(&mut self) -> Option<u8> {
        if !self.raw_mode_enabled {
            return None;
        }
        if !event::poll(Duration::from_millis(0)).unwrap_or(false) {
            return None;
        }
        match event::read().ok()? {
            Event::Key(key) => match key.code {
                KeyCode::Char(c) => Some(c as u8),
                KeyCode::Enter => Some(b'\n'),
                _ => None,
            },
            _ => None,
        }
    }
}

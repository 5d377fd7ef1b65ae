mod display;
mod keyboard;

pub use display::{Display, OutputSink};
pub use keyboard::{InputSource, Keyboard};

/// Output sink that discards every line. Useful for tests and for `build`
/// runs that never touch the display.
pub struct NullOutputSink;

impl OutputSink for NullOutputSink {
    fn write_line(&mut self, _line: &str) {}
}

/// Input source that never has a byte ready. Useful for tests and for
/// headless `run` invocations without a keyboard.
pub struct NullInputSource;

impl InputSource for NullInputSource {
    fn poll_byte(&mut self) -> Option<u8> {
        None
    }
}

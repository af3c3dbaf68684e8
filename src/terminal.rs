//! Scrolling serial terminal view.
//!
//! Bytes from a serial source are printed into the bottom row of an
//! offscreen sprite. On carriage return, or when the line runs out of
//! horizontal space, the line is committed: the sprite is pushed to the
//! display and its contents shifted up one text row, so older lines move
//! towards the top edge and eventually scroll off. History is bounded by
//! the sprite height; nothing is kept once a row scrolls out.

use core::fmt;

use display_interface::DisplayError;
use embedded_hal::serial::{Read, Write};
use heapless::consts::U64;
use heapless::String;

use crate::error::{Error, LayoutError};
use crate::layout::Layout;
use crate::sprite::{Color, Sprite};

const ASCII_PRINTABLE_MIN: u8 = 0x20;
const ASCII_PRINTABLE_MAX: u8 = 0x7f; // exclusive

/// What a single input byte did to the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TerminalEvent {
    /// Printable character appended at the cursor.
    Appended,
    /// Line committed and the view scrolled up one row. The byte may also
    /// have been appended first if it was printable and filled the line.
    Committed,
    /// Byte outside the printable range, silently discarded.
    Dropped,
}

pub struct TerminalView<S> {
    sprite: S,
    layout: Layout,
    background: Color,
    cursor_x: u16,
    pending: String<U64>,
}

impl<S> TerminalView<S>
where
    S: Sprite,
{
    /// Create a view over `sprite`, which must be exactly the size of the
    /// layout's scroll area. Fails fast on any geometry the shift primitive
    /// cannot handle.
    pub fn new(sprite: S, layout: Layout, background: Color) -> Result<Self, Error> {
        layout.validate()?;
        if sprite.size() != (layout.screen_width, layout.scroll_height()) {
            return Err(LayoutError::SpriteSizeMismatch.into());
        }
        Ok(TerminalView {
            sprite,
            layout,
            background,
            cursor_x: 0,
            pending: String::new(),
        })
    }

    /// Paint the background, arm the scroll region and composite the empty
    /// view once, so the display shows a clean band before any input.
    pub fn init(&mut self) -> Result<(), DisplayError> {
        self.sprite.fill(self.background)?;
        self.sprite
            .set_scroll_region(self.layout.scroll_region(self.background))?;
        self.sprite.push(0, self.layout.header_height())?;
        Ok(())
    }

    pub fn cursor_x(&self) -> u16 {
        self.cursor_x
    }

    /// Text of the line currently being typed, as far as it fits the
    /// internal buffer.
    pub fn pending_line(&self) -> &str {
        &self.pending
    }

    /// Feed one byte through the state machine.
    ///
    /// Printable ASCII is drawn at the cursor on the input row and the
    /// cursor advances by the layout's per-character step. A carriage
    /// return, or the cursor passing the wrap threshold, commits the line.
    /// Everything else is dropped without touching the sprite.
    pub fn handle_byte(&mut self, byte: u8) -> Result<TerminalEvent, DisplayError> {
        let mut appended = false;
        if byte >= ASCII_PRINTABLE_MIN && byte < ASCII_PRINTABLE_MAX {
            self.sprite
                .set_cursor(self.cursor_x, self.layout.input_row())?;
            self.sprite.print_char(byte as char)?;
            self.pending.push(byte as char).ok();
            self.cursor_x += self.layout.char_advance;
            appended = true;
        }

        if byte == b'\r' || self.cursor_x > self.layout.wrap_threshold() {
            self.commit_line()?;
            return Ok(TerminalEvent::Committed);
        }

        Ok(if appended {
            TerminalEvent::Appended
        } else {
            TerminalEvent::Dropped
        })
    }

    /// Finalize the current line: push the view to the display, then shift
    /// the contents up one text row so the next line starts on a clean
    /// bottom row.
    ///
    /// Pushing before shifting is what keeps the newest line visible at the
    /// bottom of the scroll band right after the commit.
    pub fn commit_line(&mut self) -> Result<(), DisplayError> {
        self.cursor_x = 0;
        // heapless 0.5's String::clear is unsound for non-empty buffers;
        // drain char by char instead
        while self.pending.pop().is_some() {}
        self.sprite.set_cursor(0, self.layout.input_row())?;
        self.sprite.push(0, self.layout.header_height())?;
        self.sprite.scroll(0, -(self.layout.glyph_height as i16))?;
        Ok(())
    }

    /// Drain every byte the serial source has ready, without blocking.
    /// Returns the number of bytes processed. Read errors (framing noise
    /// and the like) drop the byte and keep draining.
    pub fn drain<R>(&mut self, serial: &mut R) -> Result<usize, DisplayError>
    where
        R: Read<u8>,
    {
        let mut n = 0;
        loop {
            match serial.read() {
                Ok(byte) => {
                    self.handle_byte(byte)?;
                    n += 1;
                }
                Err(nb::Error::WouldBlock) => return Ok(n),
                Err(nb::Error::Other(_)) => {}
            }
        }
    }

    /// Like [`drain`](TerminalView::drain), but writes every received byte
    /// back out for remote echo.
    pub fn drain_echo<R, W>(&mut self, serial: &mut R, echo: &mut W) -> Result<usize, DisplayError>
    where
        R: Read<u8>,
        W: Write<u8>,
    {
        let mut n = 0;
        loop {
            match serial.read() {
                Ok(byte) => {
                    nb::block!(echo.write(byte)).ok();
                    self.handle_byte(byte)?;
                    n += 1;
                }
                Err(nb::Error::WouldBlock) => return Ok(n),
                Err(nb::Error::Other(_)) => {}
            }
        }
    }
}

impl<S> fmt::Write for TerminalView<S>
where
    S: Sprite,
{
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for byte in s.bytes() {
            let byte = if byte == b'\n' { b'\r' } else { byte };
            self.handle_byte(byte).map_err(|_| fmt::Error)?;
        }
        Ok(())
    }
}

/// Terminal variant of the demo: a fixed title band plus the scrolling
/// view, fed from a non-blocking serial source.
pub struct TerminalScroller<S, H, R> {
    view: TerminalView<S>,
    header: H,
    serial: R,
    title: &'static str,
    header_background: Color,
}

impl<S, H, R> TerminalScroller<S, H, R>
where
    S: Sprite,
    H: Sprite,
    R: Read<u8>,
{
    pub fn new(
        view: TerminalView<S>,
        header: H,
        serial: R,
        title: &'static str,
        header_background: Color,
    ) -> Self {
        TerminalScroller {
            view,
            header,
            serial,
            title,
            header_background,
        }
    }

    pub fn view(&self) -> &TerminalView<S> {
        &self.view
    }
}

impl<S, H, R> crate::demo::ScrollDemo for TerminalScroller<S, H, R>
where
    S: Sprite,
    H: Sprite,
    R: Read<u8>,
{
    fn init(&mut self) -> Result<(), Error> {
        self.header.fill(self.header_background)?;
        self.header.set_cursor(0, 0)?;
        self.header.print_str(self.title)?;
        self.header.push(0, 0)?;
        self.view.init()?;
        Ok(())
    }

    /// One pass over the currently available input. Never waits; with no
    /// data pending this returns immediately.
    fn tick(&mut self) -> Result<(), Error> {
        self.view.drain(&mut self.serial)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprite::mock::{MockSprite, Op};
    use std::vec::Vec;

    fn test_view() -> TerminalView<MockSprite> {
        let layout = Layout::default();
        let sprite = MockSprite::new(layout.screen_width, layout.scroll_height());
        TerminalView::new(sprite, layout, Color::BLUE).unwrap()
    }

    struct ScriptSerial {
        data: Vec<u8>,
        pos: usize,
    }

    impl ScriptSerial {
        fn new(data: &[u8]) -> Self {
            ScriptSerial {
                data: data.to_vec(),
                pos: 0,
            }
        }
    }

    impl Read<u8> for ScriptSerial {
        type Error = ();

        fn read(&mut self) -> nb::Result<u8, ()> {
            if self.pos < self.data.len() {
                let byte = self.data[self.pos];
                self.pos += 1;
                Ok(byte)
            } else {
                Err(nb::Error::WouldBlock)
            }
        }
    }

    /// Serial source whose script can interleave good bytes with read
    /// errors (framing noise), ending in WouldBlock.
    struct FlakySerial {
        script: Vec<Result<u8, ()>>,
        pos: usize,
    }

    impl Read<u8> for FlakySerial {
        type Error = ();

        fn read(&mut self) -> nb::Result<u8, ()> {
            if self.pos < self.script.len() {
                let item = self.script[self.pos];
                self.pos += 1;
                item.map_err(nb::Error::Other)
            } else {
                Err(nb::Error::WouldBlock)
            }
        }
    }

    struct EchoSink {
        written: Vec<u8>,
    }

    impl Write<u8> for EchoSink {
        type Error = ();

        fn write(&mut self, word: u8) -> nb::Result<(), ()> {
            self.written.push(word);
            Ok(())
        }

        fn flush(&mut self) -> nb::Result<(), ()> {
            Ok(())
        }
    }

    #[test]
    fn cursor_advances_by_fixed_step() {
        let mut view = test_view();
        for (i, byte) in b"ABC".iter().enumerate() {
            let event = view.handle_byte(*byte).unwrap();
            assert_eq!(event, TerminalEvent::Appended);
            assert_eq!(view.cursor_x(), (i as u16 + 1) * 16);
        }
        assert_eq!(view.pending_line(), "ABC");
        assert_eq!(view.sprite.count(|op| matches!(op, Op::PrintChar(_))), 3);
        assert_eq!(view.sprite.scrolls(), 0);
    }

    #[test]
    fn ab_cr_appends_twice_then_commits_once() {
        let mut view = test_view();
        assert_eq!(view.handle_byte(b'A').unwrap(), TerminalEvent::Appended);
        assert_eq!(view.handle_byte(b'B').unwrap(), TerminalEvent::Appended);
        assert_eq!(view.handle_byte(b'\r').unwrap(), TerminalEvent::Committed);

        assert_eq!(view.cursor_x(), 0);
        assert_eq!(view.pending_line(), "");
        assert_eq!(view.sprite.count(|op| matches!(op, Op::PrintChar(_))), 2);
        assert_eq!(view.sprite.ops, {
            let mut expected = Vec::new();
            expected.push(Op::SetCursor(0, 272));
            expected.push(Op::PrintChar('A'));
            expected.push(Op::SetCursor(16, 272));
            expected.push(Op::PrintChar('B'));
            expected.push(Op::SetCursor(0, 272));
            expected.push(Op::Push(0, 32));
            expected.push(Op::Scroll(0, -16));
            expected
        });
    }

    #[test]
    fn carriage_return_commits_at_any_cursor_position() {
        let mut view = test_view();
        assert_eq!(view.handle_byte(b'\r').unwrap(), TerminalEvent::Committed);
        assert_eq!(view.sprite.scrolls(), 1);

        for _ in 0..5 {
            view.handle_byte(b'x').unwrap();
        }
        assert_eq!(view.handle_byte(b'\r').unwrap(), TerminalEvent::Committed);
        assert_eq!(view.sprite.scrolls(), 2);
        assert_eq!(view.cursor_x(), 0);
    }

    #[test]
    fn line_full_commits_without_carriage_return() {
        let mut view = test_view();
        // wrap threshold is 154; the tenth character puts the cursor at 160
        for _ in 0..9 {
            assert_eq!(view.handle_byte(b'X').unwrap(), TerminalEvent::Appended);
        }
        assert_eq!(view.handle_byte(b'X').unwrap(), TerminalEvent::Committed);
        assert_eq!(view.cursor_x(), 0);
        assert_eq!(view.sprite.count(|op| matches!(op, Op::PrintChar(_))), 10);
        assert_eq!(view.sprite.scrolls(), 1);
    }

    #[test]
    fn non_printable_bytes_are_dropped() {
        let mut view = test_view();
        for byte in [0x07u8, 0x1b, 0x00, 0x80, 0xff].iter() {
            assert_eq!(view.handle_byte(*byte).unwrap(), TerminalEvent::Dropped);
        }
        assert_eq!(view.cursor_x(), 0);
        assert!(view.sprite.ops.is_empty());
    }

    #[test]
    fn drain_consumes_everything_available() {
        let mut view = test_view();
        let mut serial = ScriptSerial::new(b"hi\rok");
        let n = view.drain(&mut serial).unwrap();
        assert_eq!(n, 5);
        assert_eq!(view.pending_line(), "ok");
        assert_eq!(view.sprite.scrolls(), 1);

        // nothing left: next pass is a no-op
        let n = view.drain(&mut serial).unwrap();
        assert_eq!(n, 0);
    }

    #[test]
    fn drain_skips_read_errors_and_keeps_going() {
        let mut view = test_view();
        let mut serial = FlakySerial {
            script: vec![Ok(b'A'), Err(()), Ok(b'B'), Err(()), Ok(b'\r')],
            pos: 0,
        };
        let n = view.drain(&mut serial).unwrap();

        // only the good bytes count; the errored reads left no trace
        assert_eq!(n, 3);
        assert_eq!(view.sprite.count(|op| matches!(op, Op::PrintChar(_))), 2);
        assert_eq!(view.sprite.scrolls(), 1);
    }

    #[test]
    fn drain_echo_writes_every_byte_back() {
        let mut view = test_view();
        let mut serial = ScriptSerial::new(b"AB\r");
        let mut echo = EchoSink {
            written: Vec::new(),
        };
        let n = view.drain_echo(&mut serial, &mut echo).unwrap();

        assert_eq!(n, 3);
        assert_eq!(echo.written, b"AB\r");
        assert_eq!(view.pending_line(), "");
        assert_eq!(view.sprite.scrolls(), 1);
    }

    #[test]
    fn drain_echo_echoes_bytes_the_view_drops() {
        let mut view = test_view();
        let mut serial = ScriptSerial::new(&[b'A', 0x07, b'B']);
        let mut echo = EchoSink {
            written: Vec::new(),
        };
        let n = view.drain_echo(&mut serial, &mut echo).unwrap();

        assert_eq!(n, 3);
        assert_eq!(echo.written, [b'A', 0x07, b'B']);
        assert_eq!(view.pending_line(), "AB");
    }

    #[test]
    fn writeln_commits_a_line() {
        use core::fmt::Write;
        let mut view = test_view();
        writeln!(view, "AB").unwrap();
        assert_eq!(view.cursor_x(), 0);
        assert_eq!(view.sprite.scrolls(), 1);
    }

    #[test]
    fn rejects_sprite_of_wrong_size() {
        let layout = Layout::default();
        let sprite = MockSprite::new(layout.screen_width, layout.scroll_height() - 8);
        assert!(matches!(
            TerminalView::new(sprite, layout, Color::BLUE),
            Err(Error::Layout(LayoutError::SpriteSizeMismatch))
        ));
    }

    #[test]
    fn commit_clears_pending_text() {
        let mut view = test_view();
        view.handle_byte(b'A').unwrap();
        view.handle_byte(b'B').unwrap();
        assert_eq!(view.pending_line(), "AB");

        view.commit_line().unwrap();
        assert_eq!(view.pending_line(), "");
        assert_eq!(view.cursor_x(), 0);
    }

    #[test]
    fn init_paints_and_arms_scroll_region() {
        let mut view = test_view();
        view.init().unwrap();
        assert_eq!(view.sprite.ops[0], Op::Fill(Color::BLUE));
        assert_eq!(
            view.sprite.ops[1],
            Op::SetScrollRegion(Layout::default().scroll_region(Color::BLUE))
        );
        assert_eq!(view.sprite.ops[2], Op::Push(0, 32));
    }
}

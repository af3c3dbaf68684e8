//! Host demo of the scrolling terminal: a character-cell sprite rendered to
//! stdout stands in for the display library, and a scripted byte source
//! stands in for the serial port. Run with `cargo run --example terminal`.

use display_interface::DisplayError;
use embedded_hal::serial::Read;
use tft_scrollview::demo::ScrollDemo;
use tft_scrollview::terminal::{TerminalScroller, TerminalView};
use tft_scrollview::{Color, Layout, ScrollRegion, Sprite};

const CELL: u16 = 16; // matches the default layout's glyph size

/// Character-cell sprite: each 16x16 glyph cell is one terminal character.
struct CellSprite {
    name: &'static str,
    width: u16,
    height: u16,
    cols: usize,
    rows: usize,
    cells: Vec<Vec<char>>,
    cursor: (usize, usize),
}

impl CellSprite {
    fn new(name: &'static str, width: u16, height: u16) -> Self {
        let cols = (width / CELL) as usize;
        let rows = (height / CELL) as usize;
        CellSprite {
            name,
            width,
            height,
            cols,
            rows,
            cells: vec![vec![' '; cols]; rows],
            cursor: (0, 0),
        }
    }

    fn put(&mut self, c: char) {
        let (col, row) = self.cursor;
        if col < self.cols && row < self.rows {
            self.cells[row][col] = c;
        }
        self.cursor.0 += 1;
    }
}

impl Sprite for CellSprite {
    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn fill(&mut self, _color: Color) -> Result<(), DisplayError> {
        for row in self.cells.iter_mut() {
            for cell in row.iter_mut() {
                *cell = ' ';
            }
        }
        Ok(())
    }

    fn set_scroll_region(&mut self, _region: ScrollRegion) -> Result<(), DisplayError> {
        Ok(())
    }

    fn set_cursor(&mut self, x: u16, y: u16) -> Result<(), DisplayError> {
        self.cursor = ((x / CELL) as usize, (y / CELL) as usize);
        Ok(())
    }

    fn print_char(&mut self, c: char) -> Result<(), DisplayError> {
        self.put(c);
        Ok(())
    }

    fn print_str(&mut self, s: &str) -> Result<(), DisplayError> {
        for c in s.chars() {
            self.put(c);
        }
        Ok(())
    }

    fn print_number(&mut self, n: i32) -> Result<(), DisplayError> {
        self.print_str(&n.to_string())
    }

    fn draw_pixel(&mut self, _x: u16, _y: u16, _color: Color) -> Result<(), DisplayError> {
        Ok(())
    }

    fn draw_vline(&mut self, _x: u16, _y: u16, _h: u16, _color: Color) -> Result<(), DisplayError> {
        Ok(())
    }

    fn scroll(&mut self, _dx: i16, dy: i16) -> Result<(), DisplayError> {
        let up = (-dy).max(0) as usize / CELL as usize;
        for _ in 0..up {
            self.cells.remove(0);
            self.cells.push(vec![' '; self.cols]);
        }
        Ok(())
    }

    fn push(&mut self, _x: u16, _y: u16) -> Result<(), DisplayError> {
        println!("+{}+ {}", "-".repeat(self.cols), self.name);
        for row in &self.cells {
            let line: String = row.iter().collect();
            println!("|{}|", line);
        }
        println!("+{}+", "-".repeat(self.cols));
        Ok(())
    }
}

/// Serial source that plays back a canned byte script, then reports
/// "no data" forever.
struct ScriptSerial {
    data: Vec<u8>,
    pos: usize,
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

fn main() {
    let layout = Layout::default();
    let sprite = CellSprite::new("terminal", layout.screen_width, layout.scroll_height());
    let header = CellSprite::new("header", layout.screen_width, layout.header_height());
    let view = TerminalView::new(sprite, layout, Color::BLUE).unwrap();

    let serial = ScriptSerial {
        data: b"Hello over serial\rsecond line\rthis line is much too long to fit\rbye\r".to_vec(),
        pos: 0,
    };

    let mut demo = TerminalScroller::new(view, header, serial, "SERIAL 115200", Color::BLACK);
    demo.init().unwrap();

    // one tick drains the whole script; each committed line pushes a frame
    demo.tick().unwrap();
}

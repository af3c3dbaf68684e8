//! Host demo of the scrolling graph: the waveform sprite is a pixel grid
//! rendered as ASCII, the readout and caption are character cells. Run with
//! `cargo run --example graph`.

use std::time::Duration;

use display_interface::DisplayError;
use embedded_hal::blocking::delay::DelayMs;
use tft_scrollview::demo::ScrollDemo;
use tft_scrollview::graph::{GraphConfig, GraphScroller};
use tft_scrollview::{Color, ScrollRegion, Sprite};

/// Pixel sprite rendered as one ASCII character per pixel.
struct PixelSprite {
    width: u16,
    height: u16,
    pixels: Vec<Vec<char>>,
    pushes: u32,
}

impl PixelSprite {
    fn new(width: u16, height: u16) -> Self {
        PixelSprite {
            width,
            height,
            pixels: vec![vec![' '; width as usize]; height as usize],
            pushes: 0,
        }
    }

    fn glyph(color: Color) -> char {
        match color {
            Color::YELLOW => '#',
            Color::NAVY => '.',
            _ => '+',
        }
    }

    fn set(&mut self, x: u16, y: u16, c: char) {
        if x < self.width && y < self.height {
            self.pixels[y as usize][x as usize] = c;
        }
    }
}

impl Sprite for PixelSprite {
    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn fill(&mut self, _color: Color) -> Result<(), DisplayError> {
        for row in self.pixels.iter_mut() {
            for p in row.iter_mut() {
                *p = ' ';
            }
        }
        Ok(())
    }

    fn set_scroll_region(&mut self, _region: ScrollRegion) -> Result<(), DisplayError> {
        Ok(())
    }

    fn set_cursor(&mut self, _x: u16, _y: u16) -> Result<(), DisplayError> {
        Ok(())
    }

    fn print_char(&mut self, _c: char) -> Result<(), DisplayError> {
        Ok(())
    }

    fn print_str(&mut self, _s: &str) -> Result<(), DisplayError> {
        Ok(())
    }

    fn print_number(&mut self, _n: i32) -> Result<(), DisplayError> {
        Ok(())
    }

    fn draw_pixel(&mut self, x: u16, y: u16, color: Color) -> Result<(), DisplayError> {
        self.set(x, y, Self::glyph(color));
        Ok(())
    }

    fn draw_vline(&mut self, x: u16, y: u16, h: u16, color: Color) -> Result<(), DisplayError> {
        for dy in 0..h {
            self.set(x, y + dy, Self::glyph(color));
        }
        Ok(())
    }

    fn scroll(&mut self, dx: i16, _dy: i16) -> Result<(), DisplayError> {
        let left = (-dx).max(0) as usize;
        for row in self.pixels.iter_mut() {
            for _ in 0..left {
                row.remove(0);
                row.push(' ');
            }
        }
        Ok(())
    }

    fn push(&mut self, _x: u16, _y: u16) -> Result<(), DisplayError> {
        self.pushes += 1;
        if self.pushes % 20 != 0 {
            return Ok(());
        }
        // downsample rows by two to keep the frame terminal-sized
        println!("frame {}", self.pushes);
        for row in self.pixels.iter().step_by(2) {
            let line: String = row.iter().collect();
            println!("|{}|", line);
        }
        Ok(())
    }
}

/// Text sprite that only remembers the last thing printed into it.
struct TextSprite {
    width: u16,
    height: u16,
    last: String,
}

impl TextSprite {
    fn new(width: u16, height: u16) -> Self {
        TextSprite {
            width,
            height,
            last: String::new(),
        }
    }
}

impl Sprite for TextSprite {
    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn fill(&mut self, _color: Color) -> Result<(), DisplayError> {
        self.last.clear();
        Ok(())
    }

    fn set_scroll_region(&mut self, _region: ScrollRegion) -> Result<(), DisplayError> {
        Ok(())
    }

    fn set_cursor(&mut self, _x: u16, _y: u16) -> Result<(), DisplayError> {
        Ok(())
    }

    fn print_char(&mut self, c: char) -> Result<(), DisplayError> {
        self.last.push(c);
        Ok(())
    }

    fn print_str(&mut self, s: &str) -> Result<(), DisplayError> {
        self.last = s.to_string();
        Ok(())
    }

    fn print_number(&mut self, n: i32) -> Result<(), DisplayError> {
        self.last = n.to_string();
        Ok(())
    }

    fn draw_pixel(&mut self, _x: u16, _y: u16, _color: Color) -> Result<(), DisplayError> {
        Ok(())
    }

    fn draw_vline(&mut self, _x: u16, _y: u16, _h: u16, _color: Color) -> Result<(), DisplayError> {
        Ok(())
    }

    fn scroll(&mut self, _dx: i16, _dy: i16) -> Result<(), DisplayError> {
        Ok(())
    }

    fn push(&mut self, _x: u16, _y: u16) -> Result<(), DisplayError> {
        Ok(())
    }
}

struct SleepDelay;

impl DelayMs<u16> for SleepDelay {
    fn delay_ms(&mut self, ms: u16) {
        std::thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}

fn main() {
    let config = GraphConfig {
        tick_delay_ms: 5,
        ..GraphConfig::default()
    };

    let mut demo = GraphScroller::new(
        PixelSprite::new(128, 61),
        TextSprite::new(32, 64),
        TextSprite::new(80, 16),
        SleepDelay,
        config,
    );

    demo.init().unwrap();
    for _ in 0..160 {
        demo.tick().unwrap();
    }
}

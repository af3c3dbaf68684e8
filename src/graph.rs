//! Scrolling graph with a synchronized numeric readout.
//!
//! Every tick plots one sample of a bounded ramp at the trailing edge of the
//! graph sprite, prints the value into a small text sprite, pushes both to
//! the display and shifts them one unit in their scroll direction. A third
//! sprite carries a caption that is redrawn on a fixed period.

use embedded_hal::blocking::delay::DelayMs;

use crate::error::Error;
use crate::sprite::{Color, ScrollRegion, Sprite};

/// Integer value bouncing between two inclusive bounds.
///
/// Starts at the floor, ascending. The direction flips on the same step
/// that reaches a bound, so the value never leaves `[floor, ceiling]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ramp {
    value: i32,
    step: i32,
    floor: i32,
    ceiling: i32,
}

impl Ramp {
    pub fn new(floor: i32, ceiling: i32) -> Self {
        Ramp {
            value: floor,
            step: 1,
            floor,
            ceiling,
        }
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn ascending(&self) -> bool {
        self.step > 0
    }

    /// Advance one step and return the new value.
    pub fn advance(&mut self) -> i32 {
        self.value += self.step;
        if self.value >= self.ceiling {
            self.step = -1;
        } else if self.value <= self.floor {
            self.step = 1;
        }
        self.value
    }
}

/// Counts scroll shifts; fires exactly once every `spacing` shifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
struct GridTimer {
    count: u16,
    spacing: u16,
}

impl GridTimer {
    fn new(spacing: u16) -> Self {
        GridTimer { count: 0, spacing }
    }

    /// Returns true when this shift lands on a grid column.
    fn on_shift(&mut self) -> bool {
        self.count += 1;
        if self.count >= self.spacing {
            self.count = 0;
            true
        } else {
            false
        }
    }
}

/// Countdown that fires exactly once every `period` ticks and rearms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
struct CaptionTimer {
    count: u16,
    period: u16,
}

impl CaptionTimer {
    fn new(period: u16) -> Self {
        CaptionTimer {
            count: period,
            period,
        }
    }

    fn on_tick(&mut self) -> bool {
        self.count -= 1;
        if self.count == 0 {
            self.count = self.period;
            true
        } else {
            false
        }
    }
}

/// Tuning knobs for the graph demo. Defaults match the reference sketch:
/// a yellow ramp between 1 and 60 on a navy grid, 50 ms per tick, caption
/// repainted every 40 ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GraphConfig {
    pub floor: i32,
    pub ceiling: i32,
    pub tick_delay_ms: u16,
    pub caption_redraw_period: u16,
    /// Pixels between grid columns; also the vertical tick spacing.
    pub grid_spacing: u16,
    pub background: Color,
    pub sample_color: Color,
    pub grid_color: Color,
    pub caption_background: Color,
    pub caption: &'static str,
    /// Cursor position of the caption inside its sprite.
    pub caption_cursor: (u16, u16),
    /// Width of the caption band that actually scrolls.
    pub caption_scroll_width: u16,
    /// Text row height of the numeric readout sprite.
    pub readout_row_height: u16,
    /// Display positions of the three sprites.
    pub graph_origin: (u16, u16),
    pub readout_origin: (u16, u16),
    pub caption_origin: (u16, u16),
}

impl Default for GraphConfig {
    fn default() -> Self {
        GraphConfig {
            floor: 1,
            ceiling: 60,
            tick_delay_ms: 50,
            caption_redraw_period: 40,
            grid_spacing: 10,
            background: Color::BLUE,
            sample_color: Color::YELLOW,
            grid_color: Color::NAVY,
            caption_background: Color::DARK_GREY,
            caption: "Hello World",
            caption_cursor: (6, 0),
            caption_scroll_width: 40,
            readout_row_height: 16,
            graph_origin: (0, 0),
            readout_origin: (0, 64),
            caption_origin: (40, 70),
        }
    }
}

/// Graph variant of the demo: waveform sprite, numeric readout sprite and
/// a slowly scrolling caption sprite, stepped on a fixed tick.
pub struct GraphScroller<G, T, C, D> {
    graph: G,
    readout: T,
    caption: C,
    delay: D,
    config: GraphConfig,
    ramp: Ramp,
    grid: GridTimer,
    redraw: CaptionTimer,
}

impl<G, T, C, D> GraphScroller<G, T, C, D>
where
    G: Sprite,
    T: Sprite,
    C: Sprite,
    D: DelayMs<u16>,
{
    pub fn new(graph: G, readout: T, caption: C, delay: D, config: GraphConfig) -> Self {
        // zero-period timers would underflow or spin; treat them as 1
        let mut config = config;
        config.grid_spacing = config.grid_spacing.max(1);
        config.caption_redraw_period = config.caption_redraw_period.max(1);

        let ramp = Ramp::new(config.floor, config.ceiling);
        let grid = GridTimer::new(config.grid_spacing);
        let redraw = CaptionTimer::new(config.caption_redraw_period);
        GraphScroller {
            graph,
            readout,
            caption,
            delay,
            config,
            ramp,
            grid,
            redraw,
        }
    }

    pub fn value(&self) -> i32 {
        self.ramp.value()
    }

    fn trailing_edge(&self) -> u16 {
        self.graph.size().0 - 1
    }

    /// Plot the current value as a 2 px column at the trailing edge.
    /// Values outside the sprite clamp to its edges instead of wrapping.
    fn plot_sample(&mut self) -> Result<(), Error> {
        let (_, h) = self.graph.size();
        let value = self.ramp.value().max(0) as u16;
        let y = (h - 1).saturating_sub(value);
        self.graph
            .draw_vline(self.trailing_edge(), y, 2, self.config.sample_color)?;
        Ok(())
    }

    /// Redraw the grid at the trailing edge after a shift: a full column
    /// every `grid_spacing` shifts, sparse row ticks otherwise.
    fn draw_grid_edge(&mut self) -> Result<(), Error> {
        let x = self.trailing_edge();
        let (_, h) = self.graph.size();
        if self.grid.on_shift() {
            self.graph.draw_vline(x, 0, h, self.config.grid_color)?;
        } else {
            let mut y = 0;
            while y < h {
                self.graph.draw_pixel(x, y, self.config.grid_color)?;
                y += self.config.grid_spacing;
            }
        }
        Ok(())
    }

    fn paint_caption(&mut self) -> Result<(), Error> {
        let (cx, cy) = self.config.caption_cursor;
        self.caption.set_cursor(cx, cy)?;
        self.caption.print_str(self.config.caption)?;
        Ok(())
    }
}

impl<G, T, C, D> crate::demo::ScrollDemo for GraphScroller<G, T, C, D>
where
    G: Sprite,
    T: Sprite,
    C: Sprite,
    D: DelayMs<u16>,
{
    fn init(&mut self) -> Result<(), Error> {
        let bg = self.config.background;

        self.graph.fill(bg)?;
        let (gw, gh) = self.graph.size();
        self.graph.set_scroll_region(ScrollRegion {
            x: 0,
            y: 0,
            w: gw,
            h: gh,
            fill: bg,
        })?;

        self.readout.fill(bg)?;
        let (tw, th) = self.readout.size();
        self.readout.set_scroll_region(ScrollRegion {
            x: 0,
            y: 0,
            w: tw,
            h: th,
            fill: bg,
        })?;

        let caption_bg = self.config.caption_background;
        self.caption.fill(caption_bg)?;
        let (_, ch) = self.caption.size();
        self.caption.set_scroll_region(ScrollRegion {
            x: 0,
            y: 0,
            w: self.config.caption_scroll_width,
            h: ch,
            fill: caption_bg,
        })?;
        self.paint_caption()?;

        let (gx, gy) = self.config.graph_origin;
        self.graph.push(gx, gy)?;
        let (tx, ty) = self.config.readout_origin;
        self.readout.push(tx, ty)?;
        let (cx, cy) = self.config.caption_origin;
        self.caption.push(cx, cy)?;
        Ok(())
    }

    fn tick(&mut self) -> Result<(), Error> {
        self.plot_sample()?;

        // readout goes on the bottom text row, trailing the same value
        let (_, th) = self.readout.size();
        self.readout
            .set_cursor(0, th.saturating_sub(self.config.readout_row_height))?;
        self.readout.print_number(self.ramp.value())?;

        let (gx, gy) = self.config.graph_origin;
        self.graph.push(gx, gy)?;
        let (tx, ty) = self.config.readout_origin;
        self.readout.push(tx, ty)?;
        let (cx, cy) = self.config.caption_origin;
        self.caption.push(cx, cy)?;

        self.ramp.advance();

        self.delay.delay_ms(self.config.tick_delay_ms);

        self.graph.scroll(-1, 0)?;
        self.readout
            .scroll(0, -(self.config.readout_row_height as i16))?;
        self.caption.scroll(1, 0)?;

        self.draw_grid_edge()?;

        if self.redraw.on_tick() {
            self.paint_caption()?;
        }
        Ok(())
    }
}

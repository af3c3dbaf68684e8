use display_interface::DisplayError;

/// RGB565 color, same packing the usual TFT libraries use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color(pub u16);

impl Color {
    pub const BLACK: Color = Color(0x0000);
    pub const NAVY: Color = Color(0x000F);
    pub const BLUE: Color = Color(0x001F);
    pub const DARK_GREY: Color = Color(0x7BEF);
    pub const YELLOW: Color = Color(0xFFE0);
    pub const WHITE: Color = Color(0xFFFF);
}

/// Rectangular sub-area of a sprite whose contents may be shifted,
/// with the vacated band refilled by `fill`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScrollRegion {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
    pub fill: Color,
}

/// An offscreen pixel surface that can be drawn into, shifted, and
/// composited onto the physical display.
///
/// This is the seam to the actual graphics library: allocation, font
/// rendering and pixel blitting all live behind it. Implementations wrap
/// whatever sprite/framebuffer type the display stack provides; the scroll
/// views in this crate only sequence calls through this trait.
///
/// Text is drawn at the current cursor with the implementor's font; the
/// cursor names the top-left pixel of the next glyph cell.
pub trait Sprite {
    /// Width and height of the sprite in pixels.
    fn size(&self) -> (u16, u16);

    /// Fill the whole sprite with one color.
    fn fill(&mut self, color: Color) -> Result<(), DisplayError>;

    /// Restrict shifting to `region` and set the refill color for the
    /// band vacated by a shift.
    fn set_scroll_region(&mut self, region: ScrollRegion) -> Result<(), DisplayError>;

    /// Place the text cursor at a pixel position.
    fn set_cursor(&mut self, x: u16, y: u16) -> Result<(), DisplayError>;

    fn print_char(&mut self, c: char) -> Result<(), DisplayError>;

    fn print_str(&mut self, s: &str) -> Result<(), DisplayError>;

    fn print_number(&mut self, n: i32) -> Result<(), DisplayError>;

    fn draw_pixel(&mut self, x: u16, y: u16, color: Color) -> Result<(), DisplayError>;

    /// Vertical line of height `h` starting at `(x, y)` going down.
    fn draw_vline(&mut self, x: u16, y: u16, h: u16, color: Color) -> Result<(), DisplayError>;

    /// Shift the scroll region contents by `(dx, dy)` pixels. Positive `dx`
    /// moves right, positive `dy` moves down; the vacated band is refilled
    /// with the scroll region's fill color.
    fn scroll(&mut self, dx: i16, dy: i16) -> Result<(), DisplayError>;

    /// Composite the sprite onto the display with its top-left at `(x, y)`.
    fn push(&mut self, x: u16, y: u16) -> Result<(), DisplayError>;
}

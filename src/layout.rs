use crate::error::LayoutError;
use crate::sprite::{Color, ScrollRegion};

/// Screen and font geometry for the scrolling terminal.
///
/// `char_advance` is the horizontal step per printed character. It defaults
/// to the glyph width; set it narrower only to reproduce the tighter spacing
/// some fonts are tuned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Layout {
    /// Glyph cell width in pixels, including spacing.
    pub glyph_width: u16,
    /// Glyph cell height in pixels, including spacing.
    pub glyph_height: u16,
    pub screen_width: u16,
    pub screen_height: u16,
    /// Text rows reserved at the top of the screen, outside the scroll area.
    pub header_rows: u16,
    /// Text rows reserved at the bottom of the screen.
    pub footer_rows: u16,
    pub char_advance: u16,
}

impl Default for Layout {
    /// 170x320 portrait panel, 16x16 font, two title rows. The geometry of
    /// the T-Display-S3 serial terminal.
    fn default() -> Self {
        Layout {
            glyph_width: 16,
            glyph_height: 16,
            screen_width: 170,
            screen_height: 320,
            header_rows: 2,
            footer_rows: 0,
            char_advance: 16,
        }
    }
}

impl Layout {
    /// Height in pixels of the fixed header band.
    pub fn header_height(&self) -> u16 {
        self.header_rows * self.glyph_height
    }

    /// Number of text rows inside the scroll area.
    pub fn scroll_rows(&self) -> u16 {
        let reserved = (self.header_rows + self.footer_rows) * self.glyph_height;
        self.screen_height.saturating_sub(reserved) / self.glyph_height
    }

    /// Pixel height of the scroll area.
    pub fn scroll_height(&self) -> u16 {
        let reserved = (self.header_rows + self.footer_rows) * self.glyph_height;
        self.screen_height.saturating_sub(reserved)
    }

    /// Y offset within the scroll sprite of the row new text is written to.
    pub fn input_row(&self) -> u16 {
        self.scroll_height().saturating_sub(self.glyph_height)
    }

    /// Cursor position past which the current line is committed.
    pub fn wrap_threshold(&self) -> u16 {
        self.screen_width.saturating_sub(self.glyph_width)
    }

    /// The scroll region covering the whole scrollable band.
    pub fn scroll_region(&self, fill: Color) -> ScrollRegion {
        ScrollRegion {
            x: 0,
            y: 0,
            w: self.screen_width,
            h: self.scroll_height(),
            fill,
        }
    }

    /// Check the geometry preconditions of the shift primitive.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.glyph_width == 0 || self.glyph_height == 0 || self.char_advance == 0 {
            return Err(LayoutError::ZeroGlyph);
        }
        if self.glyph_width > self.screen_width {
            return Err(LayoutError::GlyphWiderThanScreen);
        }
        if self.scroll_rows() == 0 {
            return Err(LayoutError::NoScrollRows);
        }
        // The shift primitive refills whole text rows; a partial row at the
        // bottom would never be cleared.
        if self.scroll_height() % self.glyph_height != 0 {
            return Err(LayoutError::MisalignedScrollRegion);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_is_valid() {
        let layout = Layout::default();
        assert_eq!(layout.validate(), Ok(()));
        assert_eq!(layout.header_height(), 32);
        assert_eq!(layout.scroll_height(), 288);
        assert_eq!(layout.scroll_rows(), 18);
        assert_eq!(layout.input_row(), 272);
        assert_eq!(layout.wrap_threshold(), 154);
    }

    #[test]
    fn rejects_misaligned_scroll_region() {
        let layout = Layout {
            screen_height: 330,
            ..Layout::default()
        };
        assert_eq!(layout.validate(), Err(LayoutError::MisalignedScrollRegion));
    }

    #[test]
    fn rejects_zero_glyph() {
        let layout = Layout {
            char_advance: 0,
            ..Layout::default()
        };
        assert_eq!(layout.validate(), Err(LayoutError::ZeroGlyph));
    }

    #[test]
    fn rejects_geometry_without_scroll_rows() {
        let layout = Layout {
            header_rows: 10,
            footer_rows: 10,
            ..Layout::default()
        };
        assert_eq!(layout.validate(), Err(LayoutError::NoScrollRows));
    }

    #[test]
    fn scroll_region_covers_band_below_header() {
        let layout = Layout::default();
        let region = layout.scroll_region(Color::BLUE);
        assert_eq!(
            region,
            ScrollRegion {
                x: 0,
                y: 0,
                w: 170,
                h: 288,
                fill: Color::BLUE
            }
        );
    }
}

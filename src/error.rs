use display_interface::DisplayError;

/// Reasons a layout is rejected before any drawing happens.
///
/// The shift-with-fill primitive only behaves when the scrolled band is an
/// integral number of text rows high, so a bad geometry is refused at
/// construction instead of producing garbled scrolling later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LayoutError {
    /// A glyph dimension or the per-character advance is zero.
    ZeroGlyph,
    /// A single glyph does not fit on one line.
    GlyphWiderThanScreen,
    /// Header and footer rows leave no scrollable rows.
    NoScrollRows,
    /// Scroll region height is not a multiple of the text row height.
    MisalignedScrollRegion,
    /// The sprite handed in does not match the scroll region dimensions.
    SpriteSizeMismatch,
}

#[derive(Debug, Clone)]
pub enum Error {
    /// Error from the underlying sprite/display library.
    Display(DisplayError),
    /// Geometry precondition violated at initialization.
    Layout(LayoutError),
}

impl From<DisplayError> for Error {
    fn from(e: DisplayError) -> Self {
        Error::Display(e)
    }
}

impl From<LayoutError> for Error {
    fn from(e: LayoutError) -> Self {
        Error::Layout(e)
    }
}

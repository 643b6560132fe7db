//! Layout dimension constants for TUI rendering.
//!
//! Card geometry is defined in pixel units and mapped onto terminal cells.

/// Pixel units covered by one terminal column.
pub const PX_PER_COLUMN: f64 = 10.0;

/// Pixel units covered by one terminal row (cells are about twice as tall
/// as they are wide).
pub const PX_PER_ROW: f64 = 20.0;

/// Card width in columns, border included.
pub const CARD_WIDTH: u16 = 30;

/// Card height in rows, border included.
pub const CARD_HEIGHT: u16 = 15;

/// Rows of the cover placeholder inside a card.
pub const COVER_HEIGHT: u16 = 7;

/// Rows of the volume track.
pub const VOLUME_TRACK_HEIGHT: u16 = 10;

/// Columns between the card stack and the volume bar.
pub const VOLUME_GAP: u16 = 4;

/// Height of the header in lines.
pub const HEADER_HEIGHT: u16 = 2;

/// Height of the footer in lines (compliment, spacer, credit).
pub const FOOTER_HEIGHT: u16 = 6;

/// Height of the key hint line.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Redraw period while idle; drives springs, marquees and timers.
pub const FRAME_INTERVAL_MS: u64 = 33;

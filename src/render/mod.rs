//! Presentation of finished schedules.
//!
//! - [`text`]: plain-text listing per slot, for consoles and logs
//! - [`svg`]: calendar grid image (rows = slots, columns = lists)

pub mod svg;
pub mod text;

pub use self::svg::{render_svg, save_svg};
pub use self::text::render_text;

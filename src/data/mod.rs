//! Data types and definitions.

mod color;
mod line_style;
mod path;
mod rect;
mod shape;

pub use self::color::*;
pub use self::line_style::*;
pub use self::path::*;
pub use self::rect::*;
pub use self::shape::*;

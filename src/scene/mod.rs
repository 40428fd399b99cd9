//! The canvas scene: ordered shapes, selection and change notification.

mod canvas;
mod draw;
mod edit;

pub use self::canvas::*;
pub use self::draw::*;
pub use self::edit::*;

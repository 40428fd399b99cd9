//! Shape canvas model: shapes, z-order, selection and hit testing.

#[macro_use]
extern crate failure_derive;
#[macro_use]
extern crate log;

pub mod data;
pub mod input;
pub mod scene;
mod util;

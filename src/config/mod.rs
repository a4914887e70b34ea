mod structs;
mod validators;

pub use structs::*;

#![crate_name = "stegatext_core"]

pub mod alphabet;
pub mod codecs;
pub mod error;
mod logger;
mod macros;
pub mod pixel_buffer;
pub mod utilities;

#![allow(missing_docs)]

mod flac;
mod mpeg;
mod ogg;
pub(crate) mod util;
mod wav;
mod wma;
mod zero_sized;

//! MP3 reading
//!
//! Tags come from ID3v2 (at the start of the file) and ID3v1 (the last 128 bytes). The duration
//! is estimated by scanning frame headers, or taken from a Xing/Info/VBRI header when the first
//! frame has one.

mod constants;
pub(crate) mod header;
mod properties;
mod read;

pub(crate) use read::read_from;

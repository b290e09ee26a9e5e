//! WAV reading
//!
//! Audio properties come from the `fmt ` and `data` chunks. Tags come from an embedded ID3v2
//! chunk (`id3 ` or `ID3 `) and a `LIST` `INFO` chunk, with ID3v2 taking priority.

mod info;
mod properties;
pub(crate) mod read;

pub(crate) use read::read_from;

//! FLAC reading
//!
//! Tags come from the `VORBIS_COMMENT` block, falling back to an ID3v2 tag placed before the
//! stream marker. Pictures come from `PICTURE` blocks.

mod block;
mod properties;
pub(crate) mod read;

pub(crate) use read::read_from;

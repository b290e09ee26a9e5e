//! ID3v2 reading
//!
//! Only the frames that map onto a [`TagRecord`](crate::tag::TagRecord) are interpreted, every
//! other frame is skipped.

mod frame;
pub(crate) mod header;
mod items;
mod read;
mod util;

pub(crate) use read::{parse_id3v2, read_id3v2_bytes};

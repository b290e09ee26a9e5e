//! Ogg reading (Vorbis and Opus)
//!
//! Only the first two packets of the stream are read for tags and stream information. The
//! duration comes from the largest granule position found near the end of the file.

pub(crate) mod constants;
mod opus;
pub(crate) mod read;
mod vorbis;

pub(crate) use read::{read_comments, read_from};

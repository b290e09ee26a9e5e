//! WMA/ASF reading
//!
//! An ASF file starts with a header object holding every other object this crate cares about.
//! Objects are identified by GUIDs, stored in their little endian (Windows) form.

mod constants;
mod content;
mod object;
mod properties;
pub(crate) mod read;

pub(crate) use constants::ASF_HEADER_GUID;
pub(crate) use read::read_from;

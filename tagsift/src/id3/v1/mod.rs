//! ID3v1 reading
//!
//! ID3v1 is a fixed 128 byte trailer. It is only used to fill in fields that an ID3v2 tag
//! left unset.

pub(crate) mod constants;
pub(crate) mod read;

pub use constants::GENRES;

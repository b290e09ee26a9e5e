//! RIFF based formats

pub(crate) mod chunk;
pub(crate) mod wav;

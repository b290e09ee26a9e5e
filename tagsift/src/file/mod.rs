//! File type detection

mod file_type;

pub use file_type::{EXTENSIONS, FileType};
pub(crate) use file_type::FileTypeGuessResult;

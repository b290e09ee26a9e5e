//! Read-only audio metadata extraction.
//!
//! tagsift reads the descriptive tags (title, artist, album, track, year, genre) and the audio
//! properties (duration, bitrate, sample rate) of a file without decoding any audio, and can
//! optionally load an embedded cover image.
//!
//! # Supported Formats
//!
//! | File Format | Extensions          | Tags                       | Properties                       |
//! |-------------|---------------------|----------------------------|----------------------------------|
//! | MP3         | `mp3`               | ID3v2.2/2.3/2.4, ID3v1     | Frame scan, Xing/Info/VBRI       |
//! | Ogg         | `ogg`, `oga`, `opus`| Vorbis comments            | Vorbis/Opus header, last granule |
//! | WAV         | `wav`               | `ID3 ` chunk, RIFF INFO    | `fmt ` and `data` chunks         |
//! | FLAC        | `flac`              | Vorbis comments, ID3v2     | STREAMINFO                       |
//! | WMA         | `wma`               | ASF content descriptions   | ASF file/stream properties       |
//!
//! Every format produces the same [`TagRecord`](tag::TagRecord). Fields that weren't found are
//! left unset, and a file without any tags is not an error.
//!
//! # Examples
//!
//! ## Reading a path
//!
//! ```rust,no_run
//! # fn main() -> tagsift::error::Result<()> {
//! use tagsift::config::ParseOptions;
//! use tagsift::read_from_path;
//!
//! // The parser is picked by the extension
//! let record = read_from_path("test.mp3", ParseOptions::new())?;
//!
//! if let Some(title) = record.title() {
//! 	println!("Title: {title}");
//! }
//!
//! if let Some(duration) = record.duration_seconds() {
//! 	println!("Duration: {duration:.2}s");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Reading an existing reader
//!
//! ```rust,no_run
//! # fn main() -> tagsift::error::Result<()> {
//! use std::fs::File;
//! use std::io::BufReader;
//! use tagsift::config::ParseOptions;
//! use tagsift::probe::Probe;
//!
//! let file = BufReader::new(File::open("test.wma")?);
//!
//! // Without a path, the file type has to be guessed from the content
//! let record = Probe::new(file)
//! 	.options(ParseOptions::new().read_cover_art(true))
//! 	.guess_file_type()?
//! 	.read()?;
//!
//! if let Some(image) = record.image_bytes() {
//! 	println!("Found a {} byte cover image", image.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Errors
//!
//! Only failures that make a whole file unreadable are returned, such as a missing `fLaC`
//! marker or a declared length that runs past the end of the file. Problems with a single
//! frame, comment or picture are logged through the [`log`](https://docs.rs/log) facade and
//! skipped.
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod config;
pub mod error;
pub mod file;
pub(crate) mod macros;
pub mod picture;
pub mod probe;
pub mod tag;
mod util;

mod asf;
mod flac;
pub mod id3;
mod iff;
mod mpeg;
mod ogg;

pub use crate::probe::read_from_path;

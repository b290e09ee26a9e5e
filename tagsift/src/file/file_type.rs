use crate::asf::ASF_HEADER_GUID;
use crate::util::decode_synchsafe;

use std::ffi::OsStr;
use std::path::Path;

/// Every extension with a parser
pub const EXTENSIONS: &[&str] = &[
	// Also update `FileType::from_ext()` below
	"mp3", "ogg", "oga", "opus", "wav", "flac", "wma",
];

/// The type of file read
///
/// Each variant selects one parser. There is no way to register new formats.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
pub enum FileType {
	/// MPEG audio, tagged with ID3v2 and/or ID3v1
	Mpeg,
	/// An Ogg Vorbis or Ogg Opus stream
	Vorbis,
	/// A RIFF WAVE file
	Wav,
	/// A native FLAC stream
	Flac,
	/// Windows Media Audio, in an ASF container
	Wma,
}

impl FileType {
	/// Attempts to extract a [`FileType`] from an extension
	///
	/// The match is case-insensitive.
	///
	/// # Examples
	///
	/// ```rust
	/// use tagsift::file::FileType;
	///
	/// let extension = "MP3";
	/// assert_eq!(FileType::from_ext(extension), Some(FileType::Mpeg));
	/// ```
	pub fn from_ext<E>(ext: E) -> Option<Self>
	where
		E: AsRef<OsStr>,
	{
		let ext = ext.as_ref().to_str()?.to_ascii_lowercase();

		// Also update `EXTENSIONS` above
		match ext.as_str() {
			"mp3" => Some(Self::Mpeg),
			"ogg" | "oga" | "opus" => Some(Self::Vorbis),
			"wav" => Some(Self::Wav),
			"flac" => Some(Self::Flac),
			"wma" => Some(Self::Wma),
			_ => None,
		}
	}

	/// Attempts to determine a [`FileType`] from a path
	///
	/// # Examples
	///
	/// ```rust
	/// use std::path::Path;
	/// use tagsift::file::FileType;
	///
	/// let path = Path::new("path/to/my.flac");
	/// assert_eq!(FileType::from_path(path), Some(FileType::Flac));
	/// ```
	pub fn from_path<P>(path: P) -> Option<Self>
	where
		P: AsRef<Path>,
	{
		let ext = path.as_ref().extension();
		ext.and_then(Self::from_ext)
	}

	/// Attempts to extract a [`FileType`] from a buffer
	///
	/// NOTES:
	///
	/// * This is for use in [`Probe::guess_file_type`], it
	///   is recommended to use it that way
	/// * This will **not** search past tags at the start of the buffer.
	///   For this behavior, use [`Probe::guess_file_type`].
	///
	/// [`Probe::guess_file_type`]: crate::probe::Probe::guess_file_type
	///
	/// # Examples
	///
	/// ```rust
	/// use tagsift::file::FileType;
	///
	/// assert_eq!(FileType::from_buffer(b"fLaC\x80\x00\x00\x22"), Some(FileType::Flac));
	/// ```
	pub fn from_buffer(buf: &[u8]) -> Option<Self> {
		match Self::from_buffer_inner(buf) {
			Some(FileTypeGuessResult::Determined(file_ty)) => Some(file_ty),
			// Searching past an ID3v2 tag is handled in `Probe::guess_file_type`
			_ => None,
		}
	}

	pub(crate) fn from_buffer_inner(buf: &[u8]) -> Option<FileTypeGuessResult> {
		if buf.is_empty() {
			return None;
		}

		if let Some(file_ty) = Self::quick_type_guess(buf) {
			return Some(FileTypeGuessResult::Determined(file_ty));
		}

		// The bare minimum size for an ID3v2 header is 10 bytes
		if buf.len() >= 10 && &buf[..3] == b"ID3" {
			let size = decode_synchsafe(&buf[6..10], 7)?;
			return Some(FileTypeGuessResult::MaybePrecededById3(size));
		}

		None
	}

	fn quick_type_guess(buf: &[u8]) -> Option<Self> {
		use crate::mpeg::header::verify_frame_sync;

		// Safe to index, since we return early on an empty buffer
		match buf[0] {
			0xFF if buf.len() >= 2 && verify_frame_sync([buf[0], buf[1]]) => Some(Self::Mpeg),
			b'O' if buf.len() >= 36 && &buf[..4] == b"OggS" => {
				if &buf[29..35] == b"vorbis" || &buf[28..36] == b"OpusHead" {
					return Some(Self::Vorbis);
				}

				None
			},
			b'f' if buf.starts_with(b"fLaC") => Some(Self::Flac),
			b'R' if buf.len() >= 12 && &buf[..4] == b"RIFF" => {
				if &buf[8..12] == b"WAVE" {
					return Some(Self::Wav);
				}

				None
			},
			_ if buf.starts_with(&ASF_HEADER_GUID) => Some(Self::Wma),
			_ => None,
		}
	}
}

/// The result of a buffer-only guess
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum FileTypeGuessResult {
	/// The file type was determined
	Determined(FileType),
	/// An ID3v2 tag of the given size (excluding its header) starts the buffer
	MaybePrecededById3(u32),
}

//! Contains the errors that can arise within tagsift
//!
//! The primary error is [`TagsiftError`]. The type of error is determined by [`ErrorKind`],
//! which can be extended at any time.
//!
//! Only container-level failures are surfaced this way. Problems with a single optional element
//! (a garbage frame, an out of range genre index, a corrupt picture) are logged and skipped by the
//! parsers, leaving whatever fields were already found.

use crate::file::FileType;

use std::collections::TryReserveError;
use std::fmt::{Debug, Display, Formatter};

use ogg_pager::PageError;

/// Alias for `Result<T, TagsiftError>`
pub type Result<T> = std::result::Result<T, TagsiftError>;

/// The types of errors that can occur
#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
	// File format related errors
	/// No parser matches the file's extension, and none was forced
	UnsupportedFormat,
	/// Required magic or a required GUID is missing where the format mandates it
	NotAValidContainer(FileDecodingError),

	// File data related errors
	/// A declared length exceeds the bytes remaining in the source
	UnexpectedEof,
	/// A decoded value violates a structural invariant of its format
	MalformedField(&'static str),
	/// Attempting to read an abnormally large amount of data
	TooMuchData,
	/// Errors that arise while decoding text
	TextDecode(&'static str),
	/// Errors that arise while reading ID3v2 tags
	Id3v2(Id3v2Error),

	// Conversions for external errors
	/// Errors that arise while parsing OGG pages
	OggPage(PageError),
	/// Represents all cases of [`std::io::Error`], other than an unexpected EOF
	Io(std::io::Error),
	/// Failure to allocate enough memory
	Alloc(TryReserveError),
}

/// The types of errors that can occur while reading ID3v2 tags
#[derive(Debug)]
#[non_exhaustive]
pub enum Id3v2ErrorKind {
	// Header
	/// Arises when an invalid ID3v2 version is found
	BadId3v2Version(u8, u8),
	/// Arises when a compressed ID3v2.2 tag is encountered
	///
	/// At the time the ID3v2.2 specification was written, a compression scheme wasn't decided.
	/// As such, the tag is ignored entirely.
	V2Compression,
	/// Arises when an extended header has an invalid size
	BadExtendedHeaderSize,

	// Frame
	/// Arises when a frame doesn't have enough data
	BadFrameLength,

	// Compression
	#[cfg(feature = "id3v2_compression_support")]
	/// Arises when a compressed frame is unable to be decompressed
	Decompression(std::io::Error),
	#[cfg(not(feature = "id3v2_compression_support"))]
	/// Arises when a compressed frame is encountered, but support is disabled
	CompressedFrameEncountered,
}

impl Display for Id3v2ErrorKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::BadId3v2Version(major, minor) => write!(
				f,
				"Found an invalid version (v{major}.{minor}), expected any major revision in: (2, \
				 3, 4)"
			),
			Self::V2Compression => write!(f, "Encountered a compressed ID3v2.2 tag"),
			Self::BadExtendedHeaderSize => {
				write!(f, "Found an extended header with an invalid size")
			},
			Self::BadFrameLength => write!(
				f,
				"Frame isn't long enough to extract the necessary information"
			),
			#[cfg(feature = "id3v2_compression_support")]
			Self::Decompression(err) => write!(f, "Failed to decompress frame: {err}"),
			#[cfg(not(feature = "id3v2_compression_support"))]
			Self::CompressedFrameEncountered => write!(
				f,
				"Encountered a compressed ID3v2 frame, support is disabled"
			),
		}
	}
}

/// An error that arises while reading an ID3v2 tag
pub struct Id3v2Error {
	kind: Id3v2ErrorKind,
}

impl Id3v2Error {
	/// Create a new `Id3v2Error` from an [`Id3v2ErrorKind`]
	#[must_use]
	pub const fn new(kind: Id3v2ErrorKind) -> Self {
		Self { kind }
	}

	/// Returns the [`Id3v2ErrorKind`]
	pub fn kind(&self) -> &Id3v2ErrorKind {
		&self.kind
	}
}

impl Debug for Id3v2Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "ID3v2: {:?}", self.kind)
	}
}

impl Display for Id3v2Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "ID3v2: {}", self.kind)
	}
}

/// An error that arises while decoding a container
pub struct FileDecodingError {
	format: Option<FileType>,
	description: &'static str,
}

impl FileDecodingError {
	/// Create a `FileDecodingError` from a [`FileType`] and description
	///
	/// # Examples
	///
	/// ```rust
	/// use tagsift::error::FileDecodingError;
	/// use tagsift::file::FileType;
	///
	/// let flac_error = FileDecodingError::new(FileType::Flac, "File missing \"fLaC\" stream marker");
	/// assert_eq!(flac_error.format(), Some(FileType::Flac));
	/// ```
	#[must_use]
	pub const fn new(format: FileType, description: &'static str) -> Self {
		Self {
			format: Some(format),
			description,
		}
	}

	/// Create a `FileDecodingError` without binding it to a [`FileType`]
	pub fn from_description(description: &'static str) -> Self {
		Self {
			format: None,
			description,
		}
	}

	/// Returns the associated [`FileType`], if one exists
	pub fn format(&self) -> Option<FileType> {
		self.format
	}

	/// Returns the error description
	pub fn description(&self) -> &str {
		self.description
	}
}

impl Debug for FileDecodingError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		if let Some(format) = self.format {
			write!(f, "{:?}: {:?}", format, self.description)
		} else {
			write!(f, "{:?}", self.description)
		}
	}
}

impl Display for FileDecodingError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		if let Some(format) = self.format {
			write!(f, "{:?}: {}", format, self.description)
		} else {
			write!(f, "{}", self.description)
		}
	}
}

/// Errors that could occur within tagsift
pub struct TagsiftError {
	pub(crate) kind: ErrorKind,
}

impl TagsiftError {
	/// Create a `TagsiftError` from an [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use tagsift::error::{ErrorKind, TagsiftError};
	///
	/// let unsupported = TagsiftError::new(ErrorKind::UnsupportedFormat);
	/// ```
	#[must_use]
	pub const fn new(kind: ErrorKind) -> Self {
		Self { kind }
	}

	/// Returns the [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use tagsift::error::{ErrorKind, TagsiftError};
	///
	/// let unsupported = TagsiftError::new(ErrorKind::UnsupportedFormat);
	/// if let ErrorKind::UnsupportedFormat = unsupported.kind() {
	/// 	println!("What's the format?");
	/// }
	/// ```
	pub fn kind(&self) -> &ErrorKind {
		&self.kind
	}
}

impl std::error::Error for TagsiftError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self.kind {
			ErrorKind::OggPage(ref err) => Some(err),
			ErrorKind::Io(ref err) => Some(err),
			ErrorKind::Alloc(ref err) => Some(err),
			_ => None,
		}
	}
}

impl Debug for TagsiftError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}", self.kind)
	}
}

impl From<Id3v2Error> for TagsiftError {
	fn from(input: Id3v2Error) -> Self {
		Self {
			kind: ErrorKind::Id3v2(input),
		}
	}
}

impl From<FileDecodingError> for TagsiftError {
	fn from(input: FileDecodingError) -> Self {
		Self {
			kind: ErrorKind::NotAValidContainer(input),
		}
	}
}

impl From<PageError> for TagsiftError {
	fn from(input: PageError) -> Self {
		match input {
			PageError::Io(err) => Self::from(err),
			PageError::TooMuchData => Self::new(ErrorKind::TooMuchData),
			_ => Self {
				kind: ErrorKind::OggPage(input),
			},
		}
	}
}

impl From<std::io::Error> for TagsiftError {
	fn from(input: std::io::Error) -> Self {
		if input.kind() == std::io::ErrorKind::UnexpectedEof {
			return Self::new(ErrorKind::UnexpectedEof);
		}

		Self {
			kind: ErrorKind::Io(input),
		}
	}
}

impl From<TryReserveError> for TagsiftError {
	fn from(input: TryReserveError) -> Self {
		Self {
			kind: ErrorKind::Alloc(input),
		}
	}
}

impl Display for TagsiftError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self.kind {
			// Conversions
			ErrorKind::OggPage(ref err) => write!(f, "{err}"),
			ErrorKind::Io(ref err) => write!(f, "{err}"),
			ErrorKind::Alloc(ref err) => write!(f, "{err}"),

			ErrorKind::UnsupportedFormat => {
				write!(f, "No parser matches the provided file")
			},
			ErrorKind::NotAValidContainer(ref file_decode_err) => write!(f, "{file_decode_err}"),
			ErrorKind::UnexpectedEof => write!(
				f,
				"A declared length extends past the end of the source"
			),
			ErrorKind::MalformedField(message) => write!(f, "Malformed field: {message}"),
			ErrorKind::TooMuchData => write!(
				f,
				"Attempted to read an abnormally large amount of data"
			),
			ErrorKind::TextDecode(message) => write!(f, "Text decoding: {message}"),
			ErrorKind::Id3v2(ref id3v2_err) => write!(f, "{id3v2_err}"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::{ErrorKind, TagsiftError};

	use std::io::{Cursor, Read};

	#[test_log::test]
	fn short_read_is_unexpected_eof() {
		let mut buf = [0; 8];
		let err: TagsiftError = Cursor::new([1, 2, 3])
			.read_exact(&mut buf)
			.unwrap_err()
			.into();

		assert!(matches!(err.kind(), ErrorKind::UnexpectedEof));
	}

	#[test_log::test]
	fn page_errors() {
		let err = TagsiftError::from(ogg_pager::PageError::TooMuchData);
		assert!(matches!(err.kind(), ErrorKind::TooMuchData));

		let err = TagsiftError::from(ogg_pager::PageError::MissingMagic);
		assert!(matches!(err.kind(), ErrorKind::OggPage(_)));
	}
}

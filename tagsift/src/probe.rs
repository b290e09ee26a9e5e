//! Format-agnostic file parsing tools

use crate::config::ParseOptions;
use crate::error::{ErrorKind, Result, TagsiftError};
use crate::file::{FileType, FileTypeGuessResult};
use crate::macros::err;
use crate::tag::TagRecord;
use crate::util::cursor::ByteCursor;

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek, SeekFrom};
use std::path::Path;

/// Determine the [`FileType`] of a file from its name
///
/// # Errors
///
/// The extension doesn't match any parser ([`ErrorKind::UnsupportedFormat`])
///
/// # Examples
///
/// ```rust
/// use tagsift::file::FileType;
/// use tagsift::probe::detect;
///
/// assert_eq!(detect("song.OGA")?, FileType::Vorbis);
/// assert!(detect("song.txt").is_err());
/// # Ok::<(), tagsift::error::TagsiftError>(())
/// ```
pub fn detect<P>(filename: P) -> Result<FileType>
where
	P: AsRef<Path>,
{
	FileType::from_path(filename).ok_or_else(|| TagsiftError::new(ErrorKind::UnsupportedFormat))
}

/// Read a [`TagRecord`] from `source` with the parser for `file_type`
///
/// Reading starts at the current position of `source`. An empty source produces an empty
/// record, regardless of `file_type`.
///
/// # Errors
///
/// The parser for `file_type` failed to read the container
///
/// # Examples
///
/// ```rust
/// use std::io::Cursor;
/// use tagsift::config::ParseOptions;
/// use tagsift::file::FileType;
/// use tagsift::probe::extract;
///
/// let record = extract(Cursor::new(Vec::new()), FileType::Flac, ParseOptions::new())?;
/// assert!(record.is_empty());
/// # Ok::<(), tagsift::error::TagsiftError>(())
/// ```
pub fn extract<R>(source: R, file_type: FileType, options: ParseOptions) -> Result<TagRecord>
where
	R: Read + Seek,
{
	let mut reader = ByteCursor::new(source)?;

	if reader.remaining() == 0 {
		log::debug!("Probe: Source is empty, nothing to read");
		return Ok(TagRecord::with_file_size(reader.len()));
	}

	if !options.read_tags && !options.read_properties {
		log::warn!("Skipping both tag and property reading, record will be empty");
	}

	log::debug!("Probe: Reading source as {file_type:?}");

	match file_type {
		FileType::Mpeg => crate::mpeg::read_from(&mut reader, options),
		FileType::Vorbis => crate::ogg::read_from(&mut reader, options),
		FileType::Wav => crate::iff::wav::read_from(&mut reader, options),
		FileType::Flac => crate::flac::read_from(&mut reader, options),
		FileType::Wma => crate::asf::read_from(&mut reader, options),
	}
}

/// A format agnostic reader
///
/// This provides a way to determine the [`FileType`] of a reader, for when a concrete
/// type is not known.
///
/// # Usage
///
/// When reading from a path, the [`FileType`] will be inferred from the path, rather than the
/// content.
///
/// When reading from a reader, the [`FileType`] must be set with [`Probe::with_file_type`] or
/// [`Probe::set_file_type`], or guessed from the content with [`Probe::guess_file_type`].
///
/// # Examples
///
/// Guessing the file type from content
///
/// ```rust
/// use std::io::Cursor;
/// use tagsift::file::FileType;
/// use tagsift::probe::Probe;
///
/// let mut data = b"fLaC".to_vec();
/// data.extend([0x80, 0x00, 0x00, 0x22]);
/// data.extend([0; 34]);
///
/// let probe = Probe::new(Cursor::new(data)).guess_file_type()?;
/// assert_eq!(probe.file_type(), Some(FileType::Flac));
/// # Ok::<(), tagsift::error::TagsiftError>(())
/// ```
pub struct Probe<R: Read> {
	inner: R,
	options: Option<ParseOptions>,
	f_ty: Option<FileType>,
}

impl<R: Read> Probe<R> {
	/// Create a new `Probe`
	///
	/// Before creating a `Probe`, consider wrapping it in a [`BufReader`] for better
	/// performance.
	#[must_use]
	pub const fn new(reader: R) -> Self {
		Self {
			inner: reader,
			options: None,
			f_ty: None,
		}
	}

	/// Create a new `Probe` with a specified [`FileType`]
	pub fn with_file_type(reader: R, file_type: FileType) -> Self {
		Self {
			inner: reader,
			options: None,
			f_ty: Some(file_type),
		}
	}

	/// Returns the current [`FileType`]
	pub fn file_type(&self) -> Option<FileType> {
		self.f_ty
	}

	/// Set the [`FileType`] with which to read the file
	pub fn set_file_type(mut self, file_type: FileType) -> Self {
		self.f_ty = Some(file_type);
		self
	}

	/// Set the [`ParseOptions`] for the Probe
	///
	/// # Examples
	///
	/// ```rust
	/// use std::io::Cursor;
	/// use tagsift::config::ParseOptions;
	/// use tagsift::file::FileType;
	/// use tagsift::probe::Probe;
	///
	/// // Only the duration is wanted here
	/// let parsing_options = ParseOptions::new().read_tags(false);
	///
	/// let probe = Probe::with_file_type(Cursor::new(Vec::new()), FileType::Mpeg)
	/// 	.options(parsing_options);
	/// ```
	#[must_use]
	pub fn options(mut self, options: ParseOptions) -> Self {
		self.options = Some(options);
		self
	}

	/// Extract the reader
	pub fn into_inner(self) -> R {
		self.inner
	}
}

impl Probe<BufReader<File>> {
	/// Opens a file for reading
	///
	/// This will initially guess the [`FileType`] from the path, but
	/// this can be overwritten with [`Probe::guess_file_type`] or [`Probe::set_file_type`]
	///
	/// # Errors
	///
	/// * `path` does not exist
	///
	/// # Examples
	///
	/// ```rust,no_run
	/// use tagsift::file::FileType;
	/// use tagsift::probe::Probe;
	///
	/// let probe = Probe::open("path/to/my.mp3")?;
	///
	/// // Inferred from the `mp3` extension
	/// assert_eq!(probe.file_type(), Some(FileType::Mpeg));
	/// # Ok::<(), tagsift::error::TagsiftError>(())
	/// ```
	pub fn open<P>(path: P) -> Result<Self>
	where
		P: AsRef<Path>,
	{
		let path = path.as_ref();
		log::debug!("Probe: Opening `{}` for reading", path.display());

		let file_type = FileType::from_path(path);
		log::debug!("Probe: Guessed file type `{:?}` from extension", file_type);

		Ok(Self {
			inner: BufReader::new(File::open(path)?),
			options: None,
			f_ty: file_type,
		})
	}
}

impl<R: Read + Seek> Probe<R> {
	/// Attempts to get the [`FileType`] based on the data in the reader
	///
	/// On success, the file type will be replaced. A failed guess keeps any file type that was
	/// already set.
	///
	/// NOTE: The chance for false positives is high, as only a handful of bytes are inspected.
	///
	/// # Errors
	///
	/// All errors that occur within this function are [`std::io::Error`].
	pub fn guess_file_type(mut self) -> Result<Self> {
		let f_ty = self.guess_inner()?;
		self.f_ty = f_ty.or(self.f_ty);

		log::debug!("Probe: Guessed file type: {:?}", self.f_ty);

		Ok(self)
	}

	fn guess_inner(&mut self) -> std::io::Result<Option<FileType>> {
		// 36 bytes covers the Ogg identification header magic
		let mut buf = [0; 36];

		let starting_position = self.inner.stream_position()?;
		let buf_len = std::io::copy(
			&mut self.inner.by_ref().take(buf.len() as u64),
			&mut Cursor::new(&mut buf[..]),
		)? as usize;

		self.inner.seek(SeekFrom::Start(starting_position))?;

		let Some(file_type_guess) = FileType::from_buffer_inner(&buf[..buf_len]) else {
			return Ok(None);
		};

		match file_type_guess {
			FileTypeGuessResult::Determined(file_ty) => Ok(Some(file_ty)),
			// The file starts with an ID3v2 tag, followed by either a FLAC stream or MPEG frames
			FileTypeGuessResult::MaybePrecededById3(id3_len) => {
				// `id3_len` is the size of the tag, not including the header (10 bytes)
				log::debug!("Probe: ID3v2 tag detected, skipping {} bytes", 10 + id3_len);
				self.inner
					.seek(SeekFrom::Current(i64::from(10 + id3_len)))?;

				let mut ident = [0; 4];
				std::io::copy(
					&mut self.inner.by_ref().take(ident.len() as u64),
					&mut Cursor::new(&mut ident[..]),
				)?;

				self.inner.seek(SeekFrom::Start(starting_position))?;

				// MPEG frames may be preceded by junk, so anything else is assumed to be MPEG
				match &ident {
					b"fLaC" => Ok(Some(FileType::Flac)),
					_ => Ok(Some(FileType::Mpeg)),
				}
			},
		}
	}

	/// Attempts to extract a [`TagRecord`] from the reader
	///
	/// If `read_cover_art` is not enabled in the [`ParseOptions`], no picture is loaded.
	///
	/// # Errors
	///
	/// * No file type
	///     - This occurs when the file type could not be determined from the path, and was
	///       neither set nor guessed
	/// * The file fails to parse, see [`extract`]
	pub fn read(self) -> Result<TagRecord> {
		let options = self.options.unwrap_or_default();

		match self.f_ty {
			Some(file_type) => extract(self.inner, file_type, options),
			None => err!(UnsupportedFormat),
		}
	}
}

/// Read a [`TagRecord`] from a path
///
/// The file type is determined by the path's extension. The file is closed before returning,
/// whether reading succeeded or not.
///
/// An empty file produces an empty record, whatever its extension.
///
/// # Errors
///
/// See:
///
/// * [`Probe::open`]
/// * [`Probe::read`]
///
/// # Examples
///
/// ```rust,no_run
/// use tagsift::config::ParseOptions;
/// use tagsift::read_from_path;
///
/// let record = read_from_path("path/to/my.flac", ParseOptions::new())?;
/// println!("{:?}", record.title());
/// # Ok::<(), tagsift::error::TagsiftError>(())
/// ```
pub fn read_from_path<P>(path: P, options: ParseOptions) -> Result<TagRecord>
where
	P: AsRef<Path>,
{
	let path = path.as_ref();

	if std::fs::metadata(path)?.len() == 0 {
		log::debug!("Empty file, nothing to read");
		return Ok(TagRecord::with_file_size(0));
	}

	// Checked before opening, so unsupported files are never touched
	detect(path)?;

	Probe::open(path)?.options(options).read()
}

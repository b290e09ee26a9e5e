//! Format-agnostic picture handling

use crate::error::{ErrorKind, Result, TagsiftError};
use crate::macros::{err, try_vec};
use crate::util::text::utf8_decode;

use std::fmt::{Debug, Display, Formatter};

use byteorder::{BigEndian, ReadBytesExt as _};
use data_encoding::BASE64;

/// MIME types for pictures.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum MimeType {
	/// PNG image
	Png,
	/// JPEG image
	Jpeg,
	/// TIFF image
	Tiff,
	/// BMP image
	Bmp,
	/// GIF image
	Gif,
	/// Some unknown MIME type
	Unknown(String),
}

impl MimeType {
	/// Get a `MimeType` from a string
	///
	/// # Examples
	///
	/// ```rust
	/// use tagsift::picture::MimeType;
	///
	/// let jpeg_mimetype_str = "image/jpeg";
	/// assert_eq!(MimeType::from_str(jpeg_mimetype_str), MimeType::Jpeg);
	/// ```
	#[must_use]
	#[allow(clippy::should_implement_trait)] // Infallible in contrast to FromStr
	pub fn from_str(mime_type: &str) -> Self {
		match &*mime_type.to_lowercase() {
			"image/jpeg" | "image/jpg" => Self::Jpeg,
			"image/png" => Self::Png,
			"image/tiff" => Self::Tiff,
			"image/bmp" => Self::Bmp,
			"image/gif" => Self::Gif,
			_ => Self::Unknown(mime_type.to_owned()),
		}
	}

	/// Get a `MimeType` from the three character image format used by ID3v2.2 `PIC` frames
	pub(crate) fn from_id3v22_format(format: [u8; 3]) -> Self {
		let mut upper = format;
		upper.make_ascii_uppercase();

		match &upper {
			b"PNG" => Self::Png,
			b"JPG" => Self::Jpeg,
			b"TIF" => Self::Tiff,
			b"BMP" => Self::Bmp,
			b"GIF" => Self::Gif,
			_ => Self::Unknown(format.iter().map(|b| char::from(*b)).collect()),
		}
	}

	/// Guess a `MimeType` from the signature at the start of `bytes`
	pub(crate) fn sniff(bytes: &[u8]) -> Option<Self> {
		match bytes {
			[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => Some(Self::Png),
			[0xFF, 0xD8, ..] => Some(Self::Jpeg),
			[b'G', b'I', b'F', 0x38, 0x37 | 0x39, b'a', ..] => Some(Self::Gif),
			[b'B', b'M', ..] => Some(Self::Bmp),
			[b'I', b'I', b'*', 0x00, ..] | [b'M', b'M', 0x00, b'*', ..] => Some(Self::Tiff),
			_ => None,
		}
	}

	/// Get a &str from a `MimeType`
	///
	/// # Examples
	///
	/// ```rust
	/// use tagsift::picture::MimeType;
	///
	/// let jpeg_mimetype = MimeType::Jpeg;
	/// assert_eq!(jpeg_mimetype.as_str(), "image/jpeg")
	/// ```
	#[must_use]
	pub fn as_str(&self) -> &str {
		match self {
			MimeType::Jpeg => "image/jpeg",
			MimeType::Png => "image/png",
			MimeType::Tiff => "image/tiff",
			MimeType::Bmp => "image/bmp",
			MimeType::Gif => "image/gif",
			MimeType::Unknown(unknown) => unknown,
		}
	}

	/// Returns the extension for the `MimeType` if it is known
	pub fn ext(&self) -> Option<&str> {
		match self {
			MimeType::Jpeg => Some("jpg"),
			MimeType::Png => Some("png"),
			MimeType::Tiff => Some("tif"),
			MimeType::Bmp => Some("bmp"),
			MimeType::Gif => Some("gif"),
			MimeType::Unknown(_) => None,
		}
	}
}

impl Display for MimeType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// The picture type, according to ID3v2 APIC
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum PictureType {
	Other,
	Icon,
	OtherIcon,
	CoverFront,
	CoverBack,
	Leaflet,
	Media,
	LeadArtist,
	Artist,
	Conductor,
	Band,
	Composer,
	Lyricist,
	RecordingLocation,
	DuringRecording,
	DuringPerformance,
	ScreenCapture,
	BrightFish,
	Illustration,
	BandLogo,
	PublisherLogo,
	Undefined(u8),
}

impl PictureType {
	/// Get a `u8` from a `PictureType` according to ID3v2 APIC
	pub fn as_u8(&self) -> u8 {
		match self {
			Self::Other => 0,
			Self::Icon => 1,
			Self::OtherIcon => 2,
			Self::CoverFront => 3,
			Self::CoverBack => 4,
			Self::Leaflet => 5,
			Self::Media => 6,
			Self::LeadArtist => 7,
			Self::Artist => 8,
			Self::Conductor => 9,
			Self::Band => 10,
			Self::Composer => 11,
			Self::Lyricist => 12,
			Self::RecordingLocation => 13,
			Self::DuringRecording => 14,
			Self::DuringPerformance => 15,
			Self::ScreenCapture => 16,
			Self::BrightFish => 17,
			Self::Illustration => 18,
			Self::BandLogo => 19,
			Self::PublisherLogo => 20,
			Self::Undefined(i) => *i,
		}
	}

	/// Get a `PictureType` from a u8 according to ID3v2 APIC
	pub fn from_u8(byte: u8) -> Self {
		match byte {
			0 => Self::Other,
			1 => Self::Icon,
			2 => Self::OtherIcon,
			3 => Self::CoverFront,
			4 => Self::CoverBack,
			5 => Self::Leaflet,
			6 => Self::Media,
			7 => Self::LeadArtist,
			8 => Self::Artist,
			9 => Self::Conductor,
			10 => Self::Band,
			11 => Self::Composer,
			12 => Self::Lyricist,
			13 => Self::RecordingLocation,
			14 => Self::DuringRecording,
			15 => Self::DuringPerformance,
			16 => Self::ScreenCapture,
			17 => Self::BrightFish,
			18 => Self::Illustration,
			19 => Self::BandLogo,
			20 => Self::PublisherLogo,
			i => Self::Undefined(i),
		}
	}
}

/// An embedded picture
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Picture {
	pub(crate) pic_type: PictureType,
	pub(crate) mime_type: Option<MimeType>,
	pub(crate) description: Option<String>,
	pub(crate) data: Vec<u8>,
}

impl Debug for Picture {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Picture")
			.field("pic_type", &self.pic_type)
			.field("mime_type", &self.mime_type)
			.field("description", &self.description)
			.field("data", &format!("<{} bytes>", self.data.len()))
			.finish()
	}
}

impl Picture {
	pub(crate) fn new(
		pic_type: PictureType,
		mime_type: Option<MimeType>,
		description: Option<String>,
		data: Vec<u8>,
	) -> Self {
		// Fall back to the image signature when the container doesn't say
		let mime_type = mime_type.or_else(|| MimeType::sniff(&data));

		Self {
			pic_type,
			mime_type,
			description,
			data,
		}
	}

	/// Returns the [`PictureType`]
	pub fn pic_type(&self) -> PictureType {
		self.pic_type
	}

	/// Returns the [`MimeType`], if one was stored or could be guessed
	pub fn mime_type(&self) -> Option<&MimeType> {
		self.mime_type.as_ref()
	}

	/// Returns the description
	pub fn description(&self) -> Option<&str> {
		self.description.as_deref()
	}

	/// Returns the [`Picture`] data as borrowed bytes.
	pub fn data(&self) -> &[u8] {
		&self.data
	}

	/// Consumes a [`Picture`], returning the data
	pub fn into_data(self) -> Vec<u8> {
		self.data
	}

	/// Get a [`Picture`] from FLAC `METADATA_BLOCK_PICTURE` bytes
	///
	/// NOTE: This takes both the base64 encoded string from Vorbis comments, and
	/// the raw data from a FLAC block, specified with `encoded`.
	///
	/// # Errors
	///
	/// The data is truncated, or a declared length runs past the end of the block
	pub fn from_flac_bytes(bytes: &[u8], encoded: bool) -> Result<Self> {
		if encoded {
			let data = BASE64
				.decode(bytes)
				.map_err(|_| TagsiftError::new(ErrorKind::MalformedField("Picture: invalid base64")))?;
			Self::from_flac_bytes_inner(&data)
		} else {
			Self::from_flac_bytes_inner(bytes)
		}
	}

	fn from_flac_bytes_inner(content: &[u8]) -> Result<Self> {
		if content.len() < 32 {
			err!(MalformedField("Picture: block is too short"));
		}

		let mut reader = content;

		let pic_ty = reader.read_u32::<BigEndian>()?;
		let mime_type_str = utf8_decode(take_sized(&mut reader)?)?;
		let description = utf8_decode(take_sized(&mut reader)?).ok();

		// Width, height, color depth, and number of colors
		if reader.len() < 16 {
			err!(UnexpectedEof);
		}
		reader = &reader[16..];

		let data = take_sized(&mut reader)?;
		let mut owned = try_vec![0; data.len()];
		owned.copy_from_slice(data);

		let mime_type = if mime_type_str.is_empty() {
			None
		} else {
			Some(MimeType::from_str(&mime_type_str))
		};

		Ok(Self::new(
			PictureType::from_u8(pic_ty as u8),
			mime_type,
			description.filter(|d| !d.is_empty()),
			owned,
		))
	}
}

// A u32 big-endian length, followed by that many bytes
fn take_sized<'a>(reader: &mut &'a [u8]) -> Result<&'a [u8]> {
	let len = reader.read_u32::<BigEndian>()? as usize;

	let data: &'a [u8] = *reader;
	if len > data.len() {
		err!(UnexpectedEof);
	}

	let (value, rest) = data.split_at(len);
	*reader = rest;
	Ok(value)
}

#[cfg(test)]
pub(crate) fn flac_picture_block(pic_type: u8, mime: &str, description: &str, data: &[u8]) -> Vec<u8> {
	let mut block = Vec::new();
	block.extend(u32::from(pic_type).to_be_bytes());
	block.extend((mime.len() as u32).to_be_bytes());
	block.extend(mime.as_bytes());
	block.extend((description.len() as u32).to_be_bytes());
	block.extend(description.as_bytes());
	block.extend([0; 16]);
	block.extend((data.len() as u32).to_be_bytes());
	block.extend(data);
	block
}

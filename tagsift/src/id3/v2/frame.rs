use super::header::Id3v2Version;
use super::util::remove_unsynchronisation;
use crate::config::ParseOptions;
use crate::error::Result;
use crate::macros::id3v2_err;
use crate::util::cursor::ByteCursor;

use std::borrow::Cow;
use std::io::{Cursor, Seek, SeekFrom};

/// The frame IDs that hold pictures, in every version
pub(super) const PICTURE_IDS: [&str; 2] = ["APIC", "PIC"];

/// Flags that apply to a single frame
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct FrameFlags {
	/// Frame is a part of a group, a group identifier byte precedes the content
	pub(crate) grouping_identity: bool,
	/// Frame is zlib compressed
	pub(crate) compression: bool,
	/// Frame is encrypted, the content is unreadable
	pub(crate) encryption: bool,
	/// Frame content is unsynchronised (ID3v2.4 only)
	pub(crate) unsynchronisation: bool,
	/// A 4 byte synchsafe data length precedes the content (ID3v2.4 only)
	pub(crate) data_length_indicator: bool,
}

impl FrameFlags {
	pub(crate) fn parse_id3v24(flags: u16) -> Self {
		FrameFlags {
			grouping_identity: flags & 0x0040 == 0x0040,
			compression: flags & 0x0008 == 0x0008,
			encryption: flags & 0x0004 == 0x0004,
			unsynchronisation: flags & 0x0002 == 0x0002,
			data_length_indicator: flags & 0x0001 == 0x0001,
		}
	}

	pub(crate) fn parse_id3v23(flags: u16) -> Self {
		FrameFlags {
			grouping_identity: flags & 0x0020 == 0x0020,
			compression: flags & 0x0080 == 0x0080,
			encryption: flags & 0x0040 == 0x0040,
			unsynchronisation: false,
			data_length_indicator: false,
		}
	}
}

/// A frame with all of its flags applied
pub(crate) struct Frame<'a> {
	pub(crate) id: &'a str,
	pub(crate) content: Cow<'a, [u8]>,
}

pub(crate) enum ParsedFrame<'a> {
	Next(Frame<'a>),
	Skip,
	Eof,
}

impl<'a> ParsedFrame<'a> {
	/// Read the next frame from the tag body
	///
	/// Padding, a zero sized frame, an invalid frame ID, or a frame larger than the rest of the tag
	/// all end the frame list. Any error returned happens after the frame was consumed from
	/// `reader`, so the caller can always move on to the next frame.
	pub(crate) fn read(
		reader: &mut &'a [u8],
		version: Id3v2Version,
		unsynchronised: bool,
		parse_options: ParseOptions,
	) -> Result<Self> {
		let (header_len, id_len) = match version {
			Id3v2Version::V2 => (6, 3),
			Id3v2Version::V3 | Id3v2Version::V4 => (10, 4),
		};

		let data: &'a [u8] = *reader;
		if data.len() < header_len {
			return Ok(Self::Eof);
		}

		let (header, rest) = data.split_at(header_len);

		let id_bytes = &header[..id_len];
		if !id_bytes
			.iter()
			.all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
		{
			// Assume we just started reading padding
			log::debug!("Found padding or an invalid frame ID, ending the frame list");
			return Ok(Self::Eof);
		}

		let Ok(id) = std::str::from_utf8(id_bytes) else {
			return Ok(Self::Eof);
		};

		let mut fields = ByteCursor::new(Cursor::new(&header[id_len..]))?;
		let (size, mut flags) = match version {
			Id3v2Version::V2 => (fields.synchsafe_u32(3, 8)?, FrameFlags::default()),
			Id3v2Version::V3 => (
				fields.synchsafe_u32(4, 8)?,
				FrameFlags::parse_id3v23(fields.be_u16()?),
			),
			Id3v2Version::V4 => {
				let size = match fields.synchsafe_u32(4, 7) {
					Ok(size) => size,
					// Some encoders write plain integers in ID3v2.4 frame headers
					Err(_) => {
						log::debug!("Frame \"{id}\" has a non-synchsafe size, reading it as a plain integer");
						fields.seek(SeekFrom::Start(0))?;
						fields.be_u32()?
					},
				};

				(size, FrameFlags::parse_id3v24(fields.be_u16()?))
			},
		};

		if size == 0 {
			log::debug!("Encountered a zero length frame, ending the frame list");
			return Ok(Self::Eof);
		}

		let size = size as usize;
		if size > rest.len() {
			log::warn!(
				"Frame \"{id}\" claims {size} bytes, but only {} remain in the tag, ending the frame \
				 list",
				rest.len()
			);
			return Ok(Self::Eof);
		}

		let (mut content, remaining) = rest.split_at(size);
		*reader = remaining;

		log::trace!("Reading frame \"{id}\", size: {size}");

		if !parse_options.read_cover_art && PICTURE_IDS.contains(&id) {
			return Ok(Self::Skip);
		}

		if flags.encryption {
			log::debug!("Skipping encrypted frame \"{id}\"");
			return Ok(Self::Skip);
		}

		if version == Id3v2Version::V4 && unsynchronised {
			flags.unsynchronisation = true;
		}

		// The extra header data comes in the same order as the flags
		match version {
			Id3v2Version::V2 => {},
			Id3v2Version::V3 => {
				if flags.compression {
					// Decompressed size, we read until the end of the stream instead
					take(&mut content, 4)?;
				}

				if flags.grouping_identity {
					take(&mut content, 1)?;
				}
			},
			Id3v2Version::V4 => {
				if flags.grouping_identity {
					take(&mut content, 1)?;
				}

				if flags.data_length_indicator {
					take(&mut content, 4)?;
				}
			},
		}

		let mut content = Cow::Borrowed(content);

		if flags.unsynchronisation {
			content = Cow::Owned(remove_unsynchronisation(&content)?);
		}

		if flags.compression {
			content = Cow::Owned(decompress(&content)?);
		}

		// Frames must have at least 1 byte, *after* all of the additional data flags can provide
		if content.is_empty() {
			id3v2_err!(@BAIL BadFrameLength);
		}

		Ok(Self::Next(Frame { id, content }))
	}
}

fn take<'a>(content: &mut &'a [u8], len: usize) -> Result<&'a [u8]> {
	let data: &'a [u8] = *content;
	if data.len() < len {
		id3v2_err!(@BAIL BadFrameLength);
	}

	let (taken, rest) = data.split_at(len);
	*content = rest;
	Ok(taken)
}

#[cfg(feature = "id3v2_compression_support")]
fn decompress(content: &[u8]) -> Result<Vec<u8>> {
	use crate::config::global_options;
	use crate::macros::err;

	use std::io::Read;

	let limit = unsafe { global_options().allocation_limit };

	let mut decompressed = Vec::new();
	flate2::read::ZlibDecoder::new(content)
		.take(limit as u64 + 1)
		.read_to_end(&mut decompressed)
		.map_err(|e| id3v2_err!(Decompression(e)))?;

	if decompressed.len() > limit {
		err!(TooMuchData);
	}

	Ok(decompressed)
}

#[cfg(not(feature = "id3v2_compression_support"))]
fn decompress(_: &[u8]) -> Result<Vec<u8>> {
	id3v2_err!(@BAIL CompressedFrameEncountered)
}

use super::frame::ParsedFrame;
use super::header::{Id3v2Header, Id3v2Version};
use super::items::FrameCollector;
use super::util::remove_unsynchronisation;
use crate::config::ParseOptions;
use crate::error::Result;
use crate::macros::id3v2_err;
use crate::tag::TagRecord;
use crate::util::cursor::ByteCursor;
use crate::util::decode_synchsafe;

use std::borrow::Cow;
use std::io::Cursor;

/// Parse an ID3v2 tag body (everything after the header, excluding a footer)
///
/// Frames that fail to parse are logged and skipped. An error is only returned when the tag
/// as a whole can't be used.
pub(crate) fn parse_id3v2(
	body: &[u8],
	header: Id3v2Header,
	parse_options: ParseOptions,
) -> Result<TagRecord> {
	log::debug!(
		"Parsing ID3v2 tag, size: {}, version: {:?}",
		header.size,
		header.version
	);

	if header.flags.compression {
		id3v2_err!(@BAIL V2Compression);
	}

	let body = if body.len() > header.size as usize {
		&body[..header.size as usize]
	} else {
		body
	};

	// ID3v2.4 applies unsynchronisation per frame instead
	let body = if header.flags.unsynchronisation && header.version != Id3v2Version::V4 {
		Cow::Owned(remove_unsynchronisation(body)?)
	} else {
		Cow::Borrowed(body)
	};

	let mut frames = &*body;
	if header.flags.extended_header {
		frames = skip_extended_header(frames, header.version)?;
	}

	let mut collector = FrameCollector::default();
	loop {
		match ParsedFrame::read(
			&mut frames,
			header.version,
			header.flags.unsynchronisation,
			parse_options,
		) {
			Ok(ParsedFrame::Next(frame)) => {
				if let Err(e) = collector.insert(&frame, header.version) {
					log::warn!("Failed to read frame \"{}\": {e}", frame.id);
				}
			},
			Ok(ParsedFrame::Skip) => {},
			Ok(ParsedFrame::Eof) => break,
			// The frame was already consumed, move on to the next
			Err(e) => log::warn!("Skipping a bad frame: {e}"),
		}
	}

	Ok(collector.finish())
}

/// Parse a complete tag (header included), as found in WAV chunks and FLAC prefixes
pub(crate) fn read_id3v2_bytes(bytes: &[u8], parse_options: ParseOptions) -> Result<TagRecord> {
	let mut reader = ByteCursor::new(Cursor::new(bytes))?;
	let header = Id3v2Header::read(&mut reader)?;

	parse_id3v2(&bytes[Id3v2Header::SIZE as usize..], header, parse_options)
}

fn skip_extended_header(body: &[u8], version: Id3v2Version) -> Result<&[u8]> {
	if body.len() < 4 {
		id3v2_err!(@BAIL BadExtendedHeaderSize);
	}

	let size_bytes = &body[..4];
	let skip = match version {
		// The size includes itself
		Id3v2Version::V4 => match decode_synchsafe(size_bytes, 7) {
			Some(size) if size >= 6 => size as usize,
			_ => id3v2_err!(@BAIL BadExtendedHeaderSize),
		},
		// The size excludes itself
		Id3v2Version::V3 => {
			u32::from_be_bytes([size_bytes[0], size_bytes[1], size_bytes[2], size_bytes[3]])
				as usize + 4
		},
		Id3v2Version::V2 => return Ok(body),
	};

	if skip > body.len() {
		id3v2_err!(@BAIL BadExtendedHeaderSize);
	}

	log::trace!("Skipping extended header, size: {skip}");
	Ok(&body[skip..])
}

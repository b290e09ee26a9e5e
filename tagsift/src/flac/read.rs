use super::block::{
	BLOCK_ID_INVALID, BLOCK_ID_PICTURE, BLOCK_ID_STREAMINFO, BLOCK_ID_VORBIS_COMMENTS, Block,
};
use super::properties::read_properties;
use crate::config::ParseOptions;
use crate::error::Result;
use crate::id3::v2::parse_id3v2;
use crate::id3::{ID3FindResults, find_id3v2};
use crate::macros::decode_err;
use crate::ogg::read_comments;
use crate::picture::Picture;
use crate::tag::TagRecord;
use crate::util::cursor::ByteCursor;

use std::io::{Read, Seek};

pub(super) fn verify_flac<R>(data: &mut ByteCursor<R>) -> Result<Block>
where
	R: Read + Seek,
{
	let mut marker = [0; 4];
	if data.remaining() < 4 {
		decode_err!(@BAIL Flac, "File missing \"fLaC\" stream marker");
	}
	data.read_exact(&mut marker)?;

	if &marker != b"fLaC" {
		decode_err!(@BAIL Flac, "File missing \"fLaC\" stream marker");
	}

	let block = Block::read(data, |_| true)?;

	if block.ty != BLOCK_ID_STREAMINFO {
		decode_err!(@BAIL Flac, "File missing mandatory STREAMINFO block");
	}

	log::debug!("File verified to be FLAC");
	Ok(block)
}

/// Read a FLAC file
///
/// The Vorbis comment block takes priority over an ID3v2 tag placed before the stream marker.
pub(crate) fn read_from<R>(
	data: &mut ByteCursor<R>,
	parse_options: ParseOptions,
) -> Result<TagRecord>
where
	R: Read + Seek,
{
	let file_length = data.len();
	let mut record = TagRecord::with_file_size(file_length);

	// It is possible for a FLAC file to contain an ID3v2 tag
	let mut id3v2 = None;
	if let ID3FindResults(Some(header), Some(content)) = find_id3v2(data, parse_options.read_tags)? {
		log::warn!("FLAC: Encountered an ID3v2 tag before the stream marker");

		match parse_id3v2(&content, header, parse_options) {
			Ok(tag) => id3v2 = Some(tag),
			Err(e) => log::warn!("FLAC: Unable to read the ID3v2 tag: {e}"),
		}
	}

	let stream_info = verify_flac(data)?;

	let mut vorbis_comments = None;
	let mut last_block = stream_info.last;

	while !last_block {
		let block = Block::read(data, |block_type| {
			(block_type == BLOCK_ID_VORBIS_COMMENTS && parse_options.read_tags)
				|| (block_type == BLOCK_ID_PICTURE && parse_options.read_cover_art)
		})?;

		last_block = block.last;

		if block.ty == BLOCK_ID_INVALID {
			log::warn!("FLAC: Encountered an invalid block type, stopping");
			break;
		}

		if block.content.is_empty() {
			log::trace!("FLAC: Skipped a block of type {} ({} bytes)", block.ty, block.size);
			continue;
		}

		match block.ty {
			BLOCK_ID_VORBIS_COMMENTS => {
				log::debug!("Encountered a Vorbis Comments block, parsing");

				// There should only be one, the first is kept
				if vorbis_comments.is_some() {
					log::warn!("FLAC: Found multiple Vorbis Comments blocks, ignoring");
					continue;
				}

				match read_comments(&block.content, parse_options) {
					Ok(tag) => vorbis_comments = Some(tag),
					Err(e) => log::warn!("FLAC: Unable to read the Vorbis Comments block: {e}"),
				}
			},
			BLOCK_ID_PICTURE => {
				log::debug!("Encountered a FLAC picture block, parsing");

				match Picture::from_flac_bytes(&block.content, false) {
					Ok(picture) => record.offer_picture(picture),
					Err(e) => log::warn!("Unable to read FLAC picture block, discarding: {e}"),
				}
			},
			_ => {},
		}
	}

	if parse_options.read_properties {
		let properties = read_properties(&stream_info.content, file_length)?;

		record.duration_seconds = properties.duration_seconds;
		record.bitrate_kbps = properties.bitrate_kbps;
		record.samplerate_hz = Some(properties.sample_rate);
		record.channels = Some(properties.channels);
		record.bit_depth = Some(properties.bit_depth);
		record.audio_offset_bytes = Some(data.tell());
	}

	if let Some(vorbis_comments) = vorbis_comments {
		record = record.merge(vorbis_comments);
	}

	if let Some(id3v2) = id3v2 {
		record = record.merge(id3v2);
	}

	Ok(record)
}

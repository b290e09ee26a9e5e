use super::constants::{
	ASF_HEADER_GUID, CONTENT_DESCRIPTION_GUID, EXTENDED_CONTENT_DESCRIPTION_GUID,
	FILE_PROPERTIES_GUID, HEADER_RESERVED, STREAM_PROPERTIES_GUID,
};
use super::content::{parse_content_description, parse_extended_content_description};
use super::object::ObjectInfo;
use super::properties::{read_audio_stream, read_duration};
use crate::config::ParseOptions;
use crate::error::Result;
use crate::tag::TagRecord;
use crate::util::cursor::ByteCursor;

use std::io::{Read, Seek};

// GUID (16), size (8), object count (4), reserved (2)
const HEADER_OBJECT_LEN: u64 = 30;

/// Read a WMA/ASF file
///
/// A file that doesn't start with an ASF header object produces an empty record, since the file
/// type only came from its extension.
pub(crate) fn read_from<R>(
	data: &mut ByteCursor<R>,
	parse_options: ParseOptions,
) -> Result<TagRecord>
where
	R: Read + Seek,
{
	let mut record = TagRecord::with_file_size(data.len());

	if data.remaining() < HEADER_OBJECT_LEN {
		log::warn!("ASF: File is too small to contain a header object");
		return Ok(record);
	}

	let guid = data.guid()?;
	let header_size = data.le_u64()?;
	let object_count = data.le_u32()?;
	let reserved = data.le_u16()?.to_le_bytes();

	if guid != ASF_HEADER_GUID {
		log::warn!("ASF: File doesn't start with an ASF header object");
		return Ok(record);
	}

	if reserved != HEADER_RESERVED {
		log::warn!("ASF: Header object has invalid reserved bytes {reserved:02X?}");
		return Ok(record);
	}

	log::debug!("File verified to be ASF, reading {object_count} header objects");

	let header_end = header_size.min(data.len());

	let mut content_description = None;
	let mut extended_content_description = None;

	for _ in 0..object_count {
		if data.tell() + 24 > header_end {
			break;
		}

		let Some(object) = ObjectInfo::read(data)? else {
			break;
		};

		let content_len = object.content_len();
		if content_len > data.remaining() {
			log::warn!("ASF: Object runs past the end of the file, stopping");
			break;
		}

		let wanted = match object.guid {
			FILE_PROPERTIES_GUID | STREAM_PROPERTIES_GUID => parse_options.read_properties,
			CONTENT_DESCRIPTION_GUID | EXTENDED_CONTENT_DESCRIPTION_GUID => {
				parse_options.read_tags
			},
			_ => false,
		};

		if !wanted {
			log::trace!("ASF: Skipping object {:02X?}", object.guid);
			data.skip(content_len)?;
			continue;
		}

		let content = data.read_bytes(content_len as usize)?;

		match object.guid {
			FILE_PROPERTIES_GUID => match read_duration(&content) {
				Ok(duration) => record.duration_seconds = duration,
				Err(e) => log::warn!("ASF: Unable to read the file properties object: {e}"),
			},
			STREAM_PROPERTIES_GUID => match read_audio_stream(&content) {
				// Only the first audio stream is used
				Ok(Some(stream)) if record.samplerate_hz.is_none() => {
					record.samplerate_hz = Some(stream.sample_rate);
					record.channels = stream.channels;
					record.bitrate_kbps = Some(stream.bitrate_kbps);
					record.bit_depth = stream.bit_depth;
				},
				Ok(_) => {},
				Err(e) => log::warn!("ASF: Unable to read a stream properties object: {e}"),
			},
			CONTENT_DESCRIPTION_GUID => match parse_content_description(&content) {
				Ok(tag) => content_description = Some(tag),
				Err(e) => log::warn!("ASF: Unable to read the content description object: {e}"),
			},
			EXTENDED_CONTENT_DESCRIPTION_GUID => {
				match parse_extended_content_description(&content, parse_options) {
					Ok(tag) => extended_content_description = Some(tag),
					Err(e) => log::warn!(
						"ASF: Unable to read the extended content description object: {e}"
					),
				}
			},
			_ => {},
		}
	}

	if let Some(tag) = content_description {
		record = record.merge(tag);
	}

	if let Some(tag) = extended_content_description {
		record = record.merge(tag);
	}

	Ok(record)
}

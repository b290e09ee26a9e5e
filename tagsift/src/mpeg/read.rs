use super::properties::read_properties;
use crate::config::ParseOptions;
use crate::error::Result;
use crate::id3::v2::parse_id3v2;
use crate::id3::{ID3FindResults, find_id3v1, find_id3v2};
use crate::tag::TagRecord;
use crate::util::cursor::ByteCursor;

use std::io::{Read, Seek};

/// Read an MP3 file
///
/// ID3v2 takes priority, ID3v1 only fills fields it left unset. The frame scan covers the
/// bytes between the two tags.
pub(crate) fn read_from<R>(
	reader: &mut ByteCursor<R>,
	parse_options: ParseOptions,
) -> Result<TagRecord>
where
	R: Read + Seek,
{
	let file_length = reader.len();
	let mut record = TagRecord::with_file_size(file_length);

	let ID3FindResults(id3v2_header, id3v2) = find_id3v2(reader, parse_options.read_tags)?;
	if let (Some(header), Some(body)) = (id3v2_header, id3v2) {
		match parse_id3v2(&body, header, parse_options) {
			Ok(id3v2) => record = record.merge(id3v2),
			Err(e) => log::warn!("MPEG: Unable to read the ID3v2 tag: {e}"),
		}
	}

	let stream_start = reader.tell();

	let ID3FindResults(id3v1_header, id3v1) = find_id3v1(reader, parse_options.read_tags)?;
	let mut stream_end = file_length;
	if id3v1_header.is_some() {
		stream_end -= 128;
	}

	if let Some(id3v1) = id3v1 {
		record = record.merge(id3v1);
	}

	if !parse_options.read_properties {
		return Ok(record);
	}

	if let Some(properties) =
		read_properties(reader, stream_start, stream_end, file_length, parse_options)?
	{
		record.duration_seconds = properties.duration_seconds;
		record.bitrate_kbps = properties.bitrate_kbps;
		record.samplerate_hz = Some(properties.sample_rate);
		record.channels = Some(properties.channels);
		record.is_vbr = properties.is_vbr;
		record.audio_offset_bytes = Some(properties.first_frame_offset);
	}

	Ok(record)
}

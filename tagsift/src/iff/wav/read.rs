use super::info::parse_riff_info;
use super::properties::read_properties;
use crate::config::ParseOptions;
use crate::error::Result;
use crate::id3::v2::read_id3v2_bytes;
use crate::iff::chunk::Chunks;
use crate::tag::TagRecord;
use crate::util::cursor::ByteCursor;

use std::io::{Read, Seek};

/// Check for the `RIFF` and `WAVE` identifiers, returning the stated RIFF size
pub(crate) fn verify_wav<R>(data: &mut ByteCursor<R>) -> Result<Option<u32>>
where
	R: Read + Seek,
{
	if data.remaining() < 12 {
		log::warn!("WAV: File is too short to contain a RIFF header");
		return Ok(None);
	}

	let mut id = [0; 12];
	data.read_exact(&mut id)?;

	if &id[..4] != b"RIFF" {
		log::warn!("WAV: File doesn't contain a RIFF chunk");
		return Ok(None);
	}

	if &id[8..] != b"WAVE" {
		log::warn!("WAV: Found RIFF file, format is not WAVE");
		return Ok(None);
	}

	log::debug!("File verified to be WAV");
	Ok(Some(u32::from_le_bytes([id[4], id[5], id[6], id[7]])))
}

/// Read a WAV file
///
/// A missing RIFF or WAVE identifier produces an empty record rather than an error.
pub(crate) fn read_from<R>(
	data: &mut ByteCursor<R>,
	parse_options: ParseOptions,
) -> Result<TagRecord>
where
	R: Read + Seek,
{
	let mut record = TagRecord::with_file_size(data.len());

	if verify_wav(data)?.is_none() {
		return Ok(record);
	}

	let mut fmt: Option<Vec<u8>> = None;
	let mut stream_len: Option<u32> = None;
	let mut audio_offset: Option<u64> = None;

	let mut id3v2: Option<TagRecord> = None;
	let mut riff_info: Option<TagRecord> = None;

	let mut chunks = Chunks::new();
	while chunks.next(data)? {
		// Only the stream length is trusted from a chunk that overruns the file
		if &chunks.fourcc != b"data" && u64::from(chunks.size) > data.remaining() {
			log::warn!(
				"WAV: Chunk \"{}\" claims {} bytes, only {} remain",
				String::from_utf8_lossy(&chunks.fourcc),
				chunks.size,
				data.remaining()
			);
			break;
		}

		let complete = match &chunks.fourcc {
			b"fmt " if parse_options.read_properties && fmt.is_none() => {
				fmt = Some(chunks.content(data)?);
				true
			},
			b"data" => {
				if stream_len.is_none() {
					stream_len = Some(chunks.size);
					audio_offset = Some(data.tell());
				}

				chunks.skip(data, 0)?
			},
			b"LIST" if parse_options.read_tags && chunks.size >= 4 => {
				let mut list_type = [0; 4];
				data.read_exact(&mut list_type)?;

				if &list_type == b"INFO" && riff_info.is_none() {
					let list = data.read_bytes(chunks.size as usize - 4)?;
					riff_info = Some(parse_riff_info(&list));
					chunks.skip(data, chunks.size)?
				} else {
					chunks.skip(data, 4)?
				}
			},
			b"ID3 " | b"id3 " if parse_options.read_tags => {
				let content = chunks.content(data)?;
				match read_id3v2_bytes(&content, parse_options) {
					Ok(tag) => {
						id3v2 = Some(match id3v2 {
							Some(existing) => {
								log::warn!("WAV: Duplicate ID3v2 tag found, keeping the first");
								existing.merge(tag)
							},
							None => tag,
						});
					},
					Err(e) => log::warn!("WAV: Unable to read the ID3v2 chunk: {e}"),
				}
				true
			},
			_ => chunks.skip(data, 0)?,
		};

		if !complete {
			log::warn!(
				"WAV: Chunk \"{}\" runs past the end of the file",
				String::from_utf8_lossy(&chunks.fourcc)
			);
			break;
		}
	}

	if parse_options.read_properties {
		match fmt.as_deref().and_then(|fmt| read_properties(fmt, stream_len)) {
			Some(properties) => {
				record.duration_seconds = properties.duration_seconds;
				record.bitrate_kbps = properties.bitrate_kbps;
				record.samplerate_hz = Some(properties.sample_rate);
				record.channels = properties.channels;
				record.bit_depth = properties.bit_depth;
				record.audio_offset_bytes = audio_offset;
			},
			None => log::warn!("WAV: File does not contain a valid \"fmt \" chunk"),
		}
	}

	if let Some(id3v2) = id3v2 {
		record = record.merge(id3v2);
	}

	if let Some(riff_info) = riff_info {
		record = record.merge(riff_info);
	}

	Ok(record)
}

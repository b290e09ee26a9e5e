use super::constants::AUDIO_MEDIA_GUID;
use crate::error::Result;
use crate::macros::err;

use byteorder::{LittleEndian, ReadBytesExt};

// File ID (16), file size (8), creation date (8), data packets count (8)
const PLAY_DURATION_OFFSET: usize = 40;

// Stream type (16), error correction type (16), time offset (8), type-specific data length (4),
// error correction data length (4), flags (2), reserved (4)
const STREAM_TYPE_SPECIFIC_OFFSET: usize = 54;
const WAVEFORMATEX_LEN: usize = 16;

/// Audio stream information from a stream properties object
#[derive(Debug, Copy, Clone, PartialEq)]
pub(super) struct AudioStream {
	pub(super) channels: Option<u8>,
	pub(super) sample_rate: u32,
	pub(super) bitrate_kbps: f64,
	pub(super) bit_depth: Option<u8>,
}

/// Read the play duration, in seconds, from a file properties object
///
/// The duration includes the preroll, which isn't subtracted.
pub(super) fn read_duration(content: &[u8]) -> Result<Option<f64>> {
	if content.len() < PLAY_DURATION_OFFSET + 8 {
		err!(UnexpectedEof);
	}

	let mut reader = &content[PLAY_DURATION_OFFSET..];
	let play_duration = reader.read_u64::<LittleEndian>()?;

	if play_duration == 0 {
		return Ok(None);
	}

	// 100-nanosecond units
	Ok(Some(play_duration as f64 / 10_000_000.0))
}

/// Read a stream properties object, returning `None` for anything other than audio streams
pub(super) fn read_audio_stream(content: &[u8]) -> Result<Option<AudioStream>> {
	if content.len() < STREAM_TYPE_SPECIFIC_OFFSET {
		err!(UnexpectedEof);
	}

	if content[..16] != AUDIO_MEDIA_GUID {
		log::debug!("ASF: Skipping a non-audio stream");
		return Ok(None);
	}

	let mut reader = &content[40..];
	let type_specific_len = reader.read_u32::<LittleEndian>()? as usize;
	if type_specific_len < WAVEFORMATEX_LEN
		|| content.len() < STREAM_TYPE_SPECIFIC_OFFSET + WAVEFORMATEX_LEN
	{
		err!(MalformedField("ASF: Audio stream properties are too short"));
	}

	let mut reader = &content[STREAM_TYPE_SPECIFIC_OFFSET..];
	let _codec_id = reader.read_u16::<LittleEndian>()?;
	let channels = reader.read_u16::<LittleEndian>()?;
	let sample_rate = reader.read_u32::<LittleEndian>()?;
	let average_bytes_per_second = reader.read_u32::<LittleEndian>()?;
	let _block_align = reader.read_u16::<LittleEndian>()?;
	let bits_per_sample = reader.read_u16::<LittleEndian>()?;

	Ok(Some(AudioStream {
		channels: u8::try_from(channels).ok(),
		sample_rate,
		bitrate_kbps: f64::from(average_bytes_per_second) * 8.0 / 1000.0,
		bit_depth: u8::try_from(bits_per_sample).ok(),
	}))
}

#[cfg(test)]
pub(super) fn file_properties(play_duration: u64) -> Vec<u8> {
	let mut content = vec![0; PLAY_DURATION_OFFSET];
	content.extend(play_duration.to_le_bytes());
	content.extend([0; 32]);
	content
}

#[cfg(test)]
pub(super) fn audio_stream_properties(
	channels: u16,
	sample_rate: u32,
	average_bytes_per_second: u32,
	bits_per_sample: u16,
) -> Vec<u8> {
	let mut content = AUDIO_MEDIA_GUID.to_vec();
	content.extend([0; 24]);
	content.extend((WAVEFORMATEX_LEN as u32).to_le_bytes());
	content.extend([0; 10]);
	content.extend(0x0161_u16.to_le_bytes());
	content.extend(channels.to_le_bytes());
	content.extend(sample_rate.to_le_bytes());
	content.extend(average_bytes_per_second.to_le_bytes());
	content.extend(4_u16.to_le_bytes());
	content.extend(bits_per_sample.to_le_bytes());
	content
}

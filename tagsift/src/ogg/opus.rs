use super::read::StreamInfo;
use crate::error::Result;

use byteorder::{LittleEndian, ReadBytesExt};

/// Opus granule positions always count 48kHz samples, regardless of the input sample rate
const OPUS_GRANULE_RATE: u32 = 48000;

/// Read an Opus identification header, without its `OpusHead` signature
pub(super) fn read_identification(mut content: &[u8]) -> Result<StreamInfo> {
	let version = content.read_u8()?;
	let channels = content.read_u8()?;
	let pre_skip = content.read_u16::<LittleEndian>()?;
	let input_sample_rate = content.read_u32::<LittleEndian>()?;

	log::debug!(
		"Opus: version {version}, {channels} channels, input sample rate: {input_sample_rate}Hz, \
		 pre-skip: {pre_skip}"
	);

	// An input sample rate of 0 means it is unknown
	let sample_rate = if input_sample_rate == 0 {
		OPUS_GRANULE_RATE
	} else {
		input_sample_rate
	};

	Ok(StreamInfo {
		sample_rate,
		channels,
		bitrate_kbps: None,
		pre_skip: u64::from(pre_skip),
		granule_rate: OPUS_GRANULE_RATE,
	})
}

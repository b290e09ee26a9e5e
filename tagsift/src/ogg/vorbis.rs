use super::read::StreamInfo;
use crate::error::Result;

use byteorder::{LittleEndian, ReadBytesExt};

/// Read a Vorbis identification header, without its `\x01vorbis` signature
pub(super) fn read_identification(mut content: &[u8]) -> Result<StreamInfo> {
	let _version = content.read_u32::<LittleEndian>()?;

	let channels = content.read_u8()?;
	let sample_rate = content.read_u32::<LittleEndian>()?;

	let _bitrate_maximum = content.read_i32::<LittleEndian>()?;
	let bitrate_nominal = content.read_i32::<LittleEndian>()?;
	let _bitrate_minimum = content.read_i32::<LittleEndian>()?;

	log::debug!(
		"Vorbis: {channels} channels, {sample_rate}Hz, nominal bitrate: {bitrate_nominal}"
	);

	Ok(StreamInfo {
		sample_rate,
		channels,
		bitrate_kbps: (bitrate_nominal > 0).then(|| f64::from(bitrate_nominal) / 1024.0),
		pre_skip: 0,
		granule_rate: sample_rate,
	})
}

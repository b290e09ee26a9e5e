use crate::error::Result;
use crate::macros::decode_err;

/// The audio properties held in a STREAMINFO block
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(super) struct FlacProperties {
	pub(super) duration_seconds: Option<f64>,
	pub(super) bitrate_kbps: Option<f64>,
	pub(super) sample_rate: u32,
	pub(super) bit_depth: u8,
	pub(super) channels: u8,
}

/// Read the properties from the content of a STREAMINFO block
///
/// The bitrate is the overall bitrate of the file.
pub(super) fn read_properties(stream_info: &[u8], file_length: u64) -> Result<FlacProperties> {
	if stream_info.len() < 18 {
		decode_err!(@BAIL Flac, "File has an invalid STREAMINFO block size (< 18)");
	}

	// Skip 10 bytes
	// Minimum block size (2)
	// Maximum block size (2)
	// Minimum frame size (3)
	// Maximum frame size (3)
	//
	// The next 8 bytes hold:
	// Sample rate (20 bits)
	// Channel count - 1 (3 bits)
	// Bits per sample - 1 (5 bits)
	// Total samples (36 bits)
	let mut info = [0; 8];
	info.copy_from_slice(&stream_info[10..18]);
	let info = u64::from_be_bytes(info);

	let sample_rate = (info >> 44) as u32;
	let channels = ((info >> 41) & 0b111) as u8 + 1;
	let bit_depth = ((info >> 36) & 0b1_1111) as u8 + 1;
	let total_samples = info & 0xF_FFFF_FFFF;

	log::debug!(
		"FLAC: {channels} channels, {sample_rate}Hz, {bit_depth} bits per sample, {total_samples} \
		 samples"
	);

	let mut properties = FlacProperties {
		sample_rate,
		bit_depth,
		channels,
		..FlacProperties::default()
	};

	if sample_rate == 0 {
		log::warn!("FLAC: Sample rate = 0, unable to calculate length");
		return Ok(properties);
	}

	// A total of 0 means the count is unknown
	if total_samples == 0 {
		log::warn!("FLAC: Total sample count is unknown, unable to calculate length");
		return Ok(properties);
	}

	let duration = total_samples as f64 / f64::from(sample_rate);
	properties.duration_seconds = Some(duration);
	properties.bitrate_kbps = Some(file_length as f64 / duration * 8.0 / 1024.0);

	Ok(properties)
}

#[cfg(test)]
pub(crate) fn stream_info(sample_rate: u32, channels: u8, bit_depth: u8, total_samples: u64) -> Vec<u8> {
	let packed = (u64::from(sample_rate) << 44)
		| (u64::from(channels - 1) << 41)
		| (u64::from(bit_depth - 1) << 36)
		| (total_samples & 0xF_FFFF_FFFF);

	let mut block = vec![0x10, 0x00, 0x10, 0x00, 0, 0, 0, 0, 0, 0];
	block.extend(packed.to_be_bytes());
	block.extend([0; 16]);
	block
}

use byteorder::{LittleEndian, ReadBytesExt};

const EXTENSIBLE: u16 = 0xFFFE;

/// The audio properties of a WAV file
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub(super) struct WavProperties {
	pub(super) duration_seconds: Option<f64>,
	pub(super) bitrate_kbps: Option<f64>,
	pub(super) sample_rate: u32,
	pub(super) bit_depth: Option<u8>,
	pub(super) channels: Option<u8>,
}

#[derive(Copy, Clone, Debug)]
struct FmtChunk {
	format_tag: u16,
	channels: u16,
	sample_rate: u32,
	bits_per_sample: u16,
	valid_bits_per_sample: Option<u16>,
}

fn read_fmt_chunk(mut reader: &[u8]) -> std::io::Result<FmtChunk> {
	let format_tag = reader.read_u16::<LittleEndian>()?;
	let channels = reader.read_u16::<LittleEndian>()?;
	let sample_rate = reader.read_u32::<LittleEndian>()?;
	let _bytes_per_second = reader.read_u32::<LittleEndian>()?;
	let _block_align = reader.read_u16::<LittleEndian>()?;
	let bits_per_sample = reader.read_u16::<LittleEndian>()?;

	let mut valid_bits_per_sample = None;
	if format_tag == EXTENSIBLE && reader.len() >= 4 {
		let _cb_size = reader.read_u16::<LittleEndian>()?;
		valid_bits_per_sample = Some(reader.read_u16::<LittleEndian>()?);
	}

	Ok(FmtChunk {
		format_tag,
		channels,
		sample_rate,
		bits_per_sample,
		valid_bits_per_sample,
	})
}

/// Calculate the properties from a `fmt ` chunk and the size of the `data` chunk
///
/// Returns `None` if the `fmt ` chunk is too short to use.
pub(super) fn read_properties(fmt: &[u8], stream_len: Option<u32>) -> Option<WavProperties> {
	let Ok(fmt) = read_fmt_chunk(fmt) else {
		log::warn!("WAV: \"fmt \" chunk is too short, unable to read properties");
		return None;
	};

	log::debug!(
		"WAV: format {:#06X}, {} channels, {}Hz, {} bits per sample",
		fmt.format_tag,
		fmt.channels,
		fmt.sample_rate,
		fmt.bits_per_sample
	);

	let bit_depth = match fmt.valid_bits_per_sample {
		Some(valid_bits) if valid_bits > 0 => valid_bits,
		_ => fmt.bits_per_sample,
	};

	let mut properties = WavProperties {
		duration_seconds: None,
		bitrate_kbps: None,
		sample_rate: fmt.sample_rate,
		bit_depth: u8::try_from(bit_depth).ok(),
		channels: u8::try_from(fmt.channels).ok(),
	};

	let channels = f64::from(fmt.channels);
	let sample_rate = f64::from(fmt.sample_rate);
	let bits_per_sample = f64::from(fmt.bits_per_sample);

	if fmt.channels == 0 || fmt.sample_rate == 0 || fmt.bits_per_sample < 8 {
		log::warn!("WAV: \"fmt \" chunk has a zero field, unable to calculate duration");
		return Some(properties);
	}

	properties.bitrate_kbps = Some(sample_rate * channels * bits_per_sample / 1024.0);

	match stream_len {
		Some(stream_len) => {
			properties.duration_seconds = Some(
				f64::from(stream_len) / channels / sample_rate / (f64::from(fmt.bits_per_sample / 8)),
			);
		},
		None => log::warn!("WAV: File does not contain a \"data\" chunk"),
	}

	Some(properties)
}

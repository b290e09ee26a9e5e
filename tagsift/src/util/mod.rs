pub(crate) mod alloc;
pub(crate) mod cursor;
pub(crate) mod text;

/// Decode a big-endian integer that uses `bits_per_byte` of each byte
///
/// ID3v2.4 sizes use 7 bits per byte, while ID3v2.2/2.3 sizes use all 8.
///
/// Returns `None` if a byte uses more than `bits_per_byte` bits, or the result cannot fit
/// in a `u32`.
pub(crate) fn decode_synchsafe(bytes: &[u8], bits_per_byte: u8) -> Option<u32> {
	if bits_per_byte == 0 || bits_per_byte > 8 {
		return None;
	}

	if u32::from(bits_per_byte) * (bytes.len() as u32) > 32 {
		return None;
	}

	let mut value = 0_u32;
	for &byte in bytes {
		if bits_per_byte < 8 && byte >> bits_per_byte != 0 {
			return None;
		}

		value = (value << bits_per_byte) | u32::from(byte);
	}

	Some(value)
}

#[cfg(test)]
pub(crate) fn encode_synchsafe(value: u32, byte_count: usize, bits_per_byte: u8) -> Vec<u8> {
	let mask = (1_u32 << bits_per_byte) - 1;
	(0..byte_count)
		.rev()
		.map(|i| ((value >> (u32::from(bits_per_byte) * i as u32)) & mask) as u8)
		.collect()
}

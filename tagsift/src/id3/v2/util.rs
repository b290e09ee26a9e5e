use crate::error::Result;
use crate::util::alloc::VecFallibleCapacity;

/// Undo unsynchronisation, turning every `0xFF 0x00` pair back into `0xFF`
///
/// A `0xFF` followed by anything other than `0x00` is left as is.
pub(crate) fn remove_unsynchronisation(content: &[u8]) -> Result<Vec<u8>> {
	let mut out = Vec::try_with_capacity_stable(content.len())?;

	let mut previous_ff = false;
	for &byte in content {
		if previous_ff && byte == 0 {
			previous_ff = false;
			continue;
		}

		out.push(byte);
		previous_ff = byte == 0xFF;
	}

	Ok(out)
}

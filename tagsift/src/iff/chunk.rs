use crate::error::Result;
use crate::util::cursor::ByteCursor;

use std::io::{Read, Seek};

const RIFF_CHUNK_HEADER_SIZE: u64 = 8;

/// Walks the chunks of a RIFF file
///
/// Chunks start on even boundaries, so a chunk with an odd size is followed by a padding byte
/// that isn't included in its size.
pub(crate) struct Chunks {
	pub(crate) fourcc: [u8; 4],
	pub(crate) size: u32,
}

impl Chunks {
	pub(crate) const fn new() -> Self {
		Self {
			fourcc: [0; 4],
			size: 0,
		}
	}

	/// Read the next chunk header, returning `false` once there isn't room for another
	pub(crate) fn next<R>(&mut self, data: &mut ByteCursor<R>) -> Result<bool>
	where
		R: Read + Seek,
	{
		if data.remaining() < RIFF_CHUNK_HEADER_SIZE {
			return Ok(false);
		}

		data.read_exact(&mut self.fourcc)?;
		self.size = data.le_u32()?;

		log::trace!(
			"Found chunk \"{}\", size: {}",
			String::from_utf8_lossy(&self.fourcc),
			self.size
		);

		Ok(true)
	}

	/// Read the entire chunk, moving past its padding
	pub(crate) fn content<R>(&mut self, data: &mut ByteCursor<R>) -> Result<Vec<u8>>
	where
		R: Read + Seek,
	{
		let content = data.read_bytes(self.size as usize)?;
		self.correct_position(data)?;

		Ok(content)
	}

	/// Skip the rest of a chunk, `consumed` bytes into it
	///
	/// Returns `false` if the chunk runs past the end of the file.
	pub(crate) fn skip<R>(&mut self, data: &mut ByteCursor<R>, consumed: u32) -> Result<bool>
	where
		R: Read + Seek,
	{
		let size = u64::from(self.size.saturating_sub(consumed));
		if size > data.remaining() {
			return Ok(false);
		}

		data.skip(size)?;
		self.correct_position(data)?;

		Ok(true)
	}

	fn correct_position<R>(&mut self, data: &mut ByteCursor<R>) -> Result<()>
	where
		R: Read + Seek,
	{
		// The padding byte may be missing at the end of a file
		if self.size % 2 != 0 && data.remaining() > 0 {
			data.skip(1)?;
		}

		Ok(())
	}
}

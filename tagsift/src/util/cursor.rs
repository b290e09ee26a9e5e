use super::decode_synchsafe;
use crate::error::Result;
use crate::macros::{err, try_vec};

use std::io::{Read, Seek, SeekFrom};

use byteorder::{BigEndian, LittleEndian, ReadBytesExt};

/// A seekable reader that knows the total length of its source
///
/// Every length-driven read goes through [`ByteCursor::read_bytes`], which refuses to read past
/// the end of the source and respects the global allocation limit.
pub(crate) struct ByteCursor<R> {
	inner: R,
	pos: u64,
	len: u64,
}

impl<R> ByteCursor<R>
where
	R: Read + Seek,
{
	/// Wrap `inner`, keeping its current position
	pub(crate) fn new(mut inner: R) -> Result<Self> {
		let pos = inner.stream_position()?;
		let len = inner.seek(SeekFrom::End(0))?;
		inner.seek(SeekFrom::Start(pos))?;

		Ok(Self { inner, pos, len })
	}

	pub(crate) fn tell(&self) -> u64 {
		self.pos
	}

	pub(crate) fn len(&self) -> u64 {
		self.len
	}

	pub(crate) fn remaining(&self) -> u64 {
		self.len.saturating_sub(self.pos)
	}

	/// Read exactly `n` bytes
	///
	/// Fails with `UnexpectedEof` if fewer than `n` bytes remain, before allocating anything.
	pub(crate) fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
		if n as u64 > self.remaining() {
			err!(UnexpectedEof);
		}

		let mut content = try_vec![0; n];
		self.read_exact(&mut content)?;

		Ok(content)
	}

	/// Seek forward `n` bytes, failing if that would pass the end of the source
	pub(crate) fn skip(&mut self, n: u64) -> Result<()> {
		if n > self.remaining() {
			err!(UnexpectedEof);
		}

		self.seek(SeekFrom::Current(n as i64))?;
		Ok(())
	}

	pub(crate) fn u8(&mut self) -> Result<u8> {
		Ok(self.read_u8()?)
	}

	pub(crate) fn be_u16(&mut self) -> Result<u16> {
		Ok(self.read_u16::<BigEndian>()?)
	}

	pub(crate) fn be_u32(&mut self) -> Result<u32> {
		Ok(self.read_u32::<BigEndian>()?)
	}

	pub(crate) fn le_u16(&mut self) -> Result<u16> {
		Ok(self.read_u16::<LittleEndian>()?)
	}

	pub(crate) fn le_u32(&mut self) -> Result<u32> {
		Ok(self.read_u32::<LittleEndian>()?)
	}

	pub(crate) fn le_u64(&mut self) -> Result<u64> {
		Ok(self.read_u64::<LittleEndian>()?)
	}

	/// Read a `byte_count` byte integer using `bits_per_byte` of each byte
	pub(crate) fn synchsafe_u32(&mut self, byte_count: u8, bits_per_byte: u8) -> Result<u32> {
		if byte_count > 4 {
			err!(MalformedField("synchsafe integers are at most 4 bytes"));
		}

		let mut bytes = [0; 4];
		let bytes = &mut bytes[..usize::from(byte_count)];
		self.read_exact(bytes)?;

		match decode_synchsafe(bytes, bits_per_byte) {
			Some(value) => Ok(value),
			None => err!(MalformedField("synchsafe integer has out of range bytes")),
		}
	}

	pub(crate) fn guid(&mut self) -> Result<[u8; 16]> {
		let mut guid = [0; 16];
		self.read_exact(&mut guid)?;
		Ok(guid)
	}
}

impl<R> Read for ByteCursor<R>
where
	R: Read,
{
	fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
		let read = self.inner.read(buf)?;
		self.pos += read as u64;
		Ok(read)
	}
}

impl<R> Seek for ByteCursor<R>
where
	R: Seek,
{
	fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
		self.pos = self.inner.seek(pos)?;
		Ok(self.pos)
	}

	fn stream_position(&mut self) -> std::io::Result<u64> {
		Ok(self.pos)
	}
}

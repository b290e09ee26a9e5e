use crate::error::Result;
use crate::util::cursor::ByteCursor;

use std::io::{Read, Seek};

use byteorder::{BigEndian, ReadBytesExt};

pub(super) const BLOCK_ID_STREAMINFO: u8 = 0;
pub(super) const BLOCK_ID_VORBIS_COMMENTS: u8 = 4;
pub(super) const BLOCK_ID_PICTURE: u8 = 6;
pub(super) const BLOCK_ID_INVALID: u8 = 127;

pub(super) struct Block {
	pub(super) ty: u8,
	pub(super) last: bool,
	pub(super) size: u32,
	/// Empty unless the predicate asked for the block's content
	pub(super) content: Vec<u8>,
}

impl Block {
	/// Read a block, only keeping its content if `predicate` returns `true` for its type
	pub(super) fn read<R, P>(data: &mut ByteCursor<R>, mut predicate: P) -> Result<Self>
	where
		R: Read + Seek,
		P: FnMut(u8) -> bool,
	{
		let byte = data.u8()?;
		let last = (byte & 0x80) != 0;
		let ty = byte & 0x7F;

		let size = data.read_u24::<BigEndian>()?;
		log::trace!("Reading FLAC block, type: {ty}, size: {size}");

		let content = if predicate(ty) {
			data.read_bytes(size as usize)?
		} else {
			data.skip(u64::from(size))?;
			Vec::new()
		};

		Ok(Self {
			ty,
			last,
			size,
			content,
		})
	}
}

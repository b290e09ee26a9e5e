use super::constants::OBJECT_HEADER_LEN;
use crate::error::Result;
use crate::util::cursor::ByteCursor;

use std::io::{Read, Seek};

/// The GUID and size that start every ASF object
pub(super) struct ObjectInfo {
	pub(super) guid: [u8; 16],
	/// The size of the object, including this header
	pub(super) size: u64,
}

impl ObjectInfo {
	/// Read the next object header
	///
	/// Returns `None` if the declared size can't even cover the header, which leaves no way to
	/// find the next object.
	pub(super) fn read<R>(data: &mut ByteCursor<R>) -> Result<Option<Self>>
	where
		R: Read + Seek,
	{
		let guid = data.guid()?;
		let size = data.le_u64()?;

		if size < OBJECT_HEADER_LEN {
			log::warn!("ASF: Encountered an object with an invalid size ({size})");
			return Ok(None);
		}

		Ok(Some(Self { guid, size }))
	}

	/// The size of the object's content
	pub(super) fn content_len(&self) -> u64 {
		self.size - OBJECT_HEADER_LEN
	}
}

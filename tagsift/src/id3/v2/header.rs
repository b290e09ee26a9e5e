use crate::error::Result;
use crate::macros::{err, id3v2_err};
use crate::util::cursor::ByteCursor;

use std::io::{Read, Seek};

/// The ID3v2 version
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub(crate) enum Id3v2Version {
	/// ID3v2.2
	V2,
	/// ID3v2.3
	V3,
	/// ID3v2.4
	V4,
}

/// Flags that apply to the entire tag
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Id3v2TagFlags {
	pub(crate) unsynchronisation: bool,
	pub(crate) extended_header: bool,
	pub(crate) experimental: bool,
	pub(crate) footer: bool,
	/// ID3v2.2 only, the tag should be ignored entirely
	pub(crate) compression: bool,
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct Id3v2Header {
	pub(crate) version: Id3v2Version,
	pub(crate) flags: Id3v2TagFlags,
	/// The size of the tag contents (**DOES NOT INCLUDE THE HEADER/FOOTER**)
	pub(crate) size: u32,
}

impl Id3v2Header {
	pub(crate) const SIZE: u32 = 10;

	/// Read a header, starting at the "ID3" marker
	pub(crate) fn read<R>(data: &mut ByteCursor<R>) -> Result<Self>
	where
		R: Read + Seek,
	{
		log::debug!("Parsing ID3v2 header");

		let mut marker = [0; 3];
		data.read_exact(&mut marker)?;
		if &marker != b"ID3" {
			err!(MalformedField("ID3v2 header is missing the \"ID3\" marker"));
		}

		let major = data.u8()?;
		let revision = data.u8()?;
		let flags = data.u8()?;

		// Version is stored as [major, minor], but here we don't care about minor revisions unless there's an error.
		let version = match major {
			2 => Id3v2Version::V2,
			3 => Id3v2Version::V3,
			4 => Id3v2Version::V4,
			major => id3v2_err!(@BAIL BadId3v2Version(major, revision)),
		};

		let v3_or_later = version != Id3v2Version::V2;

		let flags_parsed = Id3v2TagFlags {
			unsynchronisation: flags & 0x80 == 0x80,
			extended_header: v3_or_later && flags & 0x40 == 0x40,
			experimental: v3_or_later && flags & 0x20 == 0x20,
			footer: version == Id3v2Version::V4 && flags & 0x10 == 0x10,
			// Compression was a flag only used in ID3v2.2 (bit 6).
			// A compression scheme was never decided, so the tag is unreadable.
			compression: !v3_or_later && flags & 0x40 == 0x40,
		};

		let size = data.synchsafe_u32(4, 7)?;

		Ok(Id3v2Header {
			version,
			flags: flags_parsed,
			size,
		})
	}

	/// The total size of the tag, including the header and footer
	pub(crate) fn full_tag_size(&self) -> u64 {
		u64::from(self.size) + u64::from(Self::SIZE) + if self.flags.footer { 10 } else { 0 }
	}
}

#[cfg(test)]
mod tests {
	use super::{Id3v2Header, Id3v2Version};
	use crate::error::{ErrorKind, Id3v2ErrorKind, Result};
	use crate::util::cursor::ByteCursor;

	use std::io::Cursor;

	fn header(bytes: [u8; 10]) -> Result<Id3v2Header> {
		let mut cursor = ByteCursor::new(Cursor::new(bytes)).unwrap();
		Id3v2Header::read(&mut cursor)
	}

	#[test_log::test]
	fn parse_v24_header() {
		let header = header([b'I', b'D', b'3', 4, 0, 0x90, 0x00, 0x00, 0x02, 0x01]).unwrap();

		assert_eq!(header.version, Id3v2Version::V4);
		assert!(header.flags.unsynchronisation);
		assert!(header.flags.footer);
		assert!(!header.flags.extended_header);
		assert_eq!(header.size, 257);
		assert_eq!(header.full_tag_size(), 277);
	}

	#[test_log::test]
	fn v22_compression_flag() {
		let header = header([b'I', b'D', b'3', 2, 0, 0x40, 0, 0, 0, 10]).unwrap();

		assert_eq!(header.version, Id3v2Version::V2);
		assert!(header.flags.compression);
		assert!(!header.flags.extended_header);
	}

	#[test_log::test]
	fn bad_version() {
		let err = header([b'I', b'D', b'3', 5, 0, 0, 0, 0, 0, 0]).unwrap_err();

		let ErrorKind::Id3v2(id3v2_err) = err.kind() else {
			panic!("Expected an ID3v2 error, got {err:?}");
		};
		assert!(matches!(id3v2_err.kind(), Id3v2ErrorKind::BadId3v2Version(5, 0)));
	}

	#[test_log::test]
	fn truncated_header() {
		let mut cursor = ByteCursor::new(Cursor::new(b"ID3\x04\x00\x00\x00".to_vec())).unwrap();
		let err = Id3v2Header::read(&mut cursor).unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::UnexpectedEof));
	}

	#[test_log::test]
	fn bad_size() {
		let err = header([b'I', b'D', b'3', 3, 0, 0, 0x80, 0, 0, 0]).unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::MalformedField(_)));
	}
}

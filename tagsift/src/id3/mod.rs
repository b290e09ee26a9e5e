//! ID3 tag locating and reading
//!
//! ID3v2 tags sit at the start of a file (or inside a WAV chunk), ID3v1 tags are the last 128
//! bytes of a file.

pub mod v1;
pub(crate) mod v2;

use crate::error::Result;
use crate::tag::TagRecord;
use crate::util::cursor::ByteCursor;
use v1::constants::ID3V1_TAG_MARKER;
use v2::header::Id3v2Header;

use std::io::{Read, Seek, SeekFrom};

#[derive(Debug)]
pub(crate) struct ID3FindResults<Header, Content>(pub Option<Header>, pub Content);

/// Look for an ID3v1 tag at the end of the source
///
/// The cursor is left where it started.
pub(crate) fn find_id3v1<R>(
	data: &mut ByteCursor<R>,
	read: bool,
) -> Result<ID3FindResults<(), Option<TagRecord>>>
where
	R: Read + Seek,
{
	log::debug!("Searching for an ID3v1 tag");

	// Source is too small to contain an ID3v1 tag
	if data.len() < 128 {
		return Ok(ID3FindResults(None, None));
	}

	let start = data.tell();
	data.seek(SeekFrom::End(-128))?;

	let mut id3v1_tag = [0; 128];
	data.read_exact(&mut id3v1_tag)?;
	data.seek(SeekFrom::Start(start))?;

	// No ID3v1 tag found
	if id3v1_tag[..3] != ID3V1_TAG_MARKER {
		return Ok(ID3FindResults(None, None));
	}

	log::debug!("Found an ID3v1 tag");

	let id3v1 = read.then(|| v1::read::parse_id3v1(id3v1_tag));
	Ok(ID3FindResults(Some(()), id3v1))
}

/// Look for an ID3v2 tag at the current position
///
/// On success the cursor is left after the tag (and its footer). If no valid header is found,
/// the cursor is left where it started.
pub(crate) fn find_id3v2<R>(
	data: &mut ByteCursor<R>,
	read: bool,
) -> Result<ID3FindResults<Id3v2Header, Option<Vec<u8>>>>
where
	R: Read + Seek,
{
	log::debug!("Searching for an ID3v2 tag at offset: {}", data.tell());

	if data.remaining() < u64::from(Id3v2Header::SIZE) {
		return Ok(ID3FindResults(None, None));
	}

	let start = data.tell();

	let mut marker = [0; 3];
	data.read_exact(&mut marker)?;
	data.seek(SeekFrom::Start(start))?;

	if &marker != b"ID3" {
		return Ok(ID3FindResults(None, None));
	}

	let header = match Id3v2Header::read(data) {
		Ok(header) => header,
		Err(e) => {
			log::warn!("Found an invalid ID3v2 header, ignoring it: {e}");
			data.seek(SeekFrom::Start(start))?;
			return Ok(ID3FindResults(None, None));
		},
	};

	log::debug!(
		"Found an ID3v2 tag, size: {} ({} with header and footer)",
		header.size,
		header.full_tag_size()
	);

	let mut id3v2 = None;
	if read {
		id3v2 = Some(data.read_bytes(header.size as usize)?);
	} else {
		data.skip(u64::from(header.size))?;
	}

	if header.flags.footer {
		// A missing footer isn't worth failing over, the tag itself was read
		let footer_len = data.remaining().min(10);
		data.skip(footer_len)?;
	}

	Ok(ID3FindResults(Some(header), id3v2))
}

#[cfg(test)]
mod tests {
	use super::{find_id3v1, find_id3v2};
	use crate::error::ErrorKind;
	use crate::util::cursor::ByteCursor;
	use crate::util::encode_synchsafe;

	use std::io::Cursor;

	fn id3v2(flags: u8, body_len: usize) -> Vec<u8> {
		let mut tag = vec![b'I', b'D', b'3', 4, 0, flags];
		tag.extend(encode_synchsafe(body_len as u32, 4, 7));
		tag.extend(std::iter::repeat_n(0, body_len));
		tag
	}

	#[test_log::test]
	fn id3v2_found() {
		let mut data = id3v2(0, 20);
		data.extend(b"audio");

		let mut cursor = ByteCursor::new(Cursor::new(data)).unwrap();
		let results = find_id3v2(&mut cursor, true).unwrap();

		assert!(results.0.is_some());
		assert_eq!(results.1.map(|b| b.len()), Some(20));
		assert_eq!(cursor.tell(), 30);
	}

	#[test_log::test]
	fn id3v2_footer_skipped() {
		let mut data = id3v2(0x10, 20);
		data.extend(b"3DI\x04\x00\x10\x00\x00\x00\x14audio");

		let mut cursor = ByteCursor::new(Cursor::new(data)).unwrap();
		let results = find_id3v2(&mut cursor, false).unwrap();

		assert!(results.0.is_some());
		assert!(results.1.is_none());
		assert_eq!(cursor.tell(), 40);
	}

	#[test_log::test]
	fn id3v2_missing() {
		let mut cursor = ByteCursor::new(Cursor::new(vec![0xFF; 64])).unwrap();
		let results = find_id3v2(&mut cursor, true).unwrap();

		assert!(results.0.is_none());
		assert_eq!(cursor.tell(), 0);
	}

	#[test_log::test]
	fn id3v2_invalid_header() {
		let mut data = id3v2(0, 20);
		data[3] = 9;

		let mut cursor = ByteCursor::new(Cursor::new(data)).unwrap();
		let results = find_id3v2(&mut cursor, true).unwrap();

		assert!(results.0.is_none());
		assert_eq!(cursor.tell(), 0);
	}

	#[test_log::test]
	fn id3v2_truncated() {
		let mut data = id3v2(0, 200);
		data.truncate(50);

		let mut cursor = ByteCursor::new(Cursor::new(data)).unwrap();
		let err = find_id3v2(&mut cursor, true).unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::UnexpectedEof));
	}

	#[test_log::test]
	fn id3v1_found() {
		let mut data = vec![0; 300];
		let tag_start = data.len() - 128;
		data[tag_start..tag_start + 3].copy_from_slice(b"TAG");
		data[tag_start + 3..tag_start + 8].copy_from_slice(b"Title");

		let mut cursor = ByteCursor::new(Cursor::new(data)).unwrap();
		let results = find_id3v1(&mut cursor, true).unwrap();

		assert!(results.0.is_some());
		assert_eq!(results.1.unwrap().title(), Some("Title"));
		assert_eq!(cursor.tell(), 0);
	}

	#[test_log::test]
	fn id3v1_small_source() {
		let mut cursor = ByteCursor::new(Cursor::new(b"TAG".to_vec())).unwrap();
		let results = find_id3v1(&mut cursor, true).unwrap();

		assert!(results.0.is_none());
	}
}

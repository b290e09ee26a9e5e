//! A small OGG page reader
//!
//! This only covers what is needed to pull metadata out of an OGG stream: reading page
//! headers, assembling the first few packets of a stream, and locating the final
//! granule position near the end of a file.

mod error;
mod header;
mod packets;

use std::io::{Read, Seek, SeekFrom};

pub use error::{PageError, Result};
pub use header::PageHeader;
pub use packets::{Packets, PacketsIter};

/// The size of a page header, excluding the segment table
pub const PAGE_HEADER_SIZE: usize = 27;
/// The maximum page content size
pub const MAX_CONTENT_SIZE: usize = 65025;

/// The page's first packet is continued from the previous page
pub const CONTINUED_PACKET: u8 = 0x01;
/// The page is the first page of the logical bitstream
pub const CONTAINS_FIRST_PAGE_OF_BITSTREAM: u8 = 0x02;
/// The page is the last page of the logical bitstream
pub const CONTAINS_LAST_PAGE_OF_BITSTREAM: u8 = 0x04;

const GRANULE_UNSET: u64 = u64::MAX;

/// Find the largest absolute granule position from `start` to the end of the stream
///
/// The remainder of the stream is scanned for page capture patterns, so `start` does not
/// need to land on a page boundary. Pages with a granule position of `-1` (no packets finish
/// on the page) are ignored, as are pages from other streams when `stream_serial` is
/// provided.
///
/// `max_bytes` caps how much of the stream will be read. Callers are expected to pick a
/// `start` close to the end of the stream.
///
/// # Errors
///
/// * [`PageError::TooMuchData`] if more than `max_bytes` remain after `start`
/// * [`std::io::Error`]
pub fn max_granule_position<R>(
	data: &mut R,
	start: u64,
	stream_serial: Option<u32>,
	max_bytes: u64,
) -> Result<Option<u64>>
where
	R: Read + Seek,
{
	let end = data.seek(SeekFrom::End(0))?;
	if start >= end {
		return Ok(None);
	}

	if end - start > max_bytes {
		return Err(PageError::TooMuchData);
	}

	data.seek(SeekFrom::Start(start))?;

	let mut tail = Vec::new();
	data.take(end - start).read_to_end(&mut tail)?;

	let mut max = None;
	let mut pos = 0;
	while let Some(offset) = find_capture_pattern(&tail[pos..]) {
		let page_start = pos + offset;
		let Some(header) = tail.get(page_start..page_start + PAGE_HEADER_SIZE) else {
			break;
		};

		// Version, always 0
		if header[4] != 0 {
			pos = page_start + 1;
			continue;
		}

		let mut abgp = [0; 8];
		abgp.copy_from_slice(&header[6..14]);
		let abgp = u64::from_le_bytes(abgp);

		let mut serial = [0; 4];
		serial.copy_from_slice(&header[14..18]);
		let serial = u32::from_le_bytes(serial);

		if abgp != GRANULE_UNSET && stream_serial.is_none_or(|s| s == serial) {
			max = Some(max.map_or(abgp, |m: u64| m.max(abgp)));
		}

		pos = page_start + 1;
	}

	Ok(max)
}

fn find_capture_pattern(haystack: &[u8]) -> Option<usize> {
	haystack.windows(4).position(|w| w == b"OggS")
}

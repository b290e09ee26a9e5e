use crate::error::{PageError, Result};
use crate::{CONTAINS_FIRST_PAGE_OF_BITSTREAM, CONTAINS_LAST_PAGE_OF_BITSTREAM, CONTINUED_PACKET};

use std::io::{Read, Seek};

use byteorder::{LittleEndian, ReadBytesExt};

/// An OGG page header
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PageHeader {
	/// The position in the stream the page started at
	pub start: u64,
	pub(crate) header_type_flag: u8,
	/// The page's absolute granule position
	pub abgp: u64,
	/// The page's stream serial number
	pub stream_serial: u32,
	/// The page's sequence number
	pub sequence_number: u32,
	pub(crate) checksum: u32,
	pub(crate) segments: Vec<u8>,
}

impl PageHeader {
	/// Read a page header, leaving the reader at the start of the page's content
	///
	/// # Errors
	///
	/// * [`PageError::MissingMagic`]
	/// * [`PageError::InvalidVersion`]
	/// * [`PageError::BadSegmentCount`]
	/// * [`std::io::Error`]
	pub fn read<R>(data: &mut R) -> Result<Self>
	where
		R: Read + Seek,
	{
		let start = data.stream_position()?;

		let mut sig = [0; 4];
		data.read_exact(&mut sig)?;

		if &sig != b"OggS" {
			return Err(PageError::MissingMagic);
		}

		// Version, always 0
		let version = data.read_u8()?;

		if version != 0 {
			return Err(PageError::InvalidVersion);
		}

		let header_type_flag = data.read_u8()?;

		let abgp = data.read_u64::<LittleEndian>()?;
		let stream_serial = data.read_u32::<LittleEndian>()?;
		let sequence_number = data.read_u32::<LittleEndian>()?;
		let checksum = data.read_u32::<LittleEndian>()?;

		let segment_count = data.read_u8()?;

		if segment_count < 1 {
			return Err(PageError::BadSegmentCount);
		}

		let mut segments = vec![0; usize::from(segment_count)];
		data.read_exact(&mut segments)?;

		Ok(Self {
			start,
			header_type_flag,
			abgp,
			stream_serial,
			sequence_number,
			checksum,
			segments,
		})
	}

	/// Returns the page's header type flag
	pub fn header_type_flag(&self) -> u8 {
		self.header_type_flag
	}

	/// Returns the page's checksum
	pub fn checksum(&self) -> u32 {
		self.checksum
	}

	/// Returns the page's segment table
	pub fn segments(&self) -> &[u8] {
		&self.segments
	}

	/// The total size of the page's content, as described by the segment table
	pub fn content_size(&self) -> usize {
		self.segments.iter().map(|&b| usize::from(b)).sum()
	}

	/// The size of the header itself, including the segment table
	pub fn header_size(&self) -> usize {
		crate::PAGE_HEADER_SIZE + self.segments.len()
	}

	/// Whether the first packet on this page started on a previous page
	pub fn is_continuation(&self) -> bool {
		self.header_type_flag & CONTINUED_PACKET == CONTINUED_PACKET
	}

	/// Whether this is the first page of the logical bitstream
	pub fn is_first_page(&self) -> bool {
		self.header_type_flag & CONTAINS_FIRST_PAGE_OF_BITSTREAM == CONTAINS_FIRST_PAGE_OF_BITSTREAM
	}

	/// Whether this is the last page of the logical bitstream
	pub fn is_last_page(&self) -> bool {
		self.header_type_flag & CONTAINS_LAST_PAGE_OF_BITSTREAM == CONTAINS_LAST_PAGE_OF_BITSTREAM
	}
}

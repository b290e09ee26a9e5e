use crate::error::{PageError, Result};
use crate::header::PageHeader;

use std::fmt::{Debug, Formatter};
use std::io::{Read, Seek};

/// A container for packets in an OGG file
pub struct Packets {
	content: Vec<u8>,
	packet_ends: Vec<usize>,
}

impl Packets {
	/// Read a specific number of packets from a reader
	///
	/// Pages are consumed whole, so the reader is left at the end of the page that
	/// completed the final packet. A segment of exactly 255 bytes continues the current
	/// packet, on the next page if necessary.
	///
	/// `max_packet_size` caps the size of any single packet.
	///
	/// NOTE: A `count` of 0 will return an empty [`Packets`]
	///
	/// # Errors
	///
	/// * Unable to read the specified number of packets
	/// * A packet exceeds `max_packet_size`
	/// * A page has a bad header
	pub fn read_count<R>(data: &mut R, count: usize, max_packet_size: usize) -> Result<Self>
	where
		R: Read + Seek,
	{
		let mut content = Vec::new();
		let mut packet_ends = Vec::new();

		if count == 0 {
			return Ok(Self {
				content,
				packet_ends,
			});
		}

		let mut current_packet_size = 0_usize;
		let mut page_content = Vec::new();

		'outer: loop {
			let header = match PageHeader::read(data) {
				Ok(header) => header,
				Err(PageError::Io(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => break,
				Err(e) => return Err(e),
			};

			page_content.clear();
			page_content.resize(header.content_size(), 0);
			data.read_exact(&mut page_content)?;

			let mut page_pos = 0;
			for &segment in &header.segments {
				let segment = usize::from(segment);

				current_packet_size += segment;
				if current_packet_size > max_packet_size {
					return Err(PageError::TooMuchData);
				}

				content.extend_from_slice(&page_content[page_pos..page_pos + segment]);
				page_pos += segment;

				if segment < 255 {
					packet_ends.push(content.len());
					current_packet_size = 0;

					if packet_ends.len() == count {
						break 'outer;
					}
				}
			}
		}

		if packet_ends.len() != count {
			return Err(PageError::NotEnoughData);
		}

		// Drop any partial packet left over from the final page
		if let Some(&end) = packet_ends.last() {
			content.truncate(end);
		}

		Ok(Self {
			content,
			packet_ends,
		})
	}

	/// Returns the number of packets
	pub fn len(&self) -> usize {
		self.packet_ends.len()
	}

	/// Returns true if there are no packets
	pub fn is_empty(&self) -> bool {
		self.packet_ends.is_empty()
	}

	/// Gets the packet at a specified index, returning its contents
	///
	/// NOTE: This is zero-indexed
	pub fn get(&self, idx: usize) -> Option<&[u8]> {
		let end = *self.packet_ends.get(idx)?;
		let start = match idx {
			0 => 0,
			_ => self.packet_ends[idx - 1],
		};

		Some(&self.content[start..end])
	}

	/// Returns an iterator over the packets
	pub fn iter(&self) -> PacketsIter<'_> {
		PacketsIter {
			packets: self,
			idx: 0,
		}
	}
}

impl Debug for Packets {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Packets")
			.field("total_bytes", &self.content.len())
			.field("count", &self.packet_ends.len())
			.finish()
	}
}

/// An iterator over packets
pub struct PacketsIter<'a> {
	packets: &'a Packets,
	idx: usize,
}

impl<'a> Iterator for PacketsIter<'a> {
	type Item = &'a [u8];

	fn next(&mut self) -> Option<Self::Item> {
		let packet = self.packets.get(self.idx)?;
		self.idx += 1;

		Some(packet)
	}
}

impl<'a> IntoIterator for &'a Packets {
	type Item = &'a [u8];
	type IntoIter = PacketsIter<'a>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

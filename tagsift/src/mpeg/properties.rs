use super::header::{HEADER_MASK, Header, VbrHeader, VbrHeaderType};
use crate::config::ParseOptions;
use crate::error::Result;
use crate::util::cursor::ByteCursor;

use std::io::{Read, Seek, SeekFrom};

/// How much of the stream is buffered at once while scanning for frames
const SCAN_WINDOW: usize = 16 * 1024;

/// The audio properties found by scanning MPEG frames
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct MpegProperties {
	pub(crate) duration_seconds: Option<f64>,
	pub(crate) bitrate_kbps: Option<f64>,
	pub(crate) sample_rate: u32,
	pub(crate) channels: u8,
	pub(crate) is_vbr: bool,
	/// Offset of the first confirmed frame
	pub(crate) first_frame_offset: u64,
}

/// A window over the audio stream, refilled as the scan moves forward
struct ScanBuffer<'a, R> {
	reader: &'a mut ByteCursor<R>,
	stream_end: u64,
	start: u64,
	buf: Vec<u8>,
}

impl<'a, R> ScanBuffer<'a, R>
where
	R: Read + Seek,
{
	fn new(reader: &'a mut ByteCursor<R>, stream_end: u64) -> Self {
		Self {
			reader,
			stream_end,
			start: 0,
			buf: Vec::new(),
		}
	}

	/// Get `len` bytes at `pos`, or fewer if the stream ends first
	fn get(&mut self, pos: u64, len: usize) -> Result<&[u8]> {
		if pos >= self.stream_end {
			return Ok(&[]);
		}

		let buf_end = self.start + self.buf.len() as u64;
		if pos < self.start || (pos + len as u64 > buf_end && buf_end < self.stream_end) {
			let read_len = (self.stream_end - pos).min(SCAN_WINDOW.max(len) as u64) as usize;

			self.reader.seek(SeekFrom::Start(pos))?;
			self.buf.clear();
			self.buf.resize(read_len, 0);
			self.reader.read_exact(&mut self.buf)?;
			self.start = pos;
		}

		let offset = (pos - self.start) as usize;
		let end = (offset + len).min(self.buf.len());
		Ok(&self.buf[offset..end])
	}

	fn header_at(&mut self, pos: u64) -> Result<Option<u32>> {
		match self.get(pos, 4)? {
			&[a, b, c, d] => Ok(Some(u32::from_be_bytes([a, b, c, d]))),
			_ => Ok(None),
		}
	}
}

/// Estimate the duration of the stream between `stream_start` and `stream_end`
///
/// A Xing/Info/VBRI header in the first frame is trusted as is. Otherwise frames are counted
/// until `max_estimation_secs` worth of audio has been seen, after which the duration is
/// extrapolated from the mean frame size.
///
/// Returns `None` if no frame could be found.
pub(crate) fn read_properties<R>(
	reader: &mut ByteCursor<R>,
	stream_start: u64,
	stream_end: u64,
	file_length: u64,
	parse_options: ParseOptions,
) -> Result<Option<MpegProperties>>
where
	R: Read + Seek,
{
	let mut buf = ScanBuffer::new(reader, stream_end);

	let mut properties = MpegProperties::default();
	let mut first_frame: Option<(Header, u32)> = None;

	let mut frame_count = 0_u64;
	let mut frame_bytes = 0_u64;
	let mut bitrate_sum = 0_u64;
	let mut max_frames = u64::MAX;
	let mut capped = false;

	let mut pos = stream_start;
	loop {
		if frame_count >= max_frames {
			capped = true;
			break;
		}

		let Some(header_data) = buf.header_at(pos)? else {
			break;
		};

		// Never trust an unconfirmed sync, retry a byte later
		let Some(header) = Header::read(header_data) else {
			pos += 1;
			continue;
		};

		match first_frame {
			None => {
				// Check the following frame when there is one, a lone frame at the end is accepted
				if let Some(next_data) = buf.header_at(pos + u64::from(header.len))? {
					if header_data & HEADER_MASK != next_data & HEADER_MASK {
						pos += 1;
						continue;
					}
				}

				log::debug!("MPEG: Found the first frame at offset {pos}");

				properties.first_frame_offset = pos;
				properties.sample_rate = header.sample_rate;
				properties.channels = header.channels();

				let frame = buf.get(pos, header.len as usize)?;
				match VbrHeader::read(frame, &header) {
					Ok(Some(vbr_header)) if vbr_header.is_valid() => {
						log::debug!("MPEG: Valid VBR header; using it to calculate duration");
						apply_vbr_header(&mut properties, &header, vbr_header);
						return Ok(Some(properties));
					},
					Ok(Some(_)) => log::debug!("MPEG: VBR header is missing its frame or byte count"),
					Ok(None) => {},
					Err(e) => log::warn!("MPEG: Ignoring a bad VBR header: {e}"),
				}

				max_frames = (u64::from(parse_options.max_estimation_secs)
					* u64::from(header.sample_rate)
					/ u64::from(header.samples))
				.max(1);

				first_frame = Some((header, header_data));
			},
			Some((first_header, first_data)) => {
				if header_data & HEADER_MASK != first_data & HEADER_MASK {
					log::trace!("MPEG: Frame at offset {pos} doesn't match the stream, resyncing");
					pos += 1;
					continue;
				}

				if header.bitrate != first_header.bitrate {
					properties.is_vbr = true;
				}
			},
		}

		frame_count += 1;
		frame_bytes += u64::from(header.len);
		bitrate_sum += u64::from(header.bitrate);

		pos += u64::from(header.len);
	}

	let Some((first_header, _)) = first_frame else {
		log::warn!("MPEG: No valid frames found, unable to estimate duration");
		return Ok(None);
	};

	let samples_per_frame = f64::from(first_header.samples);
	let sample_rate = f64::from(first_header.sample_rate);

	let duration = if capped {
		let mean_frame_size = frame_bytes as f64 / frame_count as f64;
		log::debug!(
			"MPEG: Scan capped at {frame_count} frames, extrapolating from a mean frame size of \
			 {mean_frame_size:.2}"
		);

		file_length as f64 / mean_frame_size * samples_per_frame / sample_rate
	} else {
		frame_count as f64 * samples_per_frame / sample_rate
	};

	properties.duration_seconds = Some(duration);
	properties.bitrate_kbps = Some(bitrate_sum as f64 / frame_count as f64);

	Ok(Some(properties))
}

fn apply_vbr_header(properties: &mut MpegProperties, header: &Header, vbr_header: VbrHeader) {
	let duration = f64::from(vbr_header.frames) * f64::from(header.samples)
		/ f64::from(header.sample_rate);

	properties.duration_seconds = Some(duration);
	properties.bitrate_kbps = Some(f64::from(vbr_header.size) * 8.0 / duration / 1000.0);
	properties.is_vbr = matches!(vbr_header.ty, VbrHeaderType::Xing | VbrHeaderType::Vbri);
}

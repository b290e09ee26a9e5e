use super::constants::{BITRATES, PADDING_SIZES, SAMPLE_RATES, SAMPLES, SIDE_INFORMATION_SIZES};
use crate::error::Result;
use crate::macros::decode_err;

use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt};

pub(crate) fn verify_frame_sync(frame_sync: [u8; 2]) -> bool {
	frame_sync[0] == 0xFF && frame_sync[1] >> 5 == 0b111
}

// Used to compare the versions, layers, and sample rates of two frame headers.
// If they aren't equal, something is broken.
pub(super) const HEADER_MASK: u32 = 0xFFFE_0C00;

/// MPEG Audio version
#[derive(Default, PartialEq, Eq, Copy, Clone, Debug)]
pub(crate) enum MpegVersion {
	#[default]
	V1,
	V2,
	V2_5,
}

/// MPEG layer
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Layer {
	Layer1 = 1,
	Layer2 = 2,
	#[default]
	Layer3 = 3,
}

#[derive(Default, Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum ChannelMode {
	#[default]
	Stereo = 0,
	JointStereo = 1,
	/// Two independent mono channels
	DualChannel = 2,
	SingleChannel = 3,
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct Header {
	pub(crate) sample_rate: u32,
	/// The full frame length, including the header
	pub(crate) len: u32,
	/// Offset of the frame data (past the side information) from the frame start
	pub(crate) data_start: u32,
	pub(crate) samples: u16,
	/// Bitrate in kbps
	pub(crate) bitrate: u32,
	pub(crate) version: MpegVersion,
	pub(crate) layer: Layer,
	pub(crate) channel_mode: ChannelMode,
}

impl Header {
	/// Decode a 4 byte frame header
	///
	/// Returns `None` if the frame sync is missing or any field uses a reserved value.
	pub(super) fn read(data: u32) -> Option<Self> {
		if !verify_frame_sync([(data >> 24) as u8, (data >> 16) as u8]) {
			return None;
		}

		let version = match (data >> 19) & 0b11 {
			0b00 => MpegVersion::V2_5,
			0b10 => MpegVersion::V2,
			0b11 => MpegVersion::V1,
			_ => return None,
		};

		let version_index = if version == MpegVersion::V1 { 0 } else { 1 };

		let layer = match (data >> 17) & 0b11 {
			0b01 => Layer::Layer3,
			0b10 => Layer::Layer2,
			0b11 => Layer::Layer1,
			_ => {
				log::trace!("MPEG: Frame header uses a reserved layer");
				return None;
			},
		};

		let layer_index = (layer as usize).saturating_sub(1);

		// Free format (0) and the "bad" index (15) are both stored as 0
		let bitrate_index = (data >> 12) & 0xF;
		let bitrate = BITRATES[version_index][layer_index][bitrate_index as usize];
		if bitrate == 0 {
			return None;
		}

		let sample_rate_index = (data >> 10) & 0b11;
		let sample_rate = match sample_rate_index {
			// This is invalid
			0b11 => return None,
			_ => SAMPLE_RATES[version as usize][sample_rate_index as usize],
		};

		let mut padding = 0;
		if (data >> 9) & 1 == 1 {
			padding = u32::from(PADDING_SIZES[layer_index]);
		}

		let channel_mode = match (data >> 6) & 0b11 {
			0b00 => ChannelMode::Stereo,
			0b01 => ChannelMode::JointStereo,
			0b10 => ChannelMode::DualChannel,
			_ => ChannelMode::SingleChannel,
		};

		let samples = SAMPLES[layer_index][version_index];
		let len = (u32::from(samples) * bitrate * 125 / sample_rate) + padding;

		Some(Header {
			sample_rate,
			len,
			data_start: SIDE_INFORMATION_SIZES[version_index][channel_mode as usize] + 4,
			samples,
			bitrate,
			version,
			layer,
			channel_mode,
		})
	}

	pub(super) fn channels(&self) -> u8 {
		if self.channel_mode == ChannelMode::SingleChannel {
			1
		} else {
			2
		}
	}
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(super) enum VbrHeaderType {
	Xing,
	Info,
	Vbri,
}

#[derive(Copy, Clone, Debug)]
pub(super) struct VbrHeader {
	pub(super) ty: VbrHeaderType,
	pub(super) frames: u32,
	pub(super) size: u32,
}

impl VbrHeader {
	/// Read a Xing/Info header (at the start of the frame data) or a VBRI header (32 bytes past
	/// the frame header)
	pub(super) fn read(frame: &[u8], header: &Header) -> Result<Option<Self>> {
		let xing_start = header.data_start as usize;
		if let Some(mut reader) = frame.get(xing_start..) {
			if reader.len() >= 4 && (&reader[..4] == b"Xing" || &reader[..4] == b"Info") {
				if reader.len() < 16 {
					decode_err!(@BAIL Mpeg, "Xing header has an invalid size (< 16)");
				}

				let mut ident = [0; 4];
				reader.read_exact(&mut ident)?;

				let flags = reader.read_u32::<BigEndian>()?;
				if flags & 0x03 != 0x03 {
					log::debug!(
						"MPEG: Xing header doesn't have required flags set (0x0001 and 0x0002)"
					);
					return Ok(None);
				}

				let frames = reader.read_u32::<BigEndian>()?;
				let size = reader.read_u32::<BigEndian>()?;

				let ty = if &ident == b"Xing" {
					VbrHeaderType::Xing
				} else {
					VbrHeaderType::Info
				};

				return Ok(Some(Self { ty, frames, size }));
			}
		}

		if let Some(mut reader) = frame.get(36..) {
			if reader.len() >= 4 && &reader[..4] == b"VBRI" {
				if reader.len() < 18 {
					decode_err!(@BAIL Mpeg, "VBRI header has an invalid size (< 18)");
				}

				// Skip the identifier and 6 bytes
				// Version ID (2)
				// Delay float (2)
				// Quality indicator (2)
				let _info = reader.read_uint::<BigEndian>(4)?;
				let _info = reader.read_uint::<BigEndian>(6)?;

				let size = reader.read_u32::<BigEndian>()?;
				let frames = reader.read_u32::<BigEndian>()?;

				return Ok(Some(Self {
					ty: VbrHeaderType::Vbri,
					frames,
					size,
				}));
			}
		}

		Ok(None)
	}

	pub(super) fn is_valid(&self) -> bool {
		self.frames > 0 && self.size > 0
	}
}

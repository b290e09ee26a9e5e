//! The unified tag record
//!
//! Every parser produces a [`TagRecord`]. When a file holds more than one source of
//! metadata (an ID3v2 tag and an ID3v1 trailer, or an ID3 chunk inside a WAV file), each source
//! is read into its own record and the records are combined with [`TagRecord::merge`].

pub(crate) mod utils;

use crate::picture::{Picture, PictureType};

/// The metadata and audio properties extracted from a single file
///
/// All fields are unset unless they were found in the file. A record with every field unset is
/// valid output for a file with no tags.
#[derive(Debug, Clone, Default, PartialEq)]
#[non_exhaustive]
pub struct TagRecord {
	pub(crate) track: Option<u32>,
	pub(crate) track_total: Option<u32>,
	pub(crate) disc: Option<u32>,
	pub(crate) disc_total: Option<u32>,
	pub(crate) title: Option<String>,
	pub(crate) artist: Option<String>,
	pub(crate) album_artist: Option<String>,
	pub(crate) album: Option<String>,
	pub(crate) year: Option<String>,
	pub(crate) genre: Option<String>,
	pub(crate) comment: Option<String>,
	pub(crate) duration_seconds: Option<f64>,
	pub(crate) bitrate_kbps: Option<f64>,
	pub(crate) samplerate_hz: Option<u32>,
	pub(crate) channels: Option<u8>,
	pub(crate) bit_depth: Option<u8>,
	pub(crate) audio_offset_bytes: Option<u64>,
	pub(crate) is_vbr: bool,
	pub(crate) picture: Option<Picture>,
	pub(crate) file_size_bytes: u64,
}

macro_rules! fill_unset {
	($dest:ident, $src:ident; $($field:ident),+ $(,)?) => {
		$(
			if $dest.$field.is_none() {
				$dest.$field = $src.$field;
			}
		)+
	};
}

impl TagRecord {
	pub(crate) fn with_file_size(file_size_bytes: u64) -> Self {
		Self {
			file_size_bytes,
			..Self::default()
		}
	}

	/// Combine two records, keeping every field already set in `self`
	///
	/// Fields that are unset in `self` are taken from `other`, so the first source to set a field
	/// wins and later sources only supplement it. `is_vbr` is set if either record has it set.
	///
	/// # Examples
	///
	/// ```rust
	/// use tagsift::tag::TagRecord;
	///
	/// let record = TagRecord::default();
	/// let merged = record.clone().merge(TagRecord::default());
	/// assert_eq!(record, merged);
	/// ```
	#[must_use]
	pub fn merge(mut self, other: TagRecord) -> TagRecord {
		fill_unset!(
			self, other;
			track,
			track_total,
			disc,
			disc_total,
			title,
			artist,
			album_artist,
			album,
			year,
			genre,
			comment,
			duration_seconds,
			bitrate_kbps,
			samplerate_hz,
			channels,
			bit_depth,
			audio_offset_bytes,
			picture,
		);

		self.is_vbr |= other.is_vbr;
		if self.file_size_bytes == 0 {
			self.file_size_bytes = other.file_size_bytes;
		}

		self
	}

	/// Keep `picture`, unless a front cover is already present
	///
	/// A front cover replaces any other picture type found earlier.
	pub(crate) fn offer_picture(&mut self, picture: Picture) {
		match &self.picture {
			None => self.picture = Some(picture),
			Some(existing)
				if existing.pic_type() != PictureType::CoverFront
					&& picture.pic_type() == PictureType::CoverFront =>
			{
				self.picture = Some(picture);
			},
			Some(_) => {},
		}
	}

	/// Whether no tag or audio property was found
	pub fn is_empty(&self) -> bool {
		*self == Self::with_file_size(self.file_size_bytes)
	}

	/// The track number
	pub fn track(&self) -> Option<u32> {
		self.track
	}

	/// The total number of tracks
	pub fn track_total(&self) -> Option<u32> {
		self.track_total
	}

	/// The disc number
	pub fn disc(&self) -> Option<u32> {
		self.disc
	}

	/// The total number of discs
	pub fn disc_total(&self) -> Option<u32> {
		self.disc_total
	}

	/// The track title
	pub fn title(&self) -> Option<&str> {
		self.title.as_deref()
	}

	/// The track artist
	pub fn artist(&self) -> Option<&str> {
		self.artist.as_deref()
	}

	/// The album artist
	pub fn album_artist(&self) -> Option<&str> {
		self.album_artist.as_deref()
	}

	/// The album title
	pub fn album(&self) -> Option<&str> {
		self.album.as_deref()
	}

	/// The year, as written in the file
	///
	/// Formats disagree on whether this is a number or free text (`"2004-05-01"`), so it is kept
	/// as a string.
	pub fn year(&self) -> Option<&str> {
		self.year.as_deref()
	}

	/// The genre, with numeric ID3 genre references resolved to their names
	pub fn genre(&self) -> Option<&str> {
		self.genre.as_deref()
	}

	/// A comment or description
	pub fn comment(&self) -> Option<&str> {
		self.comment.as_deref()
	}

	/// The duration in seconds
	pub fn duration_seconds(&self) -> Option<f64> {
		self.duration_seconds
	}

	/// The bitrate in kbps
	pub fn bitrate_kbps(&self) -> Option<f64> {
		self.bitrate_kbps
	}

	/// The sample rate in Hz
	pub fn samplerate_hz(&self) -> Option<u32> {
		self.samplerate_hz
	}

	/// The channel count
	pub fn channels(&self) -> Option<u8> {
		self.channels
	}

	/// The bits per sample
	pub fn bit_depth(&self) -> Option<u8> {
		self.bit_depth
	}

	/// The offset of the first byte of audio data
	pub fn audio_offset_bytes(&self) -> Option<u64> {
		self.audio_offset_bytes
	}

	/// Whether the audio is encoded with a variable bitrate
	pub fn is_vbr(&self) -> bool {
		self.is_vbr
	}

	/// The embedded picture, only read when requested with
	/// [`ParseOptions::read_cover_art`](crate::config::ParseOptions::read_cover_art)
	pub fn picture(&self) -> Option<&Picture> {
		self.picture.as_ref()
	}

	/// The raw bytes of the embedded picture
	pub fn image_bytes(&self) -> Option<&[u8]> {
		self.picture.as_ref().map(Picture::data)
	}

	/// The size of the file in bytes
	pub fn file_size_bytes(&self) -> u64 {
		self.file_size_bytes
	}
}

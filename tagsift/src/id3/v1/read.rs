use super::constants::ID3V1_TAG_MARKER;
use crate::tag::TagRecord;
use crate::tag::utils::genre_by_index;
use crate::util::text::{latin1_decode, non_empty, trim_padding};

/// Parse a 128 byte ID3v1 tag, including the `TAG` marker
pub(crate) fn parse_id3v1(tag: [u8; 128]) -> TagRecord {
	let mut record = TagRecord::default();

	if tag[..3] != ID3V1_TAG_MARKER {
		log::warn!("ID3v1 tag is missing its marker, ignoring");
		return record;
	}

	record.title = decode_field(&tag[3..33]);
	record.artist = decode_field(&tag[33..63]);
	record.album = decode_field(&tag[63..93]);
	record.year = decode_field(&tag[93..97]);

	// ID3v1.1 steals the last 2 bytes of the comment for the track number. A track of 0 is invalid.
	let comment_range = if tag[125] == 0 && tag[126] != 0 {
		record.track = Some(u32::from(tag[126]));
		97..125
	} else {
		97..127
	};
	record.comment = decode_field(&tag[comment_range]);

	record.genre = genre_by_index(usize::from(tag[127])).map(str::to_owned);
	if record.genre.is_none() && tag[127] != 0xFF {
		log::debug!("ID3v1 genre index {} is out of range", tag[127]);
	}

	record
}

fn decode_field(data: &[u8]) -> Option<String> {
	// Fields are NUL terminated, anything after the terminator is junk
	let end = data.iter().position(|&b| b == 0).unwrap_or(data.len());
	non_empty(trim_padding(&latin1_decode(&data[..end])).to_owned())
}

use crate::tag::TagRecord;
use crate::tag::utils::split_number_pair;
use crate::util::text::{latin1_decode, non_empty, utf8_decode};

use byteorder::{LittleEndian, ReadBytesExt};

/// Parse the contents of a `LIST` `INFO` chunk (without the `INFO` identifier)
///
/// Items that run past the end of the list, or that aren't made of ASCII key characters, end
/// the list. Whatever was found up to that point is kept.
pub(super) fn parse_riff_info(mut data: &[u8]) -> TagRecord {
	let mut record = TagRecord::default();

	while data.len() >= 8 {
		let key = [data[0], data[1], data[2], data[3]];
		data = &data[4..];

		if !verify_key(&key) {
			log::warn!("WAV: RIFF INFO item key contains invalid characters, ending the list");
			break;
		}

		let Ok(size) = data.read_u32::<LittleEndian>() else {
			break;
		};
		let size = size as usize;

		if size > data.len() {
			log::warn!("WAV: RIFF INFO item runs past the end of the list");
			break;
		}

		let (value, rest) = data.split_at(size);
		// Skip the padding byte, if there is one
		data = if size % 2 != 0 && !rest.is_empty() {
			&rest[1..]
		} else {
			rest
		};

		// RIFF INFO has no standard text encoding, values that aren't UTF-8 are usually Latin-1
		let end = value.iter().position(|&b| b == 0).unwrap_or(value.len());
		let value = &value[..end];
		let value = utf8_decode(value).unwrap_or_else(|_| latin1_decode(value));
		let Some(value) = non_empty(value.trim().to_owned()) else {
			continue;
		};

		insert_item(&mut record, &key, value);
	}

	record
}

fn insert_item(record: &mut TagRecord, key: &[u8; 4], value: String) {
	let slot = match key {
		b"INAM" => &mut record.title,
		b"IART" => &mut record.artist,
		b"IPRD" => &mut record.album,
		b"ICRD" => &mut record.year,
		b"IGNR" => &mut record.genre,
		b"ICMT" => &mut record.comment,
		b"ITRK" | b"IPRT" => {
			let (track, total) = split_number_pair(&value);
			if record.track.is_none() {
				record.track = track;
			}
			if record.track_total.is_none() {
				record.track_total = total;
			}
			return;
		},
		_ => {
			log::trace!("WAV: Ignoring RIFF INFO item \"{}\"", String::from_utf8_lossy(key));
			return;
		},
	};

	if slot.is_none() {
		*slot = Some(value);
	}
}

fn verify_key(key: &[u8; 4]) -> bool {
	key.iter()
		.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

use crate::config::ParseOptions;
use crate::error::Result;
use crate::macros::{err, try_vec};
use crate::picture::{MimeType, Picture, PictureType};
use crate::tag::TagRecord;
use crate::tag::utils::{parse_number, resolve_genre, split_number_pair};
use crate::util::text::{TextEncoding, non_empty, split_terminated, trim_end_nulls, utf16le_decode};

use byteorder::{LittleEndian, ReadBytesExt};

/// The value types of an extended content descriptor
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum DescriptorValueType {
	String,
	Bytes,
	Bool,
	DWord,
	QWord,
	Word,
}

impl DescriptorValueType {
	fn from_u16(value: u16) -> Option<Self> {
		match value {
			0 => Some(Self::String),
			1 => Some(Self::Bytes),
			2 => Some(Self::Bool),
			3 => Some(Self::DWord),
			4 => Some(Self::QWord),
			5 => Some(Self::Word),
			_ => None,
		}
	}
}

/// Parse a content description object
///
/// Of its five fields, only the title, author and description are used.
pub(super) fn parse_content_description(content: &[u8]) -> Result<TagRecord> {
	let mut reader = content;

	let title_len = reader.read_u16::<LittleEndian>()?;
	let author_len = reader.read_u16::<LittleEndian>()?;
	let copyright_len = reader.read_u16::<LittleEndian>()?;
	let description_len = reader.read_u16::<LittleEndian>()?;
	let _rating_len = reader.read_u16::<LittleEndian>()?;

	let mut record = TagRecord::default();

	record.title = utf16_field(take(&mut reader, usize::from(title_len))?);
	record.artist = utf16_field(take(&mut reader, usize::from(author_len))?);
	let _copyright = take(&mut reader, usize::from(copyright_len))?;
	record.comment = utf16_field(take(&mut reader, usize::from(description_len))?);

	Ok(record)
}

/// Parse an extended content description object
///
/// Descriptors that can't be decoded are skipped, a descriptor that runs past the end of the
/// object ends the list.
pub(super) fn parse_extended_content_description(
	content: &[u8],
	parse_options: ParseOptions,
) -> Result<TagRecord> {
	let mut reader = content;
	let mut record = TagRecord::default();

	let descriptor_count = reader.read_u16::<LittleEndian>()?;
	log::trace!("ASF: Reading {descriptor_count} extended content descriptors");

	for _ in 0..descriptor_count {
		let Ok(descriptor) = read_descriptor(&mut reader) else {
			log::warn!("ASF: Extended content descriptor runs past the end of the object");
			break;
		};

		let (name, value_type, value) = descriptor;
		let Some(value_type) = DescriptorValueType::from_u16(value_type) else {
			log::warn!("ASF: Skipping descriptor \"{name}\" with unknown value type {value_type}");
			continue;
		};

		if name == "WM/Picture" {
			if !parse_options.read_cover_art {
				continue;
			}

			match parse_wm_picture(value) {
				Ok(picture) => record.offer_picture(picture),
				Err(e) => log::warn!("ASF: Unable to read WM/Picture, discarding: {e}"),
			}

			continue;
		}

		let Some(value) = descriptor_text(value_type, value) else {
			continue;
		};

		insert_descriptor(&mut record, &name, value);
	}

	Ok(record)
}

fn read_descriptor<'a>(reader: &mut &'a [u8]) -> Result<(String, u16, &'a [u8])> {
	let name_len = reader.read_u16::<LittleEndian>()?;
	let name_bytes = take(reader, usize::from(name_len))?;

	let value_type = reader.read_u16::<LittleEndian>()?;
	let value_len = reader.read_u16::<LittleEndian>()?;
	let value = take(reader, usize::from(value_len))?;

	let mut name = utf16le_decode(name_bytes)?;
	trim_end_nulls(&mut name);

	Ok((name, value_type, value))
}

fn descriptor_text(value_type: DescriptorValueType, mut value: &[u8]) -> Option<String> {
	match value_type {
		DescriptorValueType::String => utf16_field(value),
		DescriptorValueType::Bytes => None,
		// Integers are read by their actual length, some writers use the wrong width
		_ => {
			let number = match value.len() {
				2 => u64::from(value.read_u16::<LittleEndian>().ok()?),
				4 => u64::from(value.read_u32::<LittleEndian>().ok()?),
				8 => value.read_u64::<LittleEndian>().ok()?,
				len => {
					log::warn!("ASF: Integer descriptor has an invalid length ({len})");
					return None;
				},
			};

			Some(number.to_string())
		},
	}
}

fn insert_descriptor(record: &mut TagRecord, name: &str, value: String) {
	log::trace!("ASF: Found descriptor \"{name}\"");

	match name {
		"WM/TrackNumber" => {
			if record.track.is_none() {
				record.track = parse_number(&value);
			}
		},
		"WM/PartOfSet" => {
			let (disc, disc_total) = split_number_pair(&value);
			if record.disc.is_none() {
				record.disc = disc;
			}
			if record.disc_total.is_none() {
				record.disc_total = disc_total;
			}
		},
		"WM/Genre" => {
			if record.genre.is_none() {
				record.genre = resolve_genre(&value);
			}
		},
		_ => {
			let slot = match name {
				"WM/Year" => &mut record.year,
				"WM/AlbumArtist" => &mut record.album_artist,
				"WM/AlbumTitle" => &mut record.album,
				_ => return,
			};

			if slot.is_none() {
				*slot = Some(value);
			}
		},
	}
}

// Picture type (1), data length (4), MIME type and description (UTF-16 NUL terminated), data
fn parse_wm_picture(mut content: &[u8]) -> Result<Picture> {
	let pic_type = content.read_u8()?;
	let data_len = content.read_u32::<LittleEndian>()? as usize;

	let mime_type = take_terminated(&mut content)?;
	let description = take_terminated(&mut content)?;

	let data = take(&mut content, data_len)?;
	if data.is_empty() {
		err!(MalformedField("WM/Picture: empty image"));
	}

	let mut owned = try_vec![0; data.len()];
	owned.copy_from_slice(data);

	Ok(Picture::new(
		PictureType::from_u8(pic_type),
		mime_type.map(|mime| MimeType::from_str(&mime)),
		description,
		owned,
	))
}

fn take_terminated(reader: &mut &[u8]) -> Result<Option<String>> {
	let data: &[u8] = *reader;
	let (text, consumed) = split_terminated(data, TextEncoding::UTF16);

	let text = utf16le_decode(text)?;
	*reader = &data[consumed..];

	Ok(non_empty(text))
}

fn take<'a>(reader: &mut &'a [u8], len: usize) -> Result<&'a [u8]> {
	let data: &'a [u8] = *reader;
	if len > data.len() {
		err!(UnexpectedEof);
	}

	let (value, rest) = data.split_at(len);
	*reader = rest;
	Ok(value)
}

fn utf16_field(bytes: &[u8]) -> Option<String> {
	match utf16le_decode(bytes) {
		Ok(mut text) => {
			trim_end_nulls(&mut text);
			non_empty(text.trim().to_owned())
		},
		Err(_) => {
			log::warn!("ASF: Skipping a field with invalid UTF-16");
			None
		},
	}
}

#[cfg(test)]
pub(super) fn utf16(text: &str) -> Vec<u8> {
	let mut bytes: Vec<u8> = text.encode_utf16().flat_map(u16::to_le_bytes).collect();
	bytes.extend([0, 0]);
	bytes
}

#[cfg(test)]
pub(super) fn content_description(title: &str, author: &str, description: &str) -> Vec<u8> {
	let (title, author, description) = (utf16(title), utf16(author), utf16(description));

	let mut content = Vec::new();
	for len in [title.len(), author.len(), 0, description.len(), 0] {
		content.extend((len as u16).to_le_bytes());
	}

	content.extend(title);
	content.extend(author);
	content.extend(description);
	content
}

/// Build an extended content description object from `(name, value type, value)` descriptors
#[cfg(test)]
pub(super) fn extended_content_description(descriptors: &[(&str, u16, Vec<u8>)]) -> Vec<u8> {
	let mut content = (descriptors.len() as u16).to_le_bytes().to_vec();

	for (name, value_type, value) in descriptors {
		let name = utf16(name);
		content.extend((name.len() as u16).to_le_bytes());
		content.extend(name);
		content.extend(value_type.to_le_bytes());
		content.extend((value.len() as u16).to_le_bytes());
		content.extend(value);
	}

	content
}

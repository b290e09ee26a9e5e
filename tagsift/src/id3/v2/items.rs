use super::frame::Frame;
use super::header::Id3v2Version;
use crate::error::Result;
use crate::macros::{err, id3v2_err, try_vec};
use crate::picture::{MimeType, Picture, PictureType};
use crate::tag::TagRecord;
use crate::tag::utils::{join_multi_value, resolve_genre, split_number_pair};
use crate::util::text::{TextEncoding, decode_text, latin1_decode, split_terminated};

/// Collects frames into a [`TagRecord`]
///
/// The first frame to provide a field wins. Comments with a description (such as iTunes'
/// `iTunNORM`) are only used if no comment without a description exists.
#[derive(Default)]
pub(super) struct FrameCollector {
	record: TagRecord,
	described_comment: Option<String>,
}

impl FrameCollector {
	pub(super) fn insert(&mut self, frame: &Frame<'_>, version: Id3v2Version) -> Result<()> {
		let record = &mut self.record;
		let content = &*frame.content;

		match frame.id {
			"TIT2" | "TT2" => fill(&mut record.title, text_frame(content)?),
			"TPE1" | "TP1" => fill(&mut record.artist, text_frame(content)?),
			"TPE2" | "TP2" => fill(&mut record.album_artist, text_frame(content)?),
			"TALB" | "TAL" => fill(&mut record.album, text_frame(content)?),
			"TYER" | "TYE" | "TDRC" => fill(&mut record.year, text_frame(content)?),
			"TCON" | "TCO" => fill(&mut record.genre, genre_frame(content)?),
			"TRCK" | "TRK" => {
				if let Some(value) = text_frame(content)? {
					let (track, total) = split_number_pair(&value);
					fill(&mut record.track, track);
					fill(&mut record.track_total, total);
				}
			},
			"TPOS" | "TPA" => {
				if let Some(value) = text_frame(content)? {
					let (disc, total) = split_number_pair(&value);
					fill(&mut record.disc, disc);
					fill(&mut record.disc_total, total);
				}
			},
			"COMM" | "COM" => {
				let Some((description, text)) = comment_frame(content)? else {
					return Ok(());
				};

				if description.is_empty() {
					fill(&mut record.comment, Some(text));
				} else {
					fill(&mut self.described_comment, Some(text));
				}
			},
			"APIC" => record.offer_picture(attached_picture(content)?),
			"PIC" if version == Id3v2Version::V2 => {
				record.offer_picture(attached_picture_v2(content)?);
			},
			_ => log::trace!("Ignoring frame \"{}\"", frame.id),
		}

		Ok(())
	}

	pub(super) fn finish(self) -> TagRecord {
		let mut record = self.record;
		fill(&mut record.comment, self.described_comment);
		record
	}
}

fn fill<T>(slot: &mut Option<T>, value: Option<T>) {
	if slot.is_none() {
		*slot = value;
	}
}

fn encoding(byte: u8) -> Result<TextEncoding> {
	match TextEncoding::from_u8(byte) {
		Some(encoding) => Ok(encoding),
		None => err!(TextDecode("Found invalid encoding")),
	}
}

/// A 1 byte text encoding followed by the text, with values still NUL separated
fn raw_text(content: &[u8]) -> Result<String> {
	let Some((&encoding_byte, text)) = content.split_first() else {
		id3v2_err!(@BAIL BadFrameLength);
	};

	decode_text(text, encoding(encoding_byte)?)
}

fn text_frame(content: &[u8]) -> Result<Option<String>> {
	let text = join_multi_value(&raw_text(content)?);
	let text = text.trim();

	if text.is_empty() {
		return Ok(None);
	}

	Ok(Some(text.to_owned()))
}

/// Every value is resolved on its own, so numeric references never reach the record
fn genre_frame(content: &[u8]) -> Result<Option<String>> {
	Ok(resolve_genre(&raw_text(content)?))
}

/// Encoding, 3 byte language, terminated description, text
fn comment_frame(content: &[u8]) -> Result<Option<(String, String)>> {
	if content.len() < 4 {
		id3v2_err!(@BAIL BadFrameLength);
	}

	let encoding = encoding(content[0])?;
	let rest = &content[4..];

	let (description, consumed) = split_terminated(rest, encoding);
	let description = decode_text(description, encoding)?;
	let text = decode_text(&rest[consumed..], encoding)?;

	if text.is_empty() {
		return Ok(None);
	}

	Ok(Some((description, text)))
}

/// Encoding, terminated MIME type, picture type, terminated description, picture data
fn attached_picture(content: &[u8]) -> Result<Picture> {
	let Some((&encoding_byte, rest)) = content.split_first() else {
		id3v2_err!(@BAIL BadFrameLength);
	};
	let encoding = encoding(encoding_byte)?;

	let (mime_type, consumed) = split_terminated(rest, TextEncoding::Latin1);
	let mime_type = latin1_decode(mime_type);
	let rest = &rest[consumed..];

	let Some((&pic_type, rest)) = rest.split_first() else {
		id3v2_err!(@BAIL BadFrameLength);
	};

	picture_from_parts(
		encoding,
		(!mime_type.is_empty()).then(|| MimeType::from_str(&mime_type)),
		pic_type,
		rest,
	)
}

/// Encoding, 3 byte image format, picture type, terminated description, picture data
fn attached_picture_v2(content: &[u8]) -> Result<Picture> {
	if content.len() < 5 {
		id3v2_err!(@BAIL BadFrameLength);
	}

	let encoding = encoding(content[0])?;
	let format = [content[1], content[2], content[3]];

	picture_from_parts(
		encoding,
		Some(MimeType::from_id3v22_format(format)),
		content[4],
		&content[5..],
	)
}

fn picture_from_parts(
	encoding: TextEncoding,
	mime_type: Option<MimeType>,
	pic_type: u8,
	rest: &[u8],
) -> Result<Picture> {
	let (description, consumed) = split_terminated(rest, encoding);
	let description = decode_text(description, encoding)
		.ok()
		.filter(|d| !d.is_empty());

	let image = &rest[consumed..];
	if image.is_empty() {
		err!(MalformedField("Picture: no image data"));
	}

	let mut data = try_vec![0; image.len()];
	data.copy_from_slice(image);

	Ok(Picture::new(
		PictureType::from_u8(pic_type),
		mime_type,
		description,
		data,
	))
}

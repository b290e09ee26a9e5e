use crate::error::{ErrorKind, Result, TagsiftError};
use crate::macros::err;

/// The text encoding used by ID3v2 text frames
#[derive(Debug, Clone, Eq, PartialEq, Copy, Hash)]
#[repr(u8)]
pub(crate) enum TextEncoding {
	/// ISO-8859-1
	Latin1 = 0,
	/// UTF-16 with a byte order mark
	UTF16 = 1,
	/// UTF-16 big endian
	UTF16BE = 2,
	/// UTF-8
	UTF8 = 3,
}

impl TextEncoding {
	/// Get a `TextEncoding` from a u8, must be 0-3 inclusive
	pub(crate) fn from_u8(byte: u8) -> Option<Self> {
		match byte {
			0 => Some(Self::Latin1),
			1 => Some(Self::UTF16),
			2 => Some(Self::UTF16BE),
			3 => Some(Self::UTF8),
			_ => None,
		}
	}

	/// The size of a string terminator in this encoding
	pub(crate) fn terminator_len(self) -> usize {
		match self {
			Self::Latin1 | Self::UTF8 => 1,
			Self::UTF16 | Self::UTF16BE => 2,
		}
	}
}

/// Decode `bytes` in full, trimming any trailing NULs
pub(crate) fn decode_text(bytes: &[u8], encoding: TextEncoding) -> Result<String> {
	match encoding {
		TextEncoding::Latin1 => Ok(latin1_decode(bytes)),
		TextEncoding::UTF16 => match bytes {
			[0xFE, 0xFF, rest @ ..] => utf16_decode_bytes(rest, u16::from_be_bytes),
			[0xFF, 0xFE, rest @ ..] => utf16_decode_bytes(rest, u16::from_le_bytes),
			// No BOM, assume little endian
			_ => utf16_decode_bytes(bytes, u16::from_le_bytes),
		},
		TextEncoding::UTF16BE => utf16_decode_bytes(bytes, u16::from_be_bytes),
		TextEncoding::UTF8 => utf8_decode(bytes),
	}
}

/// Split off a terminated string from the start of `bytes`
///
/// Returns the string's bytes (without the terminator) and the number of bytes consumed,
/// including the terminator if one was found. UTF-16 terminators must be aligned.
pub(crate) fn split_terminated(bytes: &[u8], encoding: TextEncoding) -> (&[u8], usize) {
	match encoding.terminator_len() {
		1 => match bytes.iter().position(|&b| b == 0) {
			Some(end) => (&bytes[..end], end + 1),
			None => (bytes, bytes.len()),
		},
		_ => match bytes.chunks_exact(2).position(|c| c == [0, 0]) {
			Some(idx) => (&bytes[..idx * 2], idx * 2 + 2),
			None => (bytes, bytes.len()),
		},
	}
}

pub(crate) fn latin1_decode(bytes: &[u8]) -> String {
	let mut text = bytes.iter().map(|c| char::from(*c)).collect::<String>();
	trim_end_nulls(&mut text);
	text
}

pub(crate) fn utf8_decode(bytes: &[u8]) -> Result<String> {
	match std::str::from_utf8(bytes) {
		Ok(text) => Ok(text.trim_end_matches('\0').to_owned()),
		Err(_) => err!(TextDecode("Expected a UTF-8 string")),
	}
}

/// Decode UTF-16 with the given byte order
///
/// A dangling odd byte (usually half of a bad terminator) is dropped, as are any BOMs
/// separating multiple strings.
pub(crate) fn utf16_decode_bytes(bytes: &[u8], endianness: fn([u8; 2]) -> u16) -> Result<String> {
	if bytes.is_empty() {
		return Ok(String::new());
	}

	if bytes.len() % 2 != 0 {
		log::trace!("UTF-16 string has an odd length, dropping the final byte");
	}

	let unverified: Vec<u16> = bytes
		.chunks_exact(2)
		.filter_map(|c| match c {
			[0xFF, 0xFE] | [0xFE, 0xFF] => None,
			[a, b] => Some(endianness([*a, *b])),
			_ => None,
		})
		.collect();

	String::from_utf16(&unverified)
		.map(|mut text| {
			trim_end_nulls(&mut text);
			text
		})
		.map_err(|_| TagsiftError::new(ErrorKind::TextDecode("Given an invalid UTF-16 string")))
}

pub(crate) fn utf16le_decode(bytes: &[u8]) -> Result<String> {
	utf16_decode_bytes(bytes, u16::from_le_bytes)
}

pub(crate) fn trim_end_nulls(text: &mut String) {
	if text.ends_with('\0') {
		let new_len = text.trim_end_matches('\0').len();
		text.truncate(new_len);
	}
}

/// Trim the NUL and space padding used by fixed-width fields
pub(crate) fn trim_padding(text: &str) -> &str {
	text.trim_end_matches(['\0', ' '])
}

/// Turn an empty string into `None`
pub(crate) fn non_empty(text: String) -> Option<String> {
	if text.is_empty() { None } else { Some(text) }
}

use super::constants::{OPUSHEAD, OPUSTAGS, VORBIS_COMMENT_HEAD, VORBIS_IDENT_HEAD};
use super::{opus, vorbis};
use crate::config::{ParseOptions, global_options};
use crate::error::Result;
use crate::macros::{decode_err, err};
use crate::picture::{Picture, PictureType};
use crate::tag::TagRecord;
use crate::tag::utils::split_number_pair;
use crate::util::cursor::ByteCursor;
use crate::util::text::utf8_decode;

use std::io::{Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};
use data_encoding::BASE64;
use ogg_pager::{Packets, PageError, PageHeader};

/// Properties taken from an identification header
pub(super) struct StreamInfo {
	pub(super) sample_rate: u32,
	pub(super) channels: u8,
	pub(super) bitrate_kbps: Option<f64>,
	/// Samples to discard from the start of the stream
	pub(super) pre_skip: u64,
	/// The rate granule positions are counted at
	pub(super) granule_rate: u32,
}

/// Read a Vorbis comment block (vendor string and `KEY=value` list)
///
/// This is shared between Ogg comment packets (with their signature already stripped) and
/// FLAC `VORBIS_COMMENT` blocks. Fields that are not valid UTF-8 are skipped. The first
/// occurrence of a key wins.
pub(crate) fn read_comments(mut data: &[u8], parse_options: ParseOptions) -> Result<TagRecord> {
	let mut record = TagRecord::default();

	let vendor_len = data.read_u32::<LittleEndian>()? as usize;
	if vendor_len > data.len() {
		err!(UnexpectedEof);
	}
	data = &data[vendor_len..];

	let number_of_items = data.read_u32::<LittleEndian>()?;
	// Every item has a 4 byte length
	if u64::from(number_of_items) > (data.len() >> 2) as u64 {
		err!(UnexpectedEof);
	}

	for _ in 0..number_of_items {
		let comment_len = data.read_u32::<LittleEndian>()? as usize;
		if comment_len > data.len() {
			err!(UnexpectedEof);
		}

		let (comment, rest) = data.split_at(comment_len);
		data = rest;

		// KEY=VALUE
		let mut comment_split = comment.splitn(2, |b| *b == b'=');

		let Some(key) = comment_split.next() else {
			continue;
		};

		// Make sure there was a separator present, otherwise just move on
		let Some(value) = comment_split.next() else {
			log::warn!("No separator found in field, discarding");
			continue;
		};

		if key.eq_ignore_ascii_case(b"METADATA_BLOCK_PICTURE") {
			if parse_options.read_cover_art {
				match Picture::from_flac_bytes(value, true) {
					Ok(picture) => record.offer_picture(picture),
					Err(e) => log::warn!("Failed to decode FLAC picture, discarding field: {e}"),
				}
			}

			continue;
		}

		if key.eq_ignore_ascii_case(b"COVERART") {
			if parse_options.read_cover_art {
				// `COVERART` is an old deprecated image storage format, holding only the image data
				//
				// <https://wiki.xiph.org/VorbisComment#Conversion_to_METADATA_BLOCK_PICTURE>
				log::warn!("Found deprecated `COVERART` field");

				match BASE64.decode(value) {
					Ok(data) => {
						record.offer_picture(Picture::new(PictureType::Other, None, None, data));
					},
					Err(_) => log::warn!("Failed to decode `COVERART`, discarding field"),
				}
			}

			continue;
		}

		let Ok(value) = utf8_decode(value) else {
			log::warn!(
				"Non UTF-8 value found, discarding field {:?}",
				String::from_utf8_lossy(key)
			);
			continue;
		};

		let value = value.trim();
		if value.is_empty() {
			continue;
		}

		insert_field(&mut record, &key.to_ascii_uppercase(), value);
	}

	Ok(record)
}

fn insert_field(record: &mut TagRecord, key: &[u8], value: &str) {
	fn fill<T>(slot: &mut Option<T>, value: Option<T>) {
		if slot.is_none() {
			*slot = value;
		}
	}

	let text = || Some(value.to_owned());

	match key {
		b"TITLE" => fill(&mut record.title, text()),
		b"ARTIST" => fill(&mut record.artist, text()),
		b"ALBUMARTIST" | b"ALBUM ARTIST" => fill(&mut record.album_artist, text()),
		b"ALBUM" => fill(&mut record.album, text()),
		b"DATE" | b"YEAR" => fill(&mut record.year, text()),
		b"GENRE" => fill(&mut record.genre, text()),
		b"COMMENT" | b"DESCRIPTION" => fill(&mut record.comment, text()),
		// Support the case of TRACKNUMBER / DISCNUMBER being equal to current/total
		b"TRACKNUMBER" => {
			let (track, total) = split_number_pair(value);
			fill(&mut record.track, track);
			fill(&mut record.track_total, total);
		},
		b"DISCNUMBER" => {
			let (disc, total) = split_number_pair(value);
			fill(&mut record.disc, disc);
			fill(&mut record.disc_total, total);
		},
		b"TRACKTOTAL" | b"TOTALTRACKS" => fill(&mut record.track_total, split_number_pair(value).0),
		b"DISCTOTAL" | b"TOTALDISCS" => fill(&mut record.disc_total, split_number_pair(value).0),
		_ => log::trace!("Ignoring Vorbis comment {:?}", String::from_utf8_lossy(key)),
	}
}

/// Read an Ogg Vorbis or Ogg Opus file
pub(crate) fn read_from<R>(
	reader: &mut ByteCursor<R>,
	parse_options: ParseOptions,
) -> Result<TagRecord>
where
	R: Read + Seek,
{
	let file_length = reader.len();
	let mut record = TagRecord::with_file_size(file_length);

	let start = reader.tell();
	let first_page_header = match PageHeader::read(reader) {
		Ok(header) => header,
		Err(PageError::MissingMagic) => {
			decode_err!(@BAIL Vorbis, "File is missing an \"OggS\" capture pattern")
		},
		Err(e) => return Err(e.into()),
	};
	reader.seek(SeekFrom::Start(start))?;

	let allocation_limit = unsafe { global_options().allocation_limit };
	let packets = Packets::read_count(reader, 2, allocation_limit)?;
	let header_end = reader.tell();

	let (Some(identification), Some(comments)) = (packets.get(0), packets.get(1)) else {
		decode_err!(@BAIL Vorbis, "File is missing its header packets");
	};

	let (info, comment_signature) = if identification.starts_with(VORBIS_IDENT_HEAD) {
		log::debug!("Ogg: Found a Vorbis stream");
		(
			vorbis::read_identification(&identification[VORBIS_IDENT_HEAD.len()..])?,
			VORBIS_COMMENT_HEAD,
		)
	} else if identification.starts_with(OPUSHEAD) {
		log::debug!("Ogg: Found an Opus stream");
		(
			opus::read_identification(&identification[OPUSHEAD.len()..])?,
			OPUSTAGS,
		)
	} else {
		log::warn!("Ogg: Unknown codec, unable to read the stream");
		return Ok(record);
	};

	if parse_options.read_tags {
		match comments.strip_prefix(comment_signature) {
			Some(comments) => match read_comments(comments, parse_options) {
				Ok(tag) => record = record.merge(tag),
				Err(e) => log::warn!("Ogg: Unable to read the comment header: {e}"),
			},
			None => log::warn!("Ogg: Second packet is not a comment header"),
		}
	}

	if parse_options.read_properties {
		record.samplerate_hz = Some(info.sample_rate);
		record.channels = Some(info.channels);
		record.bitrate_kbps = info.bitrate_kbps;
		record.duration_seconds = read_duration(
			reader,
			&info,
			header_end,
			first_page_header.stream_serial,
			parse_options,
		);

		if record.bitrate_kbps.is_none() {
			if let Some(duration) = record.duration_seconds.filter(|d| *d > 0.0) {
				let audio_len = file_length.saturating_sub(header_end);
				record.bitrate_kbps = Some(audio_len as f64 * 8.0 / duration / 1024.0);
			}
		}
	}

	Ok(record)
}

/// Find the stream's length from the largest granule position near the end of the file
///
/// Only the last `ogg_search_window` bytes are scanned.
fn read_duration<R>(
	reader: &mut ByteCursor<R>,
	info: &StreamInfo,
	header_end: u64,
	stream_serial: u32,
	parse_options: ParseOptions,
) -> Option<f64>
where
	R: Read + Seek,
{
	if info.granule_rate == 0 {
		log::warn!("Ogg: Sample rate = 0, unable to calculate length");
		return None;
	}

	let window = parse_options.ogg_search_window;
	let search_start = header_end.max(reader.len().saturating_sub(window));

	let granule = match ogg_pager::max_granule_position(
		reader,
		search_start,
		Some(stream_serial),
		window,
	) {
		Ok(Some(granule)) => granule,
		Ok(None) => {
			log::warn!("Ogg: No audio pages found near the end of the file");
			return None;
		},
		Err(e) => {
			log::warn!("Ogg: Unable to search for the last page: {e}");
			return None;
		},
	};

	let samples = granule.saturating_sub(info.pre_skip);
	Some(samples as f64 / f64::from(info.granule_rate))
}

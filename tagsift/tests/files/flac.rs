use crate::util::{
	assert_close, comment_block, flac_block, flac_picture, flac_stream_info, id3v2_3,
	id3v2_text_frame, read, read_guessed,
};

use tagsift::config::ParseOptions;
use tagsift::error::ErrorKind;
use tagsift::file::FileType;
use tagsift::picture::{MimeType, PictureType};
use tagsift::probe::extract;

use std::io::Cursor;

const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\x0DIHDR";

#[test_log::test]
fn duration_from_stream_info() {
	for (sample_rate, total_samples) in [(44100, 441_000), (48000, 123_456_789), (96000, 1)] {
		let mut data = b"fLaC".to_vec();
		data.extend(flac_block(
			0,
			true,
			&flac_stream_info(sample_rate, 2, 24, total_samples),
		));

		let record = read(data, FileType::Flac, ParseOptions::new());
		assert_close(
			record.duration_seconds(),
			total_samples as f64 / f64::from(sample_rate),
		);
		assert_eq!(record.samplerate_hz(), Some(sample_rate));
		assert_eq!(record.bit_depth(), Some(24));
	}
}

#[test_log::test]
fn comments_and_picture() {
	let mut data = b"fLaC".to_vec();
	data.extend(flac_block(0, false, &flac_stream_info(44100, 2, 16, 44100 * 60)));
	data.extend(flac_block(
		4,
		false,
		&comment_block(&["TITLE=Title", "ALBUMARTIST=Band", "TRACKNUMBER=1", "TRACKTOTAL=12"]),
	));
	data.extend(flac_block(6, true, &flac_picture(3, "image/png", PNG)));
	data.extend([0xFF, 0xF8, 0x69, 0x08]);

	let record = read_guessed(data.clone(), ParseOptions::new().read_cover_art(true));
	assert_eq!(record.title(), Some("Title"));
	assert_eq!(record.album_artist(), Some("Band"));
	assert_eq!(record.track(), Some(1));
	assert_eq!(record.track_total(), Some(12));
	assert_eq!(record.audio_offset_bytes(), Some(data.len() as u64 - 4));

	let picture = record.picture().unwrap();
	assert_eq!(picture.pic_type(), PictureType::CoverFront);
	assert_eq!(picture.mime_type(), Some(&MimeType::Png));
	assert_eq!(record.image_bytes(), Some(PNG));

	// Pictures are only loaded on request
	let record = read(data, FileType::Flac, ParseOptions::new());
	assert!(record.picture().is_none());
}

#[test_log::test]
fn id3v2_before_marker() {
	let mut data = id3v2_3(
		&[
			id3v2_text_frame("TIT2", "ID3 Title"),
			id3v2_text_frame("TALB", "ID3 Album"),
		],
		0,
	);
	data.extend(b"fLaC");
	data.extend(flac_block(0, false, &flac_stream_info(44100, 2, 16, 0)));
	data.extend(flac_block(4, true, &comment_block(&["TITLE=Vorbis Title"])));

	let record = read_guessed(data, ParseOptions::new());
	assert_eq!(record.title(), Some("Vorbis Title"));
	assert_eq!(record.album(), Some("ID3 Album"));
	// Unknown total samples
	assert_eq!(record.duration_seconds(), None);
}

#[test_log::test]
fn missing_stream_info() {
	let mut data = b"fLaC".to_vec();
	data.extend(flac_block(4, true, &comment_block(&[])));

	let err = extract(Cursor::new(data), FileType::Flac, ParseOptions::new()).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::NotAValidContainer(_)));
}

#[test_log::test]
fn truncated_block() {
	let mut data = b"fLaC".to_vec();
	data.extend(flac_block(0, false, &flac_stream_info(44100, 2, 16, 100)));
	data.extend(flac_block(4, true, &comment_block(&["TITLE=Title"])));
	data.truncate(data.len() - 3);

	let err = extract(Cursor::new(data), FileType::Flac, ParseOptions::new()).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::UnexpectedEof));
}

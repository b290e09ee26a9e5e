use crate::util::{
	ASF_CONTENT_DESCRIPTION, ASF_EXTENDED_CONTENT_DESCRIPTION, ASF_FILE_PROPERTIES,
	ASF_STREAM_PROPERTIES, asf_audio_stream, asf_content_description, asf_file,
	asf_file_properties, asf_object, asf_string_descriptors, read, read_guessed,
};

use tagsift::config::ParseOptions;
use tagsift::file::FileType;

#[test_log::test]
fn play_duration() {
	let data = asf_file(&[asf_object(
		ASF_FILE_PROPERTIES,
		&asf_file_properties(1_200_000_000),
	)]);

	let record = read(data, FileType::Wma, ParseOptions::new());
	assert_eq!(record.duration_seconds(), Some(120.0));
}

#[test_log::test]
fn full_header() {
	let data = asf_file(&[
		asf_object(ASF_FILE_PROPERTIES, &asf_file_properties(30_000_000)),
		asf_object(ASF_STREAM_PROPERTIES, &asf_audio_stream(2, 48000, 24000)),
		asf_object(ASF_CONTENT_DESCRIPTION, &asf_content_description("Title", "Author")),
		asf_object(
			ASF_EXTENDED_CONTENT_DESCRIPTION,
			&asf_string_descriptors(&[
				("WM/AlbumTitle", "Album"),
				("WM/AlbumArtist", "Band"),
				("WM/Year", "2010"),
				("WM/Genre", "Ambient"),
				("WM/TrackNumber", "9"),
				("WM/PartOfSet", "2/3"),
			]),
		),
		// Header extension object, unused
		asf_object(
			[
				0xB5, 0x03, 0xBF, 0x5F, 0x2E, 0xA9, 0xCF, 0x11, 0x8E, 0xE3, 0x00, 0xC0, 0x0C, 0x20,
				0x53, 0x65,
			],
			&[0; 46],
		),
	]);

	let record = read_guessed(data, ParseOptions::new());
	assert_eq!(record.duration_seconds(), Some(3.0));
	assert_eq!(record.channels(), Some(2));
	assert_eq!(record.samplerate_hz(), Some(48000));
	assert_eq!(record.bitrate_kbps(), Some(192.0));
	assert_eq!(record.bit_depth(), Some(16));

	assert_eq!(record.title(), Some("Title"));
	assert_eq!(record.artist(), Some("Author"));
	assert_eq!(record.album(), Some("Album"));
	assert_eq!(record.album_artist(), Some("Band"));
	assert_eq!(record.year(), Some("2010"));
	assert_eq!(record.genre(), Some("Ambient"));
	assert_eq!(record.track(), Some(9));
	assert_eq!(record.disc(), Some(2));
	assert_eq!(record.disc_total(), Some(3));
}

#[test_log::test]
fn wrong_container() {
	let mut data = b"RIFF".to_vec();
	data.resize(64, 0);

	let record = read(data, FileType::Wma, ParseOptions::new());
	assert!(record.is_empty());
	assert_eq!(record.file_size_bytes(), 64);
}

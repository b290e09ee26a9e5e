use crate::util::{
	assert_close, ogg_page, opus_head, opus_tags, read, read_guessed, vorbis_comments,
	vorbis_identification,
};

use tagsift::config::ParseOptions;
use tagsift::error::ErrorKind;
use tagsift::file::FileType;
use tagsift::probe::extract;

use std::io::Cursor;

#[test_log::test]
fn vorbis_headers_only() {
	let mut data = ogg_page(0x02, 0, 0, &[&vorbis_identification(2, 44100, 128_000)]);
	data.extend(ogg_page(0, 0, 1, &[&vorbis_comments(&["TITLE=Test"])]));

	let record = read(data, FileType::Vorbis, ParseOptions::new());
	assert_eq!(record.samplerate_hz(), Some(44100));
	assert_eq!(record.channels(), Some(2));
	assert_eq!(record.bitrate_kbps(), Some(125.0));
	assert_eq!(record.title(), Some("Test"));
	assert_eq!(record.duration_seconds(), None);
}

#[test_log::test]
fn vorbis_duration() {
	let mut data = ogg_page(0x02, 0, 0, &[&vorbis_identification(2, 44100, 128_000)]);
	data.extend(ogg_page(0, 0, 1, &[&vorbis_comments(&["ARTIST=Artist"])]));
	data.extend(ogg_page(0, 44100 * 3, 2, &[&[0; 100]]));
	data.extend(ogg_page(0x04, 44100 * 4, 3, &[&[0; 100]]));

	let record = read_guessed(data, ParseOptions::new());
	assert_eq!(record.artist(), Some("Artist"));
	assert_close(record.duration_seconds(), 4.0);
}

#[test_log::test]
fn comment_spanning_pages() {
	let long_title = format!("TITLE={}", "a".repeat(600));
	let comments = vorbis_comments(&[long_title.as_str()]);
	let (first, second) = comments.split_at(510);

	let mut data = ogg_page(0x02, 0, 0, &[&vorbis_identification(1, 8000, 0)]);

	// Two full segments, the packet continues on the next page
	let mut page = ogg_page(0, 0, 1, &[&first[..255]]);
	page[26] = 2;
	page.truncate(27);
	page.extend([255, 255]);
	page.extend(first);
	data.extend(page);
	data.extend(ogg_page(0x01, 0, 2, &[second]));

	let record = read(data, FileType::Vorbis, ParseOptions::new());
	assert_eq!(record.title().map(str::len), Some(600));
}

#[test_log::test]
fn opus_stream() {
	let mut data = ogg_page(0x02, 0, 0, &[&opus_head(2, 312, 44100)]);
	data.extend(ogg_page(0, 0, 1, &[&opus_tags(&["ALBUM=Album", "TRACKNUMBER=5"])]));
	data.extend(ogg_page(0x04, 48000 * 10 + 312, 2, &[&[0; 200]]));

	let record = read(data, FileType::Vorbis, ParseOptions::new());
	assert_eq!(record.album(), Some("Album"));
	assert_eq!(record.track(), Some(5));
	assert_eq!(record.samplerate_hz(), Some(44100));
	assert_close(record.duration_seconds(), 10.0);
	assert!(record.bitrate_kbps().is_some());
}

#[test_log::test]
fn not_ogg() {
	let err = extract(
		Cursor::new(b"fLaC\x00\x00\x00\x00".to_vec()),
		FileType::Vorbis,
		ParseOptions::new(),
	)
	.unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::NotAValidContainer(_)));
}

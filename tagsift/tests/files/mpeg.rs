use crate::util::{
	MPEG_FRAME_LEN_128, MPEG_SAMPLES_PER_FRAME, assert_close, id3v1, id3v2_3, id3v2_text_frame,
	mpeg_frames, read, read_guessed,
};

use tagsift::config::ParseOptions;
use tagsift::file::FileType;

#[test_log::test]
fn id3v2_artist() {
	// Frame `TPE1` with content `\x00Artist Name`
	let mut data = id3v2_3(&[id3v2_text_frame("TPE1", "Artist Name")], 0);
	data.extend(mpeg_frames(10));

	let record = read(data, FileType::Mpeg, ParseOptions::new());
	assert_eq!(record.artist(), Some("Artist Name"));
}

#[test_log::test]
fn tags_and_properties() {
	let tag = id3v2_3(
		&[
			id3v2_text_frame("TIT2", "Title"),
			id3v2_text_frame("TRCK", "2/10"),
			id3v2_text_frame("TCON", "(8)"),
		],
		64,
	);
	let tag_len = tag.len() as u64;

	let mut data = tag;
	data.extend(mpeg_frames(100));
	data.extend(id3v1("Old Title", "Old Artist", 7, 0));

	let record = read_guessed(data, ParseOptions::new());
	assert_eq!(record.title(), Some("Title"));
	assert_eq!(record.track(), Some(2));
	assert_eq!(record.track_total(), Some(10));
	assert_eq!(record.genre(), Some("Jazz"));
	// Only set by ID3v1
	assert_eq!(record.artist(), Some("Old Artist"));
	assert_eq!(record.year(), Some("1999"));

	assert_eq!(record.samplerate_hz(), Some(44100));
	assert_eq!(record.channels(), Some(2));
	assert_close(record.bitrate_kbps(), 128.0);
	assert_close(record.duration_seconds(), 100.0 * MPEG_SAMPLES_PER_FRAME / 44100.0);
	assert_eq!(record.audio_offset_bytes(), Some(tag_len));
	assert!(!record.is_vbr());
}

#[test_log::test]
fn id3v1_only() {
	let mut data = mpeg_frames(5);
	data.extend(id3v1("Title", "Artist", 3, 17));

	let record = read(data, FileType::Mpeg, ParseOptions::new().read_properties(false));
	assert_eq!(record.title(), Some("Title"));
	assert_eq!(record.artist(), Some("Artist"));
	assert_eq!(record.track(), Some(3));
	assert_eq!(record.genre(), Some("Rock"));
	assert_eq!(record.duration_seconds(), None);
}

#[test_log::test]
fn no_frames() {
	let data = id3v2_3(&[id3v2_text_frame("TALB", "Album")], 0);

	let record = read(data, FileType::Mpeg, ParseOptions::new());
	assert_eq!(record.album(), Some("Album"));
	assert_eq!(record.duration_seconds(), None);
}

#[test_log::test]
fn duration_grows_with_file_size() {
	let options = ParseOptions::new().read_tags(false).max_estimation_secs(1);

	let mut last = 0.0;
	for count in [1, 2, 10, 38, 39, 40, 100, 250] {
		let record = read(mpeg_frames(count), FileType::Mpeg, options);
		let duration = record.duration_seconds().unwrap();

		assert!(
			duration >= last,
			"{count} frames gave {duration}s, less than {last}s"
		);
		last = duration;
	}
}

#[test_log::test]
fn capped_scan_extrapolates() {
	let frames = 2000;
	let data = mpeg_frames(frames);
	assert_eq!(data.len(), frames * MPEG_FRAME_LEN_128);

	let record = read(data, FileType::Mpeg, ParseOptions::new().max_estimation_secs(5));
	assert_close(
		record.duration_seconds(),
		frames as f64 * MPEG_SAMPLES_PER_FRAME / 44100.0,
	);
}

#[test_log::test]
fn capped_scan_after_large_id3v2() {
	let frames = 200;
	let tag = id3v2_3(&[id3v2_text_frame("TIT2", "Title")], 40_000);
	let tag_len = tag.len() as u64;

	let mut data = tag;
	data.extend(mpeg_frames(frames));
	let file_length = data.len() as f64;

	// 1 second caps the scan at 38 frames
	let options = ParseOptions::new().max_estimation_secs(1);
	let record = read(data, FileType::Mpeg, options);

	assert_eq!(record.title(), Some("Title"));
	// Scanning begins right after the tag
	assert_eq!(record.audio_offset_bytes(), Some(tag_len));
	assert_close(record.bitrate_kbps(), 128.0);

	// The capped scan extrapolates as `file_size / mean_frame_size` frames, and the file size
	// includes the tag
	let mean_frame_size = MPEG_FRAME_LEN_128 as f64;
	assert_close(
		record.duration_seconds(),
		file_length / mean_frame_size * MPEG_SAMPLES_PER_FRAME / 44100.0,
	);

	// Without a tag, the same frames extrapolate to their exact duration
	let untagged = read(mpeg_frames(frames), FileType::Mpeg, options);
	assert_close(
		untagged.duration_seconds(),
		frames as f64 * MPEG_SAMPLES_PER_FRAME / 44100.0,
	);
	assert!(record.duration_seconds() > untagged.duration_seconds());
}

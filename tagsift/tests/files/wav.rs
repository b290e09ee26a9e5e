use crate::util::{
	append_riff_chunk, assert_close, hound_wav, id3v2_3, id3v2_text_frame, read, read_guessed,
	riff_info,
};

use tagsift::config::ParseOptions;
use tagsift::file::FileType;

use std::io::Cursor;

#[test_log::test]
fn properties_match_hound() {
	for (channels, sample_rate, frames) in [(1, 8000, 8000), (2, 44100, 22050), (6, 48000, 4800)] {
		let data = hound_wav(channels, sample_rate, frames);

		let spec = hound::WavReader::new(Cursor::new(data.clone()))
			.unwrap()
			.spec();

		let record = read(data, FileType::Wav, ParseOptions::new());
		assert_eq!(record.channels().map(u16::from), Some(spec.channels));
		assert_eq!(record.samplerate_hz(), Some(spec.sample_rate));
		assert_eq!(record.bit_depth().map(u16::from), Some(spec.bits_per_sample));
		assert_close(
			record.duration_seconds(),
			f64::from(frames) / f64::from(sample_rate),
		);
		assert_close(
			record.bitrate_kbps(),
			f64::from(sample_rate) * f64::from(channels) * 16.0 / 1024.0,
		);
	}
}

#[test_log::test]
fn info_chunk() {
	let mut data = hound_wav(2, 44100, 100);
	append_riff_chunk(
		&mut data,
		b"LIST",
		&riff_info(&[
			(b"INAM", "Title"),
			(b"IART", "Artist"),
			(b"IPRD", "Album"),
			(b"ITRK", "4"),
		]),
	);

	let record = read_guessed(data, ParseOptions::new());
	assert_eq!(record.title(), Some("Title"));
	assert_eq!(record.artist(), Some("Artist"));
	assert_eq!(record.album(), Some("Album"));
	assert_eq!(record.track(), Some(4));
}

#[test_log::test]
fn id3v2_wins_over_info() {
	let mut data = hound_wav(1, 22050, 10);
	append_riff_chunk(
		&mut data,
		b"LIST",
		&riff_info(&[(b"IART", "INFO Artist"), (b"ICMT", "INFO Comment")]),
	);
	append_riff_chunk(
		&mut data,
		b"id3 ",
		&id3v2_3(&[id3v2_text_frame("TPE1", "ID3 Artist")], 0),
	);

	let record = read(data, FileType::Wav, ParseOptions::new());
	assert_eq!(record.artist(), Some("ID3 Artist"));
	assert_eq!(record.comment(), Some("INFO Comment"));
}

#[test_log::test]
fn audio_offset() {
	let data = hound_wav(2, 44100, 100);
	let data_chunk = data
		.windows(4)
		.position(|window| window == b"data")
		.unwrap();

	let record = read(data, FileType::Wav, ParseOptions::new());
	assert_eq!(record.audio_offset_bytes(), Some(data_chunk as u64 + 8));
}

#[test_log::test]
fn not_a_wave_file() {
	let mut data = hound_wav(1, 8000, 10);
	data[8..12].copy_from_slice(b"AVI ");

	let record = read(data, FileType::Wav, ParseOptions::new());
	assert!(record.is_empty());
}

#![allow(missing_docs)]

#[allow(dead_code)]
#[path = "../files/util/mod.rs"]
mod util;

use util::{
	ASF_CONTENT_DESCRIPTION, ASF_FILE_PROPERTIES, ASF_STREAM_PROPERTIES, append_riff_chunk,
	asf_audio_stream, asf_content_description, asf_file, asf_file_properties, asf_object,
	comment_block, flac_block, flac_picture, flac_stream_info, hound_wav, id3v1, id3v2_3,
	id3v2_text_frame, mpeg_frames, ogg_page, riff_info, vorbis_comments, vorbis_identification,
};

use tagsift::config::ParseOptions;
use tagsift::file::FileType;
use tagsift::probe::{Probe, extract};

use std::io::Cursor;
use std::thread;
use std::time::{Duration, Instant};

const FILE_TYPES: [FileType; 5] = [
	FileType::Mpeg,
	FileType::Vorbis,
	FileType::Wav,
	FileType::Flac,
	FileType::Wma,
];

/// Run every parser over `data`, failing if any of them panics or doesn't finish in time
fn assert_terminates(name: &str, data: &[u8]) {
	for file_type in FILE_TYPES {
		let data = data.to_vec();
		let instant = Instant::now();
		let thread = thread::spawn(move || {
			let options = ParseOptions::new().read_cover_art(true);
			let _ = extract(Cursor::new(data), file_type, options);
		});

		while !thread.is_finished() {
			assert!(
				instant.elapsed() < Duration::from_secs(3),
				"{name}: {file_type:?} parser didn't terminate"
			);
			thread::sleep(Duration::from_millis(1));
		}

		assert!(thread.join().is_ok(), "{name}: {file_type:?} parser panicked");
	}

	// The guessing path as well
	let data = data.to_vec();
	let thread = thread::spawn(move || {
		if let Ok(probe) = Probe::new(Cursor::new(data)).guess_file_type() {
			let _ = probe.read();
		}
	});
	assert!(thread.join().is_ok(), "{name}: guessed parser panicked");
}

// A small LCG, so the "random" inputs are the same on every run
fn pseudo_random(seed: u32, len: usize) -> Vec<u8> {
	let mut state = seed;
	(0..len)
		.map(|_| {
			state = state.wrapping_mul(1_103_515_245).wrapping_add(12345);
			(state >> 16) as u8
		})
		.collect()
}

#[test_log::test]
fn uniform_bytes() {
	for byte in [0x00, 0xFF, 0x20, 0x7F] {
		for len in [1, 3, 10, 127, 128, 129, 4096] {
			assert_terminates(&format!("{len} bytes of {byte:#04X}"), &vec![byte; len]);
		}
	}
}

#[test_log::test]
fn random_bytes() {
	for seed in 0..32 {
		assert_terminates(&format!("seed {seed}"), &pseudo_random(seed, 2048));
	}
}

#[test_log::test]
fn magic_followed_by_garbage() {
	let prefixes: [&[u8]; 7] = [
		b"ID3\x03\x00\x00",
		b"ID3\x04\x00\x40\x7F\x7F\x7F\x7F",
		b"OggS\x00\x02",
		b"RIFF\xFF\xFF\xFF\xFFWAVE",
		b"fLaC\x00\xFF\xFF\xFF",
		b"TAG",
		&[
			0x30, 0x26, 0xB2, 0x75, 0x8E, 0x66, 0xCF, 0x11, 0xA6, 0xD9, 0x00, 0xAA, 0x00, 0x62,
			0xCE, 0x6C,
		],
	];

	for (i, prefix) in prefixes.iter().enumerate() {
		for seed in 0..8 {
			let mut data = prefix.to_vec();
			data.extend(pseudo_random(seed, 512));
			assert_terminates(&format!("prefix {i}, seed {seed}"), &data);
		}
	}
}

#[test_log::test]
fn huge_declared_sizes() {
	// ID3v2 tag claiming ~256MB
	assert_terminates("id3v2", b"ID3\x03\x00\x00\x7F\x7F\x7F\x7FTIT2\xFF\xFF\xFF\xFF\x00\x00");

	// RIFF chunk claiming 4GB
	let mut wav = b"RIFF\x24\x00\x00\x00WAVE".to_vec();
	wav.extend(b"LIST\xFF\xFF\xFF\xFFINFO");
	assert_terminates("riff", &wav);

	// FLAC block claiming 16MB
	assert_terminates("flac", b"fLaC\x00\x00\x00\x22\x84\xFF\xFF\xFF");

	// ASF header with a huge object count and object size
	let mut asf = vec![
		0x30, 0x26, 0xB2, 0x75, 0x8E, 0x66, 0xCF, 0x11, 0xA6, 0xD9, 0x00, 0xAA, 0x00, 0x62, 0xCE,
		0x6C,
	];
	asf.extend(u64::MAX.to_le_bytes());
	asf.extend(u32::MAX.to_le_bytes());
	asf.extend([0x01, 0x02]);
	asf.extend([0x33; 16]);
	asf.extend(u64::MAX.to_le_bytes());
	assert_terminates("asf", &asf);
}

#[test_log::test]
fn every_truncation_of_a_valid_header() {
	// ID3v2.3 tag with a single TIT2 frame, then an MPEG frame
	let mut data = b"ID3\x03\x00\x00\x00\x00\x00\x10TIT2\x00\x00\x00\x06\x00\x00\x00Title".to_vec();
	data.extend([0xFF, 0xFB, 0x90, 0x64]);
	data.resize(data.len() + 413, 0);

	for len in 0..=64 {
		assert_terminates(&format!("truncated to {len}"), &data[..len]);
	}
}

/// One well-formed file per format
fn fixtures() -> Vec<(&'static str, Vec<u8>)> {
	let mut mp3 = id3v2_3(
		&[
			id3v2_text_frame("TIT2", "Title"),
			id3v2_text_frame("TCON", "(17)"),
		],
		16,
	);
	mp3.extend(mpeg_frames(20));
	mp3.extend(id3v1("Title", "Artist", 1, 17));

	let mut ogg = ogg_page(0x02, 0, 0, &[&vorbis_identification(2, 44100, 128_000)]);
	ogg.extend(ogg_page(0, 0, 1, &[&vorbis_comments(&["TITLE=Title"])]));
	ogg.extend(ogg_page(0x04, 44100, 2, &[&[0; 64]]));

	let mut flac = b"fLaC".to_vec();
	flac.extend(flac_block(0, false, &flac_stream_info(44100, 2, 16, 44100)));
	flac.extend(flac_block(4, false, &comment_block(&["TITLE=Title"])));
	flac.extend(flac_block(6, true, &flac_picture(3, "image/png", b"\x89PNG")));
	flac.extend([0xFF, 0xF8, 0, 0]);

	let mut wav = hound_wav(2, 8000, 100);
	append_riff_chunk(&mut wav, b"LIST", &riff_info(&[(b"INAM", "Title")]));

	let wma = asf_file(&[
		asf_object(ASF_FILE_PROPERTIES, &asf_file_properties(10_000_000)),
		asf_object(ASF_STREAM_PROPERTIES, &asf_audio_stream(2, 44100, 16000)),
		asf_object(ASF_CONTENT_DESCRIPTION, &asf_content_description("Title", "Artist")),
	]);

	vec![
		("mp3", mp3),
		("ogg", ogg),
		("flac", flac),
		("wav", wav),
		("wma", wma),
	]
}

#[test_log::test]
fn damaged_fixtures() {
	for (name, fixture) in fixtures() {
		assert_terminates(name, &fixture);

		let stride = fixture.len() / 48 + 1;

		for len in (0..fixture.len()).step_by(stride) {
			assert_terminates(&format!("{name} truncated to {len}"), &fixture[..len]);
		}

		for pos in (0..fixture.len()).step_by(stride) {
			for byte in [0x00, 0x7F, 0xFF] {
				let mut data = fixture.clone();
				data[pos] = byte;
				assert_terminates(&format!("{name} with {byte:#04X} at {pos}"), &data);
			}
		}
	}
}

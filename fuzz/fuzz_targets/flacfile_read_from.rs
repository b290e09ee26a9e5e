#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use tagsift::config::ParseOptions;
use tagsift::file::FileType;

fuzz_target!(|data: Vec<u8>| {
	let _ = tagsift::probe::extract(
		Cursor::new(data),
		FileType::Flac,
		ParseOptions::new().read_cover_art(true),
	);
});

#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use tagsift::config::ParseOptions;
use tagsift::probe::Probe;

fuzz_target!(|data: Vec<u8>| {
	if let Ok(probe) = Probe::new(Cursor::new(data))
		.options(ParseOptions::new().read_cover_art(true))
		.guess_file_type()
	{
		let _ = probe.read();
	}
});

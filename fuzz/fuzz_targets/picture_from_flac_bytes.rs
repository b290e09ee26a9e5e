#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
	let _ = tagsift::picture::Picture::from_flac_bytes(data, true);
	let _ = tagsift::picture::Picture::from_flac_bytes(data, false);
});

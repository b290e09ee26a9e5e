use tagsift::config::ParseOptions;
use tagsift::file::FileType;
use tagsift::probe::Probe;
use tagsift::read_from_path;

use std::io::Cursor;

#[test_log::test]
fn zero_sized_sources() {
	for file_type in [
		FileType::Mpeg,
		FileType::Vorbis,
		FileType::Wav,
		FileType::Flac,
		FileType::Wma,
	] {
		let record = Probe::with_file_type(Cursor::new(Vec::new()), file_type)
			.read()
			.unwrap();
		assert!(record.is_empty(), "{file_type:?} record should be empty");
	}
}

#[test_log::test]
fn zero_sized_paths() {
	let dir = tempfile::tempdir().unwrap();

	for ext in tagsift::file::EXTENSIONS {
		let path = dir.path().join(format!("placeholder.{ext}"));
		std::fs::write(&path, b"").unwrap();

		let record = read_from_path(&path, ParseOptions::new().read_cover_art(true)).unwrap();
		assert!(record.is_empty(), "{ext} record should be empty");
	}
}

#[test_log::test]
fn zero_sized_unknown_extension() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("placeholder.txt");
	std::fs::write(&path, b"").unwrap();

	let record = read_from_path(&path, ParseOptions::new()).unwrap();
	assert!(record.is_empty());
	assert_eq!(record.file_size_bytes(), 0);
}

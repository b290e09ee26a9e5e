//! Print the tags and audio properties of a file

use tagsift::config::ParseOptions;
use tagsift::picture::MimeType;
use tagsift::probe::Probe;

use std::path::Path;

fn main() {
	let path_str = std::env::args().nth(1).expect("ERROR: No path specified!");
	let path = Path::new(&path_str);

	if !path.is_file() {
		panic!("ERROR: Path is not a file!");
	}

	let mut probe = Probe::open(path)
		.expect("ERROR: Bad path provided!")
		.options(ParseOptions::new().read_cover_art(true));

	// Fall back to the content when the extension is unknown
	if probe.file_type().is_none() {
		probe = probe
			.guess_file_type()
			.expect("ERROR: Failed to guess the file type!");
	}

	let record = probe.read().expect("ERROR: Failed to read file!");

	println!("--- Tag Information ---");
	println!("Title: {}", record.title().unwrap_or("None"));
	println!("Artist: {}", record.artist().unwrap_or("None"));
	println!("Album artist: {}", record.album_artist().unwrap_or("None"));
	println!("Album: {}", record.album().unwrap_or("None"));
	println!("Year: {}", record.year().unwrap_or("None"));
	println!("Genre: {}", record.genre().unwrap_or("None"));
	println!("Comment: {}", record.comment().unwrap_or("None"));

	match (record.track(), record.track_total()) {
		(Some(track), Some(total)) => println!("Track: {track}/{total}"),
		(Some(track), None) => println!("Track: {track}"),
		_ => println!("Track: None"),
	}

	match (record.disc(), record.disc_total()) {
		(Some(disc), Some(total)) => println!("Disc: {disc}/{total}"),
		(Some(disc), None) => println!("Disc: {disc}"),
		_ => println!("Disc: None"),
	}

	let duration = record.duration_seconds().unwrap_or(0.0);
	let minutes = (duration / 60.0).floor();
	let seconds = duration - minutes * 60.0;

	println!("--- Audio Properties ---");
	println!("Bitrate: {:.1} kbps", record.bitrate_kbps().unwrap_or(0.0));
	println!("VBR: {}", record.is_vbr());
	println!("Sample Rate: {}", record.samplerate_hz().unwrap_or(0));
	println!("Bit depth: {}", record.bit_depth().unwrap_or(0));
	println!("Channels: {}", record.channels().unwrap_or(0));
	println!("Duration: {minutes:02}:{seconds:05.2}");
	println!("Audio offset: {}", record.audio_offset_bytes().unwrap_or(0));
	println!("File size: {}", record.file_size_bytes());

	if let Some(picture) = record.picture() {
		println!("--- Picture ---");
		println!("Type: {:?}", picture.pic_type());
		println!(
			"MIME type: {}",
			picture.mime_type().map_or("Unknown", MimeType::as_str)
		);
		println!("Size: {} bytes", picture.data().len());
	}
}

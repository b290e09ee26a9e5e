//! Synthesised fixtures for every supported format

use tagsift::config::ParseOptions;
use tagsift::file::FileType;
use tagsift::probe::{Probe, extract};
use tagsift::tag::TagRecord;

use std::io::Cursor;

/// Read `data` with the parser for `file_type`
pub fn read(data: Vec<u8>, file_type: FileType, options: ParseOptions) -> TagRecord {
	extract(Cursor::new(data), file_type, options).unwrap()
}

/// Read `data`, guessing the file type from its content
pub fn read_guessed(data: Vec<u8>, options: ParseOptions) -> TagRecord {
	Probe::new(Cursor::new(data))
		.options(options)
		.guess_file_type()
		.unwrap()
		.read()
		.unwrap()
}

pub fn assert_close(actual: Option<f64>, expected: f64) {
	let actual = actual.expect("value should be set");
	assert!(
		(actual - expected).abs() < 1e-6,
		"expected {expected}, got {actual}"
	);
}

// ID3

pub fn id3v2_text_frame(id: &str, text: &str) -> Vec<u8> {
	let mut frame = id.as_bytes().to_vec();
	frame.extend((text.len() as u32 + 1).to_be_bytes());
	frame.extend([0, 0]);
	frame.push(0);
	frame.extend(text.as_bytes());
	frame
}

/// An ID3v2.3 tag holding `frames`, followed by `padding` zero bytes
pub fn id3v2_3(frames: &[Vec<u8>], padding: usize) -> Vec<u8> {
	let mut body = frames.concat();
	body.resize(body.len() + padding, 0);

	let size = body.len() as u32;
	let mut tag = vec![b'I', b'D', b'3', 3, 0, 0];
	tag.extend([
		((size >> 21) & 0x7F) as u8,
		((size >> 14) & 0x7F) as u8,
		((size >> 7) & 0x7F) as u8,
		(size & 0x7F) as u8,
	]);
	tag.extend(body);
	tag
}

pub fn id3v1(title: &str, artist: &str, track: u8, genre: u8) -> Vec<u8> {
	fn field(value: &str, len: usize) -> Vec<u8> {
		let mut field = value.as_bytes().to_vec();
		field.resize(len, 0);
		field
	}

	let mut tag = b"TAG".to_vec();
	tag.extend(field(title, 30));
	tag.extend(field(artist, 30));
	tag.extend(field("", 30));
	tag.extend(field("1999", 4));
	tag.extend(field("", 28));
	tag.extend([0, track, genre]);
	tag
}

// MPEG

/// MPEG-1 Layer 3, 128kbps, 44100Hz, joint stereo
pub const MPEG_HEADER_128: [u8; 4] = [0xFF, 0xFB, 0x90, 0x64];
pub const MPEG_FRAME_LEN_128: usize = 417;
pub const MPEG_SAMPLES_PER_FRAME: f64 = 1152.0;

pub fn mpeg_frames(count: usize) -> Vec<u8> {
	let mut frame = vec![0; MPEG_FRAME_LEN_128];
	frame[..4].copy_from_slice(&MPEG_HEADER_128);
	frame.repeat(count)
}

// Ogg

pub fn ogg_page(header_type: u8, granule: u64, sequence: u32, packets: &[&[u8]]) -> Vec<u8> {
	let mut segments = Vec::new();
	for packet in packets {
		let mut remaining = packet.len();
		while remaining >= 255 {
			segments.push(255);
			remaining -= 255;
		}
		segments.push(remaining as u8);
	}

	let mut page = b"OggS".to_vec();
	page.push(0);
	page.push(header_type);
	page.extend(granule.to_le_bytes());
	page.extend(0x1234_u32.to_le_bytes());
	page.extend(sequence.to_le_bytes());
	// The checksum isn't verified
	page.extend(0_u32.to_le_bytes());
	page.push(segments.len() as u8);
	page.extend(segments);
	for packet in packets {
		page.extend(*packet);
	}
	page
}

pub fn vorbis_identification(channels: u8, sample_rate: u32, nominal_bitrate: i32) -> Vec<u8> {
	let mut packet = b"\x01vorbis".to_vec();
	packet.extend(0_u32.to_le_bytes());
	packet.push(channels);
	packet.extend(sample_rate.to_le_bytes());
	packet.extend(0_i32.to_le_bytes());
	packet.extend(nominal_bitrate.to_le_bytes());
	packet.extend(0_i32.to_le_bytes());
	packet.extend([0xB8, 0x01]);
	packet
}

pub fn opus_head(channels: u8, pre_skip: u16, input_sample_rate: u32) -> Vec<u8> {
	let mut packet = b"OpusHead".to_vec();
	packet.push(1);
	packet.push(channels);
	packet.extend(pre_skip.to_le_bytes());
	packet.extend(input_sample_rate.to_le_bytes());
	packet.extend(0_i16.to_le_bytes());
	packet.push(0);
	packet
}

/// A comment block, without any signature
pub fn comment_block(comments: &[&str]) -> Vec<u8> {
	let vendor = "tagsift";

	let mut block = (vendor.len() as u32).to_le_bytes().to_vec();
	block.extend(vendor.as_bytes());
	block.extend((comments.len() as u32).to_le_bytes());
	for comment in comments {
		block.extend((comment.len() as u32).to_le_bytes());
		block.extend(comment.as_bytes());
	}
	block
}

pub fn vorbis_comments(comments: &[&str]) -> Vec<u8> {
	let mut packet = b"\x03vorbis".to_vec();
	packet.extend(comment_block(comments));
	packet.push(1);
	packet
}

pub fn opus_tags(comments: &[&str]) -> Vec<u8> {
	let mut packet = b"OpusTags".to_vec();
	packet.extend(comment_block(comments));
	packet
}

// FLAC

pub fn flac_stream_info(sample_rate: u32, channels: u8, bits_per_sample: u8, total_samples: u64) -> Vec<u8> {
	let mut block = vec![0x10, 0x00, 0x10, 0x00, 0, 0, 0, 0, 0, 0];

	let packed = (u64::from(sample_rate) << 44)
		| (u64::from(channels - 1) << 41)
		| (u64::from(bits_per_sample - 1) << 36)
		| total_samples;
	block.extend(packed.to_be_bytes());
	block.extend([0; 16]);
	block
}

pub fn flac_block(ty: u8, last: bool, content: &[u8]) -> Vec<u8> {
	let mut block = vec![ty | if last { 0x80 } else { 0 }];
	block.extend(&(content.len() as u32).to_be_bytes()[1..]);
	block.extend(content);
	block
}

pub fn flac_picture(pic_type: u32, mime: &str, data: &[u8]) -> Vec<u8> {
	let mut block = pic_type.to_be_bytes().to_vec();
	block.extend((mime.len() as u32).to_be_bytes());
	block.extend(mime.as_bytes());
	block.extend(0_u32.to_be_bytes());
	block.extend([0; 16]);
	block.extend((data.len() as u32).to_be_bytes());
	block.extend(data);
	block
}

// WAV

/// A 16-bit PCM WAV file written by `hound`, holding `frames` samples per channel
pub fn hound_wav(channels: u16, sample_rate: u32, frames: u32) -> Vec<u8> {
	let spec = hound::WavSpec {
		channels,
		sample_rate,
		bits_per_sample: 16,
		sample_format: hound::SampleFormat::Int,
	};

	let mut buf = Cursor::new(Vec::new());
	{
		let mut writer = hound::WavWriter::new(&mut buf, spec).unwrap();
		for i in 0..frames * u32::from(channels) {
			writer.write_sample((i % 64) as i16).unwrap();
		}
		writer.finalize().unwrap();
	}

	buf.into_inner()
}

/// Append `chunk` to a RIFF file, fixing up the RIFF size
pub fn append_riff_chunk(file: &mut Vec<u8>, fourcc: &[u8; 4], content: &[u8]) {
	file.extend(fourcc);
	file.extend((content.len() as u32).to_le_bytes());
	file.extend(content);
	if content.len() % 2 != 0 {
		file.push(0);
	}

	let riff_size = (file.len() - 8) as u32;
	file[4..8].copy_from_slice(&riff_size.to_le_bytes());
}

pub fn riff_info(items: &[(&[u8; 4], &str)]) -> Vec<u8> {
	let mut list = b"INFO".to_vec();
	for (key, value) in items {
		let mut value = value.as_bytes().to_vec();
		value.push(0);

		list.extend(*key);
		list.extend((value.len() as u32).to_le_bytes());
		list.extend(&value);
		if value.len() % 2 != 0 {
			list.push(0);
		}
	}
	list
}

// ASF

pub const ASF_HEADER: [u8; 16] = [
	0x30, 0x26, 0xB2, 0x75, 0x8E, 0x66, 0xCF, 0x11, 0xA6, 0xD9, 0x00, 0xAA, 0x00, 0x62, 0xCE, 0x6C,
];
pub const ASF_FILE_PROPERTIES: [u8; 16] = [
	0xA1, 0xDC, 0xAB, 0x8C, 0x47, 0xA9, 0xCF, 0x11, 0x8E, 0xE4, 0x00, 0xC0, 0x0C, 0x20, 0x53, 0x65,
];
pub const ASF_STREAM_PROPERTIES: [u8; 16] = [
	0x91, 0x07, 0xDC, 0xB7, 0xB7, 0xA9, 0xCF, 0x11, 0x8E, 0xE6, 0x00, 0xC0, 0x0C, 0x20, 0x53, 0x65,
];
pub const ASF_CONTENT_DESCRIPTION: [u8; 16] = [
	0x33, 0x26, 0xB2, 0x75, 0x8E, 0x66, 0xCF, 0x11, 0xA6, 0xD9, 0x00, 0xAA, 0x00, 0x62, 0xCE, 0x6C,
];
pub const ASF_EXTENDED_CONTENT_DESCRIPTION: [u8; 16] = [
	0x40, 0xA4, 0xD0, 0xD2, 0x07, 0xE3, 0xD2, 0x11, 0x97, 0xF0, 0x00, 0xA0, 0xC9, 0x5E, 0xA8, 0x50,
];
pub const ASF_AUDIO_MEDIA: [u8; 16] = [
	0x40, 0x9E, 0x69, 0xF8, 0x4D, 0x5B, 0xCF, 0x11, 0xA8, 0xFD, 0x00, 0x80, 0x5F, 0x5C, 0x44, 0x2B,
];

pub fn utf16(text: &str) -> Vec<u8> {
	let mut bytes: Vec<u8> = text.encode_utf16().flat_map(u16::to_le_bytes).collect();
	bytes.extend([0, 0]);
	bytes
}

pub fn asf_object(guid: [u8; 16], content: &[u8]) -> Vec<u8> {
	let mut object = guid.to_vec();
	object.extend((content.len() as u64 + 24).to_le_bytes());
	object.extend(content);
	object
}

pub fn asf_file(objects: &[Vec<u8>]) -> Vec<u8> {
	let body = objects.concat();

	let mut file = ASF_HEADER.to_vec();
	file.extend((body.len() as u64 + 30).to_le_bytes());
	file.extend((objects.len() as u32).to_le_bytes());
	file.extend([0x01, 0x02]);
	file.extend(body);
	file
}

pub fn asf_file_properties(play_duration: u64) -> Vec<u8> {
	let mut content = vec![0; 40];
	content.extend(play_duration.to_le_bytes());
	content.extend([0; 32]);
	content
}

pub fn asf_audio_stream(channels: u16, sample_rate: u32, average_bytes_per_second: u32) -> Vec<u8> {
	let mut content = ASF_AUDIO_MEDIA.to_vec();
	content.extend([0; 24]);
	content.extend(18_u32.to_le_bytes());
	content.extend([0; 10]);
	content.extend(0x0161_u16.to_le_bytes());
	content.extend(channels.to_le_bytes());
	content.extend(sample_rate.to_le_bytes());
	content.extend(average_bytes_per_second.to_le_bytes());
	content.extend(4_u16.to_le_bytes());
	content.extend(16_u16.to_le_bytes());
	content.extend(0_u16.to_le_bytes());
	content
}

pub fn asf_content_description(title: &str, author: &str) -> Vec<u8> {
	let (title, author) = (utf16(title), utf16(author));

	let mut content = Vec::new();
	for len in [title.len(), author.len(), 0, 0, 0] {
		content.extend((len as u16).to_le_bytes());
	}
	content.extend(title);
	content.extend(author);
	content
}

pub fn asf_string_descriptors(descriptors: &[(&str, &str)]) -> Vec<u8> {
	let mut content = (descriptors.len() as u16).to_le_bytes().to_vec();
	for (name, value) in descriptors {
		let (name, value) = (utf16(name), utf16(value));
		content.extend((name.len() as u16).to_le_bytes());
		content.extend(name);
		content.extend(0_u16.to_le_bytes());
		content.extend((value.len() as u16).to_le_bytes());
		content.extend(value);
	}
	content
}

macro_rules! try_vec {
	($elem:expr; $size:expr) => {{ $crate::util::alloc::fallible_vec_from_element($elem, $size)? }};
}

// Shorthand for return Err(TagsiftError::new(ErrorKind::Foo))
//
// Usage:
// - err!(Variant)          -> return Err(TagsiftError::new(ErrorKind::Variant))
// - err!(Variant(Message)) -> return Err(TagsiftError::new(ErrorKind::Variant(Message)))
macro_rules! err {
	($variant:ident) => {
		return Err(crate::error::TagsiftError::new(
			crate::error::ErrorKind::$variant,
		))
	};
	($variant:ident($reason:literal)) => {
		return Err(crate::error::TagsiftError::new(
			crate::error::ErrorKind::$variant($reason),
		))
	};
}

// Shorthand for FileDecodingError::new(FileType::Foo, "Message")
//
// Usage:
//
// - decode_err!(Variant, Message)
// - decode_err!(Message)
//
// or bail:
//
// - decode_err!(@BAIL Variant, Message)
// - decode_err!(@BAIL Message)
macro_rules! decode_err {
	($file_ty:ident, $reason:literal) => {
		Into::<crate::error::TagsiftError>::into(crate::error::FileDecodingError::new(
			crate::file::FileType::$file_ty,
			$reason,
		))
	};
	($reason:literal) => {
		Into::<crate::error::TagsiftError>::into(crate::error::FileDecodingError::from_description(
			$reason,
		))
	};
	(@BAIL $($file_ty:ident,)? $reason:literal) => {
		return Err(decode_err!($($file_ty,)? $reason))
	};
}

// Shorthand for Id3v2Error::new(Id3v2ErrorKind::Foo)
//
// Usage:
//
// - id3v2_err!(Variant)
// - id3v2_err!(@BAIL Variant)
macro_rules! id3v2_err {
	($variant:ident $(($($arg:expr),+))?) => {
		Into::<crate::error::TagsiftError>::into(crate::error::Id3v2Error::new(
			crate::error::Id3v2ErrorKind::$variant$(($($arg),+))?,
		))
	};
	(@BAIL $variant:ident $(($($arg:expr),+))?) => {
		return Err(id3v2_err!($variant $(($($arg),+))?))
	};
}

pub(crate) use {decode_err, err, id3v2_err, try_vec};

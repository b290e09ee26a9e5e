use crate::id3::v1::GENRES;

/// Split a `"N/M"` style value into its number and total
///
/// Either side may be missing or unparsable, in which case it is `None`.
pub(crate) fn split_number_pair(value: &str) -> (Option<u32>, Option<u32>) {
	let mut split = value.splitn(2, '/');

	let number = split.next().and_then(parse_number);
	let total = split.next().and_then(parse_number);

	(number, total)
}

pub(crate) fn parse_number(value: &str) -> Option<u32> {
	value.trim().trim_end_matches('\0').parse::<u32>().ok()
}

/// Look up an ID3v1 genre index
///
/// Out of range indices are unset rather than an error.
pub(crate) fn genre_by_index(index: usize) -> Option<&'static str> {
	GENRES.get(index).copied()
}

/// Resolve the numeric genre references used by ID3v2
///
/// Handles `"(17)"`, `"17"`, and `"(17)Rock"` (where the refinement text wins), as well as the
/// special `(RX)` and `(CR)` references. Multiple NUL separated values are each resolved and
/// joined with `/`.
pub(crate) fn resolve_genre(value: &str) -> Option<String> {
	let resolved = value
		.split('\0')
		.filter(|v| !v.is_empty())
		.filter_map(resolve_single_genre)
		.collect::<Vec<_>>();

	if resolved.is_empty() {
		return None;
	}

	Some(resolved.join("/"))
}

fn resolve_single_genre(value: &str) -> Option<String> {
	let value = value.trim();

	if let Some(rest) = value.strip_prefix('(') {
		if let Some((reference, refinement)) = rest.split_once(')') {
			// "((" escapes a literal parenthesis
			if reference.starts_with('(') {
				return Some(value[1..].to_owned());
			}

			if !refinement.is_empty() {
				return Some(refinement.to_owned());
			}

			return match reference {
				"RX" => Some(String::from("Remix")),
				"CR" => Some(String::from("Cover")),
				_ => lookup_numeric(reference),
			};
		}
	}

	if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
		return lookup_numeric(value);
	}

	if value.is_empty() {
		return None;
	}

	Some(value.to_owned())
}

fn lookup_numeric(reference: &str) -> Option<String> {
	let genre = reference
		.parse::<usize>()
		.ok()
		.and_then(genre_by_index)
		.map(str::to_owned);

	if genre.is_none() {
		log::debug!("Dropping unknown genre reference: {reference}");
	}

	genre
}

/// Join NUL separated values with `/`, dropping empty values
pub(crate) fn join_multi_value(value: &str) -> String {
	if !value.contains('\0') {
		return value.to_owned();
	}

	value
		.split('\0')
		.filter(|v| !v.is_empty())
		.collect::<Vec<_>>()
		.join("/")
}

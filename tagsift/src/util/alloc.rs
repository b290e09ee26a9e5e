use crate::config::global_options;
use crate::error::Result;
use crate::macros::err;

fn check_allocation_limit(size: usize) -> Result<()> {
	if size > unsafe { global_options().allocation_limit } {
		err!(TooMuchData);
	}

	Ok(())
}

/// **DO NOT USE DIRECTLY**
///
/// Creates a `Vec` of the specified length, containing copies of `element`.
///
/// This should be used through [`try_vec!`](crate::macros::try_vec)
pub(crate) fn fallible_vec_from_element<T>(element: T, expected_size: usize) -> Result<Vec<T>>
where
	T: Clone,
{
	let mut v = Vec::new();
	if expected_size == 0 {
		return Ok(v);
	}

	check_allocation_limit(expected_size)?;

	v.try_reserve_exact(expected_size)?;
	v.resize(expected_size, element);

	Ok(v)
}

/// Provides the `try_with_capacity` method on `Vec`
pub(crate) trait VecFallibleCapacity<T>: Sized {
	/// Same as `Vec::with_capacity`, but takes `GlobalOptions::allocation_limit` into account.
	///
	/// Named `try_with_capacity_stable` to avoid conflicts with the nightly `Vec::try_with_capacity`.
	fn try_with_capacity_stable(capacity: usize) -> Result<Self>;
}

impl<T> VecFallibleCapacity<T> for Vec<T> {
	fn try_with_capacity_stable(capacity: usize) -> Result<Self> {
		check_allocation_limit(capacity)?;

		let mut v = Vec::new();
		v.try_reserve(capacity)?;

		Ok(v)
	}
}

#[cfg(test)]
mod tests {
	use super::{VecFallibleCapacity, fallible_vec_from_element};
	use crate::config::{GlobalOptions, apply_global_options};
	use crate::error::ErrorKind;

	#[test_log::test]
	fn vec_fallible_repeat() {
		let u8_vec_len_20 = fallible_vec_from_element(0u8, 20).unwrap();
		assert_eq!(u8_vec_len_20.len(), 20);
		assert!(u8_vec_len_20.iter().all(|e| *e == 0));

		let u8_large_vec = fallible_vec_from_element(0u8, u32::MAX as usize);
		assert!(u8_large_vec.is_err());
	}

	#[test_log::test]
	fn custom_allocation_limit() {
		apply_global_options(GlobalOptions::new().allocation_limit(64));

		assert!(fallible_vec_from_element(0u8, 64).is_ok());
		let err = Vec::<u8>::try_with_capacity_stable(65).unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::TooMuchData));

		apply_global_options(GlobalOptions::default());
	}
}

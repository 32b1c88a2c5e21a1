//! Hash code combination and the hashing capability used by containers.
//!
//! Every hash in the runtime is a `u64`. Values that know how to hash
//! themselves implement [`HashCode`]; native scalars and strings fall back to
//! FxHash over their [`Hash`] impl, which keeps hashes stable between runs.

use fxhash::FxHasher64;
use std::hash::{BuildHasherDefault, Hash, Hasher};

/// Starting value of both accumulators.
const SEED: u64 = (0x1505 << 16) + 0x1505;

/// Odd multiplier applied to the second accumulator when folding.
const MULTIPLIER: u64 = 0x5d58_8b65;

/// `BuildHasher` used by the associative containers.
pub type KeyHasher = BuildHasherDefault<FxHasher64>;

#[inline]
fn mix(acc: u64, code: u64) -> u64 {
    ((acc << 5).wrapping_add(acc).wrapping_add(acc >> 27)) ^ code
}

/// Folds a sequence of hash codes into one.
///
/// Even positions feed the first accumulator, odd positions the second, so
/// the result depends on the order of the inputs.
///
/// # Example
///
/// ```rust
/// use ucrt::runtime::hash::combine_hash_codes;
///
/// let a = combine_hash_codes([1, 2, 3]);
/// let b = combine_hash_codes([3, 2, 1]);
/// assert_ne!(a, b);
/// assert_eq!(a, combine_hash_codes(vec![1, 2, 3]));
/// ```
#[must_use]
pub fn combine_hash_codes<I>(codes: I) -> u64
where
    I: IntoIterator<Item = u64>,
{
    let mut hash1 = SEED;
    let mut hash2 = SEED;

    for (i, code) in codes.into_iter().enumerate() {
        if i % 2 == 0 {
            hash1 = mix(hash1, code);
        } else {
            hash2 = mix(hash2, code);
        }
    }

    hash1.wrapping_add(hash2.wrapping_mul(MULTIPLIER))
}

/// Hashes a value with the native fallback hasher.
#[must_use]
pub fn native_hash<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = FxHasher64::default();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Values that produce their own runtime hash code.
///
/// Object handles defer to the object's `hash_code`; scalars and strings use
/// [`native_hash`].
pub trait HashCode {
    /// Returns the hash code of this value.
    fn hash_code(&self) -> u64;
}

/// Hashes any value that has a hash code.
#[must_use]
pub fn hash<T: HashCode + ?Sized>(value: &T) -> u64 {
    value.hash_code()
}

macro_rules! native_hash_code {
    ($($ty:ty),* $(,)?) => {
        $(
            impl HashCode for $ty {
                #[inline]
                fn hash_code(&self) -> u64 {
                    native_hash(self)
                }
            }
        )*
    };
}

native_hash_code!(
    i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, bool, char, str, String,
);

impl HashCode for f32 {
    fn hash_code(&self) -> u64 {
        // -0.0 == 0.0, so both zeros share one code.
        let value = if *self == 0.0 { 0.0 } else { *self };
        native_hash(&value.to_bits())
    }
}

impl HashCode for f64 {
    fn hash_code(&self) -> u64 {
        // -0.0 == 0.0, so both zeros share one code.
        let value = if *self == 0.0 { 0.0 } else { *self };
        native_hash(&value.to_bits())
    }
}

impl<T: HashCode + ?Sized> HashCode for &T {
    fn hash_code(&self) -> u64 {
        (**self).hash_code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_combination_is_seeded() {
        let expected = SEED.wrapping_add(SEED.wrapping_mul(MULTIPLIER));
        assert_eq!(combine_hash_codes(std::iter::empty()), expected);
    }

    #[test]
    fn test_combination_matches_manual_fold() {
        let h1 = mix(mix(SEED, 10), 30);
        let h2 = mix(SEED, 20);
        let expected = h1.wrapping_add(h2.wrapping_mul(MULTIPLIER));

        assert_eq!(combine_hash_codes([10, 20, 30]), expected);
    }

    #[test]
    fn test_combination_is_position_sensitive() {
        assert_ne!(combine_hash_codes([1, 2]), combine_hash_codes([2, 1]));
        assert_ne!(combine_hash_codes([7]), combine_hash_codes([0, 7]));
    }

    #[test]
    fn test_combination_is_deterministic() {
        let codes: Vec<u64> = (0..100).map(|i| i * 31).collect();
        assert_eq!(
            combine_hash_codes(codes.iter().copied()),
            combine_hash_codes(codes)
        );
    }

    #[test]
    fn test_large_codes_wrap() {
        let result = combine_hash_codes([u64::MAX, u64::MAX, u64::MAX]);
        assert_eq!(result, combine_hash_codes([u64::MAX, u64::MAX, u64::MAX]));
    }

    #[test]
    fn test_native_fallback() {
        assert_eq!(hash(&42i32), native_hash(&42i32));
        assert_eq!(hash("abc"), hash(&String::from("abc")));
        assert_eq!(hash(&1.5f64), hash(&1.5f64));
        assert_ne!(hash(&1u8), hash(&2u8));
    }

    #[test]
    fn test_signed_zeros_hash_alike() {
        assert_eq!(hash(&0.0f64), hash(&-0.0f64));
        assert_eq!(hash(&0.0f32), hash(&-0.0f32));
        assert_ne!(hash(&0.0f64), hash(&f64::MIN_POSITIVE));
    }
}

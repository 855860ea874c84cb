use std::fmt::Write;

use crate::hasher::Hash;

/// Returns true iff the first `difficulty` bits of `hash`, read MSB-first
/// from byte 0, are all zero.
///
/// A difficulty wider than the digest can never be met and yields false.
pub fn is_satisfied(hash: &Hash, difficulty: u32) -> bool {
    let full_bytes = (difficulty / 8) as usize;
    let rem_bits = difficulty % 8;

    if full_bytes > hash.len() || (full_bytes == hash.len() && rem_bits > 0) {
        return false;
    }

    if hash[..full_bytes].iter().any(|byte| *byte != 0) {
        return false;
    }

    rem_bits == 0 || hash[full_bytes] & !(0xffu8 >> rem_bits) == 0
}

pub fn leading_zero_bits(hash: &Hash) -> u32 {
    let mut count = 0;
    for byte in hash {
        let zeros = byte.leading_zeros();
        count += zeros;
        if zeros < 8 {
            break;
        }
    }
    count
}

pub fn to_bit_string(hash: &Hash) -> String {
    hash.iter().fold(String::with_capacity(hash.len() * 8), |mut bits, byte| {
        let _ = write!(bits, "{byte:08b}");
        bits
    })
}

use sha2::{Digest, Sha256};

pub type Hash = [u8; 32];

/// Hashes `prefix || decimal(nonce)` starting from a state that has already
/// absorbed the prefix.
#[derive(Clone)]
pub struct NonceHasher {
    prefixed: Sha256,
}

impl NonceHasher {
    pub fn new(prefix: &str) -> Self {
        let mut prefixed = Sha256::new();
        prefixed.update(prefix.as_bytes());

        Self { prefixed }
    }

    pub fn hash(&self, nonce: u64) -> Hash {
        let mut digits = [0u8; 20];
        let mut hasher = self.prefixed.clone();
        hasher.update(encode_decimal(nonce, &mut digits));
        hasher.finalize().into()
    }
}

/// Writes `nonce` as ASCII decimal into the tail of `buf`.
fn encode_decimal(mut nonce: u64, buf: &mut [u8; 20]) -> &[u8] {
    let mut pos = buf.len();
    loop {
        pos -= 1;
        buf[pos] = b'0' + (nonce % 10) as u8;
        nonce /= 10;
        if nonce == 0 {
            break;
        }
    }
    &buf[pos..]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(prefix: &str, nonce: u64) -> Hash {
        Sha256::digest(format!("{prefix}{nonce}").as_bytes()).into()
    }

    #[test]
    fn test_decimal_encoding() {
        let mut buf = [0u8; 20];
        assert_eq!(encode_decimal(0, &mut buf), b"0");
        assert_eq!(encode_decimal(7, &mut buf), b"7");
        assert_eq!(encode_decimal(1_000_000, &mut buf), b"1000000");
        assert_eq!(encode_decimal(u64::MAX, &mut buf), b"18446744073709551615");
    }

    #[test]
    fn test_matches_plain_sha256() {
        let hasher = NonceHasher::new("test");

        for nonce in [0, 1, 9, 10, 12345, 10_000_000, u64::MAX] {
            assert_eq!(hasher.hash(nonce), reference("test", nonce));
        }
    }

    #[test]
    fn test_empty_prefix() {
        let hasher = NonceHasher::new("");
        assert_eq!(hasher.hash(42), reference("", 42));
    }

    #[test]
    fn test_deterministic() {
        let hasher = NonceHasher::new("prefix");
        assert_eq!(hasher.hash(99), hasher.hash(99));
        assert_eq!(hasher.hash(99), NonceHasher::new("prefix").hash(99));
        assert_ne!(hasher.hash(99), hasher.hash(100));
    }
}

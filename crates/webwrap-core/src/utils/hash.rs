use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of `data`.
pub fn hash_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    format!("{:x}", result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_digest() {
        assert_eq!(
            hash_bytes(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn identical_icons_hash_equal() {
        let png = [0x89, b'P', b'N', b'G'];
        assert_eq!(hash_bytes(&png), hash_bytes(&png));
        assert_ne!(hash_bytes(&png), hash_bytes(b"PNG"));
    }
}

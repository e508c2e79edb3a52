use sha2::Digest;

const SALT_LEN: usize = 16;
const SALT_CHARSET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// One-way hashes a password with a fresh random salt.
///
/// The stored form is `sha512$<salt>$<hex digest>`, so the salt never
/// has to be persisted separately.
pub fn hash(password: &str) -> String {
    let salt = random_string::generate(SALT_LEN, SALT_CHARSET);
    encode(&salt, password)
}

/// Checks a plaintext password against a stored `sha512$..` value.
pub fn verify(password: &str, encoded: &str) -> bool {
    let mut parts = encoded.splitn(3, '$');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("sha512"), Some(salt), Some(_)) => encode(salt, password) == encoded,
        _ => false,
    }
}

fn encode(salt: &str, password: &str) -> String {
    let mut hasher = sha2::Sha512::default();
    hasher.update(format!("{salt}:{password}"));
    format!("sha512${salt}${}", hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::{hash, verify};

    #[test]
    fn never_stores_plaintext() {
        let encoded = hash("pw");
        assert_ne!(encoded, "pw");
        assert!(encoded.starts_with("sha512$"));
        assert!(!encoded.contains("pw$"));
    }

    #[test]
    fn verifies_round_trip() {
        let encoded = hash("hunter2");
        assert!(verify("hunter2", &encoded));
        assert!(!verify("hunter3", &encoded));
    }

    #[test]
    fn salts_are_fresh_per_hash() {
        assert_ne!(hash("pw"), hash("pw"));
    }

    #[test]
    fn rejects_malformed_stored_values() {
        assert!(!verify("pw", "pw"));
        assert!(!verify("pw", "md5$salt$digest"));
        assert!(!verify("pw", "sha512$missing-digest"));
    }
}

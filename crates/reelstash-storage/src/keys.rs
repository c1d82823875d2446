//! Storage key generation
//!
//! Keys must be unpredictable and collision-improbable: the token is the
//! URL-safe base64 encoding of 32 bytes from a CSPRNG (a 2^256 keyspace), so
//! two uploads of identical content always get different keys.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use rand::RngCore;

use reelstash_core::models::AspectClass;

const KEY_RANDOM_BYTES: usize = 32;
const VIDEO_EXTENSION: &str = "mp4";

fn random_token() -> String {
    let mut bytes = [0u8; KEY_RANDOM_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Generate a video storage key: `{classification}/{token}.mp4`.
pub fn generate_video_key(class: AspectClass) -> String {
    format!("{}/{}.{}", class.prefix(), random_token(), VIDEO_EXTENSION)
}

/// Generate a bare random filename token for thumbnail assets.
pub fn generate_thumbnail_token() -> String {
    random_token()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_key_shape() {
        let key = generate_video_key(AspectClass::Landscape);
        let (prefix, rest) = key.split_once('/').unwrap();
        assert_eq!(prefix, "landscape");
        let (token, ext) = rest.rsplit_once('.').unwrap();
        assert_eq!(ext, "mp4");
        // 32 bytes -> 43 base64 chars without padding
        assert_eq!(token.len(), 43);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_video_key_prefix_follows_classification() {
        assert!(generate_video_key(AspectClass::Portrait).starts_with("portrait/"));
        assert!(generate_video_key(AspectClass::Other).starts_with("other/"));
    }

    #[test]
    fn test_keys_are_never_reused() {
        let a = generate_video_key(AspectClass::Landscape);
        let b = generate_video_key(AspectClass::Landscape);
        assert_ne!(a, b);
    }
}

use sha2::{Digest, Sha512};
use tower_sessions::cookie::Key;

/// Cookie signing key derived from the configured secret.
/// `Key` wants exactly 64 bytes of material; SHA-512 gives that for any secret length.
pub fn session_key(secret: &str) -> Key {
    Key::from(Sha512::digest(secret.as_bytes()).as_slice())
}

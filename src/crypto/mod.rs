pub mod password;
pub mod session_key;

pub use password::{hash_password, verify_password};
pub use session_key::session_key;

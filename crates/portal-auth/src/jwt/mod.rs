//! JWT token encoding, decoding, and claims management.

pub mod bearer;
pub mod claims;
pub mod decoder;
pub mod encoder;

pub use bearer::extract_bearer;
pub use claims::{Claims, Principal};
pub use decoder::JwtDecoder;
pub use encoder::{IssuedToken, JwtEncoder};

//! Hashing, signing and token generation

pub mod jwt;
pub mod password;
pub mod token;

pub use jwt::{create_access_token, verify_access_token, AccessClaims, JwtConfig};
pub use password::BcryptPasswordHasher;
pub use token::{generate_id, generate_opaque_token, token_preview};

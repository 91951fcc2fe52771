use rand::RngCore;
use rand::rngs::OsRng;
use thiserror::Error;

pub const TOKEN_BYTES: usize = 32;

/// The OS random source could not be read. There is no safe fallback.
#[derive(Debug, Error)]
#[error("secure random source unavailable: {0}")]
pub struct TokenError(#[from] rand::Error);

/// Returns 32 bytes from the OS CSPRNG as 64 lowercase hex characters.
///
/// Nothing in the gateway verifies these tokens yet; they are issued and echoed only.
pub fn generate_token() -> Result<String, TokenError> {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.try_fill_bytes(&mut bytes)?;
    Ok(hex::encode(bytes))
}

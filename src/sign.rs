//! Deterministic signing of time-step codes.

use crate::{error::Error, payload::SIG_CAPACITY};
use rsa::{Pkcs1v15Sign, RsaPrivateKey};
use sha2::{Digest, Sha256};

/// Sign a time-step counter with PKCS#1 v1.5 over SHA-256.
///
/// The hash input is the full 8-byte big-endian counter, wider than
/// the 32-bit field that ends up in the payload; both widths are part
/// of the contract with the kernel module and must not drift.  The
/// scheme is deterministic: the same key and step always produce the
/// same bytes.
pub fn sign(key: &RsaPrivateKey, step: u64) -> Result<Vec<u8>, Error> {
    let digest = Sha256::digest(&step.to_be_bytes());
    let signature = key
        .sign(Pkcs1v15Sign::new::<Sha256>(), digest.as_slice())
        .map_err(Error::SigningFailed)?;

    // A key larger than 2048 bits produces a signature that cannot
    // fit the fixed wire buffer.  Refusing here keeps truncated
    // signatures out of the payload builder entirely.
    if signature.len() > SIG_CAPACITY {
        return Err(Error::SignatureTooLong(signature.len()));
    }

    Ok(signature)
}

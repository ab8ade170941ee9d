//! Wire payload for the kernel escalation interface.

use crate::error::Error;
use std::mem;
use zerocopy::{AsBytes, FromBytes};

/// prctl option requesting escalation, agreed out-of-band with the
/// kernel module.
pub const ESCALATE_REQUEST: u32 = 0xCAFE_BABE;

/// Fixed capacity of the signature buffer.
pub const SIG_CAPACITY: usize = 256;

/// Total payload size shared with the kernel module.
pub const PAYLOAD_SIZE: usize = 264;

/// Authentication payload passed to the kernel module by reference.
///
/// The layout is a bit-exact contract with the kernel side: field
/// order, field widths and the 264-byte total must match the module's
/// struct exactly.  Byte order is native since both ends live on the
/// same host.  `repr(C)` with these field types has no implicit
/// padding.
#[derive(Debug, AsBytes, FromBytes)]
#[repr(C)]
pub struct AuthPayload {
    /// Time-step code, narrowed to 32 bits.
    pub code: u32,
    /// Number of valid bytes in `sig`.
    pub sig_len: u32,
    /// PKCS#1 v1.5 signature, left-justified, zero-padded.
    pub sig: [u8; SIG_CAPACITY],
}

const _: [(); PAYLOAD_SIZE] = [(); mem::size_of::<AuthPayload>()];

impl AuthPayload {
    /// Build a payload from a code and a signature.
    ///
    /// The buffer starts zeroed so the bytes past `sig_len` never
    /// carry stack contents into the kernel.  Oversized signatures
    /// are rejected, never truncated.
    pub fn new(code: u32, signature: &[u8]) -> Result<Self, Error> {
        if signature.len() > SIG_CAPACITY {
            return Err(Error::SignatureTooLong(signature.len()));
        }

        let mut payload = Self::new_zeroed();
        payload.code = code;
        payload.sig_len = signature.len() as u32;
        payload.sig[..signature.len()].copy_from_slice(signature);
        Ok(payload)
    }
}

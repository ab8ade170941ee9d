//! su-style escalation client for a kernel-resident access-control
//! module.
//!
//! The kernel module exposes a narrow prctl-based interface: a caller
//! that presents a signed time-step code becomes root.  This crate
//! implements the client side of that protocol and the surrounding
//! `su` behavior: derive the code from the clock, sign it with an RSA
//! key loaded from a credential file, hand the fixed-layout payload to
//! the kernel, and only then switch identity and replace the process
//! with the target shell.
//!
//! The kernel-side verifier, its replay window, and key provisioning
//! are out of scope here; the wire payload in [`payload`] is the
//! bit-exact contract shared with it.

mod error;

pub mod cli;
pub mod escalate;
pub mod ident;
pub mod key;
pub mod payload;
pub mod shell;
pub mod sign;
pub mod totp;

pub use {
    cli::Config,
    error::{Error, EXIT_EXEC_FAILED, EXIT_INVALID_ARGS, EXIT_PERMISSION_DENIED, EXIT_SUCCESS},
};

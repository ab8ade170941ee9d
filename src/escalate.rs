//! Escalation policy and the request protocol against the kernel
//! module.
//!
//! The policy decides whether an attempt is needed at all; the
//! requester issues exactly one privileged call per invocation.
//! There is no retry loop: repeated signing against a live time step
//! gains nothing, and the next step means a fresh invocation.

use crate::{
    cli::Config,
    error::Error,
    key,
    payload::AuthPayload,
    sign, totp,
};
use nix::unistd::{geteuid, Uid};
use prsu_log::{info, warn};
use std::path::Path;

#[cfg(any(target_os = "android", target_os = "linux"))]
use {crate::payload::ESCALATE_REQUEST, zerocopy::AsBytes};

/// The privileged target user.
pub const ROOT: &str = "root";

/// Outcome of a single escalation request.
#[derive(Debug)]
pub enum Outcome {
    /// The kernel module granted the request and the effective uid
    /// is now root.
    Granted,
    /// The call returned success but the identity did not change.
    Denied,
    /// The privileged call itself failed.
    Transport(nix::Error),
}

/// What the policy decided before any side effects happen.
#[derive(Debug, PartialEq)]
pub enum Plan<'a> {
    /// Already privileged, or a non-privileged target: skip
    /// escalation entirely.
    NotRequired,
    /// Escalation is needed but the credentials are not configured;
    /// the privileged call must not be issued.
    MissingCredentials,
    /// Attempt the protocol with the given credential file.
    Attempt {
        /// PEM credential file holding the signing key.
        key_file: &'a Path,
    },
}

/// Pure policy decision from the current and the requested identity.
///
/// An attempt requires both a key file and a non-zero arming code;
/// anything less is caller misconfiguration, not a rejected proof.
pub fn plan<'a>(
    euid: Uid,
    target: &str,
    key_file: Option<&'a Path>,
    code: Option<u32>,
) -> Plan<'a> {
    if euid.is_root() || target != ROOT {
        return Plan::NotRequired;
    }

    match (key_file, code) {
        (Some(key_file), Some(code)) if code != 0 => Plan::Attempt { key_file },
        _ => Plan::MissingCredentials,
    }
}

/// Issue exactly one escalation request to the kernel module.
///
/// The payload stays owned by the caller for the whole call; the
/// kernel only reads it.  A zero status alone is not trusted as proof
/// of elevation: the effective uid is re-checked afterwards, guarding
/// against a module that acknowledges receipt without granting.
pub fn request(payload: &AuthPayload) -> Outcome {
    cfg_if::cfg_if! {
        if #[cfg(any(target_os = "android", target_os = "linux"))] {
            let status = unsafe {
                libc::syscall(
                    libc::SYS_prctl,
                    ESCALATE_REQUEST as libc::c_ulong,
                    payload.as_bytes().as_ptr(),
                    0usize,
                    0usize,
                    0usize,
                )
            };
            if let Err(err) = nix::errno::Errno::result(status) {
                return Outcome::Transport(err);
            }
        } else {
            let _ = payload;
            return Outcome::Transport(nix::errno::Errno::ENOSYS);
        }
    }

    if geteuid().is_root() {
        Outcome::Granted
    } else {
        Outcome::Denied
    }
}

/// Run the escalation policy: at most one attempt, terminal on
/// failure.
pub fn escalate(config: &Config) -> Result<(), Error> {
    match plan(
        geteuid(),
        &config.user,
        config.key_file.as_deref(),
        config.code,
    ) {
        Plan::NotRequired => Ok(()),
        Plan::MissingCredentials => Err(Error::MissingCredentials),
        Plan::Attempt { key_file } => attempt(key_file),
    }
}

/// One full protocol round: load, sign, build, request.
fn attempt(key_file: &Path) -> Result<(), Error> {
    let key = key::load(key_file)?;
    let step = totp::time_step();
    let signature = sign::sign(&key, step)?;
    let payload = AuthPayload::new(totp::wire_code(step), &signature)?;

    info!("requesting escalation"; "step" => step);

    match request(&payload) {
        Outcome::Granted => {
            info!("escalation granted"; "euid" => geteuid().as_raw());
            Ok(())
        }
        Outcome::Denied => {
            warn!("escalation denied, effective uid unchanged");
            Err(Error::Denied)
        }
        Outcome::Transport(err) => {
            warn!("escalation request failed"; "error" => %err);
            Err(Error::Transport(err))
        }
    }
}

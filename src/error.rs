use derive_more::{Display, From};
use std::io;

/// Exit code for a successful invocation.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for a rejected or failed escalation.
pub const EXIT_PERMISSION_DENIED: i32 = 1;
/// Exit code for caller misuse.
pub const EXIT_INVALID_ARGS: i32 = 2;
/// Exit code when the shell could not be executed.
pub const EXIT_EXEC_FAILED: i32 = 127;

/// Common errors.
#[derive(Debug, Display, From)]
pub enum Error {
    #[display(fmt = "I/O error: {}", "_0")]
    IoError(io::Error),
    #[display(fmt = "{}", "_0")]
    UnixError(nix::Error),
    #[display(fmt = "{}", "_0")]
    NulError(std::ffi::NulError),
    #[display(fmt = "cannot read key file: {}", "_0")]
    #[from(ignore)]
    KeyFileUnreadable(io::Error),
    #[display(fmt = "key file does not contain a PEM private key")]
    KeyFormatInvalid,
    #[display(fmt = "invalid private key: {}", "_0")]
    KeyParseFailed(Box<dyn std::error::Error>),
    #[display(fmt = "signing failed: {}", "_0")]
    SigningFailed(rsa::Error),
    #[display(fmt = "signature of {} bytes exceeds the payload buffer", "_0")]
    SignatureTooLong(usize),
    #[display(fmt = "key file and time-step code required")]
    MissingCredentials,
    #[display(fmt = "escalation request failed: {}", "_0")]
    #[from(ignore)]
    Transport(nix::Error),
    #[display(fmt = "authentication rejected")]
    Denied,
    #[display(fmt = "user '{}' not found", "_0")]
    UserNotFound(String),
    #[display(fmt = "failed to switch identity ({}) - {}", "_0", "_1")]
    IdentitySwitch(&'static str, nix::Error),
    #[display(fmt = "failed to execute {}: {}", "_0", "_1")]
    ExecFailed(String, nix::Error),
}

impl std::error::Error for Error {}

impl Error {
    /// Translate an error into the process exit code.
    ///
    /// Everything on the escalation and identity path collapses into
    /// the permission-denied code; which step rejected the attempt is
    /// only visible in the log.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::MissingCredentials => EXIT_INVALID_ARGS,
            Error::ExecFailed(..) => EXIT_EXEC_FAILED,
            _ => EXIT_PERMISSION_DENIED,
        }
    }
}

//! Target identity resolution and switching.

use crate::error::Error;
use nix::unistd::{self, chdir, User};
use prsu_log::warn;

/// Resolve the target user and adopt its identity.
///
/// The group id is set before the user id; once the user id has
/// changed there is no way back to the old privileges.  Only the
/// escalation policy decides whether this is reached at all.
pub fn switch(name: &str) -> Result<User, Error> {
    let user = User::from_name(name)?.ok_or_else(|| Error::UserNotFound(name.to_string()))?;

    // Replace the supplementary groups before dropping the gid.
    #[cfg(not(any(target_os = "ios", target_os = "macos", target_os = "redox")))]
    unistd::setgroups(&[user.gid]).map_err(|err| Error::IdentitySwitch("setgroups", err))?;

    cfg_if::cfg_if! {
        if #[cfg(any(target_os = "android", target_os = "freebsd",
                     target_os = "linux", target_os = "openbsd"))] {
            unistd::setresgid(user.gid, user.gid, user.gid)
                .map_err(|err| Error::IdentitySwitch("setresgid", err))?;
            unistd::setresuid(user.uid, user.uid, user.uid)
                .map_err(|err| Error::IdentitySwitch("setresuid", err))?;
        } else {
            unistd::setgid(user.gid).map_err(|err| Error::IdentitySwitch("setgid", err))?;
            unistd::setuid(user.uid).map_err(|err| Error::IdentitySwitch("setuid", err))?;
        }
    }

    // A missing home directory is not fatal for a shell switch.
    if let Err(err) = chdir(&user.dir) {
        warn!("could not change to home directory"; "dir" => %user.dir.display(), "error" => %err);
    }

    Ok(user)
}

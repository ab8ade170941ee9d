//! Shell selection, environment setup, and process replacement.

use crate::{cli::Config, error::Error};
use nix::unistd::{execve, User};
use std::{
    env,
    ffi::{CStr, CString},
    os::unix::ffi::OsStrExt,
    path::{Path, PathBuf},
};

/// Shells probed when the passwd entry does not name a usable one.
const FALLBACK_SHELLS: &[&str] = &["/bin/bash", "/bin/sh", "/system/bin/sh"];

/// PATH used when the environment is rebuilt from scratch.
const DEFAULT_PATH: &str =
    "/usr/local/sbin:/usr/local/bin:/usr/sbin:/usr/bin:/sbin:/bin:/system/bin";

/// Caller variables carried over into a rebuilt environment.
const KEEP_VARS: &[&str] = &["TERM", "DISPLAY", "LANG"];

/// Pick the shell: explicit override, the target user's passwd entry,
/// then the fallback list.
pub fn select_shell(config: &Config, user: &User) -> PathBuf {
    if let Some(shell) = &config.shell {
        return shell.clone();
    }

    if !user.shell.as_os_str().is_empty() && user.shell.exists() {
        return user.shell.clone();
    }

    FALLBACK_SHELLS
        .iter()
        .map(Path::new)
        .find(|path| path.exists())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("/bin/sh"))
}

/// Build the environment for the target user.
///
/// With `-p` the caller's environment is passed through unchanged;
/// otherwise a minimal set is created and a few terminal-related
/// variables are preserved.
pub fn environment(config: &Config, user: &User, shell: &Path) -> Vec<String> {
    if config.preserve_env {
        return env::vars().map(|(key, value)| format!("{}={}", key, value)).collect();
    }

    let mut environment = vec![
        format!("HOME={}", user.dir.display()),
        format!("USER={}", user.name),
        format!("LOGNAME={}", user.name),
        format!("SHELL={}", shell.display()),
        format!("PATH={}", DEFAULT_PATH),
    ];

    for key in KEEP_VARS {
        if let Ok(value) = env::var(key) {
            environment.push(format!("{}={}", key, value));
        }
    }

    environment
}

/// Argument vector for the shell invocation.
///
/// Login shells get the conventional `-` prefix in `argv[0]`;
/// trailing positional arguments are appended as-is.
pub fn argv(config: &Config, shell: &Path) -> Vec<String> {
    let base = shell
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| shell.display().to_string());

    let mut argv = if let Some(command) = &config.command {
        vec![base, "-c".to_string(), command.clone()]
    } else if config.login {
        vec![format!("-{}", base)]
    } else {
        vec![base]
    };

    argv.extend(config.args.iter().cloned());
    argv
}

/// Replace the current process with the selected shell.
///
/// Returns only on failure.
pub fn exec(config: &Config, user: &User) -> Result<(), Error> {
    let shell = select_shell(config, user);
    let args = to_cstrings(&argv(config, &shell))?;
    let environment = to_cstrings(&environment(config, user, &shell))?;

    let path = path_to_cstr(&shell);
    let args: Vec<&CStr> = args.iter().map(CString::as_c_str).collect();
    let environment: Vec<&CStr> = environment.iter().map(CString::as_c_str).collect();

    let err = match execve(&path, &args, &environment) {
        Ok(infallible) => match infallible {},
        Err(err) => err,
    };

    Err(Error::ExecFailed(shell.display().to_string(), err))
}

fn to_cstrings(strings: &[String]) -> Result<Vec<CString>, Error> {
    strings
        .iter()
        .map(|string| CString::new(string.as_bytes()).map_err(Into::into))
        .collect()
}

fn path_to_cstr(path: &Path) -> CString {
    let ospath = path.as_os_str().as_bytes().to_vec();
    // Unix paths cannot contain interior NUL bytes.
    unsafe { CString::from_vec_unchecked(ospath) }
}

// steplog - platform/environment.rs
//
// Facts about the running process shown in the startup banner: who, where,
// when, with what, and how it was invoked.
//
// Every probe degrades to a placeholder rather than failing; the banner is
// informational and must never abort a run.

use crate::util::constants;

const UNKNOWN: &str = "unknown";

/// Identity block printed once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunEnvironment {
    pub user: String,
    pub machine: String,
    pub time: String,
    pub runtime: String,
    pub current_dir: String,
    pub command_line: String,
}

impl RunEnvironment {
    /// Probe the current process.
    pub fn capture() -> Self {
        Self {
            user: user_name(),
            machine: machine_id(),
            time: timestamp(),
            runtime: runtime_version(),
            current_dir: current_dir(),
            command_line: command_line(),
        }
    }
}

/// Login name from the usual environment variables, then the password
/// database entry of the real user id.
pub fn user_name() -> String {
    ["USER", "USERNAME", "LOGNAME"]
        .iter()
        .find_map(|var| std::env::var(var).ok().filter(|v| !v.is_empty()))
        .or_else(account_name)
        .unwrap_or_else(|| UNKNOWN.to_string())
}

#[cfg(unix)]
fn account_name() -> Option<String> {
    use std::ffi::CStr;

    let mut buf = vec![0 as libc::c_char; 4096];
    // SAFETY: passwd is plain old data; getpwuid_r fills it with pointers
    // into `buf`, which outlives every read below.
    let mut pwd: libc::passwd = unsafe { std::mem::zeroed() };
    let mut found: *mut libc::passwd = std::ptr::null_mut();
    let rc = unsafe {
        libc::getpwuid_r(
            libc::getuid(),
            &mut pwd,
            buf.as_mut_ptr(),
            buf.len(),
            &mut found,
        )
    };
    if rc != 0 || found.is_null() || pwd.pw_name.is_null() {
        tracing::debug!(rc, "No password database entry for the current user");
        return None;
    }
    // SAFETY: pw_name is a NUL-terminated string inside `buf`.
    let name = unsafe { CStr::from_ptr(pwd.pw_name) }
        .to_string_lossy()
        .into_owned();
    (!name.is_empty()).then_some(name)
}

#[cfg(not(unix))]
fn account_name() -> Option<String> {
    None
}

/// `uname` fields joined by spaces: sysname, nodename, release, version,
/// machine.
#[cfg(unix)]
pub fn machine_id() -> String {
    use std::ffi::CStr;

    // SAFETY: utsname is plain old data; uname fills it on success and its
    // fields are NUL-terminated C strings.
    let mut uts: libc::utsname = unsafe { std::mem::zeroed() };
    if unsafe { libc::uname(&mut uts) } != 0 {
        tracing::debug!(
            error = %std::io::Error::last_os_error(),
            "uname failed; falling back to compile-time platform"
        );
        return fallback_machine_id();
    }

    let fields = [
        &uts.sysname[..],
        &uts.nodename[..],
        &uts.release[..],
        &uts.version[..],
        &uts.machine[..],
    ];
    fields
        .iter()
        .map(|f| {
            // SAFETY: uname guarantees NUL termination within the array.
            unsafe { CStr::from_ptr(f.as_ptr()) }
                .to_string_lossy()
                .into_owned()
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(not(unix))]
pub fn machine_id() -> String {
    fallback_machine_id()
}

fn fallback_machine_id() -> String {
    let host = ["COMPUTERNAME", "HOSTNAME"]
        .iter()
        .find_map(|var| std::env::var(var).ok())
        .unwrap_or_else(|| UNKNOWN.to_string());
    format!(
        "{} {} {}",
        std::env::consts::OS,
        host,
        std::env::consts::ARCH
    )
}

/// Local wall-clock time, `YYYY-MM-DD HH:MM:SS.ffffff`.
pub fn timestamp() -> String {
    chrono::Local::now()
        .format("%Y-%m-%d %H:%M:%S%.6f")
        .to_string()
}

/// Crate, version and the compiler that built it.
pub fn runtime_version() -> String {
    format!(
        "{} {} ({})",
        constants::APP_NAME,
        constants::APP_VERSION,
        constants::RUSTC_VERSION
    )
}

pub fn current_dir() -> String {
    match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(e) => {
            tracing::debug!(error = %e, "Working directory is not accessible");
            UNKNOWN.to_string()
        }
    }
}

/// The full invoking command line, arguments separated by single spaces.
pub fn command_line() -> String {
    std::env::args_os()
        .map(|a| a.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

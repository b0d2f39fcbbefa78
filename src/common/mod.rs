/// Restore default SIGPIPE behavior so the binaries die quietly when their
/// reader goes away (the Rust runtime ignores SIGPIPE by default).
pub fn reset_sigpipe() {
    #[cfg(unix)]
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

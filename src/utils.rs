use std::fmt::Formatter;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

/// Walk the `source` chain of `e`, printing one cause per line. Used by the
/// `Debug` impls of error enums so logs show the whole story, not just the
/// outermost message.
pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{e}\n")?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{cause}")?;
        current = cause.source();
    }
    Ok(())
}

/// Lock `mutex`, carrying on with the data even if another thread panicked
/// while holding it. All state guarded this way is plain UI bookkeeping that
/// stays consistent between statements.
pub fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

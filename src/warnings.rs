use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

static HOLDING: AtomicBool = AtomicBool::new(false);
static PENDING: Mutex<Vec<String>> = Mutex::new(Vec::new());

/// Start holding warnings instead of writing them to stderr. Called before
/// the dashboard takes over the terminal, so diagnostics from a reload don't
/// corrupt the display.
pub fn hold() {
    HOLDING.store(true, Ordering::SeqCst);
}

/// Stop holding and return everything collected since [`hold`].
pub fn release() -> Vec<String> {
    HOLDING.store(false, Ordering::SeqCst);
    std::mem::take(&mut *PENDING.lock().unwrap())
}

/// Emit a warning: held while the dashboard is active, stderr otherwise.
pub fn emit(msg: String) {
    if HOLDING.load(Ordering::SeqCst) {
        PENDING.lock().unwrap().push(msg);
    } else {
        eprintln!("{}", msg);
    }
}

/// Like `eprintln!`, but routed through the warning hold when active.
#[macro_export]
macro_rules! warnln {
    ($($arg:tt)*) => {
        $crate::warnings::emit(format!($($arg)*))
    };
}

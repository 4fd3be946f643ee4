use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Route SIGINT, SIGTERM and SIGHUP into a flag the event loop polls, so the
/// process unwinds through the terminal guard instead of dying in raw mode.
pub fn install_shutdown_handler() -> anyhow::Result<Arc<AtomicBool>> {
    let flag = Arc::new(AtomicBool::new(false));
    let handler_flag = Arc::clone(&flag);
    ctrlc::set_handler(move || request_shutdown(&handler_flag))?;
    Ok(flag)
}

fn request_shutdown(flag: &AtomicBool) {
    flag.store(true, Ordering::SeqCst);
}

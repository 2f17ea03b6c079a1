use std::panic::PanicHookInfo;

/// Installs a panic hook that prints roughly the same message as the default
/// hook but through `tracing::error!` so that panics end up in the regular
/// log pipeline.
pub fn install() {
    std::panic::set_hook(Box::new(tracing_panic_hook));
}

fn tracing_panic_hook(panic: &PanicHookInfo) {
    let thread = std::thread::current();
    let name = thread.name().unwrap_or("<unnamed>");
    let backtrace = std::backtrace::Backtrace::force_capture();
    tracing::error!("thread '{name}' {panic}\nstack backtrace:\n{backtrace}");
}

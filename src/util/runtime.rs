//! Async-to-sync bridge.
//!
//! The engine's public surface is async because it yields between chunks;
//! synchronous hosts drive it through `block_on`.

/// Block the current thread on a future, with or without an ambient runtime.
///
/// Inside a running Tokio runtime this marks the worker as blocking and
/// drives the future in place; outside one, a throwaway runtime is built for
/// the call.
///
/// # Panics
/// Panics if no runtime exists and one cannot be constructed.
pub fn block_on<F>(future: F) -> F::Output
where
    F: std::future::Future,
{
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => tokio::task::block_in_place(|| handle.block_on(future)),
        Err(_) => tokio::runtime::Runtime::new()
            .expect("failed to build a tokio runtime for a blocking call")
            .block_on(future),
    }
}

#[cfg(test)]
#[path = "runtime_test.rs"]
mod tests;

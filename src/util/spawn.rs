use std::future::Future;

/// Run a fire-and-forget future off the UI thread's frame loop.
///
/// On the web it is queued on the browser's microtask loop. Natively each
/// future gets a worker thread driving a current-thread tokio runtime, which
/// reqwest needs for its I/O.
#[cfg(target_arch = "wasm32")]
pub fn spawn<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn spawn<F>(future: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    let spawned = std::thread::Builder::new()
        .name("catalog-request".to_owned())
        .spawn(move || {
            match tokio::runtime::Builder::new_current_thread().enable_all().build() {
                Ok(runtime) => runtime.block_on(future),
                Err(err) => log::error!("Failed to start request runtime: {err}"),
            }
        });
    if let Err(err) = spawned {
        log::error!("Failed to spawn request thread: {err}");
    }
}

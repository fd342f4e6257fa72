use anyhow::Context;
use log::{info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;

/// Raises the returned flag when Ctrl+C arrives.
pub fn watch_ctrl_c() -> anyhow::Result<Arc<AtomicBool>> {
    let flag = Arc::new(AtomicBool::new(false));
    let raised = Arc::clone(&flag);
    let runtime = TokioBuilder::new_current_thread()
        .enable_all()
        .build()
        .context("creating runtime for signal handling")?;

    thread::spawn(move || {
        runtime.block_on(async move {
            match signal::ctrl_c().await {
                Ok(()) => {
                    info!("Ctrl+C received, stopping");
                    raised.store(true, Ordering::Relaxed);
                }
                Err(err) => warn!("cannot listen for Ctrl+C: {}", err),
            }
        });
    });
    Ok(flag)
}

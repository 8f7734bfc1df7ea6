//! OS interrupt handling
//!
//! SIGINT (Ctrl+C) and SIGTERM stop the run. SIGKILL and SIGQUIT are not
//! caught.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::iterator::{Handle, Signals};
use signal_hook::low_level::signal_name;
use tracing::{debug, info};

use super::stop::{StopReason, StopSignal};
use crate::utils::{LoadError, Result};

/// Background thread turning termination signals into a stop
///
/// Handlers stay installed until the listener is dropped.
pub struct InterruptListener {
    handle: Handle,
    thread: Option<JoinHandle<()>>,
}

impl InterruptListener {
    /// Install SIGINT/SIGTERM handlers that stop `stop` with [`StopReason::Interrupt`]
    pub fn install(stop: Arc<StopSignal>) -> Result<Self> {
        let mut signals = Signals::new([SIGINT, SIGTERM]).map_err(LoadError::Signal)?;
        let handle = signals.handle();

        let thread = thread::Builder::new()
            .name("signal-listener".to_string())
            .spawn(move || {
                for signal in signals.forever() {
                    let name = signal_name(signal).unwrap_or("signal");
                    if stop.stop(StopReason::Interrupt) {
                        info!("Shutting down by break ({})", name);
                    } else {
                        debug!("Ignoring {}: already stopping", name);
                    }
                }
            })?;

        Ok(Self {
            handle,
            thread: Some(thread),
        })
    }
}

impl Drop for InterruptListener {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

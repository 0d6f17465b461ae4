//! Background snapshot thread
//!
//! Writes a snapshot every interval until stopped. Stopping wakes the thread
//! immediately rather than waiting out the current interval.

use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use parking_lot::{Condvar, Mutex, MutexGuard};
use tracing::{debug, trace, warn};

use magnetic_core::Result;

use super::Shared;

type StopSignal = Arc<(Mutex<bool>, Condvar)>;

pub(super) struct Snapshotter {
    stop: StopSignal,
    handle: Option<JoinHandle<()>>,
}

impl Snapshotter {
    pub(super) fn spawn(shared: Arc<Shared>, interval: Duration) -> Result<Self> {
        let stop: StopSignal = Arc::new((Mutex::new(false), Condvar::new()));
        let signal = Arc::clone(&stop);

        let handle = std::thread::Builder::new()
            .name("magnetic-snapshot".to_string())
            .spawn(move || {
                let (lock, cvar) = &*signal;
                let mut stopped = lock.lock();
                while !*stopped {
                    let timed_out = cvar.wait_for(&mut stopped, interval).timed_out();
                    if *stopped {
                        break;
                    }
                    if timed_out {
                        MutexGuard::unlocked(&mut stopped, || match shared.write_snapshot() {
                            Ok(info) => {
                                trace!(target: "magnetic::durability", crc = info.crc, "Periodic snapshot")
                            }
                            Err(e) => {
                                warn!(target: "magnetic::durability", error = %e, "Periodic snapshot failed")
                            }
                        });
                    }
                }
            })?;

        debug!(target: "magnetic::durability", interval_ms = interval.as_millis() as u64, "Started snapshot thread");
        Ok(Snapshotter {
            stop,
            handle: Some(handle),
        })
    }

    /// Signal the thread and wait for it to exit
    pub(super) fn stop(&mut self) {
        {
            let (lock, cvar) = &*self.stop;
            *lock.lock() = true;
            cvar.notify_all();
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!(target: "magnetic::durability", "Snapshot thread panicked");
            }
        }
    }
}

impl Drop for Snapshotter {
    fn drop(&mut self) {
        self.stop();
    }
}

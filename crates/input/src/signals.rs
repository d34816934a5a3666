//! Termination signals as input.
//!
//! Raw mode turns Ctrl-C into a key, but `kill -INT`, `kill -TERM` or a
//! closing terminal still arrive as signals. These only raise a flag; the
//! input port reports it as [`InputEvent::Interrupt`](crate::types::InputEvent)
//! so the loop ends on its normal path and the terminal is restored.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::debug;
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::flag;

#[cfg(unix)]
const SIGNALS: &[i32] = &[SIGINT, SIGTERM, signal_hook::consts::SIGHUP];
#[cfg(not(unix))]
const SIGNALS: &[i32] = &[SIGINT, SIGTERM];

/// Shared "a termination signal arrived" flag.
#[derive(Debug, Clone, Default)]
pub struct InterruptFlag(Arc<AtomicBool>);

impl InterruptFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the flag for SIGINT, SIGTERM and (on Unix) SIGHUP.
    pub fn install() -> io::Result<Self> {
        let flag = Self::new();
        for &signal in SIGNALS {
            flag::register(signal, Arc::clone(&flag.0))?;
        }
        debug!("termination signal handlers installed for {:?}", SIGNALS);
        Ok(flag)
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let flag = InterruptFlag::new();
        let other = flag.clone();
        assert!(!other.is_raised());
        flag.raise();
        assert!(other.is_raised());
    }

    #[cfg(unix)]
    #[test]
    fn installed_flag_is_raised_by_a_signal() {
        let flag = InterruptFlag::install().unwrap();
        signal_hook::low_level::raise(signal_hook::consts::SIGHUP).unwrap();
        assert!(flag.is_raised());
    }
}

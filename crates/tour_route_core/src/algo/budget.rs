use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::{Duration, Instant},
};

use crate::{Error, Result};

/// Shared flag a caller can flip to stop a running optimization.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Deadline plus cancellation, polled between units of work.
#[derive(Clone, Debug)]
pub(crate) struct Budget {
    started: Instant,
    deadline: Option<Instant>,
    cancel: Option<CancelToken>,
}

impl Budget {
    pub(crate) fn new(time_limit: Option<Duration>, cancel: Option<CancelToken>) -> Self {
        let started = Instant::now();
        Self {
            started,
            deadline: time_limit.map(|limit| started + limit),
            cancel,
        }
    }

    #[cfg(test)]
    pub(crate) fn unlimited() -> Self {
        Self::new(None, None)
    }

    pub(crate) fn check(&self, stage: &str) -> Result<()> {
        if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            log::warn!("{stage}: cancelled elapsed={:.3}s", self.elapsed().as_secs_f64());
            return Err(Error::Cancelled);
        }
        if let Some(deadline) = self.deadline
            && Instant::now() >= deadline
        {
            log::warn!("{stage}: time limit reached elapsed={:.3}s", self.elapsed().as_secs_f64());
            return Err(Error::TimedOut {
                elapsed: self.elapsed(),
            });
        }
        Ok(())
    }

    pub(crate) fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

//! Progress reporting and cooperative cancellation
//!
//! Both are purely observational for the builder: progress sinks get no
//! back-pressure, and cancellation is only checked between sites.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam_channel::Sender;

/// Receiver of `(sites_processed, total_sites)` updates
///
/// Called once after every processed site. With parallel builds the calls
/// arrive from worker threads, so updates may interleave out of order.
pub trait ProgressSink: Sync {
    fn report(&self, processed: usize, total: usize);
}

impl<F> ProgressSink for F
where
    F: Fn(usize, usize) + Sync,
{
    fn report(&self, processed: usize, total: usize) {
        self(processed, total)
    }
}

/// Forwards updates over a channel; a disconnected receiver is ignored
#[derive(Debug, Clone)]
pub struct ChannelProgress(pub Sender<(usize, usize)>);

impl ProgressSink for ChannelProgress {
    fn report(&self, processed: usize, total: usize) {
        let _ = self.0.send((processed, total));
    }
}

/// Discards all progress updates
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&self, _processed: usize, _total: usize) {}
}

/// Shared flag used to stop a build between sites
///
/// Clones share the same flag, so one clone can be handed to another thread
/// and cancelled from there.
///
/// # Example
///
/// ```rust
/// use radial_voronoi::CancelToken;
///
/// let token = CancelToken::new();
/// let handle = token.clone();
/// handle.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; sites already started still finish
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

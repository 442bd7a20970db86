use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::watch;

/// An owned state container with a subscribe/notify contract.
///
/// Every aggregator publishes its snapshot through one of these. Mutation goes through
/// [`Published::update`], which notifies all subscribers once per call, so a reader never
/// observes a half-applied change.
#[derive(Debug)]
pub struct Published<T> {
    tx: watch::Sender<T>,
}

impl<T: Clone> Published<T> {
    pub(crate) fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// A clone of the current snapshot.
    pub fn snapshot(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Run `f` against the current snapshot without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.tx.borrow())
    }

    /// Subscribe to changes. The receiver starts at the current snapshot.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    /// Mutate the snapshot in place and notify subscribers.
    pub(crate) fn update(&self, f: impl FnOnce(&mut T)) {
        self.tx.send_modify(f);
    }

    /// Mutate the snapshot in place, notifying subscribers only when `f` returns `true`.
    pub(crate) fn update_if(&self, f: impl FnOnce(&mut T) -> bool) -> bool {
        self.tx.send_if_modified(f)
    }
}

impl<T: Clone + Default> Default for Published<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Number of overlapping calls that share one `is_loading` flag.
///
/// Call [`start`](Self::start) and [`finish`](Self::finish) inside the
/// [`Published::update`] closures that raise and lower the flag; those closures run
/// one at a time, so the published flag follows the counter.
#[derive(Debug, Default)]
pub(crate) struct InFlight(AtomicUsize);

impl InFlight {
    pub(crate) fn start(&self) {
        self.0.fetch_add(1, Ordering::AcqRel);
    }

    /// Marks one call as settled and returns whether others are still running.
    pub(crate) fn finish(&self) -> bool {
        self.0.fetch_sub(1, Ordering::AcqRel) > 1
    }
}

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, RwLock, Weak};
use std::thread::JoinHandle;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

use crate::error::GalleryError;

/// One emitted sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamSample {
    /// Sample x.
    pub x: i64,
    /// Sample y.
    pub y: i64,
}

/// Inclusive bounds of generated samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct StreamRange {
    /// Minimum and maximum x.
    pub x: (i64, i64),
    /// Minimum and maximum y.
    pub y: (i64, i64),
}

impl StreamRange {
    /// Check that both ranges are ordered.
    pub fn validate(&self) -> Result<(), GalleryError> {
        if self.x.0 > self.x.1 || self.y.0 > self.y.1 {
            return Err(GalleryError::InvalidStreamRange(*self));
        }
        Ok(())
    }
}

impl Default for StreamRange {
    fn default() -> Self {
        Self {
            x: (0, 100),
            y: (0, 100),
        }
    }
}

type Callback = Arc<dyn Fn(StreamSample) + Send + Sync>;

#[derive(Default)]
struct Subscribers {
    next_id: u64,
    entries: Vec<(u64, Callback)>,
}

struct Worker {
    stop: Sender<()>,
    handle: JoinHandle<()>,
}

/// Emits random samples to its subscribers on a fixed interval.
///
/// Subscribers are called in registration order on the worker thread. There
/// is no buffering: a sample emitted while nobody listens is dropped.
pub struct DataStream {
    range: StreamRange,
    subscribers: Arc<RwLock<Subscribers>>,
    rng: Arc<Mutex<StdRng>>,
    worker: Option<Worker>,
}

impl DataStream {
    /// Create an idle stream. Call [`DataStream::start`] to begin emitting.
    pub fn new(range: StreamRange, seed: u64) -> Result<Self, GalleryError> {
        range.validate()?;
        Ok(Self {
            range,
            subscribers: Arc::new(RwLock::new(Subscribers::default())),
            rng: Arc::new(Mutex::new(StdRng::seed_from_u64(seed))),
            worker: None,
        })
    }

    /// Access the sample bounds.
    pub fn range(&self) -> StreamRange {
        self.range
    }

    /// Register a callback. Dropping the returned handle keeps the
    /// subscription; call [`Subscription::unsubscribe`] to remove it.
    pub fn subscribe(&self, callback: impl Fn(StreamSample) + Send + Sync + 'static) -> Subscription {
        let mut subscribers = self.subscribers.write().expect("stream subscribers lock");
        subscribers.next_id = subscribers.next_id.wrapping_add(1);
        let id = subscribers.next_id;
        subscribers.entries.push((id, Arc::new(callback)));
        Subscription {
            id,
            subscribers: Arc::downgrade(&self.subscribers),
        }
    }

    /// Number of registered callbacks.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .read()
            .expect("stream subscribers lock")
            .entries
            .len()
    }

    /// Generate one sample and deliver it to every subscriber.
    pub fn tick(&self) -> StreamSample {
        emit(self.range, &self.rng, &self.subscribers)
    }

    /// Whether the worker thread is running.
    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    /// Start emitting every `interval` on a worker thread.
    ///
    /// Starting a running stream is a no-op.
    pub fn start(&mut self, interval: Duration) {
        if self.worker.is_some() {
            return;
        }
        let (stop, stopped) = mpsc::channel::<()>();
        let range = self.range;
        let rng = Arc::clone(&self.rng);
        let subscribers = Arc::clone(&self.subscribers);
        let handle = std::thread::spawn(move || {
            loop {
                match stopped.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        emit(range, &rng, &subscribers);
                    }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
        });
        tracing::debug!(interval_ms = interval.as_millis() as u64, "data stream started");
        self.worker = Some(Worker { stop, handle });
    }

    /// Stop the worker thread. Safe to call more than once.
    pub fn stop(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };
        let _ = worker.stop.send(());
        if worker.handle.join().is_err() {
            tracing::warn!("data stream worker panicked");
        }
        tracing::debug!("data stream stopped");
    }
}

impl Drop for DataStream {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for DataStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataStream")
            .field("range", &self.range)
            .field("subscribers", &self.subscriber_count())
            .field("running", &self.is_running())
            .finish()
    }
}

fn emit(
    range: StreamRange,
    rng: &Mutex<StdRng>,
    subscribers: &RwLock<Subscribers>,
) -> StreamSample {
    let sample = {
        let mut rng = rng.lock().expect("stream rng lock");
        StreamSample {
            x: rng.gen_range(range.x.0..=range.x.1),
            y: rng.gen_range(range.y.0..=range.y.1),
        }
    };
    // Callbacks run outside the lock so they may unsubscribe themselves.
    let callbacks: Vec<Callback> = subscribers
        .read()
        .expect("stream subscribers lock")
        .entries
        .iter()
        .map(|(_, callback)| Arc::clone(callback))
        .collect();
    for callback in callbacks {
        callback(sample);
    }
    sample
}

/// Handle returned by [`DataStream::subscribe`].
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    subscribers: Weak<RwLock<Subscribers>>,
}

impl Subscription {
    /// Remove the callback from the stream.
    pub fn unsubscribe(self) {
        let Some(subscribers) = self.subscribers.upgrade() else {
            return;
        };
        let mut subscribers = subscribers.write().expect("stream subscribers lock");
        subscribers.entries.retain(|(id, _)| *id != self.id);
    }
}

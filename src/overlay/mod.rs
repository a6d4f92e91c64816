//! Annotation overlay pub/sub.
//!
//! A keyed registry of callbacks that receive the current annotation list.
//! Publishing is synchronous and sequential, in registration order; each
//! callback gets its own deep copy, and a failing or panicking callback is
//! recorded without stopping the rest.
//!
//! ```
//! use canon_vdom::overlay::{CommentAnnotation, OverlayChannel};
//!
//! let channel: OverlayChannel = OverlayChannel::new();
//! channel.subscribe("count", |annotations: Vec<CommentAnnotation>| {
//!     assert_eq!(annotations.len(), 1);
//!     Ok(())
//! });
//! let report = channel.publish(&[CommentAnnotation::new("a1")]);
//! assert!(report.is_clean());
//! ```

mod annotation;

use std::any::Any;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

pub use self::annotation::{Author, Comment, CommentAnnotation};

use crate::error::SubscriberError;

/// Error a callback may return.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

/// Callback result.
pub type CallbackResult = Result<(), CallbackError>;

type Callback<A> = Arc<dyn Fn(Vec<A>) -> CallbackResult + Send + Sync>;

// =============================================================================
// OverlayChannel
// =============================================================================

/// Keyed subscriber registry.
pub struct OverlayChannel<A = CommentAnnotation> {
    subscribers: RwLock<Vec<(String, Callback<A>)>>,
}

impl<A> fmt::Debug for OverlayChannel<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayChannel")
            .field("keys", &self.keys())
            .finish()
    }
}

impl<A> Default for OverlayChannel<A> {
    fn default() -> Self {
        Self {
            subscribers: RwLock::new(Vec::new()),
        }
    }
}

impl<A> OverlayChannel<A> {
    /// Registered keys in delivery order.
    pub fn keys(&self) -> Vec<String> {
        self.subscribers.read().iter().map(|(k, _)| k.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.subscribers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<A: Clone + Send + 'static> OverlayChannel<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` under `key`.
    ///
    /// An existing callback under the same key is replaced in place and
    /// keeps its position in the delivery order. The new callback is not
    /// called until the next publish.
    pub fn subscribe<F>(&self, key: impl Into<String>, callback: F)
    where
        F: Fn(Vec<A>) -> CallbackResult + Send + Sync + 'static,
    {
        let key = key.into();
        let callback: Callback<A> = Arc::new(callback);
        let mut subscribers = self.subscribers.write();
        match subscribers.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = callback,
            None => subscribers.push((key, callback)),
        }
    }

    /// Remove the callback under `key`. Returns whether one was registered.
    pub fn unsubscribe(&self, key: &str) -> bool {
        let mut subscribers = self.subscribers.write();
        let before = subscribers.len();
        subscribers.retain(|(k, _)| k != key);
        subscribers.len() != before
    }

    /// Deliver `annotations` to every subscriber.
    ///
    /// Callbacks run outside the registry lock, against the registrations
    /// present when the publish started.
    pub fn publish(&self, annotations: &[A]) -> PublishReport {
        let subscribers: Vec<(String, Callback<A>)> = self.subscribers.read().clone();
        let mut report = PublishReport::default();

        for (key, callback) in subscribers {
            let payload = annotations.to_vec();
            let failure = match catch_unwind(AssertUnwindSafe(|| callback(payload))) {
                Ok(Ok(())) => None,
                Ok(Err(err)) => Some(SubscriberError {
                    key,
                    message: err.to_string(),
                    panicked: false,
                }),
                Err(panic) => Some(SubscriberError {
                    key,
                    message: panic_message(panic.as_ref()),
                    panicked: true,
                }),
            };

            match failure {
                None => report.delivered += 1,
                Some(err) => {
                    tracing::warn!(key = %err.key, panicked = err.panicked, "overlay subscriber failed: {}", err.message);
                    report.failures.push(err);
                }
            }
        }

        tracing::debug!(
            annotations = annotations.len(),
            delivered = report.delivered,
            failed = report.failures.len(),
            "published annotations"
        );
        report
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}

/// What happened during one publish.
#[derive(Debug, Default, Clone)]
pub struct PublishReport {
    /// Callbacks that returned `Ok`.
    pub delivered: usize,
    /// Callbacks that returned an error or panicked.
    pub failures: Vec<SubscriberError>,
}

impl PublishReport {
    /// No callback failed.
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

// =============================================================================
// AnnotationFeed
// =============================================================================

/// Latest annotation list from the collaboration service, republished on
/// every update.
#[derive(Debug)]
pub struct AnnotationFeed<A = CommentAnnotation> {
    channel: Arc<OverlayChannel<A>>,
    current: RwLock<Vec<A>>,
}

impl<A: Clone + Send + 'static> AnnotationFeed<A> {
    pub fn new(channel: Arc<OverlayChannel<A>>) -> Self {
        Self {
            channel,
            current: RwLock::new(Vec::new()),
        }
    }

    /// Store the service's latest list (`None` means empty) and publish it.
    pub fn update(&self, annotations: Option<Vec<A>>) -> PublishReport {
        let annotations = annotations.unwrap_or_default();
        *self.current.write() = annotations.clone();
        self.channel.publish(&annotations)
    }

    /// Copy of the latest list.
    pub fn current(&self) -> Vec<A> {
        self.current.read().clone()
    }

    pub fn channel(&self) -> &Arc<OverlayChannel<A>> {
        &self.channel
    }
}

// =============================================================================
// OverlayInbox
// =============================================================================

/// Holds the most recent delivery until a cooperative host drains it.
///
/// Clones share the same slot.
#[derive(Debug)]
pub struct OverlayInbox<A = CommentAnnotation> {
    latest: Arc<Mutex<Option<Vec<A>>>>,
}

impl<A> Clone for OverlayInbox<A> {
    fn clone(&self) -> Self {
        Self {
            latest: Arc::clone(&self.latest),
        }
    }
}

impl<A> Default for OverlayInbox<A> {
    fn default() -> Self {
        Self {
            latest: Arc::new(Mutex::new(None)),
        }
    }
}

impl<A: Clone + Send + 'static> OverlayInbox<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe this inbox to `channel` under `key`.
    pub fn attach(&self, channel: &OverlayChannel<A>, key: impl Into<String>) {
        let inbox = self.clone();
        channel.subscribe(key, move |annotations| {
            inbox.deliver(annotations);
            Ok(())
        });
    }

    /// Replace the held list.
    pub fn deliver(&self, annotations: Vec<A>) {
        *self.latest.lock() = Some(annotations);
    }

    /// Take the held list, leaving the inbox empty.
    pub fn take(&self) -> Option<Vec<A>> {
        self.latest.lock().take()
    }

    pub fn has_pending(&self) -> bool {
        self.latest.lock().is_some()
    }
}

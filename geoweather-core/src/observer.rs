use parking_lot::Mutex;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

/// Handle returned by a subscription, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

impl SubscriptionId {
    fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

type Handler<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// List of handlers for one event channel.
pub struct Subscribers<T: ?Sized> {
    handlers: Mutex<Vec<(SubscriptionId, Handler<T>)>>,
}

impl<T: ?Sized> Subscribers<T> {
    pub fn new() -> Self {
        Self { handlers: Mutex::new(Vec::new()) }
    }

    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = SubscriptionId::next();
        self.handlers.lock().push((id, Arc::new(handler)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.lock();
        let before = handlers.len();
        handlers.retain(|(existing, _)| *existing != id);
        handlers.len() != before
    }

    pub fn len(&self) -> usize {
        self.handlers.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Call every handler in registration order.
    ///
    /// The list is snapshotted first, so handlers may (un)subscribe.
    pub fn notify(&self, value: &T) {
        let snapshot: Vec<Handler<T>> =
            self.handlers.lock().iter().map(|(_, h)| h.clone()).collect();
        for handler in snapshot {
            handler(value);
        }
    }
}

impl<T: ?Sized> Default for Subscribers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> std::fmt::Debug for Subscribers<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers").field("len", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_subscriber_is_notified() {
        let subs: Subscribers<u32> = Subscribers::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for tag in ["a", "b"] {
            let seen = seen.clone();
            subs.subscribe(move |v: &u32| seen.lock().push(format!("{tag}{v}")));
        }

        subs.notify(&7);
        assert_eq!(*seen.lock(), vec!["a7".to_string(), "b7".to_string()]);
    }

    #[test]
    fn unsubscribe_removes_only_that_handler() {
        let subs: Subscribers<u32> = Subscribers::new();
        let first = subs.subscribe(|_| {});
        let _second = subs.subscribe(|_| {});

        assert!(subs.unsubscribe(first));
        assert!(!subs.unsubscribe(first));
        assert_eq!(subs.len(), 1);
    }

    #[test]
    fn handler_may_subscribe_during_notify() {
        let subs: Arc<Subscribers<u32>> = Arc::new(Subscribers::new());
        let inner = subs.clone();
        subs.subscribe(move |_| {
            inner.subscribe(|_| {});
        });

        subs.notify(&1);
        assert_eq!(subs.len(), 2);
    }

    #[test]
    fn unsized_payloads() {
        let subs: Subscribers<[u8]> = Subscribers::new();
        let total = Arc::new(Mutex::new(0usize));
        let t = total.clone();
        subs.subscribe(move |bytes: &[u8]| *t.lock() += bytes.len());

        subs.notify(&[1, 2, 3][..]);
        assert_eq!(*total.lock(), 3);
    }
}

use std::cell::RefCell;
use std::rc::Rc;

/// Handle to an event registration. Dropping it (or calling
/// [`Subscription::unsubscribe`]) removes the listener.
#[must_use = "dropping a Subscription removes the listener"]
pub struct Subscription {
    dispose: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(dispose: impl FnOnce() + 'static) -> Self {
        Self {
            dispose: Some(Box::new(dispose)),
        }
    }

    /// A subscription with nothing to release.
    pub fn noop() -> Self {
        Self { dispose: None }
    }

    pub fn unsubscribe(mut self) {
        if let Some(dispose) = self.dispose.take() {
            dispose();
        }
    }

    /// Keep the listener registered for the rest of the page lifetime.
    pub fn detach(mut self) {
        self.dispose = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(dispose) = self.dispose.take() {
            dispose();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.dispose.is_some())
            .finish()
    }
}

/// Registered handlers of one event kind.
#[derive(Clone)]
pub struct Listeners<H: Clone + 'static> {
    inner: Rc<RefCell<ListenersInner<H>>>,
}

struct ListenersInner<H> {
    next_id: u64,
    entries: Vec<(u64, H)>,
}

impl<H: Clone + 'static> Listeners<H> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(ListenersInner {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    pub fn add(&self, handler: H) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.entries.push((id, handler));
            id
        };

        let inner = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = inner.upgrade() {
                inner.borrow_mut().entries.retain(|(entry, _)| *entry != id);
            }
        })
    }

    /// Cloned handlers, so that a handler may (un)subscribe while being called.
    pub fn snapshot(&self) -> Vec<H> {
        self.inner
            .borrow()
            .entries
            .iter()
            .map(|(_, handler)| handler.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<H: Clone + 'static> Default for Listeners<H> {
    fn default() -> Self {
        Self::new()
    }
}

//! Observer registry.

use std::fmt;

use crate::cart::{Cart, CartEvent};

/// Callback invoked after every state-changing mutation.
pub type Observer = Box<dyn FnMut(&CartEvent, &Cart)>;

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// Subscribers in registration order.
#[derive(Default)]
pub(crate) struct Observers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Observer)>,
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.entries.len())
            .finish()
    }
}

impl Observers {
    pub(crate) fn subscribe(&mut self, observer: Observer) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.entries.push((id, observer));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(sub, _)| *sub != id);
        self.entries.len() < before
    }

    pub(crate) fn notify(&mut self, event: &CartEvent, cart: &Cart) {
        for (_, observer) in &mut self.entries {
            observer(event, cart);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_ids_are_unique_after_unsubscribe() {
        let mut observers = Observers::default();
        let a = observers.subscribe(Box::new(|_: &CartEvent, _: &Cart| {}));
        assert!(observers.unsubscribe(a));
        let b = observers.subscribe(Box::new(|_: &CartEvent, _: &Cart| {}));
        assert_ne!(a, b);
        assert!(!observers.unsubscribe(a));
        assert_eq!(observers.len(), 1);
    }

    #[test]
    fn test_notify_reaches_everyone() {
        let hits = Rc::new(Cell::new(0));
        let mut observers = Observers::default();
        for _ in 0..3 {
            let hits = Rc::clone(&hits);
            observers.subscribe(Box::new(move |_: &CartEvent, _: &Cart| {
                hits.set(hits.get() + 1)
            }));
        }

        observers.notify(&CartEvent::Cleared { removed: 0 }, &Cart::new(Currency::USD));
        assert_eq!(hits.get(), 3);
    }
}

#![forbid(unsafe_code)]

//! Change notifications from a model to its display clients.
//!
//! # Design
//!
//! A [`ClientRegistry`] stores clients as `Weak<dyn ModelClient>`. The model
//! never owns its clients: dropping the last `Rc` of a client unsubscribes
//! it, and the dead entry is pruned during the next notification.
//!
//! # Invariants
//!
//! 1. Clients are notified in registration order.
//! 2. A client registered twice is notified once per event.
//! 3. Clients may register or unregister other clients from inside a
//!    callback; the change takes effect from the next event.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// How a [`ModelEvent::DidUpdate`] affects indices clients already hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateFlag {
    /// Existing indices may still be used; the cells behind them may now hold
    /// different content.
    DontInvalidateIndices,
    /// Every index handed out before this event is stale.
    InvalidateAllIndices,
}

/// A structural or content change announced by a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelEvent {
    /// Rows `first..=last` are about to be inserted.
    BeginInsertRows { first: usize, last: usize },
    /// The insertion announced by the preceding `BeginInsertRows` is done.
    EndInsertRows,
    /// Model contents changed.
    DidUpdate(UpdateFlag),
}

/// Receiver of model change notifications.
///
/// Callbacks get `&self`; clients that record state use interior mutability.
pub trait ModelClient {
    fn on_model_event(&self, event: &ModelEvent);
}

/// Weakly-held list of model clients.
#[derive(Default)]
pub struct ClientRegistry {
    clients: RefCell<Vec<Weak<dyn ModelClient>>>,
}

impl std::fmt::Debug for ClientRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientRegistry")
            .field("clients", &self.client_count())
            .finish()
    }
}

impl ClientRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `client`. Registering the same client again is a no-op.
    pub fn register<C: ModelClient + 'static>(&self, client: &Rc<C>) {
        let weak: Weak<C> = Rc::downgrade(client);
        let weak: Weak<dyn ModelClient> = weak;
        let mut clients = self.clients.borrow_mut();
        if clients.iter().any(|existing| existing.ptr_eq(&weak)) {
            return;
        }
        clients.push(weak);
    }

    /// Unsubscribe `client`. Returns whether it was registered.
    pub fn unregister<C: ModelClient + 'static>(&self, client: &Rc<C>) -> bool {
        let weak: Weak<C> = Rc::downgrade(client);
        let weak: Weak<dyn ModelClient> = weak;
        let mut clients = self.clients.borrow_mut();
        let before = clients.len();
        clients.retain(|existing| !existing.ptr_eq(&weak));
        clients.len() != before
    }

    /// Number of clients still alive.
    #[must_use]
    pub fn client_count(&self) -> usize {
        self.clients
            .borrow()
            .iter()
            .filter(|client| client.strong_count() > 0)
            .count()
    }

    /// Deliver `event` to every live client.
    pub fn notify(&self, event: &ModelEvent) {
        let live: Vec<Rc<dyn ModelClient>> = {
            let mut clients = self.clients.borrow_mut();
            clients.retain(|client| client.strong_count() > 0);
            clients.iter().filter_map(Weak::upgrade).collect()
        };
        for client in live {
            client.on_model_event(event);
        }
    }
}

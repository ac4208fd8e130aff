use parcel_core::OrderId;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// Which order, if any, is open in the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditSession {
    #[default]
    Closed,
    Open(OrderId),
}

impl EditSession {
    pub fn is_open(&self) -> bool {
        matches!(self, EditSession::Open(_))
    }

    pub fn editing_order_id(&self) -> Option<OrderId> {
        match self {
            EditSession::Open(id) => Some(*id),
            EditSession::Closed => None,
        }
    }
}

/// Tracks the single edit session. Opening while open retargets it.
#[derive(Clone)]
pub struct OrderEditStore {
    state: Arc<watch::Sender<EditSession>>,
}

impl OrderEditStore {
    pub fn new() -> Self {
        Self {
            state: Arc::new(watch::Sender::new(EditSession::Closed)),
        }
    }

    pub fn open(&self, order_id: OrderId) {
        self.transition(EditSession::Open(order_id));
    }

    pub fn close(&self) {
        self.transition(EditSession::Closed);
    }

    pub fn session(&self) -> EditSession {
        *self.state.borrow()
    }

    pub fn is_open(&self) -> bool {
        self.session().is_open()
    }

    pub fn editing_order_id(&self) -> Option<OrderId> {
        self.session().editing_order_id()
    }

    pub fn subscribe(&self) -> watch::Receiver<EditSession> {
        self.state.subscribe()
    }

    fn transition(&self, next: EditSession) {
        self.state.send_if_modified(|session| {
            if *session == next {
                return false;
            }
            debug!("Edit session {:?} -> {:?}", session, next);
            *session = next;
            true
        });
    }
}

impl Default for OrderEditStore {
    fn default() -> Self {
        Self::new()
    }
}

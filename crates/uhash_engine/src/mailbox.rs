//! Single-slot event mailbox between a worker thread and the controller.
//!
//! The sender blocks until the slot is free, stores one [`Envelope`] and
//! wakes the receiving side through its [`Notify`] capability. The receiver
//! copies the envelope out when woken, which frees the slot again. At most
//! one message is ever in flight, so events arrive in send order.

use std::sync::{Arc, Condvar, Mutex};

use crate::{Envelope, MailboxClosed};

/// Wake-up hook invoked after a message was stored.
///
/// Implementations post a notification to the receiving context; they must
/// not block on the mailbox themselves.
pub trait Notify: Send + Sync {
    fn notify(&self);
}

impl<F> Notify for F
where
    F: Fn() + Send + Sync,
{
    fn notify(&self) {
        self()
    }
}

struct Slot {
    message: Option<Envelope>,
    closed: bool,
}

struct Shared {
    slot: Mutex<Slot>,
    writable: Condvar,
    notify: Box<dyn Notify>,
}

/// Creates a connected sender/receiver pair.
pub fn channel(notify: impl Notify + 'static) -> (MailboxSender, MailboxReceiver) {
    let shared = Arc::new(Shared {
        slot: Mutex::new(Slot {
            message: None,
            closed: false,
        }),
        writable: Condvar::new(),
        notify: Box::new(notify),
    });
    (
        MailboxSender {
            shared: shared.clone(),
        },
        MailboxReceiver { shared },
    )
}

/// Worker side. Cloned once per worker; only one worker sends at a time.
#[derive(Clone)]
pub struct MailboxSender {
    shared: Arc<Shared>,
}

impl MailboxSender {
    /// Blocks until the slot is free, stores `envelope` and notifies the
    /// receiver. Waits without a timeout.
    pub fn send(&self, envelope: Envelope) -> Result<(), MailboxClosed> {
        let guard = self.shared.slot.lock().expect("mailbox lock poisoned");
        let mut slot = self
            .shared
            .writable
            .wait_while(guard, |slot| slot.message.is_some() && !slot.closed)
            .expect("mailbox lock poisoned");
        if slot.closed {
            return Err(MailboxClosed);
        }
        slot.message = Some(envelope);
        drop(slot);

        self.shared.notify.notify();
        Ok(())
    }
}

/// Controller side.
pub struct MailboxReceiver {
    shared: Arc<Shared>,
}

impl MailboxReceiver {
    /// Takes the pending envelope and frees the slot for the next send.
    /// Returns `None` when nothing is pending.
    pub fn receive(&self) -> Option<Envelope> {
        let message = self
            .shared
            .slot
            .lock()
            .expect("mailbox lock poisoned")
            .message
            .take();
        if message.is_some() {
            self.shared.writable.notify_all();
        }
        message
    }
}

impl Drop for MailboxReceiver {
    fn drop(&mut self) {
        if let Ok(mut slot) = self.shared.slot.lock() {
            slot.closed = true;
            slot.message = None;
        }
        self.shared.writable.notify_all();
    }
}

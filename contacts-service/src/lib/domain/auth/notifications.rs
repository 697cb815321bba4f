use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;

use crate::domain::auth::models::Notification;
use crate::domain::auth::ports::Mailer;

/// Handle for handing notifications to the background delivery worker.
///
/// Enqueueing never blocks and never fails the caller; delivery problems are
/// only logged.
#[derive(Clone)]
pub struct NotificationQueue {
    sender: UnboundedSender<Notification>,
}

impl NotificationQueue {
    /// Create a queue without a worker, returning the receiving end.
    pub fn new() -> (Self, UnboundedReceiver<Notification>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    /// Create a queue and spawn a worker that delivers through `mailer`.
    ///
    /// Must be called within a tokio runtime. The worker stops once every
    /// handle has been dropped.
    pub fn start<M>(mailer: Arc<M>) -> Self
    where
        M: Mailer + ?Sized,
    {
        let (queue, receiver) = Self::new();
        tokio::spawn(deliver(mailer, receiver));
        queue
    }

    pub fn enqueue(&self, notification: Notification) {
        let kind = notification.kind();
        if let Err(e) = self.sender.send(notification) {
            tracing::error!(
                "Notification worker is gone, dropping {} email for {}",
                kind,
                e.0.recipient()
            );
        }
    }
}

async fn deliver<M>(mailer: Arc<M>, mut receiver: UnboundedReceiver<Notification>)
where
    M: Mailer + ?Sized,
{
    while let Some(notification) = receiver.recv().await {
        match mailer.send(&notification).await {
            Ok(()) => tracing::info!(
                "Sent {} email to {}",
                notification.kind(),
                notification.recipient()
            ),
            Err(e) => tracing::error!(
                "Failed to send {} email to {}: {}",
                notification.kind(),
                notification.recipient(),
                e
            ),
        }
    }

    tracing::debug!("Notification worker stopped");
}

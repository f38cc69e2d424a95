use crate::domain::model::Notification;
use crate::domain::ports::Notifier;
use tokio::sync::mpsc;

/// Reports notifications through the log only.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        tracing::warn!(?notification, "{}", notification.message());
    }
}

/// Forwards notifications to whoever holds the receiving end (a UI toast layer, the CLI).
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    sender: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        if self.sender.send(notification).is_err() {
            tracing::debug!("Notification dropped, no receiver: {:?}", notification);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_notifier_delivers_in_order() {
        let (notifier, mut receiver) = ChannelNotifier::new();
        notifier.notify(Notification::AddFailed);
        notifier.notify(Notification::RemoveFailed);

        assert_eq!(receiver.try_recv().unwrap(), Notification::AddFailed);
        assert_eq!(receiver.try_recv().unwrap(), Notification::RemoveFailed);
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn test_channel_notifier_without_receiver_does_not_panic() {
        let (notifier, receiver) = ChannelNotifier::new();
        drop(receiver);
        notifier.notify(Notification::UpdateFailed);
    }
}

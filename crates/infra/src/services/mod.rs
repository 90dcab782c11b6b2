mod popup_notifier;

pub use popup_notifier::{
    IPopupNotifier, LogPopupNotifier, ScheduledPopupNotification, WebhookPopupNotifier,
};
pub(crate) use popup_notifier::WEBHOOK_TIMEOUT;

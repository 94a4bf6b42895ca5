pub mod notification;

pub use notification::{
    AndroidConfig, ApnsConfig, ApnsHeaders, DeliveryTarget, NotificationRequest,
    ProviderMessage, PushNotification, SendResponse,
};

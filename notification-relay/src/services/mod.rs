pub mod metrics;
pub mod providers;

pub use metrics::record_send;
pub use providers::{
    FcmProvider, MockPushProvider, ProviderError, ProviderResponse, PushProvider,
};

use thiserror::Error;

/// Failures a hub caller can observe. Delivery problems with individual
/// subscribers are handled inside the hub and never surface here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HubError {
    #[error("broadcast hub is not running")]
    HubClosed,

    #[error("subscription to tournament {0} was dropped before it was acknowledged")]
    SubscriptionRejected(String),
}

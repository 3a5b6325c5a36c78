mod actor;
mod connection;
mod errors;
pub mod handler;
pub mod messages;

pub use actor::{HubActor, HubHandle, Subscription};
pub use connection::{Connection, SocketError, SocketWrapper};
pub use errors::HubError;
pub use messages::{
    BroadcastMessage, EventType, FinalScore, MatchCompletedPayload, ScoreUpdatedPayload,
    SubscriptionId,
};

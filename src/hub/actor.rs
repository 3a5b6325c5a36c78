use std::collections::HashMap;

use serde::Serialize;
use tokio::sync::{
    mpsc::{self, error::TrySendError},
    oneshot,
};
use tracing::{debug, info, warn};

use super::{
    errors::HubError,
    messages::{BroadcastMessage, EventType, HubCommand, SubscriptionId},
};
use crate::config::HubConfig;

struct Subscriber {
    participant_id: Option<String>,
    outbound: mpsc::Sender<String>,
}

/// Single owner of the subscriber registry.
///
/// All registry mutation happens inside [`HubActor::run`]; everything else
/// reaches it through a [`HubHandle`]. Delivery never waits: a subscriber
/// whose queue is full or closed is dropped on the spot.
pub struct HubActor {
    inbox: mpsc::Receiver<HubCommand>,
    tournaments: HashMap<String, HashMap<SubscriptionId, Subscriber>>,
    subscription_index: HashMap<SubscriptionId, String>,
    next_subscription_id: u64,
}

impl HubActor {
    pub fn new(config: HubConfig) -> (Self, HubHandle) {
        let (sender, inbox) = mpsc::channel(config.inbox_capacity);

        let actor = Self {
            inbox,
            tournaments: HashMap::new(),
            subscription_index: HashMap::new(),
            next_subscription_id: 1,
        };
        let handle = HubHandle {
            sender,
            subscriber_queue_capacity: config.subscriber_queue_capacity,
        };

        (actor, handle)
    }

    /// Creates the hub and starts it on the current runtime
    pub fn spawn(config: HubConfig) -> HubHandle {
        let (actor, handle) = Self::new(config);
        tokio::spawn(actor.run());
        handle
    }

    /// Processes commands until every [`HubHandle`] has been dropped
    pub async fn run(mut self) {
        info!("Broadcast hub started");

        while let Some(command) = self.inbox.recv().await {
            self.handle_command(command);
        }

        info!(
            tournaments = self.tournaments.len(),
            "Broadcast hub stopped, all handles dropped"
        );
    }

    fn handle_command(&mut self, command: HubCommand) {
        match command {
            HubCommand::Subscribe {
                tournament_id,
                participant_id,
                outbound,
                response,
            } => {
                let subscription_id = self.subscribe(tournament_id, participant_id, outbound);
                let _ = response.send(subscription_id);
            }
            HubCommand::Unsubscribe { subscription_id } => {
                if self.remove_subscriber(subscription_id) {
                    info!(subscription_id = %subscription_id, "Subscriber unregistered");
                }
            }
            HubCommand::PublishToTournament {
                tournament_id,
                message,
            } => self.publish_to_tournament(&tournament_id, &message),
            HubCommand::PublishToAll { message } => self.publish_to_all(&message),
            HubCommand::SubscriberCount {
                tournament_id,
                response,
            } => {
                let count = self
                    .tournaments
                    .get(&tournament_id)
                    .map_or(0, HashMap::len);
                let _ = response.send(count);
            }
            HubCommand::TournamentCount { response } => {
                let _ = response.send(self.tournaments.len());
            }
        }
    }

    fn subscribe(
        &mut self,
        tournament_id: String,
        participant_id: Option<String>,
        outbound: mpsc::Sender<String>,
    ) -> Option<SubscriptionId> {
        let subscription_id = SubscriptionId(self.next_subscription_id);
        self.next_subscription_id += 1;

        info!(
            tournament_id = %tournament_id,
            subscription_id = %subscription_id,
            participant_id = ?participant_id,
            "Subscriber registered"
        );

        let acknowledgement = match serde_json::to_string(&BroadcastMessage::connected(&tournament_id)) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "Failed to serialize connected acknowledgement");
                return None;
            }
        };

        self.tournaments
            .entry(tournament_id.clone())
            .or_default()
            .insert(
                subscription_id,
                Subscriber {
                    participant_id,
                    outbound,
                },
            );
        self.subscription_index
            .insert(subscription_id, tournament_id.clone());

        if self.deliver(&tournament_id, subscription_id, acknowledgement) {
            Some(subscription_id)
        } else {
            None
        }
    }

    fn publish_to_tournament(&mut self, tournament_id: &str, message: &BroadcastMessage) {
        let Some(subscribers) = self.tournaments.get(tournament_id) else {
            debug!(
                tournament_id = %tournament_id,
                event_type = %message.event_type,
                "No subscribers for tournament, event discarded"
            );
            return;
        };

        let json = match serde_json::to_string(message) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "Failed to serialize broadcast message");
                return;
            }
        };

        let targets: Vec<SubscriptionId> = subscribers.keys().copied().collect();
        debug!(
            tournament_id = %tournament_id,
            event_type = %message.event_type,
            subscribers = targets.len(),
            "Publishing to tournament"
        );

        for subscription_id in targets {
            self.deliver(tournament_id, subscription_id, json.clone());
        }
    }

    fn publish_to_all(&mut self, message: &BroadcastMessage) {
        let json = match serde_json::to_string(message) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "Failed to serialize broadcast message");
                return;
            }
        };

        let targets: Vec<(String, SubscriptionId)> = self
            .tournaments
            .iter()
            .flat_map(|(tournament_id, subscribers)| {
                subscribers
                    .keys()
                    .map(move |id| (tournament_id.clone(), *id))
            })
            .collect();
        debug!(
            event_type = %message.event_type,
            subscribers = targets.len(),
            "Publishing to all tournaments"
        );

        for (tournament_id, subscription_id) in targets {
            self.deliver(&tournament_id, subscription_id, json.clone());
        }
    }

    /// Non-blocking send to one subscriber. A full or closed queue drops the
    /// subscriber, which also closes its queue. Returns whether it was delivered.
    fn deliver(&mut self, tournament_id: &str, subscription_id: SubscriptionId, json: String) -> bool {
        let Some(subscriber) = self
            .tournaments
            .get(tournament_id)
            .and_then(|subscribers| subscribers.get(&subscription_id))
        else {
            return false;
        };

        match subscriber.outbound.try_send(json) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                warn!(
                    tournament_id = %tournament_id,
                    subscription_id = %subscription_id,
                    participant_id = ?subscriber.participant_id,
                    "Subscriber queue full, dropping subscriber"
                );
                self.remove_subscriber(subscription_id);
                false
            }
            Err(TrySendError::Closed(_)) => {
                debug!(
                    tournament_id = %tournament_id,
                    subscription_id = %subscription_id,
                    "Subscriber queue closed, dropping subscriber"
                );
                self.remove_subscriber(subscription_id);
                false
            }
        }
    }

    /// Removes the subscription and, if it was the last one, its tournament entry
    fn remove_subscriber(&mut self, subscription_id: SubscriptionId) -> bool {
        let Some(tournament_id) = self.subscription_index.remove(&subscription_id) else {
            return false;
        };

        if let Some(subscribers) = self.tournaments.get_mut(&tournament_id) {
            subscribers.remove(&subscription_id);
            if subscribers.is_empty() {
                self.tournaments.remove(&tournament_id);
                debug!(tournament_id = %tournament_id, "Last subscriber left, tournament removed");
            }
        }
        true
    }
}

/// A registered subscription. Events for the tournament arrive on `receiver`
/// as serialized JSON, starting with the `connected` acknowledgement.
/// `receiver` yields `None` once the hub has dropped the subscription.
#[derive(Debug)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub tournament_id: String,
    pub participant_id: Option<String>,
    pub receiver: mpsc::Receiver<String>,
}

/// Cloneable entry point to the hub. The hub stops once every handle is gone.
#[derive(Debug, Clone)]
pub struct HubHandle {
    sender: mpsc::Sender<HubCommand>,
    subscriber_queue_capacity: usize,
}

impl HubHandle {
    pub async fn subscribe(
        &self,
        tournament_id: &str,
        participant_id: Option<String>,
    ) -> Result<Subscription, HubError> {
        let (outbound, receiver) = mpsc::channel(self.subscriber_queue_capacity);
        let (response, registered) = oneshot::channel();

        self.send(HubCommand::Subscribe {
            tournament_id: tournament_id.to_string(),
            participant_id: participant_id.clone(),
            outbound,
            response,
        })
        .await?;

        let id = registered
            .await
            .map_err(|_| HubError::HubClosed)?
            .ok_or_else(|| HubError::SubscriptionRejected(tournament_id.to_string()))?;

        Ok(Subscription {
            id,
            tournament_id: tournament_id.to_string(),
            participant_id,
            receiver,
        })
    }

    pub async fn unsubscribe(&self, subscription_id: SubscriptionId) -> Result<(), HubError> {
        self.send(HubCommand::Unsubscribe { subscription_id }).await
    }

    /// Fire-and-forget: queued for the hub without waiting. If the hub's inbox
    /// is full the event is dropped with a warning.
    pub fn publish_to_tournament<T: Serialize>(
        &self,
        tournament_id: &str,
        event_type: EventType,
        payload: &T,
    ) {
        let Some(payload) = to_payload(event_type, payload) else {
            return;
        };
        let message = BroadcastMessage::new(event_type, Some(tournament_id.to_string()), payload);
        self.enqueue(HubCommand::PublishToTournament {
            tournament_id: tournament_id.to_string(),
            message,
        });
    }

    /// Fire-and-forget delivery to every subscriber of every tournament
    pub fn publish_to_all<T: Serialize>(&self, event_type: EventType, payload: &T) {
        let Some(payload) = to_payload(event_type, payload) else {
            return;
        };
        let message = BroadcastMessage::new(event_type, None, payload);
        self.enqueue(HubCommand::PublishToAll { message });
    }

    /// Live subscriptions for a tournament; 0 when the tournament has none
    pub async fn subscriber_count(&self, tournament_id: &str) -> Result<usize, HubError> {
        let (response, count) = oneshot::channel();
        self.send(HubCommand::SubscriberCount {
            tournament_id: tournament_id.to_string(),
            response,
        })
        .await?;
        count.await.map_err(|_| HubError::HubClosed)
    }

    /// Tournaments with at least one live subscription
    pub async fn tournament_count(&self) -> Result<usize, HubError> {
        let (response, count) = oneshot::channel();
        self.send(HubCommand::TournamentCount { response }).await?;
        count.await.map_err(|_| HubError::HubClosed)
    }

    async fn send(&self, command: HubCommand) -> Result<(), HubError> {
        self.sender
            .send(command)
            .await
            .map_err(|_| HubError::HubClosed)
    }

    fn enqueue(&self, command: HubCommand) {
        match self.sender.try_send(command) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                warn!("Broadcast hub inbox is full, dropping message");
            }
            Err(TrySendError::Closed(_)) => {
                debug!("Broadcast hub is not running, dropping message");
            }
        }
    }
}

fn to_payload<T: Serialize>(event_type: EventType, payload: &T) -> Option<serde_json::Value> {
    match serde_json::to_value(payload) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(event_type = %event_type, error = %e, "Failed to serialize event payload");
            None
        }
    }
}

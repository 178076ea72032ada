//! Collision event bus
//!
//! Entities subscribe when they are spawned and stay subscribed for the rest
//! of the run; a subscription whose entity is gone simply finds nothing to
//! act on. Delivery is synchronous and in registration order.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, EntityKind};
use super::missile::MISSILE_NAME;

/// Identity of one collision participant, copied out of the entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: EntityId,
    pub name: Option<String>,
    pub pos: Vec2,
}

impl From<&Entity> for Participant {
    fn from(entity: &Entity) -> Self {
        Self {
            id: entity.id,
            name: entity.name.clone(),
            pos: entity.pos,
        }
    }
}

/// Two entities overlapped; `pair` is in (outer, inner) scan order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollisionEvent {
    pub tick: u64,
    pub pair: [Participant; 2],
}

impl CollisionEvent {
    pub fn new(tick: u64, a: &Entity, b: &Entity) -> Self {
        Self {
            tick,
            pair: [Participant::from(a), Participant::from(b)],
        }
    }

    /// Whether either participant carries `name`
    pub fn involves_name(&self, name: &str) -> bool {
        self.pair.iter().any(|p| p.name.as_deref() == Some(name))
    }

    pub fn involves(&self, id: EntityId) -> bool {
        self.pair.iter().any(|p| p.id == id)
    }
}

/// What a subscriber does with a collision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Listener {
    /// End the game when a participant carries this name
    EndGame { name: String },
    /// Add one point when a participant carries this name
    Score { name: String },
}

impl Listener {
    /// Listener an entity registers at spawn, if any
    pub fn for_entity(entity: &Entity) -> Option<Listener> {
        match entity.kind {
            EntityKind::Player(_) => entity.name.clone().map(|name| Listener::EndGame { name }),
            EntityKind::ScoreTracker { .. } => Some(Listener::Score {
                name: MISSILE_NAME.to_string(),
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub subscriber: EntityId,
    pub listener: Listener,
}

/// Publish/subscribe channel for collision events
#[derive(Debug, Default)]
pub struct EventBus {
    subscriptions: Vec<Subscription>,
    /// Everything published since the last drain
    log: Vec<CollisionEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, subscriber: EntityId, listener: Listener) {
        log::debug!("{:?} subscribed with {:?}", subscriber, listener);
        self.subscriptions.push(Subscription {
            subscriber,
            listener,
        });
    }

    pub fn subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }

    /// Deliver `event` to every subscription in registration order
    pub fn publish<F>(&mut self, event: CollisionEvent, mut deliver: F)
    where
        F: FnMut(&Subscription, &CollisionEvent),
    {
        for sub in &self.subscriptions {
            deliver(sub, &event);
        }
        self.log.push(event);
    }

    /// Published events, oldest first
    pub fn published(&self) -> &[CollisionEvent] {
        &self.log
    }

    /// Drain the published-event log
    pub fn take_events(&mut self) -> Vec<CollisionEvent> {
        std::mem::take(&mut self.log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::SpriteSheet;

    fn sheet() -> SpriteSheet {
        SpriteSheet::new(800.0, 600.0)
    }

    #[test]
    fn test_delivery_follows_registration_order() {
        let mut bus = EventBus::new();
        bus.subscribe(EntityId(7), Listener::Score { name: "Missile".into() });
        bus.subscribe(EntityId(3), Listener::EndGame { name: "Player".into() });

        let s = sheet();
        let a = Entity::missile(EntityId(1), Vec2::ZERO, s.missile, 0.0, Vec2::ZERO);
        let b = Entity::asteroid(EntityId(2), Vec2::ZERO, s.asteroid, Vec2::ONE);

        let mut seen = Vec::new();
        bus.publish(CollisionEvent::new(1, &a, &b), |sub, _| seen.push(sub.subscriber));
        assert_eq!(seen, vec![EntityId(7), EntityId(3)]);
        assert_eq!(bus.published().len(), 1);
        assert_eq!(bus.take_events().len(), 1);
        assert!(bus.published().is_empty());
    }

    #[test]
    fn test_involves_name_checks_both_sides() {
        let s = sheet();
        let player = Entity::player(EntityId(1), Vec2::ZERO, s.player);
        let rock = Entity::asteroid(EntityId(2), Vec2::ZERO, s.asteroid, Vec2::ONE);
        let event = CollisionEvent::new(0, &rock, &player);
        assert!(event.involves_name("Player"));
        assert!(event.involves_name("Asteroid"));
        assert!(!event.involves_name("Missile"));
        assert!(event.involves(EntityId(2)));
    }

    #[test]
    fn test_listener_for_entity() {
        let s = sheet();
        let player = Entity::player(EntityId(1), Vec2::ZERO, s.player);
        assert_eq!(
            Listener::for_entity(&player),
            Some(Listener::EndGame { name: "Player".into() })
        );
        assert_eq!(
            Listener::for_entity(&Entity::score_tracker(EntityId(2))),
            Some(Listener::Score { name: "Missile".into() })
        );
        assert_eq!(Listener::for_entity(&Entity::asteroid_spawner(EntityId(3))), None);
    }
}

use std::sync::Arc;

use crate::{
    core::{Config, TrafficLight},
    subscribers::{Subscribe, SubscriberSet},
};

/// Builder for constructing a [`TrafficLight`].
pub struct TrafficLightBuilder {
    id: u64,
    cfg: Config,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl TrafficLightBuilder {
    /// Creates a new builder for the light `id` with default configuration.
    pub fn new(id: u64) -> Self {
        Self {
            id,
            cfg: Config::default(),
            subscribers: Vec::new(),
        }
    }

    pub fn with_config(mut self, cfg: Config) -> Self {
        self.cfg = cfg;
        self
    }

    /// Sets event subscribers for diagnostics, replacing any added before.
    ///
    /// Subscribers are called on the cycle thread for every start, toggle and stop.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Adds one subscriber.
    pub fn with_subscriber(mut self, subscriber: Arc<dyn Subscribe>) -> Self {
        self.subscribers.push(subscriber);
        self
    }

    /// Builds a red, idle light. Call [`TrafficLight::simulate`] to start cycling.
    pub fn build(self) -> TrafficLight {
        TrafficLight::from_parts(self.id, self.cfg, SubscriberSet::new(self.subscribers))
    }
}

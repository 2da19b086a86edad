//! Single consumer of the event channel.

use std::collections::HashSet;

use log::info;
use tokio::sync::mpsc;

use super::Event;

/// De-duplicated discoveries in first-seen order.
#[derive(Debug, Default, Clone)]
pub struct Discoveries {
    events: Vec<Event>,
    seen: HashSet<Event>,
}

impl Discoveries {
    /// Records `event`; returns `false` if it was already known.
    pub fn record(&mut self, event: Event) -> bool {
        if self.seen.contains(&event) {
            return false;
        }
        self.seen.insert(event.clone());
        self.events.push(event);
        true
    }

    /// All unique events in the order they were first seen.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Number of unique addresses.
    pub fn address_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, Event::Address(_)))
            .count()
    }

    /// Number of unique names.
    pub fn name_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, Event::Name(_)))
            .count()
    }

    /// True if nothing was discovered.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Drains the event channel until every sink has been dropped.
pub struct Collector {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl Collector {
    /// Wraps the receiving end of an event channel.
    pub fn new(rx: mpsc::UnboundedReceiver<Event>) -> Self {
        Collector { rx }
    }

    /// Consumes events until the channel closes and returns what was collected.
    pub async fn run(mut self) -> Discoveries {
        let mut discoveries = Discoveries::default();
        while let Some(event) = self.rx.recv().await {
            match &event {
                Event::Address(a) => log::debug!("{}: address {} for {}", a.source, a.address, a.domain),
                Event::Name(n) => log::debug!("{}: name {} for {}", n.source, n.name, n.domain),
            }
            discoveries.record(event);
        }
        info!(
            "Collected {} unique addresses and {} unique names",
            discoveries.address_count(),
            discoveries.name_count()
        );
        discoveries
    }
}

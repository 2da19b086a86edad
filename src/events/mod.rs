//! Discoveries and the one-way channel that carries them to the collector.
//!
//! Query loops emit through the `EventSink` seam and never wait for an answer.
//! `ChannelSink` forwards every event onto an unbounded channel drained by a
//! single `Collector`.

mod collector;

use serde::Serialize;
use tokio::sync::mpsc;

pub use collector::{Collector, Discoveries};

/// An address found in the forward lookup of a root domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DiscoveredAddress {
    /// Root domain the address belongs to
    pub domain: String,
    /// IPv4 or IPv6 address as reported by the provider
    pub address: String,
    /// Tag of the producing data source
    pub tag: String,
    /// Name of the producing worker
    pub source: String,
}

/// A subdomain name extracted from reverse lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DiscoveredName {
    /// Cleaned subdomain name
    pub name: String,
    /// Root domain the name belongs to
    pub domain: String,
    /// Tag of the producing data source
    pub tag: String,
    /// Name of the producing worker
    pub source: String,
}

/// Anything a worker reports downstream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    /// A discovered address
    Address(DiscoveredAddress),
    /// A discovered name
    Name(DiscoveredName),
}

/// Receives discoveries. Fire-and-forget: implementations must not block.
pub trait EventSink: Send + Sync {
    /// Reports an address.
    fn emit_address(&self, address: DiscoveredAddress);
    /// Reports a name.
    fn emit_name(&self, name: DiscoveredName);
}

/// `EventSink` backed by an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Event>,
}

impl ChannelSink {
    fn send(&self, event: Event) {
        // Events emitted after the collector is gone are dropped
        if self.tx.send(event).is_err() {
            log::debug!("Event collector closed, dropping event");
        }
    }
}

impl EventSink for ChannelSink {
    fn emit_address(&self, address: DiscoveredAddress) {
        self.send(Event::Address(address));
    }

    fn emit_name(&self, name: DiscoveredName) {
        self.send(Event::Name(name));
    }
}

/// Creates a sink and the receiving end for its single consumer.
pub fn event_channel() -> (ChannelSink, mpsc::UnboundedReceiver<Event>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ChannelSink { tx }, rx)
}

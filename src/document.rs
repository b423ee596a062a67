//! Read-only view of a parsed AsyncAPI document.
//!
//! The flag detectors only need a handful of accessors. Any parser's object
//! model can be plugged in by implementing these traits; [`crate::model`]
//! provides an owned implementation.

use crate::types::{Action, Protocol};

/// Root of a parsed document.
pub trait AsyncApiDocument {
    type Operation: Operation;
    type Channel: Channel;

    /// All operations, in document order.
    fn operations(&self) -> impl Iterator<Item = &Self::Operation>;

    /// Channels keyed by name, as declared at the document root.
    fn channels(&self) -> impl Iterator<Item = (&str, &Self::Channel)>;
}

pub trait Operation {
    type Channel: Channel;

    fn action(&self) -> Action;

    /// Channels this operation is bound to.
    fn channels(&self) -> impl Iterator<Item = &Self::Channel>;
}

/// A channel exposes its bindings both as a sequence and keyed by protocol.
pub trait Channel {
    type Binding: Binding;

    fn has_publish(&self) -> bool;

    fn has_subscribe(&self) -> bool;

    fn bindings(&self) -> impl Iterator<Item = &Self::Binding>;

    /// Keyed lookup into the bindings mapping.
    fn binding(&self, protocol: &str) -> Option<&Self::Binding> {
        self.bindings().find(|b| b.protocol() == protocol)
    }

    fn has_binding(&self, protocol: Protocol) -> bool {
        self.binding(protocol.as_str()).is_some()
    }
}

pub trait Binding {
    /// Protocol identifier, e.g. `"amqp"`.
    fn protocol(&self) -> &str;
}

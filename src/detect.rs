//! Protocol presence and publisher/subscriber detection.
//!
//! All detectors are total: a document with no operations or channels
//! yields an all-false flag set.

use tracing::{debug, trace};

use crate::document::{AsyncApiDocument, Binding, Channel, Operation};
use crate::types::{FlagKind, FlagSet, Protocol, ProtocolFlags, PublisherFlags, SubscriberFlags};

/// Which supported protocols are bound to any channel of any operation.
///
/// Existential check over operations x channels x bindings.
pub fn detect_protocols<D: AsyncApiDocument>(doc: &D) -> ProtocolFlags {
    let mut flags = FlagSet::new(FlagKind::Presence);

    for op in doc.operations() {
        for ch in op.channels() {
            for binding in ch.bindings() {
                if let Some(protocol) = Protocol::parse(binding.protocol()) {
                    trace!(%protocol, action = %op.action(), "operation uses supported binding");
                    flags.set(protocol, true);
                }
            }
        }
    }

    debug!(flags = ?flags.to_map(), "detected protocols");
    flags
}

/// Subscriber flags: a root channel that can be published to and carries the
/// protocol's binding implies a consumer on that protocol.
pub fn detect_subscribers<D: AsyncApiDocument>(doc: &D) -> SubscriberFlags {
    channel_flags(doc, FlagKind::Subscriber, |ch| ch.has_publish())
}

/// Publisher flags: a root channel that can be subscribed from and carries
/// the protocol's binding implies a producer on that protocol.
pub fn detect_publishers<D: AsyncApiDocument>(doc: &D) -> PublisherFlags {
    channel_flags(doc, FlagKind::Publisher, |ch| ch.has_subscribe())
}

/// True if any publisher flag is set.
pub fn has_publisher<D: AsyncApiDocument>(doc: &D) -> bool {
    detect_publishers(doc).any()
}

/// True if any subscriber flag is set.
pub fn has_subscriber<D: AsyncApiDocument>(doc: &D) -> bool {
    detect_subscribers(doc).any()
}

pub fn has_pub_or_sub<D: AsyncApiDocument>(doc: &D) -> bool {
    has_publisher(doc) || has_subscriber(doc)
}

// Capability and binding must both hold on the same channel.
fn channel_flags<D, F>(doc: &D, kind: FlagKind, capable: F) -> FlagSet
where
    D: AsyncApiDocument,
    F: Fn(&D::Channel) -> bool,
{
    let mut flags = FlagSet::new(kind);

    for protocol in Protocol::ALL {
        let found = doc
            .channels()
            .any(|(_, ch)| capable(ch) && ch.has_binding(*protocol));
        flags.set(*protocol, found);
    }

    debug!(kind = ?kind, flags = ?flags.to_map(), "detected channel flags");
    flags
}

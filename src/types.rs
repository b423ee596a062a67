//! Core types: supported protocols, operation actions, and boolean flag sets.

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Messaging protocols the flag detectors know about.
///
/// Every flag structure is generated over [`Protocol::ALL`], so supporting a
/// new protocol means adding a variant here and listing it in `ALL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Amqp,
}

impl Protocol {
    /// All supported protocols, in flag order.
    pub const ALL: &'static [Protocol] = &[Protocol::Amqp];

    /// Binding key used by AsyncAPI documents (e.g. `"amqp"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Amqp => "amqp",
        }
    }

    /// Label used inside flag keys (e.g. the `AMQP` in `hasAMQPSub`).
    pub fn label(&self) -> &'static str {
        match self {
            Protocol::Amqp => "AMQP",
        }
    }

    /// Parse a binding protocol identifier.
    ///
    /// Matching is exact: `"AMQP"` is not the `amqp` binding.
    pub fn parse(s: &str) -> Option<Self> {
        Protocol::ALL.iter().copied().find(|p| p.as_str() == s)
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of an operation as reported by the parsed document.
///
/// AsyncAPI 3.x uses `send`/`receive`; 2.x documents report the
/// `publish`/`subscribe` duality. Both are kept as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Send,
    Receive,
    Publish,
    Subscribe,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Send => "send",
            Action::Receive => "receive",
            Action::Publish => "publish",
            Action::Subscribe => "subscribe",
        }
    }

    /// Parse an action name. Returns `None` for anything outside the closed set.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "send" => Some(Action::Send),
            "receive" => Some(Action::Receive),
            "publish" => Some(Action::Publish),
            "subscribe" => Some(Action::Subscribe),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which question a [`FlagSet`] answers. Determines the key suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagKind {
    /// `has<PROTOCOL>`: some operation uses a binding of the protocol.
    Presence,
    /// `has<PROTOCOL>Sub`: some publish-capable channel carries the binding.
    Subscriber,
    /// `has<PROTOCOL>Pub`: some subscribe-capable channel carries the binding.
    Publisher,
}

impl FlagKind {
    fn suffix(&self) -> &'static str {
        match self {
            FlagKind::Presence => "",
            FlagKind::Subscriber => "Sub",
            FlagKind::Publisher => "Pub",
        }
    }

    /// Flag key for a protocol, e.g. `hasAMQPPub`.
    pub fn key(&self, protocol: Protocol) -> String {
        format!("has{}{}", protocol.label(), self.suffix())
    }
}

/// A fixed set of boolean flags, one per supported protocol.
///
/// Always fully populated: a fresh set holds `false` for every member of
/// [`Protocol::ALL`]. Serializes as a flat object, e.g. `{"hasAMQPSub": true}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSet {
    kind: FlagKind,
    flags: BTreeMap<Protocol, bool>,
}

/// `{"hasAMQP": bool}`
pub type ProtocolFlags = FlagSet;
/// `{"hasAMQPSub": bool}`
pub type SubscriberFlags = FlagSet;
/// `{"hasAMQPPub": bool}`
pub type PublisherFlags = FlagSet;

impl FlagSet {
    pub fn new(kind: FlagKind) -> Self {
        Self {
            kind,
            flags: Protocol::ALL.iter().map(|p| (*p, false)).collect(),
        }
    }

    pub fn kind(&self) -> FlagKind {
        self.kind
    }

    pub fn set(&mut self, protocol: Protocol, value: bool) {
        self.flags.insert(protocol, value);
    }

    pub fn get(&self, protocol: Protocol) -> bool {
        self.flags.get(&protocol).copied().unwrap_or(false)
    }

    /// Look a flag up by its rendered key (`"hasAMQP"`, `"hasAMQPPub"`, ...).
    pub fn get_key(&self, key: &str) -> Option<bool> {
        self.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// True if any flag in the set is true, whatever the key set is.
    pub fn any(&self) -> bool {
        self.flags.values().any(|v| *v)
    }

    /// Iterate `(key, value)` pairs in protocol order.
    pub fn iter(&self) -> impl Iterator<Item = (String, bool)> + '_ {
        self.flags.iter().map(move |(p, v)| (self.kind.key(*p), *v))
    }

    pub fn to_map(&self) -> BTreeMap<String, bool> {
        self.iter().collect()
    }
}

impl Serialize for FlagSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.flags.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(&key, &value)?;
        }
        map.end()
    }
}

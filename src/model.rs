//! Owned, in-memory document model.
//!
//! Mirrors what an AsyncAPI parser hands to templates after `$ref`
//! resolution: operations carry their resolved channels, channels carry their
//! bindings. Built either with the builder methods below or by
//! [`crate::load_document`].

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::document;
use crate::types::Action;

/// A parsed document: root channels plus operations.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    channels: BTreeMap<String, Channel>,
    operations: Vec<Operation>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a root channel under its own name.
    pub fn with_channel(mut self, channel: Channel) -> Self {
        self.channels.insert(channel.name.clone(), channel);
        self
    }

    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }

    pub fn channel(&self, name: &str) -> Option<&Channel> {
        self.channels.get(name)
    }

    pub fn operation(&self, id: &str) -> Option<&Operation> {
        self.operations.iter().find(|op| op.id == id)
    }
}

impl document::AsyncApiDocument for Document {
    type Operation = Operation;
    type Channel = Channel;

    fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.operations.iter()
    }

    fn channels(&self) -> impl Iterator<Item = (&str, &Channel)> {
        self.channels.iter().map(|(name, ch)| (name.as_str(), ch))
    }
}

/// An operation with its resolved channels.
///
/// Serializes with channel names only, which is what templates reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Operation {
    id: String,
    action: Action,
    #[serde(serialize_with = "serialize_channel_names")]
    channels: Vec<Channel>,
}

fn serialize_channel_names<S: Serializer>(
    channels: &[Channel],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(channels.iter().map(Channel::name))
}

impl Operation {
    pub fn new(id: impl Into<String>, action: Action) -> Self {
        Self {
            id: id.into(),
            action,
            channels: Vec::new(),
        }
    }

    pub fn with_channel(mut self, channel: Channel) -> Self {
        self.channels.push(channel);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Resolved channels as a slice, for index-based access.
    pub fn channel_list(&self) -> &[Channel] {
        &self.channels
    }
}

impl document::Operation for Operation {
    type Channel = Channel;

    fn action(&self) -> Action {
        self.action
    }

    fn channels(&self) -> impl Iterator<Item = &Channel> {
        self.channels.iter()
    }
}

/// A channel with its publish/subscribe capability and protocol bindings.
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    name: String,
    address: Option<String>,
    publish: bool,
    subscribe: bool,
    bindings: Vec<Binding>,
}

impl Channel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: None,
            publish: false,
            subscribe: false,
            bindings: Vec::new(),
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn publish(mut self, publish: bool) -> Self {
        self.publish = publish;
        self
    }

    pub fn subscribe(mut self, subscribe: bool) -> Self {
        self.subscribe = subscribe;
        self
    }

    /// Add a binding. Bindings are keyed by protocol, so a second binding
    /// for the same protocol replaces the first.
    pub fn with_binding(mut self, binding: Binding) -> Self {
        match self
            .bindings
            .iter_mut()
            .find(|b| b.protocol == binding.protocol)
        {
            Some(existing) => *existing = binding,
            None => self.bindings.push(binding),
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn binding_list(&self) -> &[Binding] {
        &self.bindings
    }
}

impl document::Channel for Channel {
    type Binding = Binding;

    fn has_publish(&self) -> bool {
        self.publish
    }

    fn has_subscribe(&self) -> bool {
        self.subscribe
    }

    fn bindings(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.iter()
    }
}

/// A protocol binding with its opaque configuration object.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    protocol: String,
    config: Value,
}

impl Binding {
    pub fn new(protocol: impl Into<String>) -> Self {
        Self {
            protocol: protocol.into(),
            config: Value::Object(Default::default()),
        }
    }

    pub fn with_config(mut self, config: Value) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &Value {
        &self.config
    }
}

impl document::Binding for Binding {
    fn protocol(&self) -> &str {
        &self.protocol
    }
}

//! Render flags: operations grouped by protocol and action.
//!
//! Templates iterate `renderFlags.amqp.send` and friends to decide which
//! producer/consumer code to emit. Two caching styles are offered:
//!
//! - [`build_render_flags`] keeps a single process-wide slot. With
//!   `use_cache = true` it returns whatever was built last, even for a
//!   different document. Suitable when one process renders one document.
//! - [`RenderFlagsCache`] is a caller-owned slot whose scope the caller picks
//!   (per document, per task, ...).

use std::any::Any;
use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use tracing::{debug, trace};

use crate::document::{AsyncApiDocument, Binding, Channel, Operation};
use crate::types::{Action, Protocol};

/// Operations per protocol and action.
///
/// Entries exist only where at least one operation was found: a document
/// that uses no supported protocol produces an empty mapping, never an
/// `amqp` entry with empty lists.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RenderFlags<O> {
    entries: BTreeMap<Protocol, BTreeMap<Action, Vec<O>>>,
}

impl<O> Default for RenderFlags<O> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<O> RenderFlags<O> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Protocols with at least one operation.
    pub fn protocols(&self) -> impl Iterator<Item = Protocol> + '_ {
        self.entries.keys().copied()
    }

    /// Actions recorded for a protocol.
    pub fn actions(&self, protocol: Protocol) -> impl Iterator<Item = Action> + '_ {
        self.entries
            .get(&protocol)
            .into_iter()
            .flat_map(|actions| actions.keys().copied())
    }

    /// Operations for a protocol/action pair, empty if none.
    pub fn operations(&self, protocol: Protocol, action: Action) -> &[O] {
        self.entries
            .get(&protocol)
            .and_then(|actions| actions.get(&action))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total number of recorded entries across all protocols and actions.
    pub fn len(&self) -> usize {
        self.entries
            .values()
            .flat_map(BTreeMap::values)
            .map(Vec::len)
            .sum()
    }

    /// Append an operation, creating the protocol and action entries on demand.
    pub fn push(&mut self, protocol: Protocol, action: Action, operation: O) {
        self.entries
            .entry(protocol)
            .or_default()
            .entry(action)
            .or_default()
            .push(operation);
    }

    /// Transform every operation, keeping the grouping.
    pub fn map<U, F>(&self, mut f: F) -> RenderFlags<U>
    where
        F: FnMut(&O) -> U,
    {
        let entries: BTreeMap<Protocol, BTreeMap<Action, Vec<U>>> = self
            .entries
            .iter()
            .map(|(protocol, actions)| {
                let actions: BTreeMap<Action, Vec<U>> = actions
                    .iter()
                    .map(|(action, ops)| (*action, ops.iter().map(&mut f).collect()))
                    .collect();
                (*protocol, actions)
            })
            .collect();
        RenderFlags { entries }
    }
}

/// Group operations by supported protocol and action without touching any cache.
///
/// An operation is appended once per supported binding on each of its
/// channels, so an operation bound over two AMQP channels appears twice.
pub fn build_render_flags_uncached<D>(doc: &D) -> RenderFlags<D::Operation>
where
    D: AsyncApiDocument,
    D::Operation: Clone,
{
    let mut flags = RenderFlags::new();

    for op in doc.operations() {
        for ch in op.channels() {
            for binding in ch.bindings() {
                if let Some(protocol) = Protocol::parse(binding.protocol()) {
                    trace!(%protocol, action = %op.action(), "render flag entry");
                    flags.push(protocol, op.action(), op.clone());
                }
            }
        }
    }

    debug!(
        protocols = flags.protocols().count(),
        entries = flags.len(),
        "built render flags"
    );
    flags
}

/// True iff the render flags exist and name at least one protocol.
pub fn has_supported_operations<O>(flags: Option<&RenderFlags<O>>) -> bool {
    flags.is_some_and(|f| !f.is_empty())
}

static PROCESS_CACHE: Mutex<Option<Box<dyn Any + Send>>> = Mutex::new(None);

/// Build render flags through the process-wide single-slot cache.
///
/// With `use_cache = true` and a cached value of the same operation type,
/// that value is returned as-is, regardless of `doc`. Otherwise the flags are
/// recomputed from `doc` and overwrite the slot.
pub fn build_render_flags<D>(doc: &D, use_cache: bool) -> RenderFlags<D::Operation>
where
    D: AsyncApiDocument,
    D::Operation: Clone + Send + 'static,
{
    let mut slot = PROCESS_CACHE
        .lock()
        .unwrap_or_else(PoisonError::into_inner);

    if use_cache {
        let cached = slot
            .as_ref()
            .and_then(|value| (**value).downcast_ref::<RenderFlags<D::Operation>>());
        if let Some(cached) = cached {
            debug!("reusing process-wide render flags");
            return cached.clone();
        }
    }

    let flags = build_render_flags_uncached(doc);
    *slot = Some(Box::new(flags.clone()));
    flags
}

/// Caller-owned single-slot cache for render flags.
///
/// Nothing ties the cached value to a document: the caller decides when a
/// new document needs [`rebuild`](Self::rebuild) or [`clear`](Self::clear).
#[derive(Debug)]
pub struct RenderFlagsCache<O> {
    slot: Mutex<Option<RenderFlags<O>>>,
}

impl<O> Default for RenderFlagsCache<O> {
    fn default() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }
}

impl<O: Clone> RenderFlagsCache<O> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached flags, building them from `doc` on first use.
    pub fn get_or_build<D>(&self, doc: &D) -> RenderFlags<O>
    where
        D: AsyncApiDocument<Operation = O>,
    {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        slot.get_or_insert_with(|| build_render_flags_uncached(doc))
            .clone()
    }

    /// Recompute from `doc` and replace the cached value.
    pub fn rebuild<D>(&self, doc: &D) -> RenderFlags<O>
    where
        D: AsyncApiDocument<Operation = O>,
    {
        let flags = build_render_flags_uncached(doc);
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(flags.clone());
        flags
    }

    pub fn get(&self) -> Option<RenderFlags<O>> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear(&self) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Serializes tests that read or write the process-wide slot.
#[cfg(test)]
pub(crate) static PROCESS_CACHE_TEST_LOCK: Mutex<()> = Mutex::new(());

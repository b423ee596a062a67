//! All flags for one document, bundled as a template context.

use serde::Serialize;
use tracing::debug;

use crate::detect::{detect_protocols, detect_publishers, detect_subscribers};
use crate::document::AsyncApiDocument;
use crate::render::{build_render_flags, has_supported_operations, RenderFlags};
use crate::types::{ProtocolFlags, PublisherFlags, SubscriberFlags};

/// Options for building a [`FlagReport`].
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Reuse the process-wide render flags if already built. Defaults to true.
    pub use_cache: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self { use_cache: true }
    }
}

impl ReportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn use_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self
    }
}

/// Every derived flag for a document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlagReport<O> {
    pub protocol_flags: ProtocolFlags,
    pub publisher_flags: PublisherFlags,
    pub subscriber_flags: SubscriberFlags,
    pub has_pub_or_sub: bool,
    pub has_supported_operations: bool,
    pub render_flags: RenderFlags<O>,
}

impl<O> FlagReport<O> {
    /// Build the report. Render flags go through the process-wide cache
    /// when `options.use_cache` is set.
    pub fn build<D>(doc: &D, options: &ReportOptions) -> Self
    where
        D: AsyncApiDocument<Operation = O>,
        O: Clone + Send + 'static,
    {
        let publisher_flags = detect_publishers(doc);
        let subscriber_flags = detect_subscribers(doc);
        let render_flags = build_render_flags(doc, options.use_cache);

        let report = Self {
            protocol_flags: detect_protocols(doc),
            has_pub_or_sub: publisher_flags.any() || subscriber_flags.any(),
            publisher_flags,
            subscriber_flags,
            has_supported_operations: has_supported_operations(Some(&render_flags)),
            render_flags,
        };

        debug!(
            has_pub_or_sub = report.has_pub_or_sub,
            has_supported_operations = report.has_supported_operations,
            "built flag report"
        );
        report
    }

    /// True when there is code to generate: supported operations exist and
    /// some channel implies a publisher or subscriber.
    pub fn should_generate(&self) -> bool {
        self.has_supported_operations && self.has_pub_or_sub
    }
}

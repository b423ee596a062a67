//! AsyncAPI template flags
//!
//! Derives the boolean and structural flags a code-generation template needs
//! from an already-parsed AsyncAPI document: which messaging protocols are
//! bound, which operations use them, and whether the application publishes,
//! subscribes, or both.
//!
//! The parser is not part of this crate. Any parsed model can be used by
//! implementing the read-only traits in [`document`]; [`model`] provides an
//! owned implementation and [`load_document`] reads one from a JSON snapshot.
//!
//! # Example
//!
//! ```
//! use asyncapi_flags::model::{Binding, Channel, Document, Operation};
//! use asyncapi_flags::{build_render_flags_uncached, detect_publishers, pascal_case, Action, Protocol};
//!
//! let channel = Channel::new("lightMeasured")
//!     .subscribe(true)
//!     .with_binding(Binding::new("amqp"));
//! let doc = Document::new()
//!     .with_channel(channel.clone())
//!     .with_operation(Operation::new("sendLightMeasured", Action::Send).with_channel(channel));
//!
//! assert_eq!(detect_publishers(&doc).get_key("hasAMQPPub"), Some(true));
//!
//! let flags = build_render_flags_uncached(&doc);
//! assert_eq!(flags.operations(Protocol::Amqp, Action::Send).len(), 1);
//!
//! assert_eq!(pascal_case("light-measured"), "LightMeasured");
//! ```
//!
//! # Flags
//!
//! | Flag | Set when |
//! |------|----------|
//! | `hasAMQP` | an operation's channel carries an `amqp` binding |
//! | `hasAMQPSub` | a root channel has publish capability and an `amqp` binding |
//! | `hasAMQPPub` | a root channel has subscribe capability and an `amqp` binding |
//!
//! Subscriber and publisher are named from the broker's side: a channel that
//! is published to implies a consumer.

mod casing;
mod detect;
pub mod document;
mod error;
mod loader;
pub mod model;
mod render;
mod report;
mod types;

pub use casing::{camel_case, deburr, pascal_case, words};
pub use detect::{
    detect_protocols, detect_publishers, detect_subscribers, has_pub_or_sub, has_publisher,
    has_subscriber,
};
pub use document::AsyncApiDocument;
pub use error::LoadError;
pub use loader::{is_url, load_document, load_document_auto, load_document_str, load_document_value};
pub use render::{
    build_render_flags, build_render_flags_uncached, has_supported_operations, RenderFlags,
    RenderFlagsCache,
};
pub use report::{FlagReport, ReportOptions};
pub use types::{
    Action, FlagKind, FlagSet, Protocol, ProtocolFlags, PublisherFlags, SubscriberFlags,
};

#[cfg(feature = "remote")]
pub use loader::load_document_url;

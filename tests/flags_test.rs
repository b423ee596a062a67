//! Integration tests for flag detection over document snapshots.

use asyncapi_flags::document::{Binding as _, Channel as _, Operation as _};
use asyncapi_flags::model::{Binding, Channel, Document};
use asyncapi_flags::{
    build_render_flags_uncached, detect_protocols, detect_publishers, detect_subscribers,
    has_pub_or_sub, has_publisher, has_subscriber, has_supported_operations, load_document_str,
    pascal_case, Action, Protocol, RenderFlagsCache,
};

const DOC_WITHOUT_OPERATIONS: &str = r#"{}"#;

const DOC_WITH_AMQP_PUBLISHER: &str = r#"{
    "channels": {
        "user/signedup": {
            "address": "user/signedup",
            "publish": true,
            "bindings": { "amqp": { "is": "queue", "queue": { "name": "signups" } } }
        }
    },
    "operations": [
        { "id": "sendUserSignedUp", "action": "send", "channels": ["user/signedup"] }
    ]
}"#;

const DOC_WITH_AMQP_SUBSCRIBER: &str = r#"{
    "channels": {
        "user/signedup": {
            "subscribe": true,
            "bindings": { "amqp": { "is": "routingKey" } }
        }
    },
    "operations": [
        { "id": "onUserSignedUp", "action": "receive", "channels": ["user/signedup"] }
    ]
}"#;

const DOC_WITHOUT_AMQP_PUBLISHER: &str = r#"{
    "channels": {
        "user/signedup": {
            "publish": true,
            "bindings": { "kafka": { "topic": "signups" } }
        },
        "user/deleted": {
            "subscribe": true,
            "bindings": { "amqp": {} }
        }
    },
    "operations": [
        { "id": "onUserDeleted", "action": "receive", "channels": ["user/deleted"] }
    ]
}"#;

fn load(content: &str) -> Document {
    load_document_str(content).unwrap()
}

// === Protocol Flags ===

mod protocol_flags {
    use super::*;

    #[test]
    fn false_when_no_operations() {
        let flags = detect_protocols(&load(DOC_WITHOUT_OPERATIONS));
        assert_eq!(serde_json::to_value(&flags).unwrap(), serde_json::json!({ "hasAMQP": false }));
    }

    #[test]
    fn true_when_operations_present() {
        let flags = detect_protocols(&load(DOC_WITH_AMQP_SUBSCRIBER));
        assert_eq!(serde_json::to_value(&flags).unwrap(), serde_json::json!({ "hasAMQP": true }));
    }
}

// === Render Flags ===

mod render_flags {
    use super::*;

    #[test]
    fn send_operation_over_amqp_channel() {
        let flags = build_render_flags_uncached(&load(DOC_WITH_AMQP_PUBLISHER));

        let operations = flags.operations(Protocol::Amqp, Action::Send);
        assert_eq!(operations.len(), 1);

        let channels = operations[0].channel_list();
        assert_eq!(channels.len(), 1);

        let protocol = channels[0].bindings().next().unwrap().protocol();
        assert_eq!(protocol, "amqp");
    }

    #[test]
    fn empty_without_operations() {
        let flags = build_render_flags_uncached(&load(DOC_WITHOUT_OPERATIONS));
        assert!(flags.is_empty());
        assert!(!has_supported_operations(Some(&flags)));
        assert_eq!(serde_json::to_string(&flags).unwrap(), "{}");
    }

    #[test]
    fn receive_operations_grouped_separately() {
        let flags = build_render_flags_uncached(&load(DOC_WITH_AMQP_SUBSCRIBER));
        assert!(flags.operations(Protocol::Amqp, Action::Send).is_empty());
        assert_eq!(
            flags.operations(Protocol::Amqp, Action::Receive)[0].id(),
            "onUserSignedUp"
        );
    }

    #[test]
    fn v2_actions_are_kept_verbatim() {
        let doc = load(
            r#"{
                "channels": { "a": { "bindings": { "amqp": {} } } },
                "operations": [
                    { "id": "pub", "action": "publish", "channels": ["a"] },
                    { "id": "sub", "action": "subscribe", "channels": ["a"] }
                ]
            }"#,
        );

        let flags = build_render_flags_uncached(&doc);
        assert_eq!(
            flags.actions(Protocol::Amqp).collect::<Vec<_>>(),
            [Action::Publish, Action::Subscribe]
        );
    }

    #[test]
    fn scoped_cache_per_document() {
        let publisher = load(DOC_WITH_AMQP_PUBLISHER);
        let subscriber = load(DOC_WITH_AMQP_SUBSCRIBER);

        let first = RenderFlagsCache::new();
        let second = RenderFlagsCache::new();

        assert_eq!(
            first.get_or_build(&publisher),
            build_render_flags_uncached(&publisher)
        );
        assert_eq!(
            second.get_or_build(&subscriber),
            build_render_flags_uncached(&subscriber)
        );
        // each cache keeps its own document
        assert_eq!(first.get_or_build(&subscriber), first.get().unwrap());
        assert_ne!(first.get().unwrap(), second.get().unwrap());
    }
}

// === Subscriber / Publisher Flags ===

mod channel_flags {
    use super::*;

    #[test]
    fn subscriber_false_when_no_channels() {
        let flags = detect_subscribers(&load(DOC_WITHOUT_OPERATIONS));
        assert_eq!(flags.get_key("hasAMQPSub"), Some(false));
    }

    #[test]
    fn subscriber_false_without_amqp_publish_channel() {
        let flags = detect_subscribers(&load(DOC_WITHOUT_AMQP_PUBLISHER));
        assert_eq!(flags.get_key("hasAMQPSub"), Some(false));
    }

    #[test]
    fn subscriber_true_with_amqp_publish_channel() {
        let flags = detect_subscribers(&load(DOC_WITH_AMQP_PUBLISHER));
        assert_eq!(flags.get_key("hasAMQPSub"), Some(true));
    }

    #[test]
    fn publisher_false_when_no_channels() {
        let flags = detect_publishers(&load(DOC_WITHOUT_OPERATIONS));
        assert_eq!(flags.get_key("hasAMQPPub"), Some(false));
    }

    #[test]
    fn publisher_true_with_amqp_subscribe_channel() {
        let flags = detect_publishers(&load(DOC_WITH_AMQP_SUBSCRIBER));
        assert_eq!(flags.get_key("hasAMQPPub"), Some(true));
    }

    #[test]
    fn publish_only_channel_contributes_to_subscriber_only() {
        let doc = load(DOC_WITH_AMQP_PUBLISHER);
        assert!(has_subscriber(&doc));
        assert!(!has_publisher(&doc));
    }

    #[test]
    fn root_channels_used_even_without_operations() {
        let ch = Channel::new("jobs")
            .publish(true)
            .with_binding(Binding::new("amqp"));
        let doc = Document::new().with_channel(ch);

        assert!(has_subscriber(&doc));
        assert!(!detect_protocols(&doc).any());
    }
}

// === Combinators ===

mod combinators {
    use super::*;

    #[test]
    fn false_when_no_channels() {
        assert!(!has_pub_or_sub(&load(DOC_WITHOUT_OPERATIONS)));
    }

    #[test]
    fn true_when_subscribers_present() {
        assert!(has_pub_or_sub(&load(DOC_WITH_AMQP_SUBSCRIBER)));
    }

    #[test]
    fn true_when_publishers_present() {
        assert!(has_pub_or_sub(&load(DOC_WITH_AMQP_PUBLISHER)));
    }

    #[test]
    fn either_is_disjunction() {
        for content in [
            DOC_WITHOUT_OPERATIONS,
            DOC_WITH_AMQP_PUBLISHER,
            DOC_WITH_AMQP_SUBSCRIBER,
            DOC_WITHOUT_AMQP_PUBLISHER,
        ] {
            let doc = load(content);
            assert_eq!(
                has_pub_or_sub(&doc),
                has_publisher(&doc) || has_subscriber(&doc)
            );
        }
    }
}

// === Custom document models ===

mod custom_model {
    use super::*;
    use asyncapi_flags::document;
    use asyncapi_flags::AsyncApiDocument;

    // Minimal foreign model: one channel, bound to a fixed protocol.
    struct Link {
        protocol: &'static str,
    }

    impl document::Binding for Link {
        fn protocol(&self) -> &str {
            self.protocol
        }
    }

    struct Pipe {
        links: Vec<Link>,
    }

    impl document::Channel for Pipe {
        type Binding = Link;

        fn has_publish(&self) -> bool {
            true
        }

        fn has_subscribe(&self) -> bool {
            false
        }

        fn bindings(&self) -> impl Iterator<Item = &Link> {
            self.links.iter()
        }
    }

    #[derive(Clone, Debug, PartialEq)]
    struct Step;

    impl document::Operation for Step {
        type Channel = Pipe;

        fn action(&self) -> Action {
            Action::Receive
        }

        fn channels(&self) -> impl Iterator<Item = &Pipe> {
            std::iter::empty()
        }
    }

    struct Spec {
        pipes: Vec<(String, Pipe)>,
    }

    impl AsyncApiDocument for Spec {
        type Operation = Step;
        type Channel = Pipe;

        fn operations(&self) -> impl Iterator<Item = &Step> {
            std::iter::empty()
        }

        fn channels(&self) -> impl Iterator<Item = (&str, &Pipe)> {
            self.pipes.iter().map(|(name, pipe)| (name.as_str(), pipe))
        }
    }

    #[test]
    fn detectors_work_over_any_model() {
        let spec = Spec {
            pipes: vec![(
                "jobs".to_string(),
                Pipe {
                    links: vec![Link { protocol: "amqp" }],
                },
            )],
        };

        assert!(has_subscriber(&spec));
        assert!(!has_publisher(&spec));
        assert!(build_render_flags_uncached(&spec).is_empty());
    }
}

// === Casing ===

mod casing {
    use super::*;

    #[test]
    fn pascal_case_conversions() {
        assert_eq!(pascal_case("pS"), "PS");
        assert_eq!(pascal_case("my-event"), "MyEvent");
        assert_eq!(pascal_case(""), "");
        assert_eq!(pascal_case("x"), "X");
    }

    #[test]
    fn pascal_case_folds_accents_and_keeps_ordinals() {
        assert_eq!(pascal_case("über-event"), "UberEvent");
        assert_eq!(pascal_case("café"), "Cafe");
        assert_eq!(pascal_case("1st-place"), "1stPlace");
    }

    #[test]
    fn pascal_case_fixed_point() {
        let once = pascal_case("user signed up");
        assert_eq!(once, "UserSignedUp");
        assert_eq!(pascal_case(&once), once);
    }
}

#[test]
fn operation_action_from_snapshot() {
    let doc = load(DOC_WITH_AMQP_SUBSCRIBER);
    let op = doc.operation("onUserSignedUp").unwrap();
    assert_eq!(op.action(), Action::Receive);
    assert!(op.channels().all(|ch| ch.has_binding(Protocol::Amqp)));
}

//! Filtering behaviour of configurations built from command-line input.

use std::sync::{Arc, Mutex};

use logging::{Topic, VerbosityConfig, parse_topic_list};
use tracing::Subscriber;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::{EnvFilter, Registry};

/// Records the target of every event that passes the filter.
#[derive(Clone, Default)]
struct Targets(Arc<Mutex<Vec<String>>>);

impl<S: Subscriber> Layer<S> for Targets {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        self.0
            .lock()
            .unwrap()
            .push(event.metadata().target().to_owned());
    }
}

fn emitted(config: &VerbosityConfig) -> Vec<String> {
    let targets = Targets::default();
    let filter = EnvFilter::try_new(config.directives()).unwrap();
    let subscriber = Registry::default().with(filter).with(targets.clone());
    tracing::subscriber::with_default(subscriber, || {
        tracing::warn!(target: "pageshift::store", "page missing");
        tracing::info!(target: "pageshift::batch", "batch started");
        tracing::debug!(target: "pageshift::search", "candidate rejected");
        tracing::debug!(target: "pageshift::bulk", "bulk comparison");
        tracing::trace!(target: "pageshift::policy", "policy step");
    });
    let collected = targets.0.lock().unwrap().clone();
    collected
}

#[test]
fn quiet_keeps_only_warnings() {
    assert_eq!(
        emitted(&VerbosityConfig::default()),
        vec!["pageshift::store"]
    );
}

#[test]
fn single_verbose_adds_info() {
    assert_eq!(
        emitted(&VerbosityConfig::from_verbose_level(1)),
        vec!["pageshift::store", "pageshift::batch"]
    );
}

#[test]
fn debug_topic_is_selective() {
    let topics = parse_topic_list("search").unwrap();
    let config = VerbosityConfig::from_verbose_level(0).with_debug_topics(topics);
    assert_eq!(
        emitted(&config),
        vec!["pageshift::store", "pageshift::search"]
    );
}

#[test]
fn triple_verbose_emits_everything() {
    assert_eq!(emitted(&VerbosityConfig::from_verbose_level(3)).len(), 5);
}

#[test]
fn every_topic_target_is_recognised() {
    for topic in Topic::ALL {
        assert_eq!(Topic::from_target(&topic.target()), Some(topic));
    }
}

#[cfg(feature = "serde")]
#[test]
fn config_serializes_topics_lowercase() {
    let config = VerbosityConfig::from_verbose_level(2).with_debug_topics([Topic::Store]);
    let value = serde_json::to_value(&config).unwrap();
    assert_eq!(value["verbose"], 2);
    assert_eq!(value["debug_topics"][0], "store");
}

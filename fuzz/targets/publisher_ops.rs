#![no_main]

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use herald::{Action, PublishOptions, Publisher, SubscribeOptions, Subscriber};

const SUBSCRIBERS: usize = 4;
const EVENTS: [&str; 3] = ["save", "close", "sa"];
const SCOPES: [&str; 4] = ["", " ", "ve", "tab"];

#[derive(Debug, Arbitrary)]
enum FuzzOp {
    Subscribe {
        who: u8,
        event: u8,
        scope: Option<u8>,
        max: Option<u8>,
    },
    Once {
        who: u8,
        event: u8,
    },
    Unsubscribe {
        who: u8,
        event: u8,
        scope: Option<u8>,
    },
    Publish {
        event: u8,
        scope: Option<u8>,
        cancellable: bool,
    },
}

fn pick<'a>(
    table: &[&'a str],
    index: u8,
) -> &'a str {
    table[index as usize % table.len()]
}

fuzz_target!(|ops: Vec<FuzzOp>| {
    let publisher: Publisher<u8> = Publisher::new();
    let hits: Vec<Arc<AtomicUsize>> = (0..SUBSCRIBERS)
        .map(|_| Arc::new(AtomicUsize::new(0)))
        .collect();
    let subscribers: Vec<Subscriber<u8>> = hits
        .iter()
        .map(|hits| {
            let hits = Arc::clone(hits);
            Subscriber::new(move |action: &Action<u8>| {
                hits.fetch_add(1, Ordering::Relaxed);
                if action.detail().is_some_and(|d| d % 2 == 0) {
                    action.prevent_default();
                }
            })
        })
        .collect();

    for (i, op) in ops.iter().enumerate() {
        match *op {
            FuzzOp::Subscribe {
                who,
                event,
                scope,
                max,
            } => {
                let sub = &subscribers[who as usize % SUBSCRIBERS];
                let event = pick(&EVENTS, event);
                let scope = scope.map(|s| pick(&SCOPES, s));
                let before = publisher.is_subscribed(event, sub, scope);

                let mut options = SubscribeOptions::new();
                options.max_call_count = max.map(usize::from);
                options.scope = scope.map(str::to_string);
                let accepted = publisher.subscribe(event, sub, options);

                // only a fresh subscription with a positive limit is accepted
                assert_eq!(accepted, !before && max != Some(0));
                assert!(publisher.is_subscribed(event, sub, scope) || max == Some(0));
            }
            FuzzOp::Once { who, event } => {
                let sub = &subscribers[who as usize % SUBSCRIBERS];
                let event = pick(&EVENTS, event);
                let before = publisher.is_subscribed(event, sub, None);
                assert_eq!(
                    publisher.once(event, sub, SubscribeOptions::new()),
                    !before
                );
            }
            FuzzOp::Unsubscribe { who, event, scope } => {
                let sub = &subscribers[who as usize % SUBSCRIBERS];
                let event = pick(&EVENTS, event);
                let scope = scope.map(|s| pick(&SCOPES, s));
                let before = publisher.is_subscribed(event, sub, scope);

                assert_eq!(publisher.unsubscribe(event, sub, scope), before);
                assert!(!publisher.is_subscribed(event, sub, scope));
            }
            FuzzOp::Publish {
                event,
                scope,
                cancellable,
            } => {
                let event = pick(&EVENTS, event);
                let scope = scope.map(|s| pick(&SCOPES, s));
                let expected = publisher.subscriber_count(event, scope);
                let before: usize = hits.iter().map(|h| h.load(Ordering::Relaxed)).sum();
                let had_event = publisher.has_event(event, scope);

                let detail = i as u8;
                let mut options = PublishOptions::new();
                options.cancellable = cancellable;
                options.scope = scope.map(str::to_string);
                let action = publisher
                    .publish(event, detail, options)
                    .expect("infallible subscribers");

                let after: usize = hits.iter().map(|h| h.load(Ordering::Relaxed)).sum();
                assert_eq!(after - before, expected);
                assert_eq!(action.detail(), Some(&detail));
                assert_eq!(action.cancelable(), cancellable);
                assert_eq!(
                    action.default_prevented(),
                    cancellable && expected > 0 && detail % 2 == 0
                );
                // publishing never creates registry entries
                assert_eq!(publisher.has_event(event, scope), had_event);
            }
        }
    }

    let stats = publisher.stats();
    assert_eq!(
        stats.delivered,
        hits.iter().map(|h| h.load(Ordering::Relaxed)).sum::<usize>()
    );
});

//! Property-based тесты публикатора.
//!
//! Случайные последовательности операций проигрываются и на публикаторе, и
//! на простой модели в памяти; число доставок и состав подписок должны
//! совпадать.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use herald::{
    effective_name, is_blank, Action, PublishOptions, Publisher, SubscribeOptions, Subscriber,
};
use proptest::prelude::*;

const PROPTEST_CASES: u32 = 256;
const SUBSCRIBERS: usize = 4;

#[derive(Debug, Clone)]
enum Op {
    Subscribe { who: usize, max: Option<usize> },
    Unsubscribe { who: usize },
    Publish,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..SUBSCRIBERS, prop::option::of(0usize..4))
            .prop_map(|(who, max)| Op::Subscribe { who, max }),
        (0..SUBSCRIBERS).prop_map(|who| Op::Unsubscribe { who }),
        Just(Op::Publish),
        Just(Op::Publish),
    ]
}

/// Список подписок, каким его должен держать публикатор: (кто, осталось вызовов).
#[derive(Default)]
struct Model {
    subscriptions: Vec<(usize, Option<usize>)>,
    hits: [usize; SUBSCRIBERS],
}

impl Model {
    fn subscribe(
        &mut self,
        who: usize,
        max: Option<usize>,
    ) -> bool {
        if max == Some(0) || self.subscriptions.iter().any(|(w, _)| *w == who) {
            return false;
        }
        self.subscriptions.push((who, max));
        true
    }

    fn unsubscribe(
        &mut self,
        who: usize,
    ) -> bool {
        match self.subscriptions.iter().position(|(w, _)| *w == who) {
            Some(index) => {
                self.subscriptions.remove(index);
                true
            }
            None => false,
        }
    }

    fn publish(&mut self) {
        for (who, remaining) in &mut self.subscriptions {
            self.hits[*who] += 1;
            if let Some(left) = remaining {
                *left -= 1;
            }
        }
        self.subscriptions.retain(|(_, remaining)| *remaining != Some(0));
    }
}

fn counting() -> (Arc<AtomicUsize>, Subscriber<u32>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let sub = {
        let hits = Arc::clone(&hits);
        Subscriber::new(move |_: &Action<u32>| {
            hits.fetch_add(1, Ordering::SeqCst);
        })
    };
    (hits, sub)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(PROPTEST_CASES))]

    /// A subscriber limited to `max` calls sees `min(max, publishes)` of them.
    #[test]
    fn prop_call_limit(max in 1usize..20, publishes in 0usize..40) {
        let publisher = Publisher::new();
        let (hits, sub) = counting();
        prop_assert!(publisher.subscribe("e", &sub, SubscribeOptions::new().with_max_call_count(max)));

        for n in 0..publishes {
            publisher.publish("e", n as u32, PublishOptions::new()).unwrap();
        }

        prop_assert_eq!(hits.load(Ordering::SeqCst), max.min(publishes));
        prop_assert_eq!(publisher.is_subscribed("e", &sub, None), max > publishes);
    }

    /// Whitespace-only scopes never change the event name.
    #[test]
    fn prop_blank_scope_keeps_name(event in "[a-z]{1,12}", scope in "[ \t\n]{0,6}") {
        prop_assert!(is_blank(Some(scope.as_str())));
        prop_assert_eq!(effective_name(&event, Some(scope.as_str()), ""), event.as_str());
        prop_assert_eq!(effective_name(&event, Some(scope.as_str()), ":"), event.as_str());
    }

    /// A non-blank scope is appended after the separator.
    #[test]
    fn prop_scope_appended(event in "[a-z]{1,12}", scope in "[a-z]{1,6}", sep in "[:/.]{0,2}") {
        let name = effective_name(&event, Some(scope.as_str()), &sep);
        prop_assert_eq!(name, format!("{event}{sep}{scope}"));
    }

    /// The publisher agrees with the model for any sequence of operations.
    #[test]
    fn prop_matches_model(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let publisher = Publisher::new();
        let subscribers: Vec<_> = (0..SUBSCRIBERS).map(|_| counting()).collect();
        let mut model = Model::default();

        for op in &ops {
            match *op {
                Op::Subscribe { who, max } => {
                    let options = SubscribeOptions { max_call_count: max, scope: None };
                    let accepted = publisher.subscribe("e", &subscribers[who].1, options);
                    prop_assert_eq!(accepted, model.subscribe(who, max));
                }
                Op::Unsubscribe { who } => {
                    let removed = publisher.unsubscribe("e", &subscribers[who].1, None);
                    prop_assert_eq!(removed, model.unsubscribe(who));
                }
                Op::Publish => {
                    publisher.publish("e", None, PublishOptions::new()).unwrap();
                    model.publish();
                }
            }
        }

        for (who, (hits, sub)) in subscribers.iter().enumerate() {
            prop_assert_eq!(hits.load(Ordering::SeqCst), model.hits[who]);
            prop_assert_eq!(
                publisher.is_subscribed("e", sub, None),
                model.subscriptions.iter().any(|(w, _)| *w == who)
            );
        }
        prop_assert_eq!(publisher.subscriber_count("e", None), model.subscriptions.len());
    }
}

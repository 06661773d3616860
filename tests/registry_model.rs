use event_dispatch::{CollectionKind, Dispatcher, Event, ListenerEntry};
use proptest::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug)]
struct Tick;
impl Event for Tick {}

const LISTENERS: usize = 4;

#[derive(Debug, Clone)]
enum Op {
    Register(usize),
    Unregister(usize),
    Post,
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..LISTENERS).prop_map(Op::Register),
        2 => (0..LISTENERS).prop_map(Op::Unregister),
        3 => Just(Op::Post),
        1 => Just(Op::Clear),
    ]
}

fn collection_kind() -> impl Strategy<Value = CollectionKind> {
    prop_oneof![
        Just(CollectionKind::Ordered),
        Just(CollectionKind::Deduplicated),
        Just(CollectionKind::Unordered),
    ]
}

proptest! {
    /// Delivery counts always match a multiset (or set) model of the registry.
    #[test]
    fn deliveries_match_registration_model(
        kind in collection_kind(),
        ops in prop::collection::vec(op(), 0..64)
    ) {
        let dispatcher = Dispatcher::builder()
            .collection(kind)
            .unsynchronised()
            .unwrap();

        let hits: Vec<Arc<AtomicUsize>> = (0..LISTENERS)
            .map(|_| Arc::new(AtomicUsize::new(0)))
            .collect();
        let entries: Vec<ListenerEntry> = hits
            .iter()
            .map(|hits| {
                let hits = hits.clone();
                ListenerEntry::from_fn(move |_: &Tick| {
                    hits.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                })
            })
            .collect();

        let mut registered = [0usize; LISTENERS];
        let mut expected = [0usize; LISTENERS];

        for op in ops {
            match op {
                Op::Register(i) => {
                    dispatcher.register(&entries[i]);
                    if kind.deduplicates() {
                        registered[i] = 1;
                    } else {
                        registered[i] += 1;
                    }
                }
                Op::Unregister(i) => {
                    let removed = dispatcher.unregister(&entries[i]);
                    prop_assert_eq!(removed, registered[i] > 0);
                    registered[i] = 0;
                }
                Op::Post => {
                    dispatcher.post(&Tick).unwrap();
                    for (count, times) in expected.iter_mut().zip(registered.iter()) {
                        *count += times;
                    }
                }
                Op::Clear => {
                    dispatcher.clear();
                    registered = [0; LISTENERS];
                }
            }

            prop_assert_eq!(
                dispatcher.listener_count::<Tick>(),
                registered.iter().sum::<usize>()
            );
        }

        let actual: Vec<usize> = hits.iter().map(|h| h.load(Ordering::SeqCst)).collect();
        prop_assert_eq!(actual, expected.to_vec());
    }
}

//! One registry shared by many threads

use std::collections::HashSet;
use std::sync::Mutex;
use std::thread;

use frost::{Handle, ImmutableType, Instance, Registry, StateStore, TypeAuthority};
use serde_json::json;

use crate::common::{declare_point, registry};

const THREADS: usize = 8;
const ROUNDS: usize = 50;

#[test]
fn handles_cross_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<StateStore>();
    assert_send_sync::<Registry>();
    assert_send_sync::<ImmutableType>();
    assert_send_sync::<TypeAuthority>();
    assert_send_sync::<Instance>();
}

#[test]
fn parallel_construct_duplicate_drop() {
    let mut registry = registry();
    let point = declare_point(&mut registry, false);
    let issued = Mutex::new(Vec::<Handle>::new());

    thread::scope(|scope| {
        for worker in 0..THREADS {
            let point = &point;
            let issued = &issued;
            scope.spawn(move || {
                for round in 0..ROUNDS {
                    let x = (worker * ROUNDS + round) as i64;
                    let p = point.construct(json!({"x": x})).unwrap();
                    let copy = p.duplicate().unwrap();
                    assert_eq!(copy.get("x").unwrap(), Some(json!(x)));
                    issued
                        .lock()
                        .unwrap()
                        .extend([p.identity(), copy.identity()]);
                    drop(p);
                    assert_eq!(copy.get("x").unwrap(), Some(json!(x)));
                }
            });
        }
    });

    let issued = issued.into_inner().unwrap();
    assert_eq!(issued.len(), THREADS * ROUNDS * 2);
    let unique: HashSet<Handle> = issued.iter().copied().collect();
    assert_eq!(unique.len(), issued.len());
    assert_eq!(registry.store().live_count(), 0);
}

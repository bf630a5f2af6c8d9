use models::*;

use std::collections::BTreeMap;
use std::rc::Rc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::seq::SliceRandom;
use sorted_map::SortedMap;

const COUNTS: [usize; 2] = [1000, 10000];

fn shuffled_keys<K: TestKey>(count: usize) -> Vec<K> {
    let mut keys = (0..count).map(K::from_i).collect::<Vec<_>>();
    keys.shuffle(&mut rand::thread_rng());
    keys
}

fn filled_map<K: TestKey>(count: usize) -> SortedMap<K, Rc<Value>> {
    let map = SortedMap::with_capacity(count);
    for i in 0..count {
        map.insert(K::from_i(i), Rc::new(Value::default())).unwrap();
    }
    map
}

fn bench_sorted_map<K: TestKey>(c: &mut Criterion) {
    let name = K::name();

    for count in COUNTS {
        c.bench_function(format!("sorted_map<{name}> random_insert {count}").as_str(), |b| {
            let keys = shuffled_keys::<K>(count);
            b.iter(|| {
                let map = SortedMap::new();
                for k in keys.iter() {
                    map.insert(k.clone(), Rc::new(Value::default())).unwrap();
                }
                map
            });
        });

        c.bench_function(format!("sorted_map<{name}> random_get {count}").as_str(), |b| {
            let map = filled_map::<K>(count);
            let keys = shuffled_keys::<K>(count);
            b.iter(|| {
                for k in keys.iter() {
                    black_box(map.get(k).unwrap());
                }
            });
        });

        c.bench_function(format!("sorted_map<{name}> random_remove {count}").as_str(), |b| {
            let map = filled_map::<K>(count);
            let keys = shuffled_keys::<K>(count);
            b.iter(|| {
                let map = map.clone();
                for k in keys.iter() {
                    map.remove(k).unwrap();
                }
            });
        });

        c.bench_function(format!("sorted_map<{name}> items {count}").as_str(), |b| {
            let map = filled_map::<K>(count);
            b.iter(|| {
                let items = map.items();
                assert_eq!(items.len(), map.len());
                items
            });
        });
    }
}

fn bench_btree<K: TestKey>(c: &mut Criterion) {
    let name = K::name();

    for count in COUNTS {
        c.bench_function(format!("btree<{name}> random_insert {count}").as_str(), |b| {
            let keys = shuffled_keys::<K>(count);
            b.iter(|| {
                let mut map = BTreeMap::new();
                for k in keys.iter() {
                    map.insert(k.clone(), Rc::new(Value::default()));
                }
                map
            });
        });

        c.bench_function(format!("btree<{name}> random_get {count}").as_str(), |b| {
            let map = (0..count)
                .map(|i| (K::from_i(i), Rc::new(Value::default())))
                .collect::<BTreeMap<_, _>>();
            let keys = shuffled_keys::<K>(count);
            b.iter(|| {
                for k in keys.iter() {
                    black_box(map.get(k).cloned());
                }
            });
        });

        c.bench_function(format!("btree<{name}> items {count}").as_str(), |b| {
            let map = (0..count)
                .map(|i| (K::from_i(i), Rc::new(Value::default())))
                .collect::<BTreeMap<_, _>>();
            b.iter(|| {
                map.iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect::<Vec<_>>()
            });
        });
    }
}

fn benchmark(c: &mut Criterion) {
    bench_sorted_map::<Point>(c);
    bench_sorted_map::<Rc<String>>(c);
    bench_btree::<Point>(c);
    bench_btree::<Rc<String>>(c);
}

criterion_group!(benches, benchmark);
criterion_main!(benches);

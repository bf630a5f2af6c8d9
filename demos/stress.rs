use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use std::rc::Rc;

use sorted_map::SortedMap;

const RAND_SEED: u64 = 123;
const COUNT: u64 = 100_000;

#[inline(never)]
fn create_map() -> SortedMap<u64, Rc<String>> {
    let map = SortedMap::new();

    let mut keys = (0..COUNT).collect::<Vec<_>>();
    keys.shuffle(&mut rand::thread_rng());

    for i in keys {
        map.insert(i, Rc::new(i.to_string()))
            .expect("u64 keys never fail to compare");
    }

    println!("{}", map.len());
    map
}

#[inline(never)]
fn delete_map(map: &SortedMap<u64, Rc<String>>) {
    let mut keys = map.keys();
    let mut r = StdRng::seed_from_u64(RAND_SEED);
    keys.shuffle(&mut r);

    for k in keys.iter() {
        map.remove(k).expect("key was just listed");
    }
    println!("{}", map.len());
    println!("{} bytes", map.footprint());
}

fn main() {
    let map = create_map();
    delete_map(&map);
}

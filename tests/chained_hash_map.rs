// ChainedHashMap public API test suite.
//
// Each test documents what behavior is being verified. The core invariants
// exercised:
// - Round-trip: get(k) returns the last value inserted for k.
// - Uniqueness: len() counts distinct keys, never a re-insert.
// - Growth: the insert that reaches the load factor doubles capacity and
//   every pair survives the move.
// - Absence: missing keys read as None, never as an error.
// - Absent-key rejection: the try_* family refuses None without side effects.
use chained_hashmap::{ChainedHashMap, InvalidArgument, MapConfig, MIN_LOAD_FACTOR};

// Test: the mixed insert/overwrite/remove scenario.
// Verifies: overwrite keeps len; removal makes the key absent.
#[test]
fn insert_overwrite_remove_scenario() {
    let mut m = ChainedHashMap::new();
    m.insert("a".to_string(), 1);
    m.insert("b".to_string(), 2);
    m.insert("a".to_string(), 3);

    assert_eq!(m.len(), 2);
    assert_eq!(m.get("a"), Some(&3));
    assert_eq!(m.get("b"), Some(&2));

    m.remove("b");
    assert_eq!(m.get("b"), None);
    assert_eq!(m.len(), 1);
}

// Test: resize transparency at the default threshold.
// Assumes: capacity 16, load factor 0.75, so the 12th insert triggers growth.
// Verifies: all 13 keys readable afterwards; capacity doubled once.
#[test]
fn thirteen_keys_survive_first_resize() {
    let mut m = ChainedHashMap::new();
    for i in 0..13 {
        m.insert(format!("key-{i}"), i);
        if i == 10 {
            assert_eq!(m.capacity(), 16, "no growth before the 12th insert");
        }
    }
    assert_eq!(m.capacity(), 32);
    assert_eq!(m.len(), 13);
    for i in 0..13 {
        assert_eq!(m.get(format!("key-{i}").as_str()), Some(&i));
    }
}

// Test: absent key rejection on insert.
// Verifies: InvalidArgument::AbsentKey and len unchanged.
#[test]
fn absent_key_insert_rejected() {
    let mut m: ChainedHashMap<String, &str> = ChainedHashMap::new();
    m.insert("present".to_string(), "x");

    let err = m.try_insert(None, "anything").unwrap_err();
    assert_eq!(err, InvalidArgument::AbsentKey);
    assert_eq!(err.to_string(), "key cannot be absent");
    assert_eq!(m.len(), 1);
}

// Test: missing keys are not errors.
// Verifies: get and remove on never-inserted and removed keys are None.
#[test]
fn missing_keys_read_as_none() {
    let mut m: ChainedHashMap<u64, u64> = ChainedHashMap::new();
    assert_eq!(m.get(&42), None);
    assert_eq!(m.remove(&42), None);
    assert_eq!(m.len(), 0);

    m.insert(42, 1);
    m.remove(&42);
    assert_eq!(m.get(&42), None);
    assert!(!m.contains_key(&42));
    assert_eq!(m.try_get(Some(&42)), Ok(None));
    assert_eq!(m.try_remove(Some(&42)), Ok(None));
}

// Test: growth over many doublings.
// Verifies: capacity stays a power of two, load factor holds, values intact.
#[test]
fn many_doublings_keep_every_value() {
    let mut m = ChainedHashMap::new();
    for i in 0..10_000u32 {
        m.insert(i, i.wrapping_mul(2_654_435_761));
        assert!(m.capacity().is_power_of_two());
        assert!((m.len() as f64 / m.capacity() as f64) < m.load_factor());
    }
    assert_eq!(m.len(), 10_000);
    assert_eq!(m.capacity(), 16_384);
    for i in 0..10_000u32 {
        assert_eq!(m.get(&i), Some(&i.wrapping_mul(2_654_435_761)));
    }
}

// Test: remove then reinsert the same key.
// Verifies: the new value is observed and len counts it once.
#[test]
fn remove_then_reinsert_same_key() {
    let mut m = ChainedHashMap::new();
    m.insert("k", 1);
    assert_eq!(m.remove("k"), Some(1));
    assert_eq!(m.insert("k", 2), None);
    assert_eq!(m.get("k"), Some(&2));
    assert_eq!(m.len(), 1);
}

// Test: configured construction.
// Verifies: capacity rounding and load-factor validation surface through the map.
#[test]
fn configured_construction() {
    let m: ChainedHashMap<u8, u8> =
        ChainedHashMap::with_config(MapConfig::new().initial_capacity(10).load_factor(0.5))
            .expect("valid config");
    assert_eq!(m.capacity(), 16);
    assert_eq!(m.load_factor(), 0.5);

    // A percentage instead of a fraction would never trigger growth.
    let err = ChainedHashMap::<u8, u8>::with_config(MapConfig::new().load_factor(75.0))
        .err()
        .expect("rejected");
    assert_eq!(err, InvalidArgument::LoadFactor(75.0));

    // Too small for one doubling to restore the ratio.
    let err = ChainedHashMap::<u8, u8>::with_config(MapConfig::new().load_factor(1e-300))
        .err()
        .expect("rejected");
    assert_eq!(err, InvalidArgument::LoadFactor(1e-300));

    let b: ChainedHashMap<u8, u8> = ChainedHashMap::with_buckets(10).expect("valid bucket count");
    assert_eq!(b.capacity(), 16);
}

// Test: smallest usable configuration under sustained inserts.
// Verifies: growth stays one doubling per threshold crossing and every key survives.
#[test]
fn minimum_load_factor_grows_by_single_doublings() {
    let cfg = MapConfig::new().initial_capacity(1).load_factor(MIN_LOAD_FACTOR);
    let mut m = ChainedHashMap::with_config(cfg).expect("valid config");
    for i in 0..1000u32 {
        let before = m.capacity();
        m.insert(i, i);
        assert!(m.capacity() <= before * 2, "capacity {} -> {}", before, m.capacity());
        assert!((m.len() as f64 / m.capacity() as f64) < m.load_factor());
    }
    assert!((0..1000u32).all(|i| m.get(&i) == Some(&i)));
}

// Test: collection trait plumbing.
// Verifies: FromIterator, Extend, owned IntoIterator and Debug agree with contents.
#[test]
fn collect_extend_and_drain() {
    let mut m: ChainedHashMap<&str, i32> = [("a", 1), ("b", 2)].into_iter().collect();
    m.extend([("b", 20), ("c", 3)]);
    assert_eq!(m.len(), 3);
    assert_eq!(m.get("b"), Some(&20));

    let mut pairs: Vec<(&str, i32)> = m.into_iter().collect();
    pairs.sort();
    assert_eq!(pairs, [("a", 1), ("b", 20), ("c", 3)]);
}

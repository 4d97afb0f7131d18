//! Property tests for the Bloom filter

use bloomfilter::domain::filter_size;
use bloomfilter::{BloomFilter, FALSE_POSITIVE_RATE};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_no_false_negatives(values in prop::collection::vec(".*", 1..200)) {
        let mut filter = BloomFilter::new(values.len()).unwrap();
        for value in &values {
            filter.add(value).unwrap();
        }
        for value in &values {
            prop_assert!(filter.might_contain(value));
        }
    }

    #[test]
    fn prop_add_is_idempotent(value in any::<Vec<u8>>(), repeats in 2usize..5) {
        let mut once = BloomFilter::new(64).unwrap();
        let mut many = BloomFilter::new(64).unwrap();

        once.add(&value).unwrap();
        for _ in 0..repeats {
            many.add(&value).unwrap();
        }

        prop_assert_eq!(once.bits_set(), many.bits_set());
        prop_assert_eq!(once.positions(&value).unwrap(), many.positions(&value).unwrap());
    }

    #[test]
    fn prop_bits_never_decrease(values in prop::collection::vec(any::<i64>(), 1..300)) {
        let mut filter = BloomFilter::new(100).unwrap();
        let mut previous = 0;
        for value in &values {
            filter.add(value).unwrap();
            let current = filter.bits_set();
            prop_assert!(current >= previous);
            previous = current;
        }
    }

    #[test]
    fn prop_positions_in_range(value in any::<String>(), capacity in 1usize..10_000) {
        let filter = BloomFilter::new(capacity).unwrap();
        for pos in filter.positions(&value).unwrap() {
            prop_assert!(pos < filter.size());
        }
    }

    #[test]
    fn prop_size_is_19_bits_per_item(capacity in 1usize..1_000_000) {
        let size = filter_size(capacity, FALSE_POSITIVE_RATE).unwrap();
        prop_assert_eq!(size, capacity * 19);
        prop_assert!(filter_size(capacity + 1, FALSE_POSITIVE_RATE).unwrap() >= size);
    }

    #[test]
    fn prop_union_keeps_members(
        left in prop::collection::vec(any::<u32>(), 0..50),
        right in prop::collection::vec(any::<u32>(), 0..50),
    ) {
        let mut a = BloomFilter::new(100).unwrap();
        let mut b = BloomFilter::new(100).unwrap();
        for v in &left { a.add(v).unwrap(); }
        for v in &right { b.add(v).unwrap(); }

        a.union(&b).unwrap();
        for v in left.iter().chain(right.iter()) {
            prop_assert!(a.might_contain(v));
        }
    }
}

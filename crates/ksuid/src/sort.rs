use crate::id::Ksuid;
use core::cmp::Ordering;

/// Compares two KSUIDs by their 20-byte binary form.
///
/// Unsigned lexicographic comparison, which by layout equals chronological
/// order with payload tie-breaking. Equivalent to `a.cmp(b)`; provided as a
/// free function for callers passing comparators around.
#[must_use]
pub fn compare(a: &Ksuid, b: &Ksuid) -> Ordering {
    a.cmp(b)
}

/// Sorts identifiers in place into chronological order.
///
/// Ties are fully-equal byte sequences, so an unstable in-place
/// partition-exchange sort is sufficient.
pub fn sort(ids: &mut [Ksuid]) {
    ids.sort_unstable();
}

/// Returns `true` iff every adjacent pair is in non-decreasing order.
#[must_use]
pub fn is_sorted(ids: &[Ksuid]) -> bool {
    ids.is_sorted()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::BYTE_LENGTH;
    use rand::RngCore;
    use std::collections::HashMap;

    fn random_ids(count: usize) -> Vec<Ksuid> {
        let mut rng = rand::rng();
        (0..count)
            .map(|_| {
                let mut bytes = [0_u8; BYTE_LENGTH];
                rng.fill_bytes(&mut bytes);
                Ksuid::from(bytes)
            })
            .collect()
    }

    #[test]
    fn compare_matches_string_comparison() {
        let ids = random_ids(32);
        for pair in ids.windows(2) {
            assert_eq!(
                compare(&pair[0], &pair[1]),
                pair[0].to_string().cmp(&pair[1].to_string())
            );
        }
        assert_eq!(compare(&ids[0], &ids[0]), core::cmp::Ordering::Equal);
    }

    #[test]
    fn sort_orders_and_preserves_the_multiset() {
        let original = random_ids(256);
        let mut sorted = original.clone();
        sort(&mut sorted);

        assert!(is_sorted(&sorted));

        let count = |ids: &[Ksuid]| {
            let mut counts: HashMap<Ksuid, usize> = HashMap::new();
            for &id in ids {
                *counts.entry(id).or_default() += 1;
            }
            counts
        };
        assert_eq!(count(&original), count(&sorted));
    }

    #[test]
    fn is_sorted_detects_out_of_order_pairs() {
        let a = Ksuid::NIL.next();
        let b = a.next();

        assert!(is_sorted(&[]));
        assert!(is_sorted(&[a]));
        assert!(is_sorted(&[a, a, b]));
        assert!(!is_sorted(&[b, a]));
    }

    #[test]
    fn chronological_order_is_byte_order() {
        use std::time::{Duration, UNIX_EPOCH};

        let earlier = Ksuid::from_parts(
            UNIX_EPOCH + Duration::from_secs(1_632_859_955),
            &[0xFF; 16],
        )
        .unwrap();
        let later = Ksuid::from_parts(
            UNIX_EPOCH + Duration::from_secs(1_632_859_956),
            &[0x00; 16],
        )
        .unwrap();

        assert_eq!(compare(&earlier, &later), core::cmp::Ordering::Less);
    }
}

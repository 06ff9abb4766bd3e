//! Property-based invariant tests for pointer capture.
//!
//! 1. At most one holder at any time.
//! 2. acquired == released once every guard is gone.
//! 3. Delivery goes only to the holder while held.

use pstrip_core::capture::{CaptureGuard, PointerCapture};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Acquire(usize),
    DropGuard(usize),
}

fn op_strategy(owners: usize) -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..owners).prop_map(Op::Acquire),
        (0..owners).prop_map(Op::DropGuard),
    ]
}

proptest! {
    #[test]
    fn single_holder_and_balanced_release(ops in proptest::collection::vec(op_strategy(4), 0..64)) {
        let capture = PointerCapture::new();
        let owners: Vec<_> = (0..4).map(|_| capture.register_owner()).collect();
        let mut guards: Vec<Option<CaptureGuard>> = (0..4).map(|_| None).collect();

        for op in ops {
            match op {
                Op::Acquire(i) => {
                    if let Some(guard) = capture.acquire(owners[i]) {
                        prop_assert!(guards.iter().all(Option::is_none));
                        guards[i] = Some(guard);
                    }
                }
                Op::DropGuard(i) => {
                    guards[i] = None;
                }
            }

            let live = guards.iter().filter(|g| g.is_some()).count();
            prop_assert!(live <= 1);
            prop_assert_eq!(capture.is_held(), live == 1);
            if let Some(i) = guards.iter().position(Option::is_some) {
                prop_assert_eq!(capture.holder(), Some(owners[i]));
                for (j, owner) in owners.iter().enumerate() {
                    prop_assert_eq!(capture.delivers_to(*owner, false), i == j);
                }
            }
        }

        guards.clear();
        let stats = capture.stats();
        prop_assert_eq!(stats.acquired, stats.released);
        prop_assert!(!capture.is_held());
    }
}

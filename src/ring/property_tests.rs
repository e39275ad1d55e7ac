//! Property-based tests for ring storage invariants.
//!
//! Every operation sequence is replayed against a `VecDeque` model; the ring
//! must agree with the model on contents, length and overflow behavior.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test ring::property_tests
//! ```

use std::collections::VecDeque;

use proptest::prelude::*;

use super::Ring;

#[derive(Debug, Clone)]
enum Op {
    PushBack(u16),
    PushFront(u16),
    PopFront,
    PopFrontN(usize),
    RotateLeft,
    RotateRight,
    Reallocate(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<u16>().prop_map(Op::PushBack),
        1 => any::<u16>().prop_map(Op::PushFront),
        3 => Just(Op::PopFront),
        1 => (0usize..6).prop_map(Op::PopFrontN),
        1 => Just(Op::RotateLeft),
        1 => Just(Op::RotateRight),
        1 => (1usize..12).prop_map(Op::Reallocate),
    ]
}

proptest! {
    /// Invariant: the ring behaves exactly like a bounded deque.
    #[test]
    fn ring_matches_bounded_deque(
        capacity in 1usize..10,
        ops in prop::collection::vec(op_strategy(), 0..200),
    ) {
        let mut ring = Ring::with_capacity(capacity);
        let mut model: VecDeque<u16> = VecDeque::new();
        let mut bound = capacity;

        for op in ops {
            match op {
                Op::PushBack(v) => {
                    let full = model.len() >= bound;
                    prop_assert_eq!(ring.push_back(v).is_err(), full);
                    if !full {
                        model.push_back(v);
                    }
                }
                Op::PushFront(v) => {
                    let full = model.len() >= bound;
                    prop_assert_eq!(ring.push_front(v).is_err(), full);
                    if !full {
                        model.push_front(v);
                    }
                }
                Op::PopFront => prop_assert_eq!(ring.pop_front(), model.pop_front()),
                Op::PopFrontN(n) => {
                    let take = n.min(model.len());
                    let expected: Vec<u16> = model.drain(..take).collect();
                    prop_assert_eq!(ring.pop_front_n(n), expected);
                }
                Op::RotateLeft => {
                    ring.rotate_left();
                    if model.len() > 1 {
                        model.rotate_left(1);
                    }
                }
                Op::RotateRight => {
                    ring.rotate_right();
                    if model.len() > 1 {
                        model.rotate_right(1);
                    }
                }
                Op::Reallocate(new_capacity) => {
                    let excess = model.len().saturating_sub(new_capacity);
                    let expected: Vec<u16> = model.drain(..excess).collect();
                    prop_assert_eq!(ring.reallocate(new_capacity), expected);
                    bound = new_capacity;
                }
            }

            prop_assert_eq!(ring.len(), model.len());
            prop_assert_eq!(ring.capacity(), bound);
            prop_assert_eq!(ring.front(), model.front());
            let contents: Vec<u16> = ring.iter().copied().collect();
            let expected: Vec<u16> = model.iter().copied().collect();
            prop_assert_eq!(contents, expected);
        }
    }
}

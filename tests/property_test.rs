/*!
 * Property Tests
 * Queue behavior checked against a VecDeque model
 */

use concurrent_fifo::{ConcurrentFifoQueue, QueueError};
use proptest::prelude::*;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
enum Op {
    Enqueue(i32),
    Dequeue,
    Get(usize),
    Remove(usize),
    Lock,
    Unlock,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<i32>().prop_map(Op::Enqueue),
        2 => Just(Op::Dequeue),
        1 => (0usize..16).prop_map(Op::Get),
        1 => (0usize..16).prop_map(Op::Remove),
        1 => Just(Op::Lock),
        1 => Just(Op::Unlock),
    ]
}

proptest! {
    #[test]
    fn prop_fifo_order(values in proptest::collection::vec(any::<i64>(), 0..64)) {
        let queue = ConcurrentFifoQueue::new();
        for v in &values {
            queue.enqueue(*v).unwrap();
        }

        let mut drained = Vec::with_capacity(values.len());
        while let Ok(v) = queue.dequeue() {
            drained.push(v);
        }
        prop_assert_eq!(drained, values);
    }

    #[test]
    fn prop_matches_model(ops in proptest::collection::vec(op_strategy(), 0..128)) {
        let queue = ConcurrentFifoQueue::new();
        let mut model: VecDeque<i32> = VecDeque::new();
        let mut locked = false;

        for op in ops {
            match op {
                Op::Enqueue(v) => {
                    let result = queue.enqueue(v);
                    if locked {
                        prop_assert_eq!(result, Err(QueueError::Locked));
                    } else {
                        prop_assert_eq!(result, Ok(()));
                        model.push_back(v);
                    }
                }
                Op::Dequeue => {
                    let expected = if locked {
                        Err(QueueError::Locked)
                    } else {
                        model.pop_front().ok_or(QueueError::Empty)
                    };
                    prop_assert_eq!(queue.dequeue(), expected);
                }
                Op::Get(index) => {
                    let expected = if locked {
                        Err(QueueError::Locked)
                    } else {
                        model.get(index).copied().ok_or(QueueError::IndexOutOfBounds {
                            index,
                            len: model.len(),
                        })
                    };
                    prop_assert_eq!(queue.get(index), expected);
                }
                Op::Remove(index) => {
                    let expected = if locked {
                        Err(QueueError::Locked)
                    } else {
                        let len = model.len();
                        model
                            .remove(index)
                            .map(|_| ())
                            .ok_or(QueueError::IndexOutOfBounds { index, len })
                    };
                    prop_assert_eq!(queue.remove(index), expected);
                }
                Op::Lock => {
                    queue.lock();
                    locked = true;
                }
                Op::Unlock => {
                    queue.unlock();
                    locked = false;
                }
            }

            prop_assert_eq!(queue.len(), model.len());
            prop_assert_eq!(queue.is_locked(), locked);
        }

        let stats = queue.stats();
        prop_assert_eq!(stats.resident(), model.len() as u64);
    }
}

use proptest::prelude::*;
use rolling_buffer::{RollingBuffer, RollingBufferError};

/// Bounded LIFO reference: a plain stack that forgets its bottom item when it grows past `cap`.
struct Model {
    cap: usize,
    // oldest first
    items: Vec<i32>,
}

impl Model {
    fn new(cap: usize) -> Self {
        Self {
            cap,
            items: Vec::new(),
        }
    }

    fn push(&mut self, item: i32) {
        self.items.push(item);
        if self.items.len() > self.cap {
            self.items.remove(0);
        }
    }

    fn pop(&mut self) -> Option<i32> {
        self.items.pop()
    }

    fn newest_first(&self) -> Vec<i32> {
        self.items.iter().rev().copied().collect()
    }
}

#[derive(Debug, Clone)]
enum Op {
    Push(i32),
    Pop,
    Peek,
    Get(u8),
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<i32>().prop_map(Op::Push),
        2 => Just(Op::Pop),
        1 => Just(Op::Peek),
        1 => any::<u8>().prop_map(Op::Get),
        1 => Just(Op::Clear),
    ]
}

#[test]
fn interleaved_push_pop_matches_model() {
    const CAP: usize = 4;

    let mut buf = RollingBuffer::new(CAP).unwrap();
    let mut model = Model::new(CAP);

    for i in 0..CAP as i32 + 2 {
        buf.push(i);
        model.push(i);
    }
    for _ in 0..3 {
        assert_eq!(buf.pop().ok(), model.pop());
    }
    for i in 100..103 {
        buf.push(i);
        model.push(i);
    }

    assert_eq!(buf.to_vec(), model.newest_first());
    assert_eq!(buf, [102, 101, 100, 2]);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_len_is_bounded_by_capacity(cap in 1usize..32, pushes in 0usize..128) {
        let mut buf = RollingBuffer::new(cap).unwrap();
        buf.extend(0..pushes);
        prop_assert_eq!(buf.len(), pushes.min(cap));
        prop_assert_eq!(buf.capacity(), cap);
    }

    #[test]
    fn prop_keeps_last_pushes_newest_first(
        cap in 1usize..16,
        items in prop::collection::vec(any::<i32>(), 0..64),
    ) {
        let mut buf = RollingBuffer::new(cap).unwrap();
        buf.extend(items.iter().copied());

        let expected: Vec<i32> = items.iter().rev().take(cap).copied().collect();
        prop_assert_eq!(buf.to_vec(), expected.clone());
        for (i, item) in expected.iter().enumerate() {
            prop_assert_eq!(buf.get(i), Ok(item));
        }
        prop_assert_eq!(
            buf.get(expected.len()),
            Err(RollingBufferError::IndexOutOfRange { index: expected.len(), len: expected.len() })
        );
    }

    #[test]
    fn prop_pop_drains_in_iteration_order(
        cap in 1usize..16,
        items in prop::collection::vec(any::<i32>(), 0..64),
    ) {
        let mut buf = RollingBuffer::new(cap).unwrap();
        buf.extend(items);

        let iterated = buf.to_vec();
        let mut popped = Vec::new();
        while let Some(item) = buf.try_pop() {
            popped.push(item);
        }
        prop_assert_eq!(popped, iterated);
        prop_assert!(buf.is_empty());
        prop_assert_eq!(buf.pop(), Err(RollingBufferError::EmptyContainer));
        prop_assert_eq!(buf.peek(), Err(RollingBufferError::EmptyContainer));
    }

    #[test]
    fn prop_sequence_matches_model(
        cap in 1usize..8,
        ops in prop::collection::vec(op(), 1..200),
    ) {
        let mut buf = RollingBuffer::new(cap).unwrap();
        let mut model = Model::new(cap);

        for op in ops {
            match op {
                Op::Push(item) => {
                    buf.push(item);
                    model.push(item);
                }
                Op::Pop => prop_assert_eq!(buf.try_pop(), model.pop()),
                Op::Peek => prop_assert_eq!(buf.try_peek(), model.items.last()),
                Op::Get(index) => {
                    let index = usize::from(index) % (cap + 1);
                    let expected = model.newest_first().get(index).copied();
                    prop_assert_eq!(buf.get(index).ok().copied(), expected);
                }
                Op::Clear => {
                    buf.clear();
                    model.items.clear();
                }
            }

            prop_assert_eq!(buf.len(), model.items.len());
            prop_assert!(buf.iter().eq(model.items.iter().rev()));
            prop_assert!(buf.iter().rev().eq(model.items.iter()));
        }
    }
}

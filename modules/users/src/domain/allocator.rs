use crate::contract::model::UserId;

/// Hands out strictly increasing user ids starting at 1.
///
/// The counter only moves backwards through [`IdAllocator::reset`]; removing a
/// user never returns its id to the pool.
#[derive(Debug, Default)]
pub struct IdAllocator {
    last: UserId,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self) -> UserId {
        self.last += 1;
        self.last
    }

    pub fn reset(&mut self) {
        self.last = 0;
    }
}

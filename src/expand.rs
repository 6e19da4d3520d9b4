//! Combinatorial expansion: lazy Cartesian product over argument dimensions.
//!
//! ```text
//! dims = [[a, b], [1, 2, 3]]
//!
//! indices  [0,0] [0,1] [0,2] [1,0] [1,1] [1,2]
//! combo    a 1   a 2   a 3   b 1   b 2   b 3
//! ```
//!
//! The last dimension varies fastest (odometer order). The iterator holds one
//! index per dimension and never materialises the product. It is generic over
//! the element type and knows nothing about placeholders.

/// Number of combos: the product of dimension lengths. An empty list of
/// dimensions has exactly one (empty) combo.
///
/// Saturates at `u64::MAX`; the validator rejects entries where that matters.
pub fn combo_count<T>(dims: &[Vec<T>]) -> u64 {
    checked_combo_count(dims).unwrap_or(u64::MAX)
}

pub fn checked_combo_count<T>(dims: &[Vec<T>]) -> Option<u64> {
    dims.iter()
        .try_fold(1u64, |acc, d| acc.checked_mul(d.len() as u64))
}

/// Odometer iterator over `dims`, yielding one borrowed value per dimension.
#[derive(Debug, Clone)]
pub struct Combinations<'a, T> {
    dims: &'a [Vec<T>],
    indices: Vec<usize>,
    done: bool,
}

impl<'a, T> Combinations<'a, T> {
    pub fn new(dims: &'a [Vec<T>]) -> Self {
        Self {
            dims,
            indices: vec![0; dims.len()],
            done: dims.iter().any(Vec::is_empty),
        }
    }

    /// Rewind to the first combo.
    pub fn restart(&mut self) {
        self.indices.iter_mut().for_each(|i| *i = 0);
        self.done = self.dims.iter().any(Vec::is_empty);
    }

    /// Advance the odometer; returns false once every dimension has wrapped.
    fn advance(&mut self) -> bool {
        for (pos, idx) in self.indices.iter_mut().enumerate().rev() {
            *idx += 1;
            if *idx < self.dims[pos].len() {
                return true;
            }
            *idx = 0;
        }
        false
    }
}

impl<'a, T> Iterator for Combinations<'a, T> {
    type Item = Vec<&'a T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let combo = self
            .indices
            .iter()
            .zip(self.dims)
            .map(|(&i, dim)| &dim[i])
            .collect();
        if !self.advance() {
            self.done = true;
        }
        Some(combo)
    }
}

//! The one randomness source every "pick one of N" decision routes through.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

pub trait Picker: Send {
    /// Uniformly pick an index in `0..n`. `n` is never zero.
    fn pick(&mut self, n: usize) -> usize;

    /// Fair coin, true on heads
    fn coin(&mut self) -> bool {
        self.pick(2) == 0
    }
}

/// Pick one element of a non-empty slice
pub fn choose<'a, T>(picker: &mut dyn Picker, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(picker.pick(items.len()))
}

/// `StdRng`-backed picker, seeded for reproducible sessions or from the OS.
#[derive(Debug)]
pub struct RngPicker {
    rng: StdRng,
}

impl RngPicker {
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_os_rng() }
    }
}

impl Picker for RngPicker {
    fn pick(&mut self, n: usize) -> usize {
        self.rng.random_range(0..n.max(1))
    }
}

/// Replays a fixed script of choices (each taken modulo `n`), then keeps
/// answering 0. Handy for driving the controller deterministically.
#[derive(Debug, Default)]
pub struct SequencePicker {
    script: VecDeque<usize>,
}

impl SequencePicker {
    pub fn new(script: impl IntoIterator<Item = usize>) -> Self {
        Self { script: script.into_iter().collect() }
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Picker for SequencePicker {
    fn pick(&mut self, n: usize) -> usize {
        self.script.pop_front().unwrap_or(0) % n.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_pickers_agree() {
        let mut a = RngPicker::seeded(42);
        let mut b = RngPicker::seeded(42);
        let xs: Vec<usize> = (0..32).map(|_| a.pick(6)).collect();
        let ys: Vec<usize> = (0..32).map(|_| b.pick(6)).collect();
        assert_eq!(xs, ys);
        assert!(xs.iter().all(|&x| x < 6));
    }

    #[test]
    fn test_single_choice_is_always_zero() {
        let mut picker = RngPicker::from_entropy();
        for _ in 0..16 {
            assert_eq!(picker.pick(1), 0);
        }
    }

    #[test]
    fn test_sequence_picker_replays_then_defaults() {
        let mut picker = SequencePicker::new([1, 7, 2]);
        assert_eq!(picker.pick(3), 1);
        assert_eq!(picker.pick(3), 1); // 7 % 3
        assert!(picker.coin()); // 2 % 2 == 0
        assert_eq!(picker.remaining(), 0);
        assert_eq!(picker.pick(5), 0);
    }

    #[test]
    fn test_choose() {
        let mut picker = SequencePicker::new([2]);
        assert_eq!(choose(&mut picker, &["a", "b", "c"]), Some(&"c"));
        let empty: [u8; 0] = [];
        assert_eq!(choose(&mut picker, &empty), None);
    }
}

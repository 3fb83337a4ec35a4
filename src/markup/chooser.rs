use rand::Rng;

/// Source of the randomized defaults used for unmarked text.
pub trait Chooser {
    /// Pick an index uniformly from `0..len`. Callers never pass `len == 0`.
    fn choose(&mut self, len: usize) -> usize;
}

/// Pick one item from a non-empty slice.
///
/// Out-of-range answers from a chooser wrap around instead of panicking.
pub(crate) fn pick<'a, T, C: Chooser + ?Sized>(items: &'a [T], chooser: &mut C) -> &'a T {
    &items[chooser.choose(items.len()) % items.len()]
}

/// Draws from the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadChooser;

impl Chooser for ThreadChooser {
    fn choose(&mut self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

/// Draws from a caller-supplied RNG, e.g. a seeded `StdRng` for reproducible output.
#[derive(Debug, Clone)]
pub struct RngChooser<R>(pub R);

impl<R: Rng> Chooser for RngChooser<R> {
    fn choose(&mut self, len: usize) -> usize {
        self.0.random_range(0..len)
    }
}

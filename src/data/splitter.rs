// ============================================================
// Layer 4 — Seeded Shuffle and Split
// ============================================================
// Shuffles the loaded training examples with a FIXED seed and
// cuts them into a training partition and a dev partition:
//
//   loaded train dir  ──shuffle(seed)──▶  [0 .. 200) → train
//                                          [200 .. 250) → dev
//
// The test partition comes from its own directory and is
// shuffled with the same seed but never split.
//
// Why a fixed seed?
//   Every run (and every model compared) must see exactly the
//   same 200/50 examples, otherwise accuracy differences could
//   come from the data draw rather than from the model.
//
// Uses Fisher-Yates shuffle via rand::seq::SliceRandom driven by
// a StdRng seeded from a u64.
//
// Reference: rand crate documentation

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Shuffle `items` in a reproducible order determined by `seed`.
pub fn shuffle_seeded<T>(mut items: Vec<T>, seed: u64) -> Vec<T> {
    let mut rng = StdRng::seed_from_u64(seed);
    items.shuffle(&mut rng);
    items
}

/// Take the first `train_size` items as training data and the next
/// `dev_size` as dev data. Anything past that is dropped.
///
/// Both sizes are clamped to what is available, so a short dataset
/// yields a short (possibly empty) dev set rather than a panic.
pub fn split_at_sizes<T>(mut items: Vec<T>, train_size: usize, dev_size: usize) -> (Vec<T>, Vec<T>) {
    let total = items.len();
    let train_end = train_size.min(total);
    let dev_end = train_end.saturating_add(dev_size).min(total);

    items.truncate(dev_end);
    // After this: items = [0..train_end], dev = [train_end..dev_end]
    let dev = items.split_off(train_end);

    tracing::debug!(
        "Dataset split: {} train, {} dev, {} unused",
        items.len(),
        dev.len(),
        total - dev_end,
    );

    (items, dev)
}

//! Bulk generation of mock ledger records and radar signals

use glam::Vec2;
use rand::Rng;

use super::{BlockRecord, Signal, SignalKind};

/// Spacing between consecutive record timestamps
const RECORD_SPACING_MS: f64 = 1000.0;
/// Signals are stamped within this much of `now`
const SIGNAL_AGE_SPREAD_MS: f64 = 10_000.0;

/// Synthesize `record_count` ledger records and `signal_count` signals
///
/// Records step back from `now_ms` in exact 1-second increments, so they
/// come out strictly descending. Signals get uniform attributes and are
/// sorted newest-first to match.
pub fn generate_batch(
    rng: &mut impl Rng,
    now_ms: f64,
    record_count: usize,
    signal_count: usize,
) -> (Vec<BlockRecord>, Vec<Signal>) {
    let mut records = Vec::with_capacity(record_count);
    for i in 0..record_count {
        records.push(BlockRecord {
            id: rng.random(),
            timestamp_ms: now_ms - i as f64 * RECORD_SPACING_MS,
            tx_count: rng.random_range(5..55),
            size_bytes: rng.random_range(10_000..510_000),
            fee_sol: rng.random_range(0.0..0.01),
        });
    }

    let mut signals = Vec::with_capacity(signal_count);
    for _ in 0..signal_count {
        signals.push(Signal {
            id: rng.random(),
            pos: Vec2::new(
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
            ),
            strength: rng.random(),
            kind: random_kind(rng),
            timestamp_ms: now_ms - rng.random_range(0.0..SIGNAL_AGE_SPREAD_MS),
        });
    }
    signals.sort_by(|a, b| b.timestamp_ms.total_cmp(&a.timestamp_ms));

    (records, signals)
}

fn random_kind(rng: &mut impl Rng) -> SignalKind {
    match rng.random_range(0..3u8) {
        0 => SignalKind::Transaction,
        1 => SignalKind::Block,
        _ => SignalKind::Validator,
    }
}

//! Signal feed simulator and mock ledger
//!
//! Runs on its own coarse timer, decoupled from the frame loop, and shares
//! no state with the minigame simulation. All data is synthesized from a
//! seeded RNG; nothing here talks to a real chain.

pub mod mock;

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

pub use mock::generate_batch;

/// Signals the feed distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalKind {
    Transaction,
    Block,
    Validator,
}

/// A synthesized radar signal; immutable once created
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Signal {
    pub id: u64,
    /// Normalized position, both axes in [-1, 1]
    pub pos: Vec2,
    /// Relative intensity in [0, 1]
    pub strength: f32,
    pub kind: SignalKind,
    pub timestamp_ms: f64,
}

/// A synthesized ledger block entry (unrelated to the minigame blocks)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockRecord {
    pub id: u64,
    pub timestamp_ms: f64,
    pub tx_count: u32,
    pub size_bytes: u32,
    pub fee_sol: f64,
}

/// Which signal kinds the radar renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SignalFilter {
    #[default]
    All,
    Transaction,
    Block,
    Validator,
}

impl SignalFilter {
    pub fn matches(self, kind: SignalKind) -> bool {
        match self {
            SignalFilter::All => true,
            SignalFilter::Transaction => kind == SignalKind::Transaction,
            SignalFilter::Block => kind == SignalKind::Block,
            SignalFilter::Validator => kind == SignalKind::Validator,
        }
    }
}

/// Maximum signals retained in the feed
pub const FEED_CAPACITY: usize = 30;

/// How far apart (ms) a signal and a record may be and still match
pub const RECORD_MATCH_WINDOW_MS: f64 = 2000.0;

/// Bounded buffer of recent signals, oldest-by-arrival evicted first
#[derive(Debug, Clone, Default)]
pub struct SignalFeed {
    signals: VecDeque<Signal>,
}

impl SignalFeed {
    pub fn new() -> Self {
        Self {
            signals: VecDeque::with_capacity(FEED_CAPACITY),
        }
    }

    /// Append a batch, then evict the oldest entries beyond capacity
    pub fn append(&mut self, batch: impl IntoIterator<Item = Signal>) {
        for signal in batch {
            self.signals.push_back(signal);
        }
        while self.signals.len() > FEED_CAPACITY {
            self.signals.pop_front();
        }
    }

    /// All retained signals, arrival order
    pub fn iter(&self) -> impl Iterator<Item = &Signal> {
        self.signals.iter()
    }

    /// The rendered subset; does not mutate the feed
    pub fn filtered(&self, filter: SignalFilter) -> impl Iterator<Item = &Signal> {
        self.signals.iter().filter(move |s| filter.matches(s.kind))
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }
}

/// Map a normalized signal position into the circular display area
#[inline]
pub fn project(normalized: Vec2, center: Vec2) -> Vec2 {
    center + normalized * center * RADAR_SPREAD
}

/// First record whose timestamp lies within the match window of the signal
///
/// Records are sorted newest-first, so when several fall inside the window
/// the most recent one wins; that tie-break is deliberate and relied on by
/// the selection UI.
pub fn record_for<'a>(records: &'a [BlockRecord], signal: &Signal) -> Option<&'a BlockRecord> {
    records
        .iter()
        .find(|r| (r.timestamp_ms - signal.timestamp_ms).abs() < RECORD_MATCH_WINDOW_MS)
}

/// Records synthesized on startup
pub const INITIAL_RECORD_COUNT: usize = 20;
/// Signals appended per refresh
pub const REFRESH_SIGNAL_COUNT: usize = 3;

/// The radar's owning simulator: ledger records, signal feed, seeded RNG
#[derive(Debug, Clone)]
pub struct Navigator {
    records: Vec<BlockRecord>,
    feed: SignalFeed,
    rng: Pcg32,
}

impl Navigator {
    /// Seed the navigator with an initial ledger and a full feed
    pub fn new(seed: u64, now_ms: f64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let (records, signals) =
            generate_batch(&mut rng, now_ms, INITIAL_RECORD_COUNT, FEED_CAPACITY);
        let mut feed = SignalFeed::new();
        feed.append(signals);
        log::info!(
            "radar seeded: {} records, {} signals",
            records.len(),
            feed.len()
        );
        Self { records, feed, rng }
    }

    /// Periodic refresh: append a small batch of fresh signals
    pub fn refresh(&mut self, now_ms: f64) {
        let (_, signals) = generate_batch(&mut self.rng, now_ms, 0, REFRESH_SIGNAL_COUNT);
        self.feed.append(signals);
    }

    pub fn records(&self) -> &[BlockRecord] {
        &self.records
    }

    pub fn feed(&self) -> &SignalFeed {
        &self.feed
    }

    /// Ledger record matched to the given signal, if any
    pub fn record_for(&self, signal: &Signal) -> Option<&BlockRecord> {
        record_for(&self.records, signal)
    }

    /// Pointer-selection: the nearest rendered signal dot covering `point`
    pub fn signal_at(&self, point: Vec2, center: Vec2, filter: SignalFilter) -> Option<&Signal> {
        self.feed
            .filtered(filter)
            .map(|s| (s, project(s.pos, center).distance_squared(point)))
            .filter(|(_, d2)| *d2 <= SIGNAL_DOT_RADIUS * SIGNAL_DOT_RADIUS)
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(s, _)| s)
    }

    /// Pointer-selection straight to the matched ledger record
    pub fn select_at(&self, point: Vec2, center: Vec2, filter: SignalFilter) -> Option<&BlockRecord> {
        self.signal_at(point, center, filter)
            .and_then(|s| self.record_for(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signal(id: u64, kind: SignalKind, timestamp_ms: f64) -> Signal {
        Signal {
            id,
            pos: Vec2::ZERO,
            strength: 0.5,
            kind,
            timestamp_ms,
        }
    }

    #[test]
    fn test_feed_capacity_fifo() {
        let mut feed = SignalFeed::new();
        feed.append((0..40).map(|i| signal(i, SignalKind::Transaction, i as f64)));

        assert_eq!(feed.len(), FEED_CAPACITY);
        // Oldest-by-arrival evicted first: ids 0..10 are gone
        let ids: Vec<u64> = feed.iter().map(|s| s.id).collect();
        assert_eq!(ids.first(), Some(&10));
        assert_eq!(ids.last(), Some(&39));
    }

    #[test]
    fn test_feed_repeated_appends_stay_bounded() {
        let mut feed = SignalFeed::new();
        for batch in 0..100u64 {
            feed.append((0..3).map(|i| signal(batch * 3 + i, SignalKind::Block, 0.0)));
            assert!(feed.len() <= FEED_CAPACITY);
        }
        assert_eq!(feed.len(), FEED_CAPACITY);
    }

    #[test]
    fn test_filtered_does_not_mutate() {
        let mut feed = SignalFeed::new();
        feed.append([
            signal(1, SignalKind::Transaction, 0.0),
            signal(2, SignalKind::Block, 1.0),
            signal(3, SignalKind::Validator, 2.0),
        ]);

        let blocks: Vec<&Signal> = feed.filtered(SignalFilter::Block).collect();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].id, 2);
        assert_eq!(feed.len(), 3);

        let all: Vec<&Signal> = feed.filtered(SignalFilter::All).collect();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_project_formula() {
        let center = Vec2::splat(200.0);
        assert_eq!(project(Vec2::ZERO, center), center);
        assert_eq!(project(Vec2::new(1.0, 0.0), center), Vec2::new(360.0, 200.0));
        assert_eq!(project(Vec2::new(0.0, -1.0), center), Vec2::new(200.0, 40.0));
    }

    #[test]
    fn test_record_for_window() {
        let records = vec![
            BlockRecord {
                id: 1,
                timestamp_ms: 10_000.0,
                tx_count: 10,
                size_bytes: 20_000,
                fee_sol: 0.001,
            },
            BlockRecord {
                id: 2,
                timestamp_ms: 5_000.0,
                tx_count: 10,
                size_bytes: 20_000,
                fee_sol: 0.001,
            },
        ];

        // Inside the window of the newer record
        let s = signal(9, SignalKind::Block, 9_000.0);
        assert_eq!(record_for(&records, &s).map(|r| r.id), Some(1));

        // Only the older record is close enough
        let s = signal(9, SignalKind::Block, 6_500.0);
        assert_eq!(record_for(&records, &s).map(|r| r.id), Some(2));

        // Exactly at the window edge does not match (strict less-than)
        let s = signal(9, SignalKind::Block, 3_000.0);
        assert!(record_for(&records, &s).is_none());

        // Nowhere near either record
        let s = signal(9, SignalKind::Block, 100_000.0);
        assert!(record_for(&records, &s).is_none());
    }

    #[test]
    fn test_record_tie_break_newest_first() {
        let records = vec![
            BlockRecord {
                id: 1,
                timestamp_ms: 10_500.0,
                tx_count: 10,
                size_bytes: 20_000,
                fee_sol: 0.001,
            },
            BlockRecord {
                id: 2,
                timestamp_ms: 9_500.0,
                tx_count: 10,
                size_bytes: 20_000,
                fee_sol: 0.001,
            },
        ];

        // Both records fall inside the window; the newer one wins
        let s = signal(9, SignalKind::Block, 10_000.0);
        assert_eq!(record_for(&records, &s).map(|r| r.id), Some(1));
    }

    #[test]
    fn test_navigator_seed_and_refresh() {
        let mut nav = Navigator::new(42, 1_000_000.0);
        assert_eq!(nav.records().len(), INITIAL_RECORD_COUNT);
        assert_eq!(nav.feed().len(), FEED_CAPACITY);

        let before: Vec<u64> = nav.feed().iter().map(|s| s.id).collect();
        nav.refresh(1_003_000.0);
        assert_eq!(nav.feed().len(), FEED_CAPACITY);
        let after: Vec<u64> = nav.feed().iter().map(|s| s.id).collect();
        // Three newest arrived, three oldest left
        assert_eq!(after[FEED_CAPACITY - REFRESH_SIGNAL_COUNT..].len(), 3);
        assert_eq!(&after[..FEED_CAPACITY - 3], &before[3..]);
    }

    #[test]
    fn test_signal_at_hit_and_miss() {
        let nav = Navigator::new(7, 1_000_000.0);
        let center = Vec2::splat(RADAR_SIZE / 2.0);

        let target = *nav.feed().iter().next().unwrap();
        let dot = project(target.pos, center);

        let hit = nav.signal_at(dot, center, SignalFilter::All);
        assert!(hit.is_some());

        // A filter that excludes the target's kind must not select it
        let excluding = match target.kind {
            SignalKind::Transaction => SignalFilter::Block,
            _ => SignalFilter::Transaction,
        };
        if let Some(s) = nav.signal_at(dot, center, excluding) {
            assert!(excluding.matches(s.kind));
        }

        // Way outside the spread radius nothing is rendered
        assert!(nav.signal_at(Vec2::new(-50.0, -50.0), center, SignalFilter::All).is_none());
    }
}

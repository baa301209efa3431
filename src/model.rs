//! Adaptive probability model for the 10-bit neural signal.
//!
//! Neural voltage traces hover around a slowly drifting baseline with
//! episodes of higher volatility. Rather than adapting per-symbol counts,
//! the model tracks two online statistics, an exponential moving mean and a
//! GARCH(1,1) volatility estimate, and uses them to steer a fixed family of
//! distributions:
//!
//! - Four cumulative frequency tables are precomputed at construction, each
//!   a discretized blend of a normal CDF with a uniform floor and a
//!   mass step at the center. Wider tables serve higher-volatility regimes.
//! - The running volatility selects the active table; the running mean
//!   rotates the symbol alphabet so the table's center lines up with the
//!   signal's baseline. No table is ever rebuilt.
//! - A small outlier filter freezes the statistics while a short burst of
//!   extreme samples passes through, so a single spike does not blow up the
//!   volatility estimate. If the extremes persist, they are accepted as a
//!   level shift.

use crate::coder::Model;

/// Alphabet size: 1024 ten-bit sample symbols plus the stop symbol.
pub const NUM_SYMBOLS: u16 = 1025;
/// Reserved symbol marking end-of-stream.
pub const STOP_SYMBOL: u16 = NUM_SYMBOLS - 1;
/// Top of the 15-bit cumulative frequency scale.
pub const MAX_FREQUENCY: u16 = 0x7FFF;

/// Number of precomputed conditional distributions.
const NUM_DIST: usize = 4;

/// Center of the symbol alphabet; all distributions are located here and
/// the alphabet rotation keeps the running mean mapped onto it.
const CENTER: f64 = 511.0;

/// Volatility thresholds selecting between the distributions.
const STD_LEVELS: [f64; NUM_DIST] = [16.0, 18.0, 20.0, 22.0];
/// Normal-CDF scale of each distribution.
const CDF_SCALE: [f64; NUM_DIST] = [5.145, 6.035, 8.547, 20.05];
/// Uniform floor weight of each distribution.
const CDF_W: [f64; NUM_DIST] = [2.5e-4; NUM_DIST];
/// Center mass step of each distribution, spread over the alphabet.
const CDF_Z: [f64; NUM_DIST] = [106.3, 82.84, 62.87, 61.86];

/// Smoothing factor of the exponential moving mean.
const MEAN_SMOOTHING: f64 = 0.20;
/// Long-term variance level the GARCH recurrence reverts to.
const LONG_TERM_VARIANCE: f64 = 7.5;
/// GARCH persistence weight on the previous variance.
const GARCH_ALPHA: f64 = 0.725;
/// GARCH weight on the latest squared deviation.
const GARCH_BETA: f64 = 0.175;
/// Constant term of the GARCH recurrence.
const GARCH_OMEGA: f64 = LONG_TERM_VARIANCE * (1.0 - GARCH_ALPHA - GARCH_BETA);
/// Deviations beyond this many standard deviations count as outliers.
const OUTLIER_LEVEL: f64 = 8.4;
/// Weight of the latest sample when centering the alphabet rotation.
const MEAN_REVERSION: f64 = 0.05;
/// Consecutive outliers tolerated before the filter yields to a level shift.
const MAX_OUTLIER_RUN: u16 = 3;

fn normal_cdf(x: f64, loc: f64, scale: f64) -> f64 {
    let standardized = (x - loc) / scale;
    0.5 * (1.0 + libm::erf(standardized / std::f64::consts::SQRT_2))
}

/// Normal CDF blended with a uniform floor `w` and a step of mass `z` at the
/// center.
fn blended_cdf(x: f64, loc: f64, scale: f64, w: f64, z: f64) -> f64 {
    let mut p = (1.0 - w - z) * normal_cdf(x, loc, scale) + w;
    if x >= loc {
        p += z;
    }
    p
}

/// Adaptive model over the 10-bit symbol alphabet.
///
/// Construction precomputes the distribution bank; afterwards the tables are
/// immutable and only the scalar state evolves.
pub struct SignalModel {
    ccft: [[u16; NUM_SYMBOLS as usize + 1]; NUM_DIST],
    active_dist: usize,
    active_symbol_shift: i16,
    mean: f64,
    stdev: f64,
    outlier_counter: u16,
}

impl SignalModel {
    /// Create a model in its initial state, building the distribution bank.
    pub fn new() -> Self {
        let mut ccft = [[0u16; NUM_SYMBOLS as usize + 1]; NUM_DIST];

        for (i, table) in ccft.iter_mut().enumerate() {
            let z = CDF_Z[i] / f64::from(NUM_SYMBOLS);
            let max_p = blended_cdf(f64::from(NUM_SYMBOLS), CENTER, CDF_SCALE[i], CDF_W[i], z);

            for j in 1..NUM_SYMBOLS as usize {
                let p = blended_cdf(j as f64, CENTER, CDF_SCALE[i], CDF_W[i], z);
                // The `+ j` keeps the table strictly increasing: every
                // symbol owns at least one frequency unit.
                table[j] = (p / max_p * f64::from(MAX_FREQUENCY - NUM_SYMBOLS)) as u16 + j as u16;
            }
            table[0] = 0;
            table[NUM_SYMBOLS as usize] = MAX_FREQUENCY;
        }

        Self {
            ccft,
            active_dist: 0,
            active_symbol_shift: 0,
            mean: 511.0,
            stdev: 8.0,
            outlier_counter: 0,
        }
    }

    /// Exponential moving mean of the symbol stream.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Current volatility estimate.
    pub fn stdev(&self) -> f64 {
        self.stdev
    }

    /// Index of the distribution currently in use.
    pub fn active_dist(&self) -> usize {
        self.active_dist
    }

    /// Current rotation of the symbol alphabet.
    pub fn symbol_shift(&self) -> i16 {
        self.active_symbol_shift
    }
}

impl Default for SignalModel {
    fn default() -> Self {
        Self::new()
    }
}

impl Model for SignalModel {
    const NUM_SYMBOLS: u16 = NUM_SYMBOLS;
    const MAX_FREQUENCY: u16 = MAX_FREQUENCY;

    fn symbol_interval(&self, symbol: u16) -> (u16, u16) {
        let loc = ((i32::from(symbol) + i32::from(NUM_SYMBOLS) + i32::from(self.active_symbol_shift))
            % i32::from(NUM_SYMBOLS)) as usize;
        let table = &self.ccft[self.active_dist];
        (table[loc], table[loc + 1])
    }

    fn frequency_symbol(&self, freq: u16) -> (u16, u16, u16) {
        let table = &self.ccft[self.active_dist];
        let loc = table.partition_point(|&f| f <= freq) - 1;
        let symbol = ((loc as i32 + i32::from(NUM_SYMBOLS) - i32::from(self.active_symbol_shift))
            % i32::from(NUM_SYMBOLS)) as u16;
        (symbol, table[loc], table[loc + 1])
    }

    fn update_state(&mut self, symbol: u16) {
        let deviation = f64::from(symbol) - self.mean;

        if deviation.abs() > OUTLIER_LEVEL * self.stdev {
            self.outlier_counter += 1;
        } else {
            self.outlier_counter = 0;
        }
        if self.outlier_counter > MAX_OUTLIER_RUN {
            self.outlier_counter = 0;
        }

        if self.outlier_counter == 0 {
            self.mean = MEAN_SMOOTHING * self.mean + (1.0 - MEAN_SMOOTHING) * f64::from(symbol);
            self.stdev = (GARCH_OMEGA
                + GARCH_ALPHA * self.stdev * self.stdev
                + GARCH_BETA * deviation * deviation)
                .sqrt();

            self.active_dist = STD_LEVELS
                .partition_point(|&level| level < self.stdev)
                .min(NUM_DIST - 1);

            self.active_symbol_shift =
                511 - (self.mean + (f64::from(symbol) - self.mean) * MEAN_REVERSION) as i16;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_tables_are_strictly_increasing_with_fixed_endpoints() {
        let model = SignalModel::new();
        for table in &model.ccft {
            assert_eq!(table[0], 0);
            assert_eq!(table[NUM_SYMBOLS as usize], MAX_FREQUENCY);
            for j in 0..NUM_SYMBOLS as usize {
                assert!(
                    table[j] < table[j + 1],
                    "table not strictly increasing at {j}: {} >= {}",
                    table[j],
                    table[j + 1]
                );
            }
        }
    }

    #[test]
    fn test_interval_lookup_inverts_for_every_symbol() {
        let model = SignalModel::new();
        for symbol in 0..NUM_SYMBOLS {
            let (low, high) = model.symbol_interval(symbol);
            assert!(low < high);
            for freq in [low, high - 1] {
                let (found, found_low, found_high) = model.frequency_symbol(freq);
                assert_eq!(found, symbol);
                assert_eq!((found_low, found_high), (low, high));
            }
        }
    }

    #[test]
    fn test_interval_lookup_inverts_after_state_drift() {
        let mut model = SignalModel::new();
        // Push the mean well away from the center so the rotation is active.
        for _ in 0..50 {
            model.update_state(900);
        }
        assert_ne!(model.symbol_shift(), 0);
        for symbol in (0..NUM_SYMBOLS).step_by(13) {
            let (low, high) = model.symbol_interval(symbol);
            let (found, _, _) = model.frequency_symbol(low);
            assert_eq!(found, symbol);
        }
    }

    #[test]
    fn test_update_is_deterministic() {
        let mut a = SignalModel::new();
        let mut b = SignalModel::new();
        let mut x = 1u32;
        for _ in 0..1000 {
            // Small LCG; any fixed sequence works.
            x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let symbol = (x >> 16) as u16 % 1024;
            a.update_state(symbol);
            b.update_state(symbol);
            assert_eq!(a.mean.to_bits(), b.mean.to_bits());
            assert_eq!(a.stdev.to_bits(), b.stdev.to_bits());
            assert_eq!(a.active_dist, b.active_dist);
            assert_eq!(a.active_symbol_shift, b.active_symbol_shift);
        }
    }

    #[test]
    fn test_single_outlier_freezes_the_statistics() {
        let mut model = SignalModel::new();
        for _ in 0..100 {
            model.update_state(512);
        }
        let mean = model.mean();
        let stdev = model.stdev();
        let shift = model.symbol_shift();

        model.update_state(1023);
        assert_eq!(model.mean().to_bits(), mean.to_bits());
        assert_eq!(model.stdev().to_bits(), stdev.to_bits());
        assert_eq!(model.symbol_shift(), shift);

        // A normal sample resumes adaptation.
        model.update_state(512);
        assert_eq!(model.outlier_counter, 0);
        assert!((model.mean() - 512.0).abs() < 1e-6);
    }

    #[test]
    fn test_persistent_level_shift_eventually_adapts() {
        let mut model = SignalModel::new();
        for _ in 0..100 {
            model.update_state(512);
        }
        let mean = model.mean();
        // Four extreme samples in a row overflow the outlier run and are
        // accepted into the statistics.
        for _ in 0..4 {
            model.update_state(1023);
        }
        assert!(model.mean() > mean);
    }

    #[test]
    fn test_quiet_signal_settles_on_the_narrowest_distribution() {
        let mut model = SignalModel::new();
        for i in 0..1000 {
            model.update_state(if i % 2 == 0 { 512 } else { 511 });
        }
        assert_eq!(model.active_dist(), 0);
        assert!(model.stdev() < STD_LEVELS[0]);
    }

    #[test]
    fn test_volatile_signal_selects_a_wider_distribution() {
        let mut model = SignalModel::new();
        for i in 0..1000 {
            model.update_state(if i % 2 == 0 { 400 } else { 620 });
        }
        assert!(model.active_dist() > 0);
    }

    proptest! {
        #[test]
        fn prop_frequency_symbol_brackets_the_query(
            prefix in prop::collection::vec(0u16..1024, 0..50),
            freq in 0u16..MAX_FREQUENCY,
        ) {
            let mut model = SignalModel::new();
            for &symbol in &prefix {
                model.update_state(symbol);
            }
            let (symbol, low, high) = model.frequency_symbol(freq);
            prop_assert!(low <= freq && freq < high);
            prop_assert_eq!(model.symbol_interval(symbol), (low, high));
        }

        #[test]
        fn prop_volatility_stays_positive_and_finite(
            symbols in prop::collection::vec(0u16..1025, 1..500),
        ) {
            let mut model = SignalModel::new();
            for &symbol in &symbols {
                model.update_state(symbol);
            }
            prop_assert!(model.stdev().is_finite());
            prop_assert!(model.stdev() > 0.0);
            prop_assert!(model.active_dist() < NUM_DIST);
        }
    }
}

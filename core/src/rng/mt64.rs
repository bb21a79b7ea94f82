//! MT19937-64 random number generator
//!
//! This is a fast, high-quality PRNG that is deterministic and suitable
//! for simulation purposes.
//!
//! # Algorithm
//!
//! MT19937-64 keeps a 312-word state array and refills it one epoch at a
//! time with a twisted linear-feedback recurrence, then tempers each word
//! on the way out. It uses 64-bit state words and produces 64-bit output
//! with a period of 2^19937-1.
//!
//! # Determinism
//!
//! Same seed → same sequence of random numbers. This is CRITICAL for:
//! - Debugging (reproduce exact simulation)
//! - Testing (verify behavior)
//! - Research (validate results)
//!
//! The generator is a sequential, mutable-state object with no internal
//! synchronization. Callers that share one across threads must wrap it in
//! a lock, or give each worker its own stream (see
//! [`StreamFactory`](crate::rng::StreamFactory)).

/// Number of 64-bit words in the state array (one epoch of output).
const N: usize = 312;

/// Twist offset: the recurrence for word i reaches M words ahead.
const M: usize = 156;

/// Constant XORed in when the combined word's low bit is set.
const MATRIX_A: u64 = 0xB502_6F5A_A966_19E9;

/// High 33 bits of a state word.
const UPPER_MASK: u64 = 0xFFFF_FFFF_8000_0000;

/// Low 31 bits of a state word.
const LOWER_MASK: u64 = 0x0000_0000_7FFF_FFFF;

/// Multiplier for the seed-mixing recurrence.
const SEED_MULTIPLIER: u64 = 6_364_136_223_846_793_005;

/// Seed used by `Default`, the conventional fallback for this generator family.
const DEFAULT_SEED: u64 = 5489;

/// Deterministic random number generator using MT19937-64
///
/// # Example
/// ```
/// use sim_rng_core_rs::RngManager;
///
/// let mut rng = RngManager::new(12345);
/// let value = rng.next();
/// let range_value = rng.range(0, 100); // [0, 100)
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RngManager {
    /// Internal state array, refilled one epoch at a time
    state: [u64; N],
    /// Read position into `state`; N means "exhausted, refill before reading"
    cursor: usize,
}

/// Combine the high 33 bits of `a` with the low 31 bits of `b` and twist.
#[inline]
fn mix(a: u64, b: u64) -> u64 {
    let combined = (a & UPPER_MASK) | (b & LOWER_MASK);
    (combined >> 1) ^ ((combined & 1) * MATRIX_A)
}

impl RngManager {
    /// Number of words in the state array; also the number of outputs
    /// produced per epoch.
    pub const STATE_WORDS: usize = N;

    /// Create a new RNG with given seed
    ///
    /// Every u64 value is a valid seed, including 0.
    ///
    /// # Arguments
    /// * `seed` - Initial seed value (u64)
    ///
    /// # Example
    /// ```
    /// use sim_rng_core_rs::RngManager;
    ///
    /// let rng = RngManager::new(12345);
    /// ```
    pub fn new(seed: u64) -> Self {
        Self::with_stream(seed, 0)
    }

    /// Create a new RNG for a specific stream of a shared base seed
    ///
    /// The generated sequence is a pure function of `seed ^ stream`, so
    /// `with_stream(seed, 0)` is identical to `new(seed)`. Distinct stream
    /// values give subsystems independent sequences that are still fully
    /// reproducible from one base seed.
    ///
    /// # Arguments
    /// * `seed` - Base seed value
    /// * `stream` - Stream value XORed into the seed
    ///
    /// # Example
    /// ```
    /// use sim_rng_core_rs::RngManager;
    ///
    /// let mut arrivals = RngManager::with_stream(42, 1);
    /// let mut settlements = RngManager::with_stream(42, 2);
    /// assert_ne!(arrivals.next(), settlements.next());
    /// ```
    pub fn with_stream(seed: u64, stream: u64) -> Self {
        let mut state = [0u64; N];
        let mut x = seed ^ stream;
        state[0] = x;
        for (i, slot) in state.iter_mut().enumerate().skip(1) {
            x = (x ^ (x >> 62))
                .wrapping_mul(SEED_MULTIPLIER)
                .wrapping_add(i as u64);
            *slot = x;
        }
        // Cursor at N forces a refill on the first next() call.
        Self { state, cursor: N }
    }

    /// Rebuild a generator from already-validated snapshot parts
    ///
    /// Used by checkpoint restoration. The caller is responsible for
    /// validating the snapshot first; see
    /// [`RngSnapshot::restore`](crate::checkpoint::RngSnapshot::restore).
    ///
    /// # Panics
    /// Panics if `cursor` exceeds [`Self::STATE_WORDS`].
    pub fn from_snapshot_parts(state: [u64; Self::STATE_WORDS], cursor: usize) -> Self {
        assert!(
            cursor <= Self::STATE_WORDS,
            "cursor must not exceed the state length"
        );
        Self { state, cursor }
    }

    /// Refill the whole state array in place and reset the cursor.
    ///
    /// Two passes cover the twist offset without modulo indexing: words
    /// below M pair with a word M ahead, the rest with a word M behind.
    /// At the wraparound index N-1 the word pairs with itself, because
    /// slot 0 already holds next-epoch data by the time it is reached.
    fn regenerate(&mut self) {
        for i in 0..M {
            let twisted = mix(self.state[i], self.state[i + 1]);
            self.state[i] = self.state[i + M] ^ twisted;
        }
        for i in M..N - 1 {
            let twisted = mix(self.state[i], self.state[i + 1]);
            self.state[i] = self.state[i - M] ^ twisted;
        }
        let twisted = mix(self.state[N - 1], self.state[N - 1]);
        self.state[N - 1] = self.state[N - 1 - M] ^ twisted;
        self.cursor = 0;
    }

    /// Generate next random u64 value
    ///
    /// This advances the internal state and returns a random value.
    /// Amortized O(1): one epoch refill every [`Self::STATE_WORDS`] calls.
    ///
    /// # Example
    /// ```
    /// use sim_rng_core_rs::RngManager;
    ///
    /// let mut rng = RngManager::new(12345);
    /// let value = rng.next();
    /// ```
    pub fn next(&mut self) -> u64 {
        if self.cursor >= N {
            self.regenerate();
        }
        let mut x = self.state[self.cursor];
        self.cursor += 1;

        // Tempering: invertible bit-mixing that breaks up the linear
        // correlations of the raw twisted words.
        x ^= (x >> 29) & 0x5555_5555_5555_5555;
        x ^= (x << 17) & 0x71D6_7FFF_EDA6_0000;
        x ^= (x << 37) & 0xFFF7_EEE0_0000_0000;
        x ^= x >> 43;
        x
    }

    /// Generate next random u32 value (low 32 bits of [`Self::next`])
    pub fn next_u32(&mut self) -> u32 {
        (self.next() & 0xFFFF_FFFF) as u32
    }

    /// Generate random value in range [min, max)
    ///
    /// # Arguments
    /// * `min` - Minimum value (inclusive)
    /// * `max` - Maximum value (exclusive)
    ///
    /// # Panics
    /// Panics if min >= max
    ///
    /// # Example
    /// ```
    /// use sim_rng_core_rs::RngManager;
    ///
    /// let mut rng = RngManager::new(12345);
    /// let delay = rng.range(10, 100); // ticks until arrival
    /// ```
    pub fn range(&mut self, min: i64, max: i64) -> i64 {
        assert!(min < max, "min must be less than max");

        let value = self.next();
        let range_size = (max - min) as u64;
        min + (value % range_size) as i64
    }

    /// Generate random f64 in range [0.0, 1.0)
    ///
    /// Useful for sampling from probability distributions.
    ///
    /// # Example
    /// ```
    /// use sim_rng_core_rs::RngManager;
    ///
    /// let mut rng = RngManager::new(12345);
    /// let probability = rng.next_f64();
    /// assert!(probability >= 0.0 && probability < 1.0);
    /// ```
    pub fn next_f64(&mut self) -> f64 {
        let value = self.next();
        // Convert to [0.0, 1.0) using the top 53 bits
        (value >> 11) as f64 * (1.0 / ((1u64 << 53) as f64))
    }

    /// Sample a Poisson-distributed count with the given rate
    ///
    /// Uses Knuth's multiplication method, which is exact and fast for the
    /// small per-tick rates simulations pass here. Rates that are zero,
    /// negative, or NaN yield 0.
    ///
    /// # Arguments
    /// * `lambda` - Expected number of events (the Poisson rate)
    ///
    /// # Example
    /// ```
    /// use sim_rng_core_rs::RngManager;
    ///
    /// let mut rng = RngManager::new(12345);
    /// let num_arrivals = rng.poisson(0.5);
    /// ```
    pub fn poisson(&mut self, lambda: f64) -> u64 {
        if !(lambda > 0.0) {
            return 0;
        }

        let threshold = (-lambda).exp();
        let mut count: u64 = 0;
        let mut product = self.next_f64();
        while product > threshold {
            count += 1;
            product *= self.next_f64();
        }
        count
    }

    /// Shuffle a slice in place (Fisher-Yates)
    ///
    /// # Example
    /// ```
    /// use sim_rng_core_rs::RngManager;
    ///
    /// let mut rng = RngManager::new(12345);
    /// let mut order = vec![0, 1, 2, 3, 4];
    /// rng.shuffle(&mut order);
    /// ```
    pub fn shuffle<T>(&mut self, data: &mut [T]) {
        for i in (1..data.len()).rev() {
            let j = (self.next() % (i as u64 + 1)) as usize;
            data.swap(i, j);
        }
    }

    /// Fill a byte buffer from successive outputs, little-endian
    ///
    /// A trailing chunk shorter than 8 bytes takes the low bytes of one
    /// final output.
    ///
    /// # Example
    /// ```
    /// use sim_rng_core_rs::RngManager;
    ///
    /// let mut rng = RngManager::new(12345);
    /// let mut key = [0u8; 32];
    /// rng.fill_bytes(&mut key);
    /// ```
    pub fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    /// Get the state words in index order (for checkpointing/replay)
    ///
    /// Together with [`Self::cursor`] this is the complete generator state.
    pub fn state_words(&self) -> &[u64] {
        &self.state
    }

    /// Get the current read position (for checkpointing/replay)
    ///
    /// Ranges over [0, [`Self::STATE_WORDS`]]; the maximum means the next
    /// call refills the state array before reading.
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl Default for RngManager {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

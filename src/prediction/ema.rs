//! EMA (Exponential Moving Average) runtime smoothing

/// EMA weight for the newest sample, in 1/256ths (0.25)
pub const EMA_ALPHA_FIXED: u64 = 64;

/// Smoothed runtime estimate for one task
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuntimeEma {
    ema_ns: u64,
    samples: u64,
}

impl RuntimeEma {
    pub const fn new() -> Self {
        Self {
            ema_ns: 0,
            samples: 0,
        }
    }

    /// Fold in a new observed runtime
    pub fn update(&mut self, runtime_ns: u64) {
        if self.samples == 0 {
            // First sample, just store it
            self.ema_ns = runtime_ns;
        } else {
            // Fixed-point: new = alpha * sample + (1 - alpha) * old
            self.ema_ns = (EMA_ALPHA_FIXED * runtime_ns
                + (256 - EMA_ALPHA_FIXED) * self.ema_ns)
                / 256;
        }
        self.samples += 1;
    }

    /// Current prediction in nanoseconds
    #[inline]
    pub fn predict(&self) -> u64 {
        self.ema_ns
    }

    /// Number of folded samples
    #[inline]
    pub fn sample_count(&self) -> u64 {
        self.samples
    }
}

//! Error-diffusion kernel tables.
//!
//! Each entry is `(dx, dy, weight)` relative to the current pixel in a
//! left-to-right pass; serpentine scans mirror `dx`. A neighbor receives
//! `error * weight / divisor`.

/// An error-diffusion kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kernel {
    /// (dx, dy, weight) entries. `dy` is never negative.
    pub entries: &'static [(i32, i32, u8)],
    /// Normalizing divisor.
    pub divisor: u8,
}

impl Kernel {
    /// Fraction of the error this kernel propagates.
    ///
    /// # Example
    /// ```
    /// use tx_ascii::dither::kernel::{ATKINSON, FLOYD_STEINBERG};
    /// assert!((FLOYD_STEINBERG.weight_sum() - 1.0).abs() < 1e-9);
    /// assert!((ATKINSON.weight_sum() - 0.75).abs() < 1e-9);
    /// ```
    #[must_use]
    pub fn weight_sum(&self) -> f64 {
        let total: u32 = self.entries.iter().map(|&(_, _, w)| u32::from(w)).sum();
        f64::from(total) / f64::from(self.divisor)
    }

    /// Weight of one entry as a fraction.
    #[inline(always)]
    #[must_use]
    pub fn weight(&self, raw: u8) -> f64 {
        f64::from(raw) / f64::from(self.divisor)
    }
}

/// Floyd–Steinberg.
///
/// ```text
///        X   7
///    3   5   1     (/16)
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[(1, 0, 7), (-1, 1, 3), (0, 1, 5), (1, 1, 1)],
    divisor: 16,
};

/// Jarvis–Judice–Ninke.
///
/// ```text
///            X   7   5
///    3   5   7   5   3
///    1   3   5   3   1     (/48)
/// ```
pub const JARVIS_JUDICE_NINKE: Kernel = Kernel {
    entries: &[
        (1, 0, 7),
        (2, 0, 5),
        (-2, 1, 3),
        (-1, 1, 5),
        (0, 1, 7),
        (1, 1, 5),
        (2, 1, 3),
        (-2, 2, 1),
        (-1, 2, 3),
        (0, 2, 5),
        (1, 2, 3),
        (2, 2, 1),
    ],
    divisor: 48,
};

/// Stucki.
///
/// ```text
///            X   8   4
///    2   4   8   4   2
///    1   2   4   2   1     (/42)
/// ```
pub const STUCKI: Kernel = Kernel {
    entries: &[
        (1, 0, 8),
        (2, 0, 4),
        (-2, 1, 2),
        (-1, 1, 4),
        (0, 1, 8),
        (1, 1, 4),
        (2, 1, 2),
        (-2, 2, 1),
        (-1, 2, 2),
        (0, 2, 4),
        (1, 2, 2),
        (2, 2, 1),
    ],
    divisor: 42,
};

/// Burkes.
///
/// ```text
///            X   8   4
///    2   4   8   4   2     (/32)
/// ```
pub const BURKES: Kernel = Kernel {
    entries: &[
        (1, 0, 8),
        (2, 0, 4),
        (-2, 1, 2),
        (-1, 1, 4),
        (0, 1, 8),
        (1, 1, 4),
        (2, 1, 2),
    ],
    divisor: 32,
};

/// Sierra (three-row).
///
/// ```text
///            X   5   3
///    2   4   5   4   2
///        2   3   2         (/32)
/// ```
pub const SIERRA: Kernel = Kernel {
    entries: &[
        (1, 0, 5),
        (2, 0, 3),
        (-2, 1, 2),
        (-1, 1, 4),
        (0, 1, 5),
        (1, 1, 4),
        (2, 1, 2),
        (-1, 2, 2),
        (0, 2, 3),
        (1, 2, 2),
    ],
    divisor: 32,
};

/// Sierra Lite.
///
/// ```text
///        X   2
///    1   1         (/4)
/// ```
pub const SIERRA_LITE: Kernel = Kernel {
    entries: &[(1, 0, 2), (-1, 1, 1), (0, 1, 1)],
    divisor: 4,
};

/// Atkinson. Propagates 6/8 of the error; the loss raises contrast.
///
/// ```text
///        X   1   1
///    1   1   1
///        1             (/8)
/// ```
pub const ATKINSON: Kernel = Kernel {
    entries: &[(1, 0, 1), (2, 0, 1), (-1, 1, 1), (0, 1, 1), (1, 1, 1), (0, 2, 1)],
    divisor: 8,
};

#[cfg(test)]
mod tests {
    use super::*;

    const CONSERVING: [(&str, Kernel); 6] = [
        ("floyd-steinberg", FLOYD_STEINBERG),
        ("jarvis-judice-ninke", JARVIS_JUDICE_NINKE),
        ("stucki", STUCKI),
        ("burkes", BURKES),
        ("sierra", SIERRA),
        ("sierra-lite", SIERRA_LITE),
    ];

    #[test]
    fn conserving_kernels_sum_to_one() {
        for (name, k) in CONSERVING {
            assert!((k.weight_sum() - 1.0).abs() < 1e-9, "{name}: {}", k.weight_sum());
        }
    }

    #[test]
    fn atkinson_under_diffuses() {
        assert!((ATKINSON.weight_sum() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn tap_counts() {
        assert_eq!(FLOYD_STEINBERG.entries.len(), 4);
        assert_eq!(JARVIS_JUDICE_NINKE.entries.len(), 12);
        assert_eq!(STUCKI.entries.len(), 12);
        assert_eq!(BURKES.entries.len(), 7);
        assert_eq!(SIERRA.entries.len(), 10);
        assert_eq!(SIERRA_LITE.entries.len(), 3);
        assert_eq!(ATKINSON.entries.len(), 6);
    }

    #[test]
    fn kernels_only_reach_forward() {
        for (_, k) in CONSERVING.iter().chain([("atkinson", ATKINSON)].iter()) {
            for &(dx, dy, _) in k.entries {
                assert!(dy > 0 || (dy == 0 && dx > 0), "({dx},{dy}) is behind the cursor");
            }
        }
    }
}

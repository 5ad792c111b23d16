//! IIR section coefficients and the per-call recurrence state.

/// Full-scale value used to normalize 16-bit samples.
pub(crate) const FULL_SCALE: f64 = 32767.0;

/// Coefficients of an IIR section up to third order.
///
/// Normalized so that `a0 == 1`. Unused taps of lower-order sections are zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SectionCoeffs {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub b3: f64,
    pub a1: f64,
    pub a2: f64,
    pub a3: f64,
}

impl SectionCoeffs {
    /// Builds a section from raw taps, dividing everything by `a0`.
    pub(crate) fn normalized(b: [f64; 4], a: [f64; 4]) -> Self {
        let a0 = a[0];
        Self {
            b0: b[0] / a0,
            b1: b[1] / a0,
            b2: b[2] / a0,
            b3: b[3] / a0,
            a1: a[1] / a0,
            a2: a[2] / a0,
            a3: a[3] / a0,
        }
    }

    /// Gain of the section at DC.
    pub fn dc_gain(&self) -> f64 {
        (self.b0 + self.b1 + self.b2 + self.b3) / (1.0 + self.a1 + self.a2 + self.a3)
    }

    /// True when every coefficient is finite.
    pub fn is_finite(&self) -> bool {
        [
            self.b0, self.b1, self.b2, self.b3, self.a1, self.a2, self.a3,
        ]
        .iter()
        .all(|c| c.is_finite())
    }
}

/// Input and output history of one filter application.
///
/// Starts at zero for every buffer and is never shared between calls.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FilterState {
    x1: f64,
    x2: f64,
    x3: f64,
    y1: f64,
    y2: f64,
    y3: f64,
}

impl FilterState {
    /// Advances the recurrence by one input sample.
    ///
    /// Returns the next state and the output sample.
    #[inline]
    pub fn step(self, c: &SectionCoeffs, x: f64) -> (Self, f64) {
        let y = c.b0 * x + c.b1 * self.x1 + c.b2 * self.x2 + c.b3 * self.x3
            - c.a1 * self.y1
            - c.a2 * self.y2
            - c.a3 * self.y3;

        let next = Self {
            x1: x,
            x2: self.x1,
            x3: self.x2,
            y1: y,
            y2: self.y1,
            y3: self.y2,
        };
        (next, y)
    }
}

/// Converts a normalized sample back to 16 bits, rounding and clamping.
#[inline]
pub(crate) fn to_pcm16(y: f64) -> i16 {
    if !y.is_finite() {
        return 0;
    }
    (y * FULL_SCALE).round().clamp(i16::MIN as f64, i16::MAX as f64) as i16
}

/// Runs a section over a buffer with fresh state.
pub fn apply_section(samples: &[i16], coeffs: &SectionCoeffs) -> Vec<i16> {
    samples
        .iter()
        .scan(FilterState::default(), |state, &s| {
            let (next, y) = state.step(coeffs, s as f64 / FULL_SCALE);
            *state = next;
            Some(to_pcm16(y))
        })
        .collect()
}

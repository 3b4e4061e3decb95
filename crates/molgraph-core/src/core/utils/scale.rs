/// A square-root scale mapping a continuous domain onto a range.
///
/// Used for atom radii: mapping through `sqrt` makes the circle *area*, not its
/// radius, proportional to the input value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SqrtScale {
    domain: (f64, f64),
    range: (f64, f64),
    clamp: bool,
}

impl SqrtScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain,
            range,
            clamp: false,
        }
    }

    /// Restricts outputs to the range for inputs outside the domain.
    pub fn clamped(mut self) -> Self {
        self.clamp = true;
        self
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    #[inline]
    fn transform(value: f64) -> f64 {
        value.signum() * value.abs().sqrt()
    }

    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = (Self::transform(self.domain.0), Self::transform(self.domain.1));
        let (r0, r1) = self.range;
        if d1 == d0 || !value.is_finite() {
            return r0;
        }
        let mut t = (Self::transform(value) - d0) / (d1 - d0);
        if self.clamp {
            t = t.clamp(0.0, 1.0);
        }
        r0 + t * (r1 - r0)
    }
}

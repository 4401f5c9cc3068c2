use crate::error::ScaleError;

/// A band scale divides a continuous range into bands and computes positions based on a discrete domain.
///
/// Band scales are commonly used for bar charts with categorical dimensions. They
/// have no inverse over a single pixel offset, so brushing against a band axis is
/// rejected by [`crate::AxisScale::invert`].
#[derive(Debug, Clone)]
pub struct BandScale {
    domain: Vec<String>,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
    align: f64,
    round: bool,
}

impl BandScale {
    /// Creates a new band scale with the given domain.
    ///
    /// # Defaults
    /// - range: (0.0, 1.0)
    /// - padding_inner: 0.0
    /// - padding_outer: 0.0
    /// - align: 0.5
    /// - round: false
    pub fn try_new<I, S>(domain: I) -> Result<Self, ScaleError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let domain: Vec<String> = domain.into_iter().map(Into::into).collect();
        if domain.is_empty() {
            return Err(ScaleError::EmptyDomain);
        }
        Ok(Self {
            domain,
            range: (0.0, 1.0),
            padding_inner: 0.0,
            padding_outer: 0.0,
            align: 0.5,
            round: false,
        })
    }

    /// Sets the output range. The range may be reversed for inverted scales.
    pub fn range(mut self, range: (f64, f64)) -> Self {
        self.range = range;
        self
    }

    /// Sets the inner padding between bands to a value between 0 and 1.
    pub fn padding_inner(mut self, padding: f64) -> Self {
        self.padding_inner = padding.clamp(0.0, 1.0);
        self
    }

    /// Sets the outer padding to a non-negative value.
    pub fn padding_outer(mut self, padding: f64) -> Self {
        self.padding_outer = padding.max(0.0);
        self
    }

    /// Sets both inner and outer padding to the same value.
    pub fn padding(self, padding: f64) -> Self {
        self.padding_inner(padding).padding_outer(padding)
    }

    /// Sets how leftover space is distributed: 0.0 start, 0.5 centered, 1.0 end.
    pub fn align(mut self, align: f64) -> Self {
        self.align = align.clamp(0.0, 1.0);
        self
    }

    pub fn round(mut self, round: bool) -> Self {
        self.round = round;
        self
    }

    pub fn get_domain(&self) -> &[String] {
        &self.domain
    }

    pub fn get_range(&self) -> (f64, f64) {
        self.range
    }

    fn ordered_range(&self) -> (f64, f64, bool) {
        let reverse = self.range.1 < self.range.0;
        if reverse {
            (self.range.1, self.range.0, true)
        } else {
            (self.range.0, self.range.1, false)
        }
    }

    /// Returns the distance between the starts of adjacent bands.
    pub fn step(&self) -> f64 {
        let (start, stop, _) = self.ordered_range();
        let step = (stop - start)
            / 1.0_f64.max(bandspace(
                self.domain.len(),
                self.padding_inner,
                self.padding_outer,
            ));
        if self.round {
            step.floor()
        } else {
            step
        }
    }

    /// Returns the width of each band.
    pub fn bandwidth(&self) -> f64 {
        let bandwidth = self.step() * (1.0 - self.padding_inner);
        if self.round {
            bandwidth.round()
        } else {
            bandwidth
        }
    }

    /// Start position of the band at `index`, or NaN when out of bounds
    pub fn scale_index(&self, index: usize) -> f64 {
        let n = self.domain.len();
        if index >= n {
            return f64::NAN;
        }

        let (start, stop, reverse) = self.ordered_range();
        let step = self.step();
        let start = start + (stop - start - step * (n as f64 - self.padding_inner)) * self.align;
        let start = if self.round { start.round() } else { start };

        let position = if reverse { n - 1 - index } else { index };
        start + step * position as f64
    }

    /// Start position of the band for the given category
    pub fn scale(&self, value: &str) -> Result<f64, ScaleError> {
        let index = self
            .domain
            .iter()
            .position(|v| v == value)
            .ok_or_else(|| ScaleError::DomainValueNotFound(value.to_string()))?;
        Ok(self.scale_index(index))
    }
}

/// Calculates required steps for a band scale based on domain count and padding.
pub fn bandspace(count: usize, padding_inner: f64, padding_outer: f64) -> f64 {
    let padding_inner = padding_inner.clamp(0.0, 1.0);
    let padding_outer = padding_outer.max(0.0);
    count as f64 - padding_inner + padding_outer * 2.0
}

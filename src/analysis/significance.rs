/// Two-sided p-value for `successes` out of `trials` under p = 0.5.
pub trait SignificanceTest {
    fn p_value(&self, successes: u32, trials: u32) -> f64;
}

/// z-test using the normal approximation to the binomial.
#[derive(Debug, Default, Clone, Copy)]
pub struct NormalApproximation;

impl SignificanceTest for NormalApproximation {
    fn p_value(&self, successes: u32, trials: u32) -> f64 {
        if trials == 0 {
            return 1.0;
        }
        let n = trials as f64;
        let rate = successes as f64 / n;
        let standard_error = (0.25 / n).sqrt();
        let z = (rate - 0.5) / standard_error;

        (2.0 * (1.0 - standard_normal_cdf(z.abs()))).clamp(0.0, 1.0)
    }
}

/// Φ(x) via the Abramowitz & Stegun 7.1.26 erf approximation (|ε| < 1.5e-7).
pub fn standard_normal_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf(x / std::f64::consts::SQRT_2))
}

fn erf(x: f64) -> f64 {
    const A1: f64 = 0.254829592;
    const A2: f64 = -0.284496736;
    const A3: f64 = 1.421413741;
    const A4: f64 = -1.453152027;
    const A5: f64 = 1.061405429;
    const P: f64 = 0.3275911;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();
    let t = 1.0 / (1.0 + P * x);
    let poly = ((((A5 * t + A4) * t + A3) * t + A2) * t + A1) * t;

    sign * (1.0 - poly * (-x * x).exp())
}

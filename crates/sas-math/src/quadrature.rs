// ─────────────────────────────────────────────────────────────────────
// SCPN Scatter Core — Quadrature
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! 76-point Gauss–Legendre rule on [−1, 1].
//!
//! Shape-model orientation averages use this fixed rule; 76 points is the
//! standard order for smooth form-factor integrands at SAS q ranges.

pub const GAUSS76_Z: [f64; 76] = [
    -9.99505948362153118e-01, -9.97397786355355476e-01,
    -9.93608772723526990e-01, -9.88144453359837471e-01,
    -9.81013938975655919e-01, -9.72229228520376965e-01,
    -9.61805126758767837e-01, -9.49759207710896391e-01,
    -9.36111781934810816e-01, -9.20885861252150106e-01,
    -9.04107119545566884e-01, -8.85803849292082779e-01,
    -8.66006913771981912e-01, -8.44749694983342403e-01,
    -8.22068037328974599e-01, -7.98000187161200136e-01,
    -7.72586728281809743e-01, -7.45870513503610444e-01,
    -7.17896592387703647e-01, -6.88712135277640636e-01,
    -6.58366353758142675e-01, -6.26910417672266518e-01,
    -5.94397368836792950e-01, -5.60882031601237507e-01,
    -5.26420920401242554e-01, -4.91072144462193882e-01,
    -4.54895309813726334e-01, -4.17951418780327322e-01,
    -3.80302767117504437e-01, -3.42012838966961996e-01,
    -3.03146199807907801e-01, -2.63768387584994268e-01,
    -2.23945802196474142e-01, -1.83745593528914480e-01,
    -1.43235548227267528e-01, -1.02483975391227028e-01,
    -6.15595913906112069e-02, -2.05314039939986370e-02,
    2.05314039939986370e-02, 6.15595913906112069e-02,
    1.02483975391227028e-01, 1.43235548227267528e-01,
    1.83745593528914480e-01, 2.23945802196474142e-01,
    2.63768387584994268e-01, 3.03146199807907801e-01,
    3.42012838966961996e-01, 3.80302767117504437e-01,
    4.17951418780327322e-01, 4.54895309813726334e-01,
    4.91072144462193882e-01, 5.26420920401242554e-01,
    5.60882031601237507e-01, 5.94397368836792950e-01,
    6.26910417672266518e-01, 6.58366353758142675e-01,
    6.88712135277640636e-01, 7.17896592387703647e-01,
    7.45870513503610444e-01, 7.72586728281809743e-01,
    7.98000187161200136e-01, 8.22068037328974599e-01,
    8.44749694983342403e-01, 8.66006913771981912e-01,
    8.85803849292082779e-01, 9.04107119545566884e-01,
    9.20885861252150106e-01, 9.36111781934810816e-01,
    9.49759207710896391e-01, 9.61805126758767837e-01,
    9.72229228520376965e-01, 9.81013938975655919e-01,
    9.88144453359837471e-01, 9.93608772723526990e-01,
    9.97397786355355476e-01, 9.99505948362153118e-01,
];

pub const GAUSS76_W: [f64; 76] = [
    1.26779163408530043e-03, 2.94910295364242750e-03,
    4.62793522803737947e-03, 6.29918049732849147e-03,
    7.95984747723972423e-03, 9.60710541471379575e-03,
    1.12381685696677294e-02, 1.28502838475100835e-02,
    1.44407317482767306e-02, 1.60068299122485616e-02,
    1.75459372914742208e-02, 1.90554584671905163e-02,
    2.05328479679080730e-02, 2.19756145344162553e-02,
    2.33813253070111679e-02, 2.47476099206596634e-02,
    2.60721644979860397e-02, 2.73527555318275536e-02,
    2.85872236500540090e-02, 2.97734872559051213e-02,
    3.09095460374915858e-02, 3.19934843404216102e-02,
    3.30234743977917411e-02, 3.39977794120563115e-02,
    3.49147564835507324e-02, 3.57728593807139575e-02,
    3.65706411473296078e-02, 3.73067565423816014e-02,
    3.79799643084052854e-02, 3.85891292645067566e-02,
    3.91332242205183617e-02, 3.96113317090620379e-02,
    4.00226455325968303e-02, 4.03664721228439924e-02,
    4.06422317102947545e-02, 4.08494593018284835e-02,
    4.09878054647939624e-02, 4.10570369162294654e-02,
    4.10570369162294654e-02, 4.09878054647939624e-02,
    4.08494593018284835e-02, 4.06422317102947545e-02,
    4.03664721228439924e-02, 4.00226455325968303e-02,
    3.96113317090620379e-02, 3.91332242205183617e-02,
    3.85891292645067566e-02, 3.79799643084052854e-02,
    3.73067565423816014e-02, 3.65706411473296078e-02,
    3.57728593807139575e-02, 3.49147564835507324e-02,
    3.39977794120563115e-02, 3.30234743977917411e-02,
    3.19934843404216102e-02, 3.09095460374915858e-02,
    2.97734872559051213e-02, 2.85872236500540090e-02,
    2.73527555318275536e-02, 2.60721644979860397e-02,
    2.47476099206596634e-02, 2.33813253070111679e-02,
    2.19756145344162553e-02, 2.05328479679080730e-02,
    1.90554584671905163e-02, 1.75459372914742208e-02,
    1.60068299122485616e-02, 1.44407317482767306e-02,
    1.28502838475100835e-02, 1.12381685696677294e-02,
    9.60710541471379575e-03, 7.95984747723972423e-03,
    6.29918049732849147e-03, 4.62793522803737947e-03,
    2.94910295364242750e-03, 1.26779163408530043e-03,
];


/// Integrate `f` over [0, 1] with the 76-point rule mapped from [−1, 1].
pub fn gauss76_01(f: impl Fn(f64) -> f64) -> f64 {
    let mut total = 0.0;
    for (z, w) in GAUSS76_Z.iter().zip(GAUSS76_W.iter()) {
        total += w * f(0.5 * (z + 1.0));
    }
    0.5 * total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_sum_to_two() {
        let sum: f64 = GAUSS76_W.iter().sum();
        assert!((sum - 2.0).abs() < 1e-13, "weight sum {sum}");
    }

    #[test]
    fn test_nodes_symmetric_and_sorted() {
        for i in 1..76 {
            assert!(GAUSS76_Z[i] > GAUSS76_Z[i - 1]);
        }
        for i in 0..38 {
            assert!((GAUSS76_Z[i] + GAUSS76_Z[75 - i]).abs() < 1e-15);
            assert!((GAUSS76_W[i] - GAUSS76_W[75 - i]).abs() < 1e-15);
        }
    }

    #[test]
    fn test_integrates_polynomials_exactly() {
        // exact for degree <= 151; check x^4 on [0,1] = 1/5
        let val = gauss76_01(|x| x.powi(4));
        assert!((val - 0.2).abs() < 1e-14);
        // and a transcendental: ∫0..1 sin(pi x) dx = 2/pi
        let val = gauss76_01(|x| (std::f64::consts::PI * x).sin());
        assert!((val - 2.0 / std::f64::consts::PI).abs() < 1e-14);
    }
}

//! Arbitrage and convergence properties of the binomial and trinomial
//! engines.

use approx::assert_abs_diff_eq;
use ol_core::errors::Error;
use ol_instruments::{ExerciseStyle, OptionSpec, OptionType};
use ol_pricingengines::{
    binomial_price, black_scholes_merton, trinomial_price, BinomialEngine, TrinomialEngine,
};
use proptest::prelude::*;

const S0: f64 = 100.0;
const K: f64 = 100.0;
const T: f64 = 0.25;
const R: f64 = 0.05;
const SIGMA: f64 = 0.20;
const N: usize = 50;

fn bs_call() -> f64 {
    black_scholes_merton(OptionType::Call, S0, K, R, SIGMA, T)
        .unwrap()
        .price
}

// ─── Put-call parity ──────────────────────────────────────────────────────────

#[test]
fn test_binomial_put_call_parity() {
    let e = BinomialEngine::new(S0, K, T, R, SIGMA, N).unwrap();
    let call = e.price(ExerciseStyle::European, OptionType::Call);
    let put = e.price(ExerciseStyle::European, OptionType::Put);
    let lhs = put + S0;
    let rhs = call + K * (-R * T).exp();
    assert!(
        (lhs - rhs).abs() < 0.01,
        "put + S0 = {lhs:.6}, call + K e^-rT = {rhs:.6}"
    );
}

#[test]
fn test_trinomial_put_call_parity() {
    let e = TrinomialEngine::new(S0, K, T, R, SIGMA, N).unwrap();
    let call = e.price(ExerciseStyle::European, OptionType::Call);
    let put = e.price(ExerciseStyle::European, OptionType::Put);
    assert_abs_diff_eq!(put + S0, call + K * (-R * T).exp(), epsilon = 0.01);
}

// ─── Early exercise ───────────────────────────────────────────────────────────

#[test]
fn test_american_at_least_european() {
    let b = BinomialEngine::new(S0, K, T, R, SIGMA, N).unwrap();
    let t = TrinomialEngine::new(S0, K, T, R, SIGMA, N).unwrap();
    for ty in [OptionType::Call, OptionType::Put] {
        let (eu, am) = (
            b.price(ExerciseStyle::European, ty),
            b.price(ExerciseStyle::American, ty),
        );
        assert!(am >= eu - 1e-12, "binomial {ty}: am = {am:.4}, eu = {eu:.4}");
        let (eu, am) = (
            t.price(ExerciseStyle::European, ty),
            t.price(ExerciseStyle::American, ty),
        );
        assert!(am >= eu - 1e-12, "trinomial {ty}: am = {am:.4}, eu = {eu:.4}");
    }
    // the put carries a strictly positive premium
    assert!(
        b.price(ExerciseStyle::American, OptionType::Put)
            > b.price(ExerciseStyle::European, OptionType::Put) + 0.05
    );
}

// ─── Monotonicity ─────────────────────────────────────────────────────────────

#[test]
fn test_call_price_increases_with_volatility() {
    let low = BinomialEngine::new(S0, K, T, R, 0.20, N).unwrap();
    let high = BinomialEngine::new(S0, K, T, R, 0.25, N).unwrap();
    for style in [ExerciseStyle::European, ExerciseStyle::American] {
        let (p_low, p_high) = (
            low.price(style, OptionType::Call),
            high.price(style, OptionType::Call),
        );
        assert!(p_high > p_low, "{style}: σ=0.20 → {p_low:.4}, σ=0.25 → {p_high:.4}");
    }
}

// ─── Convergence ──────────────────────────────────────────────────────────────

#[test]
fn test_convergence_to_black_scholes() {
    let reference = bs_call();
    let err = |price: f64| (price - reference).abs();
    let spec = |n: usize| OptionSpec::new(S0, K, T, R, SIGMA, n).unwrap();

    let bin: Vec<f64> = [10, 50, 200]
        .iter()
        .map(|&n| err(binomial_price(&spec(n)).unwrap()))
        .collect();
    let tri: Vec<f64> = [10, 50, 200]
        .iter()
        .map(|&n| err(trinomial_price(&spec(n)).unwrap()))
        .collect();

    assert!(bin[0] > bin[1] && bin[1] > bin[2], "binomial errors {bin:?}");
    assert!(tri[0] > tri[1] && tri[1] > tri[2], "trinomial errors {tri:?}");
    assert!(bin[2] < 0.01, "binomial N=200 error {:.5}", bin[2]);
    for (b, t) in bin.iter().zip(&tri) {
        assert!(t <= b, "trinomial error {t:.5} > binomial error {b:.5}");
    }
}

#[test]
fn test_trinomial_equals_binomial_with_twice_the_steps() {
    for ty in [OptionType::Call, OptionType::Put] {
        let tri = OptionSpec::new(S0, 90.0, 1.0, 0.03, 0.3, 40)
            .unwrap()
            .with_contract(ty, ExerciseStyle::European);
        let bin = tri.with_steps(80).unwrap();
        assert_abs_diff_eq!(
            trinomial_price(&tri).unwrap(),
            binomial_price(&bin).unwrap(),
            epsilon = 1e-8
        );
    }
}

// ─── Greeks ───────────────────────────────────────────────────────────────────

#[test]
fn test_delta_bounds() {
    let e = BinomialEngine::new(S0, K, T, R, SIGMA, N).unwrap();
    let call = e.delta(OptionType::Call, ExerciseStyle::European).unwrap();
    let put = e.delta(OptionType::Put, ExerciseStyle::European).unwrap();
    assert!((0.0..=1.0).contains(&call), "call delta = {call:.4}");
    assert!((-1.0..=0.0).contains(&put), "put delta = {put:.4}");
    // European deltas differ by exactly one
    assert_abs_diff_eq!(call - put, 1.0, epsilon = 1e-10);
    let exact = black_scholes_merton(OptionType::Call, S0, K, R, SIGMA, T)
        .unwrap()
        .delta;
    assert_abs_diff_eq!(call, exact, epsilon = 0.01);
}

#[test]
fn test_vega_matches_closed_form() {
    let exact = black_scholes_merton(OptionType::Call, S0, K, R, SIGMA, T)
        .unwrap()
        .vega;
    let b = BinomialEngine::new(S0, K, T, R, SIGMA, N).unwrap();
    let t = TrinomialEngine::new(S0, K, T, R, SIGMA, N).unwrap();
    for vega in [
        b.vega(OptionType::Call, ExerciseStyle::European).unwrap(),
        t.vega(OptionType::Call, ExerciseStyle::European).unwrap(),
    ] {
        assert_abs_diff_eq!(vega, exact, epsilon = 0.5);
    }
    let american = b.vega(OptionType::Put, ExerciseStyle::American).unwrap();
    assert!(american > 0.0, "american put vega = {american:.4}");
}

#[test]
fn test_american_put_delta() {
    let e = TrinomialEngine::new(S0, K, T, R, SIGMA, N).unwrap();
    let d = e.delta(OptionType::Put, ExerciseStyle::American).unwrap();
    assert!((-1.0..=0.0).contains(&d), "delta = {d:.4}");
}

// ─── Errors ───────────────────────────────────────────────────────────────────

#[test]
fn test_invalid_inputs_are_rejected() {
    let cases = [
        (-1.0, K, T, R, SIGMA, N),
        (S0, 0.0, T, R, SIGMA, N),
        (S0, K, 0.0, R, SIGMA, N),
        (S0, K, T, R, -0.2, N),
        (S0, K, T, R, SIGMA, 0),
    ];
    for (s, k, t, r, v, n) in cases {
        assert!(matches!(
            BinomialEngine::new(s, k, t, r, v, n),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            TrinomialEngine::new(s, k, t, r, v, n),
            Err(Error::InvalidParameter(_))
        ));
    }
}

#[test]
fn test_probability_outside_unit_interval_is_invalid_model() {
    // r·√dt > σ pushes the up probability above one
    let spec = OptionSpec::new(S0, K, 1.0, 0.5, 0.05, 1).unwrap();
    assert!(matches!(binomial_price(&spec), Err(Error::InvalidModel(_))));
    assert!(matches!(trinomial_price(&spec), Err(Error::InvalidModel(_))));
}

// ─── Invariants over random inputs ───────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_parity_premium_and_delta_bounds(
        spot in 50.0..150.0f64,
        strike in 50.0..150.0f64,
        maturity in 0.1..2.0f64,
        rate in 0.0..0.1f64,
        vol in 0.1..0.5f64,
        steps in 10usize..120,
    ) {
        let base = OptionSpec::new(spot, strike, maturity, rate, vol, steps).unwrap();
        let e = BinomialEngine::from_spec(base).unwrap();

        let call = e.price(ExerciseStyle::European, OptionType::Call);
        let put = e.price(ExerciseStyle::European, OptionType::Put);
        prop_assert!((put + spot - call - strike * (-rate * maturity).exp()).abs() < 0.01);

        for ty in [OptionType::Call, OptionType::Put] {
            prop_assert!(
                e.price(ExerciseStyle::American, ty) >= e.price(ExerciseStyle::European, ty) - 1e-10
            );
        }

        let dc = e.delta(OptionType::Call, ExerciseStyle::European).unwrap();
        let dp = e.delta(OptionType::Put, ExerciseStyle::European).unwrap();
        prop_assert!((-1e-12..=1.0 + 1e-12).contains(&dc), "call delta {}", dc);
        prop_assert!((-1.0 - 1e-12..=1e-12).contains(&dp), "put delta {}", dp);
    }
}

//! Put–call parity for European options on a non-dividend-paying asset:
//! `C − P = S − K e^{−rT}`.

use ol_core::{Rate, Real, Time};

/// European put value implied by a call value.
pub fn put_from_call(call: Real, spot: Real, strike: Real, rate: Rate, maturity: Time) -> Real {
    call - spot + strike * (-rate * maturity).exp()
}

/// European call value implied by a put value.
pub fn call_from_put(put: Real, spot: Real, strike: Real, rate: Rate, maturity: Time) -> Real {
    put + spot - strike * (-rate * maturity).exp()
}

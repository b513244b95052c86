//! Pure criteria and formula evaluation.

use std::ops::RangeInclusive;

use quest::{Condition, Criteria, Param, ParamChange};
use tracing::trace;

use crate::RandomSource;

/// Evaluates jump show-criteria against the current values.
///
/// Empty criteria always hold. Range conditions include both ends. A
/// critical condition holds when the value sits on the param's critical
/// boundary and never holds for normal params.
#[must_use]
pub fn evaluate_criteria(criteria: &Criteria, params: &[Param], values: &[i32]) -> bool {
    criteria
        .conditions
        .iter()
        .all(|condition| evaluate_condition(*condition, params, values))
}

fn evaluate_condition(condition: Condition, params: &[Param], values: &[i32]) -> bool {
    let index = condition.param().index();
    let Some(&value) = values.get(index) else {
        return false;
    };
    match condition {
        Condition::InRange { lo, hi, .. } => (lo..=hi).contains(&value),
        Condition::Critical { .. } => params
            .get(index)
            .is_some_and(|param| param.is_critical_at(value)),
    }
}

/// Applies one formula to a value and clamps the result into `bounds`.
///
/// Only [`ParamChange::Random`] consumes a draw.
pub fn apply_change<R: RandomSource + ?Sized>(
    change: ParamChange,
    current: i32,
    bounds: RangeInclusive<i32>,
    rng: &mut R,
) -> i32 {
    let current = i64::from(current);
    let next = match change {
        ParamChange::Delta(delta) => current + i64::from(delta),
        ParamChange::Percent(percent) => current + percent_of(current, i64::from(percent)),
        ParamChange::Random { lo, hi } => {
            let roll = rng.range(i64::from(lo), i64::from(hi));
            trace!(lo, hi, roll, "random change");
            current + roll
        }
        ParamChange::Set(value) => i64::from(value),
    };
    let (min, max) = bounds.into_inner();
    next.clamp(i64::from(min), i64::from(max)) as i32
}

/// Applies a change list slot by slot in ascending order.
///
/// Changes to inactive params are skipped and draw nothing. Missing trailing
/// entries are no-ops.
pub fn apply_changes<R: RandomSource + ?Sized>(
    changes: &[ParamChange],
    params: &[Param],
    values: &mut [i32],
    rng: &mut R,
) {
    for ((param, value), change) in params.iter().zip(values.iter_mut()).zip(changes) {
        if !param.active || change.is_noop() {
            continue;
        }
        *value = apply_change(*change, *value, param.min..=param.max, rng);
    }
}

/// `value * percent / 100`, rounded half away from zero.
fn percent_of(value: i64, percent: i64) -> i64 {
    let product = value * percent;
    let quotient = product / 100;
    let remainder = product % 100;
    if remainder.abs() * 2 >= 100 {
        quotient + product.signum()
    } else {
        quotient
    }
}

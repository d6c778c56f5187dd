//! Advice aggregation

use crate::advice::Advice;

/// Finish a diagnostic list
///
/// An empty list gets the success sentinel so callers never see an empty
/// result. A non-empty list is returned unchanged.
pub fn finalize(mut advice: Vec<Advice>) -> Vec<Advice> {
    if advice.is_empty() {
        advice.push(Advice::ok());
    }
    advice
}

/// Merge the results of several rules into one list
///
/// Success sentinels of individual rules are dropped; the merged list is
/// expected to be finalized once by the caller.
pub fn merge<I>(results: I) -> Vec<Advice>
where
    I: IntoIterator<Item = Vec<Advice>>,
{
    results
        .into_iter()
        .flatten()
        .filter(|advice| !advice.is_success())
        .collect()
}

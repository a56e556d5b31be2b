//! What a flow does when one of its external calls fails.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Failure handling for the mind-map and speech flows.
///
/// `Degrade` logs the failure and substitutes an empty value (an empty mind
/// map, a zero-byte audio payload) so an enclosing workflow keeps running.
/// `Propagate` hands the error back to the caller.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FailurePolicy {
    #[default]
    Degrade,
    Propagate,
}

impl FailurePolicy {
    pub fn degrades(self) -> bool {
        self == Self::Degrade
    }
}

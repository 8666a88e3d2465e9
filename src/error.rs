// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error as ThisError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors returned by the fallible [`BPTree`][crate::BPTree] operations.
///
/// Lookups never fail: a missing key is an empty result, not an error.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Error {
    /// The tree was constructed with a branching factor below
    /// [`MIN_BRANCHING_FACTOR`][crate::config::MIN_BRANCHING_FACTOR].
    #[error("illegal branching factor: {branching_factor}")]
    Configuration { branching_factor: usize },

    /// An argument was absent or malformed. The tree is left untouched.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Range query predicates.

use std::fmt::{Display, Error, Formatter};

/// The predicate of a [`range_search`][crate::BPTree::range_search].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Comparator {
    /// `"<="`: every entry whose key is at most the target.
    LessOrEqual,
    /// `"=="`: the first entry whose key equals the target.
    Equal,
    /// `">="`: every entry whose key is at least the target.
    GreaterOrEqual,
}

impl Comparator {
    /// Parse one of the symbols `"<="`, `"=="` or `">="`.
    ///
    /// Anything else, including the empty string, gives `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bptree::Comparator;
    /// assert_eq!(Some(Comparator::GreaterOrEqual), Comparator::from_symbol(">="));
    /// assert_eq!(None, Comparator::from_symbol("<"));
    /// assert_eq!(None, Comparator::from_symbol(""));
    /// ```
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "<=" => Some(Comparator::LessOrEqual),
            "==" => Some(Comparator::Equal),
            ">=" => Some(Comparator::GreaterOrEqual),
            _ => None,
        }
    }

    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Comparator::LessOrEqual => "<=",
            Comparator::Equal => "==",
            Comparator::GreaterOrEqual => ">=",
        }
    }
}

impl Display for Comparator {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        f.write_str(self.symbol())
    }
}

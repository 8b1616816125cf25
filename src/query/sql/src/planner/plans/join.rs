// Copyright 2021 Datafuse Labs
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt::Display;
use std::fmt::Formatter;

use crate::plans::ComparisonOp;
use crate::plans::Operator;
use crate::plans::RelOp;
use crate::plans::ScalarExpr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Full,
    Cross,
    /// Keep the left rows that have at least one match on the right side,
    /// without duplicating them and without exposing right-side columns.
    Semi,
    /// Keep the left rows without any match on the right side. A NULL on
    /// either side of the primary equality makes the row count as matched,
    /// which is the NOT IN behavior.
    AntiNullAsTrue,
    /// Keep the left rows without any match on the right side. NULLs never
    /// match, which is the NOT EXISTS behavior.
    AntiNullAsFalse,
}

impl JoinType {
    /// Semi and anti joins are executed by the hash join, which requires an
    /// equality comparison as the primary join predicate.
    pub fn requires_equi_condition(&self) -> bool {
        matches!(
            self,
            JoinType::Semi | JoinType::AntiNullAsTrue | JoinType::AntiNullAsFalse
        )
    }
}

impl Display for JoinType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            JoinType::Inner => write!(f, "INNER"),
            JoinType::Left => write!(f, "LEFT OUTER"),
            JoinType::Right => write!(f, "RIGHT OUTER"),
            JoinType::Full => write!(f, "FULL OUTER"),
            JoinType::Cross => write!(f, "CROSS"),
            JoinType::Semi => write!(f, "SEMI"),
            JoinType::AntiNullAsTrue => write!(f, "ANTI (NULL AS TRUE)"),
            JoinType::AntiNullAsFalse => write!(f, "ANTI (NULL AS FALSE)"),
        }
    }
}

/// Join of two inputs on a list of comparison predicates. Cross joins carry
/// an empty predicate list. For the join types that require an equality
/// condition the first predicate of the list is the primary one.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Join {
    pub join_type: JoinType,
    pub predicates: Vec<ScalarExpr>,
}

impl Join {
    pub fn has_equi_condition(&self) -> bool {
        self.predicates.iter().any(|predicate| {
            matches!(
                predicate,
                ScalarExpr::ComparisonExpr(comparison) if comparison.op == ComparisonOp::Equal
            )
        })
    }
}

impl Operator for Join {
    fn rel_op(&self) -> RelOp {
        RelOp::Join
    }

    fn arity(&self) -> usize {
        2
    }
}

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

use crate::optimizer::SExpr;
use crate::plans::Operator;
use crate::plans::RelOp;
use crate::plans::RelOperator;

/// Describes the shape of a plan tree. Used by rules and tests to check
/// whether an [`SExpr`] matches an expected structure.
pub enum Matcher {
    /// Matches an operator of the given kind whose children match the given
    /// matchers one by one.
    MatchOp {
        op_type: RelOp,
        children: Vec<Matcher>,
    },
    /// Like `MatchOp`, with an arbitrary predicate over the operator.
    MatchFn {
        predicate: Box<dyn Fn(&RelOperator) -> bool>,
        children: Vec<Matcher>,
    },
    /// Matches any subtree.
    Leaf,
}

impl Matcher {
    pub fn matches(&self, s_expr: &SExpr) -> bool {
        match self {
            Matcher::MatchOp { op_type, children } => {
                *op_type == s_expr.plan().rel_op() && Self::matches_children(children, s_expr)
            }
            Matcher::MatchFn {
                predicate,
                children,
            } => predicate(s_expr.plan()) && Self::matches_children(children, s_expr),
            Matcher::Leaf => true,
        }
    }

    fn matches_children(children: &[Matcher], s_expr: &SExpr) -> bool {
        if children.len() != s_expr.arity() {
            return false;
        }

        children
            .iter()
            .zip(s_expr.children())
            .all(|(matcher, child)| matcher.matches(child))
    }
}

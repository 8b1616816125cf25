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

use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Arc;

use corvus_common_exception::Result;

use crate::metadata::ParameterIndex;
use crate::optimizer::SExpr;
use crate::plans::walk_expr;
use crate::plans::CorrelatedParameter;
use crate::plans::JoinType;
use crate::plans::Operator;
use crate::plans::RelOp;
use crate::plans::RelOperator;
use crate::plans::ScalarExpr;
use crate::plans::Visitor;

/// The correlated placeholders of one subquery, resolved to the outer-scope
/// expressions they stand for. Built per rewrite attempt, never persisted.
pub type ParameterMapping = HashMap<ParameterIndex, ScalarExpr>;

/// Which inputs of a node predicates may be pulled from without changing
/// the semantics of the plan.
///
/// Predicates can leave any non-null-producing side of a join; the right
/// side of semi and anti joins is not preserved, so nothing can be pulled
/// from there either. Single-input operators that keep row identity and
/// produce no new rows pass predicates through. Everything else stops the
/// traversal.
///
/// The predicate search and the plan adaption both traverse along these
/// sides; they rely on getting the same answer for the same node.
pub(crate) fn safe_recursion_sides(op: &RelOperator) -> (bool, bool) {
    match op {
        RelOperator::Join(join) => match join.join_type {
            JoinType::Inner | JoinType::Cross => (true, true),
            JoinType::Left
            | JoinType::Semi
            | JoinType::AntiNullAsTrue
            | JoinType::AntiNullAsFalse => (true, false),
            JoinType::Right => (false, true),
            JoinType::Full => (false, false),
        },
        RelOperator::Filter(_)
        | RelOperator::Aggregate(_)
        | RelOperator::Alias(_)
        | RelOperator::EvalScalar(_)
        | RelOperator::Sort(_)
        | RelOperator::Validate(_) => (true, false),
        _ => (false, false),
    }
}

/// Check whether any expression of the node references one of the
/// placeholders in `parameter_mapping`.
pub(crate) fn uses_correlated_parameters(
    op: &RelOperator,
    parameter_mapping: &ParameterMapping,
) -> bool {
    match op {
        RelOperator::Filter(filter) => filter
            .predicates
            .iter()
            .any(|predicate| scalar_uses_parameters(predicate, parameter_mapping)),
        RelOperator::Join(join) => join
            .predicates
            .iter()
            .any(|predicate| scalar_uses_parameters(predicate, parameter_mapping)),
        RelOperator::Aggregate(aggregate) => aggregate
            .group_items
            .iter()
            .chain(aggregate.aggregate_functions.iter())
            .any(|expr| scalar_uses_parameters(expr, parameter_mapping)),
        RelOperator::Alias(alias) => alias
            .items
            .iter()
            .any(|expr| scalar_uses_parameters(expr, parameter_mapping)),
        RelOperator::EvalScalar(eval_scalar) => eval_scalar
            .items
            .iter()
            .any(|expr| scalar_uses_parameters(expr, parameter_mapping)),
        RelOperator::Scan(_)
        | RelOperator::Sort(_)
        | RelOperator::Validate(_)
        | RelOperator::Limit(_)
        | RelOperator::UnionAll(_) => false,
    }
}

fn scalar_uses_parameters(expr: &ScalarExpr, parameter_mapping: &ParameterMapping) -> bool {
    struct ParameterVisitor<'m> {
        parameter_mapping: &'m ParameterMapping,
        found: bool,
    }

    impl<'a, 'm> Visitor<'a> for ParameterVisitor<'m> {
        fn visit(&mut self, expr: &'a ScalarExpr) -> Result<()> {
            // The expression is already known to be correlated, skip the
            // rest of it.
            if self.found {
                return Ok(());
            }
            walk_expr(self, expr)
        }

        fn visit_correlated_parameter(&mut self, param: &'a CorrelatedParameter) -> Result<()> {
            if self.parameter_mapping.contains_key(&param.parameter_index) {
                self.found = true;
            }
            Ok(())
        }
    }

    let mut visitor = ParameterVisitor {
        parameter_mapping,
        found: false,
    };
    visitor.visit(expr).unwrap();
    visitor.found
}

/// Scan a subquery plan for usages of correlated placeholders.
///
/// Returns whether the plan can be decorrelated at all, and how many filter
/// nodes use a placeholder. Every one of those filters must later be turned
/// into a join predicate for the rewrite to go ahead. A placeholder usage in
/// any other node kind makes the plan non-rewritable: only the removal of
/// whole filter nodes is understood, not the rewrite of correlated
/// projections, aggregations or join conditions.
///
/// Each node is visited once, no matter how many parents reference it.
pub(crate) fn assess_correlated_parameter_usage(
    plan: &SExpr,
    parameter_mapping: &ParameterMapping,
) -> (bool, usize) {
    let mut visited: HashSet<*const Vec<SExpr>> = HashSet::new();
    let mut stack = vec![plan];
    let mut correlated_predicate_count = 0;

    while let Some(s_expr) = stack.pop() {
        if uses_correlated_parameters(s_expr.plan(), parameter_mapping) {
            if s_expr.plan().rel_op() == RelOp::Filter {
                correlated_predicate_count += 1;
            } else {
                return (false, correlated_predicate_count);
            }
        }

        if visited.insert(Arc::as_ptr(&s_expr.children)) {
            stack.extend(s_expr.children().iter());
        }
    }

    (true, correlated_predicate_count)
}

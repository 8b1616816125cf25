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

use corvus_common_exception::Result;

use super::correlation::safe_recursion_sides;
use super::correlation::ParameterMapping;
use crate::optimizer::RelExpr;
use crate::optimizer::SExpr;
use crate::plans::ComparisonExpr;
use crate::plans::ComparisonOp;
use crate::plans::RelOperator;
use crate::plans::ScalarExpr;

/// Collect the correlated filter nodes of a subquery plan that can be
/// re-expressed as join predicates, together with the predicate each one
/// turns into. Traversal is left input first, restricted to the sides
/// [`safe_recursion_sides`] allows.
pub(crate) fn find_pullable_predicate_nodes(
    plan: &SExpr,
    parameter_mapping: &ParameterMapping,
) -> Result<Vec<(SExpr, ComparisonExpr)>> {
    let mut pullable_predicate_nodes = Vec::new();
    find_pullable_recursive(plan, parameter_mapping, false, &mut pullable_predicate_nodes)?;
    Ok(pullable_predicate_nodes)
}

#[recursive::recursive]
fn find_pullable_recursive(
    s_expr: &SExpr,
    parameter_mapping: &ParameterMapping,
    mut is_below_aggregate: bool,
    pullable_predicate_nodes: &mut Vec<(SExpr, ComparisonExpr)>,
) -> Result<()> {
    match s_expr.plan() {
        RelOperator::Filter(_) => {
            if let Some(predicate) =
                try_extract_join_predicate(s_expr, parameter_mapping, is_below_aggregate)?
            {
                pullable_predicate_nodes.push((s_expr.clone(), predicate));
            }
        }
        RelOperator::Aggregate(_) => {
            is_below_aggregate = true;
        }
        _ => (),
    }

    let (recurse_left, recurse_right) = safe_recursion_sides(s_expr.plan());
    if recurse_left {
        find_pullable_recursive(
            s_expr.child(0)?,
            parameter_mapping,
            is_below_aggregate,
            pullable_predicate_nodes,
        )?;
    }
    if recurse_right {
        find_pullable_recursive(
            s_expr.child(1)?,
            parameter_mapping,
            is_below_aggregate,
            pullable_predicate_nodes,
        )?;
    }

    Ok(())
}

/// Try to turn the predicate of a correlated filter node into a join
/// predicate of the form `(outer expression) <op> (subquery column)`.
///
/// The filter must hold a single binary comparison between a correlated
/// placeholder bound in `parameter_mapping` and a column produced by the
/// filter's own input. When the placeholder sits on the right, the
/// comparison is reversed so the outer expression ends up on the left.
/// Beneath an aggregation only equality predicates can be pulled up; the
/// needed column survives the aggregation by being added to the group key,
/// which works for no other comparison.
pub fn try_extract_join_predicate(
    s_expr: &SExpr,
    parameter_mapping: &ParameterMapping,
    is_below_aggregate: bool,
) -> Result<Option<ComparisonExpr>> {
    let RelOperator::Filter(filter) = s_expr.plan() else {
        return Ok(None);
    };

    // AND chains are split into separate filters by the scalar normalizer;
    // a node still holding several predicates cannot be removed as a whole.
    if filter.predicates.len() != 1 {
        return Ok(None);
    }
    let ScalarExpr::ComparisonExpr(comparison) = &filter.predicates[0] else {
        return Ok(None);
    };

    if is_below_aggregate && comparison.op != ComparisonOp::Equal {
        return Ok(None);
    }

    let (parameter_index, op, column_expr) =
        match (comparison.left.as_ref(), comparison.right.as_ref()) {
            (ScalarExpr::CorrelatedParameter(param), other) => {
                (param.parameter_index, comparison.op, other)
            }
            (other, ScalarExpr::CorrelatedParameter(param)) => {
                (param.parameter_index, comparison.op.reverse(), other)
            }
            _ => return Ok(None),
        };

    // Join predicates need columns on both sides.
    let ScalarExpr::BoundColumnRef(column_ref) = column_expr else {
        return Ok(None);
    };
    let input_prop = RelExpr::with_s_expr(s_expr).derive_relational_prop_child(0)?;
    if !input_prop.output_columns.contains(&column_ref.column.index) {
        return Ok(None);
    }

    // Placeholders of enclosing scopes and prepared-statement parameters
    // are not bound here and stay untouched.
    let Some(outer_expr) = parameter_mapping.get(&parameter_index) else {
        return Ok(None);
    };

    Ok(Some(ComparisonExpr {
        op,
        left: Box::new(outer_expr.clone()),
        right: Box::new(column_expr.clone()),
    }))
}

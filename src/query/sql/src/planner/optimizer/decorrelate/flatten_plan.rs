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

use corvus_common_exception::ErrorCode;
use corvus_common_exception::Result;

use super::correlation::safe_recursion_sides;
use crate::format::format_scalar;
use crate::optimizer::SExpr;
use crate::plans::Aggregate;
use crate::plans::Alias;
use crate::plans::ComparisonExpr;
use crate::plans::EvalScalar;
use crate::plans::Operator;
use crate::plans::RelOperator;
use crate::plans::ScalarExpr;

/// Rebuild a subquery plan with the pullable filter nodes removed.
///
/// Recurses along the safe sides first and keeps the column expressions the
/// removed filters' join predicates refer to. Nodes above a removed filter
/// are adapted so those columns stay reachable at the top of the plan:
/// aggregations group by them, aliases and projections expose them. Every
/// node on a mutation path is rebuilt; a node whose subtree is untouched is
/// reused by reference, since other parents may still point at it.
///
/// Returns the adapted plan and the required column expressions,
/// de-duplicated, left-input columns first.
#[recursive::recursive]
pub(crate) fn flatten_plan(
    s_expr: &SExpr,
    pullable_predicate_nodes: &[(SExpr, ComparisonExpr)],
) -> Result<(SExpr, Vec<ScalarExpr>)> {
    let (recurse_left, recurse_right) = safe_recursion_sides(s_expr.plan());

    let mut left_input = s_expr.children().first().cloned();
    let mut right_input = s_expr.children().get(1).cloned();
    let mut required_column_exprs: Vec<ScalarExpr> = Vec::new();

    if recurse_left {
        let (plan, required) = flatten_plan(s_expr.child(0)?, pullable_predicate_nodes)?;
        left_input = Some(plan);
        required_column_exprs = required;
    }
    if recurse_right {
        let (plan, required) = flatten_plan(s_expr.child(1)?, pullable_predicate_nodes)?;
        right_input = Some(plan);
        required_column_exprs.extend(required);
    }

    match s_expr.plan() {
        RelOperator::Filter(filter) => {
            let input = expect_input(left_input)?;
            if let Some((_, predicate)) = pullable_predicate_nodes
                .iter()
                .find(|(node, _)| node == s_expr)
            {
                // The filter leaves the plan; its subquery-side column must
                // stay visible for the join predicate built from it.
                let column_expr = (*predicate.right).clone();
                if !required_column_exprs.contains(&column_expr) {
                    required_column_exprs.push(column_expr);
                }
                Ok((input, required_column_exprs))
            } else {
                Ok((
                    SExpr::create_unary(RelOperator::Filter(filter.clone()), input),
                    required_column_exprs,
                ))
            }
        }

        RelOperator::Aggregate(aggregate) => {
            let input = expect_input(left_input)?;
            let mut group_items = aggregate.group_items.clone();
            for expr in required_column_exprs.iter() {
                if !aggregate.group_items.contains(expr) {
                    group_items.push(expr.clone());
                }
            }
            let adapted = Aggregate {
                group_items,
                aggregate_functions: aggregate.aggregate_functions.clone(),
            };
            Ok((
                SExpr::create_unary(adapted.into(), input),
                required_column_exprs,
            ))
        }

        RelOperator::Alias(alias) => {
            let input = expect_input(left_input)?;
            // Append the missing columns without de-duplicating what is
            // already aliased.
            let mut items = alias.items.clone();
            let mut names = alias.names.clone();
            for expr in required_column_exprs.iter() {
                if !alias.items.contains(expr) {
                    items.push(expr.clone());
                    names.push(derived_column_name(expr));
                }
            }
            let adapted = Alias { items, names };
            Ok((
                SExpr::create_unary(adapted.into(), input),
                required_column_exprs,
            ))
        }

        RelOperator::EvalScalar(eval_scalar) => {
            let input = expect_input(left_input)?;
            let mut items = eval_scalar.items.clone();
            for expr in required_column_exprs.iter() {
                if !eval_scalar.items.contains(expr) {
                    items.push(expr.clone());
                }
            }
            let adapted = EvalScalar { items };
            Ok((
                SExpr::create_unary(adapted.into(), input),
                required_column_exprs,
            ))
        }

        RelOperator::Sort(_) | RelOperator::Validate(_) => {
            let input = expect_input(left_input)?;
            Ok((s_expr.replace_children(vec![input]), required_column_exprs))
        }

        RelOperator::Join(_) => {
            let left = expect_input(left_input)?;
            let right = expect_input(right_input)?;
            Ok((
                s_expr.replace_children(vec![left, right]),
                required_column_exprs,
            ))
        }

        op => {
            // Anything else terminates the traversal and needs no
            // adaption, so the node is shared as-is.
            if recurse_left || recurse_right {
                return Err(ErrorCode::Internal(format!(
                    "Operator {:?} stops the predicate search but was recursed into",
                    op.rel_op()
                )));
            }
            Ok((s_expr.clone(), required_column_exprs))
        }
    }
}

fn expect_input(input: Option<SExpr>) -> Result<SExpr> {
    input.ok_or_else(|| ErrorCode::Internal("Operator is missing a required input"))
}

fn derived_column_name(expr: &ScalarExpr) -> String {
    match expr {
        ScalarExpr::BoundColumnRef(column_ref) => column_ref.column.column_name.clone(),
        _ => format_scalar(expr),
    }
}

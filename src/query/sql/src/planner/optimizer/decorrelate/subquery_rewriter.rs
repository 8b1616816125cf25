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
use log::debug;

use super::correlation::assess_correlated_parameter_usage;
use super::correlation::ParameterMapping;
use super::flatten_plan::flatten_plan;
use super::pull_up::find_pullable_predicate_nodes;
use crate::optimizer::RelExpr;
use crate::optimizer::SExpr;
use crate::plans::ComparisonExpr;
use crate::plans::ComparisonOp;
use crate::plans::Join;
use crate::plans::JoinType;
use crate::plans::RelOperator;
use crate::plans::ScalarExpr;
use crate::plans::SubqueryExpr;

/// How a filter predicate over a subquery maps onto a join: the subquery
/// expression itself, the join type implied by the predicate shape, and the
/// join predicate the shape contributes, if any.
pub struct SubqueryInfo {
    pub subquery: SubqueryExpr,
    pub join_type: JoinType,
    pub base_predicate: Option<ComparisonExpr>,
}

/// Rewrites IN, EXISTS and comparison predicates over subqueries into semi
/// and anti joins against the subquery plan, so the subquery is evaluated
/// once instead of once per outer row.
///
/// The rewrite is applied whenever it is legal; benchmarking has shown the
/// join form to win independently of table sizes. Plans that cannot be
/// rewritten are left untouched and still execute correctly through
/// per-row subquery evaluation.
pub struct SubqueryRewriter;

impl SubqueryRewriter {
    pub fn new() -> Self {
        SubqueryRewriter
    }

    /// Rewrite all eligible subquery predicates below (and including)
    /// `s_expr`, top-down. Applying the rewriter to its own output is a
    /// no-op: installed joins no longer match any of the handled shapes.
    #[recursive::recursive]
    pub fn rewrite(&self, s_expr: &SExpr) -> Result<SExpr> {
        if let Some(join_expr) = self.try_rewrite_filter(s_expr)? {
            let left = self.rewrite(join_expr.child(0)?)?;
            let right = self.rewrite(join_expr.child(1)?)?;
            return Ok(join_expr.replace_children(vec![left, right]));
        }

        if s_expr.arity() == 0 {
            return Ok(s_expr.clone());
        }
        let mut children = Vec::with_capacity(s_expr.arity());
        for child in s_expr.children() {
            children.push(self.rewrite(child)?);
        }
        Ok(s_expr.replace_children(children))
    }

    /// Attempt the subquery-to-join rewrite on a single node. `None` means
    /// the node does not match a handled shape or the subquery cannot be
    /// fully decorrelated; the caller leaves the node in place either way.
    fn try_rewrite_filter(&self, s_expr: &SExpr) -> Result<Option<SExpr>> {
        let Some(subquery_info) = extract_subquery_info(s_expr)? else {
            return Ok(None);
        };

        let parameter_mapping = build_parameter_mapping(&subquery_info.subquery)?;
        let subquery_plan = subquery_info.subquery.subquery.as_ref();

        let (optimizable, correlated_predicate_count) =
            assess_correlated_parameter_usage(subquery_plan, &parameter_mapping);
        if !optimizable {
            return Ok(None);
        }

        let pullable_predicate_nodes =
            find_pullable_predicate_nodes(subquery_plan, &parameter_mapping)?;
        if pullable_predicate_nodes.len() != correlated_predicate_count {
            // Some correlated filter cannot be turned into a join
            // predicate.
            debug_assert!(
                pullable_predicate_nodes.len() < correlated_predicate_count,
                "scan for correlated predicate nodes is inconsistent"
            );
            return Ok(None);
        }

        let (flattened_plan, _) = flatten_plan(subquery_plan, &pullable_predicate_nodes)?;

        // Semi and anti joins are executed by the hash join, which needs an
        // equality comparison as the primary join predicate: move one to
        // the front, or give up.
        let mut join_predicates =
            Vec::with_capacity(pullable_predicate_nodes.len() + usize::from(subquery_info.base_predicate.is_some()));
        let mut found_equi_condition = false;
        if let Some(base_predicate) = subquery_info.base_predicate {
            found_equi_condition = base_predicate.op == ComparisonOp::Equal;
            join_predicates.push(base_predicate);
        }
        for (_, predicate) in pullable_predicate_nodes {
            let is_equi_condition = predicate.op == ComparisonOp::Equal;
            join_predicates.push(predicate);
            if !found_equi_condition && is_equi_condition {
                let last = join_predicates.len() - 1;
                join_predicates.swap(0, last);
                found_equi_condition = true;
            }
        }
        if join_predicates.is_empty() || !found_equi_condition {
            return Ok(None);
        }

        debug!(
            "Rewriting subquery predicate into {} join with {} predicate(s)",
            subquery_info.join_type,
            join_predicates.len()
        );

        let join = Join {
            join_type: subquery_info.join_type,
            predicates: join_predicates
                .into_iter()
                .map(ScalarExpr::ComparisonExpr)
                .collect(),
        };
        Ok(Some(SExpr::create_binary(
            join.into(),
            s_expr.child(0)?.clone(),
            flattened_plan,
        )))
    }
}

impl Default for SubqueryRewriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Match a filter node against the predicate shapes that can become a join:
///
/// 1. `expr [NOT] IN (subquery)`, where the set is a subquery rather than a
///    literal list. Semi join, or anti join with NULL-as-true semantics for
///    NOT IN. Correlated NOT IN is not rewritten at all: a NULL produced by
///    a pulled-up predicate would change the membership result, which a
///    join treating all its predicates equivalently cannot express.
/// 2. `expr <op> (subquery)` or `(subquery) <op> expr`. Semi join; the
///    comparison is reversed when the subquery sits on the left so the
///    outer expression always ends up on the left of the join predicate.
/// 3. `[NOT] EXISTS (subquery)`. Semi join, or anti join with NULL-as-false
///    semantics. Uncorrelated EXISTS contributes no join predicate and
///    cannot be expressed as a join.
///
/// For the comparison shapes the outer operand must be a column the
/// filter's input produces, and the subquery must expose exactly one output
/// column; the latter is an invariant of the translation and its violation
/// is an internal error.
pub fn extract_subquery_info(s_expr: &SExpr) -> Result<Option<SubqueryInfo>> {
    let RelOperator::Filter(filter) = s_expr.plan() else {
        return Ok(None);
    };
    if filter.predicates.len() != 1 {
        return Ok(None);
    }

    match &filter.predicates[0] {
        ScalarExpr::InExpr(in_expr) => {
            let ScalarExpr::SubqueryExpr(subquery) = in_expr.set.as_ref() else {
                return Ok(None);
            };
            if in_expr.negated && subquery.is_correlated() {
                return Ok(None);
            }
            let join_type = if in_expr.negated {
                JoinType::AntiNullAsTrue
            } else {
                JoinType::Semi
            };
            build_comparison_info(s_expr, subquery, &in_expr.value, ComparisonOp::Equal, join_type)
        }
        ScalarExpr::ComparisonExpr(comparison) => {
            let (subquery, outer_expr, op) =
                match (comparison.left.as_ref(), comparison.right.as_ref()) {
                    (ScalarExpr::SubqueryExpr(subquery), other) => {
                        (subquery, other, comparison.op.reverse())
                    }
                    (other, ScalarExpr::SubqueryExpr(subquery)) => (subquery, other, comparison.op),
                    _ => return Ok(None),
                };
            build_comparison_info(s_expr, subquery, outer_expr, op, JoinType::Semi)
        }
        ScalarExpr::ExistsExpr(exists) => {
            if !exists.subquery.is_correlated() {
                return Ok(None);
            }
            let join_type = if exists.negated {
                JoinType::AntiNullAsFalse
            } else {
                JoinType::Semi
            };
            Ok(Some(SubqueryInfo {
                subquery: (*exists.subquery).clone(),
                join_type,
                base_predicate: None,
            }))
        }
        _ => Ok(None),
    }
}

fn build_comparison_info(
    s_expr: &SExpr,
    subquery: &SubqueryExpr,
    outer_expr: &ScalarExpr,
    op: ComparisonOp,
    join_type: JoinType,
) -> Result<Option<SubqueryInfo>> {
    // The outer operand becomes one side of a join predicate, so it must be
    // a column the outer input produces.
    let ScalarExpr::BoundColumnRef(column_ref) = outer_expr else {
        return Ok(None);
    };
    let input_prop = RelExpr::with_s_expr(s_expr).derive_relational_prop_child(0)?;
    if !input_prop.output_columns.contains(&column_ref.column.index) {
        return Ok(None);
    }

    let subquery_prop = RelExpr::with_s_expr(&subquery.subquery).derive_relational_prop()?;
    if subquery_prop.output_exprs.len() != 1 {
        return Err(ErrorCode::Internal(format!(
            "IN/comparison subquery must produce a single output column, got {}",
            subquery_prop.output_exprs.len()
        )));
    }

    let base_predicate = ComparisonExpr {
        op,
        left: Box::new(outer_expr.clone()),
        right: Box::new(subquery_prop.output_exprs[0].clone()),
    };
    Ok(Some(SubqueryInfo {
        subquery: subquery.clone(),
        join_type,
        base_predicate: Some(base_predicate),
    }))
}

fn build_parameter_mapping(subquery: &SubqueryExpr) -> Result<ParameterMapping> {
    if subquery.parameter_indexes.len() != subquery.parameter_exprs.len() {
        return Err(ErrorCode::Internal(format!(
            "Subquery binds {} parameter indexes to {} outer expressions",
            subquery.parameter_indexes.len(),
            subquery.parameter_exprs.len()
        )));
    }

    let mut parameter_mapping = ParameterMapping::new();
    for (parameter_index, outer_expr) in subquery
        .parameter_indexes
        .iter()
        .zip(subquery.parameter_exprs.iter())
    {
        if parameter_mapping
            .insert(*parameter_index, outer_expr.clone())
            .is_some()
        {
            return Err(ErrorCode::Internal(format!(
                "Duplicate subquery parameter index {}",
                parameter_index
            )));
        }
    }
    Ok(parameter_mapping)
}

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

use itertools::Itertools;

use crate::optimizer::SExpr;
use crate::plans::RelOperator;
use crate::plans::ScalarExpr;

pub fn format_scalar(scalar: &ScalarExpr) -> String {
    match scalar {
        ScalarExpr::BoundColumnRef(column_ref) => {
            if let Some(table_name) = &column_ref.column.table_name {
                format!(
                    "{}.{} (#{})",
                    table_name, column_ref.column.column_name, column_ref.column.index
                )
            } else {
                format!(
                    "{} (#{})",
                    column_ref.column.column_name, column_ref.column.index
                )
            }
        }
        ScalarExpr::ConstantExpr(constant) => constant.value.to_string(),
        ScalarExpr::FunctionCall(func) => {
            format!(
                "{}({})",
                &func.func_name,
                func.arguments.iter().map(format_scalar).join(", ")
            )
        }
        ScalarExpr::CastExpr(cast) => {
            format!(
                "CAST({} AS {})",
                format_scalar(&cast.argument),
                cast.target_type
            )
        }
        ScalarExpr::AggregateFunction(agg) => agg.display_name.clone(),
        ScalarExpr::ComparisonExpr(comparison) => {
            format!(
                "{}({}, {})",
                comparison.op.to_func_name(),
                format_scalar(&comparison.left),
                format_scalar(&comparison.right)
            )
        }
        ScalarExpr::InExpr(in_expr) => {
            format!(
                "{}{} IN {}",
                format_scalar(&in_expr.value),
                if in_expr.negated { " NOT" } else { "" },
                format_scalar(&in_expr.set)
            )
        }
        ScalarExpr::ExistsExpr(exists) => {
            if exists.negated {
                "NOT EXISTS (SUBQUERY)".to_string()
            } else {
                "EXISTS (SUBQUERY)".to_string()
            }
        }
        ScalarExpr::CorrelatedParameter(param) => format!("?{}", param.parameter_index),
        ScalarExpr::SubqueryExpr(_) => "SUBQUERY".to_string(),
    }
}

impl SExpr {
    /// Render the plan tree as an indented listing, for diagnostics.
    pub fn to_format_tree(&self) -> String {
        let mut output = String::new();
        format_s_expr(self, 0, &mut output);
        output
    }
}

fn format_s_expr(s_expr: &SExpr, indent: usize, output: &mut String) {
    output.push_str(&"    ".repeat(indent));
    output.push_str(&format_operator(s_expr.plan()));
    output.push('\n');
    for child in s_expr.children() {
        format_s_expr(child, indent + 1, output);
    }
}

fn format_operator(op: &RelOperator) -> String {
    match op {
        RelOperator::Scan(scan) => format!("Scan: {} (#{})", scan.table_name, scan.table_index),
        RelOperator::Join(join) => format!(
            "Join ({}): [{}]",
            join.join_type,
            join.predicates.iter().map(format_scalar).join(", ")
        ),
        RelOperator::Filter(filter) => format!(
            "Filter: [{}]",
            filter.predicates.iter().map(format_scalar).join(", ")
        ),
        RelOperator::Aggregate(aggregate) => format!(
            "Aggregate: group items: [{}], aggregate functions: [{}]",
            aggregate.group_items.iter().map(format_scalar).join(", "),
            aggregate
                .aggregate_functions
                .iter()
                .map(format_scalar)
                .join(", ")
        ),
        RelOperator::Alias(alias) => format!("Alias: [{}]", alias.names.iter().join(", ")),
        RelOperator::EvalScalar(eval_scalar) => format!(
            "EvalScalar: [{}]",
            eval_scalar.items.iter().map(format_scalar).join(", ")
        ),
        RelOperator::Sort(sort) => format!(
            "Sort: [{}]",
            sort.items
                .iter()
                .map(|item| format!(
                    "#{} {}",
                    item.index,
                    if item.asc { "ASC" } else { "DESC" }
                ))
                .join(", ")
        ),
        RelOperator::Validate(_) => "Validate".to_string(),
        RelOperator::Limit(limit) => format!(
            "Limit: [{}], Offset: [{}]",
            limit
                .limit
                .map_or("NONE".to_string(), |limit| limit.to_string()),
            limit.offset
        ),
        RelOperator::UnionAll(_) => "UnionAll".to_string(),
    }
}

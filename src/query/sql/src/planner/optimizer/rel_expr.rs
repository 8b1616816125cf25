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

use std::sync::Arc;

use corvus_common_exception::Result;

use crate::metadata::ColumnSet;
use crate::optimizer::SExpr;
use crate::plans::BoundColumnRef;
use crate::plans::JoinType;
use crate::plans::RelOperator;
use crate::plans::ScalarExpr;

/// Wrapper around [`SExpr`] that derives the relational property of the
/// wrapped expression and caches it on the expression.
pub struct RelExpr<'a> {
    s_expr: &'a SExpr,
}

/// The columns an expression exposes to its parents. `output_exprs` is the
/// ordered output; `output_columns` is the set of column indexes among them.
#[derive(Clone, Debug, Default)]
pub struct RelationalProperty {
    pub output_exprs: Vec<ScalarExpr>,
    pub output_columns: ColumnSet,
}

impl RelationalProperty {
    pub fn with_output_exprs(output_exprs: Vec<ScalarExpr>) -> Self {
        let mut output_columns = ColumnSet::new();
        for expr in output_exprs.iter() {
            if let ScalarExpr::BoundColumnRef(column_ref) = expr {
                output_columns.insert(column_ref.column.index);
            }
        }
        RelationalProperty {
            output_exprs,
            output_columns,
        }
    }
}

impl<'a> RelExpr<'a> {
    pub fn with_s_expr(s_expr: &'a SExpr) -> Self {
        RelExpr { s_expr }
    }

    pub fn derive_relational_prop(&self) -> Result<Arc<RelationalProperty>> {
        if let Some(rel_prop) = self.s_expr.rel_prop.lock().unwrap().as_ref() {
            return Ok(rel_prop.clone());
        }
        let rel_prop = self.derive()?;
        *self.s_expr.rel_prop.lock().unwrap() = Some(rel_prop.clone());
        Ok(rel_prop)
    }

    pub fn derive_relational_prop_child(&self, n: usize) -> Result<Arc<RelationalProperty>> {
        let child = self.s_expr.child(n)?;
        RelExpr::with_s_expr(child).derive_relational_prop()
    }

    fn derive(&self) -> Result<Arc<RelationalProperty>> {
        match self.s_expr.plan() {
            RelOperator::Scan(scan) => {
                let output_exprs = scan
                    .columns
                    .iter()
                    .map(|column| {
                        ScalarExpr::BoundColumnRef(BoundColumnRef {
                            span: None,
                            column: column.clone(),
                        })
                    })
                    .collect();
                Ok(Arc::new(RelationalProperty::with_output_exprs(
                    output_exprs,
                )))
            }

            RelOperator::EvalScalar(eval_scalar) => Ok(Arc::new(
                RelationalProperty::with_output_exprs(eval_scalar.items.clone()),
            )),

            RelOperator::Alias(alias) => Ok(Arc::new(RelationalProperty::with_output_exprs(
                alias.items.clone(),
            ))),

            RelOperator::Aggregate(aggregate) => {
                let mut output_exprs = aggregate.group_items.clone();
                output_exprs.extend(aggregate.aggregate_functions.iter().cloned());
                Ok(Arc::new(RelationalProperty::with_output_exprs(
                    output_exprs,
                )))
            }

            // Single-input operators that expose their input unchanged.
            RelOperator::Filter(_)
            | RelOperator::Sort(_)
            | RelOperator::Validate(_)
            | RelOperator::Limit(_) => self.derive_relational_prop_child(0),

            RelOperator::Join(join) => match join.join_type {
                // Right-side columns of semi and anti joins are not
                // preserved.
                JoinType::Semi | JoinType::AntiNullAsTrue | JoinType::AntiNullAsFalse => {
                    self.derive_relational_prop_child(0)
                }
                _ => {
                    let left_prop = self.derive_relational_prop_child(0)?;
                    let right_prop = self.derive_relational_prop_child(1)?;
                    let mut output_exprs = left_prop.output_exprs.clone();
                    output_exprs.extend(right_prop.output_exprs.iter().cloned());
                    Ok(Arc::new(RelationalProperty::with_output_exprs(
                        output_exprs,
                    )))
                }
            },

            RelOperator::UnionAll(_) => self.derive_relational_prop_child(0),
        }
    }
}

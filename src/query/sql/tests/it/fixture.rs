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

use corvus_common_expression::types::DataType;
use corvus_common_expression::types::NumberDataType;
use corvus_common_expression::NumberScalar;
use corvus_common_expression::Scalar;
use corvus_common_sql::optimizer::SExpr;
use corvus_common_sql::plans::Aggregate;
use corvus_common_sql::plans::Alias;
use corvus_common_sql::plans::BoundColumnRef;
use corvus_common_sql::plans::ComparisonExpr;
use corvus_common_sql::plans::ComparisonOp;
use corvus_common_sql::plans::ConstantExpr;
use corvus_common_sql::plans::CorrelatedParameter;
use corvus_common_sql::plans::EvalScalar;
use corvus_common_sql::plans::ExistsExpr;
use corvus_common_sql::plans::Filter;
use corvus_common_sql::plans::InExpr;
use corvus_common_sql::plans::Join;
use corvus_common_sql::plans::JoinType;
use corvus_common_sql::plans::ScalarExpr;
use corvus_common_sql::plans::Scan;
use corvus_common_sql::plans::Sort;
use corvus_common_sql::plans::SortItem;
use corvus_common_sql::plans::SubqueryExpr;
use corvus_common_sql::plans::Validate;
use corvus_common_sql::ColumnBinding;
use corvus_common_sql::ColumnBindingBuilder;
use corvus_common_sql::IndexType;
use corvus_common_sql::ParameterIndex;
use corvus_common_sql::Visibility;

pub fn int32_column(
    table_name: &str,
    table_index: IndexType,
    column_name: &str,
    index: IndexType,
) -> ColumnBinding {
    ColumnBindingBuilder::new(
        column_name.to_string(),
        index,
        Box::new(DataType::Number(NumberDataType::Int32)),
        Visibility::Visible,
    )
    .table_name(Some(table_name.to_string()))
    .table_index(Some(table_index))
    .build()
}

/// Table `a(x, w)`, columns #0 and #1.
pub fn table_a() -> (SExpr, ColumnBinding, ColumnBinding) {
    let x = int32_column("a", 0, "x", 0);
    let w = int32_column("a", 0, "w", 1);
    let scan = table_scan(0, "a", vec![x.clone(), w.clone()]);
    (scan, x, w)
}

/// Table `b(y, z, s)`, columns #2, #3 and #4.
pub fn table_b() -> (SExpr, ColumnBinding, ColumnBinding, ColumnBinding) {
    let y = int32_column("b", 1, "y", 2);
    let z = int32_column("b", 1, "z", 3);
    let s = int32_column("b", 1, "s", 4);
    let scan = table_scan(1, "b", vec![y.clone(), z.clone(), s.clone()]);
    (scan, y, z, s)
}

/// Table `c(u, v)`, columns #5 and #6.
pub fn table_c() -> (SExpr, ColumnBinding, ColumnBinding) {
    let u = int32_column("c", 2, "u", 5);
    let v = int32_column("c", 2, "v", 6);
    let scan = table_scan(2, "c", vec![u.clone(), v.clone()]);
    (scan, u, v)
}

pub fn table_scan(table_index: IndexType, table_name: &str, columns: Vec<ColumnBinding>) -> SExpr {
    SExpr::create_leaf(
        Scan {
            table_index,
            table_name: table_name.to_string(),
            columns,
        }
        .into(),
    )
}

pub fn column_ref(column: &ColumnBinding) -> ScalarExpr {
    ScalarExpr::BoundColumnRef(BoundColumnRef {
        span: None,
        column: column.clone(),
    })
}

pub fn int_const(value: i32) -> ScalarExpr {
    ScalarExpr::ConstantExpr(ConstantExpr {
        span: None,
        value: Scalar::Number(NumberScalar::Int32(value)),
    })
}

pub fn parameter(parameter_index: ParameterIndex) -> ScalarExpr {
    ScalarExpr::CorrelatedParameter(CorrelatedParameter {
        span: None,
        parameter_index,
    })
}

pub fn comparison(op: ComparisonOp, left: ScalarExpr, right: ScalarExpr) -> ScalarExpr {
    ScalarExpr::ComparisonExpr(ComparisonExpr {
        op,
        left: Box::new(left),
        right: Box::new(right),
    })
}

pub fn eq(left: ScalarExpr, right: ScalarExpr) -> ScalarExpr {
    comparison(ComparisonOp::Equal, left, right)
}

pub fn subquery_expr(plan: SExpr, parameters: Vec<(ParameterIndex, ScalarExpr)>) -> SubqueryExpr {
    let (parameter_indexes, parameter_exprs) = parameters.into_iter().unzip();
    SubqueryExpr {
        span: None,
        subquery: Box::new(plan),
        parameter_indexes,
        parameter_exprs,
    }
}

pub fn in_expr(value: ScalarExpr, set: ScalarExpr, negated: bool) -> ScalarExpr {
    ScalarExpr::InExpr(InExpr {
        span: None,
        value: Box::new(value),
        set: Box::new(set),
        negated,
    })
}

pub fn exists_expr(subquery: SubqueryExpr, negated: bool) -> ScalarExpr {
    ScalarExpr::ExistsExpr(ExistsExpr {
        span: None,
        subquery: Box::new(subquery),
        negated,
    })
}

pub fn filter(predicates: Vec<ScalarExpr>, child: SExpr) -> SExpr {
    SExpr::create_unary(Filter { predicates }.into(), child)
}

pub fn eval_scalar(items: Vec<ScalarExpr>, child: SExpr) -> SExpr {
    SExpr::create_unary(EvalScalar { items }.into(), child)
}

pub fn aggregate(
    group_items: Vec<ScalarExpr>,
    aggregate_functions: Vec<ScalarExpr>,
    child: SExpr,
) -> SExpr {
    SExpr::create_unary(
        Aggregate {
            group_items,
            aggregate_functions,
        }
        .into(),
        child,
    )
}

pub fn alias(items: Vec<ScalarExpr>, names: Vec<&str>, child: SExpr) -> SExpr {
    SExpr::create_unary(
        Alias {
            items,
            names: names.into_iter().map(String::from).collect(),
        }
        .into(),
        child,
    )
}

pub fn sort_by(index: IndexType, child: SExpr) -> SExpr {
    SExpr::create_unary(
        Sort {
            items: vec![SortItem {
                index,
                asc: true,
                nulls_first: false,
            }],
        }
        .into(),
        child,
    )
}

pub fn validate(child: SExpr) -> SExpr {
    SExpr::create_unary(Validate {}.into(), child)
}

pub fn join(
    join_type: JoinType,
    predicates: Vec<ScalarExpr>,
    left: SExpr,
    right: SExpr,
) -> SExpr {
    SExpr::create_binary(
        Join {
            join_type,
            predicates,
        }
        .into(),
        left,
        right,
    )
}

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

mod aggregate;
mod alias;
mod eval_scalar;
mod filter;
mod join;
mod limit;
mod operator;
mod scalar_expr;
mod scan;
mod sort;
mod union_all;
mod validate;

pub use aggregate::Aggregate;
pub use alias::Alias;
pub use eval_scalar::EvalScalar;
pub use filter::Filter;
pub use join::Join;
pub use join::JoinType;
pub use limit::Limit;
pub use operator::Operator;
pub use operator::RelOp;
pub use operator::RelOperator;
pub use scalar_expr::walk_expr;
pub use scalar_expr::AggregateFunction;
pub use scalar_expr::BoundColumnRef;
pub use scalar_expr::CastExpr;
pub use scalar_expr::ComparisonExpr;
pub use scalar_expr::ComparisonOp;
pub use scalar_expr::ConstantExpr;
pub use scalar_expr::CorrelatedParameter;
pub use scalar_expr::ExistsExpr;
pub use scalar_expr::FunctionCall;
pub use scalar_expr::InExpr;
pub use scalar_expr::ScalarExpr;
pub use scalar_expr::SubqueryExpr;
pub use scalar_expr::Visitor;
pub use scan::Scan;
pub use sort::Sort;
pub use sort::SortItem;
pub use union_all::UnionAll;
pub use validate::Validate;

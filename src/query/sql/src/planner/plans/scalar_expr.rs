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

use std::hash::Hash;
use std::hash::Hasher;

use corvus_common_exception::ErrorCode;
use corvus_common_exception::Result;
use corvus_common_expression::types::DataType;
use corvus_common_expression::Scalar;
use corvus_common_expression::Span;
use educe::Educe;

use crate::metadata::ColumnBinding;
use crate::metadata::ColumnSet;
use crate::metadata::ParameterIndex;
use crate::optimizer::SExpr;

#[derive(Debug)]
pub enum ScalarExpr {
    BoundColumnRef(BoundColumnRef),
    ConstantExpr(ConstantExpr),
    FunctionCall(FunctionCall),
    CastExpr(CastExpr),
    AggregateFunction(AggregateFunction),
    ComparisonExpr(ComparisonExpr),
    InExpr(InExpr),
    ExistsExpr(ExistsExpr),
    CorrelatedParameter(CorrelatedParameter),
    SubqueryExpr(SubqueryExpr),
}

impl Clone for ScalarExpr {
    #[recursive::recursive]
    fn clone(&self) -> Self {
        match self {
            ScalarExpr::BoundColumnRef(v) => ScalarExpr::BoundColumnRef(v.clone()),
            ScalarExpr::ConstantExpr(v) => ScalarExpr::ConstantExpr(v.clone()),
            ScalarExpr::FunctionCall(v) => ScalarExpr::FunctionCall(v.clone()),
            ScalarExpr::CastExpr(v) => ScalarExpr::CastExpr(v.clone()),
            ScalarExpr::AggregateFunction(v) => ScalarExpr::AggregateFunction(v.clone()),
            ScalarExpr::ComparisonExpr(v) => ScalarExpr::ComparisonExpr(v.clone()),
            ScalarExpr::InExpr(v) => ScalarExpr::InExpr(v.clone()),
            ScalarExpr::ExistsExpr(v) => ScalarExpr::ExistsExpr(v.clone()),
            ScalarExpr::CorrelatedParameter(v) => ScalarExpr::CorrelatedParameter(v.clone()),
            ScalarExpr::SubqueryExpr(v) => ScalarExpr::SubqueryExpr(v.clone()),
        }
    }
}

impl Eq for ScalarExpr {}

impl PartialEq for ScalarExpr {
    #[recursive::recursive]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ScalarExpr::BoundColumnRef(l), ScalarExpr::BoundColumnRef(r)) => l.eq(r),
            (ScalarExpr::ConstantExpr(l), ScalarExpr::ConstantExpr(r)) => l.eq(r),
            (ScalarExpr::FunctionCall(l), ScalarExpr::FunctionCall(r)) => l.eq(r),
            (ScalarExpr::CastExpr(l), ScalarExpr::CastExpr(r)) => l.eq(r),
            (ScalarExpr::AggregateFunction(l), ScalarExpr::AggregateFunction(r)) => l.eq(r),
            (ScalarExpr::ComparisonExpr(l), ScalarExpr::ComparisonExpr(r)) => l.eq(r),
            (ScalarExpr::InExpr(l), ScalarExpr::InExpr(r)) => l.eq(r),
            (ScalarExpr::ExistsExpr(l), ScalarExpr::ExistsExpr(r)) => l.eq(r),
            (ScalarExpr::CorrelatedParameter(l), ScalarExpr::CorrelatedParameter(r)) => l.eq(r),
            (ScalarExpr::SubqueryExpr(l), ScalarExpr::SubqueryExpr(r)) => l.eq(r),
            _ => false,
        }
    }
}

impl Hash for ScalarExpr {
    #[recursive::recursive]
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            ScalarExpr::BoundColumnRef(v) => v.hash(state),
            ScalarExpr::ConstantExpr(v) => v.hash(state),
            ScalarExpr::FunctionCall(v) => v.hash(state),
            ScalarExpr::CastExpr(v) => v.hash(state),
            ScalarExpr::AggregateFunction(v) => v.hash(state),
            ScalarExpr::ComparisonExpr(v) => v.hash(state),
            ScalarExpr::InExpr(v) => v.hash(state),
            ScalarExpr::ExistsExpr(v) => v.hash(state),
            ScalarExpr::CorrelatedParameter(v) => v.hash(state),
            ScalarExpr::SubqueryExpr(v) => v.hash(state),
        }
    }
}

impl ScalarExpr {
    pub fn used_columns(&self) -> ColumnSet {
        struct UsedColumnsVisitor {
            columns: ColumnSet,
        }

        impl<'a> Visitor<'a> for UsedColumnsVisitor {
            fn visit_bound_column_ref(&mut self, col: &'a BoundColumnRef) -> Result<()> {
                self.columns.insert(col.column.index);
                Ok(())
            }
        }

        let mut visitor = UsedColumnsVisitor {
            columns: ColumnSet::new(),
        };
        visitor.visit(self).unwrap();
        visitor.columns
    }

    pub fn span(&self) -> Span {
        match self {
            ScalarExpr::BoundColumnRef(expr) => expr.span,
            ScalarExpr::ConstantExpr(expr) => expr.span,
            ScalarExpr::FunctionCall(expr) => expr.span,
            ScalarExpr::CastExpr(expr) => expr.span.or(expr.argument.span()),
            ScalarExpr::AggregateFunction(_) => None,
            ScalarExpr::ComparisonExpr(expr) => expr.left.span().or(expr.right.span()),
            ScalarExpr::InExpr(expr) => expr.span,
            ScalarExpr::ExistsExpr(expr) => expr.span,
            ScalarExpr::CorrelatedParameter(expr) => expr.span,
            ScalarExpr::SubqueryExpr(expr) => expr.span,
        }
    }
}

impl From<BoundColumnRef> for ScalarExpr {
    fn from(v: BoundColumnRef) -> Self {
        Self::BoundColumnRef(v)
    }
}

impl TryFrom<ScalarExpr> for BoundColumnRef {
    type Error = ErrorCode;
    fn try_from(value: ScalarExpr) -> Result<Self> {
        if let ScalarExpr::BoundColumnRef(value) = value {
            Ok(value)
        } else {
            Err(ErrorCode::Internal(
                "Cannot downcast Scalar to BoundColumnRef",
            ))
        }
    }
}

impl From<ConstantExpr> for ScalarExpr {
    fn from(v: ConstantExpr) -> Self {
        Self::ConstantExpr(v)
    }
}

impl TryFrom<ScalarExpr> for ConstantExpr {
    type Error = ErrorCode;
    fn try_from(value: ScalarExpr) -> Result<Self> {
        if let ScalarExpr::ConstantExpr(value) = value {
            Ok(value)
        } else {
            Err(ErrorCode::Internal(
                "Cannot downcast Scalar to ConstantExpr",
            ))
        }
    }
}

impl From<FunctionCall> for ScalarExpr {
    fn from(v: FunctionCall) -> Self {
        Self::FunctionCall(v)
    }
}

impl TryFrom<ScalarExpr> for FunctionCall {
    type Error = ErrorCode;
    fn try_from(value: ScalarExpr) -> Result<Self> {
        if let ScalarExpr::FunctionCall(value) = value {
            Ok(value)
        } else {
            Err(ErrorCode::Internal(
                "Cannot downcast Scalar to FunctionCall",
            ))
        }
    }
}

impl From<CastExpr> for ScalarExpr {
    fn from(v: CastExpr) -> Self {
        Self::CastExpr(v)
    }
}

impl TryFrom<ScalarExpr> for CastExpr {
    type Error = ErrorCode;
    fn try_from(value: ScalarExpr) -> Result<Self> {
        if let ScalarExpr::CastExpr(value) = value {
            Ok(value)
        } else {
            Err(ErrorCode::Internal("Cannot downcast Scalar to CastExpr"))
        }
    }
}

impl From<AggregateFunction> for ScalarExpr {
    fn from(v: AggregateFunction) -> Self {
        Self::AggregateFunction(v)
    }
}

impl TryFrom<ScalarExpr> for AggregateFunction {
    type Error = ErrorCode;
    fn try_from(value: ScalarExpr) -> Result<Self> {
        if let ScalarExpr::AggregateFunction(value) = value {
            Ok(value)
        } else {
            Err(ErrorCode::Internal(
                "Cannot downcast Scalar to AggregateFunction",
            ))
        }
    }
}

impl From<ComparisonExpr> for ScalarExpr {
    fn from(v: ComparisonExpr) -> Self {
        Self::ComparisonExpr(v)
    }
}

impl TryFrom<ScalarExpr> for ComparisonExpr {
    type Error = ErrorCode;
    fn try_from(value: ScalarExpr) -> Result<Self> {
        if let ScalarExpr::ComparisonExpr(value) = value {
            Ok(value)
        } else {
            Err(ErrorCode::Internal(
                "Cannot downcast Scalar to ComparisonExpr",
            ))
        }
    }
}

impl From<InExpr> for ScalarExpr {
    fn from(v: InExpr) -> Self {
        Self::InExpr(v)
    }
}

impl TryFrom<ScalarExpr> for InExpr {
    type Error = ErrorCode;
    fn try_from(value: ScalarExpr) -> Result<Self> {
        if let ScalarExpr::InExpr(value) = value {
            Ok(value)
        } else {
            Err(ErrorCode::Internal("Cannot downcast Scalar to InExpr"))
        }
    }
}

impl From<ExistsExpr> for ScalarExpr {
    fn from(v: ExistsExpr) -> Self {
        Self::ExistsExpr(v)
    }
}

impl TryFrom<ScalarExpr> for ExistsExpr {
    type Error = ErrorCode;
    fn try_from(value: ScalarExpr) -> Result<Self> {
        if let ScalarExpr::ExistsExpr(value) = value {
            Ok(value)
        } else {
            Err(ErrorCode::Internal("Cannot downcast Scalar to ExistsExpr"))
        }
    }
}

impl From<CorrelatedParameter> for ScalarExpr {
    fn from(v: CorrelatedParameter) -> Self {
        Self::CorrelatedParameter(v)
    }
}

impl TryFrom<ScalarExpr> for CorrelatedParameter {
    type Error = ErrorCode;
    fn try_from(value: ScalarExpr) -> Result<Self> {
        if let ScalarExpr::CorrelatedParameter(value) = value {
            Ok(value)
        } else {
            Err(ErrorCode::Internal(
                "Cannot downcast Scalar to CorrelatedParameter",
            ))
        }
    }
}

impl From<SubqueryExpr> for ScalarExpr {
    fn from(v: SubqueryExpr) -> Self {
        Self::SubqueryExpr(v)
    }
}

impl TryFrom<ScalarExpr> for SubqueryExpr {
    type Error = ErrorCode;
    fn try_from(value: ScalarExpr) -> Result<Self> {
        if let ScalarExpr::SubqueryExpr(value) = value {
            Ok(value)
        } else {
            Err(ErrorCode::Internal(
                "Cannot downcast Scalar to SubqueryExpr",
            ))
        }
    }
}

#[derive(Clone, Debug, Educe)]
#[educe(PartialEq, Eq, Hash)]
pub struct BoundColumnRef {
    #[educe(Hash(ignore), PartialEq(ignore), Eq(ignore))]
    pub span: Span,
    pub column: ColumnBinding,
}

#[derive(Clone, Debug, Educe)]
#[educe(PartialEq, Eq, Hash)]
pub struct ConstantExpr {
    #[educe(Hash(ignore), PartialEq(ignore), Eq(ignore))]
    pub span: Span,
    pub value: Scalar,
}

#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum ComparisonOp {
    Equal,
    NotEqual,
    // Greater ">"
    GT,
    // Less "<"
    LT,
    // Greater or equal ">="
    GTE,
    // Less or equal "<="
    LTE,
}

impl ComparisonOp {
    pub fn try_from_func_name(name: &str) -> Option<Self> {
        match name {
            "eq" => Some(Self::Equal),
            "noteq" => Some(Self::NotEqual),
            "gt" => Some(Self::GT),
            "lt" => Some(Self::LT),
            "gte" => Some(Self::GTE),
            "lte" => Some(Self::LTE),
            _ => None,
        }
    }

    pub fn to_func_name(&self) -> &'static str {
        match &self {
            ComparisonOp::Equal => "eq",
            ComparisonOp::NotEqual => "noteq",
            ComparisonOp::GT => "gt",
            ComparisonOp::LT => "lt",
            ComparisonOp::GTE => "gte",
            ComparisonOp::LTE => "lte",
        }
    }

    /// The operator that expresses the same relation after the two
    /// operands have been exchanged.
    pub fn reverse(&self) -> Self {
        match &self {
            ComparisonOp::Equal => ComparisonOp::Equal,
            ComparisonOp::NotEqual => ComparisonOp::NotEqual,
            ComparisonOp::GT => ComparisonOp::LT,
            ComparisonOp::LT => ComparisonOp::GT,
            ComparisonOp::GTE => ComparisonOp::LTE,
            ComparisonOp::LTE => ComparisonOp::GTE,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ComparisonExpr {
    pub op: ComparisonOp,
    pub left: Box<ScalarExpr>,
    pub right: Box<ScalarExpr>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AggregateFunction {
    pub func_name: String,
    pub distinct: bool,
    pub args: Vec<ScalarExpr>,
    pub return_type: Box<DataType>,

    pub display_name: String,
}

#[derive(Clone, Debug, Educe)]
#[educe(PartialEq, Eq, Hash)]
pub struct FunctionCall {
    #[educe(Hash(ignore), PartialEq(ignore), Eq(ignore))]
    pub span: Span,
    pub func_name: String,
    pub arguments: Vec<ScalarExpr>,
}

#[derive(Clone, Debug, Educe)]
#[educe(PartialEq, Eq, Hash)]
pub struct CastExpr {
    #[educe(Hash(ignore), PartialEq(ignore), Eq(ignore))]
    pub span: Span,
    pub is_try: bool,
    pub argument: Box<ScalarExpr>,
    pub target_type: Box<DataType>,
}

/// Membership test against a set of values. The set is either a subquery
/// expression or an `array(...)` function call built from a literal list.
#[derive(Clone, Debug, Educe)]
#[educe(PartialEq, Eq, Hash)]
pub struct InExpr {
    #[educe(Hash(ignore), PartialEq(ignore), Eq(ignore))]
    pub span: Span,
    pub value: Box<ScalarExpr>,
    pub set: Box<ScalarExpr>,
    pub negated: bool,
}

#[derive(Clone, Debug, Educe)]
#[educe(PartialEq, Eq, Hash)]
pub struct ExistsExpr {
    #[educe(Hash(ignore), PartialEq(ignore), Eq(ignore))]
    pub span: Span,
    pub subquery: Box<SubqueryExpr>,
    pub negated: bool,
}

/// A placeholder standing for a value of the enclosing query's current row.
/// The placeholder is resolved through the parameter bindings of the
/// subquery expression that owns the plan it appears in.
#[derive(Clone, Debug, Educe)]
#[educe(PartialEq, Eq, Hash)]
pub struct CorrelatedParameter {
    #[educe(Hash(ignore), PartialEq(ignore), Eq(ignore))]
    pub span: Span,
    pub parameter_index: ParameterIndex,
}

#[derive(Clone, Debug, Educe)]
#[educe(PartialEq, Eq, Hash)]
pub struct SubqueryExpr {
    #[educe(Hash(ignore), PartialEq(ignore), Eq(ignore))]
    pub span: Span,
    pub subquery: Box<SExpr>,
    /// Identifiers of the correlated placeholders used inside `subquery`.
    /// Unique within this subquery and position-aligned with
    /// `parameter_exprs`.
    pub parameter_indexes: Vec<ParameterIndex>,
    /// The outer-scope expressions captured at subquery-construction time,
    /// one for each entry of `parameter_indexes`.
    pub parameter_exprs: Vec<ScalarExpr>,
}

impl SubqueryExpr {
    pub fn is_correlated(&self) -> bool {
        !self.parameter_indexes.is_empty()
    }
}

pub trait Visitor<'a>: Sized {
    fn visit(&mut self, expr: &'a ScalarExpr) -> Result<()> {
        walk_expr(self, expr)
    }

    fn visit_bound_column_ref(&mut self, _col: &'a BoundColumnRef) -> Result<()> {
        Ok(())
    }
    fn visit_constant(&mut self, _constant: &'a ConstantExpr) -> Result<()> {
        Ok(())
    }
    fn visit_function_call(&mut self, func: &'a FunctionCall) -> Result<()> {
        for expr in &func.arguments {
            self.visit(expr)?;
        }
        Ok(())
    }
    fn visit_cast(&mut self, cast: &'a CastExpr) -> Result<()> {
        self.visit(&cast.argument)?;
        Ok(())
    }
    fn visit_aggregate_function(&mut self, aggregate: &'a AggregateFunction) -> Result<()> {
        for expr in &aggregate.args {
            self.visit(expr)?;
        }
        Ok(())
    }
    fn visit_comparison(&mut self, comparison: &'a ComparisonExpr) -> Result<()> {
        self.visit(&comparison.left)?;
        self.visit(&comparison.right)?;
        Ok(())
    }
    fn visit_in(&mut self, in_expr: &'a InExpr) -> Result<()> {
        self.visit(&in_expr.value)?;
        self.visit(&in_expr.set)?;
        Ok(())
    }
    fn visit_exists(&mut self, exists: &'a ExistsExpr) -> Result<()> {
        self.visit_subquery(&exists.subquery)
    }
    fn visit_correlated_parameter(&mut self, _param: &'a CorrelatedParameter) -> Result<()> {
        Ok(())
    }
    fn visit_subquery(&mut self, subquery: &'a SubqueryExpr) -> Result<()> {
        // Only the captured outer expressions belong to the enclosing
        // scope; the nested plan is inspected by plan-level traversals.
        for expr in &subquery.parameter_exprs {
            self.visit(expr)?;
        }
        Ok(())
    }
}

pub fn walk_expr<'a, V: Visitor<'a>>(visitor: &mut V, expr: &'a ScalarExpr) -> Result<()> {
    match expr {
        ScalarExpr::BoundColumnRef(expr) => visitor.visit_bound_column_ref(expr),
        ScalarExpr::ConstantExpr(expr) => visitor.visit_constant(expr),
        ScalarExpr::FunctionCall(expr) => visitor.visit_function_call(expr),
        ScalarExpr::CastExpr(expr) => visitor.visit_cast(expr),
        ScalarExpr::AggregateFunction(expr) => visitor.visit_aggregate_function(expr),
        ScalarExpr::ComparisonExpr(expr) => visitor.visit_comparison(expr),
        ScalarExpr::InExpr(expr) => visitor.visit_in(expr),
        ScalarExpr::ExistsExpr(expr) => visitor.visit_exists(expr),
        ScalarExpr::CorrelatedParameter(expr) => visitor.visit_correlated_parameter(expr),
        ScalarExpr::SubqueryExpr(expr) => visitor.visit_subquery(expr),
    }
}

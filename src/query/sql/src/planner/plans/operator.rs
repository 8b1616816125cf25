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

use crate::plans::Aggregate;
use crate::plans::Alias;
use crate::plans::EvalScalar;
use crate::plans::Filter;
use crate::plans::Join;
use crate::plans::Limit;
use crate::plans::Scan;
use crate::plans::Sort;
use crate::plans::UnionAll;
use crate::plans::Validate;

pub trait Operator {
    /// Get relational operator kind
    fn rel_op(&self) -> RelOp;

    /// Get arity of this operator
    fn arity(&self) -> usize {
        1
    }
}

/// Relational operator kind
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RelOp {
    Scan,
    Join,
    Filter,
    Aggregate,
    Alias,
    EvalScalar,
    Sort,
    Validate,
    Limit,
    UnionAll,
}

/// Relational operators
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RelOperator {
    Scan(Scan),
    Join(Join),
    Filter(Filter),
    Aggregate(Aggregate),
    Alias(Alias),
    EvalScalar(EvalScalar),
    Sort(Sort),
    Validate(Validate),
    Limit(Limit),
    UnionAll(UnionAll),
}

impl Operator for RelOperator {
    fn rel_op(&self) -> RelOp {
        match self {
            RelOperator::Scan(rel_op) => rel_op.rel_op(),
            RelOperator::Join(rel_op) => rel_op.rel_op(),
            RelOperator::Filter(rel_op) => rel_op.rel_op(),
            RelOperator::Aggregate(rel_op) => rel_op.rel_op(),
            RelOperator::Alias(rel_op) => rel_op.rel_op(),
            RelOperator::EvalScalar(rel_op) => rel_op.rel_op(),
            RelOperator::Sort(rel_op) => rel_op.rel_op(),
            RelOperator::Validate(rel_op) => rel_op.rel_op(),
            RelOperator::Limit(rel_op) => rel_op.rel_op(),
            RelOperator::UnionAll(rel_op) => rel_op.rel_op(),
        }
    }

    fn arity(&self) -> usize {
        match self {
            RelOperator::Scan(rel_op) => rel_op.arity(),
            RelOperator::Join(rel_op) => rel_op.arity(),
            RelOperator::Filter(rel_op) => rel_op.arity(),
            RelOperator::Aggregate(rel_op) => rel_op.arity(),
            RelOperator::Alias(rel_op) => rel_op.arity(),
            RelOperator::EvalScalar(rel_op) => rel_op.arity(),
            RelOperator::Sort(rel_op) => rel_op.arity(),
            RelOperator::Validate(rel_op) => rel_op.arity(),
            RelOperator::Limit(rel_op) => rel_op.arity(),
            RelOperator::UnionAll(rel_op) => rel_op.arity(),
        }
    }
}

impl From<Scan> for RelOperator {
    fn from(v: Scan) -> Self {
        Self::Scan(v)
    }
}

impl TryFrom<RelOperator> for Scan {
    type Error = ErrorCode;
    fn try_from(value: RelOperator) -> Result<Self> {
        if let RelOperator::Scan(value) = value {
            Ok(value)
        } else {
            Err(ErrorCode::Internal(format!(
                "Cannot downcast {:?} to Scan",
                value.rel_op()
            )))
        }
    }
}

impl From<Join> for RelOperator {
    fn from(v: Join) -> Self {
        Self::Join(v)
    }
}

impl TryFrom<RelOperator> for Join {
    type Error = ErrorCode;
    fn try_from(value: RelOperator) -> Result<Self> {
        if let RelOperator::Join(value) = value {
            Ok(value)
        } else {
            Err(ErrorCode::Internal(format!(
                "Cannot downcast {:?} to Join",
                value.rel_op()
            )))
        }
    }
}

impl From<Filter> for RelOperator {
    fn from(v: Filter) -> Self {
        Self::Filter(v)
    }
}

impl TryFrom<RelOperator> for Filter {
    type Error = ErrorCode;
    fn try_from(value: RelOperator) -> Result<Self> {
        if let RelOperator::Filter(value) = value {
            Ok(value)
        } else {
            Err(ErrorCode::Internal(format!(
                "Cannot downcast {:?} to Filter",
                value.rel_op()
            )))
        }
    }
}

impl From<Aggregate> for RelOperator {
    fn from(v: Aggregate) -> Self {
        Self::Aggregate(v)
    }
}

impl TryFrom<RelOperator> for Aggregate {
    type Error = ErrorCode;
    fn try_from(value: RelOperator) -> Result<Self> {
        if let RelOperator::Aggregate(value) = value {
            Ok(value)
        } else {
            Err(ErrorCode::Internal(format!(
                "Cannot downcast {:?} to Aggregate",
                value.rel_op()
            )))
        }
    }
}

impl From<Alias> for RelOperator {
    fn from(v: Alias) -> Self {
        Self::Alias(v)
    }
}

impl TryFrom<RelOperator> for Alias {
    type Error = ErrorCode;
    fn try_from(value: RelOperator) -> Result<Self> {
        if let RelOperator::Alias(value) = value {
            Ok(value)
        } else {
            Err(ErrorCode::Internal(format!(
                "Cannot downcast {:?} to Alias",
                value.rel_op()
            )))
        }
    }
}

impl From<EvalScalar> for RelOperator {
    fn from(v: EvalScalar) -> Self {
        Self::EvalScalar(v)
    }
}

impl TryFrom<RelOperator> for EvalScalar {
    type Error = ErrorCode;
    fn try_from(value: RelOperator) -> Result<Self> {
        if let RelOperator::EvalScalar(value) = value {
            Ok(value)
        } else {
            Err(ErrorCode::Internal(format!(
                "Cannot downcast {:?} to EvalScalar",
                value.rel_op()
            )))
        }
    }
}

impl From<Sort> for RelOperator {
    fn from(v: Sort) -> Self {
        Self::Sort(v)
    }
}

impl TryFrom<RelOperator> for Sort {
    type Error = ErrorCode;
    fn try_from(value: RelOperator) -> Result<Self> {
        if let RelOperator::Sort(value) = value {
            Ok(value)
        } else {
            Err(ErrorCode::Internal(format!(
                "Cannot downcast {:?} to Sort",
                value.rel_op()
            )))
        }
    }
}

impl From<Validate> for RelOperator {
    fn from(v: Validate) -> Self {
        Self::Validate(v)
    }
}

impl TryFrom<RelOperator> for Validate {
    type Error = ErrorCode;
    fn try_from(value: RelOperator) -> Result<Self> {
        if let RelOperator::Validate(value) = value {
            Ok(value)
        } else {
            Err(ErrorCode::Internal(format!(
                "Cannot downcast {:?} to Validate",
                value.rel_op()
            )))
        }
    }
}

impl From<Limit> for RelOperator {
    fn from(v: Limit) -> Self {
        Self::Limit(v)
    }
}

impl TryFrom<RelOperator> for Limit {
    type Error = ErrorCode;
    fn try_from(value: RelOperator) -> Result<Self> {
        if let RelOperator::Limit(value) = value {
            Ok(value)
        } else {
            Err(ErrorCode::Internal(format!(
                "Cannot downcast {:?} to Limit",
                value.rel_op()
            )))
        }
    }
}

impl From<UnionAll> for RelOperator {
    fn from(v: UnionAll) -> Self {
        Self::UnionAll(v)
    }
}

impl TryFrom<RelOperator> for UnionAll {
    type Error = ErrorCode;
    fn try_from(value: RelOperator) -> Result<Self> {
        if let RelOperator::UnionAll(value) = value {
            Ok(value)
        } else {
            Err(ErrorCode::Internal(format!(
                "Cannot downcast {:?} to UnionAll",
                value.rel_op()
            )))
        }
    }
}

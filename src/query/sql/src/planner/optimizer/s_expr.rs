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
use std::sync::Mutex;

use corvus_common_exception::ErrorCode;
use corvus_common_exception::Result;
use educe::Educe;

use super::RelationalProperty;
use crate::plans::RelOperator;

/// `SExpr` is abbreviation of single expression, which is a tree of
/// relational operators.
///
/// A node may be referenced by more than one parent through the shared
/// children vector, so structural changes never mutate an existing node;
/// they build a new one with [`SExpr::replace_children`] or
/// [`SExpr::replace_plan`] and reuse the untouched subtrees by reference.
#[derive(Clone, Debug, Educe)]
#[educe(PartialEq, Eq, Hash)]
pub struct SExpr {
    pub(crate) plan: RelOperator,
    pub(crate) children: Arc<Vec<SExpr>>,

    /// A cache of relational property of current `SExpr`, will
    /// be lazily computed as soon as `RelExpr::derive_relational_prop`
    /// is invoked on current `SExpr`.
    ///
    /// Since `SExpr` is `Send + Sync`, we use `Mutex` to protect
    /// the cache.
    #[educe(Hash(ignore), PartialEq(ignore), Eq(ignore))]
    pub(crate) rel_prop: Arc<Mutex<Option<Arc<RelationalProperty>>>>,
}

impl SExpr {
    pub fn create(plan: RelOperator, children: Vec<SExpr>) -> Self {
        SExpr {
            plan,
            children: Arc::new(children),
            rel_prop: Arc::new(Mutex::new(None)),
        }
    }

    pub fn create_unary(plan: RelOperator, child: SExpr) -> Self {
        Self::create(plan, vec![child])
    }

    pub fn create_binary(plan: RelOperator, left_child: SExpr, right_child: SExpr) -> Self {
        Self::create(plan, vec![left_child, right_child])
    }

    pub fn create_leaf(plan: RelOperator) -> Self {
        Self::create(plan, vec![])
    }

    pub fn plan(&self) -> &RelOperator {
        &self.plan
    }

    pub fn children(&self) -> &[SExpr] {
        &self.children
    }

    pub fn child(&self, n: usize) -> Result<&SExpr> {
        self.children
            .get(n)
            .ok_or_else(|| ErrorCode::Internal(format!("Invalid children index: {}", n)))
    }

    pub fn arity(&self) -> usize {
        self.children.len()
    }

    /// Replace children with given new `children`, keeping the plan of
    /// current `SExpr` unchanged.
    pub fn replace_children(&self, children: Vec<SExpr>) -> Self {
        Self {
            plan: self.plan.clone(),
            children: Arc::new(children),
            rel_prop: Arc::new(Mutex::new(None)),
        }
    }

    pub fn replace_plan(&self, plan: RelOperator) -> Self {
        Self {
            plan,
            children: self.children.clone(),
            rel_prop: Arc::new(Mutex::new(None)),
        }
    }
}

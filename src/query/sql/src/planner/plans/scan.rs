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

use crate::metadata::ColumnBinding;
use crate::metadata::IndexType;
use crate::plans::Operator;
use crate::plans::RelOp;

/// Scan of a stored table. The bindings in `columns` describe the columns
/// this scan exposes, in table order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Scan {
    pub table_index: IndexType,
    pub table_name: String,
    pub columns: Vec<ColumnBinding>,
}

impl Operator for Scan {
    fn rel_op(&self) -> RelOp {
        RelOp::Scan
    }

    fn arity(&self) -> usize {
        0
    }
}

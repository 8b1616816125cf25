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

use std::collections::HashSet;

use corvus_common_expression::types::DataType;

/// Planner uses [`usize`] as its index type.
///
/// This type will be used across the whole planner.
pub type IndexType = usize;

/// Use IndexType::MAX to represent a dummy table.
pub static DUMMY_TABLE_INDEX: IndexType = IndexType::MAX;

/// ColumnSet represents a set of columns identified by its IndexType.
pub type ColumnSet = HashSet<IndexType>;

/// Identifier of a correlated placeholder inside a subquery. Each placeholder
/// stands for a value supplied by the enclosing query's current row and is
/// resolved through the parameter bindings of the owning subquery expression.
pub type ParameterIndex = usize;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Visibility {
    // Default for a column
    Visible,
    // Inner column of aliased table
    InVisible,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ColumnBinding {
    /// Database name of this `ColumnBinding` in current context
    pub database_name: Option<String>,
    /// Table name of this `ColumnBinding` in current context
    pub table_name: Option<String>,
    /// Table index of this `ColumnBinding` in current context
    pub table_index: Option<IndexType>,
    /// Column name of this `ColumnBinding` in current context
    pub column_name: String,
    /// Column index of this `ColumnBinding`
    pub index: IndexType,

    pub data_type: Box<DataType>,

    pub visibility: Visibility,
}

pub struct ColumnBindingBuilder {
    pub database_name: Option<String>,
    pub table_name: Option<String>,
    pub table_index: Option<IndexType>,
    pub column_name: String,
    pub index: IndexType,
    pub data_type: Box<DataType>,
    pub visibility: Visibility,
}

impl ColumnBindingBuilder {
    pub fn new(
        column_name: String,
        index: IndexType,
        data_type: Box<DataType>,
        visibility: Visibility,
    ) -> ColumnBindingBuilder {
        ColumnBindingBuilder {
            database_name: None,
            table_name: None,
            table_index: None,
            column_name,
            index,
            data_type,
            visibility,
        }
    }

    pub fn database_name(mut self, name: Option<String>) -> ColumnBindingBuilder {
        self.database_name = name;
        self
    }

    pub fn table_name(mut self, name: Option<String>) -> ColumnBindingBuilder {
        self.table_name = name;
        self
    }

    pub fn table_index(mut self, index: Option<IndexType>) -> ColumnBindingBuilder {
        self.table_index = index;
        self
    }

    pub fn build(self) -> ColumnBinding {
        ColumnBinding {
            database_name: self.database_name,
            table_name: self.table_name,
            table_index: self.table_index,
            column_name: self.column_name,
            index: self.index,
            data_type: self.data_type,
            visibility: self.visibility,
        }
    }
}

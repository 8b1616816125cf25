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

use std::fmt::Display;
use std::fmt::Formatter;

use crate::types::DataType;
use crate::types::NumberDataType;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scalar {
    Null,
    Boolean(bool),
    Number(NumberScalar),
    String(String),
}

impl Scalar {
    pub fn as_data_type(&self) -> DataType {
        match self {
            Scalar::Null => DataType::Nullable(Box::new(DataType::Boolean)),
            Scalar::Boolean(_) => DataType::Boolean,
            Scalar::Number(num) => DataType::Number(num.data_type()),
            Scalar::String(_) => DataType::String,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NumberScalar {
    UInt8(u8),
    Int32(i32),
    Int64(i64),
}

impl NumberScalar {
    pub fn data_type(&self) -> NumberDataType {
        match self {
            NumberScalar::UInt8(_) => NumberDataType::UInt8,
            NumberScalar::Int32(_) => NumberDataType::Int32,
            NumberScalar::Int64(_) => NumberDataType::Int64,
        }
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::Null => write!(f, "NULL"),
            Scalar::Boolean(v) => write!(f, "{v}"),
            Scalar::Number(v) => write!(f, "{v}"),
            Scalar::String(v) => write!(f, "'{v}'"),
        }
    }
}

impl Display for NumberScalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            NumberScalar::UInt8(v) => write!(f, "{v}"),
            NumberScalar::Int32(v) => write!(f, "{v}"),
            NumberScalar::Int64(v) => write!(f, "{v}"),
        }
    }
}

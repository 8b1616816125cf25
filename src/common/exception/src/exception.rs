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

use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ErrorCode>;

#[derive(Error, Clone)]
pub struct ErrorCode {
    pub(crate) code: u16,
    pub(crate) name: String,
    pub(crate) display_text: String,
}

impl ErrorCode {
    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn name(&self) -> String {
        self.name.clone()
    }

    pub fn message(&self) -> String {
        self.display_text.clone()
    }

    pub fn create(code: u16, name: impl ToString, display_text: String) -> ErrorCode {
        ErrorCode {
            code,
            name: name.to_string(),
            display_text,
        }
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}. Code: {}, Text = {}.",
            self.name, self.code, self.display_text
        )
    }
}

impl Debug for ErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}. Code: {}, Text = {}.",
            self.name, self.code, self.display_text
        )
    }
}

// Copyright 2026 Jobfilter Contributors
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

//! Crate-wide error type

use crate::compiler::CompileError;
use crate::parser::{LexError, ParseError};
use thiserror::Error;

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, FilterError>;

/// Umbrella over the three compilation phases
///
/// Each phase keeps its own error enum; this type exists so callers that
/// run the whole pipeline handle one error. Processing is fail-fast, so
/// a `FilterError` always describes the first problem encountered.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Compile(#[from] CompileError),
}

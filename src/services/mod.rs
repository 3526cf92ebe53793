// SPDX-License-Identifier: MIT

pub mod draft;
pub mod elicit;
pub mod git;
pub mod scopes;

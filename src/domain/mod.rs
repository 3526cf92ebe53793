// SPDX-License-Identifier: MIT

mod change;
mod commit;
mod draft;

pub use change::*;
pub use commit::*;
pub use draft::*;

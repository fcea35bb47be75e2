pub use self::{evaluator::*, pilot::*, search::*};

pub(crate) mod evaluator;
pub(crate) mod pilot;
pub(crate) mod search;

pub use self::{session::*, shape_source::*, stats::*};

pub(crate) mod session;
pub(crate) mod shape_source;
pub(crate) mod stats;

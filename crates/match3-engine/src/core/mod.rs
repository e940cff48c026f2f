pub use self::{cell::*, grid::*, matching::*, position::*};

pub(crate) mod cell;
pub(crate) mod grid;
pub(crate) mod matching;
pub(crate) mod position;

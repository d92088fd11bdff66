pub use self::{event::*, grid::*, piece::*};

pub(crate) mod event;
pub(crate) mod grid;
pub(crate) mod piece;

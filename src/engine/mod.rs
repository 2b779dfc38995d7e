pub(crate) mod game;
pub(crate) mod grid;
pub(crate) mod outcome;
pub(crate) mod shift;
pub(crate) mod spawn;
pub(crate) mod tile;

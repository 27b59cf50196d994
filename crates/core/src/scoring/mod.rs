pub mod classify;
pub mod extract;
pub mod normalize;
pub mod rank;

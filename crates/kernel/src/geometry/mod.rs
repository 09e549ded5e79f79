pub mod point;
pub mod grid;
pub mod bernstein;
pub mod bezier;

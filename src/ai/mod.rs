pub mod display;
pub mod emotion;

pub mod control;
pub mod runtime;
pub mod simulate;

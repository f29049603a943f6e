pub mod selection;
pub mod shell;

pub mod error;
pub mod telefone;

pub mod clientes;
pub mod titulos;
pub mod importacao;
pub mod recebimentos;
pub mod disparos;
pub mod faturamentos;

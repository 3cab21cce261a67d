pub mod cliente;
pub mod titulo;
pub mod recebimento;
pub mod disparo;
pub mod faturamento;

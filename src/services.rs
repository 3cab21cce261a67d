pub mod cliente_service;
pub use cliente_service::ClienteService;
pub mod titulo_service;
pub use titulo_service::TituloService;
pub mod importacao_service;
pub use importacao_service::ImportacaoService;
pub mod recebimento_service;
pub use recebimento_service::RecebimentoService;
pub mod disparo_service;
pub use disparo_service::DisparoService;
pub mod faturamento_service;
pub use faturamento_service::FaturamentoService;

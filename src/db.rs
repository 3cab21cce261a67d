pub mod cliente_repo;
pub use cliente_repo::ClienteRepository;
pub mod titulo_repo;
pub use titulo_repo::TituloRepository;
pub mod recebimento_repo;
pub use recebimento_repo::RecebimentoRepository;
pub mod disparo_repo;
pub use disparo_repo::DisparoRepository;
pub mod faturamento_repo;
pub use faturamento_repo::FaturamentoRepository;
pub mod template_repo;
pub use template_repo::TemplateRepository;

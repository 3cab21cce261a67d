// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::importador;
use crate::models;
use crate::services;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Clientes ---
        handlers::clientes::listar_clientes,
        handlers::clientes::criar_cliente,
        handlers::clientes::atualizar_cliente,

        // --- Títulos ---
        handlers::titulos::listar_titulos,
        handlers::titulos::criar_titulo,
        handlers::titulos::atualizar_titulo,
        handlers::titulos::deletar_titulo,

        // --- Importação ---
        handlers::importacao::preview_importacao,
        handlers::importacao::importar_carteira,

        // --- Recebimentos ---
        handlers::recebimentos::listar_recebimentos,
        handlers::recebimentos::lancar_recebimento,

        // --- Disparos ---
        handlers::disparos::listar_disparos,
        handlers::disparos::disparar_mensagem,

        // --- Faturamentos ---
        handlers::faturamentos::listar_faturamentos,
        handlers::faturamentos::registrar_faturamento,
        handlers::faturamentos::processar_lembretes,
    ),
    components(
        schemas(
            // --- Clientes ---
            models::cliente::Cliente,
            handlers::clientes::CriarClientePayload,
            handlers::clientes::AtualizarClientePayload,

            // --- Títulos ---
            models::titulo::TituloStatus,
            models::titulo::Titulo,
            models::titulo::TituloComCliente,
            handlers::titulos::CriarTituloPayload,
            handlers::titulos::AtualizarTituloPayload,

            // --- Importação ---
            importador::csv::LinhaPlanilha,
            importador::carteira::ClienteImportado,
            importador::carteira::TituloImportado,
            importador::carteira::Carteira,
            handlers::importacao::PreviewPayload,
            handlers::importacao::ImportarPayload,
            services::importacao_service::ResultadoImportacao,

            // --- Recebimentos ---
            models::recebimento::FormaRecebimento,
            models::recebimento::Recebimento,
            handlers::recebimentos::LancarRecebimentoPayload,

            // --- Disparos ---
            models::disparo::DisparoTipo,
            models::disparo::DisparoStatus,
            models::disparo::Disparo,
            models::disparo::DisparoComVinculos,
            handlers::disparos::DispararPayload,
            services::disparo_service::ResultadoDisparo,

            // --- Faturamentos ---
            models::faturamento::LembreteStatus,
            models::faturamento::Faturamento,
            services::faturamento_service::Anexo,
            handlers::faturamentos::RegistrarFaturamentoPayload,
            services::faturamento_service::ResultadoFaturamento,
            services::faturamento_service::ResultadoCron,
        )
    ),
    tags(
        (name = "Clientes", description = "Cadastro de clientes"),
        (name = "Títulos", description = "Contas a receber (duplicatas e notas)"),
        (name = "Importação", description = "Importação e conciliação de planilhas"),
        (name = "Recebimentos", description = "Baixas de pagamento"),
        (name = "Disparos", description = "Mensagens de cobrança via WhatsApp"),
        (name = "Faturamentos", description = "Faturamentos e lembretes agendados")
    )
)]
pub struct ApiDoc;

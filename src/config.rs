// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        ClienteRepository, DisparoRepository, FaturamentoRepository, RecebimentoRepository,
        TemplateRepository, TituloRepository,
    },
    services::{
        ClienteService, DisparoService, FaturamentoService, ImportacaoService,
        RecebimentoService, TituloService,
    },
    zapi::{base_url_zapi, ZapiClient},
};

// O estado compartilhado que será acessível em toda a aplicação.
// Construído uma única vez no boot; nada de conexão global preguiçosa.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub cliente_service: ClienteService,
    pub titulo_service: TituloService,
    pub importacao_service: ImportacaoService,
    pub recebimento_service: RecebimentoService,
    pub disparo_service: DisparoService,
    pub faturamento_service: FaturamentoService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // Gateway Z-API: a URL pode ser sobrescrita (útil em ambiente de teste)
        let zapi_base = match env::var("ZAPI_BASE_URL") {
            Ok(url) => url,
            Err(_) => {
                let instance = env::var("ZAPI_INSTANCE_ID").expect("ZAPI_INSTANCE_ID deve ser definida");
                let token = env::var("ZAPI_TOKEN").expect("ZAPI_TOKEN deve ser definido");
                base_url_zapi(&instance, &token)
            }
        };
        let zapi = ZapiClient::new(zapi_base, env::var("ZAPI_CLIENT_TOKEN").ok());

        // --- Monta o gráfico de dependências ---
        let cliente_repo = ClienteRepository::new(db_pool.clone());
        let titulo_repo = TituloRepository::new(db_pool.clone());
        let recebimento_repo = RecebimentoRepository::new(db_pool.clone());
        let disparo_repo = DisparoRepository::new(db_pool.clone());
        let faturamento_repo = FaturamentoRepository::new(db_pool.clone());
        let template_repo = TemplateRepository::new(db_pool.clone());

        let cliente_service = ClienteService::new(cliente_repo.clone());
        let titulo_service = TituloService::new(titulo_repo.clone(), cliente_repo.clone());
        let importacao_service = ImportacaoService::new(cliente_repo.clone(), titulo_repo.clone());
        let recebimento_service = RecebimentoService::new(recebimento_repo, titulo_repo.clone());
        let disparo_service = DisparoService::new(
            disparo_repo.clone(),
            titulo_repo,
            cliente_repo.clone(),
            template_repo.clone(),
            zapi.clone(),
        );
        let faturamento_service = FaturamentoService::new(
            faturamento_repo,
            cliente_repo,
            disparo_repo,
            template_repo,
            zapi,
        );

        Ok(Self {
            db_pool,
            cliente_service,
            titulo_service,
            importacao_service,
            recebimento_service,
            disparo_service,
            faturamento_service,
        })
    }
}

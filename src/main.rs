//src/main.rs

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod importador;
mod mensagem;
mod models;
mod services;
mod zapi;

use crate::config::AppState;
use crate::docs::ApiDoc;

#[tokio::main]
async fn main() {
    // Inicializa o logger; RUST_LOG controla o nível.
    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let cliente_routes = Router::new()
        .route("/"
               ,get(handlers::clientes::listar_clientes)
               .post(handlers::clientes::criar_cliente)
        )
        .route("/{id}"
               ,axum::routing::patch(handlers::clientes::atualizar_cliente)
        );

    let titulo_routes = Router::new()
        .route("/"
               ,get(handlers::titulos::listar_titulos)
               .post(handlers::titulos::criar_titulo)
        )
        .route("/{id}"
               ,axum::routing::patch(handlers::titulos::atualizar_titulo)
               .delete(handlers::titulos::deletar_titulo)
        );

    let importacao_routes = Router::new()
        .route("/", post(handlers::importacao::importar_carteira))
        .route("/preview", post(handlers::importacao::preview_importacao));

    let recebimento_routes = Router::new()
        .route("/"
               ,get(handlers::recebimentos::listar_recebimentos)
               .post(handlers::recebimentos::lancar_recebimento)
        );

    let disparo_routes = Router::new()
        .route("/"
               ,get(handlers::disparos::listar_disparos)
               .post(handlers::disparos::disparar_mensagem)
        );

    let faturamento_routes = Router::new()
        .route("/"
               ,get(handlers::faturamentos::listar_faturamentos)
               .post(handlers::faturamentos::registrar_faturamento)
        )
        .route("/cron", get(handlers::faturamentos::processar_lembretes));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/clientes", cliente_routes)
        .nest("/api/titulos", titulo_routes)
        .nest("/api/importar", importacao_routes)
        .nest("/api/recebimentos", recebimento_routes)
        .nest("/api/disparos", disparo_routes)
        .nest("/api/faturamentos", faturamento_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());

    axum::serve(listener, app)
        .with_graceful_shutdown(sinal_de_parada())
        .await
        .expect("Erro no servidor Axum");

    tracing::info!("Servidor encerrado.");
}

// Encerramento limpo em SIGINT/SIGTERM; o pool fecha junto com o processo.
async fn sinal_de_parada() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Falha ao instalar o handler de Ctrl+C");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Falha ao instalar o handler de SIGTERM")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Sinal de parada recebido, encerrando...");
}

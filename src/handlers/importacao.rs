// src/handlers/importacao.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    importador::{
        carteira::{montar_carteira, Carteira, ClienteImportado, TituloImportado},
        csv::parse_csv_texto,
    },
    services::importacao_service::ResultadoImportacao,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PreviewPayload {
    /// Conteúdo bruto do arquivo CSV (com linha de cabeçalho).
    #[validate(length(min = 1, message = "required"))]
    pub conteudo: String,
}

// POST /api/importar/preview
#[utoipa::path(
    post,
    path = "/api/importar/preview",
    tag = "Importação",
    request_body = PreviewPayload,
    responses(
        (status = 200, description = "Carteira montada a partir do CSV", body = Carteira),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn preview_importacao(
    Json(payload): Json<PreviewPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let linhas = parse_csv_texto(&payload.conteudo);
    let carteira = montar_carteira(&linhas);

    Ok((StatusCode::OK, Json(carteira)))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportarPayload {
    pub clientes: Vec<ClienteImportado>,
    pub titulos: Vec<TituloImportado>,

    /// Data de referência da planilha importada (opcional).
    #[schema(value_type = Option<String>, format = Date)]
    pub data_referencia: Option<NaiveDate>,

    /// Identificação da origem (ex.: nome do arquivo ou sistema exportador).
    pub origem: Option<String>,
}

// POST /api/importar
#[utoipa::path(
    post,
    path = "/api/importar",
    tag = "Importação",
    request_body = ImportarPayload,
    responses(
        (status = 201, description = "Resultado da importação", body = ResultadoImportacao),
        (status = 400, description = "Payload inválido")
    )
)]
pub async fn importar_carteira(
    State(app_state): State<AppState>,
    Json(payload): Json<ImportarPayload>,
) -> Result<impl IntoResponse, AppError> {
    let carteira = Carteira { clientes: payload.clientes, titulos: payload.titulos };

    let resultado = app_state
        .importacao_service
        .importar(
            &app_state.db_pool,
            &carteira,
            payload.data_referencia,
            payload.origem.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(resultado)))
}

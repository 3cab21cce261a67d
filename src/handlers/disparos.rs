// src/handlers/disparos.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::disparo::{DisparoComVinculos, DisparoStatus},
    services::disparo_service::ResultadoDisparo,
};

#[derive(Debug, Deserialize)]
pub struct ListarDisparosQuery {
    pub status: Option<String>,
}

fn parse_status(status: Option<&str>) -> Result<Option<DisparoStatus>, AppError> {
    match status {
        None | Some("") => Ok(None),
        Some(s) => serde_json::from_value::<DisparoStatus>(Value::String(s.to_string()))
            .map(Some)
            .map_err(|_| AppError::PayloadInvalido(format!("Status inválido: {}", s))),
    }
}

// GET /api/disparos
#[utoipa::path(
    get,
    path = "/api/disparos",
    tag = "Disparos",
    params(
        ("status" = Option<String>, Query, description = "ENVIADO, FALHOU ou PENDENTE")
    ),
    responses(
        (status = 200, description = "Histórico de disparos", body = Vec<DisparoComVinculos>)
    )
)]
pub async fn listar_disparos(
    State(app_state): State<AppState>,
    Query(query): Query<ListarDisparosQuery>,
) -> Result<impl IntoResponse, AppError> {
    let status = parse_status(query.status.as_deref())?;
    let disparos = app_state.disparo_service.listar(status).await?;

    Ok((StatusCode::OK, Json(disparos)))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DispararPayload {
    /// Título alvo; na ausência, a chave de deduplicação serve de fallback.
    pub titulo_id: Option<Uuid>,

    #[schema(example = "NF-12401__15000.00")]
    pub chave_match: Option<String>,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Vencido")]
    pub template: String,
}

// POST /api/disparos
#[utoipa::path(
    post,
    path = "/api/disparos",
    tag = "Disparos",
    request_body = DispararPayload,
    responses(
        (status = 200, description = "Mensagem enviada", body = ResultadoDisparo),
        (status = 404, description = "Título ou cliente não encontrado"),
        (status = 422, description = "Gateway recusou o envio", body = ResultadoDisparo)
    )
)]
pub async fn disparar_mensagem(
    State(app_state): State<AppState>,
    Json(payload): Json<DispararPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let resultado = app_state
        .disparo_service
        .disparar(
            &app_state.db_pool,
            payload.titulo_id,
            payload.chave_match.as_deref(),
            &payload.template,
        )
        .await?;

    // Falha de envio não é erro interno: vira 422 com o desfecho no corpo.
    let codigo = if resultado.ok { StatusCode::OK } else { StatusCode::UNPROCESSABLE_ENTITY };

    Ok((codigo, Json(resultado)))
}

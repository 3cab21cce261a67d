// src/handlers/recebimentos.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::recebimento::{FormaRecebimento, Recebimento},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListarRecebimentosQuery {
    pub titulo_id: Option<Uuid>,
}

// GET /api/recebimentos
#[utoipa::path(
    get,
    path = "/api/recebimentos",
    tag = "Recebimentos",
    params(
        ("tituloId" = Option<Uuid>, Query, description = "Filtro por título")
    ),
    responses(
        (status = 200, description = "Lista de recebimentos", body = Vec<Recebimento>)
    )
)]
pub async fn listar_recebimentos(
    State(app_state): State<AppState>,
    Query(query): Query<ListarRecebimentosQuery>,
) -> Result<impl IntoResponse, AppError> {
    let recebimentos = app_state.recebimento_service.listar(query.titulo_id).await?;

    Ok((StatusCode::OK, Json(recebimentos)))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LancarRecebimentoPayload {
    pub titulo_id: Uuid,

    #[schema(example = "15750.00")]
    pub valor_recebido: Decimal,

    pub forma: FormaRecebimento,

    #[schema(value_type = String, format = Date, example = "2025-07-20")]
    pub data: NaiveDate,

    pub observacao: Option<String>,

    // Baixa parcial nunca altera o status do título.
    #[serde(default)]
    pub parcial: bool,
}

// POST /api/recebimentos
#[utoipa::path(
    post,
    path = "/api/recebimentos",
    tag = "Recebimentos",
    request_body = LancarRecebimentoPayload,
    responses(
        (status = 201, description = "Recebimento lançado", body = Recebimento),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Título não encontrado")
    )
)]
pub async fn lancar_recebimento(
    State(app_state): State<AppState>,
    Json(payload): Json<LancarRecebimentoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    if payload.valor_recebido <= Decimal::ZERO {
        return Err(AppError::PayloadInvalido(
            "Valor recebido deve ser maior que zero".to_string(),
        ));
    }

    let recebimento = app_state
        .recebimento_service
        .lancar(
            &app_state.db_pool,
            payload.titulo_id,
            payload.data,
            payload.valor_recebido,
            payload.forma,
            payload.observacao.as_deref().filter(|s| !s.is_empty()),
            payload.parcial,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(recebimento)))
}

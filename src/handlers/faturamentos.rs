// src/handlers/faturamentos.rs

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
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::faturamento::Faturamento,
    services::faturamento_service::{Anexo, ResultadoCron, ResultadoFaturamento},
};

#[derive(Debug, Deserialize)]
pub struct ListarFaturamentosQuery {
    /// Filtro por dia de faturamento (YYYY-MM-DD).
    pub dia: Option<NaiveDate>,
}

// GET /api/faturamentos
#[utoipa::path(
    get,
    path = "/api/faturamentos",
    tag = "Faturamentos",
    params(
        ("dia" = Option<String>, Query, description = "Filtro por dia de faturamento (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "Lista de faturamentos", body = Vec<Faturamento>)
    )
)]
pub async fn listar_faturamentos(
    State(app_state): State<AppState>,
    Query(query): Query<ListarFaturamentosQuery>,
) -> Result<impl IntoResponse, AppError> {
    let faturamentos = app_state.faturamento_service.listar(query.dia).await?;

    Ok((StatusCode::OK, Json(faturamentos)))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrarFaturamentoPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Fazenda São João")]
    pub nome: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "+5565999990001")]
    pub telefone: String,

    #[schema(value_type = String, format = Date, example = "2025-08-01")]
    pub data_faturamento: NaiveDate,

    #[schema(value_type = String, format = Date, example = "2025-08-15")]
    pub data_vencimento: NaiveDate,

    #[schema(example = "15750.00")]
    pub valor: Decimal,

    /// Dias até o lembrete automático (0 desativa; máximo 30).
    #[serde(default)]
    #[schema(example = 7)]
    pub agendar_em_dias: i32,

    #[serde(default)]
    pub anexos: Vec<Anexo>,
}

// POST /api/faturamentos
#[utoipa::path(
    post,
    path = "/api/faturamentos",
    tag = "Faturamentos",
    request_body = RegistrarFaturamentoPayload,
    responses(
        (status = 200, description = "Faturamento registrado e mensagem enviada", body = ResultadoFaturamento),
        (status = 400, description = "Dados inválidos"),
        (status = 422, description = "Falha no envio da mensagem ou de anexos", body = ResultadoFaturamento)
    )
)]
pub async fn registrar_faturamento(
    State(app_state): State<AppState>,
    Json(payload): Json<RegistrarFaturamentoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let resultado = app_state
        .faturamento_service
        .registrar(
            &app_state.db_pool,
            payload.nome.trim(),
            payload.telefone.trim(),
            payload.data_faturamento,
            payload.data_vencimento,
            payload.valor,
            payload.agendar_em_dias,
            &payload.anexos,
        )
        .await?;

    let codigo = if resultado.ok { StatusCode::OK } else { StatusCode::UNPROCESSABLE_ENTITY };

    Ok((codigo, Json(resultado)))
}

// GET /api/faturamentos/cron
#[utoipa::path(
    get,
    path = "/api/faturamentos/cron",
    tag = "Faturamentos",
    responses(
        (status = 200, description = "Varredura de lembretes devidos executada", body = ResultadoCron)
    )
)]
pub async fn processar_lembretes(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let resultado = app_state
        .faturamento_service
        .processar_pendentes(&app_state.db_pool)
        .await?;

    Ok((StatusCode::OK, Json(resultado)))
}

// src/handlers/titulos.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::titulo::{Titulo, TituloComCliente, TituloStatus},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListarTitulosQuery {
    pub status: Option<String>,
    pub cliente_id: Option<Uuid>,
    pub search: Option<String>,
}

// "TODOS" é sentinela da UI: equivale a não filtrar.
fn parse_status(status: Option<&str>) -> Result<Option<TituloStatus>, AppError> {
    match status {
        None | Some("") | Some("TODOS") => Ok(None),
        Some(s) => serde_json::from_value::<TituloStatus>(Value::String(s.to_string()))
            .map(Some)
            .map_err(|_| AppError::PayloadInvalido(format!("Status inválido: {}", s))),
    }
}

// GET /api/titulos
#[utoipa::path(
    get,
    path = "/api/titulos",
    tag = "Títulos",
    params(
        ("status" = Option<String>, Query, description = "Filtro por status; TODOS desativa"),
        ("clienteId" = Option<Uuid>, Query, description = "Filtro por cliente"),
        ("search" = Option<String>, Query, description = "Busca por NF, título ou nome do cliente")
    ),
    responses(
        (status = 200, description = "Lista de títulos com resumo do cliente", body = Vec<TituloComCliente>)
    )
)]
pub async fn listar_titulos(
    State(app_state): State<AppState>,
    Query(query): Query<ListarTitulosQuery>,
) -> Result<impl IntoResponse, AppError> {
    let status = parse_status(query.status.as_deref())?;
    let busca = query.search.as_deref().filter(|s| !s.is_empty());

    let titulos = app_state
        .titulo_service
        .listar(status, query.cliente_id, busca)
        .await?;

    Ok((StatusCode::OK, Json(titulos)))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriarTituloPayload {
    pub cliente_id: Uuid,

    #[validate(length(min = 1, message = "required"))]
    #[serde(rename = "numeroNF")]
    #[schema(example = "NF-12401")]
    pub numero_nf: String,

    #[schema(example = "DUP-001")]
    pub numero_titulo: Option<String>,

    #[schema(example = "15000.00")]
    pub valor_principal: Decimal,

    #[serde(default)]
    #[schema(example = "750.00")]
    pub juros: Decimal,

    #[schema(example = "15750.00")]
    pub total: Decimal,

    #[serde(default)]
    #[schema(example = 12)]
    pub dias_atraso: i32,

    #[schema(value_type = Option<String>, format = Date)]
    pub vencimento: Option<NaiveDate>,

    pub status: Option<TituloStatus>,

    // Calculada a partir de NF + principal quando ausente.
    pub chave_match: Option<String>,
}

// POST /api/titulos
#[utoipa::path(
    post,
    path = "/api/titulos",
    tag = "Títulos",
    request_body = CriarTituloPayload,
    responses(
        (status = 201, description = "Título criado", body = Titulo),
        (status = 404, description = "Cliente não encontrado"),
        (status = 409, description = "Chave de deduplicação já existe")
    )
)]
pub async fn criar_titulo(
    State(app_state): State<AppState>,
    Json(payload): Json<CriarTituloPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let titulo = app_state
        .titulo_service
        .criar(
            &app_state.db_pool,
            payload.cliente_id,
            &payload.numero_nf,
            payload.numero_titulo.as_deref(),
            payload.valor_principal,
            payload.juros,
            payload.total,
            payload.dias_atraso,
            payload.vencimento,
            payload.status,
            payload.chave_match.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(titulo)))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AtualizarTituloPayload {
    #[validate(length(min = 1, message = "required"))]
    #[serde(rename = "numeroNF")]
    pub numero_nf: Option<String>,
    pub numero_titulo: Option<String>,
    pub valor_principal: Option<Decimal>,
    pub juros: Option<Decimal>,
    pub total: Option<Decimal>,
    pub dias_atraso: Option<i32>,
    #[schema(value_type = Option<String>, format = Date)]
    pub vencimento: Option<NaiveDate>,
    pub status: Option<TituloStatus>,
}

// PATCH /api/titulos/{id}
#[utoipa::path(
    patch,
    path = "/api/titulos/{id}",
    tag = "Títulos",
    request_body = AtualizarTituloPayload,
    params(
        ("id" = Uuid, Path, description = "ID do título")
    ),
    responses(
        (status = 200, description = "Título atualizado", body = Titulo),
        (status = 404, description = "Título não encontrado")
    )
)]
pub async fn atualizar_titulo(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AtualizarTituloPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let titulo = app_state
        .titulo_service
        .atualizar(
            &app_state.db_pool,
            id,
            payload.numero_nf.as_deref(),
            payload.numero_titulo.as_deref(),
            payload.valor_principal,
            payload.juros,
            payload.total,
            payload.dias_atraso,
            payload.vencimento,
            payload.status,
        )
        .await?;

    Ok((StatusCode::OK, Json(titulo)))
}

// DELETE /api/titulos/{id}
#[utoipa::path(
    delete,
    path = "/api/titulos/{id}",
    tag = "Títulos",
    params(
        ("id" = Uuid, Path, description = "ID do título")
    ),
    responses(
        (status = 200, description = "Título removido")
    )
)]
pub async fn deletar_titulo(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.titulo_service.deletar(&app_state.db_pool, id).await?;

    Ok((StatusCode::OK, Json(json!({ "ok": true }))))
}

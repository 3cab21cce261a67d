// src/handlers/clientes.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::cliente::Cliente,
};

#[derive(Debug, Deserialize)]
pub struct ListarClientesQuery {
    pub search: Option<String>,
}

// GET /api/clientes
#[utoipa::path(
    get,
    path = "/api/clientes",
    tag = "Clientes",
    params(
        ("search" = Option<String>, Query, description = "Filtro parcial por nome")
    ),
    responses(
        (status = 200, description = "Lista de clientes", body = Vec<Cliente>)
    )
)]
pub async fn listar_clientes(
    State(app_state): State<AppState>,
    Query(query): Query<ListarClientesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let busca = query.search.as_deref().filter(|s| !s.is_empty());
    let clientes = app_state.cliente_service.listar(busca).await?;

    Ok((StatusCode::OK, Json(clientes)))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriarClientePayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Fazenda São João")]
    pub nome: String,

    #[schema(example = "+5565999990001")]
    pub telefone: Option<String>,

    #[schema(example = "12.345.678/0001-90")]
    pub documento: Option<String>,
}

// POST /api/clientes
#[utoipa::path(
    post,
    path = "/api/clientes",
    tag = "Clientes",
    request_body = CriarClientePayload,
    responses(
        (status = 201, description = "Cliente criado", body = Cliente),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn criar_cliente(
    State(app_state): State<AppState>,
    Json(payload): Json<CriarClientePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let cliente = app_state
        .cliente_service
        .criar(
            &app_state.db_pool,
            payload.nome.trim(),
            payload.telefone.as_deref().map(str::trim).filter(|s| !s.is_empty()),
            payload.documento.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(cliente)))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AtualizarClientePayload {
    #[validate(length(min = 1, message = "required"))]
    pub nome: Option<String>,
    pub telefone: Option<String>,
    pub documento: Option<String>,
}

// PATCH /api/clientes/{id}
#[utoipa::path(
    patch,
    path = "/api/clientes/{id}",
    tag = "Clientes",
    request_body = AtualizarClientePayload,
    params(
        ("id" = Uuid, Path, description = "ID do cliente")
    ),
    responses(
        (status = 200, description = "Cliente atualizado", body = Cliente),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn atualizar_cliente(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AtualizarClientePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let cliente = app_state
        .cliente_service
        .atualizar(
            &app_state.db_pool,
            id,
            payload.nome.as_deref(),
            payload.telefone.as_deref(),
            payload.documento.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(cliente)))
}

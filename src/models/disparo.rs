// src/models/disparo.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "disparo_tipo", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisparoTipo {
    CobrancaAtraso,
    LembreteVencimento,
    FaturamentoInstantaneo,
    FaturamentoLembrete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "disparo_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisparoStatus {
    Enviado,
    Falhou,
    Pendente,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Disparo {
    pub id: Uuid,
    pub cliente_id: Option<Uuid>,
    pub titulo_id: Option<Uuid>,
    pub tipo: DisparoTipo,
    pub status: DisparoStatus,

    #[schema(example = "Vencido")]
    pub template: String,

    pub mensagem_enviada: Option<String>,

    // Texto devolvido pelo gateway: zaapId em caso de sucesso, erro caso contrário.
    pub resposta: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Projeção de listagem: disparo + resumo do cliente/título vinculados.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DisparoComVinculos {
    pub id: Uuid,
    pub cliente_id: Option<Uuid>,
    pub cliente_nome: Option<String>,
    pub cliente_telefone: Option<String>,
    pub titulo_id: Option<Uuid>,
    pub numero_nf: Option<String>,
    pub total_titulo: Option<Decimal>,
    pub tipo: DisparoTipo,
    pub status: DisparoStatus,
    pub template: String,
    pub resposta: Option<String>,
    pub created_at: DateTime<Utc>,
}

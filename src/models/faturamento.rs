// src/models/faturamento.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "lembrete_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LembreteStatus {
    Pendente,
    Enviado,
    Falhou,
    Desativado,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Faturamento {
    pub id: Uuid,

    // Vínculo opcional: preenchido quando (nome, telefone) bate com um cliente.
    pub cliente_id: Option<Uuid>,

    #[schema(example = "Fazenda São João")]
    pub nome: String,

    #[schema(example = "5565999990001")]
    pub telefone: String,

    #[schema(value_type = String, format = Date, example = "2025-08-01")]
    pub data_faturamento: NaiveDate,

    #[schema(value_type = String, format = Date, example = "2025-08-15")]
    pub data_vencimento: NaiveDate,

    #[schema(example = "15750.00")]
    pub valor: Decimal,

    #[schema(example = 7)]
    pub agendar_em_dias: i32,

    pub lembrete_agendado_para: Option<DateTime<Utc>>,

    pub status_lembrete: LembreteStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

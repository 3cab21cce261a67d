// src/models/recebimento.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "forma_recebimento", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FormaRecebimento {
    Pix,
    Dinheiro,
    Boleto,
    Transferencia,
    Outro,
}

// Registro de baixa; somente inserção, nunca alterado depois de criado.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Recebimento {
    pub id: Uuid,

    pub titulo_id: Uuid,

    #[schema(value_type = String, format = Date, example = "2025-07-20")]
    pub data: NaiveDate,

    #[schema(example = "15750.00")]
    pub valor_recebido: Decimal,

    pub forma: FormaRecebimento,

    #[schema(example = "Pago via PIX após 2º aviso")]
    pub observacao: Option<String>,

    pub parcial: bool,

    pub created_at: DateTime<Utc>,
}

// src/models/titulo.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "titulo_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TituloStatus {
    Aberto,
    Vencido,
    Recebido,
    Negociado,
    Cancelado,
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Titulo {
    pub id: Uuid,

    pub cliente_id: Uuid,

    #[schema(example = "NF-12401")]
    pub numero_nf: String,

    #[schema(example = "DUP-001")]
    pub numero_titulo: Option<String>,

    #[schema(example = "15000.00")]
    pub valor_principal: Decimal,

    #[schema(example = "750.00")]
    pub juros: Decimal,

    // Armazenado como veio da importação; nunca re-derivado de principal + juros.
    #[schema(example = "15750.00")]
    pub total: Decimal,

    #[schema(example = 12)]
    pub dias_atraso: i32,

    #[schema(value_type = Option<String>, format = Date, example = "2025-07-10")]
    pub vencimento: Option<NaiveDate>,

    pub status: TituloStatus,

    // Chave de deduplicação: numero_nf + valor principal com duas casas.
    #[schema(example = "NF-12401__15000.00")]
    pub chave_match: String,

    pub ultimo_disparo: Option<DateTime<Utc>>,

    #[schema(value_type = Option<String>, format = Date)]
    pub data_referencia: Option<NaiveDate>,

    #[schema(example = "planilha-cobranca")]
    pub origem_importacao: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Projeção de listagem: título + resumo do cliente (equivalente ao populate).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TituloComCliente {
    pub id: Uuid,
    pub cliente_id: Uuid,
    pub cliente_nome: String,
    pub cliente_telefone: Option<String>,
    pub numero_nf: String,
    pub numero_titulo: Option<String>,
    pub valor_principal: Decimal,
    pub juros: Decimal,
    pub total: Decimal,
    pub dias_atraso: i32,
    #[schema(value_type = Option<String>, format = Date)]
    pub vencimento: Option<NaiveDate>,
    pub status: TituloStatus,
    pub chave_match: String,
    pub ultimo_disparo: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

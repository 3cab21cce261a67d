// src/db/recebimento_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::recebimento::{FormaRecebimento, Recebimento},
};

const COLUNAS: &str = "id, titulo_id, data, valor_recebido, forma, observacao, parcial, created_at";

#[derive(Clone)]
pub struct RecebimentoRepository {
    pool: PgPool,
}

impl RecebimentoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn listar(&self, titulo_id: Option<Uuid>) -> Result<Vec<Recebimento>, AppError> {
        let sql = format!(
            r#"
            SELECT {COLUNAS}
            FROM recebimentos
            WHERE ($1::uuid IS NULL OR titulo_id = $1)
            ORDER BY created_at DESC
            "#
        );
        let recebimentos = sqlx::query_as::<_, Recebimento>(&sql)
            .bind(titulo_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(recebimentos)
    }

    // Somente inserção: recebimento nunca é alterado depois de lançado.
    pub async fn criar<'e, E>(
        &self,
        executor: E,
        titulo_id: Uuid,
        data: NaiveDate,
        valor_recebido: Decimal,
        forma: FormaRecebimento,
        observacao: Option<&str>,
        parcial: bool,
    ) -> Result<Recebimento, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            INSERT INTO recebimentos (titulo_id, data, valor_recebido, forma, observacao, parcial)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {COLUNAS}
            "#
        );
        let recebimento = sqlx::query_as::<_, Recebimento>(&sql)
            .bind(titulo_id)
            .bind(data)
            .bind(valor_recebido)
            .bind(forma)
            .bind(observacao)
            .bind(parcial)
            .fetch_one(executor)
            .await?;

        Ok(recebimento)
    }
}

// src/db/faturamento_repo.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::faturamento::{Faturamento, LembreteStatus},
};

const COLUNAS: &str = "id, cliente_id, nome, telefone, data_faturamento, data_vencimento, valor, \
                       agendar_em_dias, lembrete_agendado_para, status_lembrete, created_at, updated_at";

#[derive(Clone)]
pub struct FaturamentoRepository {
    pool: PgPool,
}

impl FaturamentoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn listar(&self, dia: Option<NaiveDate>) -> Result<Vec<Faturamento>, AppError> {
        let sql = format!(
            r#"
            SELECT {COLUNAS}
            FROM faturamentos
            WHERE ($1::date IS NULL OR data_faturamento = $1)
            ORDER BY created_at DESC
            "#
        );
        let faturamentos = sqlx::query_as::<_, Faturamento>(&sql)
            .bind(dia)
            .fetch_all(&self.pool)
            .await?;

        Ok(faturamentos)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn criar<'e, E>(
        &self,
        executor: E,
        cliente_id: Option<Uuid>,
        nome: &str,
        telefone: &str,
        data_faturamento: NaiveDate,
        data_vencimento: NaiveDate,
        valor: Decimal,
        agendar_em_dias: i32,
        lembrete_agendado_para: Option<DateTime<Utc>>,
        status_lembrete: LembreteStatus,
    ) -> Result<Faturamento, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            INSERT INTO faturamentos (
                cliente_id, nome, telefone, data_faturamento, data_vencimento,
                valor, agendar_em_dias, lembrete_agendado_para, status_lembrete
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {COLUNAS}
            "#
        );
        let faturamento = sqlx::query_as::<_, Faturamento>(&sql)
            .bind(cliente_id)
            .bind(nome)
            .bind(telefone)
            .bind(data_faturamento)
            .bind(data_vencimento)
            .bind(valor)
            .bind(agendar_em_dias)
            .bind(lembrete_agendado_para)
            .bind(status_lembrete)
            .fetch_one(executor)
            .await?;

        Ok(faturamento)
    }

    /// Lembretes PENDENTES cujo horário agendado já passou.
    pub async fn pendentes_vencidos(&self, agora: DateTime<Utc>) -> Result<Vec<Faturamento>, AppError> {
        let sql = format!(
            r#"
            SELECT {COLUNAS}
            FROM faturamentos
            WHERE status_lembrete = 'PENDENTE' AND lembrete_agendado_para <= $1
            ORDER BY lembrete_agendado_para ASC
            "#
        );
        let faturamentos = sqlx::query_as::<_, Faturamento>(&sql)
            .bind(agora)
            .fetch_all(&self.pool)
            .await?;

        Ok(faturamentos)
    }

    pub async fn atualizar_status_lembrete<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: LembreteStatus,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE faturamentos SET status_lembrete = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(executor)
            .await?;

        Ok(())
    }
}

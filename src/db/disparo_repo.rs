// src/db/disparo_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::disparo::{Disparo, DisparoComVinculos, DisparoStatus, DisparoTipo},
};

const COLUNAS: &str = "id, cliente_id, titulo_id, tipo, status, template, mensagem_enviada, \
                       resposta, created_at, updated_at";

#[derive(Clone)]
pub struct DisparoRepository {
    pool: PgPool,
}

impl DisparoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Listagem com resumo do cliente/título (populate da API original).
    pub async fn listar(&self, status: Option<DisparoStatus>) -> Result<Vec<DisparoComVinculos>, AppError> {
        let disparos = sqlx::query_as::<_, DisparoComVinculos>(
            r#"
            SELECT
                d.id, d.cliente_id, c.nome AS cliente_nome, c.telefone AS cliente_telefone,
                d.titulo_id, t.numero_nf, t.total AS total_titulo,
                d.tipo, d.status, d.template, d.resposta, d.created_at
            FROM disparos d
            LEFT JOIN clientes c ON c.id = d.cliente_id
            LEFT JOIN titulos t ON t.id = d.titulo_id
            WHERE ($1::disparo_status IS NULL OR d.status = $1)
            ORDER BY d.created_at DESC
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(disparos)
    }

    /// Registra o disparo antes da chamada ao gateway (status PENDENTE).
    pub async fn criar_pendente<'e, E>(
        &self,
        executor: E,
        cliente_id: Option<Uuid>,
        titulo_id: Option<Uuid>,
        tipo: DisparoTipo,
        template: &str,
        mensagem_enviada: &str,
    ) -> Result<Disparo, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            INSERT INTO disparos (cliente_id, titulo_id, tipo, status, template, mensagem_enviada)
            VALUES ($1, $2, $3, 'PENDENTE', $4, $5)
            RETURNING {COLUNAS}
            "#
        );
        let disparo = sqlx::query_as::<_, Disparo>(&sql)
            .bind(cliente_id)
            .bind(titulo_id)
            .bind(tipo)
            .bind(template)
            .bind(mensagem_enviada)
            .fetch_one(executor)
            .await?;

        Ok(disparo)
    }

    /// Registra um disparo já com o desfecho conhecido (fluxo de faturamento).
    pub async fn criar_finalizado<'e, E>(
        &self,
        executor: E,
        cliente_id: Option<Uuid>,
        titulo_id: Option<Uuid>,
        tipo: DisparoTipo,
        status: DisparoStatus,
        template: &str,
        mensagem_enviada: &str,
        resposta: Option<&str>,
    ) -> Result<Disparo, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            INSERT INTO disparos (cliente_id, titulo_id, tipo, status, template, mensagem_enviada, resposta)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {COLUNAS}
            "#
        );
        let disparo = sqlx::query_as::<_, Disparo>(&sql)
            .bind(cliente_id)
            .bind(titulo_id)
            .bind(tipo)
            .bind(status)
            .bind(template)
            .bind(mensagem_enviada)
            .bind(resposta)
            .fetch_one(executor)
            .await?;

        Ok(disparo)
    }

    /// Atualiza o registro PENDENTE com o resultado do gateway.
    pub async fn finalizar<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: DisparoStatus,
        resposta: Option<&str>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE disparos SET status = $2, resposta = $3, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(status)
            .bind(resposta)
            .execute(executor)
            .await?;

        Ok(())
    }
}

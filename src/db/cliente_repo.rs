// src/db/cliente_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::cliente::Cliente};

const COLUNAS: &str = "id, nome, telefone, documento, created_at, updated_at";

#[derive(Clone)]
pub struct ClienteRepository {
    pool: PgPool,
}

impl ClienteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Listagem com filtro opcional por nome (busca parcial, sem acento mágico).
    pub async fn listar(&self, busca: Option<&str>) -> Result<Vec<Cliente>, AppError> {
        let sql = format!(
            r#"
            SELECT {COLUNAS}
            FROM clientes
            WHERE ($1::text IS NULL OR nome ILIKE '%' || $1 || '%')
            ORDER BY nome ASC
            "#
        );
        let clientes = sqlx::query_as::<_, Cliente>(&sql)
            .bind(busca)
            .fetch_all(&self.pool)
            .await?;

        Ok(clientes)
    }

    pub async fn buscar_por_id(&self, id: Uuid) -> Result<Option<Cliente>, AppError> {
        let sql = format!("SELECT {COLUNAS} FROM clientes WHERE id = $1");
        let cliente = sqlx::query_as::<_, Cliente>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(cliente)
    }

    /// Busca por igualdade exata de (nome, telefone); telefone ausente só casa
    /// com cliente sem telefone.
    pub async fn buscar_por_nome_telefone<'e, E>(
        &self,
        executor: E,
        nome: &str,
        telefone: Option<&str>,
    ) -> Result<Option<Cliente>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            SELECT {COLUNAS}
            FROM clientes
            WHERE nome = $1 AND telefone IS NOT DISTINCT FROM $2
            LIMIT 1
            "#
        );
        let cliente = sqlx::query_as::<_, Cliente>(&sql)
            .bind(nome)
            .bind(telefone)
            .fetch_optional(executor)
            .await?;

        Ok(cliente)
    }

    pub async fn criar<'e, E>(
        &self,
        executor: E,
        nome: &str,
        telefone: Option<&str>,
        documento: Option<&str>,
    ) -> Result<Cliente, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            INSERT INTO clientes (nome, telefone, documento)
            VALUES ($1, $2, $3)
            RETURNING {COLUNAS}
            "#
        );
        let cliente = sqlx::query_as::<_, Cliente>(&sql)
            .bind(nome)
            .bind(telefone)
            .bind(documento)
            .fetch_one(executor)
            .await?;

        Ok(cliente)
    }

    /// Atualização parcial: campo ausente no payload mantém o valor atual.
    pub async fn atualizar<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        nome: Option<&str>,
        telefone: Option<&str>,
        documento: Option<&str>,
    ) -> Result<Option<Cliente>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            UPDATE clientes
            SET nome = COALESCE($2, nome),
                telefone = COALESCE($3, telefone),
                documento = COALESCE($4, documento),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUNAS}
            "#
        );
        let cliente = sqlx::query_as::<_, Cliente>(&sql)
            .bind(id)
            .bind(nome)
            .bind(telefone)
            .bind(documento)
            .fetch_optional(executor)
            .await?;

        Ok(cliente)
    }
}

// src/db/titulo_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::titulo::{Titulo, TituloComCliente, TituloStatus},
};

const COLUNAS: &str = "id, cliente_id, numero_nf, numero_titulo, valor_principal, juros, total, \
                       dias_atraso, vencimento, status, chave_match, ultimo_disparo, \
                       data_referencia, origem_importacao, created_at, updated_at";

#[derive(Clone)]
pub struct TituloRepository {
    pool: PgPool,
}

impl TituloRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Listagem com o resumo do cliente embutido (o "populate" da API).
    /// Todos os filtros são opcionais; busca cobre NF, título e nome.
    pub async fn listar(
        &self,
        status: Option<TituloStatus>,
        cliente_id: Option<Uuid>,
        busca: Option<&str>,
    ) -> Result<Vec<TituloComCliente>, AppError> {
        let titulos = sqlx::query_as::<_, TituloComCliente>(
            r#"
            SELECT
                t.id, t.cliente_id, c.nome AS cliente_nome, c.telefone AS cliente_telefone,
                t.numero_nf, t.numero_titulo, t.valor_principal, t.juros, t.total,
                t.dias_atraso, t.vencimento, t.status, t.chave_match, t.ultimo_disparo,
                t.created_at
            FROM titulos t
            INNER JOIN clientes c ON c.id = t.cliente_id
            WHERE ($1::titulo_status IS NULL OR t.status = $1)
              AND ($2::uuid IS NULL OR t.cliente_id = $2)
              AND ($3::text IS NULL
                   OR t.numero_nf ILIKE '%' || $3 || '%'
                   OR t.numero_titulo ILIKE '%' || $3 || '%'
                   OR c.nome ILIKE '%' || $3 || '%')
            ORDER BY t.created_at DESC
            "#,
        )
        .bind(status)
        .bind(cliente_id)
        .bind(busca)
        .fetch_all(&self.pool)
        .await?;

        Ok(titulos)
    }

    pub async fn buscar_por_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Titulo>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("SELECT {COLUNAS} FROM titulos WHERE id = $1");
        let titulo = sqlx::query_as::<_, Titulo>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(titulo)
    }

    pub async fn buscar_por_chave<'e, E>(
        &self,
        executor: E,
        chave_match: &str,
    ) -> Result<Option<Titulo>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("SELECT {COLUNAS} FROM titulos WHERE chave_match = $1");
        let titulo = sqlx::query_as::<_, Titulo>(&sql)
            .bind(chave_match)
            .fetch_optional(executor)
            .await?;

        Ok(titulo)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn criar<'e, E>(
        &self,
        executor: E,
        cliente_id: Uuid,
        numero_nf: &str,
        numero_titulo: Option<&str>,
        valor_principal: Decimal,
        juros: Decimal,
        total: Decimal,
        dias_atraso: i32,
        vencimento: Option<NaiveDate>,
        status: TituloStatus,
        chave_match: &str,
        data_referencia: Option<NaiveDate>,
        origem_importacao: Option<&str>,
    ) -> Result<Titulo, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            INSERT INTO titulos (
                cliente_id, numero_nf, numero_titulo, valor_principal, juros, total,
                dias_atraso, vencimento, status, chave_match, data_referencia, origem_importacao
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {COLUNAS}
            "#
        );
        let titulo = sqlx::query_as::<_, Titulo>(&sql)
            .bind(cliente_id)
            .bind(numero_nf)
            .bind(numero_titulo)
            .bind(valor_principal)
            .bind(juros)
            .bind(total)
            .bind(dias_atraso)
            .bind(vencimento)
            .bind(status)
            .bind(chave_match)
            .bind(data_referencia)
            .bind(origem_importacao)
            .fetch_one(executor)
            .await
            .map_err(|e| {
                // Chave de deduplicação já existente vira conflito, não 500.
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        return AppError::ChaveMatchDuplicada(chave_match.to_string());
                    }
                }
                e.into()
            })?;

        Ok(titulo)
    }

    /// Atualização parcial via COALESCE; status vem tipado do payload.
    #[allow(clippy::too_many_arguments)]
    pub async fn atualizar<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        numero_nf: Option<&str>,
        numero_titulo: Option<&str>,
        valor_principal: Option<Decimal>,
        juros: Option<Decimal>,
        total: Option<Decimal>,
        dias_atraso: Option<i32>,
        vencimento: Option<NaiveDate>,
        status: Option<TituloStatus>,
    ) -> Result<Option<Titulo>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            UPDATE titulos
            SET numero_nf = COALESCE($2, numero_nf),
                numero_titulo = COALESCE($3, numero_titulo),
                valor_principal = COALESCE($4, valor_principal),
                juros = COALESCE($5, juros),
                total = COALESCE($6, total),
                dias_atraso = COALESCE($7, dias_atraso),
                vencimento = COALESCE($8, vencimento),
                status = COALESCE($9, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUNAS}
            "#
        );
        let titulo = sqlx::query_as::<_, Titulo>(&sql)
            .bind(id)
            .bind(numero_nf)
            .bind(numero_titulo)
            .bind(valor_principal)
            .bind(juros)
            .bind(total)
            .bind(dias_atraso)
            .bind(vencimento)
            .bind(status)
            .fetch_optional(executor)
            .await?;

        Ok(titulo)
    }

    pub async fn atualizar_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: TituloStatus,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE titulos SET status = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(executor)
            .await?;

        Ok(())
    }

    /// Carimba o último disparo bem-sucedido.
    pub async fn marcar_disparo<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE titulos SET ultimo_disparo = NOW(), updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(())
    }

    pub async fn deletar<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let resultado = sqlx::query("DELETE FROM titulos WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(resultado.rows_affected())
    }
}

// src/services/titulo_service.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ClienteRepository, TituloRepository},
    importador::carteira::chave_match,
    models::titulo::{Titulo, TituloComCliente, TituloStatus},
};

#[derive(Clone)]
pub struct TituloService {
    repo: TituloRepository,
    cliente_repo: ClienteRepository,
}

impl TituloService {
    pub fn new(repo: TituloRepository, cliente_repo: ClienteRepository) -> Self {
        Self { repo, cliente_repo }
    }

    pub async fn listar(
        &self,
        status: Option<TituloStatus>,
        cliente_id: Option<Uuid>,
        busca: Option<&str>,
    ) -> Result<Vec<TituloComCliente>, AppError> {
        self.repo.listar(status, cliente_id, busca).await
    }

    /// Cadastro manual de título. A chave de deduplicação é calculada quando
    /// o chamador não manda uma.
    #[allow(clippy::too_many_arguments)]
    pub async fn criar(
        &self,
        pool: &PgPool,
        cliente_id: Uuid,
        numero_nf: &str,
        numero_titulo: Option<&str>,
        valor_principal: Decimal,
        juros: Decimal,
        total: Decimal,
        dias_atraso: i32,
        vencimento: Option<NaiveDate>,
        status: Option<TituloStatus>,
        chave: Option<&str>,
    ) -> Result<Titulo, AppError> {
        // A camada de API confere a existência antes de gravar.
        self.cliente_repo
            .buscar_por_id(cliente_id)
            .await?
            .ok_or(AppError::ClienteNaoEncontrado)?;

        let chave = match chave {
            Some(c) => c.to_string(),
            None => chave_match(numero_nf, valor_principal),
        };

        self.repo
            .criar(
                pool,
                cliente_id,
                numero_nf,
                numero_titulo,
                valor_principal,
                juros,
                total,
                dias_atraso,
                vencimento,
                status.unwrap_or(TituloStatus::Aberto),
                &chave,
                None,
                None,
            )
            .await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn atualizar(
        &self,
        pool: &PgPool,
        id: Uuid,
        numero_nf: Option<&str>,
        numero_titulo: Option<&str>,
        valor_principal: Option<Decimal>,
        juros: Option<Decimal>,
        total: Option<Decimal>,
        dias_atraso: Option<i32>,
        vencimento: Option<NaiveDate>,
        status: Option<TituloStatus>,
    ) -> Result<Titulo, AppError> {
        self.repo
            .atualizar(
                pool,
                id,
                numero_nf,
                numero_titulo,
                valor_principal,
                juros,
                total,
                dias_atraso,
                vencimento,
                status,
            )
            .await?
            .ok_or(AppError::TituloNaoEncontrado)
    }

    /// Exclusão definitiva, disponível só como ação administrativa explícita.
    pub async fn deletar(&self, pool: &PgPool, id: Uuid) -> Result<(), AppError> {
        self.repo.deletar(pool, id).await?;
        Ok(())
    }
}

// src/services/cliente_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, db::ClienteRepository, models::cliente::Cliente};

#[derive(Clone)]
pub struct ClienteService {
    repo: ClienteRepository,
}

impl ClienteService {
    pub fn new(repo: ClienteRepository) -> Self {
        Self { repo }
    }

    pub async fn listar(&self, busca: Option<&str>) -> Result<Vec<Cliente>, AppError> {
        self.repo.listar(busca).await
    }

    pub async fn criar(
        &self,
        pool: &PgPool,
        nome: &str,
        telefone: Option<&str>,
        documento: Option<&str>,
    ) -> Result<Cliente, AppError> {
        self.repo.criar(pool, nome, telefone, documento).await
    }

    pub async fn atualizar(
        &self,
        pool: &PgPool,
        id: Uuid,
        nome: Option<&str>,
        telefone: Option<&str>,
        documento: Option<&str>,
    ) -> Result<Cliente, AppError> {
        self.repo
            .atualizar(pool, id, nome, telefone, documento)
            .await?
            .ok_or(AppError::ClienteNaoEncontrado)
    }
}

// src/db/template_repo.rs

use sqlx::PgPool;

use crate::common::error::AppError;

// Registro de templates orientado a dados: o corpo mora no banco e pode ser
// editado sem redeploy. O seed inicial vem da migração.

#[derive(Clone)]
pub struct TemplateRepository {
    pool: PgPool,
}

impl TemplateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn buscar_corpo(&self, nome: &str) -> Result<Option<String>, AppError> {
        let corpo = sqlx::query_scalar::<_, String>(
            "SELECT corpo FROM mensagem_templates WHERE nome = $1",
        )
        .bind(nome)
        .fetch_optional(&self.pool)
        .await?;

        Ok(corpo)
    }
}

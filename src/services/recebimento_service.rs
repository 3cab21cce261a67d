// src/services/recebimento_service.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{RecebimentoRepository, TituloRepository},
    models::recebimento::{FormaRecebimento, Recebimento},
    models::titulo::TituloStatus,
};

/// Decide o novo status do título após uma baixa.
///
/// Só o recebimento integral (não parcial, valor ≥ total) muda o status; um
/// recebimento parcial nunca muda nada, mesmo que a soma das parcelas passe
/// do total — não há saldo acumulado entre recebimentos, a conciliação desses
/// casos é manual.
pub fn status_apos_recebimento(
    parcial: bool,
    valor_recebido: Decimal,
    total: Decimal,
) -> Option<TituloStatus> {
    if !parcial && valor_recebido >= total {
        Some(TituloStatus::Recebido)
    } else {
        None
    }
}

#[derive(Clone)]
pub struct RecebimentoService {
    repo: RecebimentoRepository,
    titulo_repo: TituloRepository,
}

impl RecebimentoService {
    pub fn new(repo: RecebimentoRepository, titulo_repo: TituloRepository) -> Self {
        Self { repo, titulo_repo }
    }

    pub async fn listar(&self, titulo_id: Option<Uuid>) -> Result<Vec<Recebimento>, AppError> {
        self.repo.listar(titulo_id).await
    }

    /// Lança a baixa e, quando for o caso, vira o status do título — as duas
    /// escritas na mesma transação.
    #[allow(clippy::too_many_arguments)]
    pub async fn lancar(
        &self,
        pool: &PgPool,
        titulo_id: Uuid,
        data: NaiveDate,
        valor_recebido: Decimal,
        forma: FormaRecebimento,
        observacao: Option<&str>,
        parcial: bool,
    ) -> Result<Recebimento, AppError> {
        let mut tx = pool.begin().await?;

        let titulo = self
            .titulo_repo
            .buscar_por_id(&mut *tx, titulo_id)
            .await?
            .ok_or(AppError::TituloNaoEncontrado)?;

        let recebimento = self
            .repo
            .criar(&mut *tx, titulo.id, data, valor_recebido, forma, observacao, parcial)
            .await?;

        if let Some(novo_status) = status_apos_recebimento(parcial, valor_recebido, titulo.total) {
            self.titulo_repo
                .atualizar_status(&mut *tx, titulo.id, novo_status)
                .await?;
        }

        tx.commit().await?;

        Ok(recebimento)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn recebimento_integral_vira_recebido() {
        assert_eq!(
            status_apos_recebimento(false, dec!(15750), dec!(15750)),
            Some(TituloStatus::Recebido)
        );
        assert_eq!(
            status_apos_recebimento(false, dec!(20000), dec!(15750)),
            Some(TituloStatus::Recebido)
        );
    }

    #[test]
    fn valor_insuficiente_nao_muda_status() {
        assert_eq!(status_apos_recebimento(false, dec!(100), dec!(15750)), None);
    }

    #[test]
    fn parcial_nunca_muda_status() {
        // Mesmo cobrindo o total, a baixa marcada como parcial não conclui o título.
        assert_eq!(status_apos_recebimento(true, dec!(15750), dec!(15750)), None);
        assert_eq!(status_apos_recebimento(true, dec!(99999), dec!(15750)), None);
    }
}

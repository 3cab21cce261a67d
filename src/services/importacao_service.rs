// src/services/importacao_service.rs

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::PgPool;
use std::collections::HashMap;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ClienteRepository, TituloRepository},
    importador::carteira::Carteira,
};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResultadoImportacao {
    pub ok: bool,
    pub clientes_salvos: usize,
    pub titulos_salvos: usize,
    pub duplicados: usize,
}

#[derive(Clone)]
pub struct ImportacaoService {
    cliente_repo: ClienteRepository,
    titulo_repo: TituloRepository,
}

impl ImportacaoService {
    pub fn new(cliente_repo: ClienteRepository, titulo_repo: TituloRepository) -> Self {
        Self { cliente_repo, titulo_repo }
    }

    /// Persiste uma carteira previamente montada: upsert de clientes por
    /// (nome, telefone) exatos e inserção de títulos pulando chaves já
    /// importadas.
    ///
    /// O lote inteiro roda numa única transação: qualquer falha desfaz tudo,
    /// nunca fica importação pela metade.
    pub async fn importar(
        &self,
        pool: &PgPool,
        carteira: &Carteira,
        data_referencia: Option<NaiveDate>,
        origem: Option<&str>,
    ) -> Result<ResultadoImportacao, AppError> {
        let mut tx = pool.begin().await?;

        // id sintético da carteira → id persistido, para religar os títulos.
        let mut mapa_clientes: HashMap<&str, Uuid> = HashMap::new();
        let mut clientes_salvos = 0usize;

        for cliente in &carteira.clientes {
            let existente = self
                .cliente_repo
                .buscar_por_nome_telefone(&mut *tx, &cliente.nome, cliente.telefone.as_deref())
                .await?;

            let id = match existente {
                Some(c) => c.id,
                None => {
                    self.cliente_repo
                        .criar(&mut *tx, &cliente.nome, cliente.telefone.as_deref(), None)
                        .await?
                        .id
                }
            };
            mapa_clientes.insert(cliente.id.as_str(), id);
            clientes_salvos += 1;
        }

        let mut titulos_salvos = 0usize;
        let mut duplicados = 0usize;

        for titulo in &carteira.titulos {
            // Título apontando para cliente fora do payload é ignorado.
            let Some(&cliente_id) = mapa_clientes.get(titulo.cliente_id.as_str()) else {
                continue;
            };

            // Colisão de chave significa "já importado": conta e segue.
            if self
                .titulo_repo
                .buscar_por_chave(&mut *tx, &titulo.chave_match)
                .await?
                .is_some()
            {
                duplicados += 1;
                continue;
            }

            self.titulo_repo
                .criar(
                    &mut *tx,
                    cliente_id,
                    &titulo.numero_nf,
                    titulo.numero_titulo.as_deref(),
                    titulo.valor_principal,
                    titulo.juros,
                    titulo.total,
                    titulo.dias_atraso,
                    None,
                    titulo.status,
                    &titulo.chave_match,
                    data_referencia,
                    origem,
                )
                .await?;
            titulos_salvos += 1;
        }

        tx.commit().await?;

        tracing::info!(
            clientes = clientes_salvos,
            titulos = titulos_salvos,
            duplicados,
            "Importação concluída"
        );

        Ok(ResultadoImportacao { ok: true, clientes_salvos, titulos_salvos, duplicados })
    }
}

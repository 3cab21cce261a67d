// src/services/disparo_service.rs

use serde::Serialize;
use sqlx::PgPool;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ClienteRepository, DisparoRepository, TemplateRepository, TituloRepository},
    mensagem::{aplicar_template, VarsMensagem, CORPO_FALLBACK, TEMPLATE_PADRAO},
    models::disparo::{DisparoComVinculos, DisparoStatus, DisparoTipo},
    zapi::ZapiClient,
};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResultadoDisparo {
    pub ok: bool,
    pub status: DisparoStatus,
    pub disparo: Uuid,
    pub zaap_id: Option<String>,
    pub erro: Option<String>,
}

#[derive(Clone)]
pub struct DisparoService {
    repo: DisparoRepository,
    titulo_repo: TituloRepository,
    cliente_repo: ClienteRepository,
    template_repo: TemplateRepository,
    zapi: ZapiClient,
}

impl DisparoService {
    pub fn new(
        repo: DisparoRepository,
        titulo_repo: TituloRepository,
        cliente_repo: ClienteRepository,
        template_repo: TemplateRepository,
        zapi: ZapiClient,
    ) -> Self {
        Self { repo, titulo_repo, cliente_repo, template_repo, zapi }
    }

    pub async fn listar(&self, status: Option<DisparoStatus>) -> Result<Vec<DisparoComVinculos>, AppError> {
        self.repo.listar(status).await
    }

    /// Corpo do template pedido; nome desconhecido cai para o padrão.
    async fn corpo_do_template(&self, nome: &str) -> Result<String, AppError> {
        if let Some(corpo) = self.template_repo.buscar_corpo(nome).await? {
            return Ok(corpo);
        }
        match self.template_repo.buscar_corpo(TEMPLATE_PADRAO).await? {
            Some(corpo) => Ok(corpo),
            None => Ok(CORPO_FALLBACK.to_string()),
        }
    }

    /// Renderiza e envia a cobrança de um título pelo gateway.
    ///
    /// O registro nasce PENDENTE antes da chamada externa e é finalizado com
    /// o desfecho real — falha de envio não é retentada.
    pub async fn disparar(
        &self,
        pool: &PgPool,
        titulo_id: Option<Uuid>,
        chave_match: Option<&str>,
        template: &str,
    ) -> Result<ResultadoDisparo, AppError> {
        let titulo = match (titulo_id, chave_match) {
            (Some(id), _) => self.titulo_repo.buscar_por_id(pool, id).await?,
            (None, Some(chave)) => self.titulo_repo.buscar_por_chave(pool, chave).await?,
            (None, None) => {
                return Err(AppError::PayloadInvalido(
                    "tituloId ou chaveMatch é obrigatório".to_string(),
                ))
            }
        }
        .ok_or(AppError::TituloNaoEncontrado)?;

        let cliente = self
            .cliente_repo
            .buscar_por_id(titulo.cliente_id)
            .await?
            .ok_or(AppError::ClienteNaoEncontrado)?;

        let telefone = cliente.telefone.clone().ok_or(AppError::ClienteSemTelefone)?;

        let corpo = self.corpo_do_template(template).await?;
        let mensagem = aplicar_template(
            &corpo,
            &VarsMensagem {
                cliente: cliente.nome.clone(),
                numero_nf: titulo.numero_nf.clone(),
                total: titulo.total,
                dias_atraso: titulo.dias_atraso,
                vencimento: titulo.vencimento,
            },
        );

        let disparo = self
            .repo
            .criar_pendente(
                pool,
                Some(cliente.id),
                Some(titulo.id),
                DisparoTipo::CobrancaAtraso,
                template,
                &mensagem,
            )
            .await?;

        let envio = self.zapi.enviar_texto(&telefone, &mensagem).await;

        let status = if envio.sucesso { DisparoStatus::Enviado } else { DisparoStatus::Falhou };
        let resposta = if envio.sucesso {
            format!("zaapId: {}", envio.zaap_id.as_deref().unwrap_or("-"))
        } else {
            envio.erro.clone().unwrap_or_else(|| "Falha ao enviar mensagem".to_string())
        };

        self.repo
            .finalizar(pool, disparo.id, status, Some(&resposta))
            .await?;

        if envio.sucesso {
            self.titulo_repo.marcar_disparo(pool, titulo.id).await?;
        } else {
            tracing::warn!(titulo = %titulo.id, erro = ?envio.erro, "Disparo falhou no gateway");
        }

        Ok(ResultadoDisparo {
            ok: envio.sucesso,
            status,
            disparo: disparo.id,
            zaap_id: envio.zaap_id,
            erro: envio.erro,
        })
    }
}

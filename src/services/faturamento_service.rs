// src/services/faturamento_service.rs

use chrono::{DateTime, Days, FixedOffset, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::{error::AppError, telefone::telefone_valido},
    db::{ClienteRepository, DisparoRepository, FaturamentoRepository, TemplateRepository},
    mensagem::{aplicar_template, VarsMensagem},
    models::disparo::{DisparoStatus, DisparoTipo},
    models::faturamento::{Faturamento, LembreteStatus},
    zapi::ZapiClient,
};

const MAX_ANEXOS: usize = 5;
const MAX_DIAS_LEMBRETE: i32 = 30;

/// Anexo repassado ao gateway (URL de boleto/nota, nunca bytes).
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Anexo {
    pub document: String,
    pub file_name: Option<String>,
    pub extension: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResultadoFaturamento {
    pub ok: bool,
    pub faturamento_id: Uuid,
    pub status_lembrete: LembreteStatus,
    pub erro: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResultadoCron {
    pub ok: bool,
    pub processados: usize,
    pub enviados: usize,
    pub falhas: usize,
}

/// Horário agendado do lembrete: 09:00 de Brasília, `dias` dias após o
/// faturamento. Zero dias desativa o lembrete.
pub fn slot_lembrete(data_faturamento: NaiveDate, dias: i32) -> Option<DateTime<Utc>> {
    if dias <= 0 {
        return None;
    }
    let brt = FixedOffset::west_opt(3 * 3600)?;
    data_faturamento
        .checked_add_days(Days::new(dias as u64))?
        .and_hms_opt(9, 0, 0)?
        .and_local_timezone(brt)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}

#[derive(Clone)]
pub struct FaturamentoService {
    repo: FaturamentoRepository,
    cliente_repo: ClienteRepository,
    disparo_repo: DisparoRepository,
    template_repo: TemplateRepository,
    zapi: ZapiClient,
}

impl FaturamentoService {
    pub fn new(
        repo: FaturamentoRepository,
        cliente_repo: ClienteRepository,
        disparo_repo: DisparoRepository,
        template_repo: TemplateRepository,
        zapi: ZapiClient,
    ) -> Self {
        Self { repo, cliente_repo, disparo_repo, template_repo, zapi }
    }

    pub async fn listar(&self, dia: Option<NaiveDate>) -> Result<Vec<Faturamento>, AppError> {
        self.repo.listar(dia).await
    }

    async fn corpo(&self, nome: &str, fallback: &str) -> Result<String, AppError> {
        Ok(self
            .template_repo
            .buscar_corpo(nome)
            .await?
            .unwrap_or_else(|| fallback.to_string()))
    }

    /// Registra o faturamento, envia a mensagem instantânea com os anexos e
    /// grava um disparo com o desfecho agregado.
    #[allow(clippy::too_many_arguments)]
    pub async fn registrar(
        &self,
        pool: &PgPool,
        nome: &str,
        telefone: &str,
        data_faturamento: NaiveDate,
        data_vencimento: NaiveDate,
        valor: Decimal,
        agendar_em_dias: i32,
        anexos: &[Anexo],
    ) -> Result<ResultadoFaturamento, AppError> {
        if valor <= Decimal::ZERO {
            return Err(AppError::PayloadInvalido("Valor inválido".to_string()));
        }
        if data_vencimento < data_faturamento {
            return Err(AppError::PayloadInvalido(
                "Data de vencimento não pode ser anterior ao faturamento".to_string(),
            ));
        }
        if !telefone_valido(telefone) {
            return Err(AppError::PayloadInvalido("Telefone inválido".to_string()));
        }

        // Vínculo opcional com cliente já cadastrado, por igualdade exata.
        let cliente_id = self
            .cliente_repo
            .buscar_por_nome_telefone(pool, nome, Some(telefone))
            .await?
            .map(|c| c.id);

        let dias = agendar_em_dias.clamp(0, MAX_DIAS_LEMBRETE);
        let lembrete_agendado_para = slot_lembrete(data_faturamento, dias);
        let status_lembrete = if lembrete_agendado_para.is_some() {
            LembreteStatus::Pendente
        } else {
            LembreteStatus::Desativado
        };

        let faturamento = self
            .repo
            .criar(
                pool,
                cliente_id,
                nome,
                telefone,
                data_faturamento,
                data_vencimento,
                valor,
                dias,
                lembrete_agendado_para,
                status_lembrete,
            )
            .await?;

        let corpo = self
            .corpo("Faturamento", "Informamos que o pagamento vence em {vencimento}, no valor de {total}.")
            .await?;
        let mensagem = aplicar_template(
            &corpo,
            &VarsMensagem {
                cliente: nome.to_string(),
                numero_nf: String::new(),
                total: valor,
                dias_atraso: 0,
                vencimento: Some(data_vencimento),
            },
        );

        let envio_texto = self.zapi.enviar_texto(telefone, &mensagem).await;

        // Anexos só seguem se o texto foi entregue; limite de cinco por envio.
        let mut resultados_docs = Vec::new();
        if envio_texto.sucesso {
            for (i, anexo) in anexos.iter().take(MAX_ANEXOS).enumerate() {
                let ext = anexo
                    .extension
                    .as_deref()
                    .unwrap_or("pdf")
                    .to_lowercase()
                    .trim_start_matches('.')
                    .to_string();
                let ext = if ext.is_empty() { "pdf".to_string() } else { ext };
                let nome_arquivo = anexo
                    .file_name
                    .clone()
                    .unwrap_or_else(|| format!("faturamento-{}.{}", i + 1, ext));

                let r = self
                    .zapi
                    .enviar_documento(telefone, &anexo.document, Some(&nome_arquivo), None, Some(&ext))
                    .await;
                resultados_docs.push(r);
            }
        }

        let docs_ok = resultados_docs.iter().all(|r| r.sucesso);
        let sucesso_geral = envio_texto.sucesso && docs_ok;

        let resposta = if sucesso_geral {
            let docs = if resultados_docs.is_empty() {
                String::new()
            } else {
                format!(
                    "; docs: {}/{} OK",
                    resultados_docs.iter().filter(|r| r.sucesso).count(),
                    resultados_docs.len()
                )
            };
            format!("texto OK (zaapId: {}){}", envio_texto.zaap_id.as_deref().unwrap_or("-"), docs)
        } else {
            envio_texto
                .erro
                .clone()
                .or_else(|| resultados_docs.iter().find(|r| !r.sucesso).and_then(|r| r.erro.clone()))
                .unwrap_or_else(|| "Falha ao enviar mensagem/documentos".to_string())
        };

        self.disparo_repo
            .criar_finalizado(
                pool,
                cliente_id,
                None,
                DisparoTipo::FaturamentoInstantaneo,
                if sucesso_geral { DisparoStatus::Enviado } else { DisparoStatus::Falhou },
                "Faturamento",
                &mensagem,
                Some(&resposta),
            )
            .await?;

        Ok(ResultadoFaturamento {
            ok: sucesso_geral,
            faturamento_id: faturamento.id,
            status_lembrete,
            erro: if sucesso_geral { None } else { Some(resposta) },
        })
    }

    /// Varredura dos lembretes devidos: envia, atualiza o status e registra
    /// um disparo por faturamento. Falha de um item não interrompe os demais.
    pub async fn processar_pendentes(&self, pool: &PgPool) -> Result<ResultadoCron, AppError> {
        let pendentes = self.repo.pendentes_vencidos(Utc::now()).await?;

        let corpo = self
            .corpo(
                "FaturamentoLembrete",
                "Passando para lembrar que o boleto no valor de {total} vence em {vencimento}.",
            )
            .await?;

        let mut enviados = 0usize;
        let mut falhas = 0usize;

        for faturamento in &pendentes {
            let mensagem = aplicar_template(
                &corpo,
                &VarsMensagem {
                    cliente: faturamento.nome.clone(),
                    numero_nf: String::new(),
                    total: faturamento.valor,
                    dias_atraso: 0,
                    vencimento: Some(faturamento.data_vencimento),
                },
            );

            let envio = self.zapi.enviar_texto(&faturamento.telefone, &mensagem).await;

            if envio.sucesso {
                enviados += 1;
            } else {
                falhas += 1;
            }

            self.repo
                .atualizar_status_lembrete(
                    pool,
                    faturamento.id,
                    if envio.sucesso { LembreteStatus::Enviado } else { LembreteStatus::Falhou },
                )
                .await?;

            let resposta = if envio.sucesso {
                format!("zaapId: {}", envio.zaap_id.as_deref().unwrap_or("-"))
            } else {
                envio.erro.clone().unwrap_or_else(|| "Falha ao enviar lembrete".to_string())
            };

            self.disparo_repo
                .criar_finalizado(
                    pool,
                    faturamento.cliente_id,
                    None,
                    DisparoTipo::FaturamentoLembrete,
                    if envio.sucesso { DisparoStatus::Enviado } else { DisparoStatus::Falhou },
                    "FaturamentoLembrete",
                    &mensagem,
                    Some(&resposta),
                )
                .await?;
        }

        tracing::info!(processados = pendentes.len(), enviados, falhas, "Varredura de lembretes concluída");

        Ok(ResultadoCron { ok: true, processados: pendentes.len(), enviados, falhas })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn slot_lembrete_nove_da_manha_brt() {
        let data = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        let slot = slot_lembrete(data, 7).unwrap();
        // 09:00 -03:00 = 12:00 UTC, sete dias depois do faturamento.
        assert_eq!(slot.to_rfc3339(), "2025-08-08T12:00:00+00:00");
    }

    #[test]
    fn zero_dias_desativa_o_lembrete() {
        let data = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        assert_eq!(slot_lembrete(data, 0), None);
        assert_eq!(slot_lembrete(data, -3), None);
    }
}

// src/zapi.rs
//
// Cliente do gateway Z-API (WhatsApp). Sem retry e sem backoff: falha de
// envio é terminal para a chamada e vira resultado com `sucesso = false`.

use reqwest::Client;
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Clone)]
pub struct ZapiClient {
    client: Client,
    base_url: String,
    client_token: Option<String>,
}

/// Resultado de um envio, espelhando o contrato do gateway.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZapiEnvio {
    pub sucesso: bool,
    pub zaap_id: Option<String>,
    pub message_id: Option<String>,
    pub erro: Option<String>,
}

impl ZapiEnvio {
    fn falha(erro: String) -> Self {
        Self { sucesso: false, zaap_id: None, message_id: None, erro: Some(erro) }
    }
}

/// Monta a URL base padrão a partir da instância e do token do painel.
pub fn base_url_zapi(instance_id: &str, token: &str) -> String {
    format!("https://api.z-api.io/instances/{}/token/{}", instance_id, token)
}

// O gateway espera DDI + número, sem `+`, espaços, parênteses ou traços.
fn sanitizar_telefone(telefone: &str) -> String {
    telefone
        .chars()
        .filter(|c| !matches!(c, ' ' | '+' | '-' | '(' | ')'))
        .collect()
}

fn extrair_erro(corpo: &Value, status: reqwest::StatusCode) -> String {
    corpo
        .get("error")
        .and_then(Value::as_str)
        .or_else(|| corpo.get("message").and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

impl ZapiClient {
    pub fn new(base_url: String, client_token: Option<String>) -> Self {
        Self { client: Client::new(), base_url, client_token }
    }

    async fn postar(&self, url: &str, corpo: Value) -> ZapiEnvio {
        let mut req = self.client.post(url).json(&corpo);
        if let Some(token) = &self.client_token {
            req = req.header("client-token", token);
        }

        let resposta = match req.send().await {
            Ok(r) => r,
            Err(e) => return ZapiEnvio::falha(e.to_string()),
        };

        let status = resposta.status();
        let dados: Value = resposta.json().await.unwrap_or(Value::Null);

        if !status.is_success() {
            return ZapiEnvio::falha(extrair_erro(&dados, status));
        }

        ZapiEnvio {
            sucesso: true,
            zaap_id: dados.get("zaapId").and_then(Value::as_str).map(str::to_string),
            message_id: dados.get("messageId").and_then(Value::as_str).map(str::to_string),
            erro: None,
        }
    }

    /// Envia mensagem de texto para um número com DDI (ex.: `5565999990001`).
    pub async fn enviar_texto(&self, telefone: &str, mensagem: &str) -> ZapiEnvio {
        let url = format!("{}/send-text", self.base_url);
        let corpo = json!({
            "phone": sanitizar_telefone(telefone),
            "message": mensagem,
        });
        self.postar(&url, corpo).await
    }

    /// Envia um documento (boleto, nota fiscal) pelo endpoint por extensão.
    pub async fn enviar_documento(
        &self,
        telefone: &str,
        documento: &str,
        nome_arquivo: Option<&str>,
        legenda: Option<&str>,
        extensao: Option<&str>,
    ) -> ZapiEnvio {
        let ext = extensao.unwrap_or("pdf").trim_start_matches('.');
        let url = format!("{}/send-document/{}", self.base_url, ext);

        let mut corpo = json!({
            "phone": sanitizar_telefone(telefone),
            "document": documento,
        });
        if let Some(nome) = nome_arquivo {
            corpo["fileName"] = json!(nome);
        }
        if let Some(caption) = legenda {
            corpo["caption"] = json!(caption);
        }
        self.postar(&url, corpo).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn sanitiza_telefone_para_o_gateway() {
        assert_eq!(sanitizar_telefone("+55 (65) 99999-0001"), "5565999990001");
    }

    #[tokio::test]
    async fn envio_de_texto_com_sucesso() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/send-text")
                    .json_body(serde_json::json!({
                        "phone": "5565999990001",
                        "message": "Olá!",
                    }));
                then.status(200)
                    .json_body(serde_json::json!({ "zaapId": "z-1", "messageId": "m-1" }));
            })
            .await;

        let client = ZapiClient::new(server.base_url(), None);
        let envio = client.enviar_texto("+55 65 99999-0001", "Olá!").await;

        mock.assert_async().await;
        assert!(envio.sucesso);
        assert_eq!(envio.zaap_id.as_deref(), Some("z-1"));
        assert_eq!(envio.erro, None);
    }

    #[tokio::test]
    async fn falha_do_gateway_carrega_a_mensagem_de_erro() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/send-text");
                then.status(400)
                    .json_body(serde_json::json!({ "error": "invalid phone" }));
            })
            .await;

        let client = ZapiClient::new(server.base_url(), None);
        let envio = client.enviar_texto("123", "oi").await;

        assert!(!envio.sucesso);
        assert_eq!(envio.erro.as_deref(), Some("invalid phone"));
    }

    #[tokio::test]
    async fn falha_sem_corpo_vira_http_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/send-text");
                then.status(500);
            })
            .await;

        let client = ZapiClient::new(server.base_url(), None);
        let envio = client.enviar_texto("5565999990001", "oi").await;

        assert!(!envio.sucesso);
        assert_eq!(envio.erro.as_deref(), Some("HTTP 500"));
    }

    #[tokio::test]
    async fn client_token_vai_no_header_quando_configurado() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/send-document/pdf")
                    .header("client-token", "segredo");
                then.status(200).json_body(serde_json::json!({ "zaapId": "z-2" }));
            })
            .await;

        let client = ZapiClient::new(server.base_url(), Some("segredo".to_string()));
        let envio = client
            .enviar_documento("5565999990001", "https://files/nf.pdf", Some("nf.pdf"), None, Some(".pdf"))
            .await;

        mock.assert_async().await;
        assert!(envio.sucesso);
    }
}

// src/importador/csv.rs

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

// Parser tolerante para exportações heterogêneas de planilha.
// Sem suporte a aspas ou campos multi-linha: célula contendo o separador
// quebra a linha (limitação aceita do formato de entrada).

pub(crate) fn norm(s: &str) -> String {
    s.trim().to_string()
}

/// Chave de comparação: minúsculas, espaços internos colapsados.
pub(crate) fn norm_key(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn digits_only(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Interpreta um valor monetário em texto livre.
///
/// Convenção brasileira: havendo vírgula, ela é o separador decimal e o ponto
/// é separador de milhar ("1.234,56" → 1234.56). Sem vírgula, parse direto.
/// Entrada não numérica vira 0 silenciosamente.
pub fn parse_brl(entrada: &str) -> Decimal {
    let s = norm(entrada);
    if s.is_empty() {
        return Decimal::ZERO;
    }
    let tem_virgula = s.contains(',');
    let limpo: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    let candidato = if tem_virgula {
        limpo.replace('.', "").replace(',', ".")
    } else {
        limpo
    };
    Decimal::from_str(&candidato).unwrap_or(Decimal::ZERO)
}

/// Coerção frouxa para inteiro: vírgula vira ponto, trunca, falha vira 0.
pub fn safe_int(entrada: &str) -> i32 {
    let s = norm(entrada).replace(',', ".");
    Decimal::from_str(&s)
        .ok()
        .and_then(|d| d.trunc().to_i32())
        .unwrap_or(0)
}

/// Resolve um campo lógico contra os cabeçalhos reais da planilha.
///
/// Primeiro tenta casamento exato (normalizado), depois substring. Retorna
/// string vazia quando nenhum cabeçalho serve.
pub(crate) fn pick(colunas: &[(String, String)], candidatos: &[&str]) -> String {
    for c in candidatos {
        let alvo = norm_key(c);
        if let Some((_, v)) = colunas.iter().find(|(k, _)| norm_key(k) == alvo) {
            return v.clone();
        }
    }
    for (k, v) in colunas {
        let nk = norm_key(k);
        if candidatos.iter().any(|c| nk.contains(&norm_key(c))) {
            return v.clone();
        }
    }
    String::new()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LinhaPlanilha {
    pub nome: String,
    pub telefone: Option<String>,
    #[serde(rename = "numeroNF")]
    pub numero_nf: Option<String>,
    pub numero_titulo: Option<String>,
    pub valor_principal: Decimal,
    pub juros: Decimal,
    pub total: Decimal,
    pub dias_atraso: i32,
}

/// Quebra o texto bruto em linhas chaveadas pelo cabeçalho e normaliza os
/// campos reconhecidos. Linhas sem nome ou sem NF/título são descartadas.
pub fn parse_csv_texto(texto: &str) -> Vec<LinhaPlanilha> {
    let linhas: Vec<&str> = texto
        .split(['\n', '\r'])
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if linhas.len() < 2 {
        return Vec::new();
    }

    // Separador inferido pelo cabeçalho: ponto e vírgula tem precedência.
    let sep = if linhas[0].contains(';') { ';' } else { ',' };
    let cabecalhos: Vec<String> = linhas[0].split(sep).map(|h| h.trim().to_string()).collect();

    let mut resultado = Vec::new();
    for linha in &linhas[1..] {
        let celulas: Vec<&str> = linha.split(sep).collect();
        let colunas: Vec<(String, String)> = cabecalhos
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), celulas.get(i).map(|c| c.trim()).unwrap_or("").to_string()))
            .collect();

        let nome = pick(&colunas, &["nome", "cliente", "razao social", "razão social"]);
        let telefone = pick(&colunas, &["telefone", "celular", "whatsapp"]);
        let numero_nf = pick(&colunas, &["numero_nf", "numero nf", "número nf", "nf", "nota fiscal"]);
        let numero_titulo = pick(
            &colunas,
            &["numero_titulo", "numero do titulo", "número do título", "titulo", "duplicata"],
        );
        let valor_principal = parse_brl(&pick(
            &colunas,
            &["valor_principal", "valor principal", "valor nf", "valor"],
        ));
        let juros = parse_brl(&pick(&colunas, &["juros", "valor juros", "juros (r$)"]));
        let total = parse_brl(&pick(&colunas, &["total", "valor total", "total (r$)"]));
        let dias_atraso = safe_int(&pick(
            &colunas,
            &["dias_atraso", "dias em atraso", "dias atraso", "atraso"],
        ));

        let nome = norm(&nome);
        let numero_nf = Some(norm(&numero_nf)).filter(|s| !s.is_empty());
        let numero_titulo = Some(norm(&numero_titulo)).filter(|s| !s.is_empty());

        if nome.is_empty() || (numero_nf.is_none() && numero_titulo.is_none()) {
            continue;
        }

        resultado.push(LinhaPlanilha {
            nome,
            telefone: Some(telefone).filter(|s| !s.is_empty()),
            numero_nf,
            numero_titulo,
            valor_principal,
            juros,
            total: if total.is_zero() { valor_principal + juros } else { total },
            dias_atraso,
        });
    }

    resultado
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn parse_brl_convencao_brasileira() {
        assert_eq!(parse_brl("1.234,56"), dec!(1234.56));
        assert_eq!(parse_brl("1234.56"), dec!(1234.56));
        assert_eq!(parse_brl("15000"), dec!(15000));
        assert_eq!(parse_brl(" 2 500,00 "), dec!(2500.00));
    }

    #[test]
    fn parse_brl_lixo_vira_zero() {
        assert_eq!(parse_brl(""), Decimal::ZERO);
        assert_eq!(parse_brl("abc"), Decimal::ZERO);
        assert_eq!(parse_brl("R$"), Decimal::ZERO);
    }

    #[test]
    fn safe_int_trunca_e_tolera_virgula() {
        assert_eq!(safe_int("12"), 12);
        assert_eq!(safe_int("12,7"), 12);
        assert_eq!(safe_int("12.7"), 12);
        assert_eq!(safe_int("xyz"), 0);
        assert_eq!(safe_int(""), 0);
    }

    #[test]
    fn pick_casa_exato_antes_de_substring() {
        let colunas = vec![
            ("Nome do Responsavel".to_string(), "errado".to_string()),
            ("NOME".to_string(), "certo".to_string()),
        ];
        assert_eq!(pick(&colunas, &["nome"]), "certo");
    }

    #[test]
    fn pick_cai_para_substring_e_depois_vazio() {
        let colunas = vec![("Razão Social do Cliente".to_string(), "Agro Ltda".to_string())];
        assert_eq!(pick(&colunas, &["razão social"]), "Agro Ltda");
        assert_eq!(pick(&colunas, &["cnpj"]), "");
    }

    #[test]
    fn infere_separador_pelo_cabecalho() {
        let com_virgula = "nome,nf,valor\nAgro Ltda,NF-1,100";
        let linhas = parse_csv_texto(com_virgula);
        assert_eq!(linhas.len(), 1);
        assert_eq!(linhas[0].numero_nf.as_deref(), Some("NF-1"));
    }

    #[test]
    fn linha_do_cenario_ponta_a_ponta() {
        let csv = "nome;telefone;numero_nf;numero_titulo;valor_principal;juros;total;dias_atraso\n\
                   Fazenda São João;+5565999990001;NF-12401;DUP-001;15000;750;15750;12";
        let linhas = parse_csv_texto(csv);
        assert_eq!(linhas.len(), 1);
        let l = &linhas[0];
        assert_eq!(l.nome, "Fazenda São João");
        assert_eq!(l.telefone.as_deref(), Some("+5565999990001"));
        assert_eq!(l.numero_nf.as_deref(), Some("NF-12401"));
        assert_eq!(l.numero_titulo.as_deref(), Some("DUP-001"));
        assert_eq!(l.valor_principal, dec!(15000));
        assert_eq!(l.juros, dec!(750));
        assert_eq!(l.total, dec!(15750));
        assert_eq!(l.dias_atraso, 12);
    }

    #[test]
    fn total_ausente_cai_para_principal_mais_juros() {
        let csv = "nome;nf;valor principal;juros\nAgro Ltda;NF-9;1.000,00;50,00";
        let linhas = parse_csv_texto(csv);
        assert_eq!(linhas[0].total, dec!(1050.00));
    }

    #[test]
    fn descarta_linha_sem_nome_ou_sem_nf_e_titulo() {
        let csv = "nome;nf;valor\n;NF-1;10\nAgro Ltda;;20";
        assert!(parse_csv_texto(csv).is_empty());
    }

    #[test]
    fn parse_e_deterministico() {
        let csv = "nome;nf;valor;dias_atraso\nAgro Ltda;NF-1;1.500,00;3\nOutra;NF-2;200;0";
        assert_eq!(parse_csv_texto(csv), parse_csv_texto(csv));
    }

    #[test]
    fn menos_de_duas_linhas_resulta_vazio() {
        assert!(parse_csv_texto("nome;nf;valor").is_empty());
        assert!(parse_csv_texto("").is_empty());
    }
}

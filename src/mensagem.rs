// src/mensagem.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;

// Renderização de templates de cobrança: substituição simples de tokens,
// sem escaping, com formatação fixa pt-BR de moeda e data.

/// Corpo usado quando nem o template pedido nem o "Vencido" existem no
/// registro (tabela recém-criada, por exemplo).
pub const CORPO_FALLBACK: &str = "Olá, {cliente}! Tudo bem?\n\nConsta em nosso sistema um ou mais títulos em aberto. Poderia verificar, por gentileza?\n\n*NF {numeroNF}*\n• Vencimento: {vencimento}\n• Valor: {total}\n• Situação: {diasAtraso}";

pub const TEMPLATE_PADRAO: &str = "Vencido";

#[derive(Debug, Clone)]
pub struct VarsMensagem {
    pub cliente: String,
    pub numero_nf: String,
    pub total: Decimal,
    pub dias_atraso: i32,
    pub vencimento: Option<NaiveDate>,
}

/// Formata em moeda brasileira: `R$ 1.234,56`.
pub fn formatar_brl(valor: Decimal) -> String {
    let negativo = valor.is_sign_negative();
    let texto = format!("{:.2}", valor.abs());
    let (inteiro, centavos) = texto.split_once('.').unwrap_or((texto.as_str(), "00"));

    // Agrupamento de milhar com ponto.
    let mut agrupado = String::new();
    let digitos: Vec<char> = inteiro.chars().collect();
    for (i, c) in digitos.iter().enumerate() {
        if i > 0 && (digitos.len() - i) % 3 == 0 {
            agrupado.push('.');
        }
        agrupado.push(*c);
    }

    let sinal = if negativo { "-" } else { "" };
    format!("{}R$ {},{}", sinal, agrupado, centavos)
}

/// Data no formato brasileiro `dd/mm/aaaa`; ausência vira travessão.
pub fn formatar_data_br(data: Option<NaiveDate>) -> String {
    match data {
        Some(d) => d.format("%d/%m/%Y").to_string(),
        None => "—".to_string(),
    }
}

fn situacao_atraso(dias: i32) -> String {
    if dias > 0 {
        format!("{} dias", dias)
    } else {
        "Em dia".to_string()
    }
}

/// Aplica as variáveis ao corpo do template.
pub fn aplicar_template(corpo: &str, vars: &VarsMensagem) -> String {
    corpo
        .replace("{cliente}", &vars.cliente)
        .replace("{numeroNF}", &vars.numero_nf)
        .replace("{total}", &formatar_brl(vars.total))
        .replace("{diasAtraso}", &situacao_atraso(vars.dias_atraso))
        .replace("{vencimento}", &formatar_data_br(vars.vencimento))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn vars() -> VarsMensagem {
        VarsMensagem {
            cliente: "Fazenda São João".to_string(),
            numero_nf: "NF-12401".to_string(),
            total: dec!(15750),
            dias_atraso: 12,
            vencimento: NaiveDate::from_ymd_opt(2025, 7, 10),
        }
    }

    #[test]
    fn formata_moeda_brasileira() {
        assert_eq!(formatar_brl(dec!(1234.56)), "R$ 1.234,56");
        assert_eq!(formatar_brl(dec!(15750)), "R$ 15.750,00");
        assert_eq!(formatar_brl(dec!(0.5)), "R$ 0,50");
        assert_eq!(formatar_brl(dec!(1000000)), "R$ 1.000.000,00");
        assert_eq!(formatar_brl(dec!(-25.90)), "-R$ 25,90");
    }

    #[test]
    fn formata_data_e_ausencia() {
        assert_eq!(formatar_data_br(NaiveDate::from_ymd_opt(2025, 7, 10)), "10/07/2025");
        assert_eq!(formatar_data_br(None), "—");
    }

    #[test]
    fn substitui_todos_os_tokens() {
        let corpo = "{cliente}: NF {numeroNF}, {total}, vence {vencimento}, {diasAtraso}";
        let texto = aplicar_template(corpo, &vars());
        assert_eq!(
            texto,
            "Fazenda São João: NF NF-12401, R$ 15.750,00, vence 10/07/2025, 12 dias"
        );
    }

    #[test]
    fn token_repetido_e_substituido_em_todas_as_ocorrencias() {
        let texto = aplicar_template("{cliente} e {cliente}", &vars());
        assert_eq!(texto, "Fazenda São João e Fazenda São João");
    }

    #[test]
    fn em_dia_quando_sem_atraso() {
        let mut v = vars();
        v.dias_atraso = 0;
        let texto = aplicar_template("Situação: {diasAtraso}", &v);
        assert_eq!(texto, "Situação: Em dia");
    }

    #[test]
    fn texto_sem_tokens_fica_intacto() {
        let corpo = "Atenciosamente, Equipe Financeira";
        assert_eq!(aplicar_template(corpo, &vars()), corpo);
    }
}

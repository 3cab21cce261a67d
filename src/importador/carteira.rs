// src/importador/carteira.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::importador::csv::{digits_only, norm_key, LinhaPlanilha};
use crate::models::titulo::TituloStatus;

// A carteira é o estágio intermediário entre a planilha e o banco: clientes
// deduplicados e um título por linha emitida, ainda com ids sintéticos.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClienteImportado {
    #[schema(example = "cli_3f2a9c1d")]
    pub id: String,
    pub nome: String,
    pub telefone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TituloImportado {
    #[schema(example = "tit_8b1e0f42")]
    pub id: String,

    // Referência ao id sintético do cliente dentro da mesma carteira.
    pub cliente_id: String,

    #[serde(rename = "numeroNF")]
    pub numero_nf: String,
    pub numero_titulo: Option<String>,
    pub valor_principal: Decimal,
    pub juros: Decimal,
    pub total: Decimal,
    pub dias_atraso: i32,
    pub status: TituloStatus,
    pub chave_match: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Carteira {
    pub clientes: Vec<ClienteImportado>,
    pub titulos: Vec<TituloImportado>,
}

fn id_sintetico(prefixo: &str) -> String {
    format!("{}_{}", prefixo, Uuid::new_v4().simple())
}

/// Chave de deduplicação de título: NF + principal com duas casas.
pub fn chave_match(numero_nf: &str, valor_principal: Decimal) -> String {
    format!("{}__{:.2}", numero_nf, valor_principal)
}

/// Agrupa linhas parseadas em clientes deduplicados e títulos individuais.
///
/// Clientes são reunidos por (nome normalizado, dígitos do telefone); a
/// primeira linha cria o registro, as demais o reutilizam. Um campo de
/// título com `;`/`,`/`|` emite um título por parte.
pub fn montar_carteira(linhas: &[LinhaPlanilha]) -> Carteira {
    let mut clientes: Vec<ClienteImportado> = Vec::new();
    let mut indice_clientes: HashMap<String, usize> = HashMap::new();
    let mut titulos: Vec<TituloImportado> = Vec::new();

    for linha in linhas {
        let telefone = linha.telefone.as_deref().unwrap_or("");
        let chave_cliente = format!("{}__{}", norm_key(&linha.nome), digits_only(telefone));

        let pos = *indice_clientes.entry(chave_cliente).or_insert_with(|| {
            clientes.push(ClienteImportado {
                id: id_sintetico("cli"),
                nome: linha.nome.clone(),
                telefone: linha.telefone.clone(),
            });
            clientes.len() - 1
        });
        let cliente_id = clientes[pos].id.clone();

        // Uma linha pode carregar vários números de título da mesma NF.
        let numeros: Vec<Option<String>> = match &linha.numero_titulo {
            Some(campo) => {
                let partes: Vec<Option<String>> = campo
                    .split([';', ',', '|'])
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(|p| Some(p.to_string()))
                    .collect();
                if partes.is_empty() { vec![None] } else { partes }
            }
            None => vec![None],
        };

        for numero_titulo in numeros {
            let numero_nf = linha.numero_nf.clone().unwrap_or_else(|| "NF-N/D".to_string());
            titulos.push(TituloImportado {
                id: id_sintetico("tit"),
                cliente_id: cliente_id.clone(),
                chave_match: chave_match(&numero_nf, linha.valor_principal),
                numero_nf,
                numero_titulo,
                valor_principal: linha.valor_principal,
                juros: linha.juros,
                total: linha.total,
                dias_atraso: linha.dias_atraso,
                status: if linha.dias_atraso > 0 {
                    TituloStatus::Vencido
                } else {
                    TituloStatus::Aberto
                },
            });
        }
    }

    Carteira { clientes, titulos }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importador::csv::parse_csv_texto;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn linha(nome: &str, telefone: &str, nf: &str, titulo: &str, principal: Decimal, dias: i32) -> LinhaPlanilha {
        LinhaPlanilha {
            nome: nome.to_string(),
            telefone: Some(telefone.to_string()).filter(|s| !s.is_empty()),
            numero_nf: Some(nf.to_string()).filter(|s| !s.is_empty()),
            numero_titulo: Some(titulo.to_string()).filter(|s| !s.is_empty()),
            valor_principal: principal,
            juros: Decimal::ZERO,
            total: principal,
            dias_atraso: dias,
        }
    }

    #[test]
    fn chave_match_formata_duas_casas() {
        assert_eq!(chave_match("NF-12401", dec!(15000)), "NF-12401__15000.00");
        assert_eq!(chave_match("NF-7", dec!(1234.5)), "NF-7__1234.50");
    }

    #[test]
    fn chave_match_ignora_demais_campos() {
        let a = montar_carteira(&[linha("A", "11", "NF-1", "D-1", dec!(100), 5)]);
        let b = montar_carteira(&[linha("B", "22", "NF-1", "D-9", dec!(100), 0)]);
        assert_eq!(a.titulos[0].chave_match, b.titulos[0].chave_match);
    }

    #[test]
    fn deduplica_cliente_por_nome_e_telefone() {
        let carteira = montar_carteira(&[
            linha("Fazenda  São João", "+55 65 99999-0001", "NF-1", "", dec!(10), 0),
            linha("fazenda são joão", "5565999990001", "NF-2", "", dec!(20), 0),
        ]);
        assert_eq!(carteira.clientes.len(), 1);
        assert_eq!(carteira.titulos.len(), 2);
        assert_eq!(carteira.titulos[0].cliente_id, carteira.titulos[1].cliente_id);
    }

    #[test]
    fn telefones_diferentes_sao_clientes_diferentes() {
        let carteira = montar_carteira(&[
            linha("Agro Ltda", "6530010001", "NF-1", "", dec!(10), 0),
            linha("Agro Ltda", "6530010002", "NF-2", "", dec!(10), 0),
        ]);
        assert_eq!(carteira.clientes.len(), 2);
    }

    #[test]
    fn campo_de_titulo_composto_emite_um_titulo_por_parte() {
        let carteira = montar_carteira(&[linha("Agro Ltda", "65999", "NF-1", "D-1; D-2 | D-3", dec!(30), 0)]);
        assert_eq!(carteira.titulos.len(), 3);
        let numeros: Vec<_> = carteira
            .titulos
            .iter()
            .map(|t| t.numero_titulo.as_deref().unwrap())
            .collect();
        assert_eq!(numeros, vec!["D-1", "D-2", "D-3"]);
    }

    #[test]
    fn nf_ausente_vira_nf_nd() {
        let carteira = montar_carteira(&[linha("Agro Ltda", "65999", "", "D-1", dec!(50), 0)]);
        assert_eq!(carteira.titulos[0].numero_nf, "NF-N/D");
        assert_eq!(carteira.titulos[0].chave_match, "NF-N/D__50.00");
    }

    #[test]
    fn status_derivado_do_atraso() {
        let carteira = montar_carteira(&[
            linha("A", "1", "NF-1", "", dec!(10), 12),
            linha("B", "2", "NF-2", "", dec!(10), 0),
        ]);
        assert_eq!(carteira.titulos[0].status, TituloStatus::Vencido);
        assert_eq!(carteira.titulos[1].status, TituloStatus::Aberto);
    }

    #[test]
    fn cenario_ponta_a_ponta_da_planilha() {
        let csv = "nome;telefone;numero_nf;numero_titulo;valor_principal;juros;total;dias_atraso\n\
                   Fazenda São João;+5565999990001;NF-12401;DUP-001;15000;750;15750;12";
        let carteira = montar_carteira(&parse_csv_texto(csv));

        assert_eq!(carteira.clientes.len(), 1);
        assert_eq!(carteira.clientes[0].nome, "Fazenda São João");
        assert_eq!(carteira.clientes[0].telefone.as_deref(), Some("+5565999990001"));

        assert_eq!(carteira.titulos.len(), 1);
        let t = &carteira.titulos[0];
        assert_eq!(t.valor_principal, dec!(15000));
        assert_eq!(t.juros, dec!(750));
        assert_eq!(t.total, dec!(15750));
        assert_eq!(t.dias_atraso, 12);
        assert_eq!(t.status, TituloStatus::Vencido);
        assert_eq!(t.chave_match, "NF-12401__15000.00");
    }

    #[test]
    fn carteiras_do_mesmo_texto_sao_equivalentes() {
        let csv = "nome;nf;valor;dias_atraso\nAgro Ltda;NF-1;1.500,00;3\nOutra;NF-2;200;0";
        let a = montar_carteira(&parse_csv_texto(csv));
        let b = montar_carteira(&parse_csv_texto(csv));
        // Ids são sintéticos; o conteúdo relevante tem que bater.
        assert_eq!(a.clientes.len(), b.clientes.len());
        let chaves_a: Vec<_> = a.titulos.iter().map(|t| &t.chave_match).collect();
        let chaves_b: Vec<_> = b.titulos.iter().map(|t| &t.chave_match).collect();
        assert_eq!(chaves_a, chaves_b);
    }
}

// src/common/telefone.rs

// Normalização de telefone para E.164 sem o `+`, como o gateway espera.

/// Mantém só dígitos e garante o DDI 55 para números nacionais de 11 dígitos.
pub fn normalizar_telefone(telefone: &str) -> String {
    let limpo: String = telefone.chars().filter(|c| c.is_ascii_digit()).collect();
    if limpo.starts_with("55") {
        return limpo;
    }
    if limpo.len() == 11 {
        return format!("55{}", limpo);
    }
    limpo
}

pub fn telefone_valido(telefone: &str) -> bool {
    let normalizado = normalizar_telefone(telefone);
    (10..=15).contains(&normalizado.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn adiciona_ddi_em_numero_nacional() {
        assert_eq!(normalizar_telefone("(65) 99999-0001"), "5565999990001");
    }

    #[test]
    fn preserva_numero_ja_com_ddi() {
        assert_eq!(normalizar_telefone("+55 65 99999-0001"), "5565999990001");
    }

    #[test]
    fn valida_faixa_de_tamanho() {
        assert!(telefone_valido("+5565999990001"));
        assert!(telefone_valido("6530010001"));
        assert!(!telefone_valido("123"));
        assert!(!telefone_valido(""));
    }
}

// src/models/conta.rs

use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{common::error::AppError, models::fornecedor::FornecedorCliente};

/// Quantas contas podem ter previsão dentro de um mesmo mês do calendário.
pub const QUANTIDADE_PERMITIDA_POR_MES: i64 = 100;

// --- Enums ---

// Gravado como texto na coluna `tipo`. Só a grafia em maiúsculas é aceita.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum TipoConta {
    Pagar,
    Receber,
}

impl TipoConta {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoConta::Pagar => "PAGAR",
            TipoConta::Receber => "RECEBER",
        }
    }
}

impl fmt::Display for TipoConta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TipoConta {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PAGAR" => Ok(TipoConta::Pagar),
            "RECEBER" => Ok(TipoConta::Receber),
            _ => Err(ValidationError::new("tipo_invalido")
                .with_message("O tipo deve ser 'PAGAR' ou 'RECEBER'".into())),
        }
    }
}

// --- Structs ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ContaPagarReceber {
    #[schema(example = 1)]
    pub id: i32,

    #[schema(example = "Conta de Luz")]
    pub descricao: String,

    #[schema(value_type = f64, example = 100.0)]
    pub valor: Decimal,

    pub tipo: TipoConta,

    #[schema(value_type = String, format = Date, example = "2024-05-10")]
    pub data_previsao: NaiveDate,

    #[schema(value_type = Option<String>, format = Date, example = "2024-05-12")]
    pub data_baixa: Option<NaiveDate>,

    #[schema(value_type = Option<f64>, example = 100.0)]
    pub valor_baixa: Option<Decimal>,

    pub esta_baixada: bool,

    pub fornecedor: Option<FornecedorCliente>,
}

impl ContaPagarReceber {
    /// Marca a conta como baixada na data informada, pelo valor integral.
    ///
    /// Retorna `false` quando a conta já estava baixada pelo mesmo valor; nesse
    /// caso nada é alterado e não há o que persistir.
    pub fn baixar(&mut self, hoje: NaiveDate) -> bool {
        if self.esta_baixada && self.valor_baixa == Some(self.valor) {
            return false;
        }

        self.data_baixa = Some(hoje);
        self.esta_baixada = true;
        self.valor_baixa = Some(self.valor);
        true
    }
}

/// Linha de `contas_a_pagar_e_receber` já unida ao nome do fornecedor.
#[derive(Debug, Clone, FromRow)]
pub struct ContaRow {
    pub id: i32,
    pub descricao: String,
    pub valor: Decimal,
    pub tipo: String,
    pub data_previsao: NaiveDate,
    pub data_baixa: Option<NaiveDate>,
    pub valor_baixa: Option<Decimal>,
    pub esta_baixada: bool,
    pub fornecedor_cliente_id: Option<i32>,
    pub fornecedor_nome: Option<String>,
}

impl TryFrom<ContaRow> for ContaPagarReceber {
    type Error = AppError;

    fn try_from(row: ContaRow) -> Result<Self, Self::Error> {
        let tipo = row.tipo.parse::<TipoConta>().map_err(|_| {
            anyhow::anyhow!("Tipo desconhecido '{}' na conta {}", row.tipo, row.id)
        })?;

        let fornecedor = match (row.fornecedor_cliente_id, row.fornecedor_nome) {
            (Some(id), Some(nome)) => Some(FornecedorCliente { id, nome }),
            _ => None,
        };

        Ok(Self {
            id: row.id,
            descricao: row.descricao,
            valor: row.valor,
            tipo,
            data_previsao: row.data_previsao,
            data_baixa: row.data_baixa,
            valor_baixa: row.valor_baixa,
            esta_baixada: row.esta_baixada,
            fornecedor,
        })
    }
}

// --- Comandos de escrita (já validados) ---

#[derive(Debug, Clone)]
pub struct NovaConta {
    pub descricao: String,
    pub valor: Decimal,
    pub tipo: TipoConta,
    pub data_previsao: NaiveDate,
    pub fornecedor_cliente_id: Option<i32>,
}

// A data de previsão não entra aqui: ela é fixada na criação.
#[derive(Debug, Clone)]
pub struct AlteracaoConta {
    pub descricao: String,
    pub valor: Decimal,
    pub tipo: TipoConta,
    pub fornecedor_cliente_id: Option<i32>,
}

/// Intervalo semiaberto `[primeiro dia do mês, primeiro dia do mês seguinte)`.
pub fn intervalo_do_mes(data: NaiveDate) -> (NaiveDate, NaiveDate) {
    let inicio = data.with_day(1).unwrap_or(data);
    let (ano, mes) = if inicio.month() == 12 {
        (inicio.year() + 1, 1)
    } else {
        (inicio.year(), inicio.month() + 1)
    };
    let fim = NaiveDate::from_ymd_opt(ano, mes, 1).unwrap_or(NaiveDate::MAX);
    (inicio, fim)
}

// --- Payloads HTTP ---

/// Casas decimais aceitas em `valor` (coluna `NUMERIC(12, 2)`).
pub const CASAS_DECIMAIS_VALOR: u32 = 2;

/// Primeiro valor que não cabe em `NUMERIC(12, 2)`: 10^10.
pub const VALOR_LIMITE: Decimal = Decimal::from_parts(1_410_065_408, 2, 0, false, 0);

// O valor precisa ser positivo e caber na coluna sem arredondar.
fn validar_valor(valor: &Decimal) -> Result<(), ValidationError> {
    if *valor <= Decimal::ZERO {
        return Err(ValidationError::new("valor_positivo")
            .with_message("O valor deve ser maior que zero".into()));
    }

    if valor.normalize().scale() > CASAS_DECIMAIS_VALOR {
        return Err(ValidationError::new("valor_casas_decimais")
            .with_message("O valor deve ter no máximo 2 casas decimais".into()));
    }

    if *valor >= VALOR_LIMITE {
        return Err(ValidationError::new("valor_maximo")
            .with_message("O valor deve ser menor que 10.000.000.000".into()));
    }

    Ok(())
}

fn validar_tipo(tipo: &str) -> Result<(), ValidationError> {
    tipo.parse::<TipoConta>().map(|_| ())
}

// Só chamado depois de `validate()`, mas sem `unwrap`: se falhar, vira erro de campo.
fn converter_tipo(tipo: &str) -> Result<TipoConta, AppError> {
    tipo.parse::<TipoConta>().map_err(|e| {
        let mut errors = ValidationErrors::new();
        errors.add("tipo", e);
        AppError::ValidationError(errors)
    })
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ContaPagarReceberRequest {
    #[validate(length(min = 3, max = 30, message = "A descrição deve ter entre 3 e 30 caracteres"))]
    #[schema(example = "Conta de Luz")]
    pub descricao: String,

    #[validate(custom(function = "validar_valor"))]
    #[schema(value_type = f64, example = 100.0)]
    pub valor: Decimal,

    #[validate(custom(function = "validar_tipo"))]
    #[schema(example = "PAGAR")]
    pub tipo: String,

    #[schema(example = 1)]
    pub fornecedor_cliente_id: Option<i32>,

    #[schema(value_type = String, format = Date, example = "2024-05-10")]
    pub data_previsao: NaiveDate,
}

impl TryFrom<ContaPagarReceberRequest> for NovaConta {
    type Error = AppError;

    fn try_from(request: ContaPagarReceberRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            tipo: converter_tipo(&request.tipo)?,
            descricao: request.descricao,
            valor: request.valor,
            data_previsao: request.data_previsao,
            fornecedor_cliente_id: request.fornecedor_cliente_id,
        })
    }
}

/// Corpo do PUT. A data de previsão é imutável depois da criação e, se vier
/// no corpo, é ignorada.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AtualizarContaRequest {
    #[validate(length(min = 3, max = 30, message = "A descrição deve ter entre 3 e 30 caracteres"))]
    #[schema(example = "Conta de Luz")]
    pub descricao: String,

    #[validate(custom(function = "validar_valor"))]
    #[schema(value_type = f64, example = 111.0)]
    pub valor: Decimal,

    #[validate(custom(function = "validar_tipo"))]
    #[schema(example = "PAGAR")]
    pub tipo: String,

    #[schema(example = 1)]
    pub fornecedor_cliente_id: Option<i32>,
}

impl TryFrom<AtualizarContaRequest> for AlteracaoConta {
    type Error = AppError;

    fn try_from(request: AtualizarContaRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            tipo: converter_tipo(&request.tipo)?,
            descricao: request.descricao,
            valor: request.valor,
            fornecedor_cliente_id: request.fornecedor_cliente_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(ano: i32, mes: u32, dia: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(ano, mes, dia).unwrap()
    }

    fn conta() -> ContaPagarReceber {
        ContaPagarReceber {
            id: 1,
            descricao: "Conta de Luz".into(),
            valor: Decimal::new(10000, 2),
            tipo: TipoConta::Pagar,
            data_previsao: data(2024, 5, 10),
            data_baixa: None,
            valor_baixa: None,
            esta_baixada: false,
            fornecedor: None,
        }
    }

    fn request(descricao: &str, valor: Decimal, tipo: &str) -> ContaPagarReceberRequest {
        ContaPagarReceberRequest {
            descricao: descricao.into(),
            valor,
            tipo: tipo.into(),
            fornecedor_cliente_id: None,
            data_previsao: data(2024, 5, 10),
        }
    }

    #[test]
    fn baixar_preenche_data_e_valor() {
        let mut conta = conta();
        assert!(conta.baixar(data(2024, 5, 12)));

        assert!(conta.esta_baixada);
        assert_eq!(conta.data_baixa, Some(data(2024, 5, 12)));
        assert_eq!(conta.valor_baixa, Some(conta.valor));
    }

    #[test]
    fn baixar_duas_vezes_nao_altera_nada() {
        let mut conta = conta();
        conta.baixar(data(2024, 5, 12));
        let depois_da_primeira = conta.clone();

        assert!(!conta.baixar(data(2024, 6, 1)));
        assert_eq!(conta, depois_da_primeira);
    }

    #[test]
    fn baixar_refaz_quando_valor_mudou() {
        let mut conta = conta();
        conta.baixar(data(2024, 5, 12));
        conta.valor = Decimal::new(15000, 2);

        assert!(conta.baixar(data(2024, 5, 20)));
        assert_eq!(conta.valor_baixa, Some(Decimal::new(15000, 2)));
        assert_eq!(conta.data_baixa, Some(data(2024, 5, 20)));
    }

    #[test]
    fn intervalo_do_mes_cobre_o_mes_inteiro() {
        assert_eq!(intervalo_do_mes(data(2024, 2, 29)), (data(2024, 2, 1), data(2024, 3, 1)));
        assert_eq!(intervalo_do_mes(data(2024, 12, 31)), (data(2024, 12, 1), data(2025, 1, 1)));
    }

    #[test]
    fn tipo_exige_maiusculas() {
        assert_eq!("PAGAR".parse::<TipoConta>().unwrap(), TipoConta::Pagar);
        assert_eq!("RECEBER".parse::<TipoConta>().unwrap(), TipoConta::Receber);
        assert!("Pagar".parse::<TipoConta>().is_err());
        assert!("TESTE".parse::<TipoConta>().is_err());
    }

    #[test]
    fn descricao_fora_dos_limites_falha() {
        let curta = request("12", Decimal::ONE, "PAGAR").validate().unwrap_err();
        assert!(curta.field_errors().contains_key("descricao"));

        let longa = request(&"x".repeat(31), Decimal::ONE, "PAGAR").validate().unwrap_err();
        assert!(longa.field_errors().contains_key("descricao"));

        assert!(request("123", Decimal::ONE, "PAGAR").validate().is_ok());
        assert!(request(&"x".repeat(30), Decimal::ONE, "PAGAR").validate().is_ok());
    }

    #[test]
    fn valor_zero_ou_negativo_falha() {
        let zero = request("Teste", Decimal::ZERO, "PAGAR").validate().unwrap_err();
        assert!(zero.field_errors().contains_key("valor"));

        let negativo = request("Teste", Decimal::NEGATIVE_ONE, "PAGAR").validate().unwrap_err();
        assert!(negativo.field_errors().contains_key("valor"));
    }

    #[test]
    fn valor_limite_e_dez_bilhoes() {
        assert_eq!(VALOR_LIMITE, Decimal::from(10_000_000_000_i64));
    }

    #[test]
    fn valor_com_mais_de_duas_casas_falha() {
        let errors = request("Teste", Decimal::new(1, 3), "PAGAR").validate().unwrap_err();
        assert_eq!(errors.field_errors()["valor"][0].code, "valor_casas_decimais");

        // Zeros à direita não contam.
        assert!(request("Teste", Decimal::new(15000, 4), "PAGAR").validate().is_ok());
    }

    #[test]
    fn valor_que_nao_cabe_na_coluna_falha() {
        let errors = request("Teste", VALOR_LIMITE, "PAGAR").validate().unwrap_err();
        assert_eq!(errors.field_errors()["valor"][0].code, "valor_maximo");

        let maior_aceito = VALOR_LIMITE - Decimal::new(1, 2);
        assert!(request("Teste", maior_aceito, "PAGAR").validate().is_ok());
    }

    #[test]
    fn tipo_invalido_falha_no_campo_tipo() {
        let errors = request("Teste", Decimal::ONE, "TESTE").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("tipo"));
        assert!(!errors.field_errors().contains_key("descricao"));
    }

    #[test]
    fn request_valido_vira_nova_conta() {
        let nova = NovaConta::try_from(request("Conta de Luz", Decimal::ONE, "RECEBER")).unwrap();
        assert_eq!(nova.tipo, TipoConta::Receber);
        assert_eq!(nova.data_previsao, data(2024, 5, 10));
    }

    #[test]
    fn linha_sem_fornecedor_nao_embute_fornecedor() {
        let row = ContaRow {
            id: 7,
            descricao: "Aluguel".into(),
            valor: Decimal::new(150000, 2),
            tipo: "RECEBER".into(),
            data_previsao: data(2024, 5, 1),
            data_baixa: None,
            valor_baixa: None,
            esta_baixada: false,
            fornecedor_cliente_id: None,
            fornecedor_nome: None,
        };

        let conta = ContaPagarReceber::try_from(row).unwrap();
        assert_eq!(conta.tipo, TipoConta::Receber);
        assert!(conta.fornecedor.is_none());
    }
}

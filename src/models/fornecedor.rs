// src/models/fornecedor.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct FornecedorCliente {
    #[schema(example = 1)]
    pub id: i32,

    #[schema(example = "Companhia de Energia")]
    pub nome: String,
}

// Corpo de criação e de atualização (o único campo editável é o nome)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct FornecedorClienteRequest {
    #[validate(length(min = 3, max = 255, message = "O nome deve ter entre 3 e 255 caracteres"))]
    #[schema(example = "Companhia de Energia")]
    pub nome: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nome_curto_e_rejeitado() {
        let request = FornecedorClienteRequest { nome: "AB".into() };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("nome"));
    }

    #[test]
    fn nome_valido_passa() {
        let request = FornecedorClienteRequest { nome: "ABC".into() };
        assert!(request.validate().is_ok());
    }
}

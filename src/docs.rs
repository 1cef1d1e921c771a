// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Contas ---
        handlers::contas::listar_contas,
        handlers::contas::obter_conta,
        handlers::contas::criar_conta,
        handlers::contas::atualizar_conta,
        handlers::contas::baixar_conta,
        handlers::contas::deletar_conta,

        // --- Fornecedor ---
        handlers::fornecedores::listar_fornecedores,
        handlers::fornecedores::obter_fornecedor,
        handlers::fornecedores::criar_fornecedor,
        handlers::fornecedores::atualizar_fornecedor,
        handlers::fornecedores::deletar_fornecedor,
        handlers::contas::listar_contas_do_fornecedor,
    ),
    components(
        schemas(
            models::conta::TipoConta,
            models::conta::ContaPagarReceber,
            models::conta::ContaPagarReceberRequest,
            models::conta::AtualizarContaRequest,
            models::fornecedor::FornecedorCliente,
            models::fornecedor::FornecedorClienteRequest,
        )
    ),
    tags(
        (name = "Contas", description = "Contas para pagar ou receber"),
        (name = "Fornecedor", description = "Fornecedor/cliente")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documento_lista_as_rotas() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();

        assert!(paths.contains(&"/contas-a-pagar-e-receber".to_string()));
        assert!(paths.contains(&"/contas-a-pagar-e-receber/{id}/baixar".to_string()));
        assert!(paths.contains(&"/fornecedor-cliente/{id}/contas-a-pagar-e-receber".to_string()));
    }
}

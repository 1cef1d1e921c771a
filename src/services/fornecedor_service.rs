// src/services/fornecedor_service.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::FornecedorRepository,
    models::fornecedor::FornecedorCliente,
};

const FORNECEDOR: &str = "Fornecedor/Cliente";

#[derive(Clone)]
pub struct FornecedorService {
    repo: Arc<dyn FornecedorRepository>,
}

impl FornecedorService {
    pub fn new(repo: Arc<dyn FornecedorRepository>) -> Self {
        Self { repo }
    }

    pub async fn listar(&self) -> Result<Vec<FornecedorCliente>, AppError> {
        self.repo.listar().await
    }

    pub async fn buscar(&self, id: i32) -> Result<FornecedorCliente, AppError> {
        self.repo
            .buscar_por_id(id)
            .await?
            .ok_or(AppError::NotFound(FORNECEDOR))
    }

    pub async fn criar(&self, nome: &str) -> Result<FornecedorCliente, AppError> {
        let fornecedor = self.repo.inserir(nome).await?;
        tracing::info!("Fornecedor/cliente {} criado", fornecedor.id);
        Ok(fornecedor)
    }

    pub async fn atualizar(&self, id: i32, nome: &str) -> Result<FornecedorCliente, AppError> {
        self.repo
            .atualizar(id, nome)
            .await?
            .ok_or(AppError::NotFound(FORNECEDOR))
    }

    /// Só remove fornecedores sem contas vinculadas.
    pub async fn remover(&self, id: i32) -> Result<(), AppError> {
        self.buscar(id).await?;

        if self.repo.possui_contas(id).await? {
            return Err(AppError::FornecedorComContas);
        }

        if !self.repo.remover(id).await? {
            return Err(AppError::NotFound(FORNECEDOR));
        }

        tracing::info!("Fornecedor/cliente {} removido", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryStore;

    #[tokio::test]
    async fn buscar_inexistente_retorna_not_found() {
        let service = FornecedorService::new(Arc::new(InMemoryStore::new()));
        let err = service.buscar(1).await.unwrap_err();
        assert_eq!(err.to_string(), "Fornecedor/Cliente não encontrado(a)");
    }

    #[tokio::test]
    async fn criar_atualizar_e_remover() {
        let service = FornecedorService::new(Arc::new(InMemoryStore::new()));

        let criado = service.criar("Mercado Central").await.unwrap();
        let atualizado = service.atualizar(criado.id, "Mercado Novo").await.unwrap();
        assert_eq!(atualizado.nome, "Mercado Novo");

        service.remover(criado.id).await.unwrap();
        assert!(matches!(service.remover(criado.id).await, Err(AppError::NotFound(_))));
    }
}

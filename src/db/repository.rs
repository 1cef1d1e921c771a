// src/db/repository.rs

use async_trait::async_trait;

use crate::{
    common::error::AppError,
    models::{
        conta::{AlteracaoConta, ContaPagarReceber, NovaConta},
        fornecedor::FornecedorCliente,
    },
};

/// Acesso à tabela `contas_a_pagar_e_receber`.
///
/// Cada método é uma unidade de trabalho completa: ou tudo é gravado, ou nada.
#[async_trait]
pub trait ContaRepository: Send + Sync {
    async fn listar(&self) -> Result<Vec<ContaPagarReceber>, AppError>;

    async fn buscar_por_id(&self, id: i32) -> Result<Option<ContaPagarReceber>, AppError>;

    async fn listar_por_fornecedor(
        &self,
        fornecedor_cliente_id: i32,
    ) -> Result<Vec<ContaPagarReceber>, AppError>;

    /// Conta as contas com previsão no mesmo mês de `nova.data_previsao` e só
    /// insere se ainda houver vaga (`< limite_mensal`). Contagem e inserção são
    /// atômicas entre si; sem vaga, retorna `AppError::LimiteMensalExcedido`.
    async fn inserir_com_limite_mensal(
        &self,
        nova: &NovaConta,
        limite_mensal: i64,
    ) -> Result<ContaPagarReceber, AppError>;

    async fn atualizar(
        &self,
        id: i32,
        alteracao: &AlteracaoConta,
    ) -> Result<Option<ContaPagarReceber>, AppError>;

    /// Grava `data_baixa`, `valor_baixa` e `esta_baixada` da conta informada.
    async fn salvar_baixa(
        &self,
        conta: &ContaPagarReceber,
    ) -> Result<Option<ContaPagarReceber>, AppError>;

    /// `false` se a conta não existia.
    async fn remover(&self, id: i32) -> Result<bool, AppError>;
}

/// Acesso à tabela `fornecedor_cliente`.
#[async_trait]
pub trait FornecedorRepository: Send + Sync {
    async fn listar(&self) -> Result<Vec<FornecedorCliente>, AppError>;

    async fn buscar_por_id(&self, id: i32) -> Result<Option<FornecedorCliente>, AppError>;

    async fn inserir(&self, nome: &str) -> Result<FornecedorCliente, AppError>;

    async fn atualizar(&self, id: i32, nome: &str) -> Result<Option<FornecedorCliente>, AppError>;

    async fn possui_contas(&self, id: i32) -> Result<bool, AppError>;

    async fn remover(&self, id: i32) -> Result<bool, AppError>;
}

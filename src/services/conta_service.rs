// src/services/conta_service.rs

use std::sync::Arc;

use chrono::Local;

use crate::{
    common::error::AppError,
    db::{ContaRepository, FornecedorRepository},
    models::conta::{
        AlteracaoConta, ContaPagarReceber, NovaConta, QUANTIDADE_PERMITIDA_POR_MES,
    },
};

const CONTA: &str = "Conta a Pagar e receber";

#[derive(Clone)]
pub struct ContaService {
    contas: Arc<dyn ContaRepository>,
    fornecedores: Arc<dyn FornecedorRepository>,
}

impl ContaService {
    pub fn new(contas: Arc<dyn ContaRepository>, fornecedores: Arc<dyn FornecedorRepository>) -> Self {
        Self { contas, fornecedores }
    }

    pub async fn listar(&self) -> Result<Vec<ContaPagarReceber>, AppError> {
        self.contas.listar().await
    }

    pub async fn buscar(&self, id: i32) -> Result<ContaPagarReceber, AppError> {
        self.contas
            .buscar_por_id(id)
            .await?
            .ok_or(AppError::NotFound(CONTA))
    }

    /// Cria a conta depois de conferir o fornecedor e a cota do mês da previsão.
    pub async fn criar(&self, nova: NovaConta) -> Result<ContaPagarReceber, AppError> {
        self.validar_fornecedor(nova.fornecedor_cliente_id).await?;

        let conta = self
            .contas
            .inserir_com_limite_mensal(&nova, QUANTIDADE_PERMITIDA_POR_MES)
            .await
            .inspect_err(|e| {
                if matches!(e, AppError::LimiteMensalExcedido) {
                    tracing::warn!(
                        "Cota de {} contas atingida para {}",
                        QUANTIDADE_PERMITIDA_POR_MES,
                        nova.data_previsao.format("%m/%Y")
                    );
                }
            })?;

        tracing::info!("Conta {} criada ({}, {})", conta.id, conta.tipo, conta.valor);
        Ok(conta)
    }

    // A data de previsão não é alterável; só descrição, valor, tipo e fornecedor.
    pub async fn atualizar(
        &self,
        id: i32,
        alteracao: AlteracaoConta,
    ) -> Result<ContaPagarReceber, AppError> {
        self.buscar(id).await?;
        self.validar_fornecedor(alteracao.fornecedor_cliente_id).await?;

        self.contas
            .atualizar(id, &alteracao)
            .await?
            .ok_or(AppError::NotFound(CONTA))
    }

    /// Baixa a conta pelo valor integral com a data de hoje no fuso local do
    /// servidor. Uma conta já baixada pelo mesmo valor volta sem alteração.
    pub async fn baixar(&self, id: i32) -> Result<ContaPagarReceber, AppError> {
        let mut conta = self.buscar(id).await?;

        if !conta.baixar(Local::now().date_naive()) {
            return Ok(conta);
        }

        let conta = self
            .contas
            .salvar_baixa(&conta)
            .await?
            .ok_or(AppError::NotFound(CONTA))?;

        tracing::info!("Conta {} baixada em {:?}", conta.id, conta.data_baixa);
        Ok(conta)
    }

    pub async fn remover(&self, id: i32) -> Result<(), AppError> {
        if !self.contas.remover(id).await? {
            return Err(AppError::NotFound(CONTA));
        }

        tracing::info!("Conta {} removida", id);
        Ok(())
    }

    pub async fn listar_por_fornecedor(
        &self,
        fornecedor_cliente_id: i32,
    ) -> Result<Vec<ContaPagarReceber>, AppError> {
        self.validar_fornecedor(Some(fornecedor_cliente_id)).await?;
        self.contas.listar_por_fornecedor(fornecedor_cliente_id).await
    }

    async fn validar_fornecedor(&self, fornecedor_cliente_id: Option<i32>) -> Result<(), AppError> {
        let Some(id) = fornecedor_cliente_id else {
            return Ok(());
        };

        match self.fornecedores.buscar_por_id(id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::FornecedorInexistente),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::*;
    use crate::{db::InMemoryStore, models::conta::TipoConta};

    fn service() -> (ContaService, InMemoryStore) {
        let store = InMemoryStore::new();
        let service = ContaService::new(Arc::new(store.clone()), Arc::new(store.clone()));
        (service, store)
    }

    fn nova(fornecedor_cliente_id: Option<i32>) -> NovaConta {
        NovaConta {
            descricao: "Conta de Luz".into(),
            valor: Decimal::new(10000, 2),
            tipo: TipoConta::Pagar,
            data_previsao: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
            fornecedor_cliente_id,
        }
    }

    #[tokio::test]
    async fn criar_com_fornecedor_inexistente_falha() {
        let (service, _) = service();
        let err = service.criar(nova(Some(42))).await.unwrap_err();
        assert!(matches!(err, AppError::FornecedorInexistente));
    }

    #[tokio::test]
    async fn baixar_e_idempotente() {
        let (service, _) = service();
        let conta = service.criar(nova(None)).await.unwrap();

        let primeira = service.baixar(conta.id).await.unwrap();
        let segunda = service.baixar(conta.id).await.unwrap();

        assert!(primeira.esta_baixada);
        assert_eq!(primeira.valor_baixa, Some(conta.valor));
        assert_eq!(primeira, segunda);
    }

    #[tokio::test]
    async fn baixa_usa_a_data_local() {
        let (service, _) = service();
        let conta = service.criar(nova(None)).await.unwrap();

        let antes = Local::now().date_naive();
        let baixada = service.baixar(conta.id).await.unwrap();
        let depois = Local::now().date_naive();

        let data_baixa = baixada.data_baixa.unwrap();
        assert!(data_baixa == antes || data_baixa == depois);
    }

    #[tokio::test]
    async fn atualizar_nao_mexe_na_previsao() {
        let (service, _) = service();
        let conta = service.criar(nova(None)).await.unwrap();

        let alteracao = AlteracaoConta {
            descricao: "Conta de Água".into(),
            valor: Decimal::new(5000, 2),
            tipo: TipoConta::Receber,
            fornecedor_cliente_id: None,
        };
        let atualizada = service.atualizar(conta.id, alteracao).await.unwrap();

        assert_eq!(atualizada.descricao, "Conta de Água");
        assert_eq!(atualizada.tipo, TipoConta::Receber);
        assert_eq!(atualizada.data_previsao, conta.data_previsao);
    }

    #[tokio::test]
    async fn operacoes_em_id_inexistente_retornam_not_found() {
        let (service, _) = service();

        assert!(matches!(service.buscar(9).await, Err(AppError::NotFound(_))));
        assert!(matches!(service.baixar(9).await, Err(AppError::NotFound(_))));
        assert!(matches!(service.remover(9).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn atualizar_id_inexistente_vem_antes_do_fornecedor() {
        let (service, _) = service();
        let alteracao = AlteracaoConta {
            descricao: "Conta de Água".into(),
            valor: Decimal::ONE,
            tipo: TipoConta::Pagar,
            fornecedor_cliente_id: Some(77),
        };

        let err = service.atualizar(9, alteracao).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn listar_por_fornecedor_filtra_as_contas() {
        let (service, store) = service();
        let energia = FornecedorRepository::inserir(&store, "Energia").await.unwrap();
        let agua = FornecedorRepository::inserir(&store, "Saneamento").await.unwrap();

        service.criar(nova(Some(energia.id))).await.unwrap();
        service.criar(nova(Some(energia.id))).await.unwrap();
        service.criar(nova(None)).await.unwrap();

        assert_eq!(service.listar_por_fornecedor(energia.id).await.unwrap().len(), 2);
        assert!(service.listar_por_fornecedor(agua.id).await.unwrap().is_empty());
        assert!(matches!(
            service.listar_por_fornecedor(99).await,
            Err(AppError::FornecedorInexistente)
        ));
    }
}

// src/db/memory.rs

use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use anyhow::anyhow;
use async_trait::async_trait;

use crate::{
    common::error::AppError,
    db::repository::{ContaRepository, FornecedorRepository},
    models::{
        conta::{intervalo_do_mes, AlteracaoConta, ContaPagarReceber, NovaConta},
        fornecedor::FornecedorCliente,
    },
};

#[derive(Debug, Clone)]
struct ContaRegistro {
    conta: ContaPagarReceber,
    fornecedor_cliente_id: Option<i32>,
}

#[derive(Debug, Default)]
struct Tabelas {
    contas: BTreeMap<i32, ContaRegistro>,
    fornecedores: BTreeMap<i32, FornecedorCliente>,
    proximo_id_conta: i32,
    proximo_id_fornecedor: i32,
}

impl Tabelas {
    // O fornecedor embutido é sempre lido da tabela, como faria o LEFT JOIN.
    fn montar(&self, registro: &ContaRegistro) -> ContaPagarReceber {
        let mut conta = registro.conta.clone();
        conta.fornecedor = registro
            .fornecedor_cliente_id
            .and_then(|id| self.fornecedores.get(&id).cloned());
        conta
    }
}

/// Implementação em memória dos dois repositórios, para testes e desenvolvimento local.
///
/// Um único `RwLock` protege as duas tabelas, então cada operação é atômica.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tabelas: Arc<RwLock<Tabelas>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn ler(&self) -> Result<RwLockReadGuard<'_, Tabelas>, AppError> {
        self.tabelas
            .read()
            .map_err(|e| anyhow!("Falha ao adquirir lock de leitura: {}", e).into())
    }

    fn escrever(&self) -> Result<RwLockWriteGuard<'_, Tabelas>, AppError> {
        self.tabelas
            .write()
            .map_err(|e| anyhow!("Falha ao adquirir lock de escrita: {}", e).into())
    }
}

#[async_trait]
impl ContaRepository for InMemoryStore {
    async fn listar(&self) -> Result<Vec<ContaPagarReceber>, AppError> {
        let tabelas = self.ler()?;
        Ok(tabelas.contas.values().map(|r| tabelas.montar(r)).collect())
    }

    async fn buscar_por_id(&self, id: i32) -> Result<Option<ContaPagarReceber>, AppError> {
        let tabelas = self.ler()?;
        Ok(tabelas.contas.get(&id).map(|r| tabelas.montar(r)))
    }

    async fn listar_por_fornecedor(
        &self,
        fornecedor_cliente_id: i32,
    ) -> Result<Vec<ContaPagarReceber>, AppError> {
        let tabelas = self.ler()?;
        Ok(tabelas
            .contas
            .values()
            .filter(|r| r.fornecedor_cliente_id == Some(fornecedor_cliente_id))
            .map(|r| tabelas.montar(r))
            .collect())
    }

    async fn inserir_com_limite_mensal(
        &self,
        nova: &NovaConta,
        limite_mensal: i64,
    ) -> Result<ContaPagarReceber, AppError> {
        let mut tabelas = self.escrever()?;

        let (inicio, fim) = intervalo_do_mes(nova.data_previsao);
        let quantidade = tabelas
            .contas
            .values()
            .filter(|r| r.conta.data_previsao >= inicio && r.conta.data_previsao < fim)
            .count() as i64;

        if quantidade >= limite_mensal {
            return Err(AppError::LimiteMensalExcedido);
        }

        if let Some(id) = nova.fornecedor_cliente_id {
            if !tabelas.fornecedores.contains_key(&id) {
                return Err(anyhow!("Chave estrangeira inválida: fornecedor {}", id).into());
            }
        }

        tabelas.proximo_id_conta += 1;
        let id = tabelas.proximo_id_conta;

        let registro = ContaRegistro {
            conta: ContaPagarReceber {
                id,
                descricao: nova.descricao.clone(),
                valor: nova.valor,
                tipo: nova.tipo,
                data_previsao: nova.data_previsao,
                data_baixa: None,
                valor_baixa: None,
                esta_baixada: false,
                fornecedor: None,
            },
            fornecedor_cliente_id: nova.fornecedor_cliente_id,
        };

        let conta = tabelas.montar(&registro);
        tabelas.contas.insert(id, registro);

        Ok(conta)
    }

    async fn atualizar(
        &self,
        id: i32,
        alteracao: &AlteracaoConta,
    ) -> Result<Option<ContaPagarReceber>, AppError> {
        let mut tabelas = self.escrever()?;

        if let Some(fornecedor_id) = alteracao.fornecedor_cliente_id {
            if !tabelas.fornecedores.contains_key(&fornecedor_id) {
                return Err(anyhow!("Chave estrangeira inválida: fornecedor {}", fornecedor_id).into());
            }
        }

        let Some(registro) = tabelas.contas.get_mut(&id) else {
            return Ok(None);
        };

        registro.conta.descricao = alteracao.descricao.clone();
        registro.conta.valor = alteracao.valor;
        registro.conta.tipo = alteracao.tipo;
        registro.fornecedor_cliente_id = alteracao.fornecedor_cliente_id;

        let registro = registro.clone();
        Ok(Some(tabelas.montar(&registro)))
    }

    async fn salvar_baixa(
        &self,
        conta: &ContaPagarReceber,
    ) -> Result<Option<ContaPagarReceber>, AppError> {
        let mut tabelas = self.escrever()?;

        let Some(registro) = tabelas.contas.get_mut(&conta.id) else {
            return Ok(None);
        };

        registro.conta.data_baixa = conta.data_baixa;
        registro.conta.valor_baixa = conta.valor_baixa;
        registro.conta.esta_baixada = conta.esta_baixada;

        let registro = registro.clone();
        Ok(Some(tabelas.montar(&registro)))
    }

    async fn remover(&self, id: i32) -> Result<bool, AppError> {
        let mut tabelas = self.escrever()?;
        Ok(tabelas.contas.remove(&id).is_some())
    }
}

#[async_trait]
impl FornecedorRepository for InMemoryStore {
    async fn listar(&self) -> Result<Vec<FornecedorCliente>, AppError> {
        let tabelas = self.ler()?;
        Ok(tabelas.fornecedores.values().cloned().collect())
    }

    async fn buscar_por_id(&self, id: i32) -> Result<Option<FornecedorCliente>, AppError> {
        let tabelas = self.ler()?;
        Ok(tabelas.fornecedores.get(&id).cloned())
    }

    async fn inserir(&self, nome: &str) -> Result<FornecedorCliente, AppError> {
        let mut tabelas = self.escrever()?;

        tabelas.proximo_id_fornecedor += 1;
        let fornecedor = FornecedorCliente {
            id: tabelas.proximo_id_fornecedor,
            nome: nome.to_string(),
        };
        tabelas.fornecedores.insert(fornecedor.id, fornecedor.clone());

        Ok(fornecedor)
    }

    async fn atualizar(&self, id: i32, nome: &str) -> Result<Option<FornecedorCliente>, AppError> {
        let mut tabelas = self.escrever()?;

        Ok(tabelas.fornecedores.get_mut(&id).map(|fornecedor| {
            fornecedor.nome = nome.to_string();
            fornecedor.clone()
        }))
    }

    async fn possui_contas(&self, id: i32) -> Result<bool, AppError> {
        let tabelas = self.ler()?;
        Ok(tabelas
            .contas
            .values()
            .any(|r| r.fornecedor_cliente_id == Some(id)))
    }

    async fn remover(&self, id: i32) -> Result<bool, AppError> {
        let mut tabelas = self.escrever()?;

        if tabelas.contas.values().any(|r| r.fornecedor_cliente_id == Some(id)) {
            return Err(AppError::FornecedorComContas);
        }

        Ok(tabelas.fornecedores.remove(&id).is_some())
    }
}

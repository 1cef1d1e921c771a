// src/db/conta_repo.rs

use async_trait::async_trait;
use chrono::Datelike;
use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    db::repository::ContaRepository,
    models::conta::{intervalo_do_mes, AlteracaoConta, ContaPagarReceber, ContaRow, NovaConta},
};

// Todas as leituras devolvem a conta já unida ao fornecedor.
const SELECT_CONTA: &str = r#"
    SELECT
        c.id, c.descricao, c.valor, c.tipo,
        c.data_previsao, c.data_baixa, c.valor_baixa, c.esta_baixada,
        c.fornecedor_cliente_id,
        f.nome AS fornecedor_nome
    FROM contas_a_pagar_e_receber c
    LEFT JOIN fornecedor_cliente f ON f.id = c.fornecedor_cliente_id
"#;

#[derive(Clone)]
pub struct PgContaRepository {
    pool: PgPool,
}

impl PgContaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

async fn buscar<'e, E>(executor: E, id: i32) -> Result<Option<ContaPagarReceber>, AppError>
where
    E: Executor<'e, Database = Postgres>,
{
    let sql = format!("{SELECT_CONTA} WHERE c.id = $1");

    sqlx::query_as::<_, ContaRow>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?
        .map(ContaPagarReceber::try_from)
        .transpose()
}

fn converter_linhas(rows: Vec<ContaRow>) -> Result<Vec<ContaPagarReceber>, AppError> {
    rows.into_iter().map(ContaPagarReceber::try_from).collect()
}

#[async_trait]
impl ContaRepository for PgContaRepository {
    async fn listar(&self) -> Result<Vec<ContaPagarReceber>, AppError> {
        let sql = format!("{SELECT_CONTA} ORDER BY c.id");

        let rows = sqlx::query_as::<_, ContaRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        converter_linhas(rows)
    }

    async fn buscar_por_id(&self, id: i32) -> Result<Option<ContaPagarReceber>, AppError> {
        buscar(&self.pool, id).await
    }

    async fn listar_por_fornecedor(
        &self,
        fornecedor_cliente_id: i32,
    ) -> Result<Vec<ContaPagarReceber>, AppError> {
        let sql = format!("{SELECT_CONTA} WHERE c.fornecedor_cliente_id = $1 ORDER BY c.id");

        let rows = sqlx::query_as::<_, ContaRow>(&sql)
            .bind(fornecedor_cliente_id)
            .fetch_all(&self.pool)
            .await?;

        converter_linhas(rows)
    }

    async fn inserir_com_limite_mensal(
        &self,
        nova: &NovaConta,
        limite_mensal: i64,
    ) -> Result<ContaPagarReceber, AppError> {
        let mut tx = self.pool.begin().await?;

        // Serializa as criações do mesmo mês até o commit/rollback desta transação.
        let chave_do_mes =
            i64::from(nova.data_previsao.year()) * 100 + i64::from(nova.data_previsao.month());
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(chave_do_mes)
            .execute(&mut *tx)
            .await?;

        let (inicio, fim) = intervalo_do_mes(nova.data_previsao);
        let (quantidade,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM contas_a_pagar_e_receber
            WHERE data_previsao >= $1 AND data_previsao < $2
            "#,
        )
            .bind(inicio)
            .bind(fim)
            .fetch_one(&mut *tx)
            .await?;

        if quantidade >= limite_mensal {
            // O drop de `tx` faz o rollback.
            return Err(AppError::LimiteMensalExcedido);
        }

        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO contas_a_pagar_e_receber (
                descricao, valor, tipo, data_previsao, fornecedor_cliente_id
            )
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
            .bind(&nova.descricao)
            .bind(nova.valor)
            .bind(nova.tipo.as_str())
            .bind(nova.data_previsao)
            .bind(nova.fornecedor_cliente_id)
            .fetch_one(&mut *tx)
            .await?;

        let conta = buscar(&mut *tx, id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Conta {} sumiu logo após ser inserida", id))?;

        tx.commit().await?;

        Ok(conta)
    }

    async fn atualizar(
        &self,
        id: i32,
        alteracao: &AlteracaoConta,
    ) -> Result<Option<ContaPagarReceber>, AppError> {
        let mut tx = self.pool.begin().await?;

        let atualizada = sqlx::query(
            r#"
            UPDATE contas_a_pagar_e_receber
            SET descricao = $1, valor = $2, tipo = $3, fornecedor_cliente_id = $4
            WHERE id = $5
            "#,
        )
            .bind(&alteracao.descricao)
            .bind(alteracao.valor)
            .bind(alteracao.tipo.as_str())
            .bind(alteracao.fornecedor_cliente_id)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if atualizada.rows_affected() == 0 {
            return Ok(None);
        }

        let conta = buscar(&mut *tx, id).await?;
        tx.commit().await?;

        Ok(conta)
    }

    async fn salvar_baixa(
        &self,
        conta: &ContaPagarReceber,
    ) -> Result<Option<ContaPagarReceber>, AppError> {
        let mut tx = self.pool.begin().await?;

        let atualizada = sqlx::query(
            r#"
            UPDATE contas_a_pagar_e_receber
            SET data_baixa = $1, valor_baixa = $2, esta_baixada = $3
            WHERE id = $4
            "#,
        )
            .bind(conta.data_baixa)
            .bind(conta.valor_baixa)
            .bind(conta.esta_baixada)
            .bind(conta.id)
            .execute(&mut *tx)
            .await?;

        if atualizada.rows_affected() == 0 {
            return Ok(None);
        }

        let conta = buscar(&mut *tx, conta.id).await?;
        tx.commit().await?;

        Ok(conta)
    }

    async fn remover(&self, id: i32) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        let removida = sqlx::query("DELETE FROM contas_a_pagar_e_receber WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(removida.rows_affected() > 0)
    }
}

// src/db/fornecedor_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::repository::FornecedorRepository,
    models::fornecedor::FornecedorCliente,
};

#[derive(Clone)]
pub struct PgFornecedorRepository {
    pool: PgPool,
}

impl PgFornecedorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FornecedorRepository for PgFornecedorRepository {
    async fn listar(&self) -> Result<Vec<FornecedorCliente>, AppError> {
        let fornecedores = sqlx::query_as::<_, FornecedorCliente>(
            "SELECT id, nome FROM fornecedor_cliente ORDER BY id",
        )
            .fetch_all(&self.pool)
            .await?;

        Ok(fornecedores)
    }

    async fn buscar_por_id(&self, id: i32) -> Result<Option<FornecedorCliente>, AppError> {
        let fornecedor = sqlx::query_as::<_, FornecedorCliente>(
            "SELECT id, nome FROM fornecedor_cliente WHERE id = $1",
        )
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(fornecedor)
    }

    async fn inserir(&self, nome: &str) -> Result<FornecedorCliente, AppError> {
        let mut tx = self.pool.begin().await?;

        let fornecedor = sqlx::query_as::<_, FornecedorCliente>(
            "INSERT INTO fornecedor_cliente (nome) VALUES ($1) RETURNING id, nome",
        )
            .bind(nome)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(fornecedor)
    }

    async fn atualizar(&self, id: i32, nome: &str) -> Result<Option<FornecedorCliente>, AppError> {
        let mut tx = self.pool.begin().await?;

        let fornecedor = sqlx::query_as::<_, FornecedorCliente>(
            "UPDATE fornecedor_cliente SET nome = $1 WHERE id = $2 RETURNING id, nome",
        )
            .bind(nome)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(fornecedor)
    }

    async fn possui_contas(&self, id: i32) -> Result<bool, AppError> {
        let (possui,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM contas_a_pagar_e_receber WHERE fornecedor_cliente_id = $1)",
        )
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(possui)
    }

    async fn remover(&self, id: i32) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        let removido = sqlx::query("DELETE FROM fornecedor_cliente WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                // Uma conta vinculada entre a checagem e o DELETE cai aqui.
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_foreign_key_violation() {
                        return AppError::FornecedorComContas;
                    }
                }
                AppError::DatabaseError(e)
            })?;

        tx.commit().await?;

        Ok(removido.rows_affected() > 0)
    }
}

// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{ContaRepository, FornecedorRepository, PgContaRepository, PgFornecedorRepository},
    services::{ContaService, FornecedorService},
};

const BIND_ADDR_PADRAO: &str = "0.0.0.0:8000";
const MAX_CONNECTIONS_PADRAO: u32 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub max_connections: u32,
}

impl Config {
    /// Lê as variáveis de ambiente (e o `.env`, se existir).
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| BIND_ADDR_PADRAO.to_string());
        let max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(valor) => valor
                .parse()
                .with_context(|| format!("DATABASE_MAX_CONNECTIONS inválido: '{}'", valor))?,
            Err(_) => MAX_CONNECTIONS_PADRAO,
        };

        Ok(Self {
            database_url,
            bind_addr,
            max_connections,
        })
    }

    pub async fn connect(&self) -> anyhow::Result<PgPool> {
        let pool = PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&self.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");
        Ok(pool)
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub conta_service: ContaService,
    pub fornecedor_service: FornecedorService,
}

impl AppState {
    pub fn new(contas: Arc<dyn ContaRepository>, fornecedores: Arc<dyn FornecedorRepository>) -> Self {
        Self {
            conta_service: ContaService::new(contas, fornecedores.clone()),
            fornecedor_service: FornecedorService::new(fornecedores),
        }
    }

    pub fn with_pool(pool: PgPool) -> Self {
        Self::new(
            Arc::new(PgContaRepository::new(pool.clone())),
            Arc::new(PgFornecedorRepository::new(pool)),
        )
    }
}

//! Serviço HTTP de contas a pagar e receber e seus fornecedores/clientes.

use axum::{routing::get, routing::post, Json, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod models;
pub mod services;

use crate::{config::AppState, docs::ApiDoc};

async fn hello_world() -> Json<Value> {
    Json(json!({ "Hello": "World" }))
}

/// Monta o router completo (rotas, documentação e log de requisições).
pub fn app(app_state: AppState) -> Router {
    let contas_routes = Router::new()
        .route(
            "/contas-a-pagar-e-receber",
            get(handlers::contas::listar_contas).post(handlers::contas::criar_conta),
        )
        .route(
            "/contas-a-pagar-e-receber/{id}",
            get(handlers::contas::obter_conta)
                .put(handlers::contas::atualizar_conta)
                .delete(handlers::contas::deletar_conta),
        )
        .route(
            "/contas-a-pagar-e-receber/{id}/baixar",
            post(handlers::contas::baixar_conta),
        );

    let fornecedor_routes = Router::new()
        .route(
            "/fornecedor-cliente",
            get(handlers::fornecedores::listar_fornecedores)
                .post(handlers::fornecedores::criar_fornecedor),
        )
        .route(
            "/fornecedor-cliente/{id}",
            get(handlers::fornecedores::obter_fornecedor)
                .put(handlers::fornecedores::atualizar_fornecedor)
                .delete(handlers::fornecedores::deletar_fornecedor),
        )
        .route(
            "/fornecedor-cliente/{id}/contas-a-pagar-e-receber",
            get(handlers::contas::listar_contas_do_fornecedor),
        );

    Router::new()
        .route("/", get(hello_world))
        .merge(contas_routes)
        .merge(fornecedor_routes)
        .with_state(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
}

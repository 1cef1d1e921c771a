// src/handlers/fornecedores.rs

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::{
        error::AppError,
        extractors::{IdPath, ValidatedJson},
    },
    config::AppState,
    models::fornecedor::{FornecedorCliente, FornecedorClienteRequest},
};

// GET /fornecedor-cliente
#[utoipa::path(
    get,
    path = "/fornecedor-cliente",
    tag = "Fornecedor",
    responses(
        (status = 200, description = "Lista de fornecedores/clientes", body = Vec<FornecedorCliente>)
    )
)]
pub async fn listar_fornecedores(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let fornecedores = app_state.fornecedor_service.listar().await?;

    Ok((StatusCode::OK, Json(fornecedores)))
}

// GET /fornecedor-cliente/{id}
#[utoipa::path(
    get,
    path = "/fornecedor-cliente/{id}",
    tag = "Fornecedor",
    params(("id" = i32, Path, description = "ID do fornecedor/cliente")),
    responses(
        (status = 200, description = "Fornecedor/cliente encontrado", body = FornecedorCliente),
        (status = 404, description = "Fornecedor/cliente não encontrado")
    )
)]
pub async fn obter_fornecedor(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, AppError> {
    let fornecedor = app_state.fornecedor_service.buscar(id).await?;

    Ok((StatusCode::OK, Json(fornecedor)))
}

// POST /fornecedor-cliente
#[utoipa::path(
    post,
    path = "/fornecedor-cliente",
    tag = "Fornecedor",
    request_body = FornecedorClienteRequest,
    responses(
        (status = 201, description = "Fornecedor/cliente criado", body = FornecedorCliente),
        (status = 422, description = "Dados inválidos")
    )
)]
pub async fn criar_fornecedor(
    State(app_state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<FornecedorClienteRequest>,
) -> Result<impl IntoResponse, AppError> {
    let fornecedor = app_state.fornecedor_service.criar(&payload.nome).await?;

    Ok((StatusCode::CREATED, Json(fornecedor)))
}

// PUT /fornecedor-cliente/{id}
#[utoipa::path(
    put,
    path = "/fornecedor-cliente/{id}",
    tag = "Fornecedor",
    params(("id" = i32, Path, description = "ID do fornecedor/cliente")),
    request_body = FornecedorClienteRequest,
    responses(
        (status = 200, description = "Fornecedor/cliente atualizado", body = FornecedorCliente),
        (status = 404, description = "Fornecedor/cliente não encontrado"),
        (status = 422, description = "Dados inválidos")
    )
)]
pub async fn atualizar_fornecedor(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(payload): ValidatedJson<FornecedorClienteRequest>,
) -> Result<impl IntoResponse, AppError> {
    let fornecedor = app_state.fornecedor_service.atualizar(id, &payload.nome).await?;

    Ok((StatusCode::OK, Json(fornecedor)))
}

// DELETE /fornecedor-cliente/{id}
#[utoipa::path(
    delete,
    path = "/fornecedor-cliente/{id}",
    tag = "Fornecedor",
    params(("id" = i32, Path, description = "ID do fornecedor/cliente")),
    responses(
        (status = 204, description = "Fornecedor/cliente removido"),
        (status = 404, description = "Fornecedor/cliente não encontrado"),
        (status = 422, description = "Fornecedor/cliente possui contas vinculadas")
    )
)]
pub async fn deletar_fornecedor(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, AppError> {
    app_state.fornecedor_service.remover(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// src/handlers/contas.rs

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
    models::conta::{
        AlteracaoConta, AtualizarContaRequest, ContaPagarReceber, ContaPagarReceberRequest,
        NovaConta,
    },
};

// GET /contas-a-pagar-e-receber
#[utoipa::path(
    get,
    path = "/contas-a-pagar-e-receber",
    tag = "Contas",
    responses(
        (status = 200, description = "Lista de contas", body = Vec<ContaPagarReceber>)
    )
)]
pub async fn listar_contas(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let contas = app_state.conta_service.listar().await?;

    Ok((StatusCode::OK, Json(contas)))
}

// GET /contas-a-pagar-e-receber/{id}
#[utoipa::path(
    get,
    path = "/contas-a-pagar-e-receber/{id}",
    tag = "Contas",
    params(("id" = i32, Path, description = "ID da conta")),
    responses(
        (status = 200, description = "Conta encontrada", body = ContaPagarReceber),
        (status = 404, description = "Conta não encontrada")
    )
)]
pub async fn obter_conta(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, AppError> {
    let conta = app_state.conta_service.buscar(id).await?;

    Ok((StatusCode::OK, Json(conta)))
}

// POST /contas-a-pagar-e-receber
#[utoipa::path(
    post,
    path = "/contas-a-pagar-e-receber",
    tag = "Contas",
    request_body = ContaPagarReceberRequest,
    responses(
        (status = 201, description = "Conta criada", body = ContaPagarReceber),
        (status = 422, description = "Dados inválidos, fornecedor inexistente ou cota do mês esgotada")
    )
)]
pub async fn criar_conta(
    State(app_state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ContaPagarReceberRequest>,
) -> Result<impl IntoResponse, AppError> {
    let nova = NovaConta::try_from(payload)?;
    let conta = app_state.conta_service.criar(nova).await?;

    Ok((StatusCode::CREATED, Json(conta)))
}

// PUT /contas-a-pagar-e-receber/{id}
#[utoipa::path(
    put,
    path = "/contas-a-pagar-e-receber/{id}",
    tag = "Contas",
    params(("id" = i32, Path, description = "ID da conta")),
    request_body = AtualizarContaRequest,
    responses(
        (status = 200, description = "Conta atualizada", body = ContaPagarReceber),
        (status = 404, description = "Conta não encontrada"),
        (status = 422, description = "Dados inválidos ou fornecedor inexistente")
    )
)]
pub async fn atualizar_conta(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(payload): ValidatedJson<AtualizarContaRequest>,
) -> Result<impl IntoResponse, AppError> {
    let alteracao = AlteracaoConta::try_from(payload)?;
    let conta = app_state.conta_service.atualizar(id, alteracao).await?;

    Ok((StatusCode::OK, Json(conta)))
}

// POST /contas-a-pagar-e-receber/{id}/baixar
#[utoipa::path(
    post,
    path = "/contas-a-pagar-e-receber/{id}/baixar",
    tag = "Contas",
    params(("id" = i32, Path, description = "ID da conta")),
    responses(
        (status = 200, description = "Conta baixada", body = ContaPagarReceber),
        (status = 404, description = "Conta não encontrada")
    )
)]
pub async fn baixar_conta(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, AppError> {
    let conta = app_state.conta_service.baixar(id).await?;

    Ok((StatusCode::OK, Json(conta)))
}

// DELETE /contas-a-pagar-e-receber/{id}
#[utoipa::path(
    delete,
    path = "/contas-a-pagar-e-receber/{id}",
    tag = "Contas",
    params(("id" = i32, Path, description = "ID da conta")),
    responses(
        (status = 204, description = "Conta removida"),
        (status = 404, description = "Conta não encontrada")
    )
)]
pub async fn deletar_conta(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, AppError> {
    app_state.conta_service.remover(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// GET /fornecedor-cliente/{id}/contas-a-pagar-e-receber
#[utoipa::path(
    get,
    path = "/fornecedor-cliente/{id}/contas-a-pagar-e-receber",
    tag = "Fornecedor",
    params(("id" = i32, Path, description = "ID do fornecedor/cliente")),
    responses(
        (status = 200, description = "Contas do fornecedor/cliente", body = Vec<ContaPagarReceber>),
        (status = 422, description = "Fornecedor inexistente")
    )
)]
pub async fn listar_contas_do_fornecedor(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, AppError> {
    let contas = app_state.conta_service.listar_por_fornecedor(id).await?;

    Ok((StatusCode::OK, Json(contas)))
}

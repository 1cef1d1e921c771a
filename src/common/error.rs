use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

// Nosso tipo de erro, agora com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // O corpo nem chegou a ser desserializado (JSON malformado, campo ausente...)
    #[error("Corpo da requisição inválido: {0}")]
    InvalidBody(String),

    #[error("Parâmetro de rota inválido: {0}")]
    InvalidPath(String),

    #[error("{0} não encontrado(a)")]
    NotFound(&'static str),

    #[error("Esse fornecedor não existe no banco de dados")]
    FornecedorInexistente,

    #[error("Você não pode mais lançar contas para esse mês")]
    LimiteMensalExcedido,

    #[error("Esse fornecedor possui contas vinculadas")]
    FornecedorComContas,

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::InvalidBody(_)
            | AppError::InvalidPath(_)
            | AppError::FornecedorInexistente
            | AppError::LimiteMensalExcedido
            | AppError::FornecedorComContas => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

// Lista de violações no formato {"loc": ["body", campo], "msg": ..., "type": ...},
// ordenada pelo nome do campo para que a resposta seja determinística.
fn validation_details(errors: &validator::ValidationErrors) -> Vec<Value> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    fields
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |e| {
                let msg = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Valor inválido para '{}'", field));
                json!({
                    "loc": ["body", field.to_string()],
                    "msg": msg,
                    "type": e.code.to_string(),
                })
            })
        })
        .collect()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match &self {
            AppError::ValidationError(errors) => json!({ "detail": validation_details(errors) }),
            AppError::InvalidBody(reason) => json!({
                "detail": [{
                    "loc": ["body"],
                    "msg": reason,
                    "type": "json_invalido",
                }]
            }),
            AppError::InvalidPath(reason) => json!({
                "detail": [{
                    "loc": ["path", "id"],
                    "msg": reason,
                    "type": "path_invalido",
                }]
            }),
            AppError::NotFound(_) => json!({ "message": self.to_string() }),
            AppError::FornecedorInexistente
            | AppError::LimiteMensalExcedido
            | AppError::FornecedorComContas => json!({ "detail": self.to_string() }),

            // O `tracing` loga a causa; o cliente recebe só uma mensagem genérica.
            AppError::DatabaseError(e) => {
                tracing::error!("Erro de banco de dados: {:?}", e);
                json!({ "message": "Ocorreu um erro inesperado." })
            }
            AppError::InternalServerError(e) => {
                tracing::error!("Erro Interno do Servidor: {:#}", e);
                json!({ "message": "Ocorreu um erro inesperado." })
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::{ValidationError, ValidationErrors};

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn not_found_renders_entity_name() {
        let response = AppError::NotFound("Conta a Pagar e receber").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Conta a Pagar e receber não encontrado(a)");
    }

    #[tokio::test]
    async fn validation_errors_are_listed_by_field() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "valor",
            ValidationError::new("valor_positivo").with_message("O valor deve ser maior que zero".into()),
        );
        errors.add("descricao", ValidationError::new("length"));

        let response = AppError::ValidationError(errors).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_json(response).await;
        let detail = body["detail"].as_array().unwrap();
        assert_eq!(detail.len(), 2);
        assert_eq!(detail[0]["loc"], json!(["body", "descricao"]));
        assert_eq!(detail[1]["loc"], json!(["body", "valor"]));
        assert_eq!(detail[1]["msg"], "O valor deve ser maior que zero");
        assert_eq!(detail[1]["type"], "valor_positivo");
    }

    #[tokio::test]
    async fn invalid_path_points_at_the_id() {
        let response = AppError::InvalidPath("Cannot parse `abc`".into()).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_json(response).await;
        assert_eq!(body["detail"][0]["loc"], json!(["path", "id"]));
        assert_eq!(body["detail"][0]["type"], "path_invalido");
    }

    #[tokio::test]
    async fn business_rules_render_as_unprocessable() {
        let response = AppError::LimiteMensalExcedido.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["detail"], "Você não pode mais lançar contas para esse mês");
    }

    #[tokio::test]
    async fn internal_errors_hide_the_cause() {
        let response = AppError::InternalServerError(anyhow::anyhow!("falha secreta")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Ocorreu um erro inesperado.");
    }
}

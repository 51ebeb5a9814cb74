use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Request body for creating a filme.
#[derive(Clone, Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFilmeDto {
    #[validate(length(min = 1, message = "O título do filme é obrigatório"))]
    pub titulo: String,
    #[serde(default)]
    #[validate(length(max = 50, message = "O tamanho do gênero não pode exceder 50 caracteres"))]
    pub genero: Option<String>,
    /// Duration in minutes.
    #[validate(range(min = 70, max = 600, message = "A duração deve ter entre 70 e 600 minutos"))]
    pub duracao: i32,
}

/// Request body for a full update, and the shape partial updates are applied to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFilmeDto {
    #[validate(length(min = 1, message = "O título do filme é obrigatório"))]
    pub titulo: String,
    #[serde(default)]
    #[validate(length(max = 50, message = "O tamanho do gênero não pode exceder 50 caracteres"))]
    pub genero: Option<String>,
    #[validate(range(min = 70, max = 600, message = "A duração deve ter entre 70 e 600 minutos"))]
    pub duracao: i32,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReadFilmeDto {
    pub id: i32,
    pub titulo: String,
    pub genero: Option<String>,
    pub duracao: i32,
    /// When this projection was produced.
    #[schema(value_type = String, format = DateTime)]
    pub hora_da_consulta: Timestamp,
}

pub const DEFAULT_TAKE: u64 = 10;

#[derive(Clone, Copy, Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    #[serde(default)]
    pub skip: u64,
    #[serde(default = "default_take")]
    pub take: u64,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self { skip: 0, take: DEFAULT_TAKE }
    }
}

fn default_take() -> u64 {
    DEFAULT_TAKE
}

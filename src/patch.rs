//! Partial updates of a filme.
//!
//! Bodies use the JSON Patch wire format, but paths are restricted to the
//! fields of [`UpdateFilmeDto`] and each operation is applied through a typed
//! setter, so an unknown path never reaches the interpreter.

use std::{fmt, str::FromStr};

use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;
use utoipa::ToSchema;

use crate::models::UpdateFilmeDto;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub enum FilmeField {
    Titulo,
    Genero,
    Duracao,
}

impl FilmeField {
    pub fn name(self) -> &'static str {
        match self {
            FilmeField::Titulo => "titulo",
            FilmeField::Genero => "genero",
            FilmeField::Duracao => "duracao",
        }
    }

    fn get(self, dto: &UpdateFilmeDto) -> Value {
        match self {
            FilmeField::Titulo => Value::from(dto.titulo.clone()),
            FilmeField::Genero => dto.genero.clone().map_or(Value::Null, Value::from),
            FilmeField::Duracao => Value::from(dto.duracao),
        }
    }

    fn set(self, dto: &mut UpdateFilmeDto, value: Value) -> Result<(), PatchError> {
        match self {
            FilmeField::Titulo => dto.titulo = convert(self, value)?,
            FilmeField::Genero => dto.genero = convert(self, value)?,
            FilmeField::Duracao => dto.duracao = convert(self, value)?,
        }
        Ok(())
    }

    fn reset(self, dto: &mut UpdateFilmeDto) {
        match self {
            FilmeField::Titulo => dto.titulo = String::new(),
            FilmeField::Genero => dto.genero = None,
            FilmeField::Duracao => dto.duracao = 0,
        }
    }
}

impl fmt::Display for FilmeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.name())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown path `{0}`")]
pub struct UnknownField(String);

impl FromStr for FilmeField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.strip_prefix('/').unwrap_or(s);
        [FilmeField::Titulo, FilmeField::Genero, FilmeField::Duracao]
            .into_iter()
            .find(|field| field.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

impl TryFrom<String> for FilmeField {
    type Error = UnknownField;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// One step of a partial update.
#[derive(Clone, Debug, Deserialize, ToSchema)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOperation {
    Add {
        #[schema(value_type = String, example = "/titulo")]
        path: FilmeField,
        value: Value,
    },
    Remove {
        #[schema(value_type = String, example = "/genero")]
        path: FilmeField,
    },
    Replace {
        #[schema(value_type = String, example = "/duracao")]
        path: FilmeField,
        value: Value,
    },
    Copy {
        #[schema(value_type = String)]
        from: FilmeField,
        #[schema(value_type = String)]
        path: FilmeField,
    },
    Move {
        #[schema(value_type = String)]
        from: FilmeField,
        #[schema(value_type = String)]
        path: FilmeField,
    },
    Test {
        #[schema(value_type = String)]
        path: FilmeField,
        value: Value,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum PatchError {
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: FilmeField, reason: String },

    #[error("test failed for {field}: expected {expected}, found {actual}")]
    TestFailed { field: FilmeField, expected: Value, actual: Value },
}

impl PatchError {
    pub fn field(&self) -> FilmeField {
        match self {
            PatchError::InvalidValue { field, .. } | PatchError::TestFailed { field, .. } => *field,
        }
    }
}

/// Applies `ops` in order. Stops at the first failing operation, leaving `dto`
/// partially patched.
pub fn apply<I>(dto: &mut UpdateFilmeDto, ops: I) -> Result<(), PatchError>
where
    I: IntoIterator<Item = PatchOperation>,
{
    for op in ops {
        match op {
            PatchOperation::Add { path, value } | PatchOperation::Replace { path, value } => {
                path.set(dto, value)?
            }
            PatchOperation::Remove { path } => path.reset(dto),
            PatchOperation::Copy { from, path } => path.set(dto, from.get(dto))?,
            PatchOperation::Move { from, path } => {
                if from != path {
                    path.set(dto, from.get(dto))?;
                    from.reset(dto);
                }
            }
            PatchOperation::Test { path, value } => {
                let actual = path.get(dto);
                if actual != value {
                    return Err(PatchError::TestFailed { field: path, expected: value, actual });
                }
            }
        }
    }
    Ok(())
}

fn convert<T: DeserializeOwned>(field: FilmeField, value: Value) -> Result<T, PatchError> {
    serde_json::from_value(value)
        .map_err(|e| PatchError::InvalidValue { field, reason: e.to_string() })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn dune() -> UpdateFilmeDto {
        UpdateFilmeDto {
            titulo: "Dune".to_string(),
            genero: Some("Ficção científica".to_string()),
            duracao: 155,
        }
    }

    fn ops(body: Value) -> Vec<PatchOperation> {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn empty_patch_is_a_no_op() {
        let mut dto = dune();
        apply(&mut dto, Vec::new()).unwrap();
        assert_eq!(dto, dune());
    }

    #[test]
    fn replace_and_add_set_fields() {
        let mut dto = dune();
        apply(
            &mut dto,
            ops(json!([
                { "op": "replace", "path": "/titulo", "value": "Dune: Part Two" },
                { "op": "add", "path": "/duracao", "value": 166 },
            ])),
        )
        .unwrap();
        assert_eq!(dto.titulo, "Dune: Part Two");
        assert_eq!(dto.duracao, 166);
        assert_eq!(dto.genero, dune().genero);
    }

    #[test]
    fn operations_run_in_order() {
        let mut dto = dune();
        apply(
            &mut dto,
            ops(json!([
                { "op": "replace", "path": "/titulo", "value": "A" },
                { "op": "replace", "path": "/titulo", "value": "B" },
            ])),
        )
        .unwrap();
        assert_eq!(dto.titulo, "B");
    }

    #[test]
    fn remove_resets_to_default() {
        let mut dto = dune();
        apply(
            &mut dto,
            ops(json!([
                { "op": "remove", "path": "/genero" },
                { "op": "remove", "path": "/duracao" },
            ])),
        )
        .unwrap();
        assert_eq!(dto.genero, None);
        assert_eq!(dto.duracao, 0);
    }

    #[test]
    fn copy_and_move_between_text_fields() {
        let mut dto = dune();
        apply(&mut dto, ops(json!([{ "op": "copy", "from": "/titulo", "path": "/genero" }])))
            .unwrap();
        assert_eq!(dto.genero.as_deref(), Some("Dune"));

        let mut dto = dune();
        apply(&mut dto, ops(json!([{ "op": "move", "from": "/genero", "path": "/titulo" }])))
            .unwrap();
        assert_eq!(dto.titulo, "Ficção científica");
        assert_eq!(dto.genero, None);
    }

    #[test]
    fn move_onto_itself_keeps_value() {
        let mut dto = dune();
        apply(&mut dto, ops(json!([{ "op": "move", "from": "/titulo", "path": "/titulo" }])))
            .unwrap();
        assert_eq!(dto, dune());
    }

    #[test]
    fn wrong_type_is_reported_against_field() {
        let mut dto = dune();
        let err = apply(
            &mut dto,
            ops(json!([{ "op": "replace", "path": "/duracao", "value": "longo" }])),
        )
        .unwrap_err();
        assert_eq!(err.field(), FilmeField::Duracao);
        assert!(matches!(err, PatchError::InvalidValue { .. }));
    }

    #[test]
    fn failed_test_stops_the_patch() {
        let mut dto = dune();
        let err = apply(
            &mut dto,
            ops(json!([
                { "op": "test", "path": "/duracao", "value": 90 },
                { "op": "replace", "path": "/titulo", "value": "never applied" },
            ])),
        )
        .unwrap_err();
        assert!(matches!(err, PatchError::TestFailed { field: FilmeField::Duracao, .. }));
        assert_eq!(dto.titulo, "Dune");
    }

    #[test]
    fn paths_are_case_insensitive() {
        assert_eq!("/Titulo".parse::<FilmeField>().unwrap(), FilmeField::Titulo);
        assert_eq!("DURACAO".parse::<FilmeField>().unwrap(), FilmeField::Duracao);
    }

    #[test]
    fn unknown_path_rejects_the_body() {
        let parsed: Result<Vec<PatchOperation>, _> =
            serde_json::from_value(json!([{ "op": "replace", "path": "/id", "value": 3 }]));
        assert!(parsed.is_err());
    }
}

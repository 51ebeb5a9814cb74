use jiff::Timestamp;
use sea_orm::{ActiveValue::{NotSet, Set}, IntoActiveModel};

use crate::{
    entities::filme,
    models::{CreateFilmeDto, ReadFilmeDto, UpdateFilmeDto},
};

impl From<CreateFilmeDto> for filme::ActiveModel {
    fn from(dto: CreateFilmeDto) -> Self {
        Self {
            id: NotSet,
            titulo: Set(dto.titulo),
            genero: Set(dto.genero),
            duracao: Set(dto.duracao),
        }
    }
}

impl From<filme::Model> for ReadFilmeDto {
    fn from(filme: filme::Model) -> Self {
        Self {
            id: filme.id,
            titulo: filme.titulo,
            genero: filme.genero,
            duracao: filme.duracao,
            hora_da_consulta: Timestamp::now(),
        }
    }
}

impl From<&filme::Model> for UpdateFilmeDto {
    fn from(filme: &filme::Model) -> Self {
        Self { titulo: filme.titulo.clone(), genero: filme.genero.clone(), duracao: filme.duracao }
    }
}

/// Overwrites every mapped field of `filme` with `dto`. The identity is kept.
pub fn apply_update(filme: filme::Model, dto: UpdateFilmeDto) -> filme::ActiveModel {
    let mut active = filme.into_active_model();
    active.titulo = Set(dto.titulo);
    active.genero = Set(dto.genero);
    active.duracao = Set(dto.duracao);
    active
}

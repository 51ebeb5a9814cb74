use axum::Json;
use utoipa::OpenApi;

use crate::{
    entities::filme,
    models::{CreateFilmeDto, ReadFilmeDto, UpdateFilmeDto},
    patch::PatchOperation,
    routes,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Filmes API", description = "Cadastro de filmes"),
    paths(
        routes::create,
        routes::create_batch,
        routes::list_all,
        routes::list_page,
        routes::list_page_query,
        routes::get_by_id,
        routes::update,
        routes::update_partial,
        routes::remove,
    ),
    components(schemas(filme::Model, CreateFilmeDto, UpdateFilmeDto, ReadFilmeDto, PatchOperation)),
    tags((name = "filme", description = "Filme CRUD"))
)]
pub struct ApiDoc;

pub async fn document() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{delete, get, patch, post, put},
};
use validator::Validate;

use crate::{
    AppState,
    entities::filme,
    error::{AppError, AppResult},
    extract::Json,
    mapping,
    models::{CreateFilmeDto, PageQuery, ReadFilmeDto, UpdateFilmeDto},
    patch::{self as filme_patch, PatchOperation},
};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/adicionar", post(create))
        .route("/adicionarEmLote", post(create_batch))
        .route("/recuperarTodos", get(list_all))
        .route("/paginacao", get(list_page_query))
        .route("/paginacao/skip/{skip}/take/{take}", get(list_page))
        .route("/{id}", get(get_by_id))
        .route("/atualizarFilme/{id}", put(update))
        .route("/atualizarFilmeParcial/{id}", patch(update_partial))
        .route("/deletarFilme/{id}", delete(remove))
}

#[utoipa::path(
    post,
    path = "/filme/adicionar",
    tag = "filme",
    request_body = CreateFilmeDto,
    responses(
        (status = 201, description = "Created", body = filme::Model),
        (status = 400, description = "Invalid body"),
    )
)]
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(dto): Json<CreateFilmeDto>,
) -> AppResult<impl IntoResponse> {
    dto.validate().map_err(AppError::bad_request)?;

    let ctx = state.store.context().await?;
    let filme = ctx.add(dto.into()).await?;
    ctx.commit().await?;

    tracing::info!(id = filme.id, titulo = %filme.titulo, "filme created");
    let location = format!("/filme/{}", filme.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(filme)))
}

/// Every valid item is committed on its own. Invalid items are skipped, and a
/// database failure leaves earlier items committed and later ones unattempted.
#[utoipa::path(
    post,
    path = "/filme/adicionarEmLote",
    tag = "filme",
    request_body = Vec<CreateFilmeDto>,
    responses((status = 201, description = "Input list echoed back", body = Vec<CreateFilmeDto>))
)]
pub async fn create_batch(
    State(state): State<Arc<AppState>>,
    Json(dtos): Json<Vec<CreateFilmeDto>>,
) -> AppResult<impl IntoResponse> {
    let mut created = 0usize;
    for (index, dto) in dtos.iter().enumerate() {
        if let Err(errors) = dto.validate() {
            tracing::warn!(index, %errors, "skipping invalid batch item");
            continue;
        }

        let ctx = state.store.context().await?;
        let filme = ctx.add(dto.clone().into()).await?;
        ctx.commit().await?;

        tracing::debug!(index, id = filme.id, "batch item committed");
        created += 1;
    }

    tracing::info!(received = dtos.len(), created, "batch create finished");
    Ok((StatusCode::CREATED, Json(dtos)))
}

#[utoipa::path(
    get,
    path = "/filme/recuperarTodos",
    tag = "filme",
    responses((status = 200, body = Vec<ReadFilmeDto>))
)]
pub async fn list_all(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<ReadFilmeDto>>> {
    let ctx = state.store.context().await?;
    let filmes = ctx.all().await?;
    Ok(Json(filmes.into_iter().map(ReadFilmeDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/filme/paginacao/skip/{skip}/take/{take}",
    tag = "filme",
    params(
        ("skip" = u64, Path, description = "Rows to skip"),
        ("take" = u64, Path, description = "Maximum rows to return"),
    ),
    responses((status = 200, body = Vec<ReadFilmeDto>))
)]
pub async fn list_page(
    State(state): State<Arc<AppState>>,
    Path((skip, take)): Path<(u64, u64)>,
) -> AppResult<Json<Vec<ReadFilmeDto>>> {
    page(&state, PageQuery { skip, take }).await
}

#[utoipa::path(
    get,
    path = "/filme/paginacao",
    tag = "filme",
    params(PageQuery),
    responses((status = 200, body = Vec<ReadFilmeDto>))
)]
pub async fn list_page_query(
    State(state): State<Arc<AppState>>,
    Query(q): Query<PageQuery>,
) -> AppResult<Json<Vec<ReadFilmeDto>>> {
    page(&state, q).await
}

async fn page(state: &AppState, q: PageQuery) -> AppResult<Json<Vec<ReadFilmeDto>>> {
    let ctx = state.store.context().await?;
    let filmes = ctx.page(q.skip, q.take).await?;
    Ok(Json(filmes.into_iter().map(ReadFilmeDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/filme/{id}",
    tag = "filme",
    params(("id" = i64, Path)),
    responses(
        (status = 200, body = ReadFilmeDto),
        (status = 404, description = "No filme with this id"),
    )
)]
pub async fn get_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> AppResult<Json<ReadFilmeDto>> {
    let ctx = state.store.context().await?;
    let filme = ctx.find(id).await?.ok_or(AppError::NotFound)?;
    Ok(Json(filme.into()))
}

#[utoipa::path(
    put,
    path = "/filme/atualizarFilme/{id}",
    tag = "filme",
    params(("id" = i64, Path)),
    request_body = UpdateFilmeDto,
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Invalid body"),
        (status = 404, description = "No filme with this id"),
    )
)]
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(dto): Json<UpdateFilmeDto>,
) -> AppResult<StatusCode> {
    dto.validate().map_err(AppError::bad_request)?;

    let ctx = state.store.context().await?;
    let filme = ctx.find(id).await?.ok_or(AppError::NotFound)?;
    ctx.update(mapping::apply_update(filme, dto)).await?;
    ctx.commit().await?;

    tracing::info!(id, "filme updated");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    patch,
    path = "/filme/atualizarFilmeParcial/{id}",
    tag = "filme",
    params(("id" = i64, Path)),
    request_body = Vec<PatchOperation>,
    responses(
        (status = 204, description = "Updated"),
        (status = 404, description = "No filme with this id"),
        (status = 422, description = "Patched filme is invalid"),
    )
)]
pub async fn update_partial(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(ops): Json<Vec<PatchOperation>>,
) -> AppResult<StatusCode> {
    let ctx = state.store.context().await?;
    let filme = ctx.find(id).await?.ok_or(AppError::NotFound)?;

    let mut dto = UpdateFilmeDto::from(&filme);
    let count = ops.len();
    filme_patch::apply(&mut dto, ops)?;
    dto.validate().map_err(AppError::unprocessable)?;

    ctx.update(mapping::apply_update(filme, dto)).await?;
    ctx.commit().await?;

    tracing::info!(id, ops = count, "filme patched");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/filme/deletarFilme/{id}",
    tag = "filme",
    params(("id" = i64, Path)),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "No filme with this id"),
    )
)]
pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    let ctx = state.store.context().await?;
    let filme = ctx.find(id).await?.ok_or(AppError::NotFound)?;
    ctx.remove(filme).await?;
    ctx.commit().await?;

    tracing::info!(id, "filme deleted");
    Ok(StatusCode::NO_CONTENT)
}

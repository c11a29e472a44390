/// Artists API routes
use crate::{
    api::extract::{Id, PageParams, Params, Payload},
    error::{Result, ServerError},
    state::AppState,
};
use axum::{extract::State, http::StatusCode, Json};
use lyrics_core::{
    filters::ArtistFilter,
    payload::ArtistPayload,
    views::{ArtistDetail, ArtistView},
    AlbumRepository, ArtistRepository, Page,
};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct ArtistQuery {
    #[serde(rename = "first_year_active__lt")]
    pub first_year_active_lt: Option<i32>,
    #[serde(rename = "first_year_active__gt")]
    pub first_year_active_gt: Option<i32>,
    pub name: Option<String>,
    #[serde(rename = "name__contains")]
    pub name_contains: Option<String>,
    pub ordering: Option<String>,
}

impl ArtistQuery {
    fn into_filter(self) -> ArtistFilter {
        ArtistFilter {
            first_year_active_lt: self.first_year_active_lt,
            first_year_active_gt: self.first_year_active_gt,
            name: self.name,
            name_contains: self.name_contains,
            ordering: Vec::new(),
        }
        .with_ordering(self.ordering.as_deref())
    }
}

/// GET /artists
pub async fn list_artists(
    State(app_state): State<AppState>,
    Params(query): Params<ArtistQuery>,
    Params(page): Params<PageParams>,
) -> Result<Json<Page<ArtistView>>> {
    let page = app_state.pagination.request(page.page, page.size);
    let artists = app_state
        .db
        .list_artists(&query.into_filter(), page)
        .await?;
    Ok(Json(artists.map(ArtistView::from)))
}

/// POST /artists
pub async fn create_artist(
    State(app_state): State<AppState>,
    Payload(payload): Payload<ArtistPayload>,
) -> Result<(StatusCode, Json<ArtistView>)> {
    let artist = app_state.db.create_artist(payload.into_create()?).await?;
    tracing::info!(artist_id = artist.id, "Artist created");
    Ok((StatusCode::CREATED, Json(artist.into())))
}

/// GET /artists/:id
/// Artist with its albums
pub async fn get_artist(
    Id(id): Id,
    State(app_state): State<AppState>,
) -> Result<Json<ArtistDetail>> {
    let artist = app_state
        .db
        .get_artist(id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Artist not found".to_string()))?;
    let albums = app_state.db.albums_by_artist(id).await?;
    Ok(Json(ArtistDetail::new(artist, albums)))
}

/// PATCH /artists/:id
pub async fn update_artist(
    Id(id): Id,
    State(app_state): State<AppState>,
    Payload(payload): Payload<ArtistPayload>,
) -> Result<Json<ArtistView>> {
    let artist = app_state
        .db
        .update_artist(id, payload.into_update()?)
        .await?;
    Ok(Json(artist.into()))
}

/// DELETE /artists/:id
pub async fn delete_artist(
    Id(id): Id,
    State(app_state): State<AppState>,
) -> Result<StatusCode> {
    app_state.db.delete_artist(id).await?;
    tracing::info!(artist_id = id, "Artist deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Lyrics API routes
use crate::{
    api::extract::{Id, PageParams, Params, Payload},
    error::{Result, ServerError},
    middleware::Caller,
    state::AppState,
};
use axum::{extract::State, http::StatusCode, Json};
use lyrics_core::{
    filters::{LyricFilter, RandomLyricFilter},
    payload::LyricPayload,
    views::LyricDetail,
    CreateLyric, LyricRepository, Page, UpdateLyric, Vote,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct LyricQuery {
    pub search: Option<String>,
    pub ordering: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RandomQuery {
    pub artist: Option<String>,
    pub artist_id: Option<String>,
}

/// Body of `GET /lyrics/random`: a lyric, or `{}` when nothing matches
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RandomLyric {
    Found(LyricDetail),
    Empty {},
}

/// GET /lyrics
pub async fn list_lyrics(
    State(app_state): State<AppState>,
    Params(query): Params<LyricQuery>,
    Params(page): Params<PageParams>,
) -> Result<Json<Page<LyricDetail>>> {
    let page = app_state.pagination.request(page.page, page.size);
    let filter = LyricFilter::new(query.search.as_deref(), query.ordering.as_deref());
    let lyrics = app_state.db.list_lyrics(&filter, page).await?;
    Ok(Json(lyrics.map(LyricDetail::from)))
}

/// POST /lyrics
/// `song` is an id or `{name, album}`
pub async fn create_lyric(
    State(app_state): State<AppState>,
    Payload(payload): Payload<LyricPayload>,
) -> Result<(StatusCode, Json<LyricDetail>)> {
    let lyric = CreateLyric::try_from(payload)?;
    let record = app_state.db.create_lyric(lyric).await?;
    Ok((StatusCode::CREATED, Json(record.into())))
}

/// GET /lyrics/:id
pub async fn get_lyric(
    Id(id): Id,
    State(app_state): State<AppState>,
) -> Result<Json<LyricDetail>> {
    let record = app_state
        .db
        .get_lyric(id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Lyric not found".to_string()))?;
    Ok(Json(record.into()))
}

/// PATCH /lyrics/:id
pub async fn update_lyric(
    Id(id): Id,
    State(app_state): State<AppState>,
    Payload(payload): Payload<LyricPayload>,
) -> Result<Json<LyricDetail>> {
    let update = UpdateLyric::try_from(payload)?;
    let record = app_state.db.update_lyric(id, update).await?;
    Ok(Json(record.into()))
}

/// DELETE /lyrics/:id
pub async fn delete_lyric(
    Id(id): Id,
    State(app_state): State<AppState>,
) -> Result<StatusCode> {
    app_state.db.delete_lyric(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /lyrics/:id/vote-up
pub async fn vote_up(
    Id(id): Id,
    State(app_state): State<AppState>,
    caller: Caller,
) -> Result<Json<LyricDetail>> {
    vote(&app_state, &caller, id, Vote::Up).await
}

/// POST /lyrics/:id/vote-down
pub async fn vote_down(
    Id(id): Id,
    State(app_state): State<AppState>,
    caller: Caller,
) -> Result<Json<LyricDetail>> {
    vote(&app_state, &caller, id, Vote::Down).await
}

async fn vote(app_state: &AppState, caller: &Caller, id: i64, vote: Vote) -> Result<Json<LyricDetail>> {
    let record = app_state.db.vote_lyric(caller.context(), id, vote).await?;
    Ok(Json(record.into()))
}

/// GET /lyrics/random?artist=&artist_id=
pub async fn random_lyric(
    State(app_state): State<AppState>,
    Params(query): Params<RandomQuery>,
) -> Result<Json<RandomLyric>> {
    let filter = RandomLyricFilter::parse(query.artist.as_deref(), query.artist_id.as_deref())
        .ok_or_else(|| ServerError::NotFound("Invalid artist_id".to_string()))?;

    let lyric = app_state.db.random_lyric(&filter).await?;
    Ok(Json(match lyric {
        Some(record) => RandomLyric::Found(record.into()),
        None => RandomLyric::Empty {},
    }))
}

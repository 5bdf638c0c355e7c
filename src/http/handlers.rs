use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime};

use crate::app::clips::ClipService;
use crate::app::posts::{PostCommands, UpdatePost};
use crate::app::queries::{Page, PostQueries, PostTree};
use crate::app::social::SocialService;
use crate::app::trips::{TripService, TripWithDates};
use crate::app::users::{ProfileUpdate, UserService};
use crate::domain::clip::{Clip, ClipDraft};
use crate::domain::post::{
    Post, PostCoComment, PostCoCommentDraft, PostComment, PostCommentDraft, PostDraft, PostReport,
    PostReportDraft,
};
use crate::domain::trip::TripDraft;
use crate::domain::user::{User, UserDraft};
use crate::http::AppError;
use crate::AppState;

#[derive(Serialize)]
pub(crate) struct HealthResponse {
    status: &'static str,
}

#[derive(Serialize)]
pub struct IdResponse {
    pub id: i64,
}

pub(crate) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// ---------------------------------------------------------------------------
// Posts — commands
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub is_opened: bool,
    pub user_id: i64,
    pub trip_id: i64,
    pub clip_id: Option<i64>,
}

pub async fn create_post(
    State(state): State<AppState>,
    Json(payload): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<IdResponse>), AppError> {
    let commands = PostCommands::new(state.store.clone(), state.events.clone());
    let id = commands
        .create_post(PostDraft {
            title: payload.title,
            content: payload.content,
            is_opened: payload.is_opened,
            user_id: payload.user_id,
            trip_id: payload.trip_id,
            clip_id: payload.clip_id,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(IdResponse { id })))
}

#[derive(Deserialize)]
pub struct UpdatePostRequest {
    pub title: String,
    pub content: String,
    pub is_opened: bool,
    pub user_id: i64,
}

pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdatePostRequest>,
) -> Result<StatusCode, AppError> {
    let commands = PostCommands::new(state.store.clone(), state.events.clone());
    commands
        .update_post(
            id,
            UpdatePost {
                title: payload.title,
                content: payload.content,
                is_opened: payload.is_opened,
                user_id: payload.user_id,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct ActingUserQuery {
    pub user_id: i64,
}

pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<ActingUserQuery>,
) -> Result<StatusCode, AppError> {
    let commands = PostCommands::new(state.store.clone(), state.events.clone());
    commands.delete_post(id, query.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Posts — queries
// ---------------------------------------------------------------------------

pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Post>, AppError> {
    let queries = PostQueries::new(state.store.clone());
    Ok(Json(queries.get_post(id).await?))
}

#[derive(Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
}

pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<Post>>, AppError> {
    let queries = PostQueries::new(state.store.clone());
    let page = queries
        .post_page(query.page.unwrap_or(0), query.size.unwrap_or(10))
        .await?;
    Ok(Json(page))
}

pub async fn posts_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<Post>>, AppError> {
    let queries = PostQueries::new(state.store.clone());
    Ok(Json(queries.posts_by_user(user_id).await?))
}

pub async fn get_post_full(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PostTree>, AppError> {
    let queries = PostQueries::new(state.store.clone());
    Ok(Json(queries.post_with_comments(id).await?))
}

#[derive(Deserialize)]
pub struct SearchQuery {
    pub start: String,
    pub end: String,
    /// Comma-separated owner ids.
    pub user_ids: String,
    pub opened_only: Option<bool>,
}

pub async fn search_posts(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Post>>, AppError> {
    let start = parse_timestamp(&query.start, "start")?;
    let end = parse_timestamp(&query.end, "end")?;
    let user_ids = parse_id_list(&query.user_ids)?;

    let queries = PostQueries::new(state.store.clone());
    let posts = queries
        .search_posts(start, end, &user_ids, query.opened_only.unwrap_or(true))
        .await?;
    Ok(Json(posts))
}

fn parse_timestamp(value: &str, name: &str) -> Result<OffsetDateTime, AppError> {
    OffsetDateTime::parse(value, &Rfc3339)
        .map_err(|_| AppError::bad_request(format!("invalid {}: expected an RFC 3339 timestamp", name)))
}

fn parse_id_list(value: &str) -> Result<Vec<i64>, AppError> {
    value
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| {
            part.trim()
                .parse::<i64>()
                .map_err(|_| AppError::bad_request("invalid user_ids: expected comma-separated ids"))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
    pub user_id: i64,
}

pub async fn create_comment(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    Json(payload): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<IdResponse>), AppError> {
    let commands = PostCommands::new(state.store.clone(), state.events.clone());
    let id = commands
        .create_comment(PostCommentDraft {
            content: payload.content,
            user_id: payload.user_id,
            post_id,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(IdResponse { id })))
}

#[derive(Deserialize)]
pub struct UpdateCommentRequest {
    pub content: String,
    pub user_id: i64,
}

pub async fn update_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateCommentRequest>,
) -> Result<StatusCode, AppError> {
    let commands = PostCommands::new(state.store.clone(), state.events.clone());
    commands
        .update_comment(id, payload.content, payload.user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<ActingUserQuery>,
) -> Result<StatusCode, AppError> {
    let commands = PostCommands::new(state.store.clone(), state.events.clone());
    commands.delete_comment(id, query.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PostComment>, AppError> {
    let queries = PostQueries::new(state.store.clone());
    Ok(Json(queries.get_comment(id).await?))
}

pub async fn comments_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<PostComment>>, AppError> {
    let queries = PostQueries::new(state.store.clone());
    Ok(Json(queries.comments_by_user(user_id).await?))
}

// ---------------------------------------------------------------------------
// Co-comments
// ---------------------------------------------------------------------------

pub async fn create_co_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<i64>,
    Json(payload): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<IdResponse>), AppError> {
    let commands = PostCommands::new(state.store.clone(), state.events.clone());
    let id = commands
        .create_co_comment(PostCoCommentDraft {
            content: payload.content,
            user_id: payload.user_id,
            comment_id,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(IdResponse { id })))
}

pub async fn update_co_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateCommentRequest>,
) -> Result<StatusCode, AppError> {
    let commands = PostCommands::new(state.store.clone(), state.events.clone());
    commands
        .update_co_comment(id, payload.content, payload.user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_co_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<ActingUserQuery>,
) -> Result<StatusCode, AppError> {
    let commands = PostCommands::new(state.store.clone(), state.events.clone());
    commands.delete_co_comment(id, query.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_co_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PostCoComment>, AppError> {
    let queries = PostQueries::new(state.store.clone());
    Ok(Json(queries.get_co_comment(id).await?))
}

pub async fn co_comments_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<PostCoComment>>, AppError> {
    let queries = PostQueries::new(state.store.clone());
    Ok(Json(queries.co_comments_by_user(user_id).await?))
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct ReportPostRequest {
    pub content: String,
    pub report_category_id: i64,
    pub user_id: i64,
}

pub async fn report_post(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    Json(payload): Json<ReportPostRequest>,
) -> Result<(StatusCode, Json<IdResponse>), AppError> {
    let commands = PostCommands::new(state.store.clone(), state.events.clone());
    let id = commands
        .report_post(PostReportDraft {
            content: payload.content,
            report_category_id: payload.report_category_id,
            user_id: payload.user_id,
            post_id,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(IdResponse { id })))
}

pub async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PostReport>, AppError> {
    let queries = PostQueries::new(state.store.clone());
    Ok(Json(queries.get_report(id).await?))
}

pub async fn reports_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<PostReport>>, AppError> {
    let queries = PostQueries::new(state.store.clone());
    Ok(Json(queries.reports_by_user(user_id).await?))
}

// ---------------------------------------------------------------------------
// Trips
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct TripDateRequest {
    pub start_date: Date,
    pub end_date: Date,
}

#[derive(Deserialize)]
pub struct CreateTripRequest {
    pub title: String,
    pub party: String,
    #[serde(default)]
    pub dates: Vec<TripDateRequest>,
}

pub async fn create_trip(
    State(state): State<AppState>,
    Json(payload): Json<CreateTripRequest>,
) -> Result<(StatusCode, Json<TripWithDates>), AppError> {
    let service = TripService::new(state.store.clone());
    let trip = service
        .create_trip(TripDraft {
            title: payload.title,
            party: payload.party,
            dates: payload
                .dates
                .into_iter()
                .map(|range| (range.start_date, range.end_date))
                .collect(),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(trip)))
}

pub async fn get_trip(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TripWithDates>, AppError> {
    let service = TripService::new(state.store.clone());
    Ok(Json(service.get_trip(id).await?))
}

pub async fn delete_trip(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let service = TripService::new(state.store.clone());
    service.delete_trip(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Clips
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct CreateClipRequest {
    pub title: String,
    pub url: String,
    pub is_opened: bool,
    pub user_id: i64,
    pub trip_id: i64,
}

pub async fn create_clip(
    State(state): State<AppState>,
    Json(payload): Json<CreateClipRequest>,
) -> Result<(StatusCode, Json<Clip>), AppError> {
    let service = ClipService::new(state.store.clone());
    let clip = service
        .create_clip(ClipDraft {
            title: payload.title,
            url: payload.url,
            is_opened: payload.is_opened,
            user_id: payload.user_id,
            trip_id: payload.trip_id,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(clip)))
}

pub async fn get_clip(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Clip>, AppError> {
    let service = ClipService::new(state.store.clone());
    Ok(Json(service.get_clip(id).await?))
}

pub async fn clips_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<Clip>>, AppError> {
    let service = ClipService::new(state.store.clone());
    Ok(Json(service.clips_by_user(user_id).await?))
}

// ---------------------------------------------------------------------------
// Users and follows
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct RegisterUserRequest {
    pub name: String,
    pub nickname: String,
    pub email: String,
    pub profile_url: Option<String>,
}

pub async fn register_user(
    State(state): State<AppState>,
    Json(payload): Json<RegisterUserRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let service = UserService::new(state.store.clone());
    let user = service
        .register(UserDraft {
            name: payload.name,
            nickname: payload.nickname,
            email: payload.email,
            profile_url: payload.profile_url,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<User>, AppError> {
    let service = UserService::new(state.store.clone());
    Ok(Json(service.get_user(id).await?))
}

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub nickname: Option<String>,
    pub profile_url: Option<String>,
}

pub async fn update_profile(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<User>, AppError> {
    let service = UserService::new(state.store.clone());
    let user = service
        .update_profile(
            id,
            ProfileUpdate {
                name: payload.name,
                nickname: payload.nickname,
                profile_url: payload.profile_url,
            },
        )
        .await?;
    Ok(Json(user))
}

#[derive(Deserialize)]
pub struct FollowRequest {
    pub follower_id: i64,
}

pub async fn follow_user(
    State(state): State<AppState>,
    Path(followee_id): Path<i64>,
    Json(payload): Json<FollowRequest>,
) -> Result<StatusCode, AppError> {
    let service = SocialService::new(state.store.clone());
    service.follow(payload.follower_id, followee_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct UnfollowQuery {
    pub follower_id: i64,
}

pub async fn unfollow_user(
    State(state): State<AppState>,
    Path(followee_id): Path<i64>,
    Query(query): Query<UnfollowQuery>,
) -> Result<StatusCode, AppError> {
    let service = SocialService::new(state.store.clone());
    service.unfollow(query.follower_id, followee_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_followers(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<i64>>, AppError> {
    let service = SocialService::new(state.store.clone());
    Ok(Json(service.followers(user_id).await?))
}

pub async fn list_following(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<i64>>, AppError> {
    let service = SocialService::new(state.store.clone());
    Ok(Json(service.following(user_id).await?))
}

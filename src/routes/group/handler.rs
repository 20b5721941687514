use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    AppState,
    common::Json,
    error::AppError,
    routes::auth::model::User,
    utils::{message_to_api_response, success_to_api_response},
};

use super::model::{
    CreateGroupRequest, CreatePostRequest, Group, GroupMemberRequest, Post, SelfJoinRequest,
    UpdateGroupRequest, UpdatePostRequest,
};
use super::policy;

#[axum::debug_handler]
pub async fn create_group(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(req): Json<CreateGroupRequest>,
) -> Result<impl IntoResponse, AppError> {
    // 创建者取自令牌而非请求体
    let group = Group::create(&state.pool, req, &user.id).await?;

    tracing::info!("User {} created group {}", user.id, group.id);
    Ok((StatusCode::CREATED, success_to_api_response(group)))
}

#[axum::debug_handler]
pub async fn update_group(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(req): Json<UpdateGroupRequest>,
) -> Result<impl IntoResponse, AppError> {
    let group = Group::find_by_id(&state.pool, &req.group_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Group not found".to_string()))?;

    let admin_ids = Group::admin_ids(&state.pool, &group.id).await?;
    if !policy::can_modify_group(&user, &group, &admin_ids) {
        return Err(AppError::Forbidden(
            "Unauthorized to update group".to_string(),
        ));
    }

    let updated = Group::update(&state.pool, &req).await?;
    Ok((StatusCode::OK, success_to_api_response(updated)))
}

#[axum::debug_handler]
pub async fn delete_group(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(group_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let group = Group::find_by_id(&state.pool, &group_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Group not found".to_string()))?;

    if !policy::can_delete_group(&user, &group) {
        return Err(AppError::Forbidden(
            "Unauthorized to delete this group".to_string(),
        ));
    }

    Group::delete(&state.pool, &group_id).await?;

    tracing::info!("User {} deleted group {}", user.id, group_id);
    Ok((
        StatusCode::OK,
        message_to_api_response("Group deleted successfully"),
    ))
}

#[axum::debug_handler]
pub async fn add_member(
    State(state): State<AppState>,
    Extension(requester): Extension<User>,
    Json(req): Json<GroupMemberRequest>,
) -> Result<impl IntoResponse, AppError> {
    let group = Group::find_by_id(&state.pool, &req.group_id).await?;
    let target = User::find_by_id(&state.pool, &req.user_id).await?;

    let (Some(group), Some(target)) = (group, target) else {
        return Err(AppError::NotFound("Group or user not found".to_string()));
    };

    let admin_ids = Group::admin_ids(&state.pool, &group.id).await?;
    if !policy::can_manage_members(&requester, &group, &admin_ids) {
        return Err(AppError::Forbidden("Unauthorized".to_string()));
    }

    Group::add_member(&state.pool, &group.id, &target.id).await?;
    Ok((
        StatusCode::CREATED,
        message_to_api_response("Member added successfully"),
    ))
}

#[axum::debug_handler]
pub async fn make_admin(
    State(state): State<AppState>,
    Extension(requester): Extension<User>,
    Json(req): Json<GroupMemberRequest>,
) -> Result<impl IntoResponse, AppError> {
    let group = Group::find_by_id(&state.pool, &req.group_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Group not found".to_string()))?;
    let target = User::find_by_id(&state.pool, &req.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let admin_ids = Group::admin_ids(&state.pool, &group.id).await?;
    if !policy::can_manage_members(&requester, &group, &admin_ids) {
        return Err(AppError::Forbidden(
            "Unauthorized to make this user an admin".to_string(),
        ));
    }

    Group::make_admin(&state.pool, &group.id, &target.id).await?;
    Ok((
        StatusCode::CREATED,
        message_to_api_response("Admin added successfully"),
    ))
}

#[axum::debug_handler]
pub async fn remove_admin(
    State(state): State<AppState>,
    Extension(_requester): Extension<User>,
    Json(req): Json<GroupMemberRequest>,
) -> Result<impl IntoResponse, AppError> {
    Group::find_by_id(&state.pool, &req.group_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Group not found".to_string()))?;

    Group::remove_admin(&state.pool, &req.group_id, &req.user_id).await?;
    Ok((
        StatusCode::OK,
        message_to_api_response("Admin removed successfully"),
    ))
}

#[axum::debug_handler]
pub async fn self_add_member(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(req): Json<SelfJoinRequest>,
) -> Result<impl IntoResponse, AppError> {
    let group = Group::find_by_id(&state.pool, &req.group_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Group not found".to_string()))?;

    let admin_ids = Group::admin_ids(&state.pool, &group.id).await?;
    let member_ids = Group::member_ids(&state.pool, &group.id).await?;

    let decision = policy::can_self_join(&user, &group, &admin_ids, &member_ids);
    if !decision.allowed {
        tracing::debug!(
            "Self-join denied for {} on {}: {}",
            user.id,
            group.id,
            decision.reason
        );
        return Err(AppError::Forbidden(
            "You are not eligible to join this group".to_string(),
        ));
    }

    Group::self_join(&state.pool, &group.id, &user.id).await?;
    Ok((
        StatusCode::OK,
        message_to_api_response("Successfully added to the group"),
    ))
}

#[axum::debug_handler]
pub async fn create_group_post(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(req): Json<CreatePostRequest>,
) -> Result<impl IntoResponse, AppError> {
    let group = Group::find_by_id(&state.pool, &req.group_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Group not found".to_string()))?;

    let is_member = Group::is_member(&state.pool, &group.id, &user.id).await?;
    if !policy::can_post(&user, &group, is_member) {
        return Err(AppError::Forbidden(
            "Not authorized to post in this group".to_string(),
        ));
    }

    let post = Post::create(&state.pool, req, &user.id).await?;
    Ok((StatusCode::CREATED, success_to_api_response(post)))
}

#[axum::debug_handler]
pub async fn edit_group_post(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(post_id): Path<String>,
    Json(req): Json<UpdatePostRequest>,
) -> Result<impl IntoResponse, AppError> {
    let post = Post::find_by_id(&state.pool, &post_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    if !policy::can_modify_post(&user, &post) {
        return Err(AppError::Forbidden(
            "Not authorized to edit this post".to_string(),
        ));
    }

    let updated = Post::update(&state.pool, &post_id, &req).await?;
    Ok((StatusCode::OK, success_to_api_response(updated)))
}

#[axum::debug_handler]
pub async fn delete_group_post(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(post_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let post = Post::find_by_id(&state.pool, &post_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    if !policy::can_modify_post(&user, &post) {
        return Err(AppError::Forbidden(
            "Not authorized to delete this post".to_string(),
        ));
    }

    Post::delete(&state.pool, &post_id).await?;
    Ok((
        StatusCode::OK,
        message_to_api_response("Post deleted successfully"),
    ))
}

#[axum::debug_handler]
pub async fn get_all_groups(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let groups = Group::list(&state.pool).await?;
    Ok((StatusCode::OK, success_to_api_response(groups)))
}

#[axum::debug_handler]
pub async fn get_group_by_id(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let detail = Group::detail(&state.pool, &group_id).await?;
    Ok((StatusCode::OK, success_to_api_response(detail)))
}

#[axum::debug_handler]
pub async fn get_group_members(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Group::find_by_id(&state.pool, &group_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Group not found".to_string()))?;

    let members = Group::members(&state.pool, &group_id).await?;
    Ok((StatusCode::OK, success_to_api_response(members)))
}

#[axum::debug_handler]
pub async fn get_my_groups(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<impl IntoResponse, AppError> {
    let groups = Group::my_groups(&state.pool, &user.id).await?;
    Ok((StatusCode::OK, success_to_api_response(groups)))
}

#[axum::debug_handler]
pub async fn get_all_posts(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let posts = Post::all(&state.pool).await?;
    Ok((StatusCode::OK, success_to_api_response(posts)))
}

#[axum::debug_handler]
pub async fn get_post_by_id(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let post = Post::find_with_author(&state.pool, &post_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    Ok((StatusCode::OK, success_to_api_response(post)))
}

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::AppError;
use crate::routes::auth::model::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "group_category", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GroupCategory {
    Academic,
    Technical,
    Cultural,
    Sports,
    Social,
    Other,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub category: GroupCategory,
    pub is_public: bool,
    pub tags: Vec<String>,
    pub image_url: Option<String>,
    pub year: Option<i32>,
    pub branch: Option<String>,
    pub section: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, FromRow)]
pub struct GroupWithStats {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub group: Group,
    pub member_count: i64,
    pub post_count: i64,
}

#[derive(Debug, Serialize)]
pub struct GroupDetail {
    #[serde(flatten)]
    pub group: Group,
    pub members: Vec<User>,
    pub admin_ids: Vec<String>,
    pub posts: Vec<PostWithAuthor>,
    pub total_members: usize,
    pub total_posts: usize,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Post {
    pub id: String,
    pub group_id: String,
    pub author_id: String,
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub media_url: Option<String>,
    pub secondary_desc: Option<String>,
    pub secondary_img: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, FromRow)]
pub struct PostWithAuthor {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub post: Post,
    pub author_name: Option<String>,
    pub author_email: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateGroupRequest {
    pub name: String,
    pub description: Option<String>,
    pub category: GroupCategory,
    pub is_public: Option<bool>,
    pub tags: Option<Vec<String>>,
    pub image_url: Option<String>,
    pub year: Option<i32>,
    pub branch: Option<String>,
    pub section: Option<String>,
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default)]
    pub admins: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateGroupRequest {
    pub group_id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<GroupCategory>,
    pub is_public: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct GroupMemberRequest {
    pub group_id: String,
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
pub struct SelfJoinRequest {
    pub group_id: String,
}

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub group_id: String,
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub media_url: Option<String>,
    pub secondary_desc: Option<String>,
    pub secondary_img: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub media_url: Option<String>,
    pub secondary_desc: Option<String>,
    pub secondary_img: Option<String>,
}

const GROUP_COLUMNS: &str = "id, name, description, category, is_public, tags, image_url, year, branch, section, created_by, created_at, updated_at";

const POST_COLUMNS: &str = "id, group_id, author_id, title, description, content, media_url, secondary_desc, secondary_img, created_at, updated_at";

/// 建群时的成员/管理员去重集合：创建者总是成员，也总是管理员
pub(crate) fn seed_sets(
    creator_id: &str,
    members: &[String],
    admins: &[String],
) -> (BTreeSet<String>, BTreeSet<String>) {
    let mut member_set: BTreeSet<String> = members.iter().cloned().collect();
    member_set.extend(admins.iter().cloned());
    member_set.insert(creator_id.to_string());

    let mut admin_set: BTreeSet<String> = admins.iter().cloned().collect();
    admin_set.insert(creator_id.to_string());

    (member_set, admin_set)
}

impl Group {
    /// 建群与成员/管理员播种在同一事务内完成，不允许部分成功
    pub async fn create(
        pool: &PgPool,
        req: CreateGroupRequest,
        creator_id: &str,
    ) -> Result<Self, AppError> {
        let mut tx = pool.begin().await?;

        let group = sqlx::query_as::<_, Group>(&format!(
            r#"
            INSERT INTO groups (id, name, description, category, is_public, tags, image_url, year, branch, section, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {GROUP_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4().to_string())
        .bind(&req.name)
        .bind(&req.description)
        .bind(req.category)
        .bind(req.is_public.unwrap_or(false))
        .bind(req.tags.clone().unwrap_or_default())
        .bind(&req.image_url)
        .bind(req.year)
        .bind(&req.branch)
        .bind(&req.section)
        .bind(creator_id)
        .fetch_one(&mut *tx)
        .await?;

        let (member_set, admin_set) = seed_sets(creator_id, &req.members, &req.admins);

        for user_id in &member_set {
            sqlx::query(
                "INSERT INTO group_members (group_id, user_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(&group.id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        }

        for user_id in &admin_set {
            sqlx::query(
                "INSERT INTO group_admins (group_id, user_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(&group.id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(group)
    }

    pub async fn find_by_id(pool: &PgPool, group_id: &str) -> Result<Option<Self>, AppError> {
        let group = sqlx::query_as::<_, Group>(&format!(
            "SELECT {GROUP_COLUMNS} FROM groups WHERE id = $1"
        ))
        .bind(group_id)
        .fetch_optional(pool)
        .await?;

        Ok(group)
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<GroupWithStats>, AppError> {
        let groups = sqlx::query_as::<_, GroupWithStats>(&format!(
            r#"
            SELECT {GROUP_COLUMNS},
                (SELECT COUNT(*) FROM group_members m WHERE m.group_id = groups.id) AS member_count,
                (SELECT COUNT(*) FROM posts p WHERE p.group_id = groups.id) AS post_count
            FROM groups
            ORDER BY created_at DESC
            "#
        ))
        .fetch_all(pool)
        .await?;

        Ok(groups)
    }

    pub async fn detail(pool: &PgPool, group_id: &str) -> Result<GroupDetail, AppError> {
        let group = Self::find_by_id(pool, group_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Group not found".to_string()))?;

        let members = Self::members(pool, group_id).await?;
        let admin_ids = Self::admin_ids(pool, group_id).await?;
        let posts = Post::for_group(pool, group_id).await?;

        Ok(GroupDetail {
            total_members: members.len(),
            total_posts: posts.len(),
            group,
            members,
            admin_ids,
            posts,
        })
    }

    pub async fn my_groups(pool: &PgPool, user_id: &str) -> Result<Vec<Self>, AppError> {
        let groups = sqlx::query_as::<_, Group>(&format!(
            r#"
            SELECT {GROUP_COLUMNS} FROM groups
            WHERE id IN (SELECT group_id FROM group_members WHERE user_id = $1)
            ORDER BY created_at DESC
            "#
        ))
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(groups)
    }

    pub async fn update(pool: &PgPool, req: &UpdateGroupRequest) -> Result<Self, AppError> {
        if req.name.is_none()
            && req.description.is_none()
            && req.category.is_none()
            && req.is_public.is_none()
        {
            return Err(AppError::BadRequest("No valid fields to update".to_string()));
        }

        let group = sqlx::query_as::<_, Group>(&format!(
            r#"
            UPDATE groups
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                category = COALESCE($4, category),
                is_public = COALESCE($5, is_public),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {GROUP_COLUMNS}
            "#
        ))
        .bind(&req.group_id)
        .bind(&req.name)
        .bind(&req.description)
        .bind(req.category)
        .bind(req.is_public)
        .fetch_one(pool)
        .await?;

        Ok(group)
    }

    /// 级联删除成员、管理员授权与帖子，最后删群，单事务
    pub async fn delete(pool: &PgPool, group_id: &str) -> Result<(), AppError> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM group_members WHERE group_id = $1")
            .bind(group_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM group_admins WHERE group_id = $1")
            .bind(group_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM posts WHERE group_id = $1")
            .bind(group_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM groups WHERE id = $1")
            .bind(group_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    pub async fn members(pool: &PgPool, group_id: &str) -> Result<Vec<User>, AppError> {
        let members = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.email, u.name, u.password_hash, u.role, u.user_type,
                   u.year, u.branch, u.section, u.otp, u.otp_expiry, u.created_at
            FROM users u
            JOIN group_members m ON m.user_id = u.id
            WHERE m.group_id = $1
            ORDER BY m.joined_at
            "#,
        )
        .bind(group_id)
        .fetch_all(pool)
        .await?;

        Ok(members)
    }

    pub async fn admin_ids(pool: &PgPool, group_id: &str) -> Result<Vec<String>, AppError> {
        let ids =
            sqlx::query_scalar::<_, String>("SELECT user_id FROM group_admins WHERE group_id = $1")
                .bind(group_id)
                .fetch_all(pool)
                .await?;

        Ok(ids)
    }

    pub async fn member_ids(pool: &PgPool, group_id: &str) -> Result<Vec<String>, AppError> {
        let ids = sqlx::query_scalar::<_, String>(
            "SELECT user_id FROM group_members WHERE group_id = $1",
        )
        .bind(group_id)
        .fetch_all(pool)
        .await?;

        Ok(ids)
    }

    pub async fn is_member(pool: &PgPool, group_id: &str, user_id: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM group_members WHERE group_id = $1 AND user_id = $2)",
        )
        .bind(group_id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }

    /// 成员唯一性由复合主键保证；并发插入同一 (group, user) 恰好一个成功
    pub async fn add_member(pool: &PgPool, group_id: &str, user_id: &str) -> Result<(), AppError> {
        let result = sqlx::query(
            "INSERT INTO group_members (group_id, user_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(group_id)
        .bind(user_id)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::Conflict("User already in group".to_string()));
        }

        Ok(())
    }

    /// 自助加入：资格判定已在调用方完成，重复加入静默成功
    pub async fn self_join(pool: &PgPool, group_id: &str, user_id: &str) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO group_members (group_id, user_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(group_id)
        .bind(user_id)
        .execute(pool)
        .await?;

        Ok(())
    }

    pub async fn make_admin(pool: &PgPool, group_id: &str, user_id: &str) -> Result<(), AppError> {
        let mut tx = pool.begin().await?;

        let is_member = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM group_members WHERE group_id = $1 AND user_id = $2)",
        )
        .bind(group_id)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        if !is_member {
            return Err(AppError::BadRequest(
                "User is not a group member".to_string(),
            ));
        }

        let result = sqlx::query(
            "INSERT INTO group_admins (group_id, user_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(group_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::Conflict("User is already an admin".to_string()));
        }

        tx.commit().await?;

        Ok(())
    }

    /// 删除管理员授权；先锁住该群全部管理员行，把并发删除串行化，
    /// 群里因此永远至少保留一名管理员
    pub async fn remove_admin(pool: &PgPool, group_id: &str, user_id: &str) -> Result<(), AppError> {
        let mut tx = pool.begin().await?;

        // ORDER BY 固定加锁顺序，避免并发事务互相死锁
        let admins = sqlx::query_scalar::<_, String>(
            "SELECT user_id FROM group_admins WHERE group_id = $1 ORDER BY user_id FOR UPDATE",
        )
        .bind(group_id)
        .fetch_all(&mut *tx)
        .await?;

        if !admins.iter().any(|id| id == user_id) {
            return Err(AppError::NotFound(
                "User is not an admin of this group".to_string(),
            ));
        }
        if admins.len() == 1 {
            return Err(AppError::BadRequest(
                "Group must have at least one admin".to_string(),
            ));
        }

        sqlx::query("DELETE FROM group_admins WHERE group_id = $1 AND user_id = $2")
            .bind(group_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }
}

impl Post {
    pub async fn create(
        pool: &PgPool,
        req: CreatePostRequest,
        author_id: &str,
    ) -> Result<Self, AppError> {
        let post = sqlx::query_as::<_, Post>(&format!(
            r#"
            INSERT INTO posts (id, group_id, author_id, title, description, content, media_url, secondary_desc, secondary_img)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4().to_string())
        .bind(&req.group_id)
        .bind(author_id)
        .bind(&req.title)
        .bind(&req.description)
        .bind(&req.content)
        .bind(&req.media_url)
        .bind(&req.secondary_desc)
        .bind(&req.secondary_img)
        .fetch_one(pool)
        .await?;

        Ok(post)
    }

    pub async fn find_by_id(pool: &PgPool, post_id: &str) -> Result<Option<Self>, AppError> {
        let post = sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = $1"
        ))
        .bind(post_id)
        .fetch_optional(pool)
        .await?;

        Ok(post)
    }

    pub async fn find_with_author(
        pool: &PgPool,
        post_id: &str,
    ) -> Result<Option<PostWithAuthor>, AppError> {
        let post = sqlx::query_as::<_, PostWithAuthor>(
            r#"
            SELECT p.id, p.group_id, p.author_id, p.title, p.description, p.content,
                   p.media_url, p.secondary_desc, p.secondary_img, p.created_at, p.updated_at,
                   u.name AS author_name, u.email AS author_email
            FROM posts p
            JOIN users u ON u.id = p.author_id
            WHERE p.id = $1
            "#,
        )
        .bind(post_id)
        .fetch_optional(pool)
        .await?;

        Ok(post)
    }

    pub async fn update(
        pool: &PgPool,
        post_id: &str,
        req: &UpdatePostRequest,
    ) -> Result<Self, AppError> {
        let post = sqlx::query_as::<_, Post>(&format!(
            r#"
            UPDATE posts
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                content = COALESCE($4, content),
                media_url = COALESCE($5, media_url),
                secondary_desc = COALESCE($6, secondary_desc),
                secondary_img = COALESCE($7, secondary_img),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(post_id)
        .bind(&req.title)
        .bind(&req.description)
        .bind(&req.content)
        .bind(&req.media_url)
        .bind(&req.secondary_desc)
        .bind(&req.secondary_img)
        .fetch_one(pool)
        .await?;

        Ok(post)
    }

    pub async fn delete(pool: &PgPool, post_id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(post_id)
            .execute(pool)
            .await?;

        Ok(())
    }

    pub async fn for_group(pool: &PgPool, group_id: &str) -> Result<Vec<PostWithAuthor>, AppError> {
        let posts = sqlx::query_as::<_, PostWithAuthor>(
            r#"
            SELECT p.id, p.group_id, p.author_id, p.title, p.description, p.content,
                   p.media_url, p.secondary_desc, p.secondary_img, p.created_at, p.updated_at,
                   u.name AS author_name, u.email AS author_email
            FROM posts p
            JOIN users u ON u.id = p.author_id
            WHERE p.group_id = $1
            ORDER BY p.created_at DESC
            "#,
        )
        .bind(group_id)
        .fetch_all(pool)
        .await?;

        Ok(posts)
    }

    /// 首页信息流：全量帖子按时间倒序
    pub async fn all(pool: &PgPool) -> Result<Vec<PostWithAuthor>, AppError> {
        let posts = sqlx::query_as::<_, PostWithAuthor>(
            r#"
            SELECT p.id, p.group_id, p.author_id, p.title, p.description, p.content,
                   p.media_url, p.secondary_desc, p.secondary_img, p.created_at, p.updated_at,
                   u.name AS author_name, u.email AS author_email
            FROM posts p
            JOIN users u ON u.id = p.author_id
            ORDER BY p.created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(posts)
    }
}

#[cfg(test)]
pub(crate) fn test_group(id: &str, creator_id: &str) -> Group {
    Group {
        id: id.to_string(),
        name: format!("group {id}"),
        description: None,
        category: GroupCategory::Other,
        is_public: false,
        tags: Vec::new(),
        image_url: None,
        year: None,
        branch: None,
        section: None,
        created_by: creator_id.to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[cfg(test)]
pub(crate) fn test_post(id: &str, group_id: &str, author_id: &str) -> Post {
    Post {
        id: id.to_string(),
        group_id: group_id.to_string(),
        author_id: author_id.to_string(),
        title: "title".to_string(),
        description: None,
        content: None,
        media_url: None,
        secondary_desc: None,
        secondary_img: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::auth::model::{RegisterRequest, User};

    fn owned(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    async fn seed_user(pool: &PgPool, email: &str) -> User {
        User::create(
            pool,
            RegisterRequest {
                email: email.to_string(),
                password: "secret123".to_string(),
                role: None,
                user_type: None,
                name: None,
                year: None,
                branch: None,
                section: None,
            },
            "123456",
            Utc::now() + chrono::Duration::minutes(10),
        )
        .await
        .unwrap()
    }

    fn group_request(members: &[&str], admins: &[&str]) -> CreateGroupRequest {
        CreateGroupRequest {
            name: "chess club".to_string(),
            description: None,
            category: GroupCategory::Other,
            is_public: Some(false),
            tags: None,
            image_url: None,
            year: None,
            branch: None,
            section: None,
            members: owned(members),
            admins: owned(admins),
        }
    }

    #[sqlx::test]
    async fn duplicate_membership_insert_maps_to_conflict(pool: PgPool) {
        let creator = seed_user(&pool, "creator@campus.local").await;
        let other = seed_user(&pool, "other@campus.local").await;
        let group = Group::create(&pool, group_request(&[], &[]), &creator.id)
            .await
            .unwrap();

        Group::add_member(&pool, &group.id, &other.id)
            .await
            .unwrap();
        let err = Group::add_member(&pool, &group.id, &other.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[sqlx::test]
    async fn sole_admin_cannot_be_removed(pool: PgPool) {
        let creator = seed_user(&pool, "creator@campus.local").await;
        let group = Group::create(&pool, group_request(&[], &[]), &creator.id)
            .await
            .unwrap();

        let err = Group::remove_admin(&pool, &group.id, &creator.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(
            Group::admin_ids(&pool, &group.id).await.unwrap(),
            vec![creator.id]
        );
    }

    #[sqlx::test]
    async fn removing_non_admin_is_not_found(pool: PgPool) {
        let creator = seed_user(&pool, "creator@campus.local").await;
        let member = seed_user(&pool, "member@campus.local").await;
        let group = Group::create(
            &pool,
            group_request(&[member.id.as_str()], &[]),
            &creator.id,
        )
        .await
        .unwrap();

        let err = Group::remove_admin(&pool, &group.id, &member.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[sqlx::test]
    async fn concurrent_removals_keep_at_least_one_admin(pool: PgPool) {
        let creator = seed_user(&pool, "creator@campus.local").await;
        let second = seed_user(&pool, "second@campus.local").await;
        let group = Group::create(
            &pool,
            group_request(&[], &[second.id.as_str()]),
            &creator.id,
        )
        .await
        .unwrap();

        // 两名管理员被同时移除时恰好一个请求成功
        let (first, other) = tokio::join!(
            Group::remove_admin(&pool, &group.id, &creator.id),
            Group::remove_admin(&pool, &group.id, &second.id),
        );
        assert!(first.is_ok() != other.is_ok());
        assert_eq!(Group::admin_ids(&pool, &group.id).await.unwrap().len(), 1);
    }

    #[sqlx::test]
    async fn group_deletion_leaves_no_residual_rows(pool: PgPool) {
        let creator = seed_user(&pool, "creator@campus.local").await;
        let member = seed_user(&pool, "member@campus.local").await;
        let group = Group::create(
            &pool,
            group_request(&[member.id.as_str()], &[]),
            &creator.id,
        )
        .await
        .unwrap();
        Post::create(
            &pool,
            CreatePostRequest {
                group_id: group.id.clone(),
                title: "hello".to_string(),
                description: None,
                content: None,
                media_url: None,
                secondary_desc: None,
                secondary_img: None,
            },
            &creator.id,
        )
        .await
        .unwrap();

        Group::delete(&pool, &group.id).await.unwrap();

        assert!(Group::find_by_id(&pool, &group.id).await.unwrap().is_none());
        assert!(Group::member_ids(&pool, &group.id).await.unwrap().is_empty());
        assert!(Group::admin_ids(&pool, &group.id).await.unwrap().is_empty());
        let posts = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts WHERE group_id = $1")
            .bind(&group.id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(posts, 0);
    }

    #[test]
    fn seeding_unions_creator_into_both_sets() {
        // members=[A,B], admins=[B], creator=C => members {A,B,C}, admins {B,C}
        let (members, admins) = seed_sets("C", &owned(&["A", "B"]), &owned(&["B"]));
        assert_eq!(members, ["A", "B", "C"].map(String::from).into());
        assert_eq!(admins, ["B", "C"].map(String::from).into());
    }

    #[test]
    fn seeding_without_admins_makes_creator_sole_admin() {
        let (members, admins) = seed_sets("C", &owned(&["A"]), &[]);
        assert_eq!(members, ["A", "C"].map(String::from).into());
        assert_eq!(admins, ["C"].map(String::from).into());
    }

    #[test]
    fn seeding_deduplicates_overlapping_lists() {
        let (members, admins) = seed_sets("C", &owned(&["C", "A", "A"]), &owned(&["C"]));
        assert_eq!(members, ["A", "C"].map(String::from).into());
        assert_eq!(admins, ["C"].map(String::from).into());
    }
}

//! 群组资源的授权判定，全部为纯函数，不触达存储层

use super::model::{Group, Post};
use crate::routes::auth::model::{User, UserRole};

/// 判定结果带上原因，方便日志与测试定位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub allowed: bool,
    pub reason: &'static str,
}

impl Decision {
    fn allow(reason: &'static str) -> Self {
        Self {
            allowed: true,
            reason,
        }
    }

    fn deny(reason: &'static str) -> Self {
        Self {
            allowed: false,
            reason,
        }
    }
}

/// 自助加入资格，按顺序短路求值
pub fn can_self_join(
    user: &User,
    group: &Group,
    admin_ids: &[String],
    member_ids: &[String],
) -> Decision {
    if user.role == UserRole::SuperAdmin {
        return Decision::allow("super admin");
    }
    if group.is_public {
        return Decision::allow("public group");
    }
    if group.created_by == user.id {
        return Decision::allow("group creator");
    }
    if admin_ids.iter().any(|id| id == &user.id) {
        return Decision::allow("group admin");
    }
    if member_ids.iter().any(|id| id == &user.id) {
        return Decision::allow("existing member");
    }
    // 学籍匹配：年级+专业一致，且任一方未限定班级或班级一致
    if group.year == user.year
        && group.branch == user.branch
        && (group.section.is_none() || user.section.is_none() || group.section == user.section)
    {
        return Decision::allow("academic cohort match");
    }

    Decision::deny("not eligible for this group")
}

/// 成员与管理员变更：SUPER_ADMIN、群管理员或创建者
pub fn can_manage_members(user: &User, group: &Group, admin_ids: &[String]) -> bool {
    user.role == UserRole::SuperAdmin
        || group.created_by == user.id
        || admin_ids.iter().any(|id| id == &user.id)
}

/// 群组信息修改与成员管理使用同一授权集合
pub fn can_modify_group(user: &User, group: &Group, admin_ids: &[String]) -> bool {
    can_manage_members(user, group, admin_ids)
}

/// 删除群组只允许创建者或 SUPER_ADMIN
pub fn can_delete_group(user: &User, group: &Group) -> bool {
    user.role == UserRole::SuperAdmin || group.created_by == user.id
}

/// 发帖：成员、SUPER_ADMIN，或公开群组内任意已认证用户
pub fn can_post(user: &User, group: &Group, is_member: bool) -> bool {
    is_member || user.role == UserRole::SuperAdmin || group.is_public
}

/// 帖子编辑/删除：作者或 SUPER_ADMIN，无例外
pub fn can_modify_post(user: &User, post: &Post) -> bool {
    post.author_id == user.id || user.role == UserRole::SuperAdmin
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::auth::model::test_user;
    use crate::routes::group::model::test_group;

    fn owned(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn super_admin_can_always_join() {
        let user = test_user("u1", UserRole::SuperAdmin);
        let group = test_group("g1", "creator");
        let d = can_self_join(&user, &group, &[], &[]);
        assert!(d.allowed);
        assert_eq!(d.reason, "super admin");
    }

    #[test]
    fn anyone_can_join_public_group() {
        let user = test_user("u1", UserRole::User);
        let mut group = test_group("g1", "creator");
        group.is_public = true;
        assert!(can_self_join(&user, &group, &[], &[]).allowed);
    }

    #[test]
    fn creator_admin_and_member_can_join() {
        let group = test_group("g1", "creator");

        let creator = test_user("creator", UserRole::User);
        assert!(can_self_join(&creator, &group, &[], &[]).allowed);

        let admin = test_user("a1", UserRole::User);
        assert!(can_self_join(&admin, &group, &owned(&["a1"]), &[]).allowed);

        let member = test_user("m1", UserRole::User);
        assert!(can_self_join(&member, &group, &[], &owned(&["m1"])).allowed);
    }

    #[test]
    fn cohort_match_requires_year_and_branch() {
        let mut user = test_user("u1", UserRole::User);
        user.year = Some(2);
        user.branch = Some("CSE".to_string());

        let mut group = test_group("g1", "creator");
        group.year = Some(2);
        group.branch = Some("CSE".to_string());
        assert!(can_self_join(&user, &group, &[], &[]).allowed);

        group.branch = Some("ECE".to_string());
        assert!(!can_self_join(&user, &group, &[], &[]).allowed);

        group.branch = Some("CSE".to_string());
        group.year = Some(3);
        assert!(!can_self_join(&user, &group, &[], &[]).allowed);
    }

    #[test]
    fn cohort_section_matches_when_unset_on_either_side() {
        let mut user = test_user("u1", UserRole::User);
        user.year = Some(2);
        user.branch = Some("CSE".to_string());
        user.section = Some("A".to_string());

        let mut group = test_group("g1", "creator");
        group.year = Some(2);
        group.branch = Some("CSE".to_string());

        // 群组未限定班级
        group.section = None;
        assert!(can_self_join(&user, &group, &[], &[]).allowed);

        // 班级一致
        group.section = Some("A".to_string());
        assert!(can_self_join(&user, &group, &[], &[]).allowed);

        // 班级不一致
        group.section = Some("B".to_string());
        assert!(!can_self_join(&user, &group, &[], &[]).allowed);

        // 用户未填班级
        user.section = None;
        assert!(can_self_join(&user, &group, &[], &[]).allowed);
    }

    #[test]
    fn outsider_is_denied_with_reason() {
        let user = test_user("u1", UserRole::User);
        let group = test_group("g1", "creator");
        let d = can_self_join(&user, &group, &owned(&["a1"]), &owned(&["m1"]));
        assert!(!d.allowed);
        assert_eq!(d.reason, "not eligible for this group");
    }

    #[test]
    fn member_management_authorizer_set() {
        let group = test_group("g1", "creator");

        assert!(can_manage_members(
            &test_user("root", UserRole::SuperAdmin),
            &group,
            &[]
        ));
        assert!(can_manage_members(
            &test_user("creator", UserRole::User),
            &group,
            &[]
        ));
        assert!(can_manage_members(
            &test_user("a1", UserRole::User),
            &group,
            &owned(&["a1"])
        ));
        assert!(!can_manage_members(
            &test_user("u1", UserRole::User),
            &group,
            &owned(&["a1"])
        ));
        // 全局 ADMIN 角色不授予群内权限
        assert!(!can_manage_members(
            &test_user("u2", UserRole::Admin),
            &group,
            &[]
        ));
    }

    #[test]
    fn only_creator_or_super_admin_deletes() {
        let group = test_group("g1", "creator");
        assert!(can_delete_group(&test_user("creator", UserRole::User), &group));
        assert!(can_delete_group(&test_user("x", UserRole::SuperAdmin), &group));
        assert!(!can_delete_group(&test_user("a1", UserRole::Admin), &group));
    }

    #[test]
    fn posting_rules() {
        let mut group = test_group("g1", "creator");

        let member = test_user("m1", UserRole::User);
        assert!(can_post(&member, &group, true));

        let outsider = test_user("u1", UserRole::User);
        assert!(!can_post(&outsider, &group, false));

        assert!(can_post(&test_user("root", UserRole::SuperAdmin), &group, false));

        group.is_public = true;
        assert!(can_post(&outsider, &group, false));
    }

    #[test]
    fn post_modification_requires_author_or_super_admin() {
        let post = crate::routes::group::model::test_post("p1", "g1", "author");

        assert!(can_modify_post(&test_user("author", UserRole::User), &post));
        assert!(can_modify_post(&test_user("root", UserRole::SuperAdmin), &post));
        assert!(!can_modify_post(&test_user("other", UserRole::User), &post));
        assert!(!can_modify_post(&test_user("other", UserRole::Admin), &post));
    }
}

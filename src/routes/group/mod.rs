mod handler;
pub mod model;
pub mod policy;

pub use handler::{
    add_member,
    create_group,
    create_group_post,
    delete_group,
    delete_group_post,
    edit_group_post,
    get_all_groups,
    get_all_posts,
    get_group_by_id,
    get_group_members,
    get_my_groups,
    get_post_by_id,
    make_admin,
    remove_admin,
    self_add_member,
    update_group,
};

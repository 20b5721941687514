use std::net::{IpAddr, SocketAddr};

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use backend::{
    AppState,
    config::Config,
    middleware::{auth_middleware, log_errors, require_admin, require_super_admin},
    routes,
};
use sqlx::Executor;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 加载配置
    let config = Config::from_env().expect("Failed to load configuration");

    #[cfg(debug_assertions)]
    tracing::info!("Running in debug mode with CORS enabled");

    #[cfg(not(debug_assertions))]
    tracing::info!("Running in production mode with CORS disabled");

    // 设置数据库连接池；statement_timeout 限定事务内语句最长等待 10 秒
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                conn.execute(
                    "SET application_name = 'campus_backend'; SET statement_timeout = '10s';",
                )
                .await?;
                Ok(())
            })
        })
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to Postgres");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    // 共享 HTTP 客户端：媒体上传与邮件转发
    let http = reqwest::Client::new();

    let state = AppState {
        pool,
        config: config.clone(),
        http,
    };

    // 无需认证的路由
    let public_routes = Router::new()
        .route("/api/auth/register", post(routes::auth::register))
        .route("/api/auth/verifyOtp", post(routes::auth::verify_otp))
        .route("/api/auth/login", post(routes::auth::login))
        .route("/api/group/groups", get(routes::group::get_all_groups))
        .route("/api/group/{group_id}", get(routes::group::get_group_by_id))
        .route(
            "/api/group/getMembers/{group_id}",
            get(routes::group::get_group_members),
        )
        .route("/upload", post(routes::upload::upload))
        .route("/upload-image", post(routes::upload::upload_image));

    // 全局角色门控的子路由
    let admin_probe = Router::new()
        .route("/api/auth/admin", get(routes::auth::admin_access))
        .route_layer(axum::middleware::from_fn(require_admin));

    let event_admin_routes = Router::new()
        .route("/api/event/events", post(routes::event::create_event))
        .route(
            "/api/event/events/{event_id}",
            put(routes::event::update_event).delete(routes::event::delete_event),
        )
        .route_layer(axum::middleware::from_fn(require_super_admin));

    // 需要认证的路由
    let protected_routes = Router::new()
        .route("/api/auth/profile", get(routes::auth::get_profile))
        // 群组路由
        .route("/api/group/create", post(routes::group::create_group))
        .route("/api/group/update", put(routes::group::update_group))
        .route("/api/group/{group_id}", delete(routes::group::delete_group))
        .route("/api/group/addMember", post(routes::group::add_member))
        .route("/api/group/addAdmin", post(routes::group::make_admin))
        .route("/api/group/removeAdmin", post(routes::group::remove_admin))
        .route(
            "/api/group/selfAddMember",
            post(routes::group::self_add_member),
        )
        .route("/api/group/me", get(routes::group::get_my_groups))
        // 帖子路由
        .route("/api/group/post", post(routes::group::create_group_post))
        .route("/api/group/posts/all", get(routes::group::get_all_posts))
        .route(
            "/api/group/posts/{post_id}",
            get(routes::group::get_post_by_id)
                .put(routes::group::edit_group_post)
                .delete(routes::group::delete_group_post),
        )
        // 活动路由
        .route("/api/event/events", get(routes::event::get_events))
        .merge(admin_probe)
        .merge(event_admin_routes)
        // 应用认证中间件
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let router = Router::new().merge(public_routes).merge(protected_routes);

    // 添加日志中间件
    let router = router.layer(axum::middleware::from_fn(log_errors));

    // 根据编译模式决定是否添加CORS
    #[cfg(debug_assertions)]
    let router = {
        tracing::debug!("Adding CORS layer for development mode");
        router.layer(CorsLayer::permissive())
    };

    let app = router.with_state(state.clone());

    // 启动服务器
    let addr = SocketAddr::new(
        state.config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        state.config.server_port,
    );
    tracing::info!("Server listening on {}", addr);
    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        app,
    )
    .await
    .expect("Failed to start server");
}

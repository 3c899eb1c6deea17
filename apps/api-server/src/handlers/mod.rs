//! HTTP handlers and route configuration.

mod admin;
mod dashboard;
mod health;
mod profile;
mod session;
mod views;

#[cfg(test)]
mod tests;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Signed-in routes
            .route("/session", web::get().to(session::current_session))
            .service(
                web::resource("/profile")
                    .route(web::get().to(profile::my_profile))
                    .route(web::put().to(profile::update_my_profile)),
            )
            .route("/profiles/{id}", web::get().to(profile::get_profile))
            .route("/users/{id}/posts", web::get().to(profile::user_posts))
            .service(
                web::scope("/posts")
                    .route("/categories", web::get().to(dashboard::categories))
                    .service(
                        web::resource("")
                            .route(web::get().to(dashboard::list_posts))
                            .route(web::post().to(dashboard::create_post)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(dashboard::get_post))
                            .route(web::put().to(dashboard::update_post))
                            .route(web::delete().to(dashboard::delete_post)),
                    ),
            )
            // Admin routes
            .service(
                web::scope("/admin")
                    .route("/profiles", web::get().to(admin::list_profiles))
                    .route("/profiles/{id}/role", web::put().to(admin::update_role)),
            ),
    );
}

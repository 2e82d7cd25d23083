pub mod auth;
pub mod health;
pub mod projects;
pub mod tasks;
pub mod users;

use actix_web::web;

/// Wires every handler under the `/api` scope. The caller wraps that scope
/// with `AuthMiddleware`; the auth routes it exempts are listed in
/// `auth::middleware::PUBLIC_PATHS`.
pub fn config(cfg: &mut web::ServiceConfig) {
    // The nested task routes must be registered before the /projects scope:
    // a scope that matches the prefix does not fall through to later services.
    cfg.service(tasks::create_task)
        .service(tasks::list_tasks)
        .service(tasks::get_task)
        .service(tasks::update_task)
        .service(tasks::delete_task)
        .service(
            web::scope("/auth")
                .service(auth::signup)
                .service(auth::login)
                .service(auth::forgot_password)
                .service(auth::reset_password)
                .service(auth::change_password),
        )
        .service(
            web::scope("/projects")
                .service(projects::list_projects)
                .service(projects::create_project)
                .service(projects::get_project)
                .service(projects::update_project)
                .service(projects::delete_project),
        )
        .service(
            web::scope("/users")
                .service(users::me)
                .service(users::list_users),
        );
}

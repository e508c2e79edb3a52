use actix_web::web;

pub mod users;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .route("", web::get().to(users::list))
            .route("", web::post().to(users::create))
            .route("/{id}", web::get().to(users::get))
            .route("/{id}", web::put().to(users::update))
            .route("/{id}", web::delete().to(users::delete)),
    );
}

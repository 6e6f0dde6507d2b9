use actix_web::web;

use crate::handlers::{experiences, json_error::method_not_allowed};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/experiences")
            .service(
                web::resource("")
                    .route(web::get().to(experiences::list_experiences))
                    .route(web::post().to(experiences::create_experience))
                    .default_service(web::to(method_not_allowed(&["GET", "POST"])))
            )
            .service(
                web::resource("/{experience_id}")
                    .route(web::put().to(experiences::update_experience))
                    .route(web::delete().to(experiences::delete_experience))
                    .default_service(web::to(method_not_allowed(&["PUT", "DELETE"])))
            )
    );
}

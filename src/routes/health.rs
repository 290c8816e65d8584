use actix_web::HttpResponse;

/// Liveness probe for the load balancer.
pub async fn ping() -> HttpResponse {
    HttpResponse::Ok().finish()
}

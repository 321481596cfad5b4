use actix_web::{body::MessageBody, http::StatusCode, test, test::TestRequest, web::ServiceConfig, App, Error};
use epg_common::Secret;

/// The eSewa UAT signing key. Safe to hard-code in tests; it is public knowledge.
pub fn sandbox_secret() -> Secret<String> {
    Secret::new("8gBm/:&EnhH.1/q".to_string())
}

/// Percent-encodes a base64 string for use as a query parameter value. Without this, a literal `+` in the
/// signature would deserialize as a space on the way back in.
pub fn encode_query_value(s: &str) -> String {
    s.replace('%', "%25").replace('+', "%2B").replace('/', "%2F").replace('=', "%3D")
}

pub async fn get_request(path: &str, configure: fn(&mut ServiceConfig)) -> (StatusCode, String) {
    let req = TestRequest::get().uri(path).to_request();
    let service = test::init_service(App::new().configure(configure)).await;
    match test::try_call_service(&service, req).await {
        Ok(res) => {
            let (_, res) = res.into_parts();
            response_parts(res)
        },
        Err(e) => error_parts(e),
    }
}

pub async fn post_json(path: &str, body: serde_json::Value, configure: fn(&mut ServiceConfig)) -> (StatusCode, String) {
    let req = TestRequest::post().uri(path).set_json(&body).to_request();
    let service = test::init_service(App::new().configure(configure)).await;
    match test::try_call_service(&service, req).await {
        Ok(res) => {
            let (_, res) = res.into_parts();
            response_parts(res)
        },
        Err(e) => error_parts(e),
    }
}

fn response_parts(res: actix_web::HttpResponse) -> (StatusCode, String) {
    let status = res.status();
    let body = String::from_utf8_lossy(&res.into_body().try_into_bytes().unwrap()).into_owned();
    (status, body)
}

fn error_parts(e: Error) -> (StatusCode, String) {
    let res = e.error_response();
    let status = res.status();
    let body = String::from_utf8_lossy(&res.into_body().try_into_bytes().unwrap()).into_owned();
    (status, body)
}

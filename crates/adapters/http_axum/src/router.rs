//! Axum router assembly.

use std::path::Path;

use axum::Router;
use axum::routing::get;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use substations_app::ports::SubstationRepository;

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Mounts API routes under `/api` and, when `static_dir` is given, serves
/// that directory for every other path (the browser client).
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<R>(state: AppState<R>, static_dir: Option<&Path>) -> Router
where
    R: SubstationRepository + Send + Sync + 'static,
{
    let mut router = Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes());

    if let Some(dir) = static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use substations_app::services::substation_service::SubstationService;
    use substations_domain::error::RegistryError;
    use substations_domain::id::SubstationId;
    use substations_domain::listing::{ListingPolicy, SubstationFilter};
    use substations_domain::substation::{NewSubstation, Substation};
    use tower::ServiceExt;

    struct StubRepo;
    struct FailingRepo;

    impl SubstationRepository for StubRepo {
        async fn insert(&self, substation: NewSubstation) -> Result<Substation, RegistryError> {
            Ok(substation.with_id(SubstationId::new(1)))
        }
        async fn count(&self, _filter: &SubstationFilter) -> Result<u64, RegistryError> {
            Ok(0)
        }
        async fn page(
            &self,
            _filter: &SubstationFilter,
            _limit: u32,
            _offset: u64,
        ) -> Result<Vec<Substation>, RegistryError> {
            Ok(vec![])
        }
    }

    fn broken() -> RegistryError {
        RegistryError::Storage(Box::new(std::io::Error::other("disk full")))
    }

    impl SubstationRepository for FailingRepo {
        async fn insert(&self, _substation: NewSubstation) -> Result<Substation, RegistryError> {
            Err(broken())
        }
        async fn count(&self, _filter: &SubstationFilter) -> Result<u64, RegistryError> {
            Err(broken())
        }
        async fn page(
            &self,
            _filter: &SubstationFilter,
            _limit: u32,
            _offset: u64,
        ) -> Result<Vec<Substation>, RegistryError> {
            Err(broken())
        }
    }

    fn app<R>(repo: R) -> Router
    where
        R: SubstationRepository + Send + Sync + 'static,
    {
        build(
            AppState::new(SubstationService::new(repo, ListingPolicy::default())),
            None,
        )
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/substations")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    const VALID: &str = r#"{"address":"Main 1","type":"Embedded","apartments_count":"10","power":100,"last_repair_date":"2020-01-01"}"#;

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let response = app(StubRepo).oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_return_created_with_derived_fields() {
        let response = app(StubRepo).oneshot(post_json(VALID)).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = json_body(response).await;
        assert_eq!(body["id"], 1);
        assert_eq!(body["apartments_count"], 10);
        assert_eq!(body["estimated_load"], 50);
    }

    #[tokio::test]
    async fn should_ignore_client_supplied_estimated_load() {
        let body = r#"{"address":"Main 1","type":"Embedded","apartments_count":3,"power":1,"last_repair_date":"2020-01-01","estimated_load":9999}"#;
        let response = app(StubRepo).oneshot(post_json(body)).await.unwrap();
        assert_eq!(json_body(response).await["estimated_load"], 15);
    }

    #[tokio::test]
    async fn should_return_bad_request_with_message_when_validation_fails() {
        let body = r#"{"address":"  ","type":"Embedded"}"#;
        let response = app(StubRepo).oneshot(post_json(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["message"], "Вкажіть адресу.");
    }

    #[tokio::test]
    async fn should_return_bad_request_when_body_is_malformed() {
        let response = app(StubRepo).oneshot(post_json("{not json")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["message"],
            "Некоректний формат запиту."
        );
    }

    async fn rejection_message(body: &str) -> serde_json::Value {
        let response = app(StubRepo).oneshot(post_json(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        json_body(response).await["message"].clone()
    }

    #[tokio::test]
    async fn should_report_address_first_when_other_fields_are_wrongly_typed() {
        let body = r#"{"address":"  ","type":"Embedded","apartments_count":true,"power":100,"last_repair_date":"2020-01-01"}"#;
        assert_eq!(rejection_message(body).await, "Вкажіть адресу.");
    }

    #[tokio::test]
    async fn should_report_apartments_when_count_is_boolean() {
        let body = r#"{"address":"A","type":"Embedded","apartments_count":true,"power":100,"last_repair_date":"2020-01-01"}"#;
        assert_eq!(
            rejection_message(body).await,
            "Кількість квартир має бути додатним числом."
        );
    }

    #[tokio::test]
    async fn should_report_date_when_repair_date_is_numeric() {
        let body = r#"{"address":"A","type":"Embedded","apartments_count":3,"power":100,"last_repair_date":20200101}"#;
        assert_eq!(
            rejection_message(body).await,
            "Вкажіть коректну дату останнього ремонту."
        );
    }

    #[tokio::test]
    async fn should_report_address_when_address_is_numeric() {
        let body = r#"{"address":12,"type":"Embedded","apartments_count":3,"power":100,"last_repair_date":"2020-01-01"}"#;
        assert_eq!(rejection_message(body).await, "Вкажіть адресу.");
    }

    #[tokio::test]
    async fn should_report_type_when_type_is_an_array() {
        let body = r#"{"address":"A","type":["Embedded"],"apartments_count":3,"power":{},"last_repair_date":"2020-01-01"}"#;
        assert_eq!(
            rejection_message(body).await,
            "Оберіть коректний тип підстанції."
        );
    }

    #[tokio::test]
    async fn should_treat_null_fields_as_missing() {
        let body = r#"{"address":"A","type":"Embedded","apartments_count":null,"power":100,"last_repair_date":"2020-01-01"}"#;
        assert_eq!(
            rejection_message(body).await,
            "Кількість квартир має бути додатним числом."
        );
    }

    #[tokio::test]
    async fn should_reject_non_object_body_as_malformed() {
        assert_eq!(rejection_message("[1, 2]").await, "Некоректний формат запиту.");
    }

    #[tokio::test]
    async fn should_return_json_message_when_query_string_is_malformed() {
        let response = app(StubRepo)
            .oneshot(get("/api/substations?page=1&page=2"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["message"],
            "Некоректні параметри запиту."
        );
    }

    #[tokio::test]
    async fn should_return_server_error_when_saving_fails() {
        let response = app(FailingRepo).oneshot(post_json(VALID)).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(response).await["message"],
            "Помилка сервера при збереженні даних."
        );
    }

    #[tokio::test]
    async fn should_return_server_error_when_listing_fails() {
        let response = app(FailingRepo)
            .oneshot(get("/api/substations"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(response).await["message"],
            "Помилка сервера при отриманні даних."
        );
    }

    #[tokio::test]
    async fn should_return_empty_listing_shape() {
        let response = app(StubRepo)
            .oneshot(get("/api/substations?page=abc&search=&type=all"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({ "total": 0, "totalPages": 1, "items": [] })
        );
    }

    #[tokio::test]
    async fn should_reject_unknown_type_filter() {
        let response = app(StubRepo)
            .oneshot(get("/api/substations?type=Underground"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["message"],
            "Некоректний фільтр типу."
        );
    }

    #[tokio::test]
    async fn should_serve_static_files_when_directory_configured() {
        let dir = std::env::temp_dir().join(format!("substations-static-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("index.html"), "<h1>Реєстр підстанцій</h1>").unwrap();

        let router = build(
            AppState::new(SubstationService::new(StubRepo, ListingPolicy::default())),
            Some(&dir),
        );
        let response = router.oneshot(get("/index.html")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(String::from_utf8(bytes.to_vec()).unwrap().contains("Реєстр"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn should_return_not_found_without_static_directory() {
        let response = app(StubRepo).oneshot(get("/index.html")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

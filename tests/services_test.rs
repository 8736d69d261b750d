//! End-to-end tests of the request pipeline and endpoint body shaping,
//! driven through a scripted transport.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde_json::{Value, json};

use ozon_seller::services::v1;
use ozon_seller::services::v2;
use ozon_seller::services::v3;
use ozon_seller::services::{GetOrder, UnfulfilledOrderList};
use ozon_seller::{
    ApiErrorKind, ClientConfig, HttpRequest, HttpResponse, OzonError, Record, Transport,
    TransportError, ValidationError,
};

#[derive(Default)]
struct State {
    requests: Vec<HttpRequest>,
    responses: VecDeque<(u16, String)>,
}

/// Scripted transport: records every request, replays canned responses,
/// answers `200 {}` once the script runs out.
#[derive(Clone, Default)]
struct MockTransport {
    state: Arc<Mutex<State>>,
}

impl MockTransport {
    fn replying(status: u16, body: &str) -> Self {
        let transport = Self::default();
        transport
            .state
            .lock()
            .unwrap()
            .responses
            .push_back((status, body.to_owned()));
        transport
    }

    fn last_request(&self) -> HttpRequest {
        self.state.lock().unwrap().requests.last().expect("a request was sent").clone()
    }

    fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    fn last_body(&self) -> Value {
        serde_json::from_str(self.last_request().body.as_deref().expect("request body"))
            .expect("json body")
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(request);
        let (status, body) =
            state.responses.pop_front().unwrap_or((200, "{}".to_owned()));
        Ok(HttpResponse { status, headers: vec![], body: body.into_bytes() })
    }
}

fn config() -> ClientConfig {
    ClientConfig::new("12345", "secret-key")
}

fn record(value: Value) -> Record {
    value.as_object().unwrap().clone()
}

#[tokio::test]
async fn auth_headers_and_url_on_every_request() {
    let transport = MockTransport::default();
    let warehouses = v1::WarehouseService::new(config(), transport.clone()).unwrap();
    warehouses.list().await.unwrap();

    let request = transport.last_request();
    assert_eq!(request.url, "https://api-seller.ozon.ru/v1/warehouse/list");
    assert_eq!(request.headers[0], ("Client-Id".to_owned(), "12345".to_owned()));
    assert_eq!(request.headers[1], ("Api-Key".to_owned(), "secret-key".to_owned()));
    assert_eq!(
        request.headers[2],
        ("Content-Type".to_owned(), "application/json".to_owned())
    );
    assert!(request.body.is_none());
}

#[tokio::test]
async fn product_list_folds_bare_filter_keys_and_normalizes_ids() {
    let transport = MockTransport::replying(200, r#"{"result":{"items":[]}}"#);
    let products = v1::ProductService::new(config(), transport.clone()).unwrap();

    products
        .list(
            record(json!({"offer_id": [17, "A2"], "product_id": "5"})),
            record(json!({"page_size": 50})),
        )
        .await
        .unwrap();

    let body = transport.last_body();
    assert_eq!(body["filter"]["offer_id"], json!(["17", "A2"]));
    assert_eq!(body["filter"]["product_id"], json!([5]));
    assert_eq!(body["page"], json!(1));
    assert_eq!(body["page_size"], json!(50));
}

#[tokio::test]
async fn product_import_validates_before_any_request() {
    let transport = MockTransport::default();
    let products = v1::ProductService::new(config(), transport.clone()).unwrap();

    let err = products
        .import(json!({"offer_id": "MUG-300"}), true)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        OzonError::Validation(ValidationError::MissingRequired(_))
    ));
    assert_eq!(transport.request_count(), 0, "nothing may reach the wire");
}

#[tokio::test]
async fn product_import_wraps_single_item_and_stringifies_attributes() {
    let transport = MockTransport::replying(200, r#"{"result":{"task_id":9}}"#);
    let products = v1::ProductService::new(config(), transport.clone()).unwrap();

    let item = json!({
        "offer_id": "MUG-300",
        "attributes": [{"id": 5076, "value": 42}],
    });
    let result = products.import(item, false).await.unwrap();

    assert_eq!(result, json!({"task_id": 9}));
    let body = transport.last_body();
    assert_eq!(body["items"][0]["offer_id"], json!("MUG-300"));
    assert_eq!(body["items"][0]["attributes"][0]["value"], json!("42"));
}

#[tokio::test]
async fn import_prices_shapes_and_casts_entries() {
    let transport = MockTransport::default();
    let products = v1::ProductService::new(config(), transport.clone()).unwrap();

    products
        .import_prices(json!({"product_id": "7", "price": 1999, "comment": "drop me"}))
        .await
        .unwrap();

    let body = transport.last_body();
    assert_eq!(body["prices"], json!([{"product_id": 7, "price": "1999"}]));
}

#[tokio::test]
async fn import_prices_rejects_empty_payload() {
    let transport = MockTransport::default();
    let products = v1::ProductService::new(config(), transport.clone()).unwrap();

    let err = products.import_prices(json!({})).await.unwrap_err();
    assert!(matches!(err, OzonError::InvalidArgument(_)));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn actions_service_uses_promotions_host() {
    let transport = MockTransport::replying(200, r#"{"result":[]}"#);
    let actions = v1::ActionsService::new(config(), transport.clone()).unwrap();
    actions.list().await.unwrap();

    let request = transport.last_request();
    assert_eq!(request.url, "https://seller-api.ozon.ru/v1/actions");
    assert_eq!(request.method.as_str(), "GET");
}

#[tokio::test]
async fn chat_send_file_encodes_content() {
    let transport = MockTransport::replying(200, r#"{"result":"success"}"#);
    let chats = v1::ChatService::new(config(), transport.clone()).unwrap();

    let sent = chats.send_file("chat-1", "label.txt", b"label data").await.unwrap();
    assert!(sent);

    let body = transport.last_body();
    assert_eq!(body["base64_content"], json!("bGFiZWwgZGF0YQ=="));
    assert_eq!(body["name"], json!("label.txt"));
}

#[tokio::test]
async fn fbs_v2_list_applies_defaults_and_reduces_filter() {
    let transport = MockTransport::default();
    let postings = v2::posting::FbsService::new(config(), transport.clone()).unwrap();

    postings
        .list(record(json!({
            "filter": {"since": "2021-03-01T00:00:00Z", "irrelevant": true},
            "limit": 25,
        })))
        .await
        .unwrap();

    let body = transport.last_body();
    assert_eq!(body["dir"], json!("asc"));
    assert_eq!(body["offset"], json!(0));
    assert_eq!(body["limit"], json!(25));
    assert_eq!(body["filter"], json!({"since": "2021-03-01T00:00:00Z"}));
}

#[tokio::test]
async fn fbs_v2_unfulfilled_defaults_statuses_and_with_sections() {
    let transport = MockTransport::default();
    let postings = v2::posting::FbsService::new(config(), transport.clone()).unwrap();

    postings
        .unfulfilled_list(record(json!({"status": "delivering"})))
        .await
        .unwrap();

    let body = transport.last_body();
    assert_eq!(body["status"], json!(["delivering"]));
    assert_eq!(body["sort_by"], json!("updated_at"));
    assert_eq!(body["with"], json!({"barcodes": false}));
    assert_eq!(
        transport.last_request().url,
        "https://api-seller.ozon.ru/v2/posting/fbs/unfulfilled/list"
    );
}

#[tokio::test]
async fn fbs_v2_package_label_returns_raw_bytes() {
    let transport = MockTransport::replying(200, "%PDF-1.4 binary-ish");
    let postings = v2::posting::FbsService::new(config(), transport.clone()).unwrap();

    let label = postings.package_label(json!("123-0001-1")).await.unwrap();
    assert_eq!(label, b"%PDF-1.4 binary-ish");

    let body = transport.last_body();
    assert_eq!(body["posting_number"], json!(["123-0001-1"]));
}

#[tokio::test]
async fn fbo_v2_list_carries_scheme_specific_with_defaults() {
    let transport = MockTransport::default();
    let postings = v2::posting::FboService::new(config(), transport.clone()).unwrap();

    postings.list(Record::new()).await.unwrap();

    let body = transport.last_body();
    assert_eq!(
        body["with"],
        json!({"analytics_data": false, "financial_data": false})
    );
}

#[tokio::test]
async fn v3_unfulfilled_requires_a_date_range() {
    let transport = MockTransport::default();
    let postings = v3::posting::FbsService::new(config(), transport.clone()).unwrap();

    let err = postings.unfulfilled_list(Record::new()).await.unwrap_err();
    assert!(matches!(err, OzonError::InvalidArgument(_)));
    assert_eq!(transport.request_count(), 0);

    postings
        .unfulfilled_list(record(json!({
            "filter": {"cutoff_from": "2021-03-01T00:00:00Z"}
        })))
        .await
        .unwrap();
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn v3_list_defaults_to_a_seven_day_window() {
    let transport = MockTransport::default();
    let postings = v3::posting::FbsService::new(config(), transport.clone()).unwrap();

    postings.list(Record::new()).await.unwrap();

    let body = transport.last_body();
    let since = body["filter"]["since"].as_str().unwrap();
    let to = body["filter"]["to"].as_str().unwrap();
    let since = chrono::DateTime::parse_from_rfc3339(since).unwrap();
    let to = chrono::DateTime::parse_from_rfc3339(to).unwrap();
    assert_eq!((to - since).num_days(), 7);
}

#[tokio::test]
async fn v3_get_resolves_with_options_through_trait() {
    let transport = MockTransport::default();
    let postings = v3::posting::FbsService::new(config(), transport.clone()).unwrap();

    GetOrder::get(&postings, "123-0001-1", record(json!({"barcodes": true})))
        .await
        .unwrap();

    let body = transport.last_body();
    assert_eq!(body["posting_number"], json!("123-0001-1"));
    assert_eq!(
        body["with"],
        json!({"analytics_data": false, "barcodes": true, "financial_data": false})
    );
}

#[tokio::test]
async fn crossborder_unfulfilled_defaults_every_status_via_trait() {
    async fn drive<S: UnfulfilledOrderList>(service: &S) -> ozon_seller::Result<Value> {
        service.unfulfilled_list(Record::new()).await
    }

    let transport = MockTransport::default();
    let postings =
        v2::posting::CrossborderService::new(config(), transport.clone()).unwrap();
    drive(&postings).await.unwrap();

    let body = transport.last_body();
    assert_eq!(body["status"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn returns_company_interpolates_scheme_into_path() {
    let transport = MockTransport::default();
    let returns = v2::ReturnsService::new(config(), transport.clone()).unwrap();

    returns
        .company(ozon_seller::enums::PostingScheme::Fbs, Record::new())
        .await
        .unwrap();
    assert_eq!(
        transport.last_request().url,
        "https://api-seller.ozon.ru/v2/returns/company/fbs"
    );

    let err = returns
        .company(ozon_seller::enums::PostingScheme::Crossborder, Record::new())
        .await
        .unwrap_err();
    assert!(matches!(err, OzonError::InvalidArgument(_)));
}

#[tokio::test]
async fn category_attribute_values_keeps_envelope() {
    let transport =
        MockTransport::replying(200, r#"{"result":[{"id":1}],"has_next":true}"#);
    let categories = v2::CategoryService::new(config(), transport.clone()).unwrap();

    let value = categories
        .attribute_values(17_036_076, 5076, Record::new())
        .await
        .unwrap();
    assert_eq!(value["has_next"], json!(true));
    assert_eq!(value["result"], json!([{"id": 1}]));

    let body = transport.last_body();
    assert_eq!(body["limit"], json!(1000));
    assert_eq!(body["language"], json!("RU"));
}

#[tokio::test]
async fn server_error_maps_to_registered_kind() {
    let transport = MockTransport::replying(
        404,
        r#"{"error":{"code":"NOT_FOUND_IN_SORTING_CENTER_ERROR","message":"absent","data":{"posting_number":"42-1"}}}"#,
    );
    let postings = v2::posting::FbsService::new(config(), transport.clone()).unwrap();

    let err = postings.get_by_barcode("0000").await.unwrap_err();
    match err {
        OzonError::Api(api) => {
            assert_eq!(api.kind, ApiErrorKind::NotFoundInSortingCenter);
            assert_eq!(api.message, "absent");
            assert_eq!(api.details, json!({"posting_number": "42-1"}));
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn unknown_server_code_degrades_to_generic_with_raw_body() {
    let body = r#"{"error":{"code":"BRAND_NEW_FAILURE_MODE"}}"#;
    let transport = MockTransport::replying(400, body);
    let products = v1::ProductService::new(config(), transport.clone()).unwrap();

    let err = products.info(1).await.unwrap_err();
    match err {
        OzonError::Api(api) => {
            assert_eq!(api.kind, ApiErrorKind::Generic);
            assert_eq!(api.message, body);
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn pass_create_projects_and_casts() {
    let transport = MockTransport::default();
    let passes =
        ozon_seller::services::pass::PassService::new(config(), transport.clone()).unwrap();

    passes
        .create(record(json!({
            "car_number": 777,
            "is_regular_pass": 0,
            "weapon": "never",
        })))
        .await
        .unwrap();

    let body = transport.last_body();
    assert_eq!(body["car_number"], json!("777"));
    assert_eq!(body["is_regular_pass"], json!(false));
    assert!(body.get("weapon").is_none());
}

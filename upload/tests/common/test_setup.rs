use std::collections::HashMap;
use std::sync::Arc;

use lambda_http::{
    aws_lambda_events::apigw::ApiGatewayProxyRequestContext, http::Method, request::RequestContext,
    Body, Request, RequestExt, Response,
};
use serde_json::{json, Value};
use upload::{handler::UploadHandler, types::UploadError};

use super::presigners::FakePresigner;

pub const TEST_BUCKET: &str = "my-bucket-test";
pub const TEST_HASH: &str = "b2ca42478035dbd6208df19f87914f3499f851279d14f956c75d0aeda2d9e4d7";

/// Initialize tracing for tests
pub fn setup_test_env() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .ok();
}

/// Handler wired to a fake presigner
pub struct TestContext {
    pub handler: UploadHandler,
    pub presigner: Arc<FakePresigner>,
}

impl TestContext {
    pub fn new() -> Self {
        setup_test_env();

        let presigner = Arc::new(FakePresigner::default());
        let handler = UploadHandler::new(TEST_BUCKET, presigner.clone());

        Self { handler, presigner }
    }

    pub async fn send(&self, request: Request) -> Result<Response<Body>, UploadError> {
        self.handler.handle(request).await
    }
}

pub fn test_claims() -> Value {
    json!({
        "email": "user@example.com",
        "name": "First Last",
        "hash": TEST_HASH
    })
}

pub fn jpeg_upload_body() -> Value {
    json!({
        "contentType": "image/jpeg",
        "gps": {
            "latitude": 4.595696,
            "longitude": -74.078918,
            "accuracy": 15.391
        }
    })
}

/// REST API request with a JSON body and authorizer claims
pub fn upload_request(body: &Value, claims: Value) -> Request {
    upload_request_raw(Body::from(body.to_string()), claims)
}

/// REST API request with a raw body and authorizer claims
pub fn upload_request_raw(body: Body, claims: Value) -> Request {
    let mut context = ApiGatewayProxyRequestContext::default();
    context.authorizer.fields = HashMap::from([("claims".to_string(), claims)]);

    let mut request = Request::new(body);
    *request.method_mut() = Method::POST;
    request.with_request_context(RequestContext::ApiGatewayV1(context))
}

/// Raw API Gateway REST proxy event, as delivered to the function
pub fn rest_proxy_event(body: &str, is_base64_encoded: bool, claims: Value) -> String {
    json!({
        "resource": "/upload",
        "path": "/upload",
        "httpMethod": "POST",
        "headers": {"Content-Type": "application/json"},
        "multiValueHeaders": {"Content-Type": ["application/json"]},
        "queryStringParameters": null,
        "multiValueQueryStringParameters": null,
        "pathParameters": null,
        "stageVariables": null,
        "requestContext": {
            "accountId": "123456789012",
            "resourceId": "abc123",
            "stage": "test",
            "requestId": "c6af9ac6-7b61-11e6-9a41-93e8deadbeef",
            "identity": {"sourceIp": "127.0.0.1"},
            "resourcePath": "/upload",
            "httpMethod": "POST",
            "apiId": "1234567890",
            "path": "/test/upload",
            "authorizer": {"claims": claims}
        },
        "body": body,
        "isBase64Encoded": is_base64_encoded
    })
    .to_string()
}

/// Parse a response body to JSON
pub fn parse_response_body(response: &Response<Body>) -> Value {
    serde_json::from_slice(response.body()).unwrap()
}

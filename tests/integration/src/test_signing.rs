//! Signed requests verified end to end.

#[cfg(test)]
mod tests {
    use http::Method;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use zapman_client::{
        ClientError, CreateCustomerRequest, DepositRequest, ListCustomersQuery,
    };
    use zapman_core::Credentials;

    use crate::{ValidSignature, client_for, test_credentials};

    async fn verifying_server() -> MockServer {
        let server = MockServer::start().await;
        let creds = test_credentials();
        let ok = ResponseTemplate::new(200).set_body_json(json!({
            "code": "ZAP20000",
            "message": "success",
            "data": {}
        }));
        Mock::given(ValidSignature::for_clients(&[&creds]))
            .respond_with(ok)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/client/bank"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": "ZAP20000",
                "data": [{"uuid": "bank-1"}]
            })))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn test_should_pass_verification_for_get_with_query() {
        let server = verifying_server().await;
        let client = client_for(&server.uri(), test_credentials());

        let resp = client
            .list_customers(&ListCustomersQuery::new(0, 1))
            .await
            .unwrap();
        assert_eq!(resp["code"], "ZAP20000");
    }

    #[tokio::test]
    async fn test_should_pass_verification_for_encoded_query_pairs() {
        let server = verifying_server().await;
        let client = client_for(&server.uri(), test_credentials());

        let resp = client
            .request(Method::GET, "/v1/client/customer")
            .query(&[("name", "Somchai Sabuydee"), ("note", "a&b=c")])
            .send_raw()
            .await
            .unwrap();
        assert_eq!(resp["code"], "ZAP20000");
    }

    #[tokio::test]
    async fn test_should_pass_verification_for_every_post_helper() {
        let server = verifying_server().await;
        let client = client_for(&server.uri(), test_credentials());

        let bank = client.first_bank().await.unwrap();
        let customer =
            CreateCustomerRequest::new(bank.uuid, "0000000000", "ปิติ สบายใจ", "Somchai Sabuydee");
        assert_eq!(client.create_customer(&customer).await.unwrap()["code"], "ZAP20000");

        let deposit = DepositRequest::qr_thb(
            "00000000-0000-0000-0000-000000000000",
            2,
            "https://merchant.site/handleCallback",
            "https://merchant.site/thankyou",
            "ORDER_ID_1234",
        );
        assert_eq!(client.create_deposit(&deposit).await.unwrap()["code"], "ZAP20000");
    }

    #[tokio::test]
    async fn test_should_fail_verification_with_wrong_secret() {
        let server = verifying_server().await;
        let wrong = Credentials::new("test-client", "not-the-secret").unwrap();
        let client = client_for(&server.uri(), wrong);

        let err = client
            .list_customers(&ListCustomersQuery::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Api { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_should_fail_verification_for_stale_timestamp() {
        let server = verifying_server().await;
        let client = client_for(&server.uri(), test_credentials());

        let result = client
            .request(Method::GET, "/v1/client/customer")
            .query_string("skip=0&take=1")
            .timestamp(1_700_000_000)
            .send::<serde_json::Value>()
            .await;
        assert!(matches!(result, Err(ClientError::Api { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_should_pass_verification_for_raw_body_with_custom_formatting() {
        let server = verifying_server().await;
        let client = client_for(&server.uri(), test_credentials());

        let resp = client
            .request(Method::POST, "/v1/client/tx/deposit")
            .raw_body("{ \"amount\": 2,\n  \"currency\": \"thb\" }")
            .send::<serde_json::Value>()
            .await
            .unwrap();
        assert!(resp.is_success());
    }
}

//! Tests against a live Zapman API.
//!
//! Credentials and endpoint are read with [`ZapmanConfig::load`], so a `.env`
//! file in the crate directory works.

#[cfg(test)]
mod tests {
    use zapman_client::{ListCustomersQuery, SUCCESS_CODES, ZapmanClient};
    use zapman_core::ZapmanConfig;

    use crate::init_tracing;

    fn live_client() -> ZapmanClient {
        init_tracing();
        ZapmanClient::from_config(&ZapmanConfig::load()).unwrap_or_else(|e| {
            panic!("live tests need CLIENT_ID, CLIENT_SECRET and API_ENDPOINT: {e}")
        })
    }

    #[tokio::test]
    #[ignore = "requires live API credentials"]
    async fn test_should_list_banks_from_live_api() {
        let banks = live_client().list_banks().await.unwrap();
        assert!(!banks.is_empty(), "live API should list at least one bank");
    }

    #[tokio::test]
    #[ignore = "requires live API credentials"]
    async fn test_should_accept_signed_customer_listing() {
        let resp = live_client()
            .list_customers(&ListCustomersQuery::new(0, 1))
            .await
            .unwrap();
        let code = resp["code"].as_str().unwrap_or_default();
        assert!(SUCCESS_CODES.contains(&code), "unexpected response: {resp}");
    }
}

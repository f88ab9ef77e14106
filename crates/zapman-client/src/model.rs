//! Request and response payloads for the endpoints the client wraps.
//!
//! Field order in the request structs is the order the keys are serialized
//! in, and therefore part of the signed bytes.

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

/// Envelope codes that denote success.
pub const SUCCESS_CODES: [&str; 2] = ["ZAP20000", "ZAP20001"];

/// The envelope every Zapman response is wrapped in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Result code such as `ZAP20000`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Human-readable message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Payload.
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Whether the envelope carries one of the [`SUCCESS_CODES`].
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.code
            .as_deref()
            .is_some_and(|code| SUCCESS_CODES.contains(&code))
    }

    /// Unwrap the payload of a successful response.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Rejected`] if the code is not a success code, or
    /// [`ClientError::NotFound`] if a successful response carries no data.
    pub fn into_data(self) -> ClientResult<T> {
        if !self.is_success() {
            return Err(ClientError::Rejected {
                code: self.code.unwrap_or_default(),
                message: self.message,
            });
        }
        self.data.ok_or(ClientError::NotFound("response data"))
    }
}

/// A bank supported for customer accounts (`GET /v1/client/bank`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bank {
    /// Bank UUID, referenced by [`CreateCustomerRequest::bank_uuid`].
    pub uuid: String,
    /// Any other fields the API returns (names, codes, logos).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Pagination for `GET /v1/client/customer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListCustomersQuery {
    /// Number of records to skip.
    pub skip: u32,
    /// Number of records to return.
    pub take: u32,
}

impl ListCustomersQuery {
    /// Create a query.
    #[must_use]
    pub fn new(skip: u32, take: u32) -> Self {
        Self { skip, take }
    }

    /// The raw query string, in the parameter order the API documents.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        format!("skip={}&take={}", self.skip, self.take)
    }
}

impl Default for ListCustomersQuery {
    fn default() -> Self {
        Self::new(0, 1)
    }
}

/// Body of `POST /v1/client/customer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCustomerRequest {
    /// UUID of the customer's bank.
    pub bank_uuid: String,
    /// Bank account number.
    pub bank_account_number: String,
    /// Account holder name, as registered with the bank.
    pub bank_account_name: String,
    /// Account holder name in English.
    pub bank_account_name_en: String,
    /// Account status.
    pub status: String,
}

impl CreateCustomerRequest {
    /// Create an active customer account.
    #[must_use]
    pub fn new(
        bank_uuid: impl Into<String>,
        bank_account_number: impl Into<String>,
        bank_account_name: impl Into<String>,
        bank_account_name_en: impl Into<String>,
    ) -> Self {
        Self {
            bank_uuid: bank_uuid.into(),
            bank_account_number: bank_account_number.into(),
            bank_account_name: bank_account_name.into(),
            bank_account_name_en: bank_account_name_en.into(),
            status: "active".to_owned(),
        }
    }
}

/// Body of `POST /v1/client/tx/deposit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositRequest {
    /// UUID of the paying customer account.
    pub customer_account_uuid: String,
    /// Amount in major currency units.
    pub amount: serde_json::Number,
    /// ISO currency code, lowercase.
    pub currency: String,
    /// Payment method, e.g. `qr`.
    pub payment_method: String,
    /// URL that receives the callback when the transaction succeeds.
    pub callback_url: String,
    /// URL the payer's browser is redirected to on success.
    pub redirect_url: String,
    /// Merchant reference echoed back in the callback.
    pub merchant_order_id: String,
}

impl DepositRequest {
    /// Create a THB QR deposit.
    #[must_use]
    pub fn qr_thb(
        customer_account_uuid: impl Into<String>,
        amount: impl Into<serde_json::Number>,
        callback_url: impl Into<String>,
        redirect_url: impl Into<String>,
        merchant_order_id: impl Into<String>,
    ) -> Self {
        Self {
            customer_account_uuid: customer_account_uuid.into(),
            amount: amount.into(),
            currency: "thb".to_owned(),
            payment_method: "qr".to_owned(),
            callback_url: callback_url.into(),
            redirect_url: redirect_url.into(),
            merchant_order_id: merchant_order_id.into(),
        }
    }
}

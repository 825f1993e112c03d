use std::{collections::BTreeMap, fmt::Display};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Type;

use crate::gge4;

//--------------------------------------   TransactionId     ---------------------------------------------------------
/// The gateway-assigned identifier of one payment attempt. Orders are keyed on it, which is what stops a previously
/// honoured callback from being redeemed twice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct TransactionId(pub String);

impl TransactionId {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<S: Into<String>> From<S> for TransactionId {
    fn from(value: S) -> Self {
        Self(value.into())
    }
}

//--------------------------------------   CallbackPayload   ---------------------------------------------------------
/// The raw fields of a gateway callback, as a flat mapping from field name to value.
///
/// The gateway may repeat a parameter. Only the first occurrence is kept, so build payloads with
/// [`CallbackPayload::from_pairs`] (or `collect()`) rather than inserting into a map directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallbackPayload {
    fields: BTreeMap<String, String>,
}

impl CallbackPayload {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        pairs.into_iter().collect()
    }

    /// The value of `field`, if the gateway sent it.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Like [`Self::get`], but an empty value counts as absent.
    pub fn non_empty(&self, field: &str) -> Option<&str> {
        self.get(field).filter(|v| !v.is_empty())
    }

    pub fn transaction_id(&self) -> Option<TransactionId> {
        self.non_empty(gge4::TRANSACTION_ID).map(TransactionId::from)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CallbackPayload {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut fields = BTreeMap::new();
        for (k, v) in iter {
            fields.entry(k.into()).or_insert_with(|| v.into());
        }
        Self { fields }
    }
}

//--------------------------------------      NewOrder       ---------------------------------------------------------
/// An order that has passed every verification stage and is ready to be written to an [`crate::OrderStore`].
///
/// Only the callback verifier can build one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct NewOrder {
    pub transaction_id: TransactionId,
    /// The amount exactly as the gateway sent it
    pub amount: String,
    pub response_code: String,
    /// Every other callback field, verbatim, for audit
    pub fields: BTreeMap<String, String>,
}

impl NewOrder {
    pub(crate) fn from_callback(transaction_id: TransactionId, payload: &CallbackPayload) -> Self {
        let amount = payload.get(gge4::AMOUNT).unwrap_or_default().to_string();
        let response_code = payload.get(gge4::RESPONSE_CODE).unwrap_or_default().to_string();
        let fields = payload
            .fields()
            .iter()
            .filter(|(k, _)| ![gge4::TRANSACTION_ID, gge4::AMOUNT, gge4::RESPONSE_CODE].contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Self { transaction_id, amount, response_code, fields }
    }
}

impl Display for NewOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Transaction {} for {} (response code {})", self.transaction_id, self.amount, self.response_code)
    }
}

//--------------------------------------        Order        ---------------------------------------------------------
/// A persisted order. Orders are immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct Order {
    pub id: i64,
    pub transaction_id: TransactionId,
    pub amount: String,
    pub response_code: String,
    pub fields: BTreeMap<String, String>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub(crate) fn from_new_order(id: i64, order: NewOrder, created_at: DateTime<Utc>) -> Self {
        let NewOrder { transaction_id, amount, response_code, fields } = order;
        Self { id, transaction_id, amount, response_code, fields, created_at }
    }
}

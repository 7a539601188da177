//! Reading the extraction collaborator's reply.
//!
//! Vision models asked for bare JSON still wrap it in prose or code fences
//! now and then, so only the outermost `{ ... }` span is parsed.

use serde_json::Value;

use super::error::ReceiptError;

/// Parse a `{"receipts": [...]}` reply into per-receipt JSON values.
///
/// A reply without a `receipts` key yields no receipts. Entries are returned
/// unchecked; each is read on its own by the enricher so one malformed entry
/// does not sink its siblings.
pub fn parse_receipts_reply(text: &str) -> Result<Vec<Value>, ReceiptError> {
    let json = outer_object(text)?;
    let mut reply: Value = serde_json::from_str(json)
        .map_err(|e| ReceiptError::Extraction(format!("reply is not valid JSON: {e}")))?;

    match reply.get_mut("receipts").map(Value::take) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(receipts)) => Ok(receipts),
        Some(_) => Err(ReceiptError::Extraction(
            "'receipts' is not an array".into(),
        )),
    }
}

fn outer_object(text: &str) -> Result<&str, ReceiptError> {
    let start = text
        .find('{')
        .ok_or_else(|| ReceiptError::Extraction("no JSON object in reply".into()))?;
    let end = text
        .rfind('}')
        .ok_or_else(|| ReceiptError::Extraction("no JSON object in reply".into()))?;
    if end < start {
        return Err(ReceiptError::Extraction("malformed JSON object in reply".into()));
    }
    Ok(&text[start..=end])
}

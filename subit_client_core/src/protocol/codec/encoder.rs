//! XML-RPC document encoder
//!
//! This module handles encoding of method calls (and, for stub servers,
//! method responses) into request bodies.

use super::value::Value;
use crate::protocol::error::{ProtocolError, Result};
use bytes::{BufMut, Bytes, BytesMut};
use log::{debug, trace};
use quick_xml::escape::escape;

const XML_DECLARATION: &str = "<?xml version=\"1.0\"?>\n";

/// Encoder for XML-RPC documents
pub struct Encoder {
    /// Buffer for encoding
    buffer: BytesMut,
}

impl Encoder {
    /// Create a new encoder
    pub fn new() -> Self {
        Self {
            buffer: BytesMut::with_capacity(1024),
        }
    }

    /// Encode a `<methodCall>` document
    pub fn encode_call(&mut self, method: &str, params: &[Value]) -> Result<Bytes> {
        trace!("Encoding call to {method} with {} params", params.len());
        self.buffer.clear();

        if method.is_empty() {
            debug!("Attempted to encode call without a method name");
            return Err(ProtocolError::encoding("Empty method name"));
        }

        let mut doc = String::from(XML_DECLARATION);
        doc.push_str("<methodCall><methodName>");
        doc.push_str(&escape(method));
        doc.push_str("</methodName><params>");
        for param in params {
            doc.push_str("<param>");
            write_value(&mut doc, param)?;
            doc.push_str("</param>");
        }
        doc.push_str("</params></methodCall>\n");

        Ok(self.finish(doc))
    }

    /// Encode a successful `<methodResponse>` document
    pub fn encode_response(&mut self, value: &Value) -> Result<Bytes> {
        self.buffer.clear();

        let mut doc = String::from(XML_DECLARATION);
        doc.push_str("<methodResponse><params><param>");
        write_value(&mut doc, value)?;
        doc.push_str("</param></params></methodResponse>\n");

        Ok(self.finish(doc))
    }

    /// Encode a fault `<methodResponse>` document
    pub fn encode_fault(&mut self, code: i64, message: &str) -> Result<Bytes> {
        self.buffer.clear();

        let fault = Value::structure([
            ("faultCode", Value::Int(code)),
            ("faultString", Value::from(message)),
        ]);
        let mut doc = String::from(XML_DECLARATION);
        doc.push_str("<methodResponse><fault>");
        write_value(&mut doc, &fault)?;
        doc.push_str("</fault></methodResponse>\n");

        Ok(self.finish(doc))
    }

    fn finish(&mut self, doc: String) -> Bytes {
        self.buffer.put(doc.as_bytes());
        let result = self.buffer.split().freeze();
        debug!("Encoded {} bytes", result.len());
        result
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Append a `<value>` element for `value` to `out`
fn write_value(out: &mut String, value: &Value) -> Result<()> {
    out.push_str("<value>");
    match value {
        Value::Int(i) => out.push_str(&format!("<int>{i}</int>")),
        Value::Bool(b) => out.push_str(if *b {
            "<boolean>1</boolean>"
        } else {
            "<boolean>0</boolean>"
        }),
        Value::String(s) => {
            out.push_str("<string>");
            out.push_str(&escape(s.as_str()));
            out.push_str("</string>");
        }
        Value::Double(d) => {
            if !d.is_finite() {
                return Err(ProtocolError::encoding(format!(
                    "Cannot encode non-finite double {d}"
                )));
            }
            out.push_str(&format!("<double>{d}</double>"));
        }
        Value::Struct(members) => {
            out.push_str("<struct>");
            for (name, member) in members {
                out.push_str("<member><name>");
                out.push_str(&escape(name.as_str()));
                out.push_str("</name>");
                write_value(out, member)?;
                out.push_str("</member>");
            }
            out.push_str("</struct>");
        }
        Value::Array(items) => {
            out.push_str("<array><data>");
            for item in items {
                write_value(out, item)?;
            }
            out.push_str("</data></array>");
        }
        Value::Nil => out.push_str("<nil/>"),
    }
    out.push_str("</value>");
    Ok(())
}

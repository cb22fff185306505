//! XML-RPC response decoder
//!
//! The document is first read into a small element tree with quick-xml, then
//! interpreted as XML-RPC. Faults are returned as `ProtocolError::Fault`.

use super::value::Value;
use crate::protocol::error::{ProtocolError, Result};
use log::{debug, trace};
use quick_xml::Reader;
use quick_xml::events::Event;
use std::collections::BTreeMap;

/// Minimal element tree node
#[derive(Debug, Default)]
struct Node {
    name: String,
    text: String,
    children: Vec<Node>,
}

impl Node {
    fn named(name: String) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }

    fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.name == name)
    }

    fn require(&self, name: &str) -> Result<&Node> {
        self.child(name).ok_or_else(|| {
            ProtocolError::decoding(format!("<{}> has no <{name}> element", self.name))
        })
    }
}

/// Decoder for XML-RPC documents
#[derive(Debug, Default)]
pub struct Decoder;

impl Decoder {
    /// Create a new decoder
    pub fn new() -> Self {
        Self
    }

    /// Decode a `<methodResponse>` into its single return value
    pub fn decode_response(&self, xml: &str) -> Result<Value> {
        trace!("Decoding response of {} bytes", xml.len());
        let root = parse_tree(xml)?;
        let response = root.child("methodResponse").ok_or_else(|| {
            ProtocolError::invalid_response("methodResponse", describe_root(&root))
        })?;

        if let Some(fault) = response.child("fault") {
            let value = parse_value(fault.require("value")?)?;
            let code = value.get("faultCode").and_then(Value::as_i64).unwrap_or(0);
            let message = value
                .get("faultString")
                .and_then(Value::as_str)
                .unwrap_or_default();
            debug!("Service returned fault {code}: {message}");
            return Err(ProtocolError::fault(code, message));
        }

        let value = response
            .require("params")?
            .require("param")?
            .require("value")?;
        parse_value(value)
    }
}

/// Read the whole document into a tree rooted at an unnamed node
fn parse_tree(xml: &str) -> Result<Node> {
    let mut reader = Reader::from_str(xml);
    let mut stack = vec![Node::default()];

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                stack.push(Node::named(name));
            }
            Ok(Event::Empty(empty)) => {
                let name = String::from_utf8_lossy(empty.name().as_ref()).into_owned();
                current(&mut stack)?.children.push(Node::named(name));
            }
            Ok(Event::End(_)) => {
                let node = stack
                    .pop()
                    .ok_or_else(|| ProtocolError::decoding("Unbalanced end tag"))?;
                current(&mut stack)?.children.push(node);
            }
            Ok(Event::Text(text)) => {
                let text = text
                    .unescape()
                    .map_err(|e| ProtocolError::decoding(format!("Bad text content: {e}")))?;
                current(&mut stack)?.text.push_str(&text);
            }
            Ok(Event::CData(data)) => {
                let text = String::from_utf8_lossy(&data.into_inner()).into_owned();
                current(&mut stack)?.text.push_str(&text);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(ProtocolError::decoding(format!(
                    "Malformed XML at position {}: {e}",
                    reader.buffer_position()
                )));
            }
        }
    }

    if stack.len() != 1 {
        return Err(ProtocolError::decoding("Document ended inside an element"));
    }
    stack
        .pop()
        .ok_or_else(|| ProtocolError::decoding("Empty document"))
}

fn current(stack: &mut [Node]) -> Result<&mut Node> {
    stack
        .last_mut()
        .ok_or_else(|| ProtocolError::decoding("Unbalanced end tag"))
}

fn describe_root(root: &Node) -> String {
    root.children
        .first()
        .map(|c| format!("<{}>", c.name))
        .unwrap_or_else(|| "an empty document".to_string())
}

fn invalid_scalar(kind: &str, text: &str) -> ProtocolError {
    ProtocolError::decoding(format!("Invalid {kind} '{text}'"))
}

/// Interpret a `<value>` element
fn parse_value(node: &Node) -> Result<Value> {
    let Some(typed) = node.children.first() else {
        // Untyped values are strings
        return Ok(Value::String(node.text.clone()));
    };

    let scalar = typed.text.trim();
    match typed.name.as_str() {
        "string" => Ok(Value::String(typed.text.clone())),
        "int" | "i4" | "i8" => scalar
            .parse()
            .map(Value::Int)
            .map_err(|_| invalid_scalar("integer", scalar)),
        "boolean" => match scalar {
            "1" => Ok(Value::Bool(true)),
            "0" => Ok(Value::Bool(false)),
            other => Err(invalid_scalar("boolean", other)),
        },
        "double" => scalar
            .parse()
            .map(Value::Double)
            .map_err(|_| invalid_scalar("double", scalar)),
        "struct" => {
            let mut members = BTreeMap::new();
            for member in typed.children.iter().filter(|c| c.name == "member") {
                let name = member.require("name")?.text.trim().to_string();
                let value = parse_value(member.require("value")?)?;
                members.insert(name, value);
            }
            Ok(Value::Struct(members))
        }
        "array" => {
            let data = typed.require("data")?;
            data.children
                .iter()
                .filter(|c| c.name == "value")
                .map(parse_value)
                .collect::<Result<Vec<_>>>()
                .map(Value::Array)
        }
        "nil" => Ok(Value::Nil),
        // Kept verbatim, the client never interprets them
        "base64" | "dateTime.iso8601" => Ok(Value::String(scalar.to_string())),
        other => Err(ProtocolError::decoding(format!(
            "Unsupported value type <{other}>"
        ))),
    }
}

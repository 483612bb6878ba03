use crate::errors::{Error, Result};
use crate::Format;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use prefkit_core::codec::Iso8601;
use prefkit_core::{Number, NumberBox, RawDict, RawValue};
use quick_xml::events::Event;
use quick_xml::Reader;

const NAME: &str = "plist";

const HEADER: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
    "<!DOCTYPE plist PUBLIC \"-//Apple//DTD PLIST 1.0//EN\" ",
    "\"http://www.apple.com/DTDs/PropertyList-1.0.dtd\">\n",
    "<plist version=\"1.0\">\n",
);

/// XML property list adapter
///
/// Reads and writes the XML 1.0 flavor. `integer` parses into a 64-bit
/// integer box, `real` into a double box and `true`/`false` into boolean
/// boxes; `data` and `date` are decoded into blobs and timestamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlistFormat;

impl PlistFormat {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Format for PlistFormat {
    fn name(&self) -> &'static str {
        NAME
    }

    fn parse(&self, bytes: &[u8]) -> Result<RawDict> {
        let text = std::str::from_utf8(bytes)?;
        let mut reader = Reader::from_str(text);
        let mut parser = Parser::default();
        let mut buf = Vec::new();

        loop {
            let event = match reader.read_event_into(&mut buf) {
                Ok(event) => event,
                Err(e) => {
                    return Err(Error::parse(
                        NAME,
                        format!("{e} at byte {}", reader.buffer_position()),
                    ))
                }
            };
            match event {
                Event::Start(ref e) => parser.start(e.name().as_ref())?,
                Event::Empty(ref e) => parser.empty(e.name().as_ref())?,
                Event::End(ref e) => parser.end(e.name().as_ref())?,
                Event::Text(ref e) => parser.text(&String::from_utf8_lossy(e))?,
                Event::CData(ref e) => parser.text(&String::from_utf8_lossy(e))?,
                Event::GeneralRef(ref e) => {
                    let resolved = resolve_reference(e)?;
                    parser.text(resolved.encode_utf8(&mut [0; 4]))?;
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        parser.finish()
    }

    fn serialize(&self, dict: &RawDict) -> Result<Vec<u8>> {
        let mut out = String::from(HEADER);
        write_dict(&mut out, dict, 0);
        out.push_str("</plist>\n");
        Ok(out.into_bytes())
    }
}

fn resolve_reference(name: &[u8]) -> Result<char> {
    let name = String::from_utf8_lossy(name);
    let resolved = match name.as_ref() {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        other => other
            .strip_prefix("#x")
            .or_else(|| other.strip_prefix("#X"))
            .map(|hex| u32::from_str_radix(hex, 16))
            .or_else(|| other.strip_prefix('#').map(str::parse::<u32>))
            .and_then(|code| code.ok())
            .and_then(char::from_u32),
    };
    resolved.ok_or_else(|| Error::parse(NAME, format!("unknown entity reference '&{name};'")))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Leaf {
    Key,
    String,
    Integer,
    Real,
    Data,
    Date,
}

impl Leaf {
    fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"key" => Some(Leaf::Key),
            b"string" => Some(Leaf::String),
            b"integer" => Some(Leaf::Integer),
            b"real" => Some(Leaf::Real),
            b"data" => Some(Leaf::Data),
            b"date" => Some(Leaf::Date),
            _ => None,
        }
    }
}

#[derive(Debug)]
enum Frame {
    Dict {
        entries: RawDict,
        pending_key: Option<String>,
    },
    Array(Vec<RawValue>),
}

#[derive(Debug, Default)]
struct Parser {
    stack: Vec<Frame>,
    leaf: Option<(Leaf, String)>,
    root: Option<RawDict>,
}

fn tag_name(tag: &[u8]) -> String {
    String::from_utf8_lossy(tag).into_owned()
}

impl Parser {
    fn start(&mut self, tag: &[u8]) -> Result<()> {
        if let Some((leaf, _)) = self.leaf {
            return Err(Error::parse(
                NAME,
                format!("<{}> nested inside {leaf:?} element", tag_name(tag)),
            ));
        }
        match tag {
            b"plist" | b"true" | b"false" => Ok(()),
            b"dict" => {
                self.stack.push(Frame::Dict {
                    entries: RawDict::new(),
                    pending_key: None,
                });
                Ok(())
            }
            b"array" => {
                self.stack.push(Frame::Array(Vec::new()));
                Ok(())
            }
            other => match Leaf::from_tag(other) {
                Some(leaf) => {
                    self.leaf = Some((leaf, String::new()));
                    Ok(())
                }
                None => Err(Error::parse(NAME, format!("unknown element <{}>", tag_name(other)))),
            },
        }
    }

    fn empty(&mut self, tag: &[u8]) -> Result<()> {
        match tag {
            b"plist" => Ok(()),
            b"dict" => self.emit(RawValue::Dict(RawDict::new())),
            b"array" => self.emit(RawValue::Array(Vec::new())),
            b"true" => self.emit(RawValue::Number(NumberBox::boolean(true))),
            b"false" => self.emit(RawValue::Number(NumberBox::boolean(false))),
            other => match Leaf::from_tag(other) {
                Some(leaf) => self.close_leaf(leaf, String::new()),
                None => Err(Error::parse(NAME, format!("unknown element <{}/>", tag_name(other)))),
            },
        }
    }

    fn end(&mut self, tag: &[u8]) -> Result<()> {
        match tag {
            b"plist" => Ok(()),
            b"true" => self.emit(RawValue::Number(NumberBox::boolean(true))),
            b"false" => self.emit(RawValue::Number(NumberBox::boolean(false))),
            b"dict" => match self.stack.pop() {
                Some(Frame::Dict {
                    pending_key: Some(key),
                    ..
                }) => Err(Error::parse(NAME, format!("key '{key}' has no value"))),
                Some(Frame::Dict { entries, .. }) => self.emit(RawValue::Dict(entries)),
                _ => Err(Error::parse(NAME, "unbalanced </dict>")),
            },
            b"array" => match self.stack.pop() {
                Some(Frame::Array(items)) => self.emit(RawValue::Array(items)),
                _ => Err(Error::parse(NAME, "unbalanced </array>")),
            },
            other => match (Leaf::from_tag(other), self.leaf.take()) {
                (Some(closing), Some((open, text))) if closing == open => self.close_leaf(open, text),
                _ => Err(Error::parse(NAME, format!("unbalanced </{}>", tag_name(other)))),
            },
        }
    }

    fn text(&mut self, text: &str) -> Result<()> {
        match &mut self.leaf {
            Some((_, buffer)) => {
                buffer.push_str(text);
                Ok(())
            }
            None if text.trim().is_empty() => Ok(()),
            None => Err(Error::parse(NAME, format!("unexpected text '{}'", text.trim()))),
        }
    }

    fn close_leaf(&mut self, leaf: Leaf, text: String) -> Result<()> {
        let value = match leaf {
            Leaf::Key => {
                return match self.stack.last_mut() {
                    Some(Frame::Dict { pending_key, .. }) if pending_key.is_none() => {
                        *pending_key = Some(text);
                        Ok(())
                    }
                    _ => Err(Error::parse(NAME, format!("misplaced key '{text}'"))),
                };
            }
            Leaf::String => RawValue::Str(text),
            Leaf::Integer => RawValue::Number(parse_integer(text.trim())?),
            Leaf::Real => RawValue::Number(NumberBox::from_f64(parse_real(text.trim())?)),
            Leaf::Data => {
                let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
                let bytes = STANDARD
                    .decode(compact)
                    .map_err(|e| Error::parse(NAME, format!("invalid data: {e}")))?;
                RawValue::Bytes(bytes)
            }
            Leaf::Date => match Iso8601::parse(&text) {
                Some(date) => RawValue::Time(date),
                None => return Err(Error::parse(NAME, format!("invalid date '{}'", text.trim()))),
            },
        };
        self.emit(value)
    }

    fn emit(&mut self, value: RawValue) -> Result<()> {
        match self.stack.last_mut() {
            Some(Frame::Dict {
                entries,
                pending_key,
            }) => match pending_key.take() {
                Some(key) => {
                    entries.insert(key, value);
                    Ok(())
                }
                None => Err(Error::parse(
                    NAME,
                    format!("{} value in dict without a key", value.kind_name()),
                )),
            },
            Some(Frame::Array(items)) => {
                items.push(value);
                Ok(())
            }
            None if self.root.is_some() => Err(Error::parse(NAME, "more than one root value")),
            None => match value {
                RawValue::Dict(entries) => {
                    self.root = Some(entries);
                    Ok(())
                }
                other => Err(Error::invalid_root(NAME, other.kind_name())),
            },
        }
    }

    fn finish(self) -> Result<RawDict> {
        if !self.stack.is_empty() || self.leaf.is_some() {
            return Err(Error::parse(NAME, "unexpected end of document"));
        }
        self.root.ok_or_else(|| Error::parse(NAME, "document has no root value"))
    }
}

fn parse_integer(text: &str) -> Result<NumberBox> {
    if let Ok(signed) = text.parse::<i64>() {
        return Ok(NumberBox::from_i64(signed));
    }
    text.parse::<u64>()
        .map(NumberBox::from_u64)
        .map_err(|_| Error::parse(NAME, format!("invalid integer '{text}'")))
}

fn parse_real(text: &str) -> Result<f64> {
    match text.to_ascii_lowercase().as_str() {
        "nan" => Ok(f64::NAN),
        "inf" | "infinity" | "+infinity" => Ok(f64::INFINITY),
        "-inf" | "-infinity" => Ok(f64::NEG_INFINITY),
        _ => text
            .parse::<f64>()
            .map_err(|_| Error::parse(NAME, format!("invalid real '{text}'"))),
    }
}

fn format_real(value: f64) -> String {
    if value.is_nan() {
        "nan".to_owned()
    } else if value == f64::INFINITY {
        "+infinity".to_owned()
    } else if value == f64::NEG_INFINITY {
        "-infinity".to_owned()
    } else {
        value.to_string()
    }
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push('\t');
    }
}

fn write_element(out: &mut String, depth: usize, tag: &str, text: &str) {
    indent(out, depth);
    out.push('<');
    out.push_str(tag);
    out.push('>');
    out.push_str(&quick_xml::escape::escape(text));
    out.push_str("</");
    out.push_str(tag);
    out.push_str(">\n");
}

fn write_empty(out: &mut String, depth: usize, tag: &str) {
    indent(out, depth);
    out.push('<');
    out.push_str(tag);
    out.push_str("/>\n");
}

fn write_dict(out: &mut String, dict: &RawDict, depth: usize) {
    if dict.is_empty() {
        write_empty(out, depth, "dict");
        return;
    }
    indent(out, depth);
    out.push_str("<dict>\n");
    for (key, value) in dict {
        write_element(out, depth + 1, "key", key);
        write_value(out, value, depth + 1);
    }
    indent(out, depth);
    out.push_str("</dict>\n");
}

fn write_value(out: &mut String, value: &RawValue, depth: usize) {
    match value {
        RawValue::Int(v) => write_element(out, depth, "integer", &v.to_string()),
        RawValue::Str(v) => write_element(out, depth, "string", v),
        RawValue::Bool(v) => write_empty(out, depth, if *v { "true" } else { "false" }),
        RawValue::F64(v) => write_element(out, depth, "real", &format_real(*v)),
        RawValue::F32(v) if v.is_finite() => write_element(out, depth, "real", &v.to_string()),
        RawValue::F32(v) => write_element(out, depth, "real", &format_real(f64::from(*v))),
        RawValue::Bytes(v) => write_element(out, depth, "data", &STANDARD.encode(v)),
        RawValue::Time(v) => write_element(out, depth, "date", &Iso8601::format(v)),
        RawValue::Number(number) if number.is_boolean() => {
            write_empty(out, depth, if number.as_bool_lossy() { "true" } else { "false" });
        }
        RawValue::Number(number) => match number.number() {
            Number::Float(v) => write_element(out, depth, "real", &format_real(v)),
            _ => write_element(out, depth, "integer", &number.to_string()),
        },
        RawValue::Array(items) if items.is_empty() => write_empty(out, depth, "array"),
        RawValue::Array(items) => {
            indent(out, depth);
            out.push_str("<array>\n");
            for item in items {
                write_value(out, item, depth + 1);
            }
            indent(out, depth);
            out.push_str("</array>\n");
        }
        RawValue::Dict(entries) => write_dict(out, entries, depth),
    }
}

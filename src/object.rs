//! PDF object types.
//!
//! These are the values the tree borrows from its resolver. The tree never
//! mutates or clones them.

use indexmap::IndexMap;
use std::fmt;

/// Dictionary keys mapped to values, in the order they appear in the file.
pub type Dictionary = IndexMap<String, Object>;

/// PDF object representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    /// Null object
    Null,
    /// Boolean value
    Boolean(bool),
    /// Integer value
    Integer(i64),
    /// Real (floating-point) value
    Real(f64),
    /// String (byte array)
    String(Vec<u8>),
    /// Name (stored without the leading /)
    Name(String),
    /// Array of objects
    Array(Vec<Object>),
    /// Dictionary (key-value pairs, insertion ordered)
    Dictionary(Dictionary),
    /// Stream (dictionary + data)
    Stream {
        /// Stream dictionary
        dict: Dictionary,
        /// Raw stream data
        data: bytes::Bytes,
    },
    /// Indirect object reference
    Reference(ObjectRef),
}

/// Reference to an indirect object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectRef {
    /// Object number
    pub id: u32,
    /// Generation number
    pub gen: u16,
}

impl ObjectRef {
    /// Create a new object reference.
    pub fn new(id: u32, gen: u16) -> Self {
        Self { id, gen }
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} R", self.id, self.gen)
    }
}

/// The kind of an object, without its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum ObjectKind {
    /// `null`
    Null,
    /// `true` / `false`
    Boolean,
    /// Integer or real
    Number,
    /// Literal or hex string
    String,
    /// `/Name`
    Name,
    /// `[ ... ]`
    Array,
    /// `<< ... >>`
    Dictionary,
    /// Dictionary followed by stream data
    Stream,
    /// `n g R`
    Reference,
}

impl ObjectKind {
    /// Human-readable name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Null => "Null",
            ObjectKind::Boolean => "Boolean",
            ObjectKind::Number => "Number",
            ObjectKind::String => "String",
            ObjectKind::Name => "Name",
            ObjectKind::Array => "Array",
            ObjectKind::Dictionary => "Dictionary",
            ObjectKind::Stream => "Stream",
            ObjectKind::Reference => "Reference",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Object {
    /// Get the kind of this object.
    pub fn kind(&self) -> ObjectKind {
        match self {
            Object::Null => ObjectKind::Null,
            Object::Boolean(_) => ObjectKind::Boolean,
            Object::Integer(_) | Object::Real(_) => ObjectKind::Number,
            Object::String(_) => ObjectKind::String,
            Object::Name(_) => ObjectKind::Name,
            Object::Array(_) => ObjectKind::Array,
            Object::Dictionary(_) => ObjectKind::Dictionary,
            Object::Stream { .. } => ObjectKind::Stream,
            Object::Reference(_) => ObjectKind::Reference,
        }
    }

    /// Shorthand for a name object.
    pub fn name(name: impl Into<String>) -> Self {
        Object::Name(name.into())
    }

    /// Shorthand for a reference object with generation 0.
    pub fn reference(id: u32) -> Self {
        Object::Reference(ObjectRef::new(id, 0))
    }

    /// Shorthand for a literal string object.
    pub fn string(text: &str) -> Self {
        Object::String(text.as_bytes().to_vec())
    }

    /// Build a dictionary object from `(key, value)` pairs, keeping their order.
    pub fn dictionary<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Object)>,
    {
        Object::Dictionary(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Try to cast to integer.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Object::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to cast to name.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Object::Name(s) => Some(s),
            _ => None,
        }
    }

    /// Try to cast to dictionary. Works for both Dictionary and Stream objects.
    pub fn as_dict(&self) -> Option<&Dictionary> {
        match self {
            Object::Dictionary(d) => Some(d),
            Object::Stream { dict, .. } => Some(dict),
            _ => None,
        }
    }

    /// Try to cast to array.
    pub fn as_array(&self) -> Option<&Vec<Object>> {
        match self {
            Object::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Try to cast to reference.
    pub fn as_reference(&self) -> Option<ObjectRef> {
        match self {
            Object::Reference(r) => Some(*r),
            _ => None,
        }
    }

    /// Try to cast to string (bytes).
    pub fn as_string(&self) -> Option<&[u8]> {
        match self {
            Object::String(s) => Some(s),
            _ => None,
        }
    }

    /// Check if object is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Object::Null)
    }

    /// The `/Type` name of a dictionary or stream, if any.
    pub fn dict_type(&self) -> Option<&str> {
        self.as_dict()?.get("Type")?.as_name()
    }

    /// Decoded text of a string object.
    ///
    /// Returns `None` for non-string objects.
    pub fn to_unicode_string(&self) -> Option<String> {
        self.as_string().map(crate::encoding::decode_text_string)
    }
}

/// Format a real number the way PDF writers do: no exponent, no trailing zeros.
fn write_real(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return write!(f, "{}", value as i64);
    }
    let text = format!("{:.6}", value);
    f.write_str(text.trim_end_matches('0').trim_end_matches('.'))
}

fn write_dict(f: &mut fmt::Formatter<'_>, dict: &Dictionary) -> fmt::Result {
    f.write_str("<<")?;
    for (i, (key, value)) in dict.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "/{} {}", key, value)?;
    }
    f.write_str(">>")
}

/// Canonical text form of an object.
///
/// Strings print as `(text)` with their decoded content; containers print
/// their members inline.
impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Null => f.write_str("null"),
            Object::Boolean(b) => write!(f, "{}", b),
            Object::Integer(i) => write!(f, "{}", i),
            Object::Real(r) => write_real(f, *r),
            Object::String(bytes) => {
                write!(f, "({})", crate::encoding::decode_text_string(bytes))
            },
            Object::Name(name) => write!(f, "/{}", name),
            Object::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            },
            Object::Dictionary(dict) => write_dict(f, dict),
            Object::Stream { dict, .. } => {
                write_dict(f, dict)?;
                f.write_str("stream")
            },
            Object::Reference(r) => write!(f, "{}", r),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_kind_numbers() {
        assert_eq!(Object::Integer(3).kind(), ObjectKind::Number);
        assert_eq!(Object::Real(1.5).kind(), ObjectKind::Number);
        assert_eq!(Object::reference(4).kind(), ObjectKind::Reference);
    }

    #[test]
    fn test_object_name() {
        let obj = Object::name("Type");
        assert_eq!(obj.as_name(), Some("Type"));
        assert!(obj.as_integer().is_none());
    }

    #[test]
    fn test_object_null() {
        let obj = Object::Null;
        assert!(obj.is_null());
        assert_eq!(obj.to_string(), "null");
    }

    #[test]
    fn test_reference_display() {
        assert_eq!(ObjectRef::new(12, 0).to_string(), "12 0 R");
        assert_eq!(Object::Reference(ObjectRef::new(3, 2)).to_string(), "3 2 R");
    }

    #[test]
    fn test_real_display() {
        assert_eq!(Object::Real(0.5).to_string(), "0.5");
        assert_eq!(Object::Real(612.0).to_string(), "612");
        assert_eq!(Object::Real(-1.25).to_string(), "-1.25");
    }

    #[test]
    fn test_dictionary_display_keeps_order() {
        let dict = Object::dictionary([
            ("Type", Object::name("Page")),
            ("Parent", Object::reference(3)),
        ]);
        assert_eq!(dict.to_string(), "<</Type /Page /Parent 3 0 R>>");
        assert_eq!(Object::Dictionary(Dictionary::new()).to_string(), "<<>>");
    }

    #[test]
    fn test_array_display() {
        let arr = Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(595.5),
            Object::string("x"),
        ]);
        assert_eq!(arr.to_string(), "[0 0 595.5 (x)]");
    }

    #[test]
    fn test_dict_type() {
        let page = Object::dictionary([("Type", Object::name("Page"))]);
        assert_eq!(page.dict_type(), Some("Page"));
        assert_eq!(Object::Integer(1).dict_type(), None);

        let stream = Object::Stream {
            dict: [("Type".to_string(), Object::name("XObject"))]
                .into_iter()
                .collect(),
            data: bytes::Bytes::from_static(b"q Q"),
        };
        assert_eq!(stream.dict_type(), Some("XObject"));
        assert_eq!(stream.kind(), ObjectKind::Stream);
    }
}

use phf::phf_map;
use std::borrow::Cow;
use std::fmt;

/// A per-atom attribute that can be read from an [`AtomStore`] and queried
/// by the selection language.
///
/// [`AtomStore`]: super::store::AtomStore
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// 0-based position of the atom in the store.
    Index,
    Name,
    Resname,
    /// Residue sequence number as written in the source file.
    Resid,
    Chain,
    Element,
    /// Atomic mass; missing for atoms whose element is unknown.
    Mass,
    Charge,
    X,
    Y,
    Z,
}

/// The value type an attribute produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    Integer,
    Float,
    Text,
}

impl AttributeKind {
    pub fn is_numeric(self) -> bool {
        matches!(self, AttributeKind::Integer | AttributeKind::Float)
    }
}

/// Registry of the attribute names recognised by the selection language.
///
/// Names are case-sensitive. Adding an attribute means adding a variant, an
/// entry here and a column read in `AtomStore::attribute`; the parser picks
/// it up without changes.
static ATTRIBUTES: phf::Map<&'static str, Attribute> = phf_map! {
    "index" => Attribute::Index,
    "name" => Attribute::Name,
    "resname" => Attribute::Resname,
    "resid" => Attribute::Resid,
    "chain" => Attribute::Chain,
    "element" => Attribute::Element,
    "mass" => Attribute::Mass,
    "charge" => Attribute::Charge,
    "x" => Attribute::X,
    "y" => Attribute::Y,
    "z" => Attribute::Z,
};

impl Attribute {
    /// Looks up an attribute by its registered name.
    pub fn lookup(name: &str) -> Option<Attribute> {
        ATTRIBUTES.get(name).copied()
    }

    /// Returns all registered attribute names, sorted.
    pub fn names() -> Vec<&'static str> {
        let mut names: Vec<&'static str> = ATTRIBUTES.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn name(self) -> &'static str {
        match self {
            Attribute::Index => "index",
            Attribute::Name => "name",
            Attribute::Resname => "resname",
            Attribute::Resid => "resid",
            Attribute::Chain => "chain",
            Attribute::Element => "element",
            Attribute::Mass => "mass",
            Attribute::Charge => "charge",
            Attribute::X => "x",
            Attribute::Y => "y",
            Attribute::Z => "z",
        }
    }

    pub fn kind(self) -> AttributeKind {
        match self {
            Attribute::Index | Attribute::Resid => AttributeKind::Integer,
            Attribute::Name | Attribute::Resname | Attribute::Chain | Attribute::Element => {
                AttributeKind::Text
            }
            Attribute::Mass | Attribute::Charge | Attribute::X | Attribute::Y | Attribute::Z => {
                AttributeKind::Float
            }
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed attribute value read from the store.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue<'a> {
    Integer(i64),
    Float(f64),
    Text(Cow<'a, str>),
    /// The atom has no value for this attribute.
    Missing,
}

impl AttributeValue<'_> {
    /// Returns the value as a float for numeric variants.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttributeValue::Integer(v) => Some(*v as f64),
            AttributeValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, AttributeValue::Missing)
    }
}

impl fmt::Display for AttributeValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Integer(v) => write!(f, "{}", v),
            AttributeValue::Float(v) => write!(f, "{}", v),
            AttributeValue::Text(s) => f.write_str(s),
            AttributeValue::Missing => f.write_str("-"),
        }
    }
}

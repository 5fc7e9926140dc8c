//! XML Schema Part 2 datatype IRIs and the persistent datatype catalog.
//!
//! The catalog assigns each recognized datatype a small integer id (1..=46)
//! in lexicographic IRI order. These ids are embedded in persisted literal
//! keys, so the table and its assignment must never change for a deployed
//! store.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// The XML Schema datatype namespace.
pub const NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema#";

pub const ANY_TYPE: &str = "http://www.w3.org/2001/XMLSchema#anyType";
pub const ANY_SIMPLE_TYPE: &str = "http://www.w3.org/2001/XMLSchema#anySimpleType";
pub const DURATION: &str = "http://www.w3.org/2001/XMLSchema#duration";
pub const DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";
pub const TIME: &str = "http://www.w3.org/2001/XMLSchema#time";
pub const DATE: &str = "http://www.w3.org/2001/XMLSchema#date";
pub const G_YEAR_MONTH: &str = "http://www.w3.org/2001/XMLSchema#gYearMonth";
pub const G_YEAR: &str = "http://www.w3.org/2001/XMLSchema#gYear";
pub const G_MONTH_DAY: &str = "http://www.w3.org/2001/XMLSchema#gMonthDay";
pub const G_DAY: &str = "http://www.w3.org/2001/XMLSchema#gDay";
pub const G_MONTH: &str = "http://www.w3.org/2001/XMLSchema#gMonth";
pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
pub const BASE64_BINARY: &str = "http://www.w3.org/2001/XMLSchema#base64Binary";
pub const HEX_BINARY: &str = "http://www.w3.org/2001/XMLSchema#hexBinary";
pub const FLOAT: &str = "http://www.w3.org/2001/XMLSchema#float";
pub const DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
pub const ANY_URI: &str = "http://www.w3.org/2001/XMLSchema#anyURI";
pub const QNAME: &str = "http://www.w3.org/2001/XMLSchema#QName";
pub const NOTATION: &str = "http://www.w3.org/2001/XMLSchema#NOTATION";
pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
pub const NON_POSITIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#nonPositiveInteger";
pub const LONG: &str = "http://www.w3.org/2001/XMLSchema#long";
pub const NON_NEGATIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#nonNegativeInteger";
pub const NEGATIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#negativeInteger";
pub const INT: &str = "http://www.w3.org/2001/XMLSchema#int";
pub const UNSIGNED_LONG: &str = "http://www.w3.org/2001/XMLSchema#unsignedLong";
pub const POSITIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#positiveInteger";
pub const SHORT: &str = "http://www.w3.org/2001/XMLSchema#short";
pub const UNSIGNED_INT: &str = "http://www.w3.org/2001/XMLSchema#unsignedInt";
pub const BYTE: &str = "http://www.w3.org/2001/XMLSchema#byte";
pub const UNSIGNED_SHORT: &str = "http://www.w3.org/2001/XMLSchema#unsignedShort";
pub const UNSIGNED_BYTE: &str = "http://www.w3.org/2001/XMLSchema#unsignedByte";
pub const NORMALIZED_STRING: &str = "http://www.w3.org/2001/XMLSchema#normalizedString";
pub const TOKEN: &str = "http://www.w3.org/2001/XMLSchema#token";
pub const LANGUAGE: &str = "http://www.w3.org/2001/XMLSchema#language";
pub const NAME: &str = "http://www.w3.org/2001/XMLSchema#Name";
pub const NMTOKEN: &str = "http://www.w3.org/2001/XMLSchema#NMTOKEN";
pub const NCNAME: &str = "http://www.w3.org/2001/XMLSchema#NCName";
pub const NMTOKENS: &str = "http://www.w3.org/2001/XMLSchema#NMTOKENS";
pub const ID: &str = "http://www.w3.org/2001/XMLSchema#ID";
pub const IDREF: &str = "http://www.w3.org/2001/XMLSchema#IDREF";
pub const ENTITY: &str = "http://www.w3.org/2001/XMLSchema#ENTITY";
pub const IDREFS: &str = "http://www.w3.org/2001/XMLSchema#IDREFS";
pub const ENTITIES: &str = "http://www.w3.org/2001/XMLSchema#ENTITIES";

/// The recognized datatypes in lexicographic IRI order. The position in
/// this table (plus one) is the persistent datatype id.
pub const CATALOG: [&str; 46] = [
    ENTITIES,
    ENTITY,
    ID,
    IDREF,
    IDREFS,
    NCNAME,
    NMTOKEN,
    NMTOKENS,
    NOTATION,
    NAME,
    QNAME,
    ANY_SIMPLE_TYPE,
    ANY_TYPE,
    ANY_URI,
    BASE64_BINARY,
    BOOLEAN,
    BYTE,
    DATE,
    DATE_TIME,
    DECIMAL,
    DOUBLE,
    DURATION,
    FLOAT,
    G_DAY,
    G_MONTH,
    G_MONTH_DAY,
    G_YEAR,
    G_YEAR_MONTH,
    HEX_BINARY,
    INT,
    INTEGER,
    LANGUAGE,
    LONG,
    NEGATIVE_INTEGER,
    NON_NEGATIVE_INTEGER,
    NON_POSITIVE_INTEGER,
    NORMALIZED_STRING,
    POSITIVE_INTEGER,
    SHORT,
    STRING,
    TIME,
    TOKEN,
    UNSIGNED_BYTE,
    UNSIGNED_INT,
    UNSIGNED_LONG,
    UNSIGNED_SHORT,
];

static ID_BY_IRI: Lazy<HashMap<&'static str, u8>> = Lazy::new(|| {
    CATALOG
        .iter()
        .enumerate()
        .map(|(i, &iri)| (iri, (i + 1) as u8))
        .collect()
});

/// Catalog id for a datatype IRI, or None for datatypes outside the catalog.
pub fn datatype_id(iri: &str) -> Option<u8> {
    ID_BY_IRI.get(iri).copied()
}

/// Datatype IRI for a catalog id. Id 0 is reserved for non-catalog
/// datatypes and yields None.
pub fn datatype_by_id(id: u8) -> Option<&'static str> {
    if id == 0 {
        return None;
    }
    CATALOG.get(id as usize - 1).copied()
}

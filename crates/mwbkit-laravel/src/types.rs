//! MySQL type classification and the Laravel method names behind each type.

/// Size token of an integer type, spliced into Laravel's method names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntSize {
    Tiny,
    Small,
    Medium,
    Regular,
    Big,
}

impl IntSize {
    pub fn token(&self) -> &'static str {
        match self {
            IntSize::Tiny => "Tiny",
            IntSize::Small => "Small",
            IntSize::Medium => "Medium",
            IntSize::Regular => "",
            IntSize::Big => "Big",
        }
    }

    /// `increments`, `tinyIncrements`, ..., `bigIncrements`
    pub fn increments_method(&self) -> String {
        lcfirst(&format!("{}Increments", self.token()))
    }

    /// `unsignedInteger`, `unsignedTinyInteger`, ...
    pub fn unsigned_method(&self) -> String {
        format!("unsigned{}Integer", self.token())
    }

    /// `integer`, `tinyInteger`, ...
    pub fn signed_method(&self) -> String {
        lcfirst(&format!("{}Integer", self.token()))
    }
}

/// How a MySQL type is lowered. Each family carries the Laravel method
/// name it starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeFamily {
    Integer(IntSize),
    Decimal(&'static str),
    String(&'static str),
    Time(&'static str),
    Enumerated(&'static str),
    /// Types with a one-to-one method and no extra arguments.
    Residual(&'static str),
}

pub const INTEGER_TYPES: &[(&str, IntSize)] = &[
    ("tinyint", IntSize::Tiny),
    ("smallint", IntSize::Small),
    ("mediumint", IntSize::Medium),
    ("int", IntSize::Regular),
    ("bigint", IntSize::Big),
];

pub const DECIMAL_TYPES: &[(&str, &str)] = &[
    ("float", "float"),
    ("double", "double"),
    ("real", "double"),
    ("decimal", "decimal"),
];

pub const STRING_TYPES: &[(&str, &str)] = &[
    ("char", "char"),
    ("nchar", "char"),
    ("varchar", "string"),
    ("nvarchar", "string"),
];

pub const TIME_TYPES: &[(&str, &str)] = &[
    ("date", "date"),
    ("time", "time"),
    ("time_f", "time"),
    ("datetime", "datetime"),
    ("datetime_f", "datetime"),
    ("timestamp", "timestamp"),
    ("timestamp_f", "timestamp"),
];

pub const ENUMERATED_TYPES: &[(&str, &str)] = &[("enum", "enum"), ("set", "set")];

pub const RESIDUAL_TYPES: &[(&str, &str)] = &[
    ("tinytext", "tinyText"),
    ("text", "text"),
    ("mediumtext", "mediumText"),
    ("longtext", "longText"),
    ("binary", "blob"),
    ("varbinary", "blob"),
    ("tinyblob", "blob"),
    ("blob", "blob"),
    ("mediumblob", "blob"),
    ("longblob", "blob"),
    ("json", "json"),
    ("boolean", "boolean"),
    ("year", "year"),
    ("geometry", "geometry"),
    ("point", "point"),
    ("linestring", "lineString"),
    ("polygon", "polygon"),
    ("geometrycollection", "geometryCollection"),
    ("multipoint", "multiPoint"),
    ("multilinestring", "multiLineString"),
    ("multipolygon", "multiPolygon"),
];

fn lookup<T: Copy>(table: &[(&str, T)], mysql_type: &str) -> Option<T> {
    table
        .iter()
        .find(|(name, _)| *name == mysql_type)
        .map(|(_, value)| *value)
}

/// Classify a MySQL type name (the last segment of a Workbench type token).
///
/// Returns `None` for types with no Laravel counterpart, such as `bit`.
pub fn classify(mysql_type: &str) -> Option<TypeFamily> {
    lookup(INTEGER_TYPES, mysql_type)
        .map(TypeFamily::Integer)
        .or_else(|| lookup(DECIMAL_TYPES, mysql_type).map(TypeFamily::Decimal))
        .or_else(|| lookup(STRING_TYPES, mysql_type).map(TypeFamily::String))
        .or_else(|| lookup(TIME_TYPES, mysql_type).map(TypeFamily::Time))
        .or_else(|| lookup(ENUMERATED_TYPES, mysql_type).map(TypeFamily::Enumerated))
        .or_else(|| lookup(RESIDUAL_TYPES, mysql_type).map(TypeFamily::Residual))
}

pub(crate) fn lcfirst(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub(crate) fn ucfirst(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
